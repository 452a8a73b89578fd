use std::{cell::RefCell, rc::Rc};

use leptos::*;

use crate::{ScrollContainer, ScrollEdgeDetector, ScrollEdgeOptions, ScrollSubscription, Scheduler};

/// Calls back when the user scrolls a container near its top or bottom.
///
/// Used to drive infinite queries: `on_reach_bottom` fetches the next page,
/// `on_reach_top` fetches the previous one. When the top callback returns a
/// pending load, the container is nudged below the top threshold once the
/// load settles so prepended rows don't yank the view.
///
/// Example
/// ```
/// use leptos::*;
/// use leptos_query_gallery::*;
///
/// #[component]
/// fn Feed(fetch_next_page: Callback<()>) -> impl IntoView {
///     let container = create_node_ref::<html::Div>();
///
///     use_on_scroll(
///         container,
///         ScrollEdgeOptions::default()
///             .on_reach_bottom(move || fetch_next_page.call(()))
///             .bottom_offset(100.0),
///     );
///
///     view! { <div node_ref=container style="max-height: 120px; overflow: auto"></div> }
/// }
/// ```
pub fn use_on_scroll(node_ref: NodeRef<html::Div>, options: ScrollEdgeOptions) {
    cfg_if::cfg_if! {
        if #[cfg(any(feature = "hydrate", feature = "csr"))] {
            use_scroll_edges(
                move || {
                    node_ref
                        .get()
                        .map(|element| web_sys::HtmlElement::clone(&element))
                },
                crate::DomScheduler,
                options,
            );
        } else {
            let _ = (node_ref, options);
        }
    }
}

/// [`use_on_scroll`] for any [`ScrollContainer`] and [`Scheduler`].
///
/// `container` is tracked: whenever it yields a different element the old
/// listener is removed and a fresh detector is attached. Everything is
/// detached when the reactive scope is cleaned up.
pub fn use_scroll_edges<C, S>(
    container: impl Fn() -> Option<C> + 'static,
    scheduler: S,
    options: ScrollEdgeOptions,
) where
    C: ScrollContainer,
    S: Scheduler,
{
    let subscription: Rc<RefCell<Option<ScrollSubscription<C>>>> = Rc::new(RefCell::new(None));

    create_effect({
        let subscription = subscription.clone();
        move |_| {
            let previous = subscription.borrow_mut().take();
            drop(previous);

            let detector = ScrollEdgeDetector::new(scheduler.clone(), options.clone());
            let attached = detector.attach(container());
            *subscription.borrow_mut() = attached;
        }
    });

    on_cleanup(move || {
        let previous = subscription.borrow_mut().take();
        drop(previous);
    });
}

#[cfg(all(test, not(feature = "ssr")))]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{test_util::FakeContainer, ManualScheduler};

    #[test]
    fn follows_the_bound_element() {
        let runtime = create_runtime();
        let (element, set_element) = create_signal(None::<FakeContainer>);
        let hits = Rc::new(Cell::new(0));

        use_scroll_edges(
            move || element.get(),
            ManualScheduler::new(),
            ScrollEdgeOptions::default().on_reach_bottom({
                let hits = hits.clone();
                move || hits.set(hits.get() + 1)
            }),
        );

        let first = FakeContainer::new(400.0, 100.0);
        let second = FakeContainer::new(400.0, 100.0);

        set_element.set(Some(first.clone()));
        assert_eq!(1, first.listener_count());

        first.scroll_to(300.0);
        assert_eq!(1, hits.get());

        set_element.set(Some(second.clone()));
        assert_eq!(0, first.listener_count());
        assert_eq!(1, second.listener_count());

        first.scroll_to(300.0);
        assert_eq!(1, hits.get());

        second.scroll_to(300.0);
        assert_eq!(2, hits.get());

        set_element.set(None);
        assert_eq!(0, second.listener_count());

        runtime.dispose();
    }

    #[test]
    fn cleanup_detaches_the_listener() {
        let runtime = create_runtime();
        let (mounted, set_mounted) = create_signal(true);
        let container = FakeContainer::new(400.0, 100.0);
        let hits = Rc::new(Cell::new(0));

        create_effect({
            let container = container.clone();
            let hits = hits.clone();
            move |_| {
                if mounted.get() {
                    let container = container.clone();
                    use_scroll_edges(
                        move || Some(container.clone()),
                        ManualScheduler::new(),
                        ScrollEdgeOptions::default().on_reach_bottom({
                            let hits = hits.clone();
                            move || hits.set(hits.get() + 1)
                        }),
                    );
                }
            }
        });
        assert_eq!(1, container.listener_count());

        container.scroll_to(300.0);
        assert_eq!(1, hits.get());

        // Re-running the effect disposes everything the previous run created.
        set_mounted.set(false);
        assert_eq!(0, container.listener_count());

        container.scroll_to(300.0);
        assert_eq!(1, hits.get());

        runtime.dispose();
    }

    #[test]
    fn unbound_element_registers_nothing() {
        let runtime = create_runtime();
        let hits = Rc::new(Cell::new(0));

        use_scroll_edges(
            || None::<FakeContainer>,
            ManualScheduler::new(),
            ScrollEdgeOptions::default().on_reach_top({
                let hits = hits.clone();
                move || hits.set(hits.get() + 1)
            }),
        );

        assert_eq!(0, hits.get());
        runtime.dispose();
    }
}
