use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};

use crate::ScrollContainer;

/// Registered `scroll` listener on an element.
pub struct DomScrollListener(Closure<dyn Fn()>);

impl ScrollContainer for web_sys::HtmlElement {
    type Listener = DomScrollListener;

    fn scroll_extent(&self) -> f64 {
        f64::from(self.scroll_height())
    }

    fn scroll_offset(&self) -> f64 {
        f64::from(self.scroll_top())
    }

    fn viewport_extent(&self) -> f64 {
        f64::from(self.client_height())
    }

    fn set_scroll_offset(&self, offset: f64) {
        self.set_scroll_top(offset.round() as _);
    }

    fn add_scroll_listener(&self, handler: Rc<dyn Fn()>) -> Option<Self::Listener> {
        let closure = Closure::<dyn Fn()>::new(move || handler());
        match self.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(DomScrollListener(closure)),
            Err(_) => None,
        }
    }

    fn remove_scroll_listener(&self, listener: Self::Listener) {
        if self
            .remove_event_listener_with_callback("scroll", listener.0.as_ref().unchecked_ref())
            .is_err()
        {
            leptos::logging::debug_warn!("Failed to remove scroll listener.");
        }
    }
}
