use std::{cell::Cell, fmt, future::Future, rc::Rc};

use futures::future::LocalBoxFuture;

use crate::scheduler::Scheduler;

/// How far below the top threshold the container is re-anchored after a
/// "load previous" callback settles.
pub const TOP_REANCHOR_DISTANCE: f64 = 100.0;

/// A scrollable element the detector can observe.
///
/// Geometry follows the DOM: `scroll_extent` is the total scrollable height,
/// `scroll_offset` the distance scrolled from the top and `viewport_extent`
/// the visible height.
pub trait ScrollContainer: Clone + 'static {
    /// Token identifying a registered scroll listener.
    type Listener: 'static;

    /// Total scrollable extent of the content.
    fn scroll_extent(&self) -> f64;
    /// Current distance scrolled from the top.
    fn scroll_offset(&self) -> f64;
    /// Visible extent of the container.
    fn viewport_extent(&self) -> f64;
    /// Programmatically scroll to `offset`.
    fn set_scroll_offset(&self, offset: f64);

    /// Call `handler` on every scroll event. Returns `None` if the listener
    /// could not be registered.
    fn add_scroll_listener(&self, handler: Rc<dyn Fn()>) -> Option<Self::Listener>;
    /// Remove a listener registered with [`add_scroll_listener`](Self::add_scroll_listener).
    fn remove_scroll_listener(&self, listener: Self::Listener);
}

/// What an edge callback hands back to the detector.
pub enum EdgeResponse {
    /// Nothing left to do.
    Ready,
    /// Work still in flight. The detector spawns it and, for the top edge,
    /// re-anchors the scroll position once it settles.
    Pending(LocalBoxFuture<'static, ()>),
}

impl EdgeResponse {
    /// Wrap an in-flight load.
    pub fn pending(future: impl Future<Output = ()> + 'static) -> Self {
        EdgeResponse::Pending(Box::pin(future))
    }
}

impl From<()> for EdgeResponse {
    fn from(_: ()) -> Self {
        EdgeResponse::Ready
    }
}

impl fmt::Debug for EdgeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeResponse::Ready => f.write_str("Ready"),
            EdgeResponse::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// Callback run when the container nears an edge.
pub type EdgeCallback = Rc<dyn Fn() -> EdgeResponse>;

/// Whether the bottom callback may fire again before the content grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BottomLatch {
    /// Fire on every scroll event within the bottom offset.
    #[default]
    Disabled,
    /// Fire once, then stay quiet until the scroll extent grows.
    UntilContentGrows,
}

/// Configuration for a [`ScrollEdgeDetector`].
#[derive(Clone, Default)]
pub struct ScrollEdgeOptions {
    /// Called when the distance to the bottom is at most `bottom_offset`.
    pub on_reach_bottom: Option<EdgeCallback>,
    /// Pixel tolerance for the bottom edge.
    pub bottom_offset: f64,
    /// Called when the scroll offset is at most `top_offset`.
    pub on_reach_top: Option<EdgeCallback>,
    /// Pixel tolerance for the top edge.
    pub top_offset: f64,
    /// Repeat-trigger policy for the bottom edge.
    pub bottom_latch: BottomLatch,
}

impl ScrollEdgeOptions {
    /// Set the "load more" callback.
    pub fn on_reach_bottom<R>(mut self, callback: impl Fn() -> R + 'static) -> Self
    where
        R: Into<EdgeResponse>,
    {
        self.on_reach_bottom = Some(Rc::new(move || callback().into()));
        self
    }

    /// Set the "load previous" callback.
    pub fn on_reach_top<R>(mut self, callback: impl Fn() -> R + 'static) -> Self
    where
        R: Into<EdgeResponse>,
    {
        self.on_reach_top = Some(Rc::new(move || callback().into()));
        self
    }

    /// Set the bottom tolerance.
    pub fn bottom_offset(mut self, offset: f64) -> Self {
        self.bottom_offset = offset;
        self
    }

    /// Set the top tolerance.
    pub fn top_offset(mut self, offset: f64) -> Self {
        self.top_offset = offset;
        self
    }

    /// Set the bottom repeat-trigger policy.
    pub fn bottom_latch(mut self, latch: BottomLatch) -> Self {
        self.bottom_latch = latch;
        self
    }
}

impl fmt::Debug for ScrollEdgeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollEdgeOptions")
            .field("on_reach_bottom", &self.on_reach_bottom.is_some())
            .field("bottom_offset", &self.bottom_offset)
            .field("on_reach_top", &self.on_reach_top.is_some())
            .field("top_offset", &self.top_offset)
            .field("bottom_latch", &self.bottom_latch)
            .finish()
    }
}

/// Per-container bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollObserverState {
    /// Scroll extent seen on the previous event.
    pub previous_scroll_extent: f64,
    /// Whether the bottom callback already fired for the current extent.
    pub has_reached_bottom_edge: bool,
}

/// Which callbacks a scroll event triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeHits {
    /// `on_reach_top` ran.
    pub top: bool,
    /// `on_reach_bottom` ran.
    pub bottom: bool,
}

/// Turns raw scroll positions into "near top" / "near bottom" events.
pub struct ScrollEdgeDetector<S: Scheduler> {
    scheduler: S,
    options: ScrollEdgeOptions,
    state: Cell<ScrollObserverState>,
}

impl<S: Scheduler> ScrollEdgeDetector<S> {
    /// Create a detector that isn't attached to anything yet.
    pub fn new(scheduler: S, options: ScrollEdgeOptions) -> Self {
        Self {
            scheduler,
            options,
            state: Cell::new(ScrollObserverState::default()),
        }
    }

    /// Listen to scroll events on `element`.
    ///
    /// Returns `None` when there is no element yet (an unbound node ref, for
    /// example) or the listener could not be registered.
    pub fn attach<C: ScrollContainer>(self, element: Option<C>) -> Option<ScrollSubscription<C>> {
        let element = element?;
        let detector = Rc::new(self);
        let handler: Rc<dyn Fn()> = {
            let element = element.clone();
            Rc::new(move || {
                detector.handle_scroll(&element);
            })
        };

        match element.add_scroll_listener(handler) {
            Some(listener) => Some(ScrollSubscription {
                element,
                listener: Some(listener),
            }),
            None => {
                leptos::logging::debug_warn!("Failed to register scroll listener.");
                None
            }
        }
    }

    /// Process one scroll event on `container`.
    ///
    /// The top edge is checked before the bottom edge. A container short
    /// enough to satisfy both thresholds triggers both callbacks.
    pub fn handle_scroll<C: ScrollContainer>(&self, container: &C) -> EdgeHits {
        let extent = container.scroll_extent();
        let offset = container.scroll_offset();
        let viewport = container.viewport_extent();

        let mut state = self.state.get();
        if extent > state.previous_scroll_extent {
            // New content moved the bottom boundary.
            state.has_reached_bottom_edge = false;
        }
        state.previous_scroll_extent = extent;
        self.state.set(state);

        let mut hits = EdgeHits::default();

        if let Some(on_reach_top) = &self.options.on_reach_top {
            if offset <= self.options.top_offset {
                hits.top = true;
                if let EdgeResponse::Pending(load) = on_reach_top() {
                    self.reanchor_after(load, container.clone());
                }
            }
        }

        if let Some(on_reach_bottom) = &self.options.on_reach_bottom {
            let distance_from_bottom = (extent - offset - viewport).floor();
            if distance_from_bottom <= self.options.bottom_offset && self.take_bottom_latch() {
                hits.bottom = true;
                if let EdgeResponse::Pending(load) = on_reach_bottom() {
                    self.scheduler.spawn_local(load);
                }
            }
        }

        hits
    }

    /// Snapshot of the bookkeeping state.
    pub fn state(&self) -> ScrollObserverState {
        self.state.get()
    }

    /// The options this detector was created with.
    pub fn options(&self) -> &ScrollEdgeOptions {
        &self.options
    }

    /// Whether the bottom callback may fire now, latching it if the policy
    /// asks for that.
    fn take_bottom_latch(&self) -> bool {
        match self.options.bottom_latch {
            BottomLatch::Disabled => true,
            BottomLatch::UntilContentGrows => {
                let mut state = self.state.get();
                if state.has_reached_bottom_edge {
                    return false;
                }
                state.has_reached_bottom_edge = true;
                self.state.set(state);
                true
            }
        }
    }

    /// Once `load` settles, move the container just below the top threshold on
    /// the next frame so prepended content doesn't yank the view.
    fn reanchor_after<C: ScrollContainer>(&self, load: LocalBoxFuture<'static, ()>, container: C) {
        let target = self.options.top_offset + TOP_REANCHOR_DISTANCE;
        let frames = self.scheduler.clone();
        self.scheduler.spawn_local(Box::pin(async move {
            load.await;
            frames.request_animation_frame(Box::new(move || container.set_scroll_offset(target)));
        }));
    }
}

/// Live scroll listener. Dropping it removes the listener.
pub struct ScrollSubscription<C: ScrollContainer> {
    element: C,
    listener: Option<C::Listener>,
}

impl<C: ScrollContainer> ScrollSubscription<C> {
    /// Remove the listener now.
    pub fn detach(mut self) {
        self.remove();
    }

    /// The observed element.
    pub fn element(&self) -> &C {
        &self.element
    }

    fn remove(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.element.remove_scroll_listener(listener);
        }
    }
}

impl<C: ScrollContainer> Drop for ScrollSubscription<C> {
    fn drop(&mut self) {
        self.remove();
    }
}
