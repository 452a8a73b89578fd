use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::ScrollContainer;

/// In-memory scroll container. `scroll_to` mimics a user scroll and dispatches
/// to listeners; `set_scroll_offset` mimics a programmatic write and doesn't.
#[derive(Clone)]
pub(crate) struct FakeContainer {
    inner: Rc<FakeInner>,
}

struct FakeInner {
    extent: Cell<f64>,
    offset: Cell<f64>,
    viewport: Cell<f64>,
    next_listener: Cell<usize>,
    listeners: RefCell<Vec<(usize, Rc<dyn Fn()>)>>,
}

impl FakeContainer {
    pub(crate) fn new(extent: f64, viewport: f64) -> Self {
        Self {
            inner: Rc::new(FakeInner {
                extent: Cell::new(extent),
                offset: Cell::new(0.0),
                viewport: Cell::new(viewport),
                next_listener: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn scroll_to(&self, offset: f64) {
        self.inner.offset.set(offset);
        let listeners: Vec<_> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in listeners {
            handler();
        }
    }

    pub(crate) fn set_scroll_extent(&self, extent: f64) {
        self.inner.extent.set(extent);
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl ScrollContainer for FakeContainer {
    type Listener = usize;

    fn scroll_extent(&self) -> f64 {
        self.inner.extent.get()
    }

    fn scroll_offset(&self) -> f64 {
        self.inner.offset.get()
    }

    fn viewport_extent(&self) -> f64 {
        self.inner.viewport.get()
    }

    fn set_scroll_offset(&self, offset: f64) {
        self.inner.offset.set(offset);
    }

    fn add_scroll_listener(&self, handler: Rc<dyn Fn()>) -> Option<Self::Listener> {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, handler));
        Some(id)
    }

    fn remove_scroll_listener(&self, listener: Self::Listener) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(id, _)| *id != listener);
    }
}
