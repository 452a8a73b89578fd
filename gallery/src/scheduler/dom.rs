use std::time::Duration;

use futures::future::LocalBoxFuture;
use leptos::leptos_dom::helpers::{IntervalHandle, TimeoutHandle};

use super::{ScheduleHandle, Scheduler};
use crate::Instant;

/// Scheduler backed by the browser's timers and Leptos' local executor.
///
/// Only meaningful in the browser (`csr`/`hydrate`). The hooks never touch it
/// during SSR because effects don't run there.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomScheduler;

/// Handle to a browser timer.
#[derive(Debug, Clone, Copy)]
pub enum DomHandle {
    /// `setInterval` handle.
    Interval(IntervalHandle),
    /// `setTimeout` handle.
    Timeout(TimeoutHandle),
}

impl ScheduleHandle for DomHandle {
    fn clear(self) {
        match self {
            DomHandle::Interval(handle) => handle.clear(),
            DomHandle::Timeout(handle) => handle.clear(),
        }
    }
}

impl Scheduler for DomScheduler {
    type Handle = DomHandle;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn set_interval(&self, callback: Box<dyn Fn()>, period: Duration) -> Option<Self::Handle> {
        match leptos::set_interval_with_handle(move || callback(), period) {
            Ok(handle) => Some(DomHandle::Interval(handle)),
            Err(_) => {
                leptos::logging::debug_warn!("Failed to register interval of {:?}", period);
                None
            }
        }
    }

    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> Option<Self::Handle> {
        match leptos::set_timeout_with_handle(move || callback(), delay) {
            Ok(handle) => Some(DomHandle::Timeout(handle)),
            Err(_) => {
                leptos::logging::debug_warn!("Failed to register timeout of {:?}", delay);
                None
            }
        }
    }

    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) {
        leptos::request_animation_frame(move || callback())
    }

    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        leptos::spawn_local(future)
    }
}
