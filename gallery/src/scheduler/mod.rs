use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::Instant;

mod dom;
mod manual;

pub use dom::*;
pub use manual::*;

/// The host environment's cooperative scheduler.
///
/// Everything the timer and the scroll detector need from the outside world
/// goes through here: a clock, repeating and one-shot timers, animation
/// frames, and a local executor for awaitables returned by callbacks.
///
/// Scheduling methods return `None` when the host refuses the request, in
/// which case nothing was scheduled.
pub trait Scheduler: Clone + 'static {
    /// Handle to a pending timer.
    type Handle: ScheduleHandle + 'static;

    /// Current time according to this scheduler.
    fn now(&self) -> Instant;

    /// Run `callback` every `period` until the handle is cleared.
    fn set_interval(&self, callback: Box<dyn Fn()>, period: Duration) -> Option<Self::Handle>;

    /// Run `callback` once after `delay` unless the handle is cleared first.
    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> Option<Self::Handle>;

    /// Run `callback` before the next paint.
    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>);

    /// Drive `future` to completion on the local executor.
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>);
}

/// A cancellable scheduled task.
pub trait ScheduleHandle {
    /// Cancel the task. Clearing an already fired timeout is a no-op.
    fn clear(self);
}
