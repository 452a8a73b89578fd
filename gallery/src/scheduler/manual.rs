use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
    time::Duration,
};

use futures::{
    executor::{LocalPool, LocalSpawner},
    future::LocalBoxFuture,
    task::LocalSpawnExt,
};

use super::{ScheduleHandle, Scheduler};
use crate::Instant;

/// Deterministic scheduler with a virtual clock.
///
/// Nothing happens until the owner moves time with [`advance`](Self::advance),
/// runs pending animation frames with [`run_frames`](Self::run_frames), or
/// polls spawned futures with [`run_until_stalled`](Self::run_until_stalled).
/// Timers due at the same instant fire in registration order.
///
/// ```
/// use leptos_query_gallery::*;
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let timer = ElapsedTimer::start(scheduler.clone(), ElapsedTimerOptions::default());
///
/// scheduler.advance(Duration::from_millis(500));
/// assert_eq!("0.50s", timer.display());
/// ```
#[derive(Clone)]
pub struct ManualScheduler {
    inner: Rc<ManualInner>,
}

struct ManualInner {
    now: Cell<Instant>,
    next_id: Cell<u64>,
    timers: RefCell<BTreeMap<u64, PendingTimer>>,
    frames: RefCell<Vec<Box<dyn FnOnce()>>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

struct PendingTimer {
    due: Instant,
    task: TimerTask,
}

enum TimerTask {
    Once(Box<dyn FnOnce()>),
    Repeat { period: Duration, callback: Rc<dyn Fn()> },
}

/// Handle to a [`ManualScheduler`] timer.
pub struct ManualHandle {
    id: u64,
    scheduler: Weak<ManualInner>,
}

impl ScheduleHandle for ManualHandle {
    fn clear(self) {
        if let Some(inner) = self.scheduler.upgrade() {
            inner.timers.borrow_mut().remove(&self.id);
        }
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// Scheduler whose clock reads the Unix epoch.
    pub fn new() -> Self {
        Self::starting_at(Instant(Duration::ZERO))
    }

    /// Scheduler whose clock starts at `now`.
    pub fn starting_at(now: Instant) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(ManualInner {
                now: Cell::new(now),
                next_id: Cell::new(0),
                timers: RefCell::new(BTreeMap::new()),
                frames: RefCell::new(Vec::new()),
                pool: RefCell::new(pool),
                spawner,
            }),
        }
    }

    /// Move the clock forward by `by`, firing every timer that comes due on
    /// the way, in due order.
    ///
    /// Spawned futures are polled after each fired timer, so work a timer
    /// kicks off is visible before the next one runs.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.now.get() + by;

        while let Some(id) = self.next_due(target) {
            let Some(timer) = self.inner.timers.borrow_mut().remove(&id) else {
                continue;
            };
            self.inner.now.set(timer.due);

            match timer.task {
                TimerTask::Once(callback) => callback(),
                TimerTask::Repeat { period, callback } => {
                    // Re-arm before running so the callback can clear itself.
                    self.inner.timers.borrow_mut().insert(
                        id,
                        PendingTimer {
                            due: timer.due + period,
                            task: TimerTask::Repeat {
                                period,
                                callback: callback.clone(),
                            },
                        },
                    );
                    callback();
                }
            }

            self.run_until_stalled();
        }

        self.inner.now.set(target);
        self.run_until_stalled();
    }

    /// Run every animation frame requested so far.
    ///
    /// Frames requested while running are deferred to the next call.
    pub fn run_frames(&self) -> usize {
        let frames = std::mem::take(&mut *self.inner.frames.borrow_mut());
        let count = frames.len();
        for frame in frames {
            frame();
        }
        count
    }

    /// Poll spawned futures until none of them can make progress.
    pub fn run_until_stalled(&self) {
        // Reentrant calls come from futures that drive the scheduler themselves.
        if let Ok(mut pool) = self.inner.pool.try_borrow_mut() {
            pool.run_until_stalled();
        }
    }

    /// Number of timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    /// Number of animation frames waiting for [`run_frames`](Self::run_frames).
    pub fn pending_frames(&self) -> usize {
        self.inner.frames.borrow().len()
    }

    fn next_due(&self, target: Instant) -> Option<u64> {
        self.inner
            .timers
            .borrow()
            .iter()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, _)| *id)
    }

    fn register(&self, due: Instant, task: TimerTask) -> ManualHandle {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .timers
            .borrow_mut()
            .insert(id, PendingTimer { due, task });

        ManualHandle {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn now(&self) -> Instant {
        self.inner.now.get()
    }

    fn set_interval(&self, callback: Box<dyn Fn()>, period: Duration) -> Option<Self::Handle> {
        // A zero period would spin forever inside `advance`.
        if period.is_zero() {
            leptos::logging::debug_warn!("Refusing to register a zero-period interval.");
            return None;
        }
        let due = self.now() + period;
        Some(self.register(
            due,
            TimerTask::Repeat {
                period,
                callback: Rc::from(callback),
            },
        ))
    }

    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> Option<Self::Handle> {
        let due = self.now() + delay;
        Some(self.register(due, TimerTask::Once(callback)))
    }

    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) {
        self.inner.frames.borrow_mut().push(callback);
    }

    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        if self.inner.spawner.spawn_local(future).is_err() {
            leptos::logging::debug_warn!("Manual executor has shut down.");
        }
    }
}
