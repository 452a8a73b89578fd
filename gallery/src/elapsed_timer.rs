use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    time::Duration,
};

use crate::{
    scheduler::{ScheduleHandle, Scheduler},
    Instant,
};

/// Default cadence at which a running timer recomputes its elapsed time.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for an [`ElapsedTimer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElapsedTimerOptions {
    /// Start polling immediately. Defaults to `true`.
    pub enabled: bool,
    /// Stop automatically once this much time has elapsed, and report exactly
    /// this value afterwards.
    pub stop_budget: Option<Duration>,
    /// Show hundredths of a second. When `false`, seconds are rounded to the
    /// nearest whole number. Defaults to `true`.
    pub show_sub_second_precision: bool,
    /// How often the elapsed time is recomputed while running.
    pub poll_interval: Duration,
}

impl Default for ElapsedTimerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            stop_budget: None,
            show_sub_second_precision: true,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Where a timer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimerPhase {
    /// Not polling, and no stop condition has fired.
    #[default]
    Idle,
    /// Polling.
    Running,
    /// A stop condition fired. The elapsed value is frozen until reset.
    Stopped,
}

/// The mutable state behind an [`ElapsedTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimerState {
    /// When the timer last (re)activated.
    pub started_at: Option<Instant>,
    /// Elapsed time as of the last tick, or the final value once stopped.
    pub elapsed: Duration,
    /// Whether polling is active.
    pub is_enabled: bool,
    /// Whether a stop condition has fired.
    pub has_stopped: bool,
}

impl TimerState {
    /// The lifecycle phase these flags describe.
    pub fn phase(&self) -> TimerPhase {
        match (self.is_enabled, self.has_stopped) {
            (_, true) => TimerPhase::Stopped,
            (true, false) => TimerPhase::Running,
            (false, false) => TimerPhase::Idle,
        }
    }
}

type TimerListener = Rc<dyn Fn(&TimerState)>;

/// Tracks the time since an activation point until a stop condition fires.
///
/// A running timer recomputes its elapsed time on every poll tick. It stops
/// when [`stop`](Self::stop) is called or when the optional stop budget runs
/// out, whichever happens first; later stop signals are ignored. A stopped
/// (or idle) timer can be re-armed with [`reset`](Self::reset).
///
/// Cloning yields another handle to the same timer. Scheduled callbacks only
/// hold weak references, so dropping the last handle cancels everything.
pub struct ElapsedTimer<S: Scheduler> {
    inner: Rc<TimerInner<S>>,
}

impl<S: Scheduler> Clone for ElapsedTimer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct TimerInner<S: Scheduler> {
    scheduler: S,
    options: ElapsedTimerOptions,
    state: Cell<TimerState>,
    poll: Cell<Option<S::Handle>>,
    budget: Cell<Option<S::Handle>>,
    listener: RefCell<Option<TimerListener>>,
}

impl<S: Scheduler> ElapsedTimer<S> {
    /// Create a timer, activating it right away if `options.enabled`.
    pub fn start(scheduler: S, options: ElapsedTimerOptions) -> Self {
        let enabled = options.enabled;
        let timer = Self {
            inner: Rc::new(TimerInner {
                scheduler,
                options,
                state: Cell::new(TimerState::default()),
                poll: Cell::new(None),
                budget: Cell::new(None),
                listener: RefCell::new(None),
            }),
        };
        if enabled {
            TimerInner::activate(&timer.inner);
        }
        timer
    }

    /// Stop the timer. No-op unless running.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Stop the timer once `condition` turns true.
    pub fn stop_if(&self, condition: bool) {
        if condition {
            self.stop();
        }
    }

    /// Re-arm the timer from zero.
    ///
    /// Ignored while running so overlapping activations can't happen. Returns
    /// whether the timer was re-armed.
    pub fn reset(&self) -> bool {
        if self.inner.state.get().is_enabled {
            return false;
        }
        TimerInner::activate(&self.inner);
        true
    }

    /// Enable or disable polling.
    ///
    /// Enabling an idle timer activates it. Disabling a running timer pauses it
    /// with its elapsed value intact. A stopped timer needs [`reset`](Self::reset).
    pub fn set_enabled(&self, enabled: bool) {
        let state = self.inner.state.get();
        match (enabled, state.phase()) {
            (true, TimerPhase::Idle) => TimerInner::activate(&self.inner),
            (false, TimerPhase::Running) => {
                self.inner.cancel_scheduled();
                let elapsed = self.inner.sample(&state);
                self.inner.update(|state| {
                    state.elapsed = elapsed;
                    state.is_enabled = false;
                });
            }
            _ => {}
        }
    }

    /// Cancel every pending timer without touching the displayed value.
    pub fn dispose(&self) {
        self.inner.cancel_scheduled();
    }

    /// Register a callback run after every state change, replacing any
    /// previous one.
    pub fn on_update(&self, listener: impl Fn(&TimerState) + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TimerState {
        self.inner.state.get()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TimerPhase {
        self.state().phase()
    }

    /// Elapsed time as of the last tick.
    pub fn elapsed(&self) -> Duration {
        self.state().elapsed
    }

    /// Elapsed time formatted for display, e.g. `"1.25s"`.
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed(), self.inner.options.show_sub_second_precision)
    }

    /// The options this timer was started with.
    pub fn options(&self) -> &ElapsedTimerOptions {
        &self.inner.options
    }
}

impl<S: Scheduler> TimerInner<S> {
    fn activate(this: &Rc<Self>) {
        this.cancel_scheduled();
        this.state.set(TimerState {
            started_at: Some(this.scheduler.now()),
            elapsed: Duration::ZERO,
            is_enabled: true,
            has_stopped: false,
        });

        let poll = {
            let timer = Rc::downgrade(this);
            this.scheduler.set_interval(
                Box::new(move || with_timer(&timer, |timer| timer.tick())),
                this.options.poll_interval,
            )
        };
        if poll.is_none() {
            leptos::logging::debug_warn!("Elapsed timer could not schedule polling.");
        }
        this.poll.set(poll);

        if let Some(budget) = this.options.stop_budget {
            let timer = Rc::downgrade(this);
            let handle = this.scheduler.set_timeout(
                Box::new(move || with_timer(&timer, |timer| timer.stop())),
                budget,
            );
            this.budget.set(handle);
        }

        // Notify last so a listener that stops the timer also cancels the
        // timers scheduled above.
        this.notify();
    }

    fn tick(&self) {
        let state = self.state.get();
        if state.phase() != TimerPhase::Running {
            return;
        }

        let elapsed = self.sample(&state);
        match self.options.stop_budget {
            Some(budget) if elapsed >= budget => self.stop(),
            _ => self.update(|state| state.elapsed = elapsed),
        }
    }

    fn stop(&self) {
        let state = self.state.get();
        if state.phase() != TimerPhase::Running {
            return;
        }

        self.cancel_scheduled();
        let elapsed = self
            .options
            .stop_budget
            .unwrap_or_else(|| self.sample(&state));
        self.update(|state| {
            state.elapsed = elapsed;
            state.is_enabled = false;
            state.has_stopped = true;
        });
    }

    /// Live elapsed time, never behind the last recorded value.
    fn sample(&self, state: &TimerState) -> Duration {
        let live = state
            .started_at
            .map(|started_at| self.scheduler.now() - started_at)
            .unwrap_or_default();
        live.max(state.elapsed)
    }

    fn cancel_scheduled(&self) {
        if let Some(handle) = self.poll.take() {
            handle.clear();
        }
        if let Some(handle) = self.budget.take() {
            handle.clear();
        }
    }

    fn update(&self, f: impl FnOnce(&mut TimerState)) {
        let mut state = self.state.get();
        f(&mut state);
        self.state.set(state);
        self.notify();
    }

    fn notify(&self) {
        // Clone out so the listener may call back into the timer.
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(&self.state.get());
        }
    }
}

impl<S: Scheduler> Drop for TimerInner<S> {
    fn drop(&mut self) {
        self.cancel_scheduled();
    }
}

fn with_timer<S: Scheduler>(timer: &Weak<TimerInner<S>>, f: impl FnOnce(&TimerInner<S>)) {
    if let Some(timer) = timer.upgrade() {
        f(&timer);
    }
}

/// Format an elapsed duration as seconds.
///
/// Sub-second precision always prints two digits, so the width doesn't jump
/// while the timer runs and a 1 s budget reads `"1.00s"`.
///
/// ```
/// use leptos_query_gallery::format_elapsed;
/// use std::time::Duration;
///
/// assert_eq!("1.25s", format_elapsed(Duration::from_millis(1250), true));
/// assert_eq!("1.00s", format_elapsed(Duration::from_secs(1), true));
/// assert_eq!("1s", format_elapsed(Duration::from_millis(1250), false));
/// assert_eq!("2s", format_elapsed(Duration::from_millis(1500), false));
/// ```
pub fn format_elapsed(elapsed: Duration, show_sub_second_precision: bool) -> String {
    let seconds = elapsed.as_secs_f64();
    if show_sub_second_precision {
        format!("{seconds:.2}s")
    } else {
        format!("{}s", seconds.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualScheduler;

    const TICK: Duration = DEFAULT_POLL_INTERVAL;

    fn running(
        scheduler: &ManualScheduler,
        options: ElapsedTimerOptions,
    ) -> ElapsedTimer<ManualScheduler> {
        ElapsedTimer::start(scheduler.clone(), options)
    }

    #[test]
    fn elapsed_increases_every_tick_while_running() {
        let scheduler = ManualScheduler::new();
        let timer = running(&scheduler, ElapsedTimerOptions::default());
        assert_eq!(TimerPhase::Running, timer.phase());

        let mut previous = timer.elapsed();
        for _ in 0..20 {
            scheduler.advance(TICK);
            let current = timer.elapsed();
            assert!(current > previous, "{current:?} should exceed {previous:?}");
            previous = current;
        }
        assert_eq!(Duration::from_secs(1), previous);
    }

    #[test]
    fn elapsed_only_moves_on_ticks() {
        let scheduler = ManualScheduler::new();
        let timer = running(&scheduler, ElapsedTimerOptions::default());

        scheduler.advance(Duration::from_millis(30));
        assert_eq!(Duration::ZERO, timer.elapsed());

        scheduler.advance(Duration::from_millis(30));
        assert_eq!(Duration::from_millis(50), timer.elapsed());
    }

    #[test]
    fn budget_stop_reports_exact_budget() {
        let scheduler = ManualScheduler::new();
        let timer = running(
            &scheduler,
            ElapsedTimerOptions {
                stop_budget: Some(Duration::from_millis(1000)),
                // Poll cadence that never lands on the budget.
                poll_interval: Duration::from_millis(70),
                ..Default::default()
            },
        );

        scheduler.advance(Duration::from_millis(2000));

        assert_eq!(TimerPhase::Stopped, timer.phase());
        assert_eq!(Duration::from_millis(1000), timer.elapsed());
        assert_eq!("1.00s", timer.display());
        assert_eq!(0, scheduler.pending_timers());
    }

    #[test]
    fn flag_stop_with_budget_reports_budget() {
        let scheduler = ManualScheduler::new();
        let timer = running(
            &scheduler,
            ElapsedTimerOptions {
                stop_budget: Some(Duration::from_secs(5)),
                show_sub_second_precision: false,
                ..Default::default()
            },
        );

        scheduler.advance(Duration::from_millis(4990));
        timer.stop_if(true);

        assert_eq!(Duration::from_secs(5), timer.elapsed());
        assert_eq!("5s", timer.display());
    }

    #[test]
    fn second_stop_signal_is_ignored() {
        let scheduler = ManualScheduler::new();
        let timer = running(
            &scheduler,
            ElapsedTimerOptions {
                stop_budget: Some(Duration::from_millis(300)),
                ..Default::default()
            },
        );

        scheduler.advance(Duration::from_millis(120));
        timer.stop();
        let frozen = timer.state();

        scheduler.advance(Duration::from_millis(500));
        timer.stop();

        assert_eq!(frozen, timer.state());
        assert!(frozen.has_stopped);
    }

    #[test]
    fn stopped_value_stays_frozen() {
        let scheduler = ManualScheduler::new();
        let timer = running(&scheduler, ElapsedTimerOptions::default());

        scheduler.advance(Duration::from_millis(260));
        timer.stop();
        assert_eq!(Duration::from_millis(260), timer.elapsed());

        scheduler.advance(Duration::from_secs(3));
        assert_eq!(Duration::from_millis(260), timer.elapsed());
        assert_eq!(0, scheduler.pending_timers());
    }

    #[test]
    fn reset_while_running_is_a_no_op() {
        let scheduler = ManualScheduler::new();
        let timer = running(&scheduler, ElapsedTimerOptions::default());

        scheduler.advance(Duration::from_millis(300));
        let before = timer.state();

        assert!(!timer.reset());
        assert_eq!(before, timer.state());

        scheduler.advance(TICK);
        assert_eq!(Duration::from_millis(350), timer.elapsed());
    }

    #[test]
    fn reset_after_stop_rearms_from_zero() {
        let scheduler = ManualScheduler::new();
        let timer = running(&scheduler, ElapsedTimerOptions::default());

        scheduler.advance(Duration::from_millis(500));
        assert_eq!("0.50s", timer.display());

        timer.stop_if(true);
        scheduler.advance(Duration::from_millis(500));
        assert_eq!("0.50s", timer.display());

        assert!(timer.reset());
        assert_eq!(TimerPhase::Running, timer.phase());
        assert_eq!("0.00s", timer.display());

        scheduler.advance(Duration::from_millis(150));
        assert_eq!("0.15s", timer.display());
    }

    #[test]
    fn disabled_timer_waits_for_enable() {
        let scheduler = ManualScheduler::new();
        let timer = running(
            &scheduler,
            ElapsedTimerOptions {
                enabled: false,
                ..Default::default()
            },
        );

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(TimerPhase::Idle, timer.phase());
        assert_eq!("0.00s", timer.display());
        assert_eq!(0, scheduler.pending_timers());

        // Stopping a timer that never ran changes nothing.
        timer.stop();
        assert_eq!(TimerPhase::Idle, timer.phase());

        timer.set_enabled(true);
        scheduler.advance(Duration::from_millis(100));
        assert_eq!(Duration::from_millis(100), timer.elapsed());
    }

    #[test]
    fn disabling_pauses_without_stopping() {
        let scheduler = ManualScheduler::new();
        let timer = running(&scheduler, ElapsedTimerOptions::default());

        scheduler.advance(Duration::from_millis(200));
        timer.set_enabled(false);
        assert_eq!(TimerPhase::Idle, timer.phase());

        scheduler.advance(Duration::from_millis(200));
        assert_eq!(Duration::from_millis(200), timer.elapsed());

        // Enabling a stopped timer requires a reset.
        timer.set_enabled(true);
        timer.stop();
        timer.set_enabled(true);
        assert_eq!(TimerPhase::Stopped, timer.phase());
    }

    #[test]
    fn dropping_last_handle_cancels_polling() {
        let scheduler = ManualScheduler::new();
        let timer = running(
            &scheduler,
            ElapsedTimerOptions {
                stop_budget: Some(Duration::from_secs(1)),
                ..Default::default()
            },
        );
        assert_eq!(2, scheduler.pending_timers());

        drop(timer);
        assert_eq!(0, scheduler.pending_timers());
        scheduler.advance(Duration::from_secs(2));
    }

    #[test]
    fn listener_sees_every_update() {
        let scheduler = ManualScheduler::new();
        let timer = running(
            &scheduler,
            ElapsedTimerOptions {
                enabled: false,
                ..Default::default()
            },
        );

        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            timer.on_update(move |state| seen.borrow_mut().push((state.phase(), state.elapsed)));
        }

        timer.set_enabled(true);
        scheduler.advance(Duration::from_millis(100));
        timer.stop();

        assert_eq!(
            vec![
                (TimerPhase::Running, Duration::ZERO),
                (TimerPhase::Running, Duration::from_millis(50)),
                (TimerPhase::Running, Duration::from_millis(100)),
                (TimerPhase::Stopped, Duration::from_millis(100)),
            ],
            *seen.borrow()
        );
    }

    #[test]
    fn whole_second_display_rounds() {
        assert_eq!("0s", format_elapsed(Duration::from_millis(499), false));
        assert_eq!("1s", format_elapsed(Duration::from_millis(500), false));
        assert_eq!("0.00s", format_elapsed(Duration::ZERO, true));
        assert_eq!("12.35s", format_elapsed(Duration::from_millis(12_346), true));
    }
}
