use std::time::Duration;

use leptos::*;

use crate::{
    format_elapsed, DomScheduler, ElapsedTimer, ElapsedTimerOptions, Scheduler, TimerPhase,
    DEFAULT_POLL_INTERVAL,
};

/// Options for [`use_elapsed_time`].
#[derive(Clone)]
pub struct UseElapsedTimeOptions {
    /// Stops the timer when it turns `true`.
    pub clear_on: MaybeSignal<bool>,
    /// The timer only runs while this is `true`. Defaults to `true`.
    pub enabled: MaybeSignal<bool>,
    /// Stop after this much time and show exactly this value.
    pub stop_budget: Option<Duration>,
    /// Show hundredths of a second. Defaults to `true`.
    pub show_ms: bool,
}

impl Default for UseElapsedTimeOptions {
    fn default() -> Self {
        Self {
            clear_on: MaybeSignal::Static(false),
            enabled: MaybeSignal::Static(true),
            stop_budget: None,
            show_ms: true,
        }
    }
}

impl UseElapsedTimeOptions {
    /// Stop once `clear_on` is `true`, e.g. a query's `is_success`.
    pub fn clear_on(clear_on: impl Into<MaybeSignal<bool>>) -> Self {
        Self {
            clear_on: clear_on.into(),
            ..Default::default()
        }
    }

    /// Only run while `enabled` is `true`.
    pub fn enabled(mut self, enabled: impl Into<MaybeSignal<bool>>) -> Self {
        self.enabled = enabled.into();
        self
    }

    /// Stop after `budget`.
    pub fn stop_budget(mut self, budget: Duration) -> Self {
        self.stop_budget = Some(budget);
        self
    }

    /// Show or hide hundredths of a second.
    pub fn show_ms(mut self, show_ms: bool) -> Self {
        self.show_ms = show_ms;
        self
    }
}

/// Reactive view of an elapsed-time timer.
#[derive(Clone)]
pub struct ElapsedTimeResult<R>
where
    R: Fn() + Clone,
{
    /// Elapsed time ready for display, e.g. `"1.05s"`.
    pub elapsed_time: Signal<String>,
    /// Raw elapsed time.
    pub elapsed: Signal<Duration>,
    /// Lifecycle phase of the timer.
    pub phase: Signal<TimerPhase>,
    /// Re-arm the timer from zero. Ignored while it is running.
    pub reset: R,
}

/// Displays how long something has been going on, e.g. how long a query has
/// been in flight.
///
/// The timer starts once `enabled` is true, stops when `clear_on` turns true
/// or the stop budget runs out, and is torn down with the reactive scope.
/// During SSR effects don't run, so the server renders the idle `"0.00s"`.
///
/// Example
/// ```
/// use leptos::*;
/// use leptos_query_gallery::*;
///
/// #[component]
/// fn RequestTimer(is_success: Signal<bool>) -> impl IntoView {
///     let ElapsedTimeResult { elapsed_time, .. } =
///         use_elapsed_time(UseElapsedTimeOptions::clear_on(is_success));
///
///     view! { <p>{move || elapsed_time.get()}</p> }
/// }
/// ```
pub fn use_elapsed_time(options: UseElapsedTimeOptions) -> ElapsedTimeResult<impl Fn() + Clone> {
    use_elapsed_time_with_scheduler(DomScheduler, options)
}

/// [`use_elapsed_time`] driven by a custom [`Scheduler`].
pub fn use_elapsed_time_with_scheduler<S: Scheduler>(
    scheduler: S,
    options: UseElapsedTimeOptions,
) -> ElapsedTimeResult<impl Fn() + Clone> {
    let UseElapsedTimeOptions {
        clear_on,
        enabled,
        stop_budget,
        show_ms,
    } = options;

    let elapsed = RwSignal::new(Duration::ZERO);
    let phase = RwSignal::new(TimerPhase::Idle);

    // Activation happens in the effects below, so nothing is scheduled on the server.
    let timer = ElapsedTimer::start(
        scheduler,
        ElapsedTimerOptions {
            enabled: false,
            stop_budget,
            show_sub_second_precision: show_ms,
            poll_interval: DEFAULT_POLL_INTERVAL,
        },
    );
    timer.on_update(move |state| {
        elapsed.set(state.elapsed);
        phase.set(state.phase());
    });

    create_effect({
        let timer = timer.clone();
        move |_| timer.set_enabled(enabled.get())
    });

    create_effect({
        let timer = timer.clone();
        move |_| timer.stop_if(clear_on.get())
    });

    on_cleanup({
        let timer = timer.clone();
        move || timer.dispose()
    });

    ElapsedTimeResult {
        elapsed_time: Signal::derive(move || format_elapsed(elapsed.get(), show_ms)),
        elapsed: elapsed.into(),
        phase: phase.into(),
        reset: move || {
            timer.reset();
        },
    }
}
