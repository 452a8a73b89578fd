#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # About the Gallery
//!
//! Client-side utilities shared by the [Leptos Query](https://github.com/nicoburniske/leptos_query)
//! example gallery. The gallery pages illustrate caching, de-duplication,
//! pagination, optimistic updates and retries; all of that lives in the query
//! library. What lives here is the small amount of timing and scrolling logic
//! the pages need to make those behaviours visible:
//!
//! - [`ElapsedTimer`] - how long a request has been in flight, or how long
//!   until data goes stale.
//! - [`ScrollEdgeDetector`] - "load more" / "load previous" triggers for
//!   infinite queries.
//!
//! Both reach the outside world only through a [`Scheduler`] (timers, frames,
//! a local executor) and, for the detector, a [`ScrollContainer`]. The
//! [`ManualScheduler`] drives them deterministically in tests.
//!
//! ## Hooks
//! - [`use_elapsed_time`] - reactive elapsed-time string with a `reset` handle.
//! - [`use_on_scroll`] - binds a `NodeRef` to a scroll-edge detector.
//!
//! # Feature Flags
//! - `csr` Client-side rendering: real browser timers and scroll listeners.
//! - `hydrate` Hydration: same as `csr`, for apps rendered on the server first.
//! - `ssr` Server-side rendering: the hooks render their idle state.
//!
//! # A Simple Example
//!
//! ```
//! use leptos::*;
//! use leptos_query_gallery::*;
//!
//! #[component]
//! fn DedupedRequest(is_success: Signal<bool>, data: Signal<Option<String>>) -> impl IntoView {
//!     let ElapsedTimeResult { elapsed_time, .. } =
//!         use_elapsed_time(UseElapsedTimeOptions::clear_on(is_success));
//!
//!     view! {
//!         <p>{move || elapsed_time.get()}</p>
//!         <p>{move || data.get().unwrap_or_else(|| "Waiting response...".to_string())}</p>
//!     }
//! }
//! ```

#[cfg(any(feature = "hydrate", feature = "csr"))]
mod dom_container;
mod elapsed_timer;
mod instant;
/// Host scheduling abstraction and its implementations.
pub mod scheduler;
mod scroll_edge;
#[cfg(test)]
mod test_util;
mod use_elapsed_time;
mod use_on_scroll;

#[cfg(any(feature = "hydrate", feature = "csr"))]
pub use dom_container::*;
pub use elapsed_timer::*;
pub use instant::*;
pub use scheduler::*;
pub use scroll_edge::*;
pub use use_elapsed_time::*;
pub use use_on_scroll::*;
