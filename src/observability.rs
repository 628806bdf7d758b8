//! Logging for the walker.
//!
//! Events go through `tracing` with target `query_walker` and an `event`
//! field naming what happened. The library never installs a subscriber;
//! embedding applications decide where events go.

/// Target for all walker log events.
pub(crate) const WALKER_TARGET: &str = "query_walker";

/// Debug-level event.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::WALKER_TARGET, $($field)*)
    };
}

/// Trace-level event, for per-node noise.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::WALKER_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
