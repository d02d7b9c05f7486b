//! crates/logging/src/tracing_macros.rs
//! Internal events describing diagnostics state changes.
//!
//! With the `tracing` feature these expand to `tracing::debug!`/`warn!` under
//! the `diag::state` and `diag::gate` targets; without it they expand to
//! nothing and their arguments are not evaluated.

/// Record a process-wide state change (palette, sink, exit hook, level, mask).
macro_rules! trace_state {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: "diag::state", $($arg)*);
    };
}

/// Record a gate event such as countdown expiry.
macro_rules! trace_gate {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(target: "diag::gate", $($arg)*);
    };
}

pub(crate) use {trace_gate, trace_state};
