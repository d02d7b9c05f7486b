#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is the diagnostics layer of diagkit: colored severity emitters,
//! assertion-style checks that report, panic or exit, caller-owned gates and
//! call-site tracing. Every line it produces is rendered with the active
//! [`Palette`] and handed to the active [`Sink`] together with its
//! [`Stream`].
//!
//! # Design
//!
//! - **Emitters** ([`info`], [`error`], ... and the banners) write one colored
//!   line. Failure severities go to the error stream.
//! - **Checks** ([`chk_tru`], [`chk_err`] and their `_p`/`_x` variants)
//!   evaluate a condition and return `true` when it failed. Report-only checks
//!   stamp the caller's file and line; `_p` variants run the closer and panic
//!   with a [`CheckFailure`]; `_x` variants run the closer, report and
//!   terminate with [`EXIT_STATUS`].
//! - **Gates** ([`FlagGate`], [`LevelGate`], [`MaskGate`]) filter emissions;
//!   a flag gate can also count down to process termination.
//! - **Traces** ([`trc`], [`trc_from`], [`stack_trace`]) print locations.
//! - **State** (palette, sink, exit hook, level, mask) is process-wide and
//!   swapped atomically; [`init`] applies a [`DiagConfig`].
//!
//! Check arguments are a [`CheckArgs`] value: optional text (literal or a
//! printf-style [`Text::Template`]), an optional error and an optional
//! [`Closer`]. The `chk_*!` macros build it from `format!` arguments.
//!
//! # Invariants
//!
//! - A check whose condition holds emits nothing and never runs its closer.
//! - The closer of a terminating check runs exactly once, before the panic
//!   payload is raised or any output is written.
//! - Report-only checks never run the closer.
//! - Call sites survive optimized builds: every forwarding call in the chain
//!   is kept out of tail position with [`hold_frame`], so no wrapper frame is
//!   folded into a jump.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{CaptureSink, CheckArgs, Stream};
//!
//! let capture = CaptureSink::new();
//! let previous = logging::set_sink(Arc::new(capture.clone()));
//! logging::no_color();
//!
//! let config: Result<u16, std::num::ParseIntError> = "80x".parse();
//! if logging::chk_err(&config, CheckArgs::text("bad port")) {
//!     logging::note("falling back to 8080");
//! }
//! logging::set_sink(previous);
//!
//! let errors = capture.text(Stream::Error);
//! assert!(errors.starts_with("ERR @ "));
//! assert!(errors.ends_with("  bad port\n"));
//! assert_eq!(capture.text(Stream::Primary), "falling back to 8080\n");
//! ```

mod args;
mod check;
mod condition;
mod config;
mod emitters;
mod error;
mod fatal;
mod format;
mod gate;
mod macros;
pub mod printf;
mod state;
#[cfg(test)]
mod test_support;
mod trace;
mod tracing_macros;

pub use ::palette::{Banner, Palette, Severity};
pub use callsite::hold_frame;
pub use args::{CheckArgs, Closer, Text};
pub use check::{
    chk_err, chk_err_ignoring, chk_err_list, chk_err_p, chk_err_x, chk_tru, chk_tru_p, chk_tru_x,
    exp_err,
};
pub use condition::Fallible;
pub use config::{COLOR_ENV, ColorChoice, DiagConfig, LEVEL_ENV, MASK_ENV, NO_COLOR_ENV};
pub use emitters::{
    banner, caution, caution_banner, danger, echo, emit, error, error_banner, failed,
    fault_banner, info, lvl_msg, mask_msg, message, note, status, stream_for, warning,
    warning_banner,
};
pub use error::{CheckFailure, ConfigError, MissingValue};
pub use fatal::{
    MISSING_VALUE, fatal, fatal_if, fatal_if_err, must_have, must_have_p, panic, panic_if,
    panic_if_err,
};
pub use format::{DEFAULT_MESSAGE, body, error_body, format, format_error};
pub use gate::{FlagGate, LevelGate, MaskGate};
pub use logging_sink::{CaptureSink, FnSink, Record, Sink, StdSink, Stream, WriterSink};
#[cfg(feature = "tracing")]
pub use logging_sink::TracingSink;
pub use printf::{Value, sprintf};
pub use state::{
    EXIT_STATUS, ExitHook, color, init, is_colored, level, mask, no_color, palette,
    reset_exit_hook, reset_sink, set_color, set_exit_hook, set_level, set_mask, set_sink,
};
pub use trace::{
    STACK_TRACE_DEPTH, TraceArgs, err_at, err_was_at, i_am, i_was, im_at, stack_trace, trc,
    trc_from, trc_if, was_at,
};
