#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` defines where finished diagnostic text goes. Every emission
//! names one of two [`Stream`]s: the primary stream for informational text and
//! the error stream for failures. A [`Sink`] receives the stream together
//! with the fully rendered text (colors and trailing newline included) and
//! writes it somewhere.
//!
//! # Design
//!
//! The diagnostics layer stores exactly one `Arc<dyn Sink>` and routes every
//! emission through it, so replacing that one value redirects the whole
//! library. The crate ships the implementations that cover the usual targets:
//!
//! - [`StdSink`] writes to the process stdout/stderr (the default).
//! - [`WriterSink`] writes both streams into a single [`std::io::Write`].
//! - [`CaptureSink`] records emissions in memory for inspection.
//! - [`FnSink`] adapts a plain closure.
//! - `TracingSink` (feature `tracing`) forwards to the `tracing` ecosystem.
//! - `syslog::SyslogSink` (unix) forwards to syslog(3).
//!
//! # Invariants
//!
//! - Sinks never reformat text beyond what their target requires; the
//!   structured sinks strip ANSI escapes and the trailing newline.
//! - Write failures are swallowed: a diagnostic that cannot be printed must
//!   not turn into a second failure at the call site.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{CaptureSink, Sink, Stream};
//!
//! let sink = CaptureSink::new();
//! sink.emit(Stream::Error, "CHK @ 12 in app/main.rs  Check failed\n");
//!
//! assert_eq!(sink.count(Stream::Error), 1);
//! assert_eq!(sink.count(Stream::Primary), 0);
//! ```

mod capture;
mod sink;
mod stream;
#[cfg(unix)]
#[allow(unsafe_code)]
/// Syslog backend for diagnostics emitted by long-running services.
pub mod syslog;
#[cfg(feature = "tracing")]
mod tracing_sink;

pub use capture::{CaptureSink, Record};
pub use sink::{FnSink, Sink, StdSink, WriterSink, strip_ansi};
pub use stream::Stream;
#[cfg(feature = "tracing")]
pub use tracing_sink::TracingSink;
