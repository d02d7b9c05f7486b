//! crates/logging-sink/src/tracing_sink.rs
//! Forwarding of emissions into the `tracing` ecosystem.
//!
//! Error-stream text becomes an `ERROR` event under target `diag::error`;
//! primary-stream text becomes an `INFO` event under target `diag::primary`.
//! ANSI escapes and the trailing newline are removed so subscribers receive
//! plain message text.

use crate::sink::{Sink, strip_ansi};
use crate::stream::Stream;

/// Target used for primary-stream events.
pub const PRIMARY_TARGET: &str = "diag::primary";
/// Target used for error-stream events.
pub const ERROR_TARGET: &str = "diag::error";

/// Sink that re-emits text as `tracing` events.
///
/// ```
/// use logging_sink::{Sink, Stream, TracingSink};
///
/// // Without a subscriber installed the events are simply discarded.
/// TracingSink.emit(Stream::Primary, "\x1b[32mready\x1b[0m\n");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, stream: Stream, text: &str) {
        let plain = strip_ansi(text);
        let message = plain.trim_end_matches('\n');
        if message.is_empty() {
            return;
        }
        match stream {
            Stream::Error => tracing::error!(target: ERROR_TARGET, "{message}"),
            Stream::Primary => tracing::info!(target: PRIMARY_TARGET, "{message}"),
        }
    }
}
