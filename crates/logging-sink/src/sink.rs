//! crates/logging-sink/src/sink.rs
//! The sink trait and its stream-backed implementations.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::stream::Stream;

/// Destination for fully rendered diagnostic text.
///
/// Implementors must be `Send + Sync` so one instance can be installed as the
/// process-wide sink and reached from any thread.
pub trait Sink: Send + Sync {
    /// Writes `text` to `stream`.
    fn emit(&self, stream: Stream, text: &str);

    /// Flushes any buffered output.
    fn flush(&self) {}
}

/// Writes the primary stream to stdout and the error stream to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdSink;

impl Sink for StdSink {
    fn emit(&self, stream: Stream, text: &str) {
        let _ = match stream {
            Stream::Primary => io::stdout().lock().write_all(text.as_bytes()),
            Stream::Error => io::stderr().lock().write_all(text.as_bytes()),
        };
    }

    fn flush(&self) {
        let _ = io::stdout().lock().flush();
        let _ = io::stderr().lock().flush();
    }
}

/// Writes both streams, in emission order, into one writer.
///
/// # Examples
///
/// ```
/// use logging_sink::{Sink, Stream, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.emit(Stream::Primary, "one\n");
/// sink.emit(Stream::Error, "two\n");
///
/// assert_eq!(sink.into_inner(), b"one\ntwo\n".to_vec());
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W> WriterSink<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn emit(&self, _stream: Stream, text: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.write_all(text.as_bytes());
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}

/// Adapts a closure into a [`Sink`].
///
/// This is the lightest way to redirect output into another logging
/// framework:
///
/// ```
/// use logging_sink::{FnSink, Sink, Stream};
///
/// let sink = FnSink::new(|stream, text: &str| {
///     assert_eq!(stream, Stream::Primary);
///     assert_eq!(text, "hello\n");
/// });
/// sink.emit(Stream::Primary, "hello\n");
/// ```
pub struct FnSink<F> {
    emit: F,
}

impl<F> FnSink<F>
where
    F: Fn(Stream, &str) + Send + Sync,
{
    /// Wraps `emit`.
    #[must_use]
    pub const fn new(emit: F) -> Self {
        Self { emit }
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

impl<F> Sink for FnSink<F>
where
    F: Fn(Stream, &str) + Send + Sync,
{
    fn emit(&self, stream: Stream, text: &str) {
        (self.emit)(stream, text);
    }
}

/// Removes ANSI CSI escape sequences from `text`.
///
/// Text without escapes is returned borrowed.
///
/// # Examples
///
/// ```
/// use logging_sink::strip_ansi;
///
/// assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
/// assert_eq!(strip_ansi("plain"), "plain");
/// ```
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }

    let mut stripped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameters and intermediates run until the final byte in @..~.
            for next in chars.by_ref() {
                if ('@'..='~').contains(&next) {
                    break;
                }
            }
        } else {
            stripped.push(ch);
        }
    }
    Cow::Owned(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn writer_sink_interleaves_streams_in_order() {
        let sink = WriterSink::new(Vec::new());
        sink.emit(Stream::Error, "a");
        sink.emit(Stream::Primary, "b");
        sink.emit(Stream::Error, "c");
        assert_eq!(sink.into_inner(), b"abc".to_vec());
    }

    #[test]
    fn fn_sink_forwards_every_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let sink = FnSink::new(move |_, _: &str| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        sink.emit(Stream::Primary, "x");
        sink.emit(Stream::Error, "y");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn strip_ansi_removes_compound_sequences() {
        assert_eq!(
            strip_ansi("\x1b[1;30;103m CAUTION \x1b[0m text"),
            " CAUTION  text"
        );
    }

    #[test]
    fn strip_ansi_keeps_lone_escape() {
        assert_eq!(strip_ansi("a\x1bb"), "a\x1bb");
    }

    #[test]
    fn std_sink_accepts_both_streams() {
        StdSink.emit(Stream::Primary, "");
        StdSink.emit(Stream::Error, "");
        StdSink.flush();
    }
}
