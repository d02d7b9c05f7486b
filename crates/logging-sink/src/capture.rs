//! crates/logging-sink/src/capture.rs
//! In-memory sink for inspecting emissions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::sink::Sink;
use crate::stream::Stream;

/// One captured emission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// Stream the text was emitted to.
    pub stream: Stream,
    /// Rendered text, including colors and trailing newline.
    pub text: String,
}

/// Sink that stores every emission in order.
///
/// Clones share the same buffer, so one handle can be installed as the
/// active sink while another is kept for assertions.
///
/// # Examples
///
/// ```
/// use logging_sink::{CaptureSink, Sink, Stream};
///
/// let sink = CaptureSink::new();
/// let handle = sink.clone();
/// sink.emit(Stream::Primary, "ready\n");
///
/// assert_eq!(handle.text(Stream::Primary), "ready\n");
/// assert!(handle.text(Stream::Error).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CaptureSink {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of every record captured so far.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Removes and returns every record captured so far.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.lock())
    }

    /// Concatenates the text emitted to `stream`.
    #[must_use]
    pub fn text(&self, stream: Stream) -> String {
        self.lock()
            .iter()
            .filter(|record| record.stream == stream)
            .map(|record| record.text.as_str())
            .collect()
    }

    /// Concatenates the text of both streams in emission order.
    #[must_use]
    pub fn all_text(&self) -> String {
        self.lock().iter().map(|record| record.text.as_str()).collect()
    }

    /// Counts the emissions made to `stream`.
    #[must_use]
    pub fn count(&self, stream: Stream) -> usize {
        self.lock()
            .iter()
            .filter(|record| record.stream == stream)
            .count()
    }

    /// Reports whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards every captured record.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Sink for CaptureSink {
    fn emit(&self, stream: Stream, text: &str) {
        self.lock().push(Record {
            stream,
            text: text.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_keep_emission_order() {
        let sink = CaptureSink::new();
        sink.emit(Stream::Primary, "a");
        sink.emit(Stream::Error, "b");
        sink.emit(Stream::Primary, "c");

        let streams: Vec<_> = sink.records().iter().map(|r| r.stream).collect();
        assert_eq!(streams, [Stream::Primary, Stream::Error, Stream::Primary]);
        assert_eq!(sink.all_text(), "abc");
        assert_eq!(sink.text(Stream::Primary), "ac");
    }

    #[test]
    fn take_drains_the_buffer() {
        let sink = CaptureSink::new();
        sink.emit(Stream::Error, "x");
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn clones_share_storage() {
        let sink = CaptureSink::new();
        let other = sink.clone();
        other.emit(Stream::Error, "shared");
        assert_eq!(sink.count(Stream::Error), 1);
        sink.clear();
        assert!(other.is_empty());
    }
}
