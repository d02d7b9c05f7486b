//! crates/logging/src/test_support.rs
//! Shared helpers for unit tests that observe emissions.

use std::sync::Arc;

use logging_sink::{CaptureSink, Sink};

use crate::state;

/// Restores the previous sink and exit hook when dropped.
pub(crate) struct Restore {
    sink: Option<Arc<dyn Sink>>,
    exit_hook: Option<state::ExitHook>,
}

impl Drop for Restore {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            state::set_sink(sink);
        }
        if let Some(hook) = self.exit_hook.take() {
            state::set_exit_hook(hook);
        }
    }
}

/// Payload of the panic raised by [`panicking_exit`].
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct ExitRequested(pub(crate) i32);

/// Exit hook that unwinds instead of terminating the test process.
pub(crate) fn panicking_exit(code: i32) -> ! {
    std::panic::panic_any(ExitRequested(code))
}

/// Installs a plain palette and a fresh capture sink.
pub(crate) fn capture() -> (CaptureSink, Restore) {
    state::no_color();
    let sink = CaptureSink::new();
    let previous = state::set_sink(Arc::new(sink.clone()));
    (
        sink,
        Restore {
            sink: Some(previous),
            exit_hook: None,
        },
    )
}

/// As [`capture`], additionally replacing the exit hook with [`panicking_exit`].
pub(crate) fn capture_exits() -> (CaptureSink, Restore) {
    let (sink, mut restore) = capture();
    restore.exit_hook = Some(state::set_exit_hook(panicking_exit));
    (sink, restore)
}

/// Runs `f`, which must end in a terminating path, and returns the exit code.
pub(crate) fn expect_exit(f: impl FnOnce()) -> i32 {
    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f))
        .expect_err("terminating path must not return");
    payload
        .downcast_ref::<ExitRequested>()
        .map(|exit| exit.0)
        .expect("unwound through the exit hook")
}
