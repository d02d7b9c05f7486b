//! crates/logging/src/state.rs
//! Process-wide diagnostics state: palette, sink, exit hook, level and mask.
//!
//! Everything lives in one `RwLock`-guarded cell. Swaps replace a whole value
//! under the write lock, so an emitter observes either the old palette or the
//! new one, never a mixture. Emission clones the sink handle and releases the
//! lock before writing, which keeps sinks free to call back into this module.

use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use logging_sink::{Sink, StdSink, Stream};
use palette::Palette;

use crate::config::DiagConfig;
use crate::tracing_macros::trace_state;

/// Status passed to the exit hook by every terminating path.
pub const EXIT_STATUS: i32 = 255;

/// Process termination primitive.
pub type ExitHook = fn(i32) -> !;

struct State {
    palette: Palette,
    sink: Arc<dyn Sink>,
    exit_hook: ExitHook,
    level: i32,
    mask: u32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            sink: Arc::new(StdSink),
            exit_hook: std::process::exit,
            level: 0,
            mask: 0,
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("colored", &self.palette.is_colored())
            .field("level", &self.level)
            .field("mask", &format_args!("{:#x}", self.mask))
            .finish_non_exhaustive()
    }
}

static STATE: LazyLock<RwLock<State>> = LazyLock::new(|| RwLock::new(State::default()));

fn read() -> RwLockReadGuard<'static, State> {
    STATE.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, State> {
    STATE.write().unwrap_or_else(PoisonError::into_inner)
}

/// Installs the ANSI palette.
pub fn color() {
    set_color(true);
}

/// Installs the plain palette; every color code becomes the empty string.
pub fn no_color() {
    set_color(false);
}

/// Installs the ANSI palette when `enabled`, the plain one otherwise.
pub fn set_color(enabled: bool) {
    write().palette = Palette::for_color(enabled);
    trace_state!(enabled, "palette swapped");
}

/// Returns a copy of the active palette.
#[must_use]
pub fn palette() -> Palette {
    read().palette
}

/// Reports whether the active palette carries escape sequences.
#[must_use]
pub fn is_colored() -> bool {
    read().palette.is_colored()
}

/// Replaces the emission sink, returning the previous one.
///
/// ```
/// use std::sync::Arc;
/// use logging::{set_sink, CaptureSink, Stream};
///
/// let capture = CaptureSink::new();
/// let previous = set_sink(Arc::new(capture.clone()));
/// logging::echo("routed");
/// set_sink(previous);
///
/// assert_eq!(capture.text(Stream::Primary), "routed\n");
/// ```
pub fn set_sink(sink: Arc<dyn Sink>) -> Arc<dyn Sink> {
    let previous = std::mem::replace(&mut write().sink, sink);
    trace_state!("sink replaced");
    previous
}

/// Restores the stdout/stderr sink.
pub fn reset_sink() {
    set_sink(Arc::new(StdSink));
}

/// Replaces the process-exit primitive, returning the previous one.
pub fn set_exit_hook(hook: ExitHook) -> ExitHook {
    let previous = std::mem::replace(&mut write().exit_hook, hook);
    trace_state!("exit hook replaced");
    previous
}

/// Restores `std::process::exit` as the exit primitive.
pub fn reset_exit_hook() {
    set_exit_hook(std::process::exit);
}

/// Sets the global level consulted by [`lvl_msg`](crate::lvl_msg).
pub fn set_level(level: i32) {
    write().level = level;
    trace_state!(level, "global level set");
}

/// Returns the global level.
#[must_use]
pub fn level() -> i32 {
    read().level
}

/// Sets the global mask consulted by [`mask_msg`](crate::mask_msg).
pub fn set_mask(mask: u32) {
    write().mask = mask;
    trace_state!(mask, "global mask set");
}

/// Returns the global mask.
#[must_use]
pub fn mask() -> u32 {
    read().mask
}

/// Applies a configuration: palette, global level and global mask.
///
/// ```
/// use logging::{ColorChoice, DiagConfig};
///
/// logging::init(DiagConfig {
///     color: ColorChoice::Never,
///     level: 2,
///     mask: 0x4,
/// });
/// assert!(!logging::is_colored());
/// assert_eq!(logging::level(), 2);
/// assert_eq!(logging::mask(), 0x4);
/// ```
pub fn init(config: DiagConfig) {
    let mut state = write();
    state.palette = Palette::for_color(config.color.enabled());
    state.level = config.level;
    state.mask = config.mask;
    drop(state);
    trace_state!(?config, "configuration applied");
}

/// Writes `text` to `stream` through the active sink.
pub(crate) fn emit(stream: Stream, text: &str) {
    let sink = Arc::clone(&read().sink);
    sink.emit(stream, text);
}

/// Flushes the sink and hands [`EXIT_STATUS`] to the exit hook.
pub(crate) fn terminate() -> ! {
    let (sink, hook) = {
        let state = read();
        (Arc::clone(&state.sink), state.exit_hook)
    };
    sink.flush();
    hook(EXIT_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use logging_sink::CaptureSink;
    use serial_test::serial;

    #[test]
    #[serial]
    fn color_toggle_restores_the_original_table() {
        color();
        let original = palette();
        no_color();
        assert_eq!(palette(), Palette::plain());
        color();
        assert_eq!(palette(), original);
        assert_eq!(palette(), Palette::ansi());
    }

    #[test]
    #[serial]
    fn set_sink_returns_previous_and_routes_emission() {
        let first = CaptureSink::new();
        let second = CaptureSink::new();
        let original = set_sink(Arc::new(first.clone()));
        emit(Stream::Error, "one");
        let replaced = set_sink(Arc::new(second.clone()));
        replaced.emit(Stream::Error, "two");
        emit(Stream::Primary, "three");
        set_sink(original);

        assert_eq!(first.text(Stream::Error), "onetwo");
        assert_eq!(second.text(Stream::Primary), "three");
    }

    #[test]
    #[serial]
    fn init_applies_every_field() {
        init(DiagConfig {
            color: ColorChoice::Always,
            level: 5,
            mask: 0xA,
        });
        assert!(is_colored());
        assert_eq!(level(), 5);
        assert_eq!(mask(), 0xA);

        init(DiagConfig {
            color: ColorChoice::Never,
            ..DiagConfig::default()
        });
        assert!(!is_colored());
        assert_eq!(level(), 0);
        assert_eq!(mask(), 0);
    }

    #[test]
    #[serial]
    fn level_and_mask_setters() {
        set_level(-1);
        assert_eq!(level(), -1);
        set_mask(u32::MAX);
        assert_eq!(mask(), u32::MAX);
        set_level(0);
        set_mask(0);
    }
}
