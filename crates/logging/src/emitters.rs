//! crates/logging/src/emitters.rs
//! Ungated severity emitters, banners and the global level/mask emitters.

use std::fmt;

use logging_sink::Stream;
use palette::{Banner, Severity};

use crate::format;
use crate::gate::{LevelGate, MaskGate};
use crate::state;

/// Stream a severity is routed to.
#[must_use]
pub const fn stream_for(severity: Severity) -> Stream {
    Stream::for_failure(severity.is_failure())
}

/// Emits `text` in the severity's color followed by a newline.
///
/// ```
/// use std::sync::Arc;
/// use logging::{emit, CaptureSink, Stream};
/// use palette::Severity;
///
/// let capture = CaptureSink::new();
/// let previous = logging::set_sink(Arc::new(capture.clone()));
/// logging::no_color();
/// emit(Severity::Error, format_args!("lost {} packets", 3));
/// logging::set_sink(previous);
///
/// assert_eq!(capture.text(Stream::Error), "lost 3 packets\n");
/// ```
pub fn emit(severity: Severity, text: impl fmt::Display) {
    let line = format::wrap(&state::palette(), severity, &text.to_string());
    state::emit(stream_for(severity), &line);
}

macro_rules! severity_fns {
    ($($name:ident => $severity:ident: $doc:literal),+ $(,)?) => {
        $(
            #[doc = $doc]
            pub fn $name(text: impl fmt::Display) {
                emit(Severity::$severity, text);
            }
        )+
    };
}

severity_fns! {
    echo => Echo: "Emits uncolored text.",
    note => Note: "Emits blue text.",
    info => Info: "Emits green text.",
    message => Message: "Emits cyan text.",
    status => Status: "Emits gray text.",
    warning => Warning: "Emits orange text.",
    caution => Caution: "Emits bright yellow text.",
    failed => Failed: "Emits magenta text to the error stream.",
    error => Error: "Emits red text to the error stream.",
    danger => Danger: "Emits white-on-red text to the error stream.",
}

/// Emits a colored block label, a reset, a space and `text`.
pub fn banner(banner: Banner, text: impl fmt::Display) {
    let style = state::palette().banner_style(banner);
    let line = format!(
        "{}{}{} {text}\n",
        style.render(),
        banner.label(),
        style.render_reset()
    );
    state::emit(Stream::Primary, &line);
}

/// `" WARNING "` block followed by `text`.
pub fn warning_banner(text: impl fmt::Display) {
    banner(Banner::Warning, text);
}

/// `" CAUTION "` block followed by `text`.
pub fn caution_banner(text: impl fmt::Display) {
    banner(Banner::Caution, text);
}

/// `"  ERROR  "` block followed by `text`.
pub fn error_banner(text: impl fmt::Display) {
    banner(Banner::Error, text);
}

/// `"  FAULT  "` block followed by `text`.
pub fn fault_banner(text: impl fmt::Display) {
    banner(Banner::Fault, text);
}

/// Emits `text` as a message when the global level clears `required`.
///
/// Uses the same rule as [`LevelGate`]: the global level must be positive
/// and at least `required`.
pub fn lvl_msg(required: i32, text: impl fmt::Display) {
    LevelGate::new(state::level()).message(required, text);
}

/// Emits `text` as a message when the global mask shares a bit with `bits`.
pub fn mask_msg(bits: u32, text: impl fmt::Display) {
    MaskGate::new(state::mask()).message(bits, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture;
    use serial_test::serial;

    #[test]
    #[serial]
    fn severities_route_to_their_streams() {
        let (sink, _restore) = capture();
        echo("e");
        note("n");
        info("i");
        message("m");
        status("s");
        warning("w");
        caution("c");
        failed("f");
        error("r");
        danger("d");
        assert_eq!(sink.text(Stream::Primary), "e\nn\ni\nm\ns\nw\nc\n");
        assert_eq!(sink.text(Stream::Error), "f\nr\nd\n");
    }

    #[test]
    #[serial]
    fn colored_output_wraps_each_line() {
        let (sink, _restore) = capture();
        state::color();
        info("ready");
        echo("plain");
        state::no_color();
        assert_eq!(
            sink.text(Stream::Primary),
            "\x1b[32mready\x1b[0m\nplain\n"
        );
    }

    #[test]
    #[serial]
    fn banners_render_label_reset_space_text() {
        let (sink, _restore) = capture();
        warning_banner("disk almost full");
        fault_banner("sensor offline");
        state::color();
        caution_banner("hot");
        state::no_color();
        let text = sink.text(Stream::Primary);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], " WARNING  disk almost full");
        assert_eq!(lines[1], "  FAULT   sensor offline");
        assert_eq!(lines[2], "\x1b[1m\x1b[30m\x1b[103m CAUTION \x1b[0m hot");
    }

    #[test]
    #[serial]
    fn global_level_and_mask_gate_messages() {
        let (sink, _restore) = capture();
        state::set_level(2);
        state::set_mask(0xA);
        lvl_msg(1, "lvl 1");
        lvl_msg(2, "lvl 2");
        lvl_msg(3, "lvl 3");
        mask_msg(0x1, "bit 0");
        mask_msg(0x2, "bit 1");
        state::set_level(0);
        state::set_mask(0);
        lvl_msg(0, "disabled");
        assert_eq!(sink.text(Stream::Primary), "lvl 1\nlvl 2\nbit 1\n");
    }
}
