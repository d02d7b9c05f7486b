//! crates/logging/src/trace.rs
//! Location-stamped trace lines, stack dumps and location helpers.

use std::fmt;

use callsite::CallSite;
use logging_sink::Stream;
use palette::{Palette, Severity};

use crate::args::Text;
use crate::condition::Fallible;
use crate::emitters::{message, warning};
use crate::format;
use crate::state;

/// Frames printed by [`stack_trace`].
pub const STACK_TRACE_DEPTH: usize = 10;

/// Payload of a trace line.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TraceArgs {
    /// Location only.
    #[default]
    Empty,
    /// Cyan text.
    Text(Text),
    /// Red error text.
    Error(String),
    /// A checked condition that held no error, printed as green `nil`.
    Nil,
}

impl TraceArgs {
    /// Builds an error payload from any displayable error.
    pub fn error(error: impl fmt::Display) -> Self {
        Self::Error(error.to_string())
    }

    /// `Nil` when `condition` holds no error, otherwise its error text.
    pub fn fallible<F: Fallible + ?Sized>(condition: &F) -> Self {
        condition.failure().map_or(Self::Nil, Self::error)
    }

    fn render(&self, palette: &Palette) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => palette.paint(Severity::Message, &text.render()),
            Self::Error(error) => palette.paint(Severity::Error, error),
            Self::Nil => palette.paint(Severity::Info, "nil"),
        }
    }
}

impl From<()> for TraceArgs {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl From<&str> for TraceArgs {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for TraceArgs {
    fn from(text: String) -> Self {
        Self::Text(text.into())
    }
}

impl From<Text> for TraceArgs {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

pub(crate) fn trace_line(palette: &Palette, label: &str, site: Option<&CallSite>, args: &TraceArgs) -> String {
    let mut line = match site {
        Some(_) => format!("{label} {} ", format::at(site)),
        None => format!("{label} "),
    };
    line.push_str(&args.render(palette));
    line.push('\n');
    line
}

/// Emits a trace line stamped with the frame `skip` levels above the caller.
#[inline(never)]
pub(crate) fn trace_at(label: &str, args: &TraceArgs, skip: usize) {
    let site = callsite::locate(skip + 1);
    let line = trace_line(&state::palette(), label, site.as_ref(), args);
    state::emit(Stream::Primary, &line);
}

/// Emits `TRC @ <line> in <file>` followed by the payload.
///
/// ```
/// use logging::{trc, TraceArgs};
///
/// trc(());
/// trc("entering parser");
/// trc(TraceArgs::fallible(&"7".parse::<u8>()));
/// ```
#[inline(never)]
pub fn trc(args: impl Into<TraceArgs>) {
    trace_at("TRC", &args.into(), 1);
    callsite::hold_frame(());
}

/// Emits `WAS @ <line> in <file>` for the caller's caller.
#[inline(never)]
pub fn trc_from(args: impl Into<TraceArgs>) {
    trace_at("WAS", &args.into(), 2);
    callsite::hold_frame(());
}

/// As [`trc`], only when `condition` is true.
#[inline(never)]
pub fn trc_if(condition: bool, args: impl Into<TraceArgs>) {
    if condition {
        trace_at("TRC", &args.into(), 1);
        callsite::hold_frame(());
    }
}

/// Prints the caller's stack, innermost first.
///
/// Emits `Depth: N` as a message, then one warning line per frame,
/// stopping at the first frame without line information.
#[inline(never)]
pub fn stack_trace() {
    let frames = callsite::frames(1, STACK_TRACE_DEPTH);
    message(format_args!("Depth: {}", frames.len()));
    for frame in &frames {
        let Some(line) = frame.line() else {
            break;
        };
        let dir = frame
            .file()
            .and_then(|file| file.parent())
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        warning(format_args!(
            "  Func: {} - {line}   {dir}",
            frame.function().unwrap_or("?")
        ));
    }
}

fn short_name(site: Option<CallSite>) -> String {
    site.and_then(|site| site.short_function().map(str::to_owned))
        .unwrap_or_default()
}

/// Short name of the calling function, or empty when unknown.
#[inline(never)]
#[must_use]
pub fn i_am() -> String {
    short_name(callsite::locate(1))
}

/// Short name of the caller's caller, or empty when unknown.
#[inline(never)]
#[must_use]
pub fn i_was() -> String {
    short_name(callsite::locate(2))
}

/// `"@ <line> in <file>"` for the caller.
#[inline(never)]
#[must_use]
pub fn im_at() -> String {
    format::at(callsite::locate(1).as_ref())
}

/// `"@ <line> in <file>"` for the caller's caller.
#[inline(never)]
#[must_use]
pub fn was_at() -> String {
    format::at(callsite::locate(2).as_ref())
}

/// File and line of the caller.
#[inline(never)]
#[must_use]
pub fn err_at() -> Option<(String, u32)> {
    callsite::locate(1).map(|site| (site.file().to_owned(), site.line()))
}

/// File and line of the caller's caller.
#[inline(never)]
#[must_use]
pub fn err_was_at() -> Option<(String, u32)> {
    callsite::locate(2).map(|site| (site.file().to_owned(), site.line()))
}
