//! crates/logging/src/format.rs
//! Message bodies and severity wrapping.

use std::fmt;

use callsite::CallSite;
use palette::{Palette, Severity};

use crate::args::CheckArgs;
use crate::state;

/// Body used when a check carries neither text nor an error.
pub const DEFAULT_MESSAGE: &str = "Check failed";

/// Renders the body of `args` without color or newline.
///
/// - neither text nor error: `"Check failed"`
/// - error only: the error text
/// - error and text: the error text immediately followed by the text
/// - text only: the text
#[must_use]
pub fn body(args: &CheckArgs) -> String {
    match (args.error_ref(), args.text_ref()) {
        (None, None) => DEFAULT_MESSAGE.to_owned(),
        (Some(error), None) => error.to_owned(),
        (Some(error), Some(text)) => {
            let mut body = error.to_owned();
            body.push_str(&text.render());
            body
        }
        (None, Some(text)) => text.render(),
    }
}

/// Renders the body of an error check; empty args fall back to `error`.
#[must_use]
pub fn error_body(error: &dyn fmt::Display, args: &CheckArgs) -> String {
    if args.is_empty() {
        error.to_string()
    } else {
        body(args)
    }
}

/// Renders `args` wrapped in the severity's color, plus a newline.
///
/// ```
/// use logging::{format, CheckArgs};
/// use palette::Severity;
///
/// logging::no_color();
/// assert_eq!(format(Severity::Error, &CheckArgs::new()), "Check failed\n");
/// ```
#[must_use]
pub fn format(severity: Severity, args: &CheckArgs) -> String {
    wrap(&state::palette(), severity, &body(args))
}

/// As [`format`], with `error`'s text as the fallback body.
#[must_use]
pub fn format_error(severity: Severity, error: &dyn fmt::Display, args: &CheckArgs) -> String {
    wrap(&state::palette(), severity, &error_body(error, args))
}

pub(crate) fn wrap(palette: &Palette, severity: Severity, body: &str) -> String {
    let mut line = palette.paint(severity, body);
    line.push('\n');
    line
}

/// Tag leading a call-site-stamped failure line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Tag {
    /// Boolean check.
    Chk,
    /// Error check.
    Err,
}

impl Tag {
    const fn label(self) -> &'static str {
        match self {
            Self::Chk => "CHK",
            Self::Err => "ERR",
        }
    }

    const fn severity(self) -> Severity {
        match self {
            Self::Chk => Severity::Failed,
            Self::Err => Severity::Error,
        }
    }
}

/// `"@ <line> in <file>"`, or empty when the site is unknown.
pub(crate) fn at(site: Option<&CallSite>) -> String {
    site.map(|site| format!("@ {} in {}", site.line(), site.file()))
        .unwrap_or_default()
}

/// `<color>CHK @ <line> in <file>  <reset><body>\n`
pub(crate) fn tagged(palette: &Palette, tag: Tag, site: Option<&CallSite>, body: &str) -> String {
    let location = match site {
        Some(_) => format!(" {}  ", at(site)),
        None => " ".to_owned(),
    };
    let style = palette.style(tag.severity());
    format!(
        "{}{}{location}{}{body}\n",
        style.render(),
        tag.label(),
        style.render_reset()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printf::Value;

    #[test]
    fn empty_args_use_default_message() {
        assert_eq!(body(&CheckArgs::new()), "Check failed");
    }

    #[test]
    fn template_is_substituted() {
        let args = CheckArgs::template("%s-%d", [Value::from("x"), Value::from(3)]);
        assert_eq!(body(&args), "x-3");
    }

    #[test]
    fn error_text_is_followed_by_text_without_separator() {
        let args = CheckArgs::error("open failed").with_text(": config.toml");
        assert_eq!(body(&args), "open failed: config.toml");
        assert_eq!(body(&CheckArgs::error("eof")), "eof");
    }

    #[test]
    fn error_body_falls_back_to_the_condition_error() {
        assert_eq!(error_body(&"broken pipe", &CheckArgs::new()), "broken pipe");
        assert_eq!(error_body(&"broken pipe", &CheckArgs::text("ctx")), "ctx");
    }

    #[test]
    fn closer_alone_counts_as_empty() {
        let args = CheckArgs::closer(|| {});
        assert_eq!(body(&args), "Check failed");
        assert_eq!(error_body(&"e", &args), "e");
    }

    #[test]
    fn wrap_applies_color_and_newline() {
        let ansi = Palette::ansi();
        assert_eq!(
            wrap(&ansi, Severity::Failed, "Check failed"),
            "\x1b[35mCheck failed\x1b[0m\n"
        );
        assert_eq!(wrap(&Palette::plain(), Severity::Failed, "x-3"), "x-3\n");
    }

    #[test]
    fn tagged_line_layout() {
        let site = CallSite::new("app/main.rs", 12, None);
        assert_eq!(
            tagged(&Palette::plain(), Tag::Chk, Some(&site), "boom"),
            "CHK @ 12 in app/main.rs  boom\n"
        );
        assert_eq!(
            tagged(&Palette::ansi(), Tag::Err, Some(&site), "eof"),
            "\x1b[31mERR @ 12 in app/main.rs  \x1b[0meof\n"
        );
        assert_eq!(tagged(&Palette::plain(), Tag::Err, None, "eof"), "ERR eof\n");
    }

    #[test]
    fn at_formats_location() {
        let site = CallSite::new("src/net.rs", 7, None);
        assert_eq!(at(Some(&site)), "@ 7 in src/net.rs");
        assert_eq!(at(None), "");
    }
}
