//! crates/palette/src/table.rs
//! ANSI and plain color tables.

use anstyle::{AnsiColor, Color, Style};

use crate::severity::{Banner, Severity};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

const fn on(foreground: AnsiColor, background: AnsiColor) -> Style {
    fg(foreground).bg_color(Some(Color::Ansi(background)))
}

const WHITE_ON_RED: Style = Style::new()
    .bold()
    .bg_color(Some(Color::Ansi(AnsiColor::Red)));

const ANSI_TAGS: [Style; 10] = [
    Style::new(),                  // Echo
    fg(AnsiColor::Blue),           // Note
    fg(AnsiColor::Green),          // Info
    fg(AnsiColor::Cyan),           // Message
    fg(AnsiColor::BrightBlack),    // Status: gray
    fg(AnsiColor::Yellow),         // Warning: orange
    fg(AnsiColor::BrightYellow),   // Caution
    fg(AnsiColor::Magenta),        // Failed
    fg(AnsiColor::Red),            // Error
    WHITE_ON_RED,                  // Danger
];

const ANSI_BANNERS: [Style; 4] = [
    on(AnsiColor::Black, AnsiColor::Yellow),               // Warning
    on(AnsiColor::Black, AnsiColor::BrightYellow).bold(),  // Caution
    WHITE_ON_RED,                                          // Error
    on(AnsiColor::Black, AnsiColor::BrightMagenta),        // Fault
];

/// Severity-to-style table.
///
/// A palette is either fully colored ([`Palette::ansi`]) or fully plain
/// ([`Palette::plain`]); there is no constructor for a mixed table. Styles
/// render through `anstyle`, and a plain style renders as nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    colored: bool,
    tags: [Style; 10],
    banners: [Style; 4],
}

impl Palette {
    /// Table carrying ANSI styles.
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            colored: true,
            tags: ANSI_TAGS,
            banners: ANSI_BANNERS,
        }
    }

    /// Table mapping every tag to the plain style.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            colored: false,
            tags: [Style::new(); 10],
            banners: [Style::new(); 4],
        }
    }

    /// Selects [`ansi`](Self::ansi) or [`plain`](Self::plain).
    #[must_use]
    pub const fn for_color(enabled: bool) -> Self {
        if enabled { Self::ansi() } else { Self::plain() }
    }

    /// Reports whether this table emits escape sequences.
    #[must_use]
    pub const fn is_colored(&self) -> bool {
        self.colored
    }

    /// Style of text at the given severity.
    #[must_use]
    pub const fn style(&self, severity: Severity) -> Style {
        self.tags[severity.index()]
    }

    /// Style of the given banner label.
    #[must_use]
    pub const fn banner_style(&self, banner: Banner) -> Style {
        self.banners[banner.index()]
    }

    /// Wraps `text` in the severity's style.
    ///
    /// Severities without a style (`Echo`) are returned untouched, with no
    /// trailing reset.
    #[must_use]
    pub fn paint(&self, severity: Severity, text: &str) -> String {
        let style = self.style(severity);
        format!("{}{text}{}", style.render(), style.render_reset())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_color(default_enabled())
    }
}

/// Reports whether color output is enabled by default on this platform.
///
/// Only Linux terminals are assumed to understand the escape sequences.
#[must_use]
pub const fn default_enabled() -> bool {
    cfg!(target_os = "linux")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_renders_nothing() {
        let plain = Palette::plain();
        for severity in Severity::ALL {
            let style = plain.style(severity);
            assert_eq!(style.render().to_string(), "");
            assert_eq!(style.render_reset().to_string(), "");
            assert_eq!(plain.paint(severity, "text"), "text");
        }
        for banner in [Banner::Warning, Banner::Caution, Banner::Error, Banner::Fault] {
            assert_eq!(plain.banner_style(banner), Style::new());
        }
        assert!(!plain.is_colored());
    }

    #[test]
    fn ansi_palette_colors_everything_but_echo() {
        let ansi = Palette::ansi();
        for severity in Severity::ALL {
            let open = ansi.style(severity).render().to_string();
            if severity == Severity::Echo {
                assert!(open.is_empty());
            } else {
                assert!(open.starts_with("\x1b["), "{severity}");
            }
        }
        assert!(ansi.is_colored());
    }

    #[test]
    fn ansi_palette_keeps_the_classic_codes() {
        let ansi = Palette::ansi();
        assert_eq!(ansi.paint(Severity::Note, "n"), "\x1b[34mn\x1b[0m");
        assert_eq!(ansi.paint(Severity::Status, "s"), "\x1b[90ms\x1b[0m");
        assert_eq!(ansi.paint(Severity::Caution, "c"), "\x1b[93mc\x1b[0m");
        assert_eq!(
            ansi.banner_style(Banner::Fault).render().to_string(),
            "\x1b[30m\x1b[105m"
        );
    }

    #[test]
    fn paint_leaves_echo_untouched() {
        assert_eq!(Palette::ansi().paint(Severity::Echo, "raw"), "raw");
    }

    #[test]
    fn paint_wraps_danger() {
        assert_eq!(
            Palette::ansi().paint(Severity::Danger, "boom"),
            "\x1b[1m\x1b[41mboom\x1b[0m"
        );
    }

    #[test]
    fn for_color_selects_table() {
        assert_eq!(Palette::for_color(true), Palette::ansi());
        assert_eq!(Palette::for_color(false), Palette::plain());
    }

    #[test]
    fn default_follows_platform() {
        assert_eq!(Palette::default().is_colored(), default_enabled());
    }
}
