//! crates/palette/src/severity.rs
//! Severity tags and banner labels.

use std::fmt;
use std::str::FromStr;

/// Category of an emitted message, controlling its color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Plain text, never colored.
    Echo,
    /// Blue text.
    Note,
    /// Green text.
    Info,
    /// Cyan text.
    Message,
    /// Gray text.
    Status,
    /// Orange text.
    Warning,
    /// Bright yellow text.
    Caution,
    /// Magenta text. Routed to the error stream.
    Failed,
    /// Red text. Routed to the error stream.
    Error,
    /// Bold white on red. Routed to the error stream.
    Danger,
}

impl Severity {
    /// Every severity in table order.
    pub const ALL: [Self; 10] = [
        Self::Echo,
        Self::Note,
        Self::Info,
        Self::Message,
        Self::Status,
        Self::Warning,
        Self::Caution,
        Self::Failed,
        Self::Error,
        Self::Danger,
    ];

    /// Returns the lowercase name of the severity.
    ///
    /// # Examples
    ///
    /// ```
    /// use palette::Severity;
    ///
    /// assert_eq!(Severity::Caution.as_str(), "caution");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Echo => "echo",
            Self::Note => "note",
            Self::Info => "info",
            Self::Message => "message",
            Self::Status => "status",
            Self::Warning => "warning",
            Self::Caution => "caution",
            Self::Failed => "failed",
            Self::Error => "error",
            Self::Danger => "danger",
        }
    }

    /// Reports whether the severity belongs to the failure class.
    ///
    /// Failure-class text is written to the error stream; everything else goes
    /// to the primary stream.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Error | Self::Danger)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Severity`] from a string fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unrecognised severity '{input}'")]
pub struct ParseSeverityError {
    input: String,
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(input))
            .ok_or_else(|| ParseSeverityError {
                input: input.to_owned(),
            })
    }
}

/// Block label printed in front of free text by the banner emitters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Banner {
    /// Black on orange ` WARNING `.
    Warning,
    /// Black on bright yellow ` CAUTION `.
    Caution,
    /// White on red `  ERROR  `.
    Error,
    /// Black on bright magenta `  FAULT  `.
    Fault,
}

impl Banner {
    /// Returns the fixed-width label, padding included.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => " WARNING ",
            Self::Caution => " CAUTION ",
            Self::Error => "  ERROR  ",
            Self::Fault => "  FAULT  ",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}
