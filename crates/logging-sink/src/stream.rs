//! crates/logging-sink/src/stream.rs
//! Output stream classes.

use std::fmt;

/// Destination class of an emission.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Stream {
    /// Normal and informational text (stdout-like).
    #[default]
    Primary,
    /// Failure text (stderr-like).
    Error,
}

impl Stream {
    /// Selects the error stream for failures and the primary stream otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::Stream;
    ///
    /// assert_eq!(Stream::for_failure(true), Stream::Error);
    /// assert_eq!(Stream::for_failure(false), Stream::Primary);
    /// ```
    #[must_use]
    pub const fn for_failure(failure: bool) -> Self {
        if failure { Self::Error } else { Self::Primary }
    }

    /// Returns the lowercase stream name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Error => "error",
        }
    }

    /// Reports whether this is the error stream.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for Stream {
    /// `true` selects [`Stream::Error`], mirroring [`Stream::for_failure`].
    fn from(failure: bool) -> Self {
        Self::for_failure(failure)
    }
}
