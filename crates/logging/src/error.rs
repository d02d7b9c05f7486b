//! crates/logging/src/error.rs
//! Error and panic payload types.

use std::panic;
use std::sync::Once;

use thiserror::Error;

static PANIC_REPORT: Once = Once::new();

/// Makes uncaught [`CheckFailure`] panics print their message.
///
/// The default hook only prints string payloads. The wrapper writes
/// `check failed: <message>` to standard error for a `CheckFailure`, then
/// hands every panic to the hook that was installed before it. Installed at
/// most once per process, by the first check that panics.
pub(crate) fn install_panic_report() {
    if std::thread::panicking() {
        return;
    }
    PANIC_REPORT.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if let Some(failure) = info.payload().downcast_ref::<CheckFailure>() {
                eprintln!("check failed: {}", failure.message());
            }
            previous(info);
        }));
    });
}

/// Payload carried by every panic raised from a failed check.
///
/// The payload holds only the rendered message, never a source location,
/// so handlers can match on one type regardless of which check fired.
///
/// ```
/// use logging::{CheckArgs, CheckFailure, chk_tru_p};
///
/// let caught = std::panic::catch_unwind(|| chk_tru_p(false, CheckArgs::text("bad state")))
///     .unwrap_err();
/// let failure = caught.downcast_ref::<CheckFailure>().unwrap();
/// assert_eq!(failure.message(), "bad state");
/// ```
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{message}")]
pub struct CheckFailure {
    message: String,
}

impl CheckFailure {
    /// Wraps a rendered failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Returned by [`must_have`](crate::must_have) when a required value is absent.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{reason}")]
pub struct MissingValue {
    reason: String,
    position: usize,
}

impl MissingValue {
    pub(crate) fn new(reason: impl Into<String>, position: usize) -> Self {
        Self {
            reason: reason.into(),
            position,
        }
    }

    /// Caller-supplied reason, or `"Missing value"`.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Zero-based index of the first absent value.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// Invalid configuration token or environment value.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Token was not of the form `key=value`.
    #[error("malformed configuration token '{token}': expected key=value")]
    MalformedToken {
        /// The offending token.
        token: String,
    },
    /// Key is not one of `color`, `level` or `mask`.
    #[error("unknown configuration key '{key}'")]
    UnknownKey {
        /// The offending key.
        key: String,
    },
    /// Value could not be parsed for its key.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Key being assigned.
        key: &'static str,
        /// The offending value.
        value: String,
    },
}
