// Syslog backend for diagnostics emitted by long-running services.
//
// Uses libc `openlog`/`syslog`/`closelog` directly. Text is sent through a
// fixed "%s" format so `%` in a diagnostic is never interpreted by syslog(3).

use std::ffi::{CStr, CString};
use std::fmt;
use std::sync::OnceLock;

use crate::sink::{Sink, strip_ansi};
use crate::stream::Stream;

/// Syslog facility codes matching the POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// User-level messages (LOG_USER).
    #[default]
    User = libc::LOG_USER,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Parses a case-insensitive facility name.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("kern"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    /// Returns the lowercase facility name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ident used when no tag is configured or the tag contains a NUL byte.
pub const DEFAULT_SYSLOG_TAG: &str = "diagkit";

/// Facility and ident passed to openlog(3).
///
/// ```
/// use logging_sink::syslog::{SyslogConfig, SyslogFacility};
///
/// let config = SyslogConfig::new(SyslogFacility::Local5, "my-service");
/// assert_eq!(config.facility(), SyslogFacility::Local5);
/// assert_eq!(config.tag(), "my-service");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    tag: String,
}

impl SyslogConfig {
    /// Creates a configuration with the given facility and tag.
    pub fn new(facility: SyslogFacility, tag: impl Into<String>) -> Self {
        Self {
            facility,
            tag: tag.into(),
        }
    }

    /// Returns the configured facility.
    #[must_use]
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured ident.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Opens the syslog connection and returns a sink bound to it.
    ///
    /// The first call fixes the ident for the life of the process, because
    /// syslog(3) retains the pointer. Later calls reuse that ident whatever
    /// their own [`tag`](Self::tag); [`SyslogSink::ident`] reports the one in
    /// effect. An empty tag, or one containing a NUL byte, selects `diagkit`.
    #[must_use]
    pub fn open(&self) -> SyslogSink {
        static IDENT: OnceLock<CString> = OnceLock::new();
        let ident = IDENT.get_or_init(|| {
            CString::new(self.tag.as_str())
                .ok()
                .filter(|tag| !tag.as_bytes().is_empty())
                .unwrap_or_else(|| c"diagkit".to_owned())
        });

        // SAFETY: the ident pointer lives in a static for the whole process.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, self.facility as libc::c_int);
        }

        SyslogSink {
            ident: ident.as_c_str(),
        }
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_TAG)
    }
}

/// Syslog severities used for the two emission streams.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
}

impl From<Stream> for SyslogPriority {
    fn from(stream: Stream) -> Self {
        match stream {
            Stream::Error => Self::Error,
            Stream::Primary => Self::Info,
        }
    }
}

/// Sends one line to syslog(3) at `priority`.
///
/// Messages containing an interior NUL byte are dropped.
pub fn syslog_message(priority: SyslogPriority, message: &str) {
    let Ok(message) = CString::new(message) else {
        return;
    };

    // SAFETY: both pointers are valid NUL-terminated strings for the call.
    unsafe {
        libc::syslog(priority as libc::c_int, c"%s".as_ptr(), message.as_ptr());
    }
}

/// Sink that forwards emissions to syslog(3); closes the connection on drop.
///
/// ANSI escapes are stripped and multi-line emissions are split into one
/// syslog entry per non-empty line.
///
/// ```no_run
/// use logging_sink::Sink;
/// use logging_sink::Stream;
/// use logging_sink::syslog::SyslogConfig;
///
/// let sink = SyslogConfig::default().open();
/// sink.emit(Stream::Error, "CHK @ 3 in app/main.rs  Check failed\n");
/// ```
#[derive(Debug)]
pub struct SyslogSink {
    ident: &'static CStr,
}

impl SyslogSink {
    /// Ident that syslog(3) stamps on every entry of this process.
    #[must_use]
    pub fn ident(&self) -> &str {
        self.ident.to_str().unwrap_or_default()
    }
}

impl Sink for SyslogSink {
    fn emit(&self, stream: Stream, text: &str) {
        let priority = SyslogPriority::from(stream);
        let plain = strip_ansi(text);
        for line in plain.lines().filter(|line| !line.trim().is_empty()) {
            syslog_message(priority, line);
        }
    }
}

impl Drop for SyslogSink {
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions.
        unsafe {
            libc::closelog();
        }
    }
}
