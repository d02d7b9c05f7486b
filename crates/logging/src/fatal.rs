//! crates/logging/src/fatal.rs
//! Unconditional and conditional panic/exit, plus required-value checks.

use std::fmt;

use logging_sink::Stream;
use palette::Severity;

use crate::args::CheckArgs;
use crate::check::{close, raise};
use crate::condition::Fallible;
use crate::error::{CheckFailure, MissingValue};
use crate::format;
use crate::state;

/// Reason used by [`must_have`] when none is given.
pub const MISSING_VALUE: &str = "Missing value";

/// Runs the closer, then panics with a [`CheckFailure`] carrying the body.
pub fn panic(args: impl Into<CheckArgs>) -> ! {
    raise(args.into(), None)
}

fn terminate_with(args: CheckArgs, error: Option<&dyn fmt::Display>) -> ! {
    let body = close(args, error);
    let line = format::wrap(&state::palette(), Severity::Danger, &body);
    state::emit(Stream::Error, &line);
    state::terminate()
}

/// Runs the closer, emits the body in danger color and terminates.
///
/// The line carries no call-site tag.
pub fn fatal(args: impl Into<CheckArgs>) -> ! {
    terminate_with(args.into(), None)
}

/// [`panic`] when `condition` is true.
pub fn panic_if(condition: bool, args: impl Into<CheckArgs>) {
    if condition {
        raise(args.into(), None);
    }
}

/// [`fatal`] when `condition` is true.
pub fn fatal_if(condition: bool, args: impl Into<CheckArgs>) {
    if condition {
        terminate_with(args.into(), None);
    }
}

/// [`panic`] when `condition` holds an error; the error is the fallback body.
pub fn panic_if_err<F: Fallible + ?Sized>(condition: &F, args: impl Into<CheckArgs>) {
    if let Some(error) = condition.failure() {
        raise(args.into(), Some(error as &dyn fmt::Display));
    }
}

/// [`fatal`] when `condition` holds an error; the error is the fallback body.
pub fn fatal_if_err<F: Fallible + ?Sized>(condition: &F, args: impl Into<CheckArgs>) {
    if let Some(error) = condition.failure() {
        terminate_with(args.into(), Some(error as &dyn fmt::Display));
    }
}

/// Fails when any entry of `present` is false.
///
/// The error names the first missing position and carries `reason`, or
/// [`MISSING_VALUE`] when none is given.
///
/// ```
/// use logging::must_have;
///
/// let host: Option<&str> = Some("localhost");
/// let port: Option<u16> = None;
/// let err = must_have([host.is_some(), port.is_some()], Some("port required")).unwrap_err();
/// assert_eq!(err.reason(), "port required");
/// assert_eq!(err.position(), 1);
/// assert!(must_have([true, true], None).is_ok());
/// ```
pub fn must_have(
    present: impl IntoIterator<Item = bool>,
    reason: Option<&str>,
) -> Result<(), MissingValue> {
    match present.into_iter().position(|present| !present) {
        Some(position) => Err(MissingValue::new(
            reason.unwrap_or(MISSING_VALUE),
            position,
        )),
        None => Ok(()),
    }
}

/// As [`must_have`], panicking with a [`CheckFailure`] carrying the reason.
pub fn must_have_p(present: impl IntoIterator<Item = bool>, reason: Option<&str>) {
    if let Err(missing) = must_have(present, reason) {
        crate::error::install_panic_report();
        std::panic::panic_any(CheckFailure::new(missing.reason()));
    }
}
