//! crates/logging/src/check.rs
//! The check/assert engine.
//!
//! Every check evaluates its condition first and returns `true` when the
//! condition failed, so a check composes inside an `if`. Three termination
//! policies share one rendering path:
//!
//! - report: emit a call-site-tagged line to the error stream and return;
//! - panic (`_p`): run the closer, then `panic_any(CheckFailure)`;
//! - exit (`_x`): run the closer, emit the tagged line, then call the exit
//!   hook with [`EXIT_STATUS`](crate::EXIT_STATUS).
//!
//! Call sites are found by walking the stack. Each function in the chain
//! between the caller and [`report`] is `#[inline(never)]`, forwards a skip
//! count one larger than it received and never forwards in tail position.

use std::fmt;

use logging_sink::Stream;

use crate::args::CheckArgs;
use crate::condition::Fallible;
use crate::error::CheckFailure;
use crate::format::{self, Tag};
use crate::state;

/// Emits a tagged failure line for the frame `skip` levels above the caller.
#[inline(never)]
pub(crate) fn report(tag: Tag, body: &str, skip: usize) {
    let site = callsite::locate(skip + 1);
    let line = format::tagged(&state::palette(), tag, site.as_ref(), body);
    state::emit(Stream::Error, &line);
}

fn render(error: Option<&dyn fmt::Display>, args: &CheckArgs) -> String {
    match error {
        Some(error) => format::error_body(error, args),
        None => format::body(args),
    }
}

/// Runs the closer and renders the body of a terminating check.
pub(crate) fn close(mut args: CheckArgs, error: Option<&dyn fmt::Display>) -> String {
    args.run_closer();
    render(error, &args)
}

/// Runs the closer, then panics with the rendered body.
pub(crate) fn raise(args: CheckArgs, error: Option<&dyn fmt::Display>) -> ! {
    crate::error::install_panic_report();
    std::panic::panic_any(CheckFailure::new(close(args, error)))
}

#[inline(never)]
pub(crate) fn check_tru(condition: bool, args: CheckArgs, skip: usize) -> bool {
    if !condition {
        report(Tag::Chk, &format::body(&args), skip + 1);
    }
    !condition
}

#[inline(never)]
pub(crate) fn check_err<F: Fallible + ?Sized>(condition: &F, args: CheckArgs, skip: usize) -> bool {
    let Some(error) = condition.failure() else {
        return false;
    };
    report(Tag::Err, &format::error_body(error, &args), skip + 1);
    true
}

#[inline(never)]
pub(crate) fn check_err_ignoring<F>(
    condition: &F,
    ignore: &[F::Error],
    args: CheckArgs,
    skip: usize,
) -> bool
where
    F: Fallible + ?Sized,
    F::Error: PartialEq,
{
    let Some(error) = condition.failure() else {
        return false;
    };
    if !ignore.contains(error) {
        report(Tag::Err, &format::error_body(error, &args), skip + 1);
    }
    true
}

/// Reports a failed boolean condition; returns `true` when `condition` is false.
///
/// ```
/// use logging::chk_tru;
///
/// let items: Vec<u8> = Vec::new();
/// if chk_tru(!items.is_empty(), "no items") {
///     // handle the failure
/// }
/// ```
#[inline(never)]
pub fn chk_tru(condition: bool, args: impl Into<CheckArgs>) -> bool {
    callsite::hold_frame(check_tru(condition, args.into(), 1))
}

/// Panics with a [`CheckFailure`] when `condition` is false.
///
/// The closer, if any, runs before the panic. The payload carries no
/// location.
pub fn chk_tru_p(condition: bool, args: impl Into<CheckArgs>) {
    if !condition {
        raise(args.into(), None);
    }
}

/// Reports a failed boolean condition and terminates the process.
#[inline(never)]
pub fn chk_tru_x(condition: bool, args: impl Into<CheckArgs>) {
    if !condition {
        let body = close(args.into(), None);
        report(Tag::Chk, &body, 1);
        state::terminate();
    }
}

/// Reports an error condition; returns `true` when it holds an error.
///
/// Without text the error's own rendering is the message.
///
/// ```
/// use logging::chk_err;
///
/// let parsed = "12x".parse::<u32>();
/// assert!(chk_err(&parsed, ()));
/// assert!(!chk_err(&"12".parse::<u32>(), "unreachable"));
/// ```
#[inline(never)]
pub fn chk_err<F: Fallible + ?Sized>(condition: &F, args: impl Into<CheckArgs>) -> bool {
    callsite::hold_frame(check_err(condition, args.into(), 1))
}

/// Panics with a [`CheckFailure`] when `condition` holds an error.
pub fn chk_err_p<F: Fallible + ?Sized>(condition: &F, args: impl Into<CheckArgs>) {
    if let Some(error) = condition.failure() {
        raise(args.into(), Some(error as &dyn fmt::Display));
    }
}

/// Reports an error condition and terminates the process.
#[inline(never)]
pub fn chk_err_x<F: Fallible + ?Sized>(condition: &F, args: impl Into<CheckArgs>) {
    if let Some(error) = condition.failure() {
        let body = close(args.into(), Some(error as &dyn fmt::Display));
        report(Tag::Err, &body, 1);
        state::terminate();
    }
}

/// Reports every failing entry; returns `true` when any entry failed.
///
/// Entries are not short-circuited: each failure gets its own line.
#[inline(never)]
pub fn chk_err_list<I>(conditions: I, args: impl Into<CheckArgs>) -> bool
where
    I: IntoIterator,
    I::Item: Fallible,
{
    let args = args.into();
    let mut failed = false;
    for condition in conditions {
        if let Some(error) = condition.failure() {
            report(Tag::Err, &format::error_body(error, &args), 1);
            failed = true;
        }
    }
    failed
}

/// As [`chk_err`], but errors equal to an `ignore` entry are not emitted.
///
/// The return value still reports the failure.
///
/// ```
/// use std::io::ErrorKind;
/// use logging::chk_err_ignoring;
///
/// let interrupted: Option<ErrorKind> = Some(ErrorKind::Interrupted);
/// assert!(chk_err_ignoring(&interrupted, &[ErrorKind::Interrupted], ()));
/// ```
#[inline(never)]
pub fn chk_err_ignoring<F>(condition: &F, ignore: &[F::Error], args: impl Into<CheckArgs>) -> bool
where
    F: Fallible + ?Sized,
    F::Error: PartialEq,
{
    callsite::hold_frame(check_err_ignoring(condition, ignore, args.into(), 1))
}

/// Reports when `actual` differs from `expected`; returns whether they differ.
///
/// The message shows both values, `nil` standing for "no error".
#[inline(never)]
pub fn exp_err<F>(actual: &F, expected: Option<&F::Error>) -> bool
where
    F: Fallible + ?Sized,
    F::Error: PartialEq,
{
    let actual = actual.failure();
    if actual == expected {
        return false;
    }
    let body = format!(
        "{} - Expected error ({}) not given",
        Nil(actual),
        Nil(expected)
    );
    report(Tag::Err, &body, 1);
    true
}

struct Nil<'a, E>(Option<&'a E>);

impl<E: fmt::Display> fmt::Display for Nil<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(error) => error.fmt(f),
            None => f.write_str("nil"),
        }
    }
}
