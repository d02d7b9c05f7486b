//! crates/logging/src/gate.rs
//! Caller-owned gates that filter emissions.
//!
//! - [`FlagGate`]: an on/off switch with an optional countdown that
//!   terminates the process after a number of emissions;
//! - [`LevelGate`]: emits when its level is positive and at least the
//!   required level;
//! - [`MaskGate`]: emits when its mask shares a bit with the selector.
//!
//! Gates are plain values. Their fields are public and may be changed
//! between calls.

use std::fmt;

use logging_sink::Stream;
use palette::Severity;

use crate::args::CheckArgs;
use crate::check;
use crate::condition::Fallible;
use crate::emitters::emit;
use crate::format;
use crate::state;
use crate::trace::{self, TraceArgs};
use crate::tracing_macros::trace_gate;

macro_rules! severity_methods {
    (&mut self; $($name:ident => $severity:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Emits `text` as [`Severity::", stringify!($severity), "`] when enabled.")]
            #[inline(never)]
            pub fn $name(&mut self, text: impl fmt::Display) {
                self.put(Severity::$severity, &text, 1);
                callsite::hold_frame(());
            }
        )+
    };
    (&self, $selector:ident: $ty:ty; $($name:ident => $severity:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Emits `text` as [`Severity::", stringify!($severity), "`] when the gate admits `", stringify!($selector), "`.")]
            pub fn $name(&self, $selector: $ty, text: impl fmt::Display) {
                self.emit($selector, Severity::$severity, text);
            }
        )+
    };
}

/// On/off gate with an emission countdown.
///
/// With `max_out == 0` the gate only filters. With `max_out > 0` every
/// emission while enabled decrements it; the emission that brings it to
/// zero is followed by `--Countdown expired @ <line> in <file>` on the
/// error stream and process termination.
///
/// ```
/// use logging::FlagGate;
///
/// let mut gate = FlagGate::new(false);
/// gate.info("suppressed");
/// gate.enabled = true;
/// assert!(!gate.chk_tru(true, "holds"));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagGate {
    /// Whether emissions pass.
    pub enabled: bool,
    /// Remaining emissions before termination; zero disables the countdown.
    pub max_out: u32,
}

impl FlagGate {
    /// Creates a gate without a countdown.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            max_out: 0,
        }
    }

    /// Sets the countdown.
    #[must_use]
    pub const fn with_max_out(mut self, max_out: u32) -> Self {
        self.max_out = max_out;
        self
    }

    /// Emits `text` at `severity` when enabled.
    #[inline(never)]
    pub fn emit(&mut self, severity: Severity, text: impl fmt::Display) {
        self.put(severity, &text, 1);
        callsite::hold_frame(());
    }

    severity_methods! {
        &mut self;
        echo => Echo,
        note => Note,
        info => Info,
        message => Message,
        status => Status,
        warning => Warning,
        caution => Caution,
        failed => Failed,
        error => Error,
        danger => Danger,
    }

    #[inline(never)]
    fn put(&mut self, severity: Severity, text: &dyn fmt::Display, skip: usize) {
        if self.enabled {
            emit(severity, text);
            if self.count_down() {
                expire(skip + 1);
                state::terminate();
            }
        }
    }

    /// Decrements the countdown; returns `true` when it just reached zero.
    const fn count_down(&mut self) -> bool {
        if self.max_out == 0 {
            return false;
        }
        self.max_out -= 1;
        self.max_out == 0
    }

    /// [`chk_tru`](crate::chk_tru) when enabled; returns whether `condition` failed.
    #[inline(never)]
    pub fn chk_tru(&mut self, condition: bool, args: impl Into<CheckArgs>) -> bool {
        if !self.enabled {
            return !condition;
        }
        let failed = check::check_tru(condition, args.into(), 1);
        if failed && self.count_down() {
            expire(1);
            state::terminate();
        }
        failed
    }

    /// [`chk_err`](crate::chk_err) when enabled; returns whether `condition` failed.
    #[inline(never)]
    pub fn chk_err<F: Fallible + ?Sized>(&mut self, condition: &F, args: impl Into<CheckArgs>) -> bool {
        if !self.enabled {
            return condition.failed();
        }
        let failed = check::check_err(condition, args.into(), 1);
        if failed && self.count_down() {
            expire(1);
            state::terminate();
        }
        failed
    }

    /// [`chk_err_ignoring`](crate::chk_err_ignoring) when enabled.
    ///
    /// An error that is emitted counts down like any other emission of this
    /// gate and may terminate the process. Ignored errors are not emitted and
    /// do not count down.
    #[inline(never)]
    pub fn chk_err_ignoring<F>(
        &mut self,
        condition: &F,
        ignore: &[F::Error],
        args: impl Into<CheckArgs>,
    ) -> bool
    where
        F: Fallible + ?Sized,
        F::Error: PartialEq,
    {
        if !self.enabled {
            return condition.failed();
        }
        let emitted = condition
            .failure()
            .is_some_and(|error| !ignore.contains(error));
        let failed = check::check_err_ignoring(condition, ignore, args.into(), 1);
        if emitted && self.count_down() {
            expire(1);
            state::terminate();
        }
        failed
    }

    /// [`trc`](crate::trc) when enabled.
    #[inline(never)]
    pub fn trc(&mut self, args: impl Into<TraceArgs>) {
        if self.enabled {
            trace::trace_at("TRC", &args.into(), 1);
            if self.count_down() {
                expire(1);
                state::terminate();
            }
        }
    }

    /// [`trc_from`](crate::trc_from) when enabled.
    #[inline(never)]
    pub fn trc_from(&mut self, args: impl Into<TraceArgs>) {
        if self.enabled {
            trace::trace_at("WAS", &args.into(), 2);
            if self.count_down() {
                expire(1);
                state::terminate();
            }
        }
    }
}

/// Emits the countdown expiry line for the frame `skip` levels above the caller.
#[inline(never)]
fn expire(skip: usize) {
    let site = callsite::locate(skip + 1);
    let at = format::at(site.as_ref());
    trace_gate!(site = %at, "countdown expired");
    let line = format::wrap(
        &state::palette(),
        Severity::Error,
        &format!("--Countdown expired {at}"),
    );
    state::emit(Stream::Error, &line);
}

/// Gate admitting emissions whose required level is within its level.
///
/// A level of zero or below disables the gate entirely.
///
/// ```
/// use logging::LevelGate;
///
/// let gate = LevelGate::new(2);
/// assert!(gate.enabled_for(1));
/// assert!(gate.enabled_for(2));
/// assert!(!gate.enabled_for(3));
/// assert!(!LevelGate::new(0).enabled_for(0));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelGate {
    /// Current verbosity.
    pub level: i32,
}

impl LevelGate {
    /// Creates a gate at `level`.
    #[must_use]
    pub const fn new(level: i32) -> Self {
        Self { level }
    }

    /// Whether an emission requiring `required` passes.
    #[must_use]
    pub const fn enabled_for(&self, required: i32) -> bool {
        self.level > 0 && self.level >= required
    }

    /// Emits `text` at `severity` when `required` passes.
    pub fn emit(&self, required: i32, severity: Severity, text: impl fmt::Display) {
        if self.enabled_for(required) {
            emit(severity, text);
        }
    }

    severity_methods! {
        &self, required: i32;
        echo => Echo,
        note => Note,
        info => Info,
        message => Message,
        status => Status,
        warning => Warning,
        caution => Caution,
        failed => Failed,
        error => Error,
        danger => Danger,
    }

    /// [`chk_tru`](crate::chk_tru) when `required` passes.
    #[inline(never)]
    pub fn chk_tru(&self, required: i32, condition: bool, args: impl Into<CheckArgs>) -> bool {
        if self.enabled_for(required) {
            callsite::hold_frame(check::check_tru(condition, args.into(), 1))
        } else {
            !condition
        }
    }

    /// [`chk_err`](crate::chk_err) when `required` passes.
    #[inline(never)]
    pub fn chk_err<F: Fallible + ?Sized>(
        &self,
        required: i32,
        condition: &F,
        args: impl Into<CheckArgs>,
    ) -> bool {
        if self.enabled_for(required) {
            callsite::hold_frame(check::check_err(condition, args.into(), 1))
        } else {
            condition.failed()
        }
    }
}

/// Gate admitting emissions whose selector shares a bit with its mask.
///
/// ```
/// use logging::MaskGate;
///
/// let gate = MaskGate::new(0b1010);
/// assert!(gate.enabled_for(0b0010));
/// assert!(!gate.enabled_for(0b0101));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskGate {
    /// Enabled categories.
    pub mask: u32,
}

impl MaskGate {
    /// Creates a gate with `mask`.
    #[must_use]
    pub const fn new(mask: u32) -> Self {
        Self { mask }
    }

    /// Whether an emission selected by `bits` passes.
    #[must_use]
    pub const fn enabled_for(&self, bits: u32) -> bool {
        self.mask & bits != 0
    }

    /// Emits `text` at `severity` when `bits` passes.
    pub fn emit(&self, bits: u32, severity: Severity, text: impl fmt::Display) {
        if self.enabled_for(bits) {
            emit(severity, text);
        }
    }

    severity_methods! {
        &self, bits: u32;
        echo => Echo,
        note => Note,
        info => Info,
        message => Message,
        status => Status,
        warning => Warning,
        caution => Caution,
        failed => Failed,
        error => Error,
        danger => Danger,
    }

    /// [`chk_tru`](crate::chk_tru) when `bits` passes.
    #[inline(never)]
    pub fn chk_tru(&self, bits: u32, condition: bool, args: impl Into<CheckArgs>) -> bool {
        if self.enabled_for(bits) {
            callsite::hold_frame(check::check_tru(condition, args.into(), 1))
        } else {
            !condition
        }
    }

    /// [`chk_err`](crate::chk_err) when `bits` passes.
    #[inline(never)]
    pub fn chk_err<F: Fallible + ?Sized>(
        &self,
        bits: u32,
        condition: &F,
        args: impl Into<CheckArgs>,
    ) -> bool {
        if self.enabled_for(bits) {
            callsite::hold_frame(check::check_err(condition, args.into(), 1))
        } else {
            condition.failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{capture, capture_exits, expect_exit};
    use crate::EXIT_STATUS;
    use serial_test::serial;

    #[test]
    #[serial]
    fn disabled_flag_gate_is_silent_but_still_reports_failure() {
        let (sink, _restore) = capture();
        let mut gate = FlagGate::new(false);
        gate.error("hidden");
        gate.trc("hidden");
        assert!(gate.chk_tru(false, "hidden"));
        assert!(gate.chk_err(&Err::<(), _>("e"), ()));
        assert!(sink.is_empty());
    }

    #[test]
    #[serial]
    fn enabled_flag_gate_emits() {
        let (sink, _restore) = capture();
        let mut gate = FlagGate::new(true);
        gate.info("shown");
        gate.failed("bad");
        assert_eq!(sink.text(Stream::Primary), "shown\n");
        assert_eq!(sink.text(Stream::Error), "bad\n");
    }

    #[test]
    #[serial]
    fn toggling_between_calls_takes_effect() {
        let (sink, _restore) = capture();
        let mut gate = FlagGate::default();
        gate.note("one");
        gate.enabled = true;
        gate.note("two");
        gate.enabled = false;
        gate.note("three");
        assert_eq!(sink.text(Stream::Primary), "two\n");
    }

    #[test]
    #[serial]
    fn countdown_terminates_on_the_last_allowed_emission() {
        let (sink, _restore) = capture_exits();
        let mut gate = FlagGate::new(true).with_max_out(2);
        gate.message("first");
        assert_eq!(gate.max_out, 1);
        let code = expect_exit(|| gate.message("second"));
        assert_eq!(code, EXIT_STATUS);
        assert_eq!(sink.text(Stream::Primary), "first\nsecond\n");
        let error = sink.text(Stream::Error);
        assert!(error.starts_with("--Countdown expired @ "), "{error}");
        assert!(error.trim_end().ends_with("gate.rs"), "{error}");
    }

    #[test]
    #[serial]
    fn failed_checks_count_down_passing_ones_do_not() {
        let (_sink, _restore) = capture_exits();
        let mut gate = FlagGate::new(true).with_max_out(3);
        assert!(!gate.chk_tru(true, ()));
        assert!(gate.chk_tru(false, "one"));
        assert_eq!(gate.max_out, 2);
        assert!(gate.chk_err_ignoring(&Some("skip"), &["skip"], ()));
        assert_eq!(gate.max_out, 2);
        assert!(gate.chk_err(&Some("two"), ()));
        assert_eq!(gate.max_out, 1);
    }

    #[test]
    #[serial]
    fn emitted_errors_in_ignoring_checks_count_down_to_exit() {
        let (sink, _restore) = capture_exits();
        let mut gate = FlagGate::new(true).with_max_out(2);
        assert!(gate.chk_err_ignoring(&Some("EIO"), &["EAGAIN"], "first"));
        assert_eq!(gate.max_out, 1);
        assert!(gate.chk_err_ignoring(&Some("EAGAIN"), &["EAGAIN"], "ignored"));
        assert_eq!(gate.max_out, 1);
        let code = expect_exit(|| {
            gate.chk_err_ignoring(&Some("EIO"), &["EAGAIN"], "second");
        });
        assert_eq!(code, EXIT_STATUS);
        let error = sink.text(Stream::Error);
        assert_eq!(error.matches("ERR @ ").count(), 2, "{error}");
        assert!(error.contains("--Countdown expired @ "), "{error}");
        assert!(!error.contains("ignored"), "{error}");
    }

    #[test]
    #[serial]
    fn zero_countdown_never_expires() {
        let (sink, _restore) = capture_exits();
        let mut gate = FlagGate::new(true);
        for _ in 0..5 {
            gate.status("tick");
        }
        assert_eq!(sink.count(Stream::Primary), 5);
        assert_eq!(gate.max_out, 0);
    }

    #[test]
    #[serial]
    fn flag_gate_traces_count_down() {
        let (sink, _restore) = capture_exits();
        let mut gate = FlagGate::new(true).with_max_out(5);
        gate.trc("here");
        assert_eq!(gate.max_out, 4);
        assert!(sink.text(Stream::Primary).starts_with("TRC @ "));
    }

    #[test]
    #[serial]
    fn level_gate_emits_at_or_below_its_level() {
        let (sink, _restore) = capture();
        let gate = LevelGate::new(2);
        gate.info(1, "one");
        gate.info(2, "two");
        gate.info(3, "three");
        assert!(!gate.chk_tru(3, false, "hidden check"));
        assert_eq!(sink.text(Stream::Primary), "one\ntwo\n");
        assert!(sink.text(Stream::Error).is_empty());
    }

    #[test]
    #[serial]
    fn non_positive_level_disables_everything() {
        let (sink, _restore) = capture();
        for level in [0, -1] {
            let gate = LevelGate::new(level);
            gate.danger(level, "never");
            gate.echo(i32::MIN, "never");
        }
        assert!(sink.is_empty());
    }

    #[test]
    #[serial]
    fn mask_gate_requires_a_shared_bit() {
        let (sink, _restore) = capture();
        let gate = MaskGate::new(0xA);
        gate.info(0x2, "bit 1");
        gate.info(0x5, "bits 0 and 2");
        gate.info(0x8, "bit 3");
        assert!(gate.chk_err(0x8, &Err::<(), _>("bad"), ()));
        assert_eq!(sink.text(Stream::Primary), "bit 1\nbit 3\n");
        assert_eq!(sink.count(Stream::Error), 1);
    }

    #[test]
    #[serial]
    fn gated_checks_stamp_the_callers_line() {
        let (sink, _restore) = capture();
        let gate = LevelGate::new(1);
        let expected = line!() + 1;
        gate.chk_tru(1, false, "x");
        let text = sink.text(Stream::Error);
        assert!(text.starts_with(&format!("CHK @ {expected} in ")), "{text}");
    }
}
