//! crates/logging/src/macros.rs
//! `format!`-style front ends for the checks and traces.
//!
//! Each macro builds [`CheckArgs`](crate::CheckArgs) or
//! [`TraceArgs`](crate::TraceArgs) at the call site and forwards to the
//! function of the same name, so call-site lookup is unaffected. A closer
//! follows a `;`.
//!
//! ```
//! use logging::{chk_err, chk_tru};
//!
//! let retries = 3;
//! chk_tru!(retries < 5, "too many retries: {}", retries);
//! chk_tru!(retries > 0; || logging::note("closing"));
//! chk_err!("7".parse::<u8>(), "bad count {retries}");
//! ```

/// Builds [`CheckArgs`](crate::CheckArgs) from a format string and an optional closer.
///
/// ```
/// use logging::check_args;
///
/// let args = check_args!("{}-{}", "x", 3; || ());
/// assert_eq!(args.text_ref().map(|t| t.render()).as_deref(), Some("x-3"));
/// assert!(args.has_closer());
/// assert!(check_args!().is_empty());
/// ```
#[macro_export]
macro_rules! check_args {
    () => {
        $crate::CheckArgs::new()
    };
    (; $closer:expr $(,)?) => {
        $crate::CheckArgs::closer($closer)
    };
    ($fmt:literal $(, $arg:expr)* $(,)? ; $closer:expr $(,)?) => {
        $crate::CheckArgs::text(::std::format!($fmt $(, $arg)*)).with_closer($closer)
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::CheckArgs::text(::std::format!($fmt $(, $arg)*))
    };
}

/// [`chk_tru`](crate::chk_tru) with `format!` arguments.
#[macro_export]
macro_rules! chk_tru {
    ($cond:expr $(,)?) => {
        $crate::chk_tru($cond, $crate::CheckArgs::new())
    };
    ($cond:expr; $($rest:tt)+) => {
        $crate::chk_tru($cond, $crate::check_args!(; $($rest)+))
    };
    ($cond:expr, $($rest:tt)+) => {
        $crate::chk_tru($cond, $crate::check_args!($($rest)+))
    };
}

/// [`chk_tru_p`](crate::chk_tru_p) with `format!` arguments.
#[macro_export]
macro_rules! chk_tru_p {
    ($cond:expr $(,)?) => {
        $crate::chk_tru_p($cond, $crate::CheckArgs::new())
    };
    ($cond:expr; $($rest:tt)+) => {
        $crate::chk_tru_p($cond, $crate::check_args!(; $($rest)+))
    };
    ($cond:expr, $($rest:tt)+) => {
        $crate::chk_tru_p($cond, $crate::check_args!($($rest)+))
    };
}

/// [`chk_tru_x`](crate::chk_tru_x) with `format!` arguments.
#[macro_export]
macro_rules! chk_tru_x {
    ($cond:expr $(,)?) => {
        $crate::chk_tru_x($cond, $crate::CheckArgs::new())
    };
    ($cond:expr; $($rest:tt)+) => {
        $crate::chk_tru_x($cond, $crate::check_args!(; $($rest)+))
    };
    ($cond:expr, $($rest:tt)+) => {
        $crate::chk_tru_x($cond, $crate::check_args!($($rest)+))
    };
}

/// [`chk_err`](crate::chk_err) with `format!` arguments; the condition is borrowed.
#[macro_export]
macro_rules! chk_err {
    ($cond:expr $(,)?) => {
        $crate::chk_err(&$cond, $crate::CheckArgs::new())
    };
    ($cond:expr; $($rest:tt)+) => {
        $crate::chk_err(&$cond, $crate::check_args!(; $($rest)+))
    };
    ($cond:expr, $($rest:tt)+) => {
        $crate::chk_err(&$cond, $crate::check_args!($($rest)+))
    };
}

/// [`chk_err_p`](crate::chk_err_p) with `format!` arguments; the condition is borrowed.
#[macro_export]
macro_rules! chk_err_p {
    ($cond:expr $(,)?) => {
        $crate::chk_err_p(&$cond, $crate::CheckArgs::new())
    };
    ($cond:expr; $($rest:tt)+) => {
        $crate::chk_err_p(&$cond, $crate::check_args!(; $($rest)+))
    };
    ($cond:expr, $($rest:tt)+) => {
        $crate::chk_err_p(&$cond, $crate::check_args!($($rest)+))
    };
}

/// [`chk_err_x`](crate::chk_err_x) with `format!` arguments; the condition is borrowed.
#[macro_export]
macro_rules! chk_err_x {
    ($cond:expr $(,)?) => {
        $crate::chk_err_x(&$cond, $crate::CheckArgs::new())
    };
    ($cond:expr; $($rest:tt)+) => {
        $crate::chk_err_x(&$cond, $crate::check_args!(; $($rest)+))
    };
    ($cond:expr, $($rest:tt)+) => {
        $crate::chk_err_x(&$cond, $crate::check_args!($($rest)+))
    };
}

/// [`trc`](crate::trc) with `format!` arguments.
#[macro_export]
macro_rules! trc {
    () => {
        $crate::trc(())
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::trc(::std::format!($fmt $(, $arg)*))
    };
}

/// [`trc_from`](crate::trc_from) with `format!` arguments.
#[macro_export]
macro_rules! trc_from {
    () => {
        $crate::trc_from(())
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::trc_from(::std::format!($fmt $(, $arg)*))
    };
}

#[cfg(test)]
mod tests {
    use crate::test_support::capture;
    use logging_sink::Stream;
    use serial_test::serial;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn check_args_forms() {
        let args = check_args!("{}:{}", "a", 1);
        assert_eq!(args.text_ref().map(ToString::to_string).as_deref(), Some("a:1"));
        assert!(!args.has_closer());
        let args = check_args!(; || ());
        assert!(args.is_empty());
        assert!(args.has_closer());
    }

    #[test]
    #[serial]
    fn chk_macros_format_and_borrow() {
        let (sink, _restore) = capture();
        let parsed = "x".parse::<u8>();
        let count = 2;
        assert!(chk_tru!(count > 5, "count is {count}"));
        assert!(chk_err!(parsed, "parse of {:?}", "x"));
        assert!(parsed.is_err());
        assert!(!chk_tru!(count == 2));
        let lines: Vec<String> = sink
            .text(Stream::Error)
            .lines()
            .map(str::to_owned)
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("CHK @ ") && lines[0].ends_with("  count is 2"));
        assert!(lines[1].starts_with("ERR @ ") && lines[1].ends_with("  parse of \"x\""));
    }

    #[test]
    #[serial]
    fn closer_only_form_keeps_default_body() {
        let (sink, _restore) = capture();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        assert!(chk_tru!(false; move || flag.set(true)));
        assert!(!ran.get(), "report-only checks never run the closer");
        assert!(sink.text(Stream::Error).ends_with("  Check failed\n"));
    }

    #[test]
    #[serial]
    fn trc_macro_formats() {
        let (sink, _restore) = capture();
        trc!("n={}", 4);
        trc!();
        let text = sink.text(Stream::Primary);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].ends_with(" n=4"), "{text}");
        assert!(lines[1].starts_with("TRC @ "), "{text}");
    }
}
