//! crates/logging/src/condition.rs
//! Error-bearing conditions accepted by the error checks.

use std::fmt;

/// A value that either holds an error or does not.
///
/// Implemented for `Result<T, E>` (failed when `Err`) and `Option<E>`
/// (failed when `Some`), so both `chk_err(&file.read(..), ..)` and
/// `chk_err(&maybe_error, ..)` read naturally.
pub trait Fallible {
    /// The error type carried on failure.
    type Error: fmt::Display;

    /// Returns the error when the condition failed.
    fn failure(&self) -> Option<&Self::Error>;

    /// Reports whether the condition failed.
    fn failed(&self) -> bool {
        self.failure().is_some()
    }
}

impl<T, E: fmt::Display> Fallible for Result<T, E> {
    type Error = E;

    fn failure(&self) -> Option<&E> {
        self.as_ref().err()
    }
}

impl<E: fmt::Display> Fallible for Option<E> {
    type Error = E;

    fn failure(&self) -> Option<&E> {
        self.as_ref()
    }
}

impl<F: Fallible + ?Sized> Fallible for &F {
    type Error = F::Error;

    fn failure(&self) -> Option<&Self::Error> {
        (**self).failure()
    }
}
