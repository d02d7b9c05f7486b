//! crates/callsite/src/locator.rs
//! Stack walking anchored on the locator's own frame.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::path::{short_function, short_path};

// Demangled name of `walk`. Only a fallback: builds with line tables alone
// record unqualified names, so the anchor is normally found by address.
const ANCHOR: &str = "callsite::locator::walk";

/// One resolved stack frame.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Frame {
    function: Option<String>,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl Frame {
    /// Fully qualified function name, when symbols are available.
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Source file recorded in the debug info.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Source line recorded in the debug info.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        self.line
    }
}

/// Source location of a caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallSite {
    file: String,
    line: u32,
    function: Option<String>,
}

impl CallSite {
    /// Builds a call site from already shortened parts.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, function: Option<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function,
        }
    }

    /// Shortened source path (last two segments).
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line number of the call.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Fully qualified name of the calling function.
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Calling function without its module path.
    #[must_use]
    pub fn short_function(&self) -> Option<&str> {
        self.function.as_deref().map(short_function)
    }

    fn from_frame(frame: Frame) -> Option<Self> {
        let line = frame.line?;
        let file = frame.file?;
        let file = file.to_string_lossy();
        Some(Self {
            file: short_path(&file).to_owned(),
            line,
            function: frame.function,
        })
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Returns the call site `skip` frames above the caller of `locate`.
///
/// `skip == 0` names the function that called `locate`, `skip == 1` its
/// caller, and so on. Returns `None` when the requested frame does not exist
/// or carries no file/line information.
#[inline(never)]
#[must_use]
pub fn locate(skip: usize) -> Option<CallSite> {
    walk(skip.saturating_add(1), 1)
        .into_iter()
        .next()
        .and_then(CallSite::from_frame)
}

/// Returns up to `limit` frames starting `skip` frames above the caller.
///
/// Frames are reported innermost first. Frames without symbol information
/// are omitted.
#[inline(never)]
#[must_use]
pub fn frames(skip: usize, limit: usize) -> Vec<Frame> {
    hold_frame(walk(skip.saturating_add(1), limit))
}

/// Returns `value` unchanged, after an optimization barrier.
///
/// A wrapper that forwards a skip count must stay on the stack. When the
/// forwarding call is the wrapper's last action an optimized build may turn
/// it into a jump, which removes the wrapper's frame and shifts every count
/// above it by one. Passing the forwarded call's result through `hold_frame`,
/// or `()` right after a call without one, keeps the call a call.
///
/// ```
/// #[inline(never)]
/// fn caller_of_caller() -> Option<callsite::CallSite> {
///     callsite::hold_frame(callsite::locate(1))
/// }
/// # let _ = caller_of_caller();
/// ```
#[inline]
pub fn hold_frame<T>(value: T) -> T {
    std::hint::black_box(value)
}

// Frame `skip` above walk's caller is the first one collected: the anchor is
// walk's own frame, anchor + 1 its caller, anchor + 1 + skip the target.
#[inline(never)]
fn walk(skip: usize, limit: usize) -> Vec<Frame> {
    let mut collected = Vec::new();
    if limit == 0 {
        return collected;
    }
    let anchor = walk as usize;
    let mut anchored = false;
    let mut pending = skip.saturating_add(1);

    backtrace::trace(|raw| {
        if !anchored {
            anchored = is_anchor(raw, anchor);
            return true;
        }
        let mut done = false;
        backtrace::resolve_frame(raw, |symbol| {
            if done {
                return;
            }
            if pending > 0 {
                pending -= 1;
                if pending > 0 {
                    return;
                }
            }
            collected.push(Frame {
                function: symbol.name().map(|name| format!("{name:#}")),
                file: symbol.filename().map(Path::to_path_buf),
                line: symbol.lineno(),
            });
            done = collected.len() >= limit;
        });
        !done
    });

    collected
}

// Matches the physical frame of `walk`. Symbols inlined into it resolve
// from the same raw frame and are skipped with it.
fn is_anchor(raw: &backtrace::Frame, anchor: usize) -> bool {
    if raw.symbol_address() as usize == anchor {
        return true;
    }
    let mut found = false;
    backtrace::resolve_frame(raw, |symbol| {
        found |= symbol.addr().is_some_and(|addr| addr as usize == anchor)
            || symbol
                .name()
                .is_some_and(|name| format!("{name:#}").ends_with(ANCHOR));
    });
    found
}
