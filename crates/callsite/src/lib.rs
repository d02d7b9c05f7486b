#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/callsite/src/lib.rs
//!
//! # Overview
//!
//! `callsite` answers one question for the diagnostics layers: "which source
//! line is N frames above me?". [`locate`] walks the current stack, anchors on
//! its own frame and returns the [`CallSite`] `skip` frames above the function
//! that called it. [`frames`] exposes the same walk for stack dumps.
//!
//! # Invariants
//!
//! - `skip == 0` is the immediate caller of [`locate`]. Every wrapper that
//!   forwards a lookup on behalf of its own caller must add exactly one, and
//!   must not forward in tail position (see [`hold_frame`]).
//! - The walk anchors on the address of its own frame, so lookups work in
//!   builds whose line tables carry only unqualified names.
//! - Missing frame information (the top of the stack, stripped debug info,
//!   foreign frames) yields `None`; the lookup never panics.
//! - Results are never cached: the same call site may be reached from
//!   different depths on different calls.
//!
//! # Examples
//!
//! ```
//! #[inline(never)]
//! fn whoami() -> Option<callsite::CallSite> {
//!     callsite::locate(1)
//! }
//!
//! if let Some(site) = whoami() {
//!     assert!(site.line() > 0);
//! }
//! ```

mod locator;
mod path;

pub use locator::{CallSite, Frame, frames, hold_frame, locate};
pub use path::{short_function, short_path};
