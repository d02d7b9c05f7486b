#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/palette/src/lib.rs
//!
//! # Overview
//!
//! `palette` owns the severity vocabulary shared by every diagkit emitter and
//! the two color tables those severities map onto. A [`Palette`] is a plain
//! value: either every tag carries its ANSI style or every tag maps to the
//! plain style, which renders as nothing. Higher layers store exactly one
//! active palette and swap it wholesale, so a partially colored table can
//! never be observed.
//!
//! # Design
//!
//! - [`Severity`] names the ten message categories (`Echo` through `Danger`).
//! - [`Banner`] names the four block labels (` WARNING `, ` CAUTION `,
//!   `  ERROR  `, `  FAULT  `) rendered in front of free text.
//! - [`Palette::ansi`] and [`Palette::plain`] are `const` constructors over
//!   `anstyle::Style` tables, so toggling color is a single copy of a small
//!   struct.
//!
//! # Examples
//!
//! ```
//! use palette::{Palette, Severity};
//!
//! let ansi = Palette::ansi();
//! assert_eq!(ansi.paint(Severity::Info, "ready"), "\x1b[32mready\x1b[0m");
//!
//! let plain = Palette::plain();
//! assert_eq!(plain.paint(Severity::Info, "ready"), "ready");
//! ```

mod severity;
mod table;

pub use severity::{Banner, ParseSeverityError, Severity};
pub use table::{Palette, default_enabled};
