//! Integration tests pinning the skip arithmetic of `locate`.
//!
//! Every wrapper layer between the user and the locator must add exactly one
//! to the skip count. These tests wrap the locator at two known depths and
//! compare the reported line with `line!()` captured on the same source line.
//! They must hold in the release profile too (`cargo test --release`), whose
//! line tables carry only unqualified function names.

use callsite::{CallSite, hold_frame, locate};

#[inline(never)]
fn report_caller() -> Option<CallSite> {
    hold_frame(locate(1))
}

#[inline(never)]
fn forward_caller() -> Option<CallSite> {
    hold_frame(report_callers_caller())
}

#[inline(never)]
fn report_callers_caller() -> Option<CallSite> {
    hold_frame(locate(2))
}

#[test]
fn depth_one_reports_the_calling_line() {
    let (site, line) = (report_caller(), line!());
    let site = site.expect("debug info available in tests");
    assert_eq!(site.line(), line);
    assert!(site.file().ends_with("locate_depths.rs"), "{}", site.file());
    assert_eq!(
        site.short_function(),
        Some("depth_one_reports_the_calling_line")
    );
}

#[test]
fn depth_two_reports_the_line_above_one_wrapper() {
    let (site, line) = (forward_caller(), line!());
    let site = site.expect("debug info available in tests");
    assert_eq!(site.line(), line);
    assert_eq!(
        site.short_function(),
        Some("depth_two_reports_the_line_above_one_wrapper")
    );
}

#[test]
fn depth_zero_reports_the_locate_call_itself() {
    let (site, line) = (locate(0), line!());
    let site = site.expect("debug info available in tests");
    assert_eq!(site.line(), line);
}

#[test]
fn same_call_site_resolves_per_call() {
    let first = report_caller().expect("first");
    let second = report_caller().expect("second");
    assert_eq!(second.line(), first.line() + 1);
}
