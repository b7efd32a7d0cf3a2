//! Validation orchestrator: one synchronous pass from filesystem to report.
//!
//! The pipeline flows one direction: rule table + filesystem → scanner →
//! per-class identifier sets → check battery → aggregated report. Nothing is
//! cached between invocations, so validating an unchanged tree twice yields
//! identical reports.

use crate::core::checks::{self, CheckContext};
use crate::core::error::StackcheckError;
use crate::core::report::{self, Report};
use crate::core::rules::RuleTable;
use crate::core::scan;
use std::path::Path;

/// Run the full consistency battery over `root` with the given rule table.
///
/// An invalid root is a fatal invocation error surfaced before any scanning.
/// Past that point every failure is local: unreadable files are treated as
/// absent and a check that errors becomes a failing check result, so the
/// report is always best-effort complete.
pub fn validate(root: &Path, rules: &RuleTable) -> Result<Report, StackcheckError> {
    if !root.is_dir() {
        return Err(StackcheckError::PathError(format!(
            "project root '{}' is not a directory",
            root.display()
        )));
    }
    let outcome = scan::scan_project(root, rules)?;
    let ctx = CheckContext {
        rules,
        scan: &outcome,
        root,
    };
    let results = checks::run_all(&checks::registry(), &ctx);
    Ok(report::aggregate(results))
}
