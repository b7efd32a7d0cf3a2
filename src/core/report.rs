//! Report aggregation and rendering.
//!
//! Aggregation is pure: overall status is the AND of every check verdict,
//! the flat issue list concatenates failing checks' issues in check order,
//! and the summary is one of exactly two canned sentences. Rendering is a
//! separate concern and the only place terminal styling happens.

use crate::core::checks::CheckResult;
use colored::Colorize;
use serde::{Deserialize, Serialize};

const BANNER_WIDTH: usize = 60;
const ISSUE_PREVIEW_CHARS: usize = 96;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub overall_passed: bool,
    pub checks: Vec<CheckResult>,
    pub issues: Vec<String>,
    pub summary_text: String,
}

/// Fold ordered check results into one report. No I/O, no extra validation.
pub fn aggregate(checks: Vec<CheckResult>) -> Report {
    let overall_passed = checks.iter().all(|c| c.passed);
    let issues: Vec<String> = checks
        .iter()
        .filter(|c| !c.passed)
        .flat_map(|c| c.issues.iter().cloned())
        .collect();
    let summary_text = if overall_passed {
        "All cross-artifact checks passed; project layers are in sync.".to_string()
    } else {
        format!("{} validation issue(s) found; review and fix.", issues.len())
    };
    Report {
        overall_passed,
        checks,
        issues,
        summary_text,
    }
}

/// One-line preview of an issue: whitespace collapsed, length bounded.
fn compact_issue(issue: &str) -> String {
    let collapsed = issue.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(ISSUE_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Human-readable multi-line report with a fixed banner.
pub fn render_text(report: &Report) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner));
    out.push_str("CROSS-ARTIFACT VALIDATION REPORT\n");
    out.push_str(&format!("{}\n", banner));

    let status = if report.overall_passed {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    };
    out.push_str(&format!("Overall: {}\n\nChecks:\n", status));
    for check in &report.checks {
        let icon = if check.passed {
            "PASS".green()
        } else {
            "FAIL".red()
        };
        out.push_str(&format!("  [{}] {}\n", icon, check.name));
    }

    if !report.issues.is_empty() {
        out.push_str("\nIssues:\n");
        for issue in &report.issues {
            out.push_str(&format!("  - {}\n", compact_issue(issue)));
        }
    }

    out.push_str(&format!("\n{}\n{}\n", report.summary_text, banner));
    out
}
