//! The fixed battery of cross-artifact consistency checks.
//!
//! Each check is an independent, pure rule over (rule table, scan outcome,
//! project root): it never mutates its inputs and never short-circuits the
//! others, so one run always yields the full picture. Checks are dispatched
//! through a registry; adding a check means adding a registry entry, the
//! aggregator is untouched.
//!
//! A check that errors internally is caught at the per-check boundary and
//! converted into a failing result carrying the error text. The remaining
//! checks still run.

use crate::core::error::StackcheckError;
use crate::core::rules::RuleTable;
use crate::core::scan::ScanOutcome;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Well-known configuration files probed for palette values.
const THEME_PROBE_FILES: [&str; 3] = [
    "config/config.exs",
    "assets/css/app.css",
    "tailwind.config.js",
];

/// Minimum (file, token) matches before theme propagation counts as real.
const MIN_THEME_REFERENCES: usize = 3;

/// Case-insensitive markers that identify workflow content.
const WORKFLOW_MARKERS: [&str; 2] = ["workflow", "bmad"];

/// Verdict of one check. Immutable once produced; metrics use a BTreeMap so
/// serialized reports are byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub issues: Vec<String>,
    pub metrics: BTreeMap<String, u64>,
}

impl CheckResult {
    fn from_issues(name: &str, issues: Vec<String>, metrics: BTreeMap<String, u64>) -> Self {
        CheckResult {
            name: name.to_string(),
            passed: issues.is_empty(),
            issues,
            metrics,
        }
    }
}

/// Read-only inputs shared by every check.
pub struct CheckContext<'a> {
    pub rules: &'a RuleTable,
    pub scan: &'a ScanOutcome,
    pub root: &'a Path,
}

pub trait Check {
    fn name(&self) -> &'static str;
    fn evaluate(&self, ctx: &CheckContext) -> Result<CheckResult, StackcheckError>;
}

/// The battery, in report order.
pub fn registry() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(PatternConsistency),
        Box::new(ThemeSynchronization),
        Box::new(NamingConvention),
        Box::new(ComponentMapping),
        Box::new(WorkflowIntegration),
    ]
}

/// Run a battery of checks. An `Err` from a check becomes a failing
/// result carrying the error text; no check aborts the battery.
pub fn run_all(checks: &[Box<dyn Check>], ctx: &CheckContext) -> Vec<CheckResult> {
    checks
        .iter()
        .map(|check| match check.evaluate(ctx) {
            Ok(result) => result,
            Err(e) => CheckResult {
                name: check.name().to_string(),
                passed: false,
                issues: vec![format!("check error: {}", e)],
                metrics: BTreeMap::new(),
            },
        })
        .collect()
}

/// Every declared resource and component identifier must have been extracted
/// from some artifact of its class.
struct PatternConsistency;

impl Check for PatternConsistency {
    fn name(&self) -> &'static str {
        "pattern_consistency"
    }

    fn evaluate(&self, ctx: &CheckContext) -> Result<CheckResult, StackcheckError> {
        let mut issues = Vec::new();
        for mapping in &ctx.rules.mappings {
            if !ctx.scan.resource_ids.contains(&mapping.resource_id) {
                issues.push(format!(
                    "resource '{}' not found in any resource file",
                    mapping.resource_id
                ));
            }
            if !ctx.scan.component_ids.contains(&mapping.component_id) {
                issues.push(format!(
                    "component '{}' not found in any component file",
                    mapping.component_id
                ));
            }
        }
        let metrics = BTreeMap::from([
            ("resources_found".to_string(), ctx.scan.resource_ids.len() as u64),
            ("components_found".to_string(), ctx.scan.component_ids.len() as u64),
        ]);
        Ok(CheckResult::from_issues(self.name(), issues, metrics))
    }
}

/// Palette values must appear verbatim in enough of the well-known
/// configuration files to count as synchronized.
struct ThemeSynchronization;

impl Check for ThemeSynchronization {
    fn name(&self) -> &'static str {
        "theme_synchronization"
    }

    fn evaluate(&self, ctx: &CheckContext) -> Result<CheckResult, StackcheckError> {
        let mut references: Vec<String> = Vec::new();
        for rel in THEME_PROBE_FILES {
            let Ok(content) = fs::read_to_string(ctx.root.join(rel)) else {
                continue;
            };
            for entry in &ctx.rules.palette {
                if content.contains(&entry.token_value) {
                    references.push(format!("{}:{}", rel, entry.token_name));
                }
            }
        }
        let mut issues = Vec::new();
        if references.len() < MIN_THEME_REFERENCES {
            issues.push(
                "insufficient theme propagation across configuration files".to_string(),
            );
        }
        let metrics = BTreeMap::from([("theme_references".to_string(), references.len() as u64)]);
        Ok(CheckResult::from_issues(self.name(), issues, metrics))
    }
}

/// Resource identifiers follow PascalCase with the `Resource` suffix;
/// component identifiers follow strict kebab-case.
struct NamingConvention;

impl Check for NamingConvention {
    fn name(&self) -> &'static str {
        "naming_convention"
    }

    fn evaluate(&self, ctx: &CheckContext) -> Result<CheckResult, StackcheckError> {
        let resource_re = Regex::new(r"^[A-Z][a-zA-Z0-9]*Resource$").unwrap();
        let component_re = Regex::new(r"^[a-z]+(-[a-z]+)*$").unwrap();

        let mut issues = Vec::new();
        for mapping in &ctx.rules.mappings {
            if !resource_re.is_match(&mapping.resource_id) {
                issues.push(format!(
                    "resource '{}' does not follow PascalCase with the Resource suffix",
                    mapping.resource_id
                ));
            }
            if !component_re.is_match(&mapping.component_id) {
                issues.push(format!(
                    "component '{}' does not follow kebab-case",
                    mapping.component_id
                ));
            }
        }
        let metrics = BTreeMap::from([
            ("mappings_checked".to_string(), ctx.rules.mappings.len() as u64),
        ]);
        Ok(CheckResult::from_issues(self.name(), issues, metrics))
    }
}

/// Mapping completeness, judged in aggregate: incomplete mappings are
/// reported as issues, but the check only fails when zero mappings are
/// complete.
struct ComponentMapping;

impl Check for ComponentMapping {
    fn name(&self) -> &'static str {
        "component_mapping"
    }

    fn evaluate(&self, ctx: &CheckContext) -> Result<CheckResult, StackcheckError> {
        let mut complete = 0u64;
        let mut issues = Vec::new();
        for mapping in &ctx.rules.mappings {
            if mapping.is_complete() {
                complete += 1;
            } else {
                issues.push(format!(
                    "incomplete mapping for '{}'",
                    mapping.logical_name
                ));
            }
        }
        let metrics = BTreeMap::from([("complete_mappings".to_string(), complete)]);
        Ok(CheckResult {
            name: self.name().to_string(),
            passed: complete > 0,
            issues,
            metrics,
        })
    }
}

/// At least one workflow-class file must actually mention a workflow marker.
struct WorkflowIntegration;

impl Check for WorkflowIntegration {
    fn name(&self) -> &'static str {
        "workflow_integration"
    }

    fn evaluate(&self, ctx: &CheckContext) -> Result<CheckResult, StackcheckError> {
        let mut marked = 0u64;
        for path in &ctx.scan.workflow_paths {
            let Ok(content) = fs::read_to_string(path) else {
                continue;
            };
            let lowered = content.to_lowercase();
            if WORKFLOW_MARKERS.iter().any(|m| lowered.contains(m)) {
                marked += 1;
            }
        }
        let mut issues = Vec::new();
        if marked == 0 {
            issues.push("no workflow files found".to_string());
        }
        let metrics = BTreeMap::from([("workflow_files_found".to_string(), marked)]);
        Ok(CheckResult::from_issues(self.name(), issues, metrics))
    }
}
