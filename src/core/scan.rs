//! Artifact scanner: walks a project root, classifies files into artifact
//! classes, and extracts candidate entity identifiers from each file's text.
//!
//! Extraction is deliberately shallow — substring and regex matching only,
//! never a real parse of the scanned language — so false negatives are
//! accepted by design. Each class carries one extraction rule in a uniform
//! (class → extraction) table; the walk body never special-cases a class.
//!
//! The scanner is stateless: every call re-walks the filesystem and rebuilds
//! the identifier sets from scratch. File text is read, mined, and dropped
//! within the loop; nothing persists past one pass. Files that vanish or
//! fail to decode as UTF-8 are skipped silently.

use crate::core::error::StackcheckError;
use crate::core::rules::RuleTable;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactClass {
    Resource,
    Component,
    Workflow,
    Unclassified,
}

/// Classify a file by extension plus a filename/path-segment heuristic.
/// Derived once per scan; a file never changes class mid-pass.
///
/// Classification is path-based only. A yaml/md document becomes a workflow
/// artifact through its name or a `bmad` path segment, never through its
/// text — a README that merely mentions workflow markers stays unclassified
/// and is invisible to the marker check.
pub fn classify(path: &Path) -> ArtifactClass {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    match ext {
        "ex" => {
            let in_resources_dir = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|s| s.to_str())
                == Some("resources");
            if name.contains("resource") || in_resources_dir {
                ArtifactClass::Resource
            } else {
                ArtifactClass::Unclassified
            }
        }
        "html" | "heex" => ArtifactClass::Component,
        "yaml" | "yml" | "md" => {
            let in_workflow_path = path
                .iter()
                .any(|seg| seg.to_str().is_some_and(|s| s.contains("bmad")));
            if name.contains("workflow") || in_workflow_path {
                ArtifactClass::Workflow
            } else {
                ArtifactClass::Unclassified
            }
        }
        _ => ArtifactClass::Unclassified,
    }
}

/// How identifiers are mined from one artifact class.
enum Extraction<'a> {
    /// Regex with one capture group naming the declared identifier.
    Declaration(Regex),
    /// Verbatim membership test against identifiers the rule table declares.
    AllowList(Vec<&'a str>),
}

impl Extraction<'_> {
    fn extract(&self, text: &str, out: &mut FxHashSet<String>) {
        match self {
            Extraction::Declaration(re) => {
                for cap in re.captures_iter(text) {
                    out.insert(cap[1].to_string());
                }
            }
            Extraction::AllowList(ids) => {
                for id in ids {
                    if text.contains(id) {
                        out.insert((*id).to_string());
                    }
                }
            }
        }
    }
}

fn extraction_table(rules: &RuleTable) -> Vec<(ArtifactClass, Extraction<'_>)> {
    let declaration = Regex::new(r"defmodule\s+(?:[A-Za-z0-9_.]+\.)?([A-Z][A-Za-z0-9]*Resource)\b")
        .unwrap();
    vec![
        (ArtifactClass::Resource, Extraction::Declaration(declaration)),
        (
            ArtifactClass::Component,
            Extraction::AllowList(rules.component_ids()),
        ),
        (
            ArtifactClass::Workflow,
            Extraction::AllowList(rules.workflow_ids()),
        ),
    ]
}

/// Structural probe for a backend resource file: the three markers a stock
/// Ash resource declares. Substring tests only; informational, not a check.
pub fn resource_has_structure(text: &str) -> bool {
    text.contains("use Ash.Resource")
        && text.contains("attributes do")
        && text.contains("actions do")
}

/// Everything one scan pass produces. Rebuilt fully on every invocation;
/// identifier sets collapse duplicates and carry no order.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub resource_ids: FxHashSet<String>,
    pub component_ids: FxHashSet<String>,
    pub workflow_ids: FxHashSet<String>,
    pub resource_files: usize,
    pub component_files: usize,
    pub workflow_files: usize,
    pub structured_resources: usize,
    /// Paths (not text) of workflow-class files, for the marker check.
    pub workflow_paths: Vec<PathBuf>,
}

impl ScanOutcome {
    fn ids_mut(&mut self, class: ArtifactClass) -> &mut FxHashSet<String> {
        match class {
            ArtifactClass::Resource => &mut self.resource_ids,
            ArtifactClass::Component => &mut self.component_ids,
            ArtifactClass::Workflow => &mut self.workflow_ids,
            ArtifactClass::Unclassified => unreachable!("unclassified files are never mined"),
        }
    }

    /// Deterministic, serializable view for the `scan` surface.
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            resource_files: self.resource_files,
            component_files: self.component_files,
            workflow_files: self.workflow_files,
            structured_resources: self.structured_resources,
            resource_ids: sorted(&self.resource_ids),
            component_ids: sorted(&self.component_ids),
            workflow_ids: sorted(&self.workflow_ids),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanSummary {
    pub resource_files: usize,
    pub component_files: usize,
    pub workflow_files: usize,
    pub structured_resources: usize,
    pub resource_ids: Vec<String>,
    pub component_ids: Vec<String>,
    pub workflow_ids: Vec<String>,
}

fn sorted(set: &FxHashSet<String>) -> Vec<String> {
    let mut items: Vec<String> = set.iter().cloned().collect();
    items.sort();
    items
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), StackcheckError> {
    if !dir.is_dir() {
        return Ok(());
    }
    let name = dir.file_name().and_then(|s| s.to_str()).unwrap_or("");
    if name == ".git" || name == "target" || name == "_build" || name == "deps" {
        return Ok(());
    }
    for entry in fs::read_dir(dir).map_err(StackcheckError::IoError)? {
        let entry = entry.map_err(StackcheckError::IoError)?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// Walk `root` and produce the per-class identifier sets and file counts.
///
/// A missing or non-directory root is an invocation error; an unreadable
/// individual file is treated as absent and never fails the scan.
pub fn scan_project(root: &Path, rules: &RuleTable) -> Result<ScanOutcome, StackcheckError> {
    if !root.is_dir() {
        return Err(StackcheckError::PathError(format!(
            "project root '{}' is not a directory",
            root.display()
        )));
    }

    let table = extraction_table(rules);
    let mut files = Vec::new();
    collect_files(root, &mut files)?;
    files.sort();

    let mut outcome = ScanOutcome::default();
    for path in files {
        let class = classify(&path);
        if class == ArtifactClass::Unclassified {
            continue;
        }
        // Vanished or non-UTF-8 files are skipped for this pass.
        let Ok(text) = fs::read_to_string(&path) else {
            continue;
        };
        match class {
            ArtifactClass::Resource => {
                outcome.resource_files += 1;
                if resource_has_structure(&text) {
                    outcome.structured_resources += 1;
                }
            }
            ArtifactClass::Component => outcome.component_files += 1,
            ArtifactClass::Workflow => {
                outcome.workflow_files += 1;
                outcome.workflow_paths.push(path.clone());
            }
            ArtifactClass::Unclassified => {}
        }
        for (table_class, extraction) in &table {
            if *table_class == class {
                extraction.extract(&text, outcome.ids_mut(class));
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::RuleTable;
    use tempfile::tempdir;

    #[test]
    fn classify_resource_by_filename_or_directory() {
        assert_eq!(
            classify(Path::new("lib/app/user_resource.ex")),
            ArtifactClass::Resource
        );
        assert_eq!(
            classify(Path::new("lib/app/resources/post.ex")),
            ArtifactClass::Resource
        );
        assert_eq!(
            classify(Path::new("lib/app/repo.ex")),
            ArtifactClass::Unclassified
        );
    }

    #[test]
    fn classify_component_and_workflow() {
        assert_eq!(
            classify(Path::new("lib/web/user_card.heex")),
            ArtifactClass::Component
        );
        assert_eq!(
            classify(Path::new("pages/index.html")),
            ArtifactClass::Component
        );
        assert_eq!(
            classify(Path::new("flows/user_workflow.yaml")),
            ArtifactClass::Workflow
        );
        assert_eq!(
            classify(Path::new("bmad/steps.md")),
            ArtifactClass::Workflow
        );
        assert_eq!(
            classify(Path::new("README.md")),
            ArtifactClass::Unclassified
        );
    }

    #[test]
    fn scan_extracts_per_class_identifiers() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("lib/resources")).unwrap();
        std::fs::write(
            root.join("lib/resources/user.ex"),
            "defmodule MyApp.UserResource do\n  use Ash.Resource\n  attributes do\n  end\n  actions do\n  end\nend\n",
        )
        .unwrap();
        std::fs::write(
            root.join("lib/card.heex"),
            "<div class=\"user-card card\">...</div>",
        )
        .unwrap();
        std::fs::write(
            root.join("user_workflow.yaml"),
            "workflow: user_lifecycle\nsteps: []\n",
        )
        .unwrap();

        let rules = RuleTable::builtin();
        let outcome = scan_project(root, &rules).unwrap();
        assert!(outcome.resource_ids.contains("UserResource"));
        assert!(outcome.component_ids.contains("user-card"));
        assert!(!outcome.component_ids.contains("post-card"));
        assert!(outcome.workflow_ids.contains("user_lifecycle"));
        assert_eq!(outcome.resource_files, 1);
        assert_eq!(outcome.structured_resources, 1);
        assert_eq!(outcome.workflow_paths.len(), 1);
    }

    #[test]
    fn scan_ignores_unreadable_and_skip_directories() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("_build")).unwrap();
        std::fs::write(
            root.join("_build/ghost_resource.ex"),
            "defmodule GhostResource do\nend\n",
        )
        .unwrap();
        // Invalid UTF-8 in a file that would otherwise classify as resource.
        std::fs::write(root.join("bad_resource.ex"), [0xff, 0xfe, 0xfd]).unwrap();

        let outcome = scan_project(root, &RuleTable::builtin()).unwrap();
        assert!(outcome.resource_ids.is_empty());
        assert_eq!(outcome.resource_files, 0);
    }

    #[test]
    fn scan_rejects_missing_root() {
        let err = scan_project(Path::new("/nonexistent/tree"), &RuleTable::builtin());
        assert!(matches!(err, Err(StackcheckError::PathError(_))));
    }

    #[test]
    fn structure_probe_needs_all_markers() {
        assert!(resource_has_structure(
            "use Ash.Resource\nattributes do\nend\nactions do\nend"
        ));
        assert!(!resource_has_structure("use Ash.Resource\nattributes do"));
    }
}
