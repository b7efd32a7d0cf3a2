//! Rule table: the declared correspondence between logical entities and
//! their expected identifiers in each artifact class.
//!
//! The table is data, not code: a built-in default covers the stock
//! user/post entities, and `--rules <file>` swaps in a TOML table with the
//! same shape so projects can declare their own mappings.

use crate::core::error::StackcheckError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// One logical entity and its expected identifier in each artifact class.
///
/// `logical_name` is the join key across classes and must be unique within
/// a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMapping {
    pub logical_name: String,
    pub resource_id: String,
    pub component_id: String,
    pub workflow_id: String,
}

impl EntityMapping {
    /// A mapping is complete when every identifier field is declared.
    pub fn is_complete(&self) -> bool {
        !self.resource_id.is_empty()
            && !self.component_id.is_empty()
            && !self.workflow_id.is_empty()
    }
}

/// A named theme token expected to propagate verbatim (by value, not name)
/// across the project's configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub token_name: String,
    pub token_value: String,
}

/// Display convention for one UI action (view modifier + button class).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStyle {
    pub action: String,
    pub modifier: String,
    pub button_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub mappings: Vec<EntityMapping>,
    #[serde(default)]
    pub palette: Vec<PaletteEntry>,
    #[serde(default)]
    pub actions: Vec<ActionStyle>,
}

impl RuleTable {
    /// Stock rule table for the default entity pair.
    pub fn builtin() -> Self {
        RuleTable {
            mappings: vec![
                EntityMapping {
                    logical_name: "user".to_string(),
                    resource_id: "UserResource".to_string(),
                    component_id: "user-card".to_string(),
                    workflow_id: "user_lifecycle".to_string(),
                },
                EntityMapping {
                    logical_name: "post".to_string(),
                    resource_id: "PostResource".to_string(),
                    component_id: "post-card".to_string(),
                    workflow_id: "post_lifecycle".to_string(),
                },
            ],
            palette: vec![
                PaletteEntry {
                    token_name: "primary".to_string(),
                    token_value: "hsl(222.2 47.4% 11.2%)".to_string(),
                },
                PaletteEntry {
                    token_name: "secondary".to_string(),
                    token_value: "hsl(210 40% 96%)".to_string(),
                },
                PaletteEntry {
                    token_name: "accent".to_string(),
                    token_value: "hsl(210 40% 96%)".to_string(),
                },
                PaletteEntry {
                    token_name: "neutral".to_string(),
                    token_value: "hsl(215.4 16.3% 46.9%)".to_string(),
                },
            ],
            actions: vec![
                action_style("show", "detail", "btn-primary"),
                action_style("list", "list", "btn-secondary"),
                action_style("create", "form", "btn-success"),
                action_style("edit", "form", "btn-warning"),
            ],
        }
    }

    /// Load a rule table from a TOML file and reject malformed tables
    /// before any scanning starts.
    pub fn load(path: &Path) -> Result<Self, StackcheckError> {
        let content = fs::read_to_string(path).map_err(|e| {
            StackcheckError::RulesError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let table: RuleTable = toml::from_str(&content).map_err(|e| {
            StackcheckError::RulesError(format!("invalid rule table {}: {}", path.display(), e))
        })?;
        table.ensure_valid()?;
        Ok(table)
    }

    /// Logical names must be present and unique; they are the join key.
    pub fn ensure_valid(&self) -> Result<(), StackcheckError> {
        let mut seen = BTreeSet::new();
        for mapping in &self.mappings {
            if mapping.logical_name.is_empty() {
                return Err(StackcheckError::RulesError(
                    "mapping with empty logical_name".to_string(),
                ));
            }
            if !seen.insert(mapping.logical_name.as_str()) {
                return Err(StackcheckError::RulesError(format!(
                    "duplicate logical_name '{}'",
                    mapping.logical_name
                )));
            }
        }
        Ok(())
    }

    /// Declared component identifiers, used as the scanner's allow-list.
    pub fn component_ids(&self) -> Vec<&str> {
        self.mappings
            .iter()
            .map(|m| m.component_id.as_str())
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// Declared workflow identifiers, used as the scanner's allow-list.
    pub fn workflow_ids(&self) -> Vec<&str> {
        self.mappings
            .iter()
            .map(|m| m.workflow_id.as_str())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

fn action_style(action: &str, modifier: &str, button_class: &str) -> ActionStyle {
    ActionStyle {
        action: action.to_string(),
        modifier: modifier.to_string(),
        button_class: button_class.to_string(),
    }
}
