//! Stackcheck: cross-artifact consistency checking for layered project trees.
//!
//! A project built on Ash resources, DaisyUI components, and BMAD workflow
//! documents names the same logical entity three times, in three dialects:
//! `UserResource` in the backend, `user-card` in the markup, `user_lifecycle`
//! in the workflow docs. Stackcheck holds the declared correspondence in a
//! rule table, mines each artifact class for the identifiers it actually
//! contains, and reports where the layers disagree.
//!
//! # Design
//!
//! - **Rule table is data**: a built-in default or a TOML file, never code.
//! - **Shallow extraction**: substring and regex matching only; no parsing of
//!   the scanned languages, false negatives accepted.
//! - **Independent checks**: a fixed registry of pure checks that all run on
//!   every pass; one report always covers the full battery.
//! - **Stateless**: every invocation re-walks the tree; identical trees yield
//!   identical reports.
//!
//! # Crate Structure
//!
//! - [`core::rules`]: the declarative entity/palette/action rule table
//! - [`core::scan`]: filesystem walk, classification, identifier extraction
//! - [`core::checks`]: the check battery and its registry
//! - [`core::report`]: aggregation and rendering
//! - [`core::validate`]: the single `validate(root, rules)` entry point

pub mod core;

mod cli;

use crate::cli::{Cli, Command, RulesCli, ScanCli, ValidateCli};
use crate::core::error::StackcheckError;
use crate::core::report::{self, Report};
use crate::core::rules::RuleTable;
use crate::core::scan::{self, ScanSummary};
use crate::core::validate;
use clap::Parser;
use std::path::Path;

/// Parse the CLI and dispatch. The binary maps an `Err` to a non-zero exit.
pub fn run() -> Result<(), StackcheckError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Scan(args) => run_scan(args),
        Command::Rules(args) => run_rules(args),
    }
}

fn resolve_rules(path: Option<&Path>) -> Result<RuleTable, StackcheckError> {
    match path {
        Some(p) => RuleTable::load(p),
        None => Ok(RuleTable::builtin()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, StackcheckError> {
    serde_json::to_string_pretty(value).map_err(|e| StackcheckError::ValidationError(e.to_string()))
}

fn run_validate(args: ValidateCli) -> Result<(), StackcheckError> {
    let rules = resolve_rules(args.rules.as_deref())?;
    let report: Report = validate::validate(&args.root, &rules)?;

    if args.format == "json" {
        println!("{}", to_json(&report)?);
    } else {
        print!("{}", report::render_text(&report));
    }

    if !report.overall_passed {
        let failed = report.checks.iter().filter(|c| !c.passed).count();
        return Err(StackcheckError::ValidationError(format!(
            "{} check(s) failed",
            failed
        )));
    }
    Ok(())
}

fn run_scan(args: ScanCli) -> Result<(), StackcheckError> {
    let rules = resolve_rules(args.rules.as_deref())?;
    let outcome = scan::scan_project(&args.root, &rules)?;
    let summary: ScanSummary = outcome.summary();

    if args.format == "json" {
        println!("{}", to_json(&summary)?);
    } else {
        println!(
            "Scanned {} resource, {} component, {} workflow file(s)",
            summary.resource_files, summary.component_files, summary.workflow_files
        );
        println!(
            "Structurally complete resources: {}",
            summary.structured_resources
        );
        println!("Resource identifiers:  {}", summary.resource_ids.join(", "));
        println!("Component identifiers: {}", summary.component_ids.join(", "));
        println!("Workflow identifiers:  {}", summary.workflow_ids.join(", "));
    }
    Ok(())
}

fn run_rules(args: RulesCli) -> Result<(), StackcheckError> {
    let rules = resolve_rules(args.rules.as_deref())?;

    if args.format == "json" {
        println!("{}", to_json(&rules)?);
        return Ok(());
    }

    println!("Entity mappings:");
    for m in &rules.mappings {
        println!(
            "  {} -> resource {} | component {} | workflow {}",
            m.logical_name, m.resource_id, m.component_id, m.workflow_id
        );
    }
    if !rules.palette.is_empty() {
        println!("Palette:");
        for entry in &rules.palette {
            println!("  {} = {}", entry.token_name, entry.token_value);
        }
    }
    if !rules.actions.is_empty() {
        println!("Action styles:");
        for style in &rules.actions {
            println!(
                "  {} -> {} ({})",
                style.action, style.modifier, style.button_class
            );
        }
    }
    Ok(())
}
