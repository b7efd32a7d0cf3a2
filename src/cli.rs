//! CLI struct definitions for the stackcheck command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "stackcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "Cross-artifact consistency checker for Ash + DaisyUI + BMAD project trees"
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Run the full check battery over a project tree and render a report
    Validate(ValidateCli),
    /// Walk a project tree and show what the scanner classified and extracted
    Scan(ScanCli),
    /// Print the resolved rule table
    Rules(RulesCli),
}

#[derive(clap::Args, Debug)]
pub(crate) struct ValidateCli {
    /// Project root to validate (defaults to the current directory).
    #[clap(long, default_value = ".")]
    pub root: PathBuf,
    /// Load the rule table from a TOML file instead of the built-in table.
    #[clap(long)]
    pub rules: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ScanCli {
    /// Project root to scan (defaults to the current directory).
    #[clap(long, default_value = ".")]
    pub root: PathBuf,
    /// Load the rule table from a TOML file instead of the built-in table.
    #[clap(long)]
    pub rules: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct RulesCli {
    /// Load the rule table from a TOML file instead of the built-in table.
    #[clap(long)]
    pub rules: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}
