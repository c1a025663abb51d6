//! CLI struct definitions for the gauntlet command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "gauntlet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Priority-ordered validation gauntlet for project checkouts"
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Run the core checklist (incremental validation during development)
    #[clap(name = "core", visible_alias = "c")]
    Core(CoreCli),

    /// Run the complete verification suite (pre-release gate)
    #[clap(name = "full", visible_alias = "f")]
    Full(FullCli),

    /// Show the check catalog for a run mode
    #[clap(name = "list", visible_alias = "l")]
    List(ListCli),
}

#[derive(clap::Args, Debug)]
pub(crate) struct CoreCli {
    /// Project path to validate
    pub project: PathBuf,
    /// URL for performance checks (lighthouse, playwright)
    #[clap(long)]
    pub url: Option<String>,
    /// Skip performance checks even if a URL is provided
    #[clap(long)]
    pub skip_performance: bool,
    /// Keep running after a required check fails (default is to stop)
    #[clap(long = "no-stop-on-fail", action = clap::ArgAction::SetFalse, default_value_t = true)]
    pub stop_on_fail: bool,
    /// Output format: 'text' or 'json'
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct FullCli {
    /// Project path to validate
    pub project: PathBuf,
    /// URL for performance & E2E checks (required for the full suite)
    #[clap(long)]
    pub url: Option<String>,
    /// Skip E2E tests
    #[clap(long)]
    pub no_e2e: bool,
    /// Stop on first required-check failure
    #[clap(long)]
    pub stop_on_fail: bool,
    /// Output format: 'text' or 'json'
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ListCli {
    /// Run mode catalog to show: 'core' or 'full'
    #[clap(long, default_value = "core")]
    pub mode: String,
    /// Output format: 'text' or 'json'
    #[clap(long, default_value = "text")]
    pub format: String,
}
