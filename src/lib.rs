//! Gauntlet: a tiered validation orchestrator.
//!
//! Gauntlet runs a fixed, priority-ordered sequence of external validation
//! checks (security scan, lint, schema validation, tests, UX audit,
//! performance audit, end-to-end tests) against a target project and folds
//! the outcomes into a single pass/fail verdict with a structured report.
//!
//! The checks themselves are opaque collaborators: each one is an executable
//! that receives the project path (and, for URL-aware checks, a target URL)
//! and signals success with exit code 0. Gauntlet owns the ordering, the
//! mandatory-vs-advisory policy, URL precondition gating, per-check
//! wall-clock budgets, outcome classification, and the final report.
//!
//! # Run modes
//!
//! - `gauntlet core <project>`: the short checklist for incremental
//!   validation during development. Stops on the first required-check
//!   failure by default.
//! - `gauntlet full <project> --url <URL>`: the complete pre-release suite,
//!   including type coverage, accessibility, performance, and E2E tiers.
//!
//! # Exit codes
//!
//! - `0`: every executed check passed (soft-skipped checks never count)
//! - `1`: at least one executed check failed, timed out, or errored
//! - `2`: usage or configuration error; no checks were executed
//!
//! # Crate structure
//!
//! - [`core::catalog`]: compiled-in check catalogs per run mode
//! - [`core::executor`]: bounded child-process execution and classification
//! - [`core::orchestrator`]: gating, abort policy, result accumulation
//! - [`core::report`] / [`core::render`]: summary, verdict, rendering seam

pub mod core;

mod cli;

use crate::cli::{Cli, Command, CoreCli, FullCli, ListCli};
use crate::core::catalog::{self, RunMode};
use crate::core::config;
use crate::core::error::GauntletError;
use crate::core::orchestrator::{self, RunPolicy, RunRequest};
use crate::core::render::{ConsoleRender, NullRender, Render};
use crate::core::report;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(raw: &str) -> Result<OutputFormat, GauntletError> {
    match raw {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(GauntletError::Usage(format!(
            "unknown format '{}' (expected 'text' or 'json')",
            other
        ))),
    }
}

fn resolve_project_root(raw: &Path) -> Result<PathBuf, GauntletError> {
    if !raw.exists() {
        return Err(GauntletError::Usage(format!(
            "project path does not exist: {}",
            raw.display()
        )));
    }
    raw.canonicalize().map_err(GauntletError::Io)
}

/// Parse the CLI and run the selected command, returning the process exit
/// code for a completed run. `Err` means a usage/configuration fault before
/// any check executed.
pub fn run() -> Result<i32, GauntletError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Core(args) => run_core(args),
        Command::Full(args) => run_full(args),
        Command::List(args) => run_list(args),
    }
}

fn run_core(args: CoreCli) -> Result<i32, GauntletError> {
    let format = parse_format(&args.format)?;
    let project_root = resolve_project_root(&args.project)?;
    let project_config = config::load_project_config(&project_root)?;

    let mode = RunMode::Core;
    let mut catalog = catalog::catalog_for(mode);
    config::apply_extensions(&mut catalog, &project_config);

    let request = RunRequest {
        mode,
        project_root,
        url: args.url,
        timeout: timeout_for(mode, &project_config),
        policy: RunPolicy {
            stop_on_required_failure: args.stop_on_fail,
            skip_url_gated: args.skip_performance,
            missing_required_blocks: project_config.missing_required_blocks,
        },
        skip_categories: Vec::new(),
        catalog,
    };
    execute_and_report(&request, format, "MASTER CHECKLIST")
}

fn run_full(args: FullCli) -> Result<i32, GauntletError> {
    let format = parse_format(&args.format)?;
    let url = args.url.ok_or_else(|| {
        GauntletError::Usage("the full suite requires --url for performance & E2E checks".into())
    })?;
    let project_root = resolve_project_root(&args.project)?;
    let project_config = config::load_project_config(&project_root)?;

    let mode = RunMode::Full;
    let mut catalog = catalog::catalog_for(mode);
    config::apply_extensions(&mut catalog, &project_config);

    let request = RunRequest {
        mode,
        project_root,
        url: Some(url),
        timeout: timeout_for(mode, &project_config),
        policy: RunPolicy {
            stop_on_required_failure: args.stop_on_fail,
            skip_url_gated: false,
            missing_required_blocks: project_config.missing_required_blocks,
        },
        skip_categories: if args.no_e2e {
            vec!["E2E Testing".to_string()]
        } else {
            Vec::new()
        },
        catalog,
    };
    execute_and_report(&request, format, "FULL VERIFICATION SUITE")
}

fn timeout_for(mode: RunMode, project_config: &config::ProjectConfig) -> Duration {
    project_config
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| mode.default_timeout())
}

fn execute_and_report(
    request: &RunRequest,
    format: OutputFormat,
    banner: &str,
) -> Result<i32, GauntletError> {
    let report = match format {
        OutputFormat::Text => {
            let mut render = ConsoleRender;
            render_run_header(&mut render, request, banner);
            let report = orchestrator::run(request, &mut render);
            report::render_text(&report, &mut render);
            report
        }
        OutputFormat::Json => {
            let report = orchestrator::run(request, &mut NullRender);
            println!("{}", serde_json::to_string_pretty(&report.to_json()).unwrap_or_default());
            report
        }
    };
    Ok(report.exit_code())
}

fn render_run_header(render: &mut dyn Render, request: &RunRequest, banner: &str) {
    render.header(&format!("GAUNTLET - {}", banner));
    render.line(&format!("Project: {}", request.project_root.display()));
    match &request.url {
        Some(url) => render.line(&format!("URL: {}", url)),
        None => render.line("URL: not provided (URL-gated checks skipped)"),
    }
    render.line(&format!("Started: {}", now_epoch_z()));
}

/// Unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
fn now_epoch_z() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}

fn run_list(args: ListCli) -> Result<i32, GauntletError> {
    let format = parse_format(&args.format)?;
    let mode = match args.mode.as_str() {
        "core" => RunMode::Core,
        "full" => RunMode::Full,
        other => {
            return Err(GauntletError::Usage(format!(
                "unknown mode '{}' (expected 'core' or 'full')",
                other
            )));
        }
    };

    let catalog = catalog::catalog_for(mode);
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "mode": mode,
                "timeout_secs": mode.default_timeout().as_secs(),
                "categories": catalog,
            });
            println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        }
        OutputFormat::Text => {
            let mut render = ConsoleRender;
            render.header(&format!("{} CATALOG", mode.as_str().to_uppercase()));
            for category in &catalog {
                let gate = if category.requires_url { " (requires URL)" } else { "" };
                render.line(&format!("{}{}", category.name, gate));
                for descriptor in &category.checks {
                    let req = if descriptor.required { "required" } else { "optional" };
                    render.line(&format!(
                        "  - {} [{}] {} {}",
                        descriptor.name,
                        req,
                        descriptor.program,
                        descriptor.script.display()
                    ));
                }
            }
        }
    }
    Ok(0)
}
