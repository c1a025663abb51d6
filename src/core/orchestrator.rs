//! Drives one run: walks the catalog in order, applies gating and abort
//! policy, and accumulates the result list.
//!
//! Execution is strictly sequential. Checks may mutate shared project state
//! (dependency installs, temp files, preview-server ports), so running them
//! concurrently would make failure attribution nondeterministic. The result
//! list is the only mutable run state and only this module appends to it.

use crate::core::catalog::{CategorySpec, RunMode};
use crate::core::executor::{self, ExecRequest};
use crate::core::render::Render;
use crate::core::report::{CheckOutcome, CheckResult, RunReport, RunStatus};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use ulid::Ulid;

/// Gating and abort policy for one run.
#[derive(Debug, Clone, Copy)]
pub struct RunPolicy {
    /// Abort the run as soon as a required check fails, times out, or errors.
    pub stop_on_required_failure: bool,
    /// Skip URL-gated categories even when a URL was supplied.
    pub skip_url_gated: bool,
    /// Record an absent required check as `Errored` instead of `Skipped`.
    /// Defaults off: absence is a soft-skip and never gates the run, even
    /// for required checks. Only the executed-and-failed path gates.
    pub missing_required_blocks: bool,
}

/// Everything a run needs, resolved before the first check executes.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub mode: RunMode,
    pub project_root: PathBuf,
    pub url: Option<String>,
    pub timeout: Duration,
    pub policy: RunPolicy,
    /// Categories skipped by name for this run (e.g. E2E via `--no-e2e`).
    pub skip_categories: Vec<String>,
    pub catalog: Vec<CategorySpec>,
}

/// Execute the run to one of its two terminal states.
///
/// Never returns `Err`: executor-level faults become `Errored` results and
/// the report is always complete for whatever was considered before a stop.
pub fn run(req: &RunRequest, render: &mut dyn Render) -> RunReport {
    let started = Instant::now();
    let mut report = RunReport {
        run_id: Ulid::new().to_string(),
        mode: req.mode,
        status: RunStatus::CompletedAllChecks,
        project: req.project_root.display().to_string(),
        url: req.url.clone(),
        results: Vec::new(),
        total_duration_ms: 0,
    };

    'categories: for category in &req.catalog {
        let url_gated_out =
            category.requires_url && (req.url.is_none() || req.policy.skip_url_gated);
        if url_gated_out || req.skip_categories.contains(&category.name) {
            // Conditionally applicable, not a failure: the category's checks
            // never appear in the report.
            continue;
        }

        render.line("");
        render.header(&category.name.to_uppercase());

        for descriptor in &category.checks {
            render.step(&format!("Running: {}", descriptor.name));
            let mut result = executor::execute(&ExecRequest {
                descriptor,
                category: &category.name,
                project_root: &req.project_root,
                url: req.url.as_deref(),
                timeout: req.timeout,
            });

            if result.outcome == CheckOutcome::Skipped
                && descriptor.required
                && req.policy.missing_required_blocks
            {
                result.outcome = CheckOutcome::Errored;
                result.failure_detail = Some(format!(
                    "required check tool is missing: {}",
                    descriptor.script.display()
                ));
            }

            narrate(render, &result);
            let blocking = descriptor.required
                && result.outcome.is_blocking()
                && req.policy.stop_on_required_failure;
            let name = result.name.clone();
            report.results.push(result);

            if blocking {
                render.error(&format!("CRITICAL: {} failed. Stopping run.", name));
                report.status = RunStatus::AbortedOnRequiredFailure;
                break 'categories;
            }
        }
    }

    report.total_duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    report
}

fn narrate(render: &mut dyn Render, result: &CheckResult) {
    let seconds = result.duration_ms as f64 / 1000.0;
    match result.outcome {
        CheckOutcome::Passed => {
            render.success(&format!("{}: PASSED ({:.1}s)", result.name, seconds));
        }
        CheckOutcome::Failed => {
            render.error(&format!("{}: FAILED ({:.1}s)", result.name, seconds));
            if let Some(detail) = &result.failure_detail {
                render.line(&format!("  {}", detail));
            }
        }
        CheckOutcome::TimedOut => {
            render.error(&format!("{}: TIMEOUT (>{:.0}s)", result.name, seconds));
        }
        CheckOutcome::Errored => {
            let detail = result.failure_detail.as_deref().unwrap_or("unknown error");
            render.error(&format!("{}: ERROR - {}", result.name, detail));
        }
        CheckOutcome::Skipped => {
            render.warn(&format!("{}: script not found, skipping", result.name));
        }
    }
}
