//! Run report: the ordered record of check outcomes for one orchestrator
//! invocation, plus summary rendering.
//!
//! Result order is insertion order, which the orchestrator guarantees to be
//! catalog order restricted to non-skipped categories. The report owns its
//! results exclusively; nothing mutates a `CheckResult` after creation.

use crate::core::catalog::RunMode;
use crate::core::output;
use crate::core::render::Render;
use serde::Serialize;

/// Terminal classification of one considered check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed,
    Failed,
    TimedOut,
    Errored,
    Skipped,
}

impl CheckOutcome {
    /// Whether this outcome counts against the run verdict.
    /// Soft-skips never do, regardless of the `required` flag.
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            CheckOutcome::Failed | CheckOutcome::TimedOut | CheckOutcome::Errored
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            CheckOutcome::Passed => "OK",
            CheckOutcome::Failed => "FAIL",
            CheckOutcome::TimedOut => "TIMEOUT",
            CheckOutcome::Errored => "ERROR",
            CheckOutcome::Skipped => "SKIP",
        }
    }
}

/// Record produced by executing (or soft-skipping) one descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub category: String,
    pub outcome: CheckOutcome,
    pub duration_ms: u64,
    pub stdout_excerpt: String,
    pub stderr_excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_detail: Option<String>,
}

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    CompletedAllChecks,
    AbortedOnRequiredFailure,
}

/// Summary counts derived from the result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub errored: usize,
    pub skipped: usize,
}

/// The terminal artifact of one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: String,
    pub mode: RunMode,
    pub status: RunStatus,
    pub project: String,
    pub url: Option<String>,
    pub results: Vec<CheckResult>,
    pub total_duration_ms: u64,
}

impl RunReport {
    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts {
            total: self.results.len(),
            ..OutcomeCounts::default()
        };
        for result in &self.results {
            match result.outcome {
                CheckOutcome::Passed => counts.passed += 1,
                CheckOutcome::Failed => counts.failed += 1,
                CheckOutcome::TimedOut => counts.timed_out += 1,
                CheckOutcome::Errored => counts.errored += 1,
                CheckOutcome::Skipped => counts.skipped += 1,
            }
        }
        counts
    }

    /// True iff no recorded result blocks the run. Skipped categories
    /// contribute no results and therefore cannot affect the verdict.
    pub fn overall_passed(&self) -> bool {
        self.results.iter().all(|r| !r.outcome.is_blocking())
    }

    pub fn exit_code(&self) -> i32 {
        if self.overall_passed() { 0 } else { 1 }
    }

    /// Machine-consumable envelope for `--format json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "run_id": self.run_id,
            "mode": self.mode,
            "status": self.status,
            "project": self.project,
            "url": self.url,
            "overall_passed": self.overall_passed(),
            "counts": self.counts(),
            "total_duration_ms": self.total_duration_ms,
            "results": self.results,
        })
    }
}

const DETAIL_DISPLAY_CHARS: usize = 200;

fn format_seconds(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

/// Render the human-readable summary table and verdict.
///
/// Full-suite reports group rows by category (label printed once per
/// contiguous group); execution order within a category is preserved.
pub fn render_text(report: &RunReport, render: &mut dyn Render) {
    let counts = report.counts();
    let broken = counts.failed + counts.timed_out + counts.errored;

    render.line("");
    match report.mode {
        RunMode::Core => render.header("CHECKLIST SUMMARY"),
        RunMode::Full => render.header("FULL VERIFICATION REPORT"),
    }
    render.line(&format!(
        "Total Duration: {}",
        format_seconds(report.total_duration_ms)
    ));
    render.line(&format!("Total Checks: {}", counts.total));
    render.line(&format!("Passed:  {}", counts.passed));
    render.line(&format!("Failed:  {}", broken));
    render.line(&format!("Skipped: {}", counts.skipped));
    render.line("");

    let name_width = report
        .results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);
    let group_by_category = matches!(report.mode, RunMode::Full);
    let mut current_category = "";
    for result in &report.results {
        let category_cell = if group_by_category {
            let cell = if result.category == current_category {
                String::new()
            } else {
                result.category.clone()
            };
            current_category = &result.category;
            format!("{:<20} ", cell)
        } else {
            String::new()
        };
        let duration_cell = if result.outcome == CheckOutcome::Skipped {
            "-".to_string()
        } else {
            format_seconds(result.duration_ms)
        };
        let padded = format!("{:<width$}", result.name, width = name_width);
        render.outcome_row(
            result.outcome,
            &format!("{}{}  {}", category_cell, padded, duration_cell),
        );
    }
    render.line("");

    if broken > 0 {
        render.error("FAILED CHECKS:");
        for result in &report.results {
            if result.outcome.is_blocking() {
                render.error(&format!("- {} [{}]", result.name, result.category));
                if let Some(detail) = &result.failure_detail {
                    render.line(&format!(
                        "  {}",
                        output::compact_line(detail, DETAIL_DISPLAY_CHARS)
                    ));
                }
            }
        }
        render.line("");
    }

    if report.status == RunStatus::AbortedOnRequiredFailure {
        render.warn("Run aborted on required-check failure; remaining checks were not executed");
    }

    if broken > 0 {
        render.error(&format!("{} check(s) FAILED", broken));
        if report.mode == RunMode::Full {
            render.warn("Tip: fix critical (security, lint) issues first");
        }
    } else {
        match report.mode {
            RunMode::Core => render.success("All checks PASSED"),
            RunMode::Full => render.success("ALL CHECKS PASSED - Ready for deployment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::BufferRender;

    fn result(name: &str, category: &str, outcome: CheckOutcome) -> CheckResult {
        CheckResult {
            name: name.to_string(),
            category: category.to_string(),
            outcome,
            duration_ms: if outcome == CheckOutcome::Skipped { 0 } else { 1200 },
            stdout_excerpt: String::new(),
            stderr_excerpt: String::new(),
            failure_detail: outcome
                .is_blocking()
                .then(|| format!("{} detail", name)),
        }
    }

    fn report(mode: RunMode, results: Vec<CheckResult>) -> RunReport {
        RunReport {
            run_id: "01J00000000000000000000000".to_string(),
            mode,
            status: RunStatus::CompletedAllChecks,
            project: "/tmp/project".to_string(),
            url: None,
            results,
            total_duration_ms: 4321,
        }
    }

    #[test]
    fn verdict_tracks_blocking_outcomes_only() {
        let passing = report(
            RunMode::Core,
            vec![
                result("a", "Security", CheckOutcome::Passed),
                result("b", "Testing", CheckOutcome::Skipped),
            ],
        );
        assert!(passing.overall_passed());
        assert_eq!(passing.exit_code(), 0);

        for blocking in [
            CheckOutcome::Failed,
            CheckOutcome::TimedOut,
            CheckOutcome::Errored,
        ] {
            let failing = report(
                RunMode::Core,
                vec![
                    result("a", "Security", CheckOutcome::Passed),
                    result("b", "Testing", blocking),
                ],
            );
            assert!(!failing.overall_passed(), "{:?} must block", blocking);
            assert_eq!(failing.exit_code(), 1);
        }
    }

    #[test]
    fn counts_partition_the_result_list() {
        let r = report(
            RunMode::Full,
            vec![
                result("a", "Security", CheckOutcome::Passed),
                result("b", "Code Quality", CheckOutcome::Failed),
                result("c", "Testing", CheckOutcome::TimedOut),
                result("d", "Testing", CheckOutcome::Errored),
                result("e", "Data Layer", CheckOutcome::Skipped),
            ],
        );
        let counts = r.counts();
        assert_eq!(counts.total, 5);
        assert_eq!(counts.passed, 1);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.timed_out, 1);
        assert_eq!(counts.errored, 1);
        assert_eq!(counts.skipped, 1);
    }

    #[test]
    fn json_envelope_carries_per_result_records() {
        let r = report(
            RunMode::Core,
            vec![result("Lint Check", "Code Quality", CheckOutcome::Failed)],
        );
        let value = r.to_json();
        assert_eq!(value["mode"], "core");
        assert_eq!(value["overall_passed"], false);
        assert_eq!(value["counts"]["failed"], 1);
        let row = &value["results"][0];
        assert_eq!(row["name"], "Lint Check");
        assert_eq!(row["category"], "Code Quality");
        assert_eq!(row["outcome"], "failed");
        assert_eq!(row["duration_ms"], 1200);
        assert_eq!(row["failure_detail"], "Lint Check detail");
    }

    #[test]
    fn full_mode_table_prints_each_category_once_per_group() {
        let r = report(
            RunMode::Full,
            vec![
                result("Lint Check", "Code Quality", CheckOutcome::Passed),
                result("Type Coverage", "Code Quality", CheckOutcome::Passed),
                result("Test Suite", "Testing", CheckOutcome::Passed),
            ],
        );
        let mut sink = BufferRender::default();
        render_text(&r, &mut sink);
        let text = sink.lines.join("\n");
        assert_eq!(text.matches("Code Quality").count(), 1);
        assert_eq!(text.matches("Testing").count(), 1);
    }

    #[test]
    fn failure_details_are_listed_and_truncated() {
        let mut failing = result("Lint Check", "Code Quality", CheckOutcome::Failed);
        failing.failure_detail = Some("e".repeat(500));
        let r = report(RunMode::Core, vec![failing]);

        let mut sink = BufferRender::default();
        render_text(&r, &mut sink);
        let detail_line = sink
            .lines
            .iter()
            .find(|l| l.trim_start().starts_with('e'))
            .expect("detail line rendered");
        assert!(detail_line.trim().chars().count() <= 203);
        assert!(detail_line.ends_with("..."));
    }
}
