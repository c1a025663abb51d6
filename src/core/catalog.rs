//! Compiled-in check catalogs for both run modes.
//!
//! The catalog is configuration, not user input: `catalog_for` is a pure
//! function with no I/O and no error conditions. Ordering is load-bearing:
//! the orchestrator executes categories and checks exactly in catalog order,
//! and the stop-on-required-failure policy depends on that order.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Which of the two fixed catalogs a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Short checklist for incremental validation during development.
    Core,
    /// Complete verification suite for pre-release gating.
    Full,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Core => "core",
            RunMode::Full => "full",
        }
    }

    /// Per-check wall-clock budget. The full suite carries slow checks
    /// (lighthouse, browser E2E) and gets double the core budget.
    pub fn default_timeout(self) -> Duration {
        match self {
            RunMode::Core => Duration::from_secs(300),
            RunMode::Full => Duration::from_secs(600),
        }
    }
}

/// One invocable validation unit.
///
/// `script` is resolved against the project root at execution time; a missing
/// script is a soft-skip, never a failure. `url_aware` marks invocations that
/// take the run URL as a trailing argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDescriptor {
    pub name: String,
    pub program: String,
    pub script: PathBuf,
    pub required: bool,
    #[serde(default)]
    pub url_aware: bool,
}

/// Ordered group of checks sharing a priority tier and preconditions.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpec {
    pub name: String,
    pub requires_url: bool,
    pub checks: Vec<CheckDescriptor>,
}

fn check(name: &str, script: &str, required: bool) -> CheckDescriptor {
    CheckDescriptor {
        name: name.to_string(),
        program: "python3".to_string(),
        script: PathBuf::from(script),
        required,
        url_aware: false,
    }
}

fn url_check(name: &str, script: &str, required: bool) -> CheckDescriptor {
    CheckDescriptor {
        url_aware: true,
        ..check(name, script, required)
    }
}

fn category(name: &str, checks: Vec<CheckDescriptor>) -> CategorySpec {
    CategorySpec {
        name: name.to_string(),
        requires_url: false,
        checks,
    }
}

fn url_category(name: &str, checks: Vec<CheckDescriptor>) -> CategorySpec {
    CategorySpec {
        requires_url: true,
        ..category(name, checks)
    }
}

const SECURITY_SCAN: &str = ".agent/skills/vulnerability-scanner/scripts/security_scan.py";
const LINT_RUNNER: &str = ".agent/skills/lint-and-validate/scripts/lint_runner.py";
const TYPE_COVERAGE: &str = ".agent/skills/lint-and-validate/scripts/type_coverage.py";
const SCHEMA_VALIDATOR: &str = ".agent/skills/database-design/scripts/schema_validator.py";
const TEST_RUNNER: &str = ".agent/skills/testing-patterns/scripts/test_runner.py";
const UX_AUDIT: &str = ".agent/skills/frontend-design/scripts/ux_audit.py";
const ACCESSIBILITY_CHECKER: &str =
    ".agent/skills/frontend-design/scripts/accessibility_checker.py";
const LIGHTHOUSE_AUDIT: &str = ".agent/skills/performance-profiling/scripts/lighthouse_audit.py";
const PLAYWRIGHT_RUNNER: &str = ".agent/skills/webapp-testing/scripts/playwright_runner.py";

/// The ordered catalog for a run mode.
pub fn catalog_for(mode: RunMode) -> Vec<CategorySpec> {
    match mode {
        RunMode::Core => vec![
            category("Security", vec![check("Security Scan", SECURITY_SCAN, true)]),
            category("Code Quality", vec![check("Lint Check", LINT_RUNNER, true)]),
            category(
                "Data Layer",
                vec![check("Schema Validation", SCHEMA_VALIDATOR, false)],
            ),
            category("Testing", vec![check("Test Runner", TEST_RUNNER, false)]),
            category("UX & Accessibility", vec![check("UX Audit", UX_AUDIT, false)]),
            url_category(
                "Performance",
                vec![
                    url_check("Lighthouse Audit", LIGHTHOUSE_AUDIT, true),
                    url_check("Playwright E2E", PLAYWRIGHT_RUNNER, false),
                ],
            ),
        ],
        RunMode::Full => vec![
            category("Security", vec![check("Security Scan", SECURITY_SCAN, true)]),
            category(
                "Code Quality",
                vec![
                    check("Lint Check", LINT_RUNNER, true),
                    check("Type Coverage", TYPE_COVERAGE, false),
                ],
            ),
            category(
                "Data Layer",
                vec![check("Schema Validation", SCHEMA_VALIDATOR, false)],
            ),
            category("Testing", vec![check("Test Suite", TEST_RUNNER, false)]),
            category(
                "UX & Accessibility",
                vec![
                    check("UX Audit", UX_AUDIT, false),
                    check("Accessibility Check", ACCESSIBILITY_CHECKER, false),
                ],
            ),
            url_category(
                "Performance",
                vec![url_check("Lighthouse Audit", LIGHTHOUSE_AUDIT, true)],
            ),
            url_category(
                "E2E Testing",
                vec![url_check("Playwright E2E", PLAYWRIGHT_RUNNER, false)],
            ),
        ],
    }
}
