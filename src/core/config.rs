//! Optional per-project configuration, loaded from `.gauntlet.toml` at the
//! project root.
//!
//! The compiled-in catalog is always the baseline; config can only lengthen
//! the check budget, append extra checks, and tighten the missing-required
//! policy. No config file means compiled-in defaults (not an error).

use crate::core::catalog::{CategorySpec, CheckDescriptor};
use crate::core::error::GauntletError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = ".gauntlet.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Overrides the run mode's default per-check timeout.
    pub timeout_secs: Option<u64>,
    /// Treat an absent required check as `Errored` instead of `Skipped`.
    /// Off by default: absence is a soft-skip and never gates the run.
    #[serde(default)]
    pub missing_required_blocks: bool,
    /// Extra checks appended after the compiled-in checks of their category.
    #[serde(default)]
    pub check: Vec<ExtraCheck>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraCheck {
    pub name: String,
    pub category: String,
    pub program: String,
    pub script: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub url_aware: bool,
}

/// Load `.gauntlet.toml` if present; absent file yields defaults.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig, GauntletError> {
    let path = project_root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    let content = fs::read_to_string(&path).map_err(GauntletError::Io)?;
    toml::from_str(&content)
        .map_err(|e| GauntletError::Config(format!("{}: {}", CONFIG_FILE, e)))
}

/// Append config-declared checks to the catalog.
///
/// A check naming an existing category lands at the end of that category;
/// an unknown category name creates a new category after the compiled-in
/// ones, URL-gated iff the check is URL-aware. Compiled-in ordering is
/// never disturbed.
pub fn apply_extensions(catalog: &mut Vec<CategorySpec>, config: &ProjectConfig) {
    for extra in &config.check {
        let descriptor = CheckDescriptor {
            name: extra.name.clone(),
            program: extra.program.clone(),
            script: extra.script.clone().into(),
            required: extra.required,
            url_aware: extra.url_aware,
        };
        match catalog.iter_mut().find(|c| c.name == extra.category) {
            Some(category) => category.checks.push(descriptor),
            None => catalog.push(CategorySpec {
                name: extra.category.clone(),
                requires_url: extra.url_aware,
                checks: vec![descriptor],
            }),
        }
    }
}
