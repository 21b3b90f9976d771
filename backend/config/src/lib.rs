//! `nutriscan-config`: runtime configuration for the label analyzer.
//!
//! Provides:
//! - Typed config schema (server, OCR collaborator, normalization, alerts, logging)
//! - YAML loading with `${ENV_VAR}` substitution
//! - `NUTRISCAN_*` environment overrides
//! - Default value application
//! - Validation with user-friendly messages

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    apply_env_overrides, apply_env_overrides_with, resolve_env_vars, resolve_env_vars_with,
    MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use schema::NutriScanConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::Result;
use std::path::Path;

/// Load, substitute env vars, apply env overrides and defaults, then validate.
///
/// Nothing is logged; the caller decides what to do with the report.
pub async fn load_with_report(path: &Path) -> Result<(NutriScanConfig, ValidationReport)> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config);
    let config = apply_all_defaults(config);
    let report = validate(&config);
    Ok((config, report))
}

/// [`load_with_report`] with the report logged. Install a subscriber first.
pub async fn load_and_prepare(path: &Path) -> Result<NutriScanConfig> {
    let (config, report) = load_with_report(path).await?;
    tracing::info!(path = %path.display(), "Loaded config");
    report.log();
    Ok(config)
}
