//! Top-level SDF-CVF configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BlastRadiusConfig, ClassificationThresholds, DoraConfig, GatesConfig, ParityConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SDF_*`)
/// 3. Project config (`sdf.toml` in the repository root)
/// 4. User config (`~/.sdf/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SdfConfig {
    pub parity: ParityConfig,
    pub gates: GatesConfig,
    pub blast_radius: BlastRadiusConfig,
    pub dora: DoraConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub hook_threshold: Option<f64>,
    pub high_impact_threshold: Option<f64>,
    pub dora_db_path: Option<String>,
    pub window_days: Option<u32>,
}

impl SdfConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // Unreadable user config is not fatal.
                        ::tracing::warn!(error = %e, "ignoring user config");
                    }
                }
            }
        }

        let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SdfConfig) -> Result<(), ConfigError> {
        let unit_fields = [
            ("parity.code_docs_warn", config.parity.code_docs_warn),
            ("parity.code_tests_warn", config.parity.code_tests_warn),
            ("parity.code_traces_warn", config.parity.code_traces_warn),
            ("parity.docs_weight", config.parity.docs_weight),
            ("parity.tests_weight", config.parity.tests_weight),
            ("parity.traces_weight", config.parity.traces_weight),
            ("gates.hook_threshold", config.gates.hook_threshold),
            ("dora.high_parity_cutoff", config.dora.high_parity_cutoff),
        ];
        for (field, value) in unit_fields {
            check_unit(field, value)?;
        }
        for (name, policy) in config.gates.policies() {
            check_unit(&format!("gates.{name}.parity_threshold"), policy.parity_threshold)?;
        }

        if let Some(chars) = config.parity.max_embed_chars {
            if chars == 0 {
                return Err(validation("parity.max_embed_chars", "must be greater than 0"));
            }
        }
        if let Some(threshold) = config.blast_radius.high_impact_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(validation(
                    "blast_radius.high_impact_threshold",
                    "must be a finite, non-negative number",
                ));
            }
        }
        let (docs, tests, traces) = config.parity.effective_weights();
        if docs + tests + traces <= 0.0 {
            return Err(validation("parity", "weights must sum to more than 0"));
        }
        for (field, days) in [
            ("dora.window_days", config.dora.window_days),
            ("dora.correlation_window_days", config.dora.correlation_window_days),
        ] {
            if days == Some(0) {
                return Err(validation(field, "must be greater than 0"));
            }
        }
        if let Some(samples) = config.dora.min_correlation_samples {
            if samples < 2 {
                return Err(validation("dora.min_correlation_samples", "must be at least 2"));
            }
        }
        Self::validate_classification(&config.dora.classification)
    }

    fn validate_classification(t: &ClassificationThresholds) -> Result<(), ConfigError> {
        for (field, value) in [
            ("dora.classification.elite_max_failure_rate", t.elite_max_failure_rate),
            ("dora.classification.high_max_failure_rate", t.high_max_failure_rate),
            ("dora.classification.medium_max_failure_rate", t.medium_max_failure_rate),
        ] {
            check_unit(field, Some(value))?;
        }
        if t.elite_min_frequency < t.high_min_frequency
            || t.high_min_frequency < t.medium_min_frequency
        {
            return Err(validation(
                "dora.classification",
                "minimum frequencies must not increase from ELITE to MEDIUM",
            ));
        }
        if t.elite_max_lead_time > t.high_max_lead_time
            || t.high_max_lead_time > t.medium_max_lead_time
        {
            return Err(validation(
                "dora.classification",
                "maximum lead times must not decrease from ELITE to MEDIUM",
            ));
        }
        Ok(())
    }

    /// Returns the user config path: `~/.sdf/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(constants::USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut SdfConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SdfConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    pub fn merge(base: &mut SdfConfig, other: &SdfConfig) {
        // Parity
        let (bp, op) = (&mut base.parity, &other.parity);
        if op.code_docs_warn.is_some() {
            bp.code_docs_warn = op.code_docs_warn;
        }
        if op.code_tests_warn.is_some() {
            bp.code_tests_warn = op.code_tests_warn;
        }
        if op.code_traces_warn.is_some() {
            bp.code_traces_warn = op.code_traces_warn;
        }
        if op.docs_weight.is_some() {
            bp.docs_weight = op.docs_weight;
        }
        if op.tests_weight.is_some() {
            bp.tests_weight = op.tests_weight;
        }
        if op.traces_weight.is_some() {
            bp.traces_weight = op.traces_weight;
        }
        if op.max_embed_chars.is_some() {
            bp.max_embed_chars = op.max_embed_chars;
        }

        // Gates
        if other.gates.hook_threshold.is_some() {
            base.gates.hook_threshold = other.gates.hook_threshold;
        }
        base.gates.pre_commit.merge_from(&other.gates.pre_commit);
        base.gates.pre_push.merge_from(&other.gates.pre_push);
        base.gates.pull_request.merge_from(&other.gates.pull_request);
        base.gates.deployment.merge_from(&other.gates.deployment);

        // Blast radius
        if other.blast_radius.high_impact_threshold.is_some() {
            base.blast_radius.high_impact_threshold = other.blast_radius.high_impact_threshold;
        }
        if !other.blast_radius.excluded_dirs.is_empty() {
            base.blast_radius.excluded_dirs = other.blast_radius.excluded_dirs.clone();
        }
        if other.blast_radius.respect_gitignore.is_some() {
            base.blast_radius.respect_gitignore = other.blast_radius.respect_gitignore;
        }

        // DORA
        if other.dora.db_path.is_some() {
            base.dora.db_path = other.dora.db_path.clone();
        }
        if other.dora.window_days.is_some() {
            base.dora.window_days = other.dora.window_days;
        }
        if other.dora.correlation_window_days.is_some() {
            base.dora.correlation_window_days = other.dora.correlation_window_days;
        }
        if other.dora.high_parity_cutoff.is_some() {
            base.dora.high_parity_cutoff = other.dora.high_parity_cutoff;
        }
        if other.dora.min_correlation_samples.is_some() {
            base.dora.min_correlation_samples = other.dora.min_correlation_samples;
        }
        if other.dora.classification != ClassificationThresholds::default() {
            base.dora.classification = other.dora.classification;
        }
    }

    /// Apply environment variable overrides. Only locations and windows;
    /// thresholds come from config files or CLI flags.
    fn apply_env_overrides(config: &mut SdfConfig) {
        if let Ok(val) = std::env::var("SDF_DORA_DB_PATH") {
            config.dora.db_path = Some(val);
        }
        if let Some(v) = env_parse::<u32>("SDF_DORA_WINDOW_DAYS") {
            config.dora.window_days = Some(v);
        }
        if let Some(v) = env_parse::<u32>("SDF_DORA_CORRELATION_WINDOW_DAYS") {
            config.dora.correlation_window_days = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SdfConfig, cli: &CliOverrides) {
        if let Some(v) = cli.hook_threshold {
            config.gates.hook_threshold = Some(v);
        }
        if let Some(v) = cli.high_impact_threshold {
            config.blast_radius.high_impact_threshold = Some(v);
        }
        if let Some(ref v) = cli.dora_db_path {
            config.dora.db_path = Some(v.clone());
        }
        if let Some(v) = cli.window_days {
            config.dora.window_days = Some(v);
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn check_unit(field: &str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !(0.0..=1.0).contains(&v) => {
            Err(validation(field, "must be between 0.0 and 1.0"))
        }
        _ => Ok(()),
    }
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
