//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use coursefit_core::profile::{ConfidenceThresholds, ScoringProfile};

/// Top-level coursefit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursefitConfig {
    /// External question bank; the built-in bank is used when unset.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Output format for `recommend` when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Overrides for the advice tiers and the inconclusive cutoff.
    #[serde(default)]
    pub thresholds: Option<ConfidenceThresholds>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for CoursefitConfig {
    fn default() -> Self {
        Self {
            bank: None,
            log_level: default_log_level(),
            default_format: default_format(),
            thresholds: None,
        }
    }
}

impl CoursefitConfig {
    /// The scoring profile with any threshold overrides applied.
    pub fn profile(&self) -> Result<ScoringProfile> {
        let profile = ScoringProfile::ib_math();
        match self.thresholds {
            Some(thresholds) => profile
                .with_thresholds(thresholds)
                .context("invalid [thresholds] in config"),
            None => Ok(profile),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `coursefit.toml` in the current directory
/// 2. `~/.config/coursefit/config.toml`
///
/// `COURSEFIT_BANK` overrides the bank path from any file.
pub fn load_config_from(path: Option<&Path>) -> Result<CoursefitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("coursefit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CoursefitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CoursefitConfig::default(),
    };

    if let Ok(bank) = std::env::var("COURSEFIT_BANK") {
        if !bank.is_empty() {
            config.bank = Some(PathBuf::from(bank));
        }
    }

    config.bank = config
        .bank
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    if let Some(thresholds) = &config.thresholds {
        thresholds
            .validate()
            .context("invalid [thresholds] in config")?;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("coursefit"))
}
