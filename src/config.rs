use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::aggregate::TOP_N;
use crate::data::resolve::MissingValuePolicy;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "REPO_DASH_CONFIG";
/// Config file looked up in the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "repo-dash.json";

/// Start-up settings for the dashboard.
///
/// ```json
/// { "dataset": "github_dataset.csv", "policy": "fill_default", "top_n": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Dataset opened at start-up; without one the user picks a file.
    pub dataset: Option<PathBuf>,
    /// Initial missing-value policy.
    pub policy: MissingValuePolicy,
    /// Length of the star ranking.
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            policy: MissingValuePolicy::default(),
            top_n: TOP_N,
        }
    }
}

impl DashboardConfig {
    /// Load from `$REPO_DASH_CONFIG`, else `./repo-dash.json`, else defaults.
    ///
    /// A file named by the variable must exist; the default file is optional.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE}; using default settings");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}
