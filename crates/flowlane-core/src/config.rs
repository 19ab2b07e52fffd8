use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::graph::LayerOrder;

/// File name searched for in the working directory and its ancestors.
pub const PROJECT_CONFIG_FILE: &str = "flowlane.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub layers: LayerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    pub order: LayerOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `pretty`, `text` or `json`. Validated by the CLI.
    #[serde(default)]
    pub format: Option<String>,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Project(PathBuf),
    User(PathBuf),
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Project(path) | Self::User(path) => {
                write!(f, "{}", path.display())
            }
            Self::Default => f.write_str("defaults"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub config: FlowConfig,
    pub source: ConfigSource,
}

/// Read and parse one config file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid TOML for [`FlowConfig`].
pub fn load_config(path: &Path) -> Result<FlowConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<FlowConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Nearest `flowlane.toml` in `start` or one of its ancestors.
#[must_use]
pub fn discover_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// `<config_dir>/flowlane/config.toml`, when the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flowlane/config.toml"))
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Otherwise the nearest project file wins over
/// the user file, and defaults apply when neither exists.
///
/// # Errors
///
/// Fails if the chosen file cannot be read or parsed.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<EffectiveConfig> {
    resolve_config_with(explicit, cwd, user_config_path())
}

fn resolve_config_with(
    explicit: Option<&Path>,
    cwd: &Path,
    user_path: Option<PathBuf>,
) -> Result<EffectiveConfig> {
    let (config, source) = if let Some(path) = explicit {
        (load_config(path)?, ConfigSource::Explicit(path.to_path_buf()))
    } else if let Some(path) = discover_project_config(cwd) {
        (load_config(&path)?, ConfigSource::Project(path))
    } else if let Some(path) = user_path.filter(|p| p.is_file()) {
        (load_config(&path)?, ConfigSource::User(path))
    } else {
        (FlowConfig::default(), ConfigSource::Default)
    };

    debug!(source = %source, order = %config.layers.order, "config resolved");
    Ok(EffectiveConfig { config, source })
}
