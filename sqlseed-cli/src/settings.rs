//! Persistent defaults from `~/.config/sqlseed/settings.toml`.
//!
//! Every field is optional in the file; command-line flags override it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub(crate) struct Settings {
    /// Database used when `--database` is not given.
    pub database: Option<PathBuf>,
    #[serde(default)]
    pub scripts: ScriptSettings,
    #[serde(default)]
    pub csv: CsvSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScriptSettings {
    /// Script file names never run (case-insensitive).
    #[serde(default = "default_excluded")]
    pub excluded: Vec<String>,
    /// Directory name whose scripts run before all others.
    #[serde(default = "default_first_dir")]
    pub first_dir: String,
    /// Top-level subdirectory name to the database its scripts run against.
    /// When empty, the whole tree runs against one database.
    #[serde(default)]
    pub databases: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CsvSettings {
    /// Tables loaded before all others, in order.
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,
}

fn default_excluded() -> Vec<String> {
    vec!["Manifest.sql".to_string(), "PostDeployment.sql".to_string()]
}

fn default_first_dir() -> String {
    "Security".to_string()
}

fn default_priority() -> Vec<String> {
    vec!["Metric".to_string(), "MetricVariant".to_string()]
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            excluded: default_excluded(),
            first_dir: default_first_dir(),
            databases: BTreeMap::new(),
        }
    }
}

impl ScriptSettings {
    /// Database mapped to a top-level script directory, matched by name
    /// ignoring case.
    pub(crate) fn database_for(&self, dir_name: &str) -> Option<&PathBuf> {
        self.databases
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(dir_name))
            .map(|(_, path)| path)
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            priority: default_priority(),
        }
    }
}

/// Returns `~/.config/sqlseed/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("sqlseed").join("settings.toml")
}

pub(crate) fn parse_settings(contents: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(contents)
}

/// Load settings from disk, returning defaults if missing or corrupt.
pub(crate) fn load_settings() -> Settings {
    let path = settings_path();
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_settings(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
