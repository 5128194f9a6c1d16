//! Per-user global settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::logging::Verbosity;
use crate::xdg::BaseDirs;

/// Settings from `$XDG_CONFIG_HOME/dotlink/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalSettings {
    /// Whether missing destination parents are created. Link files can
    /// override this per repository.
    #[serde(rename = "create-directories")]
    pub create_directories: bool,
    /// Whether console output uses ANSI colors. `NO_COLOR` in the
    /// environment wins over this.
    pub color: bool,
    /// Configured console verbosity; CLI flags win over this.
    #[serde(rename = "log-level")]
    pub log_level: Verbosity,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            create_directories: true,
            color: true,
            log_level: Verbosity::Normal,
        }
    }
}

/// Path of the settings file under `dirs`.
#[must_use]
pub fn settings_path(dirs: &BaseDirs) -> PathBuf {
    dirs.config_home.join("dotlink").join("config.toml")
}

/// Load the global settings file, tolerating a missing file and bad
/// values.
///
/// Parsing is lenient on purpose: a field that is absent or has the wrong
/// shape falls back to its default instead of failing the run, so a typo
/// in the settings file never blocks linking. `log-level` accepts the
/// verbosity names or their indices `0`-`4`.
///
/// # Errors
///
/// Fails only when the file exists but cannot be read or is not TOML at
/// all; the caller downgrades that to a warning and runs on defaults.
pub fn load(path: &Path) -> Result<GlobalSettings> {
    if !path.exists() {
        return Ok(GlobalSettings::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let table: toml::Table = toml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(from_table(&table))
}

fn from_table(table: &toml::Table) -> GlobalSettings {
    let defaults = GlobalSettings::default();
    GlobalSettings {
        create_directories: table
            .get("create-directories")
            .and_then(toml::Value::as_bool)
            .unwrap_or(defaults.create_directories),
        color: table
            .get("color")
            .and_then(toml::Value::as_bool)
            .unwrap_or(defaults.color),
        log_level: table
            .get("log-level")
            .and_then(parse_log_level)
            .unwrap_or(defaults.log_level),
    }
}

fn parse_log_level(value: &toml::Value) -> Option<Verbosity> {
    match value {
        toml::Value::String(name) => Verbosity::from_name(name),
        toml::Value::Integer(index) => Verbosity::from_index(*index),
        _ => None,
    }
}
