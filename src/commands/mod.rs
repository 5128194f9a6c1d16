//! Subcommand implementations and the setup sequence they share.

pub mod dump;
pub mod get;
pub mod init;
pub mod link;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{self, Config, VarMap};
use crate::logging::Report;
use crate::xdg::BaseDirs;

/// Shared state produced by the common command setup sequence.
///
/// Resolves the home directory, builds the variable map, and loads the
/// link file so commands that read one do not repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Resolved home directory.
    pub home: PathBuf,
    /// The loaded link file.
    pub config: Config,
}

impl CommandSetup {
    /// Load `file` with the standard variables in scope.
    ///
    /// Load-time warnings are reported through `log` and do not fail the
    /// setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// file cannot be read or parsed.
    pub fn init(file: &Path, log: &dyn Report) -> Result<Self> {
        let home = resolve_home()?;
        let dirs = BaseDirs::resolve(&home);
        let repo = repository_root(file)?;
        let vars = VarMap::standard(&home, &repo, &dirs);

        let (config, warnings) = config::local::load(file, &vars)?;
        for warning in &warnings {
            log.warn(&warning.to_string());
        }

        Ok(Self { home, config })
    }
}

/// The home directory, from `HOME` (`USERPROFILE` on Windows).
///
/// # Errors
///
/// Fails when the variable is unset or empty; destination paths and the
/// settings lookup both depend on it.
pub fn resolve_home() -> Result<PathBuf> {
    let name = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .with_context(|| format!("{name} is not set, cannot locate the home directory"))
}

/// The directory `${repo}` resolves to: the link file's parent,
/// canonicalized so relative invocations still produce absolute links.
fn repository_root(file: &Path) -> Result<PathBuf> {
    let parent = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    dunce::canonicalize(parent)
        .with_context(|| format!("failed to resolve repository directory {}", parent.display()))
}
