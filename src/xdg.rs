//! XDG base-directory resolution.

use std::path::{Path, PathBuf};

/// Resolved XDG base directories for the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirs {
    /// `$XDG_CONFIG_HOME`, defaulting to `~/.config`.
    pub config_home: PathBuf,
    /// `$XDG_CACHE_HOME`, defaulting to `~/.cache`.
    pub cache_home: PathBuf,
    /// `$XDG_DATA_HOME`, defaulting to `~/.local/share`.
    pub data_home: PathBuf,
    /// `$XDG_STATE_HOME`, defaulting to `~/.local/state`.
    pub state_home: PathBuf,
    /// `$XDG_RUNTIME_DIR`; has no default location.
    pub runtime_dir: Option<PathBuf>,
}

impl BaseDirs {
    /// Resolve the base directories from the environment, falling back to
    /// the standard locations under `home`.
    ///
    /// Empty environment values are treated as unset, matching how other
    /// XDG basedir consumers behave.
    #[must_use]
    pub fn resolve(home: &Path) -> Self {
        Self::resolve_with(home, |name| {
            std::env::var_os(name)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
    }

    fn resolve_with(home: &Path, env: impl Fn(&str) -> Option<PathBuf>) -> Self {
        Self {
            config_home: env("XDG_CONFIG_HOME").unwrap_or_else(|| home.join(".config")),
            cache_home: env("XDG_CACHE_HOME").unwrap_or_else(|| home.join(".cache")),
            data_home: env("XDG_DATA_HOME")
                .unwrap_or_else(|| home.join(".local").join("share")),
            state_home: env("XDG_STATE_HOME")
                .unwrap_or_else(|| home.join(".local").join("state")),
            runtime_dir: env("XDG_RUNTIME_DIR"),
        }
    }
}
