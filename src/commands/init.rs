//! Command: write a starter configuration file.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::cli::InitOpts;
use crate::config::DEFAULT_CONFIG_FILE;
use crate::logging::Report;

/// Starter link file written by `init`. Every entry is commented out so a
/// fresh repository links nothing until the user opts in.
const STARTER_CONFIG: &str = r#"# An example configuration file for dotlink.
#
# Uncomment and adapt the entries below. Variables like ${REPO}, ${HOME},
# and ${XDG_CONFIG_HOME} expand when the file is loaded; lowercase names
# work too.

# Metadata about the repository.
#
# [repository]
# url = "https://github.com/username/repository.git"

# Link entries give explicit control over individual files.
#
# [links.nvim]
# source = "${REPO}/.config/nvim/init.lua"
# dest = "${XDG_CONFIG_HOME}/nvim/init.lua"

# 'destdir' reuses the source's file name, so this entry links the whole
# directory to ${XDG_CONFIG_HOME}/fontconfig. Without 'type' a link is
# treated as a file.
#
# [links.fontconfig]
# source = "${REPO}/.config/fontconfig"
# destdir = "${XDG_CONFIG_HOME}"
# type = "directory"

# [links.bashrc]
# source = "${REPO}/.bashrc"
# dest = "${HOME}/.bashrc"

# Templates link many files through one pattern. Each item is substituted
# for %{item} in both paths, creating one symlink per item; whether it
# links as a file or directory is read from the source itself.
#
# [templates.configs]
# source = "${REPO}/.config/%{item}"
# dest = "${XDG_CONFIG_HOME}/%{item}"
# items = ["kitty/kitty.conf", "fish/conf.d", "fish/config.fish"]
"#;

/// Run the init command: write a starter link file into the repository
/// directory.
///
/// # Errors
///
/// Fails when the target file already exists or cannot be written.
pub fn run(opts: &InitOpts, log: &dyn Report) -> Result<()> {
    let target = target_path(opts);
    if target.exists() {
        bail!("file {} already exists, not overwriting", target.display());
    }
    std::fs::write(&target, STARTER_CONFIG)
        .with_context(|| format!("unable to write {}", target.display()))?;
    log.notice(&format!("wrote configuration to file {}", target.display()));
    Ok(())
}

fn target_path(opts: &InitOpts) -> PathBuf {
    opts.path.as_ref().map_or_else(
        || PathBuf::from(DEFAULT_CONFIG_FILE),
        |dir| dir.join(DEFAULT_CONFIG_FILE),
    )
}
