//! Command: apply the configured links and templates.

use anyhow::Result;

use crate::cli::LinkOpts;
use crate::config::GlobalSettings;
use crate::engine::{self, ApplyContext};
use crate::logging::Report;

use super::CommandSetup;

/// Run the link command: apply every link, then every template.
///
/// The link file's `create-directories` overrides the per-user setting
/// when present.
///
/// # Errors
///
/// Returns an error if setup fails or the engine hits a fatal filesystem
/// failure; templates do not run after a fatal link pass.
pub fn run(opts: &LinkOpts, settings: &GlobalSettings, log: &dyn Report) -> Result<()> {
    let setup = CommandSetup::init(&opts.file, log)?;

    let create_directories = setup
        .config
        .create_directories
        .unwrap_or(settings.create_directories);
    let ctx = ApplyContext {
        create_directories,
        dry_run: opts.dry_run,
        tags: &opts.tags,
        home: &setup.home,
        log,
    };

    engine::apply_links(&ctx, &setup.config.links)?;
    engine::apply_templates(&ctx, &setup.config.templates)?;
    Ok(())
}
