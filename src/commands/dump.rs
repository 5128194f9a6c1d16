//! Command: print the resolved configuration.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::DumpOpts;
use crate::config::GlobalSettings;
use crate::logging::Report;

use super::CommandSetup;

/// Run the dump action: print the resolved configuration, as TOML by
/// default or JSON with `--json`.
///
/// The output shows entries after variable expansion and `destdir`
/// resolution, which is what the link pass will actually use.
///
/// # Errors
///
/// Returns an error when loading or serialization fails.
pub fn run(opts: &DumpOpts, settings: &GlobalSettings, log: &dyn Report) -> Result<()> {
    let text = if opts.global {
        render(settings, opts.json)?
    } else {
        let setup = CommandSetup::init(&opts.file, log)?;
        render(&setup.config, opts.json)?
    };
    print_rendered(&text);
    Ok(())
}

fn render<T: Serialize>(value: &T, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(value).context("failed to encode configuration as JSON")
    } else {
        toml::to_string_pretty(value).context("failed to encode configuration as TOML")
    }
}

#[allow(clippy::print_stdout)]
fn print_rendered(text: &str) {
    println!("{}", text.trim_end());
}
