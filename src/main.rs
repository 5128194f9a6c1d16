//! The `dotlink` binary: parses the command line, loads per-user
//! settings, and dispatches to the library's subcommands.

use anyhow::Result;
use clap::Parser;

use dotlink_cli::cli::{Cli, Command, ConfigAction, GlobalOpts};
use dotlink_cli::commands;
use dotlink_cli::config::globals::{self, GlobalSettings};
use dotlink_cli::logging::{self, Logger, Report, Verbosity};
use dotlink_cli::xdg::BaseDirs;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let (settings, settings_warning) = load_settings();
    let verbosity = effective_verbosity(&args.global, &settings);
    logging::init_subscriber(verbosity, color_enabled(&settings));

    let log = Logger::new();
    if let Some(warning) = settings_warning {
        log.warn(&warning);
    }

    match args.command {
        Command::Link(opts) => commands::link::run(&opts, &settings, &log),
        Command::Config(config) => match config.action {
            ConfigAction::Dump(opts) => commands::dump::run(&opts, &settings, &log),
            ConfigAction::Get(opts) => commands::get::run(&opts, &settings, &log),
        },
        Command::Init(opts) => commands::init::run(&opts, &log),
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Load per-user settings, deferring any failure until the subscriber
/// exists to report it. A broken settings file downgrades to defaults.
fn load_settings() -> (GlobalSettings, Option<String>) {
    let Ok(home) = commands::resolve_home() else {
        // Commands that need the home directory resolve it themselves and
        // fail with a proper error; `version` and `init` work without it.
        return (GlobalSettings::default(), None);
    };
    let dirs = BaseDirs::resolve(&home);
    match globals::load(&globals::settings_path(&dirs)) {
        Ok(settings) => (settings, None),
        Err(err) => (GlobalSettings::default(), Some(format!("{err:#}"))),
    }
}

/// CLI flags win over the configured log level; `--quiet` wins over
/// everything.
const fn effective_verbosity(global: &GlobalOpts, settings: &GlobalSettings) -> Verbosity {
    if global.quiet {
        Verbosity::Quiet
    } else {
        match global.verbose {
            0 => settings.log_level,
            1 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

/// Color comes from the settings file unless `NO_COLOR` is set non-empty.
fn color_enabled(settings: &GlobalSettings) -> bool {
    settings.color && std::env::var_os("NO_COLOR").is_none_or(|value| value.is_empty())
}

#[allow(clippy::print_stdout)]
fn print_version() {
    let version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("dotlink {version}");
}
