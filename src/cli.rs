//! Command-line definition.

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

/// Top-level CLI entry point for the dotfile linker.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Manage dotfiles as symlinks into a repository",
    version
)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Output-control flags, valid in any position.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Output-control options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the symlinks a configuration file describes
    Link(LinkOpts),
    /// Inspect local or per-user configuration
    Config(ConfigOpts),
    /// Write a starter configuration file
    Init(InitOpts),
    /// Print version information
    Version,
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct LinkOpts {
    /// Configuration file to apply
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub file: std::path::PathBuf,

    /// Tags to enable, alongside untagged entries
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Report what would change without touching the filesystem
    #[arg(short = 'd', long)]
    pub dry_run: bool,
}

/// Options for the `config` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigOpts {
    /// The inspection action to run.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Inspection actions under `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the fully resolved configuration
    Dump(DumpOpts),
    /// Look up a single configuration value
    Get(GetOpts),
}

/// Options for `config dump`.
#[derive(Parser, Debug, Clone)]
pub struct DumpOpts {
    /// Configuration file to read
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub file: std::path::PathBuf,

    /// Read the per-user settings file instead of a local one
    #[arg(short, long)]
    pub global: bool,

    /// Emit JSON instead of readable text
    #[arg(long)]
    pub json: bool,
}

/// Options for `config get`.
#[derive(Parser, Debug, Clone)]
pub struct GetOpts {
    /// Dotted query, e.g. `links.bashrc.dest` or `create-directories`
    pub query: String,

    /// Configuration file to read
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub file: std::path::PathBuf,

    /// Read the per-user settings file instead of a local one
    #[arg(short, long)]
    pub global: bool,
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitOpts {
    /// Repository directory to initialize (defaults to the current directory)
    pub path: Option<std::path::PathBuf>,
}
