//! Declarative symlink manager for dotfiles.
//!
//! A repository of configuration files declares, in a TOML link file, where
//! each of its entries belongs under the home directory. The link pass makes
//! the filesystem match: it creates missing symlinks, leaves correct ones
//! alone, and skips with a report anything it cannot do without destroying
//! data. Existing files are never overwritten.
//!
//! The public API is organised into layers:
//!
//! - [`config`]: link files, per-user settings, and variable expansion
//! - [`engine`]: the link pass itself, deciding and symlinking per entry
//! - [`commands`]: top-level subcommand orchestration (`link`, `config`, `init`)
//! - [`logging`]: the severity model and console reporting
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod logging;
pub mod paths;
pub mod xdg;
