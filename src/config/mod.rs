//! Configuration loading: the per-repository link file and the per-user
//! global settings file.
//!
//! The link file is TOML. Its `[links.*]` and `[templates.*]` tables are
//! resolved into [`LinkEntry`] and [`TemplateEntry`] values in declaration
//! order, with `${var}` references expanded through [`VarMap`]. Suspect but
//! recoverable constructs surface as [`ConfigWarning`]s instead of failing
//! the load.

pub mod globals;
pub mod local;
pub mod vars;

pub use globals::GlobalSettings;
pub use local::{Config, ConfigWarning};
pub use vars::VarMap;

use std::path::PathBuf;

use serde::Serialize;

/// Default link file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "dotlink.toml";

/// How a link's source should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Source is a regular file.
    #[default]
    File,
    /// Source is a directory; linking verifies this before creating the
    /// symlink.
    Directory,
}

impl LinkKind {
    /// Parse a `type` value from the link file.
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "file" => Some(Self::File),
            "directory" => Some(Self::Directory),
            _ => None,
        }
    }

    /// The name accepted by [`Self::from_config`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

/// A single named link from the `[links]` table, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    /// Table key naming this link.
    pub name: String,
    /// Absolute path of the file or directory to link to.
    pub source: PathBuf,
    /// Absolute path where the symlink is created.
    pub dest: PathBuf,
    /// Optional tag restricting when this link applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Declared source kind.
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

/// A named template from the `[templates]` table: one source/dest pattern
/// pair applied to a list of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    /// Table key naming this template.
    pub name: String,
    /// Source pattern; `%{item}` is replaced per item.
    pub source: String,
    /// Destination pattern; `%{item}` is replaced per item.
    pub dest: String,
    /// Items substituted into the patterns, in declaration order.
    pub items: Vec<String>,
    /// Optional tag restricting when this template applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}
