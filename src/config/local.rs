//! Link file loading and resolution.
//!
//! The raw TOML shapes are deserialized with permissive `Option` fields so
//! that format violations can be reported per entry, with the entry name in
//! the error chain, instead of as an opaque serde failure.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::vars::VarMap;
use super::{LinkEntry, LinkKind, TemplateEntry};

/// A fully resolved link file.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Per-repository override of the global `create-directories` setting.
    #[serde(rename = "create-directories", skip_serializing_if = "Option::is_none")]
    pub create_directories: Option<bool>,
    /// Repository metadata, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    /// Links in declaration order.
    pub links: Vec<LinkEntry>,
    /// Templates in declaration order.
    pub templates: Vec<TemplateEntry>,
}

impl Config {
    /// Find a link by name.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&LinkEntry> {
        self.links.iter().find(|link| link.name == name)
    }

    /// Find a template by name.
    #[must_use]
    pub fn template(&self, name: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|template| template.name == name)
    }
}

/// Metadata from the optional `[repository]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Clone URL recorded for reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A recoverable problem found while loading a link file.
///
/// Warnings never fail the load; the command layer reports them before
/// linking starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    /// A link declared a `type` other than `file` or `directory`.
    #[error("link '{name}' has unrecognized type '{value}', assuming file")]
    UnknownLinkKind {
        /// Name of the offending link.
        name: String,
        /// The `type` value as written.
        value: String,
    },
}

/// Raw top-level shape of the link file. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "create-directories")]
    create_directories: Option<bool>,
    repository: Option<RawRepository>,
    #[serde(default)]
    links: toml::Table,
    #[serde(default)]
    templates: toml::Table,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    tag: Option<String>,
    source: Option<String>,
    dest: Option<String>,
    destdir: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTemplate {
    tag: Option<String>,
    source: Option<String>,
    dest: Option<String>,
    items: Option<Vec<String>>,
}

/// Load and resolve the link file at `path`.
///
/// `${var}` references in path-valued fields are expanded against `vars`.
/// Entries keep the order they were declared in; the `preserve_order`
/// feature of the TOML parser makes that hold for name-keyed tables too.
///
/// # Errors
///
/// Fails when the file is missing or unreadable, when the TOML is
/// malformed, or when an entry violates the format rules (missing
/// `source`, neither or both of `dest` / `destdir`, missing template
/// fields).
pub fn load(path: &Path, vars: &VarMap) -> Result<(Config, Vec<ConfigWarning>)> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let raw: RawConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let mut warnings = Vec::new();

    let mut links = Vec::with_capacity(raw.links.len());
    for (name, value) in raw.links {
        let raw_link: RawLink = value
            .try_into()
            .with_context(|| format!("link '{name}' in {}", path.display()))?;
        links.push(resolve_link(&name, raw_link, vars, &mut warnings)?);
    }

    let mut templates = Vec::with_capacity(raw.templates.len());
    for (name, value) in raw.templates {
        let raw_template: RawTemplate = value
            .try_into()
            .with_context(|| format!("template '{name}' in {}", path.display()))?;
        templates.push(resolve_template(&name, raw_template, vars)?);
    }

    let config = Config {
        create_directories: raw.create_directories,
        repository: raw.repository.map(|repository| Repository {
            url: repository.url,
        }),
        links,
        templates,
    };
    Ok((config, warnings))
}

fn resolve_link(
    name: &str,
    raw: RawLink,
    vars: &VarMap,
    warnings: &mut Vec<ConfigWarning>,
) -> Result<LinkEntry> {
    let source = raw
        .source
        .ok_or_else(|| anyhow::anyhow!("link '{name}' is missing 'source'"))?;
    let source = PathBuf::from(vars.expand(&source));

    let dest = match (raw.dest, raw.destdir) {
        (Some(_), Some(_)) => bail!("link '{name}' declares both 'dest' and 'destdir'"),
        (Some(dest), None) => PathBuf::from(vars.expand(&dest)),
        (None, Some(destdir)) => {
            let file_name = source.file_name().ok_or_else(|| {
                anyhow::anyhow!("link '{name}' source has no file name to place under 'destdir'")
            })?;
            PathBuf::from(vars.expand(&destdir)).join(file_name)
        }
        (None, None) => bail!("link '{name}' needs either 'dest' or 'destdir'"),
    };

    let kind = raw.kind.map_or(LinkKind::File, |value| {
        LinkKind::from_config(&value).unwrap_or_else(|| {
            warnings.push(ConfigWarning::UnknownLinkKind {
                name: name.to_string(),
                value,
            });
            LinkKind::File
        })
    });

    Ok(LinkEntry {
        name: name.to_string(),
        source,
        dest,
        tag: normalize_tag(raw.tag),
        kind,
    })
}

fn resolve_template(name: &str, raw: RawTemplate, vars: &VarMap) -> Result<TemplateEntry> {
    let source = raw
        .source
        .ok_or_else(|| anyhow::anyhow!("template '{name}' is missing 'source'"))?;
    let dest = raw
        .dest
        .ok_or_else(|| anyhow::anyhow!("template '{name}' is missing 'dest'"))?;
    let items = raw
        .items
        .ok_or_else(|| anyhow::anyhow!("template '{name}' is missing 'items'"))?;

    Ok(TemplateEntry {
        name: name.to_string(),
        source: vars.expand(&source),
        dest: vars.expand(&dest),
        items: items.into_iter().map(|item| vars.expand(&item)).collect(),
        tag: normalize_tag(raw.tag),
    })
}

/// An empty tag means untagged; spare the engine the distinction.
fn normalize_tag(tag: Option<String>) -> Option<String> {
    tag.filter(|tag| !tag.is_empty())
}
