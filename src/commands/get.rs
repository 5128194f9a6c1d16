//! Command: look up one configuration value by dotted query.

use std::fmt;
use std::path::Path;

use anyhow::{Result, anyhow, bail};

use crate::cli::GetOpts;
use crate::config::{Config, GlobalSettings, LinkEntry, TemplateEntry};
use crate::logging::{Report, Verbosity};

use super::CommandSetup;

/// One value resolved from a dotted query, borrowed from the loaded
/// configuration.
#[derive(Debug)]
pub enum QueryValue<'a> {
    /// A boolean setting.
    Bool(bool),
    /// A plain string value.
    Text(&'a str),
    /// A resolved filesystem path.
    Path(&'a Path),
    /// A list, printed one element per line.
    List(&'a [String]),
    /// A verbosity level, printed by name.
    Level(Verbosity),
    /// A whole link entry.
    Link(&'a LinkEntry),
    /// Every link entry.
    Links(&'a [LinkEntry]),
    /// A whole template entry.
    Template(&'a TemplateEntry),
    /// Every template entry.
    Templates(&'a [TemplateEntry]),
}

impl QueryValue<'_> {
    fn render(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Text(value) => (*value).to_string(),
            Self::Path(value) => value.display().to_string(),
            Self::Level(value) => value.to_string(),
            Self::List(items) => items.join("\n"),
            Self::Link(entry) => link_lines(entry).join("\n"),
            Self::Template(entry) => template_lines(entry).join("\n"),
            Self::Links(links) => links
                .iter()
                .map(|entry| {
                    let mut lines = vec![format!("[links.{}]", entry.name)];
                    lines.extend(link_lines(entry));
                    lines.join("\n")
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
            Self::Templates(templates) => templates
                .iter()
                .map(|entry| {
                    let mut lines = vec![format!("[templates.{}]", entry.name)];
                    lines.extend(template_lines(entry));
                    lines.join("\n")
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

impl fmt::Display for QueryValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn link_lines(entry: &LinkEntry) -> Vec<String> {
    let mut lines = vec![
        format!("source = {}", entry.source.display()),
        format!("dest = {}", entry.dest.display()),
        format!("type = {}", entry.kind.name()),
    ];
    if let Some(tag) = &entry.tag {
        lines.push(format!("tag = {tag}"));
    }
    lines
}

fn template_lines(entry: &TemplateEntry) -> Vec<String> {
    let items = entry
        .items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let mut lines = vec![
        format!("source = {}", entry.source),
        format!("dest = {}", entry.dest),
        format!("items = [{items}]"),
    ];
    if let Some(tag) = &entry.tag {
        lines.push(format!("tag = {tag}"));
    }
    lines
}

/// Run the get action.
///
/// # Errors
///
/// Returns an error when loading fails or nothing matches the query.
pub fn run(opts: &GetOpts, settings: &GlobalSettings, log: &dyn Report) -> Result<()> {
    if opts.global {
        print_value(&lookup_global(settings, &opts.query)?);
        return Ok(());
    }
    let setup = CommandSetup::init(&opts.file, log)?;
    print_value(&lookup(&setup.config, &opts.query)?);
    Ok(())
}

/// Resolve a dotted query against a loaded link file.
///
/// `links.<name>` and `templates.<name>` accept names containing dots; a
/// whole-entry match is tried before the last dot is treated as a field
/// separator.
///
/// # Errors
///
/// Returns an error when nothing matches the query.
pub fn lookup<'a>(config: &'a Config, query: &str) -> Result<QueryValue<'a>> {
    if let Some(rest) = query.strip_prefix("links.") {
        return lookup_link(config, rest, query);
    }
    if let Some(rest) = query.strip_prefix("templates.") {
        return lookup_template(config, rest, query);
    }
    match query {
        "create-directories" => config
            .create_directories
            .map(QueryValue::Bool)
            .ok_or_else(|| anyhow!("create-directories is not set in this file")),
        "repository" | "repository.url" => config
            .repository
            .as_ref()
            .and_then(|repo| repo.url.as_deref())
            .map(QueryValue::Text)
            .ok_or_else(|| anyhow!("no repository url is configured")),
        "links" => Ok(QueryValue::Links(&config.links)),
        "templates" => Ok(QueryValue::Templates(&config.templates)),
        _ => bail!("no configuration value matches '{query}'"),
    }
}

/// Resolve a query against the per-user settings.
///
/// # Errors
///
/// Returns an error when nothing matches the query.
pub fn lookup_global<'a>(settings: &'a GlobalSettings, query: &str) -> Result<QueryValue<'a>> {
    match query {
        "create-directories" => Ok(QueryValue::Bool(settings.create_directories)),
        "color" => Ok(QueryValue::Bool(settings.color)),
        "log-level" => Ok(QueryValue::Level(settings.log_level)),
        _ => bail!("no global setting matches '{query}'"),
    }
}

fn lookup_link<'a>(config: &'a Config, rest: &str, query: &str) -> Result<QueryValue<'a>> {
    if let Some(entry) = config.link(rest) {
        return Ok(QueryValue::Link(entry));
    }
    if let Some((name, field)) = rest.rsplit_once('.')
        && let Some(entry) = config.link(name)
    {
        return match field {
            "source" => Ok(QueryValue::Path(&entry.source)),
            "dest" => Ok(QueryValue::Path(&entry.dest)),
            "type" => Ok(QueryValue::Text(entry.kind.name())),
            "tag" => entry
                .tag
                .as_deref()
                .map(QueryValue::Text)
                .ok_or_else(|| anyhow!("link '{name}' has no tag")),
            _ => bail!("link '{name}' has no field '{field}'"),
        };
    }
    bail!("no configuration value matches '{query}'")
}

fn lookup_template<'a>(config: &'a Config, rest: &str, query: &str) -> Result<QueryValue<'a>> {
    if let Some(entry) = config.template(rest) {
        return Ok(QueryValue::Template(entry));
    }
    if let Some((name, field)) = rest.rsplit_once('.')
        && let Some(entry) = config.template(name)
    {
        return match field {
            "source" => Ok(QueryValue::Text(entry.source.as_str())),
            "dest" => Ok(QueryValue::Text(entry.dest.as_str())),
            "items" => Ok(QueryValue::List(&entry.items)),
            "tag" => entry
                .tag
                .as_deref()
                .map(QueryValue::Text)
                .ok_or_else(|| anyhow!("template '{name}' has no tag")),
            _ => bail!("template '{name}' has no field '{field}'"),
        };
    }
    bail!("no configuration value matches '{query}'")
}

#[allow(clippy::print_stdout)]
fn print_value(value: &QueryValue<'_>) {
    println!("{value}");
}
