//! The link engine: turns resolved configuration entries into symlinks.
//!
//! Entries are processed strictly in declaration order, one at a time,
//! probing the live filesystem per tuple. Recoverable conditions (missing
//! source, occupied destination, missing parent, unwritable parent, kind
//! mismatch) are reported and skipped; directory-creation and
//! symlink-creation failures abort the pass as [`EngineError`]. The engine
//! never overwrites an existing destination, and the only thing it ever
//! deletes is a broken symlink standing where a link belongs.
//!
//! Dry-run walks the same decision procedure and reports the same
//! outcomes a real run would, mutating nothing.

mod fsops;

use std::path::{Path, PathBuf};

use crate::config::{LinkEntry, LinkKind, TemplateEntry};
use crate::logging::Report;
use crate::paths;

/// Everything a link pass needs, passed explicitly.
pub struct ApplyContext<'a> {
    /// Create missing destination parent directories.
    pub create_directories: bool,
    /// Walk the decision procedure without touching the filesystem.
    pub dry_run: bool,
    /// Selected tags; empty means only untagged entries apply.
    pub tags: &'a [String],
    /// Home directory, for `~`-compacted display paths.
    pub home: &'a Path,
    /// Sink for per-tuple and aggregate reporting.
    pub log: &'a dyn Report,
}

impl std::fmt::Debug for ApplyContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplyContext")
            .field("create_directories", &self.create_directories)
            .field("dry_run", &self.dry_run)
            .field("tags", &self.tags)
            .field("home", &self.home)
            .finish_non_exhaustive()
    }
}

/// Counters for one pass (or several, merged with `+=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Newly created links; dry-run counts what it would create.
    pub linked: usize,
    /// Destinations that already pointed at their source.
    pub already_ok: usize,
    /// Tuples skipped for a recoverable reason.
    pub skipped: usize,
}

impl LinkStats {
    const fn record(&mut self, outcome: &TupleOutcome) {
        match outcome {
            TupleOutcome::Linked(_) => self.linked += 1,
            TupleOutcome::AlreadyLinked(_) => self.already_ok += 1,
            TupleOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

impl std::ops::AddAssign for LinkStats {
    fn add_assign(&mut self, rhs: Self) {
        self.linked += rhs.linked;
        self.already_ok += rhs.already_ok;
        self.skipped += rhs.skipped;
    }
}

/// A filesystem failure that aborts the whole pass.
///
/// Everything else the engine encounters skips one tuple and continues;
/// these three leave the destination tree in a state not worth extending.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Recursive parent-directory creation failed.
    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// A broken symlink occupying the destination could not be removed.
    #[error("failed to remove broken symlink at {}", .path.display())]
    RemoveBrokenLink {
        /// The broken symlink's path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The symlink call itself failed.
    #[error("failed to create symlink at {}", .dest.display())]
    CreateLink {
        /// Destination that could not be linked.
        dest: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// Why a tuple was skipped. The display string is the exact console
/// message; paths arrive pre-compacted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum SkipReason {
    #[error("source file {src} does not exist!")]
    SourceMissing { src: String },
    #[error("destination {dest} already exists and is not identical to source, skipping")]
    DestinationExists { dest: String },
    #[error("parent directory for {dest} does not exist, skipping")]
    ParentMissing { dest: String },
    #[error("no write permissions for {parent}")]
    NotWritable { parent: String },
    #[error("link {name} source {src} is not a directory")]
    SourceNotDirectory { name: String, src: String },
}

impl SkipReason {
    /// Conditions a user plausibly set up on purpose report as warnings;
    /// the rest are errors.
    const fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::DestinationExists { .. } | Self::ParentMissing { .. }
        )
    }
}

/// One (source, destination) pair ready for the decision procedure.
#[derive(Debug, Clone)]
struct LinkTuple {
    name: String,
    source: PathBuf,
    dest: PathBuf,
    kind: KindPolicy,
}

/// How the symlink flavor is chosen for a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KindPolicy {
    /// Trust the configured kind; a directory claim is checked against the
    /// live source first.
    Declared(LinkKind),
    /// Probe the source's filesystem type at link time. Template tuples
    /// work this way.
    Probed,
}

/// What the decision procedure concluded for one tuple, carrying the
/// display path its message reports.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TupleOutcome {
    Linked(String),
    AlreadyLinked(String),
    Skipped(SkipReason),
}

/// Apply every eligible link in declaration order.
///
/// Recoverable conditions skip their entry and the pass continues; a
/// fatal filesystem failure aborts it. After the loop a run that created
/// nothing says so explicitly.
///
/// ```
/// use dotlink_cli::config::{LinkEntry, LinkKind};
/// use dotlink_cli::engine::{ApplyContext, apply_links};
/// use dotlink_cli::logging::Logger;
///
/// let home = tempfile::tempdir()?;
/// let source = home.path().join("bashrc");
/// std::fs::write(&source, "# shell setup")?;
///
/// let entry = LinkEntry {
///     name: "bashrc".to_string(),
///     source,
///     dest: home.path().join(".bashrc"),
///     tag: None,
///     kind: LinkKind::File,
/// };
/// let log = Logger::new();
/// let ctx = ApplyContext {
///     create_directories: true,
///     dry_run: true,
///     tags: &[],
///     home: home.path(),
///     log: &log,
/// };
/// let stats = apply_links(&ctx, &[entry])?;
/// assert_eq!(stats.linked, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns an [`EngineError`] when directory creation, broken-symlink
/// removal, or symlink creation fails; the caller must stop instead of
/// starting further passes.
pub fn apply_links(ctx: &ApplyContext<'_>, links: &[LinkEntry]) -> Result<LinkStats, EngineError> {
    let mut stats = LinkStats::default();

    for entry in links {
        if !tag_selected(entry.tag.as_deref(), ctx.tags) {
            continue;
        }
        let tuple = LinkTuple {
            name: entry.name.clone(),
            source: entry.source.clone(),
            dest: entry.dest.clone(),
            kind: KindPolicy::Declared(entry.kind),
        };
        let outcome = apply_tuple(ctx, &tuple)?;
        report_outcome(ctx.log, &outcome);
        stats.record(&outcome);
    }

    if stats.linked == 0 {
        ctx.log.notice("no links were needed");
    } else {
        ctx.log.trace(&format!("created {} links", stats.linked));
    }
    Ok(stats)
}

/// Apply every eligible template, expanding its items in list order.
///
/// Each item becomes one tuple via `%{item}` substitution; the link
/// flavor is probed from the live source rather than declared. Reporting
/// is per template: a template whose items produced no new links says so.
///
/// # Errors
///
/// Same fatal classes as [`apply_links`].
pub fn apply_templates(
    ctx: &ApplyContext<'_>,
    templates: &[TemplateEntry],
) -> Result<LinkStats, EngineError> {
    let mut stats = LinkStats::default();
    let mut processed_templates = 0_usize;

    for template in templates {
        if !tag_selected(template.tag.as_deref(), ctx.tags) {
            continue;
        }
        let mut template_stats = LinkStats::default();
        for item in &template.items {
            let tuple = LinkTuple {
                name: template.name.clone(),
                source: PathBuf::from(paths::substitute(&template.source, item)),
                dest: PathBuf::from(paths::substitute(&template.dest, item)),
                kind: KindPolicy::Probed,
            };
            let outcome = apply_tuple(ctx, &tuple)?;
            report_outcome(ctx.log, &outcome);
            template_stats.record(&outcome);
        }
        if template_stats.linked == 0 {
            ctx.log
                .notice(&format!("template {} required no links", template.name));
        }
        ctx.log
            .trace(&format!("processed {} items", template_stats.linked));
        stats += template_stats;
        processed_templates += 1;
    }

    ctx.log
        .trace(&format!("processed {processed_templates} templates"));
    Ok(stats)
}

/// Untagged entries always apply; tagged entries need their tag in the
/// selection, and an empty selection opts out of every tagged entry.
fn tag_selected(tag: Option<&str>, selected: &[String]) -> bool {
    tag.is_none_or(|tag| selected.iter().any(|candidate| candidate == tag))
}

/// Route one outcome to the sink at its severity.
fn report_outcome(log: &dyn Report, outcome: &TupleOutcome) {
    match outcome {
        TupleOutcome::Linked(dest) => log.notice(&format!("linked {dest}")),
        TupleOutcome::AlreadyLinked(dest) => {
            log.debug(&format!("skipping {dest}, already linked"));
        }
        TupleOutcome::Skipped(reason) if reason.is_warning() => log.warn(&reason.to_string()),
        TupleOutcome::Skipped(reason) => log.error(&reason.to_string()),
    }
}

/// The per-tuple decision procedure.
///
/// Checks run in a fixed order: source existence, destination state
/// (equivalent / occupied / broken symlink), parent provisioning, an
/// advisory writability probe, kind validation, then the symlink call.
/// Under dry-run every message is still emitted but nothing mutates.
fn apply_tuple(ctx: &ApplyContext<'_>, tuple: &LinkTuple) -> Result<TupleOutcome, EngineError> {
    let dest_display = paths::compact_home(&tuple.dest, ctx.home);

    if !tuple.source.exists() {
        return Ok(TupleOutcome::Skipped(SkipReason::SourceMissing {
            src: paths::compact_home(&tuple.source, ctx.home),
        }));
    }

    if tuple.dest.exists() {
        if fsops::same_file(&tuple.source, &tuple.dest) {
            return Ok(TupleOutcome::AlreadyLinked(dest_display));
        }
        return Ok(TupleOutcome::Skipped(SkipReason::DestinationExists {
            dest: dest_display,
        }));
    }
    if fsops::is_broken_symlink(&tuple.dest) {
        if ctx.dry_run {
            ctx.log.debug(&format!(
                "would remove broken symlink at {}",
                tuple.dest.display()
            ));
        } else {
            ctx.log.debug(&format!(
                "removing broken symlink at {}",
                tuple.dest.display()
            ));
            fsops::remove_symlink(&tuple.dest).map_err(|source| EngineError::RemoveBrokenLink {
                path: tuple.dest.clone(),
                source,
            })?;
        }
    }

    if let Some(parent) = tuple.dest.parent() {
        if !parent.exists() {
            if !ctx.create_directories {
                return Ok(TupleOutcome::Skipped(SkipReason::ParentMissing {
                    dest: dest_display,
                }));
            }
            if !ctx.dry_run {
                std::fs::create_dir_all(parent).map_err(|source| EngineError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            ctx.log.debug(&format!(
                "create directory {}",
                paths::compact_home(parent, ctx.home)
            ));
        }
        // Advisory only; the symlink call still reports the real failure.
        if !ctx.dry_run && !paths::parent_writable(&tuple.dest) {
            return Ok(TupleOutcome::Skipped(SkipReason::NotWritable {
                parent: paths::compact_home(parent, ctx.home),
            }));
        }
    }

    let directory = match tuple.kind {
        KindPolicy::Declared(LinkKind::Directory) => {
            if !tuple.source.is_dir() {
                return Ok(TupleOutcome::Skipped(SkipReason::SourceNotDirectory {
                    name: tuple.name.clone(),
                    src: paths::compact_home(&tuple.source, ctx.home),
                }));
            }
            true
        }
        KindPolicy::Declared(LinkKind::File) => false,
        KindPolicy::Probed => tuple.source.is_dir(),
    };

    if !ctx.dry_run {
        fsops::create_symlink(&tuple.source, &tuple.dest, directory).map_err(|source| {
            EngineError::CreateLink {
                dest: tuple.dest.clone(),
                source,
            }
        })?;
    }

    Ok(TupleOutcome::Linked(dest_display))
}
