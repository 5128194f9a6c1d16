#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `link` command.
//!
//! These tests drive [`dotlink_cli::commands::link::run`] end to end: a
//! link file on disk, variable expansion, the decision procedure, and the
//! messages reported along the way. Destinations point into an isolated
//! home directory, so nothing outside the tempdir is touched.

mod common;

use dotlink_cli::cli::LinkOpts;
use dotlink_cli::commands;
use dotlink_cli::config::GlobalSettings;
use dotlink_cli::logging::Severity;

use common::{DotRepo, Recorder};

fn link_opts(repo: &DotRepo) -> LinkOpts {
    LinkOpts {
        file: repo.config_path(),
        tags: Vec::new(),
        dry_run: false,
    }
}

// ---------------------------------------------------------------------------
// Creating links
// ---------------------------------------------------------------------------

/// A declared link is created, and a second run changes nothing.
#[cfg(unix)]
#[test]
fn creates_declared_symlinks_and_is_idempotent() {
    let repo = DotRepo::builder()
        .with_source_file("bashrc", "# bash")
        .with_link_file(
            "[links.bashrc]\nsource = \"${repo}/bashrc\"\ndest = \"@home@/.bashrc\"\n",
        )
        .build();
    let settings = GlobalSettings::default();

    let log = Recorder::new();
    commands::link::run(&link_opts(&repo), &settings, &log).unwrap();

    let dest = repo.home().join(".bashrc");
    assert_eq!(
        std::fs::read_link(&dest).unwrap(),
        repo.repo().join("bashrc")
    );
    assert!(log.contains(Severity::Notice, "linked"));

    let rerun = Recorder::new();
    commands::link::run(&link_opts(&repo), &settings, &rerun).unwrap();
    assert!(rerun.contains(Severity::Notice, "no links were needed"));
    assert!(rerun.messages(Severity::Warn).is_empty());
    assert!(rerun.messages(Severity::Error).is_empty());
}

/// A dangling symlink at the destination is replaced; dry-run only says so.
#[cfg(unix)]
#[test]
fn repairs_broken_symlinks() {
    let repo = DotRepo::builder()
        .with_source_file("bashrc", "# bash")
        .with_link_file(
            "[links.bashrc]\nsource = \"${repo}/bashrc\"\ndest = \"@home@/.bashrc\"\n",
        )
        .build();
    let dest = repo.home().join(".bashrc");
    std::os::unix::fs::symlink(repo.home().join("gone"), &dest).unwrap();

    let dry = Recorder::new();
    let mut opts = link_opts(&repo);
    opts.dry_run = true;
    commands::link::run(&opts, &GlobalSettings::default(), &dry).unwrap();
    assert!(dry.contains(Severity::Debug, "would remove broken symlink"));
    assert_eq!(
        std::fs::read_link(&dest).unwrap(),
        repo.home().join("gone"),
        "dry-run must leave the dangling link in place"
    );

    let log = Recorder::new();
    commands::link::run(&link_opts(&repo), &GlobalSettings::default(), &log).unwrap();
    assert!(log.contains(Severity::Debug, "removing broken symlink"));
    assert_eq!(
        std::fs::read_link(&dest).unwrap(),
        repo.repo().join("bashrc")
    );
}

/// `destdir` entries reuse the source's file name under the destination
/// directory.
#[cfg(unix)]
#[test]
fn destdir_appends_the_source_file_name() {
    let repo = DotRepo::builder()
        .with_source_dir("fontconfig")
        .with_link_file(
            "[links.fontconfig]\nsource = \"${repo}/fontconfig\"\ndestdir = \"@home@/.config\"\ntype = \"directory\"\n",
        )
        .build();

    let log = Recorder::new();
    commands::link::run(&link_opts(&repo), &GlobalSettings::default(), &log).unwrap();

    let dest = repo.home().join(".config").join("fontconfig");
    assert!(dest.symlink_metadata().unwrap().file_type().is_symlink());
    assert!(dest.is_dir());
}

/// Each template item becomes its own symlink, in list order.
#[cfg(unix)]
#[test]
fn templates_link_each_item() {
    let repo = DotRepo::builder()
        .with_source_file("config/alpha.conf", "a")
        .with_source_file("config/beta.conf", "b")
        .with_link_file(
            "[templates.configs]\nsource = \"${repo}/config/%{item}\"\ndest = \"@home@/.config/%{item}\"\nitems = [\"alpha.conf\", \"beta.conf\"]\n",
        )
        .build();

    let log = Recorder::new();
    commands::link::run(&link_opts(&repo), &GlobalSettings::default(), &log).unwrap();

    assert!(repo.home().join(".config").join("alpha.conf").is_symlink());
    assert!(repo.home().join(".config").join("beta.conf").is_symlink());
    let notices = log.messages(Severity::Notice);
    let alpha = notices
        .iter()
        .position(|m| m.contains("alpha.conf"))
        .expect("alpha.conf notice");
    let beta = notices
        .iter()
        .position(|m| m.contains("beta.conf"))
        .expect("beta.conf notice");
    assert!(alpha < beta, "items must link in declaration order");
}

// ---------------------------------------------------------------------------
// Selection and modes
// ---------------------------------------------------------------------------

/// Tagged entries only apply when their tag is selected; untagged entries
/// always apply.
#[cfg(unix)]
#[test]
fn tags_select_which_entries_apply() {
    let repo = DotRepo::builder()
        .with_source_file("bashrc", "# bash")
        .with_source_file("gitconfig", "[user]")
        .with_source_file("kitty.conf", "font")
        .with_link_file(concat!(
            "[links.bashrc]\nsource = \"${repo}/bashrc\"\ndest = \"@home@/.bashrc\"\ntag = \"shell\"\n\n",
            "[links.kitty]\nsource = \"${repo}/kitty.conf\"\ndest = \"@home@/.kitty.conf\"\ntag = \"desktop\"\n\n",
            "[links.gitconfig]\nsource = \"${repo}/gitconfig\"\ndest = \"@home@/.gitconfig\"\n",
        ))
        .build();

    let log = Recorder::new();
    let mut opts = link_opts(&repo);
    opts.tags = vec!["shell".to_string()];
    commands::link::run(&opts, &GlobalSettings::default(), &log).unwrap();

    assert!(repo.home().join(".bashrc").is_symlink());
    assert!(repo.home().join(".gitconfig").is_symlink());
    assert!(
        !repo.home().join(".kitty.conf").exists(),
        "unselected tag must not link"
    );
}

/// Dry-run reports the full pass but leaves the filesystem untouched.
#[test]
fn dry_run_mutates_nothing() {
    let repo = DotRepo::builder()
        .with_source_file("bashrc", "# bash")
        .with_link_file(
            "[links.bashrc]\nsource = \"${repo}/bashrc\"\ndest = \"@home@/.config/bash/bashrc\"\n",
        )
        .build();

    let log = Recorder::new();
    let mut opts = link_opts(&repo);
    opts.dry_run = true;
    commands::link::run(&opts, &GlobalSettings::default(), &log).unwrap();

    assert!(log.contains(Severity::Notice, "linked"));
    assert!(
        !repo.home().join(".config").exists(),
        "dry-run must not create directories"
    );
}

/// A `create-directories = false` link file beats the per-user default.
#[test]
fn config_file_overrides_create_directories() {
    let repo = DotRepo::builder()
        .with_source_file("app.conf", "x")
        .with_link_file(
            "create-directories = false\n\n[links.app]\nsource = \"${repo}/app.conf\"\ndest = \"@home@/.config/app/app.conf\"\n",
        )
        .build();

    let log = Recorder::new();
    commands::link::run(&link_opts(&repo), &GlobalSettings::default(), &log).unwrap();

    assert!(log.contains(Severity::Warn, "does not exist, skipping"));
    assert!(!repo.home().join(".config").exists());
}

// ---------------------------------------------------------------------------
// Failure behavior
// ---------------------------------------------------------------------------

/// A missing source skips its entry; the command still succeeds.
#[test]
fn missing_source_is_reported_but_not_fatal() {
    let repo = DotRepo::builder()
        .with_link_file(
            "[links.ghost]\nsource = \"${repo}/ghost\"\ndest = \"@home@/.ghost\"\n",
        )
        .build();

    let log = Recorder::new();
    commands::link::run(&link_opts(&repo), &GlobalSettings::default(), &log).unwrap();

    assert!(log.contains(Severity::Error, "does not exist!"));
    assert!(!repo.home().join(".ghost").exists());
}

/// An unrelated file at the destination is never overwritten or removed.
#[test]
fn existing_destination_is_never_clobbered() {
    let repo = DotRepo::builder()
        .with_source_file("bashrc", "# bash")
        .with_link_file(
            "[links.bashrc]\nsource = \"${repo}/bashrc\"\ndest = \"@home@/.bashrc\"\n",
        )
        .build();
    let dest = repo.home().join(".bashrc");
    std::fs::write(&dest, "hand-written config").unwrap();

    let log = Recorder::new();
    commands::link::run(&link_opts(&repo), &GlobalSettings::default(), &log).unwrap();

    assert!(log.contains(Severity::Warn, "already exists and is not identical"));
    assert_eq!(
        std::fs::read_to_string(&dest).unwrap(),
        "hand-written config"
    );
}

/// An unrecognized `type` value warns at load time and links as a file.
#[cfg(unix)]
#[test]
fn unknown_link_type_warns_and_links_as_file() {
    let repo = DotRepo::builder()
        .with_source_file("bashrc", "# bash")
        .with_link_file(
            "[links.bashrc]\nsource = \"${repo}/bashrc\"\ndest = \"@home@/.bashrc\"\ntype = \"symbolic\"\n",
        )
        .build();

    let log = Recorder::new();
    commands::link::run(&link_opts(&repo), &GlobalSettings::default(), &log).unwrap();

    assert!(log.contains(Severity::Warn, "unrecognized type 'symbolic'"));
    assert!(repo.home().join(".bashrc").is_symlink());
}

/// Directory-creation failure aborts the run with an error.
#[test]
fn fatal_directory_failure_aborts_the_command() {
    let repo = DotRepo::builder()
        .with_source_file("bashrc", "# bash")
        .with_link_file(
            "[links.blocked]\nsource = \"${repo}/bashrc\"\ndest = \"@home@/blocker/sub/bashrc\"\n",
        )
        .build();
    std::fs::write(repo.home().join("blocker"), "a file, not a directory").unwrap();

    let log = Recorder::new();
    let err = commands::link::run(&link_opts(&repo), &GlobalSettings::default(), &log).unwrap_err();

    assert!(
        err.to_string().contains("failed to create directory"),
        "{err}"
    );
}
