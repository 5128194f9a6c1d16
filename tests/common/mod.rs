// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfiles repository plus an
// isolated home directory, so each integration test can run a full link
// pass without touching the real environment.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use dotlink_cli::config::{self, Config, ConfigWarning, VarMap};
use dotlink_cli::logging::{Report, Severity};
use dotlink_cli::xdg::BaseDirs;

/// An isolated dotfiles repository (`repo/`) and home directory (`home/`)
/// backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct DotRepo {
    root: tempfile::TempDir,
}

impl DotRepo {
    /// Begin building a repository.
    pub fn builder() -> DotRepoBuilder {
        DotRepoBuilder::new()
    }

    /// The isolated home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// The repository directory holding sources and the link file.
    pub fn repo(&self) -> PathBuf {
        self.root.path().join("repo")
    }

    /// Path of the repository's link file.
    pub fn config_path(&self) -> PathBuf {
        self.repo().join("dotlink.toml")
    }

    /// Load the link file with the same variable map the CLI would build,
    /// except that `${home}` points at the isolated home directory.
    pub fn load(&self) -> (Config, Vec<ConfigWarning>) {
        let home = self.home();
        let dirs = BaseDirs::resolve(&home);
        let vars = VarMap::standard(&home, &self.repo(), &dirs);
        config::local::load(&self.config_path(), &vars).expect("load link file")
    }
}

/// Fluent builder for [`DotRepo`].
///
/// Lets individual tests lay out sources and the link file without
/// repeating filesystem boilerplate.
pub struct DotRepoBuilder {
    repo: DotRepo,
}

impl DotRepoBuilder {
    /// Create the `home/` and `repo/` skeleton in a fresh tempdir.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        std::fs::create_dir_all(root.path().join("repo")).expect("create repo dir");
        Self {
            repo: DotRepo { root },
        }
    }

    /// Write the link file. Occurrences of `@repo@` and `@home@` in
    /// `content` are replaced with the isolated absolute paths first, so
    /// tests can write literal destinations without touching the real
    /// environment.
    pub fn with_link_file(self, content: &str) -> Self {
        let content = content
            .replace("@repo@", &self.repo.repo().display().to_string())
            .replace("@home@", &self.repo.home().display().to_string());
        std::fs::write(self.repo.config_path(), content).expect("write link file");
        self
    }

    /// Create a source file (and its parents) inside the repository.
    pub fn with_source_file(self, relative: &str, content: &str) -> Self {
        let path = self.repo.repo().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Create a source directory inside the repository.
    pub fn with_source_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.repo.repo().join(relative)).expect("create source dir");
        self
    }

    /// Finish building and return the repository.
    pub fn build(self) -> DotRepo {
        self.repo
    }
}

impl Default for DotRepoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Captures every reported message in order, for assertions.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<(Severity, String)>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in emission order.
    pub fn events(&self) -> Vec<(Severity, String)> {
        self.events.lock().expect("recorder lock").clone()
    }

    /// Messages recorded at `severity`, in order.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(event_severity, _)| *event_severity == severity)
            .map(|(_, message)| message)
            .collect()
    }

    /// Whether any message at `severity` contains `needle`.
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.messages(severity)
            .iter()
            .any(|message| message.contains(needle))
    }

    fn push(&self, severity: Severity, message: &str) {
        self.events
            .lock()
            .expect("recorder lock")
            .push((severity, message.to_string()));
    }
}

impl Report for Recorder {
    fn notice(&self, msg: &str) {
        self.push(Severity::Notice, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Severity::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Severity::Error, msg);
    }

    fn debug(&self, msg: &str) {
        self.push(Severity::Debug, msg);
    }

    fn trace(&self, msg: &str) {
        self.push(Severity::Trace, msg);
    }
}
