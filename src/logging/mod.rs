//! Reporting contract and tracing-backed console output.
//!
//! The link engine talks to an abstract [`Report`] sink; [`Logger`] is the
//! production implementation, emitting [`tracing`] events that the console
//! subscriber renders. Severity thresholds and color live entirely in the
//! subscriber, so callers only pick which severity applies.

mod logger;
mod subscriber;

pub use logger::Logger;
pub use subscriber::init as init_subscriber;

use tracing_subscriber::filter::LevelFilter;

/// Event target used for result-style notices so the console renders them
/// with the `>>>` prefix instead of a severity tag.
pub(crate) const NOTICE_TARGET: &str = "dotlink::notice";

/// Abstraction over message sinks.
///
/// The engine emits every outcome through this trait and never formats
/// colors or checks verbosity itself. Fatal conditions are not a message
/// kind: they travel as error values up to `main`.
pub trait Report {
    /// Result-style notice, always shown unless quiet.
    fn notice(&self, msg: &str);
    /// Warning about a skipped entry or suspect configuration.
    fn warn(&self, msg: &str);
    /// Error for a condition that skips an entry; always shown.
    fn error(&self, msg: &str);
    /// Progress detail, shown at elevated verbosity.
    fn debug(&self, msg: &str);
    /// Counter-level detail, shown at the highest verbosity.
    fn trace(&self, msg: &str);
}

/// Message severity, mirroring the methods of [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// [`Report::notice`].
    Notice,
    /// [`Report::warn`].
    Warn,
    /// [`Report::error`].
    Error,
    /// [`Report::debug`].
    Debug,
    /// [`Report::trace`].
    Trace,
}

/// Console verbosity, from the global settings file or the CLI flags.
///
/// The names match the accepted `log-level` values in the settings file;
/// the file also accepts their positional indices `0`-`4`.
///
/// # Examples
///
/// ```
/// use dotlink_cli::logging::Verbosity;
///
/// assert_eq!(Verbosity::from_name("debug"), Some(Verbosity::Debug));
/// assert_eq!(Verbosity::from_index(4), Some(Verbosity::Trace));
/// assert_eq!(Verbosity::from_name("loud"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Notices, warnings, and errors.
    #[default]
    Normal,
    /// Accepted for compatibility; same console output as [`Self::Normal`].
    Info,
    /// Adds progress detail.
    Debug,
    /// Adds counter-level detail.
    Trace,
}

impl Verbosity {
    /// Parse a `log-level` name from the settings file.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quiet" => Some(Self::Quiet),
            "normal" => Some(Self::Normal),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Parse a numeric `log-level` from the settings file.
    #[must_use]
    pub const fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Quiet),
            1 => Some(Self::Normal),
            2 => Some(Self::Info),
            3 => Some(Self::Debug),
            4 => Some(Self::Trace),
            _ => None,
        }
    }

    /// The name accepted by [`Self::from_name`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// The console filter this verbosity selects.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal | Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
