//! Production [`Report`] sink backed by `tracing`.

use super::{NOTICE_TARGET, Report};

/// Emits every report as a [`tracing`] event for the console subscriber.
///
/// Carries no state of its own; verbosity filtering and color handling
/// happen in the subscriber installed by
/// [`init_subscriber`](super::init_subscriber).
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Logger {
    /// Create a logger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Report for Logger {
    fn notice(&self, msg: &str) {
        tracing::info!(target: NOTICE_TARGET, "{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn trace(&self, msg: &str) {
        tracing::trace!("{msg}");
    }
}
