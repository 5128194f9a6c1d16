//! Tracing subscriber setup: console formatter and initialisation.

use super::{NOTICE_TARGET, Verbosity};

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that renders report events in
/// the dotlink console style: severity tags on the left, result notices
/// behind a `>>>` marker.
struct ConsoleFormatter {
    color: bool,
}

impl ConsoleFormatter {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match level {
            tracing::Level::ERROR => writeln!(writer, "{} {msg}", self.paint("31", "error:")),
            tracing::Level::WARN => writeln!(writer, "{} {msg}", self.paint("33", "warn:")),
            tracing::Level::INFO if target == NOTICE_TARGET => {
                writeln!(writer, "{} {msg}", self.paint("35", ">>>"))
            }
            tracing::Level::INFO => writeln!(writer, "{msg}"),
            tracing::Level::DEBUG => writeln!(writer, "{} {msg}", self.paint("36", "debug:")),
            _ => writeln!(writer, "{} {msg}", self.paint("36", "trace:")),
        }
    }
}

/// Install the global [`tracing`] subscriber that renders console output.
///
/// Warnings and errors go to stderr, everything else to stdout, so piped
/// output stays clean. Must be called once at startup, before any report
/// is emitted.
pub fn init(verbosity: Verbosity, color: bool) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter { color })
        .with_writer(make_writer)
        .with_filter(verbosity.level_filter());

    tracing_subscriber::registry().with(console_layer).init();
}
