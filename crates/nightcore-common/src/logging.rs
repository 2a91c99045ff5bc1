//! Colorized console logging for Nightcore.
//!
//! [`LoggingContext::init`] installs a single console layer on the global
//! `tracing` subscriber and hands back a context object that the rest of the
//! application receives explicitly. Initialization is idempotent: every call
//! after the first returns the same context and installs nothing.

use chrono::Local;
use colored::{ColoredString, Colorize};
use once_cell::sync::OnceCell;
use std::fmt;
use tracing::{Event, Level, Span, Subscriber};
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Name under which Discord client diagnostics are reported.
pub const CLIENT_LOGGER: &str = "discord";

/// Default per-target levels applied when `RUST_LOG` is not set.
pub const DEFAULT_TARGET_LEVELS: &[(&str, &str)] = &[
    ("nightcore", "info"),
    ("discord", "info"),
    ("serenity", "info"),
    ("poise", "info"),
    ("reqwest", "info"),
    ("hyper", "info"),
    ("tokio", "info"),
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

static CONTEXT: OnceCell<LoggingContext> = OnceCell::new();

/// Configuration for the logging system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level for targets without an explicit entry.
    pub default_level: String,
    /// Per-target levels, e.g. `("serenity", "info")`.
    pub target_levels: Vec<(String, String)>,
    /// Whether to emit ANSI colors.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            target_levels: DEFAULT_TARGET_LEVELS
                .iter()
                .map(|(target, level)| ((*target).to_string(), (*level).to_string()))
                .collect(),
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Renders the configuration as an `EnvFilter` directive string.
    pub fn directives(&self) -> String {
        std::iter::once(self.default_level.clone())
            .chain(
                self.target_levels
                    .iter()
                    .map(|(target, level)| format!("{target}={level}")),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.directives()))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Process-wide logging handle.
///
/// Holds the effective configuration and the span used to name Discord
/// client output. Events recorded inside [`LoggingContext::client_span`] are
/// printed under [`CLIENT_LOGGER`] and still go through the same console layer.
#[derive(Debug)]
pub struct LoggingContext {
    config: LoggingConfig,
    client: Span,
}

impl LoggingContext {
    /// Installs the console layer once and returns the shared context.
    ///
    /// Later calls return the context created by the first call; their
    /// `config` argument is ignored.
    pub fn init(config: LoggingConfig) -> &'static Self {
        CONTEXT.get_or_init(|| {
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(config.ansi)
                .with_writer(std::io::stdout)
                .event_format(ColorFormatter);

            // A subscriber set elsewhere (e.g. by a test harness) is left in place.
            let _ = tracing_subscriber::registry()
                .with(config.env_filter())
                .with(layer)
                .try_init();

            let client = tracing::info_span!(target: "discord", "discord");

            Self {
                config,
                client,
            }
        })
    }

    /// Returns the context if logging has already been initialized.
    pub fn get() -> Option<&'static Self> {
        CONTEXT.get()
    }

    /// The configuration the context was created with.
    pub const fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Span that names Discord client output.
    pub fn client_span(&self) -> Span {
        self.client.clone()
    }
}

/// Event formatter producing `timestamp ~ name ~ LEVEL ~ message` lines.
///
/// The header is colored by level and the message gets its own color. No
/// escapes are written when the writer has ANSI disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorFormatter;

impl<S, N> FormatEvent<S, N> for ColorFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let name = ctx
            .event_scope()
            .and_then(|scope| scope.from_root().next())
            .map_or(metadata.target(), |span| span.name());

        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let header = render_header(&timestamp, name, level);

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "{}{}",
                paint_header(&header, level),
                paint_message(&message, level)
            )?;
        } else {
            write!(writer, "{header}{message}")?;
        }
        writeln!(writer)
    }
}

/// Renders the uncolored line header, e.g. `2024-01-01 12:00:00,000 ~ discord  ~ INFO ~ `.
pub fn render_header(timestamp: &str, name: &str, level: Level) -> String {
    format!("{timestamp} ~ {name:<8} ~ {level} ~ ")
}

fn paint_header(text: &str, level: Level) -> ColoredString {
    match level {
        Level::ERROR => text.red(),
        Level::WARN => text.yellow(),
        Level::INFO => text.white(),
        Level::DEBUG => text.cyan(),
        Level::TRACE => text.bright_black(),
    }
}

fn paint_message(text: &str, level: Level) -> ColoredString {
    match level {
        Level::ERROR => text.red(),
        Level::WARN => text.yellow(),
        Level::INFO => text.bright_magenta(),
        Level::DEBUG => text.cyan(),
        Level::TRACE => text.bright_black(),
    }
}
