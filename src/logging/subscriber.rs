//! Console and log-file rendering of applyconfig events.
use std::fmt;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::fields::{DRY_RUN_TARGET, EventFields, STAGE_TARGET, SUMMARY_TARGET};
use super::types::FileStatus;

/// Environment variable holding an [`EnvFilter`] directive for console
/// output; overrides `--verbose` when set.
pub const LOG_ENV: &str = "APPLYCONFIG_LOG";

const RESET: &str = "\x1b[0m";

/// `$XDG_CACHE_HOME/applyconfig/<command>.log`, or under `~/.cache` when
/// `XDG_CACHE_HOME` is unset.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map(|home| PathBuf::from(home).join(".cache"))
        })?;
    Some(cache.join("applyconfig").join(format!("{command}.log")))
}

/// Layer writing every event it receives to a plain-text run log, one line
/// per event: `HH:MM:SS TAG subject`.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Start the run log for `command` under the cache directory.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        fs::create_dir_all(path.parent()?).ok()?;
        Self::at(&path)
    }

    /// Truncate `path` and write the run header.
    pub(super) fn at(path: &Path) -> Option<Self> {
        let mut file = fs::File::create(path).ok()?;
        writeln!(
            file,
            "# applyconfig {} run started {}",
            crate::commands::version::version(),
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

fn file_tag(level: Level, target: &str) -> &'static str {
    match (level, target) {
        (Level::ERROR, _) => "ERROR",
        (Level::WARN, _) => "WARN",
        (Level::INFO, STAGE_TARGET) => "==>",
        (Level::INFO, DRY_RUN_TARGET) => "DRY",
        (Level::INFO, _) => "INFO",
        _ => "DEBUG",
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let metadata = event.metadata();
        let tag = file_tag(*metadata.level(), metadata.target());
        let fields = EventFields::of(event);
        let time = chrono::Utc::now().format("%H:%M:%S");
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{time} {tag:<5} {fields}").ok();
        }
    }
}

const fn status_colour(status: Option<FileStatus>) -> &'static str {
    match status {
        Some(FileStatus::Applied) => "\x1b[32m",
        Some(FileStatus::Failed) => "\x1b[31m",
        Some(FileStatus::DryRun) | None => "\x1b[37m",
    }
}

/// Terminal rendering: bold stage headers, status-coloured summary lines and
/// dimmed debug output.
#[derive(Debug)]
struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let fields = EventFields::of(event);
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => writeln!(writer, "\x1b[31mERROR{RESET} {fields}"),
            (Level::WARN, _) => writeln!(writer, "\x1b[33mWARN{RESET}  {fields}"),
            (Level::INFO, STAGE_TARGET) => {
                writeln!(writer, "\x1b[1;34m==>{RESET} \x1b[1m{fields}{RESET}")
            }
            (Level::INFO, DRY_RUN_TARGET) => {
                writeln!(writer, "  \x1b[33m[DRY RUN]{RESET} {fields}")
            }
            (Level::INFO, SUMMARY_TARGET) => {
                writeln!(writer, "  {}{fields}{RESET}", status_colour(fields.status))
            }
            (Level::INFO, _) => writeln!(writer, "  {fields}"),
            _ => writeln!(writer, "  \x1b[2m{fields}{RESET}"),
        }
    }
}

/// Install the global subscriber: console output filtered by [`LOG_ENV`] or
/// `verbose`, plus a run log that always records `DEBUG` and above.
///
/// Must be called once, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let console_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let console = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        )
        .with_filter(console_filter);

    let file = FileLayer::new(command).map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry().with(console).with(file).init();
}
