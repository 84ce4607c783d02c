//! Logging bootstrap and panic capture.
//!
//! # Responsibility
//! - Initialize rolling file logs exactly once per process.
//! - Capture panics as structured error events before the default hook.
//!
//! # Invariants
//! - Repeated initialization with the same settings is idempotent.
//! - Conflicting settings are rejected, never silently applied.
//! - Nothing in this module panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "folio";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct LoggingState {
    settings: LogSettings,
    _handle: LoggerHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    level: &'static str,
    directory: PathBuf,
}

/// Starts process-wide logging into rolling files under `log_dir`.
///
/// Idempotent for identical settings; a second call with a different level
/// or directory returns an error and leaves the active logger untouched.
///
/// # Errors
/// - Unsupported `level` text.
/// - Relative `log_dir`, or a directory that cannot be created.
/// - Logger backend startup failure.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let settings = LogSettings {
        level: parse_level(level)?,
        directory: require_absolute(log_dir)?,
    };

    let state = LOGGING.get_or_try_init(|| start_logger(settings.clone()))?;
    if state.settings != settings {
        return Err(format!(
            "logging already active with level `{}` at `{}`; refusing to reconfigure",
            state.settings.level,
            state.settings.directory.display()
        ));
    }
    Ok(())
}

/// Active `(level, directory)` pair, or `None` before initialization.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING
        .get()
        .map(|state| (state.settings.level, state.settings.directory.clone()))
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: LogSettings) -> Result<LoggingState, String> {
    std::fs::create_dir_all(&settings.directory).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            settings.directory.display()
        )
    })?;

    let handle = Logger::try_with_str(settings.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", settings.level))?
        .log_to_file(
            FileSpec::default()
                .directory(&settings.directory)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=log_init module=logging status=ok level={} dir={} version={}",
        settings.level,
        settings.directory.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        settings,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn require_absolute(log_dir: &Path) -> Result<PathBuf, String> {
    if !log_dir.is_absolute() {
        return Err(format!(
            "log_dir must be an absolute path, got `{}`",
            log_dir.display()
        ));
    }
    Ok(log_dir.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Panic payloads can carry arbitrary text; flatten and cap before
        // logging.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location,
            payload_summary(panic_info)
        );
        previous_hook(panic_info);
    }));
}

fn payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };
    flatten_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

fn flatten_message(value: &str, max_chars: usize) -> String {
    let one_line = value.replace(['\n', '\r'], " ");
    let mut capped = one_line.chars().take(max_chars).collect::<String>();
    if one_line.chars().count() > max_chars {
        capped.push_str("...");
    }
    capped
}
