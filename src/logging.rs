//! File logging for the binary.
//!
//! Logs go to rotated files so the TUI never has log lines drawn over it.
//! Initialization happens at most once per process.

use std::path::{Path, PathBuf};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "remindme";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Environment variable holding the log level spec (`info` when unset).
pub const LOG_LEVEL_ENV: &str = "REMINDME_LOG";

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Level from [`LOG_LEVEL_ENV`], falling back to `info`.
pub fn level_from_env() -> String {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// Starts file logging under `log_dir`.
///
/// Calling again with the same directory is a no-op; a different directory is
/// rejected.
///
/// # Errors
/// - `level` is not a valid log spec.
/// - `log_dir` cannot be created or the logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir == log_dir {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ));
    }

    LOGGING_STATE
        .get_or_try_init(|| -> Result<LoggingState, String> {
            std::fs::create_dir_all(log_dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", log_dir.display())
            })?;

            let logger = Logger::try_with_str(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?
                .log_to_file(
                    FileSpec::default()
                        .directory(log_dir)
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::Direct)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;

            info!(
                "event=app_start status=ok version={} level={} log_dir={}",
                env!("CARGO_PKG_VERSION"),
                level,
                log_dir.display()
            );

            Ok(LoggingState {
                log_dir: log_dir.to_path_buf(),
                _logger: logger,
            })
        })
        .map(|_| ())
}
