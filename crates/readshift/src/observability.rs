//! Logging setup: human-readable output on stderr plus an optional JSON log file.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_PATH_ENV: &str = "READSHIFT_LOG_PATH";
const LOG_DIR_ENV: &str = "READSHIFT_LOG_DIR";
const LOG_FILE_PREFIX: &str = "readshift.log";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Explicit log file; wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `READSHIFT_LOG_PATH` and `READSHIFT_LOG_DIR`. A configured
    /// `log_dir` is used when the environment does not name one.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        Self::from_values(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            log_dir,
        )
    }

    fn from_values(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let non_empty = |p: PathBuf| (!p.as_os_str().is_empty()).then_some(p);
        Self {
            log_path: env_path.and_then(non_empty),
            log_dir: env_dir.and_then(non_empty).or(config_dir),
        }
    }

    fn file_target(&self) -> Option<(PathBuf, String)> {
        if let Some(path) = &self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let name = path.file_name()?.to_string_lossy().into_owned();
            return Some((dir, name));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), LOG_FILE_PREFIX.to_string()))
    }
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` raises the level, and the configured level applies by default.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(level_directive(quiet, verbose, default_level))
}

fn level_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// until exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match config.file_target() {
        Some((dir, name)) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                anyhow::anyhow!("failed to create log directory {}: {e}", dir.display())
            })?;
            let appender = tracing_appender::rolling::daily(&dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_path_wins_over_directories() {
        let cfg = ObservabilityConfig::from_values(
            Some(PathBuf::from("/var/log/rs/out.log")),
            Some(PathBuf::from("/env/dir")),
            Some(PathBuf::from("/config/dir")),
        );
        assert_eq!(
            cfg.file_target(),
            Some((PathBuf::from("/var/log/rs"), "out.log".to_string()))
        );
    }

    #[test]
    fn env_dir_wins_over_config_dir() {
        let cfg = ObservabilityConfig::from_values(
            None,
            Some(PathBuf::from("/env/dir")),
            Some(PathBuf::from("/config/dir")),
        );
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/env/dir")));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let cfg = ObservabilityConfig::from_values(
            Some(PathBuf::new()),
            Some(PathBuf::new()),
            Some(PathBuf::from("/config/dir")),
        );
        assert!(cfg.log_path.is_none());
        assert_eq!(
            cfg.file_target(),
            Some((PathBuf::from("/config/dir"), LOG_FILE_PREFIX.to_string()))
        );
    }

    #[test]
    fn no_file_logging_by_default() {
        assert!(ObservabilityConfig::default().file_target().is_none());
    }

    #[test]
    fn bare_file_name_logs_to_current_directory() {
        let cfg = ObservabilityConfig::from_values(Some(PathBuf::from("run.log")), None, None);
        assert_eq!(
            cfg.file_target(),
            Some((PathBuf::from("."), "run.log".to_string()))
        );
    }

    #[test]
    fn level_directive_flags() {
        assert_eq!(level_directive(true, 2, "info"), "error");
        assert_eq!(level_directive(false, 0, "warn"), "warn");
        assert_eq!(level_directive(false, 1, "info"), "debug");
        assert_eq!(level_directive(false, 3, "info"), "trace");
    }
}
