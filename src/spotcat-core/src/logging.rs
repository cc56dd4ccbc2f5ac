use crate::{config::LoggingConfig, paths::AppDirs};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "spotcat.log";

/// Keeps the background file writer flushing until dropped.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

pub fn init_logging(config: &LoggingConfig, dirs: &AppDirs) -> Result<LoggingGuard, LoggingError> {
    let env_filter = EnvFilter::try_new(config.level.as_filter_directive()).map_err(|source| {
        LoggingError::ParseLevel {
            level: config.level.as_filter_directive().to_string(),
            source,
        }
    })?;

    let file = open_log_file(config, dirs.log_dir())?;
    let (writer, file_guard) = match (config.stdout, file) {
        (true, Some((file, guard))) => (
            BoxMakeWriter::new(
                std::io::stdout
                    .with_max_level(tracing::Level::TRACE)
                    .and(file),
            ),
            Some(guard),
        ),
        (false, Some((file, guard))) => (BoxMakeWriter::new(file), Some(guard)),
        (_, None) => (BoxMakeWriter::new(std::io::stdout), None),
    };

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(config.stdout)
        .with_writer(writer)
        .try_init()
        .map_err(LoggingError::SubscriberInstall)?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Daily-rolled log file, or `None` when `max_log_files` is zero.
fn open_log_file(
    config: &LoggingConfig,
    log_dir: &Path,
) -> Result<Option<(NonBlocking, WorkerGuard)>, LoggingError> {
    if config.max_log_files == 0 {
        return Ok(None);
    }
    fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDirectory {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let file_stem = config.file_name.as_deref().unwrap_or(DEFAULT_LOG_FILE);
    prune_logs(log_dir, file_stem, config.max_log_files)?;

    let appender = tracing_appender::rolling::daily(log_dir, file_stem);
    Ok(Some(tracing_appender::non_blocking(appender)))
}

/// Removes the oldest `file_stem*` files so at most `keep` remain.
fn prune_logs(dir: &Path, file_stem: &str, keep: usize) -> Result<Vec<PathBuf>, LoggingError> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|source| LoggingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(file_stem))
        .filter_map(|entry| {
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((entry.path(), modified))
        })
        .collect();

    if entries.len() <= keep {
        return Ok(Vec::new());
    }
    entries.sort_by_key(|(_, modified)| *modified);

    let excess = entries.len() - keep;
    let mut removed = Vec::with_capacity(excess);
    for (path, _) in entries.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::Cleanup {
            path: path.clone(),
            source,
        })?;
        removed.push(path);
    }
    Ok(removed)
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse log level {level}: {source}")]
    ParseLevel {
        level: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    SubscriberInstall(Box<dyn std::error::Error + Send + Sync>),
    #[error("failed to list log directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove old log file {path}: {source}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },
}
