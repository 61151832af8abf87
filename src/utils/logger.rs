use crate::utils::error::{FilterError, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "Logs.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Critical,
}

/// Leveled log capability handed to the repository and service.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, detail: Option<&str>);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message, None);
    }

    fn error(&self, message: &str, detail: Option<&str>) {
        self.log(LogLevel::Error, message, detail);
    }

    fn critical(&self, message: &str, detail: Option<&str>) {
        self.log(LogLevel::Critical, message, detail);
    }
}

/// Forwards to the process-wide `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str, detail: Option<&str>) {
        let detail = detail.unwrap_or_default();
        match level {
            LogLevel::Info => tracing::info!(detail, "{}", message),
            LogLevel::Warning => tracing::warn!(detail, "{}", message),
            LogLevel::Error => tracing::error!(detail, "{}", message),
            LogLevel::Critical => tracing::error!(critical = true, detail, "{}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub detail: Option<String>,
}

/// Keeps every entry in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, message: &str, detail: Option<&str>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                message: message.to_string(),
                detail: detail.map(str::to_string),
            });
        }
    }
}

/// `<dir>/Logs.txt` when `dir` is an existing directory, `./Logs.txt` otherwise.
pub fn resolve_log_path(log_dir: Option<&str>) -> PathBuf {
    match log_dir {
        Some(dir) if !dir.is_empty() && Path::new(dir).is_dir() => Path::new(dir).join(LOG_FILE_NAME),
        _ => PathBuf::from(LOG_FILE_NAME),
    }
}

pub fn init_cli_logger(verbose: bool, log_file: &Path) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("delivery_filter=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("delivery_filter=info"))
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| FilterError::from_io(log_file.display().to_string(), e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| FilterError::Unexpected {
            message: format!("failed to install logger: {}", e),
        })
}
