//! Per-run log file and logger setup

use crate::error::{Result, ScreenerError};
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const LOG_FILE_PREFIX: &str = "resume_screener_";
pub const LOG_FILE_EXTENSION: &str = "log";

/// Timestamp layout of every log line, `2026-10-19 12:30:00,123`
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// State of a single pipeline run that log output hangs off.
///
/// Created once in `main` and handed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct RunContext {
    log_file: PathBuf,
    started_at: DateTime<Local>,
}

impl RunContext {
    /// Create the logs directory and pick a timestamped log file inside it
    pub fn new(logs_dir: &Path) -> Result<Self> {
        fs::create_dir_all(logs_dir)?;
        let started_at = Local::now();
        let log_file = logs_dir.join(format!(
            "{}{}.{}",
            LOG_FILE_PREFIX,
            started_at.format("%Y-%m-%d_%H-%M-%S"),
            LOG_FILE_EXTENSION
        ));

        Ok(Self { log_file, started_at })
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }
}

/// Writes every log line to stdout and the run's log file
struct TeeWriter {
    stdout: io::Stdout,
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.file.flush()
    }
}

/// Render one record in the `time - target - LEVEL - message` layout
pub fn format_line(timestamp: &DateTime<Local>, target: &str, level: log::Level, message: &str) -> String {
    format!(
        "{} - {} - {} - {}",
        timestamp.format(LOG_TIMESTAMP_FORMAT),
        target,
        level,
        message
    )
}

/// Initialize the global logger.
///
/// `RUST_LOG` overrides the level chosen by `verbose`. Without a run context
/// lines go to stderr only.
pub fn init_logging(verbose: bool, run: Option<&RunContext>) -> Result<()> {
    let log_level = if verbose { "debug" } else { "info" };

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{}",
            format_line(&Local::now(), record.target(), record.level(), &record.args().to_string())
        )
    });

    if let Some(run) = run {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(run.log_file())?;
        builder.target(env_logger::Target::Pipe(Box::new(TeeWriter {
            stdout: io::stdout(),
            file,
        })));
    }

    builder
        .try_init()
        .map_err(|e| ScreenerError::Configuration(format!("Failed to initialize logging: {}", e)))
}
