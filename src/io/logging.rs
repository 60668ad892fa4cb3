//! Per-run log file and console tracing setup

use crate::io::error::{Result, file_system};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only log of everything a segmentation run does
///
/// Every line is timestamped and mirrored to `tracing` at debug level, so the
/// console shows the same record with `--verbose`. A console-only log skips
/// the file and keeps the mirroring.
#[derive(Debug)]
pub struct LogFile {
    sink: Option<(PathBuf, File)>,
}

impl LogFile {
    /// Open (or create) a log file for appending
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be created
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(file_system(&path, "open log file"))?;

        Ok(Self {
            sink: Some((path, file)),
        })
    }

    /// Log that only mirrors to `tracing`
    pub const fn console() -> Self {
        Self { sink: None }
    }

    /// Location of the log file, `None` for a console-only log
    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|(path, _)| path.as_path())
    }

    /// Append a single timestamped message
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the log file fails
    pub fn log(&mut self, message: &str) -> Result<()> {
        tracing::debug!("{message}");
        let Some((path, file)) = self.sink.as_mut() else {
            return Ok(());
        };
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        writeln!(file, "[{timestamp}] {message}")
            .map_err(file_system(path.as_path(), "write log file"))
    }

    /// Append captured program output, one log line per output line
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the log file fails
    pub fn log_output(&mut self, stream: &str, output: &str) -> Result<()> {
        for line in output.lines().filter(|line| !line.trim().is_empty()) {
            self.log(&format!("{stream}: {line}"))?;
        }
        Ok(())
    }
}

/// Install the console subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flag. Calling this more
/// than once keeps the first subscriber.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "anatseg=debug"
    } else {
        "anatseg=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
