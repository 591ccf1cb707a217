use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::now_seconds;

/// Append-only text log for failures that are absorbed rather than returned.
///
/// Each line reads `[<iso-timestamp>] <message>`. Failing to write the log
/// itself is reported through tracing only.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a non-fatal failure
    pub fn record(&self, message: &str) {
        tracing::warn!(error_log = %self.path.display(), "{}", message);

        let line = format!("[{}] {}\n", now_seconds().format("%Y-%m-%dT%H:%M:%S"), message);

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = result {
            tracing::error!(
                error = %e,
                error_log = %self.path.display(),
                "Failed to append to error log"
            );
        }
    }
}
