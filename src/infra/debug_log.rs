use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, SecondsFormat};
use tracing::{debug, warn};

use crate::services::DebugLog;

/// Appends one timestamped line per record to a plain-text file.
///
/// The file is opened on every record and never rotated; the hook runs once
/// per commit, so the log stays small. Write failures are reported through
/// `tracing` and otherwise ignored: a broken log must never block a commit.
pub struct FileDebugLog {
    path: PathBuf,
}

impl FileDebugLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DebugLog for FileDebugLog {
    fn record(&self, message: &str) {
        debug!("{message}");
        let line = format!(
            "[{}] {message}\n",
            Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
        );
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(err) = result {
            warn!("could not write debug log {}: {err}", self.path.display());
        }
    }
}

#[cfg(test)]
pub use memory::MemoryDebugLog;
