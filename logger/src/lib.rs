use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};

/// A JSON-lines error log attached to a single connection via the `logfile`
/// connection-string key. Each entry is one object per line with `error`,
/// `time` (RFC3339) and `level` fields.
///
/// Logging must never take a connection down: opening the sink reports
/// failure by returning `None`, and failed writes are dropped.
#[derive(Debug)]
pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    /// Opens `path` for appending, creating the file if needed. Returns
    /// `None` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Option<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()?;
        Some(FileLogger {
            file: Mutex::new(file),
        })
    }

    /// Appends one error entry. Write failures are swallowed.
    pub fn error(&self, message: &str) {
        let entry = json!({
            "error": message,
            "time": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            "level": "error",
        });
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{entry}");
        }
    }
}
