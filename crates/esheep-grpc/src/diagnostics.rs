//! Per-call diagnostics log.
//!
//! When diagnostics are enabled the facade owns one [`DiagnosticsLog`] and
//! appends a line per call:
//!
//! ```text
//! create_room response,\terrCode:0\tmsg:ok\tstate:1\troom_id:42
//! get_inform error:can't get response.
//! ```

use crate::proto::{
    ActionRes, ActionSpaceRes, CommonRes, CreateRoomRes, InformRes, ObservationRes,
    ResponseStatus,
};
use chrono::Local;
use esheep_core::EsheepResult;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of every diagnostics file name.
pub const LOG_FILE_PREFIX: &str = "log.";

/// `chrono` format of the timestamp that follows the prefix.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Label/value pairs written for a response.
pub trait DiagnosticFields: ResponseStatus {
    /// Operation-specific fields, written after the status fields.
    fn extra_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn diagnostic_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("errCode", self.err_code().to_string()),
            ("msg", self.msg().to_string()),
            ("state", self.state().to_string()),
        ];
        fields.extend(self.extra_fields());
        fields
    }
}

impl DiagnosticFields for CommonRes {}

impl DiagnosticFields for ActionSpaceRes {}

impl DiagnosticFields for CreateRoomRes {
    fn extra_fields(&self) -> Vec<(&'static str, String)> {
        vec![("room_id", self.room_id.clone())]
    }
}

impl DiagnosticFields for ActionRes {
    fn extra_fields(&self) -> Vec<(&'static str, String)> {
        vec![("frame_index", self.frame_index.to_string())]
    }
}

impl DiagnosticFields for ObservationRes {
    fn extra_fields(&self) -> Vec<(&'static str, String)> {
        vec![("frame_index", self.frame_index.to_string())]
    }
}

impl DiagnosticFields for InformRes {
    fn extra_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("score", self.score.to_string()),
            ("kills", self.kills.to_string()),
            ("health", self.health.to_string()),
            ("frame_index", self.frame_index.to_string()),
        ]
    }
}

/// Formats the line written for a received response.
pub fn response_line(operation: &str, fields: &[(&'static str, String)]) -> String {
    let mut line = format!("{} response,", operation);
    for (label, value) in fields {
        line.push('\t');
        line.push_str(label);
        line.push(':');
        line.push_str(value);
    }
    line.push('\n');
    line
}

/// Formats the line written when a call produced no response.
pub fn missing_line(operation: &str) -> String {
    format!("{} error:can't get response.\n", operation)
}

/// Returns the file name for a log opened now.
pub fn log_file_name() -> String {
    format!("{}{}", LOG_FILE_PREFIX, Local::now().format(LOG_TIMESTAMP_FORMAT))
}

/// Append-only diagnostics file owned by one facade instance.
#[derive(Debug)]
pub struct DiagnosticsLog {
    path: PathBuf,
    writer: LineWriter<File>,
}

impl DiagnosticsLog {
    /// Creates `log.<timestamp>` inside `dir`.
    pub fn create(dir: impl AsRef<Path>) -> EsheepResult<Self> {
        Self::open(dir.as_ref().join(log_file_name()))
    }

    /// Opens `path` for append, creating it if needed.
    pub fn open(path: impl Into<PathBuf>) -> EsheepResult<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!("Diagnostics log opened at {}", path.display());

        Ok(Self {
            path,
            writer: LineWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the field dump for `response`.
    pub fn record_response<R: DiagnosticFields>(&mut self, operation: &str, response: &R) -> io::Result<()> {
        let line = response_line(operation, &response.diagnostic_fields());
        self.writer.write_all(line.as_bytes())
    }

    /// Appends the "can't get response" notice.
    pub fn record_missing(&mut self, operation: &str) -> io::Result<()> {
        self.writer.write_all(missing_line(operation).as_bytes())
    }
}
