//! Plain-text sweep journal
//!
//! Every sweep run appends timestamped lines to a log file so there is a
//! durable record of what was deleted, independent of console output.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

/// Timestamp format used for every journal line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only, timestamped log file.
pub struct Journal {
    writer: BufWriter<File>,
}

impl Journal {
    /// Opens (or creates) the journal at `path` in append mode.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Opening journal {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Appends an informational line.
    pub fn info(&mut self, message: &str) -> Result<()> {
        self.write_line("INFO", message)
    }

    /// Appends an error line.
    pub fn error(&mut self, message: &str) -> Result<()> {
        self.write_line("ERROR", message)
    }

    /// Flushes buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Flushing journal")?;
        Ok(())
    }

    fn write_line(&mut self, level: &str, message: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        writeln!(self.writer, "{timestamp} {level} {message}").context("Writing journal line")?;
        Ok(())
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
