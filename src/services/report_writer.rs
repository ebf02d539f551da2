//! Incremental scan report writer
//!
//! The report is created with its header before any worker runs and each
//! Quarantined/Failed line is appended and flushed as the file completes.
//! An interruption mid-scan therefore loses at most the in-flight files;
//! everything already recorded stays on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScanError};
use crate::models::ScanOutcome;

/// Conventional report file name inside the scanned folder
pub const REPORT_FILE_NAME: &str = "silent_music_report.txt";

const REPORT_HEADER: &str = "Deleted / Silent Music Files Report";
const REPORT_SEPARATOR: &str = "===================================";

/// Report path for a scanned folder
pub fn report_path_for(folder: &Path) -> PathBuf {
    folder.join(REPORT_FILE_NAME)
}

/// Write-through report file
pub struct ReportWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReportWriter {
    /// Create (truncate) the report file and write the header lines
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(ScanError::Report)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", REPORT_HEADER).map_err(ScanError::Report)?;
        writeln!(writer, "{}", REPORT_SEPARATOR).map_err(ScanError::Report)?;
        writer.flush().map_err(ScanError::Report)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    /// Append the report line for one outcome, flushed immediately
    ///
    /// Kept outcomes have no line and are a no-op.
    pub fn append(&mut self, outcome: &ScanOutcome) -> Result<()> {
        if let Some(line) = outcome.report_line() {
            writeln!(self.writer, "{}", line).map_err(ScanError::Report)?;
            self.writer.flush().map_err(ScanError::Report)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
