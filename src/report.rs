use csv::Writer;
use std::fs::File;
use std::path::Path;

use crate::error::SinkError;
use crate::metadata::{MediaRecord, HEADER};

/// CSV report, owned by the single consumer of completion events.
///
/// The header is written on creation. Each row is flushed as soon as it is
/// appended, so a failure later in the run keeps everything written so far.
/// Dropping the sink without `finish` still flushes, ignoring errors.
pub struct ReportSink {
    writer: Writer<File>,
    rows: usize,
}

impl ReportSink {
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = Writer::from_writer(file);
        writer.write_record(HEADER)?;
        writer.flush().map_err(SinkError::Flush)?;

        Ok(ReportSink { writer, rows: 0 })
    }

    pub fn append(&mut self, record: &MediaRecord) -> Result<(), SinkError> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush().map_err(SinkError::Flush)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and close the output. Returns the number of data rows written.
    pub fn finish(mut self) -> Result<usize, SinkError> {
        self.writer.flush().map_err(SinkError::Flush)?;
        Ok(self.rows)
    }
}
