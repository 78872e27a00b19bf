//! Append-only CSV sink

use crate::output::traits::{RecordSink, SinkResult};
use crate::record::MovieRecord;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

/// CSV-backed record sink
///
/// The file is opened in append mode once for the whole run and never
/// truncated. Rows are comma-separated with minimal double-quote escaping
/// and no header, in field order title, release date, rating, synopsis.
pub struct CsvSink {
    writer: Mutex<csv::Writer<std::fs::File>>,
}

impl CsvSink {
    /// Opens (or creates) the CSV file at `path` for appending
    pub fn open(path: &Path) -> SinkResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        Ok(Self {
            writer: Mutex::new(writer),
        })
    }
}

impl RecordSink for CsvSink {
    fn commit(&self, record: &MovieRecord) -> SinkResult<bool> {
        let Some(row) = record.as_row() else {
            tracing::debug!("Discarding incomplete record");
            return Ok(false);
        };

        // The mutex serializes concurrent writers; flushing inside the
        // critical section keeps whole rows contiguous in the file.
        let mut writer = self.writer.lock().unwrap();
        writer.write_record(row)?;
        writer.flush()?;

        Ok(true)
    }
}
