//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `history.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{HistoryRow, OutputResult, VehicleSnapshotRow};

pub const SNAPSHOT_FILE: &str = "vehicle_snapshots.csv";
pub const HISTORY_FILE: &str = "history.csv";

/// Writes recorded output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    history:   Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (truncating) the two CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record(["tick", "id", "name", "latitude", "longitude", "state"])?;

        let mut history = Writer::from_path(dir.join(HISTORY_FILE))?;
        history.write_record(["id", "vehicle_id", "action", "timestamp"])?;

        Ok(Self { snapshots, history, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.id.clone(),
                row.name.clone(),
                format!("{:.6}", row.latitude),
                format!("{:.6}", row.longitude),
                row.state.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_history(&mut self, rows: &[HistoryRow]) -> OutputResult<()> {
        for row in rows {
            self.history.write_record([
                row.id.to_string().as_str(),
                row.vehicle_id.as_str(),
                row.action.as_str(),
                row.timestamp.as_str(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.history.flush()?;
        Ok(())
    }
}
