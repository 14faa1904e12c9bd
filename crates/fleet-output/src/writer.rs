//! The `OutputWriter` trait implemented by backend writers.

use crate::{HistoryRow, OutputResult, VehicleSnapshotRow};

/// Sink for recorded fleet data.
///
/// Errors are reported to the caller; [`SnapshotRecorder`][crate::SnapshotRecorder]
/// keeps the first one for later retrieval.
pub trait OutputWriter: Send {
    /// Write every vehicle of one snapshot.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write a batch of history events.
    fn write_history(&mut self, rows: &[HistoryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
