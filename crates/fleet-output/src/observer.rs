//! `SnapshotRecorder<W>` bridges `FleetObserver` to an `OutputWriter`.

use std::sync::Arc;

use fleet_controller::FleetObserver;
use fleet_registry::{FleetSnapshot, HistoryEvent};
use parking_lot::Mutex;
use tracing::warn;

use crate::row::{HistoryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

pub(crate) struct Inner<W> {
    pub(crate) writer:     W,
    pub(crate) rows:       u64,
    pub(crate) last_error: Option<OutputError>,
}

impl<W: OutputWriter> Inner<W> {
    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// A [`FleetObserver`] that writes every received snapshot to any
/// [`OutputWriter`].
///
/// Clones share the writer: hand one clone to the controller and keep
/// another to record history and [`finish`][Self::finish] at the end.
/// Write errors from observer callbacks are stored, since callbacks have no
/// return value.
pub struct SnapshotRecorder<W: OutputWriter> {
    pub(crate) inner: Arc<Mutex<Inner<W>>>,
}

impl<W: OutputWriter> Clone for SnapshotRecorder<W> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<W: OutputWriter> SnapshotRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { inner: Arc::new(Mutex::new(Inner { writer, rows: 0, last_error: None })) }
    }

    /// Snapshot rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.inner.lock().rows
    }

    /// Write `events` as history rows.
    pub fn record_history(&self, events: &[HistoryEvent]) {
        let rows: Vec<HistoryRow> = events.iter().map(HistoryRow::from).collect();
        let mut inner = self.inner.lock();
        let result = inner.writer.write_history(&rows);
        inner.store_err(result);
    }

    /// Flush the writer and report the first error seen, if any.
    pub fn finish(&self) -> OutputResult<()> {
        let mut inner = self.inner.lock();
        let result = inner.writer.finish();
        inner.store_err(result);
        inner.last_error.take().map_or(Ok(()), Err)
    }
}

impl<W: OutputWriter> FleetObserver for SnapshotRecorder<W> {
    fn on_snapshot(&mut self, seq: u64, snapshot: &FleetSnapshot) {
        if snapshot.is_empty() {
            return;
        }
        let rows: Vec<VehicleSnapshotRow> =
            snapshot.iter().map(|v| VehicleSnapshotRow::from_vehicle(seq, v)).collect();
        let mut inner = self.inner.lock();
        let result = inner.writer.write_snapshots(&rows);
        if result.is_ok() {
            inner.rows += rows.len() as u64;
        }
        inner.store_err(result);
    }
}
