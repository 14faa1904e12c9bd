//! `fleet-output` — recording what the operator saw.
//!
//! | File                    | Rows                                              |
//! |-------------------------|---------------------------------------------------|
//! | `vehicle_snapshots.csv` | one per vehicle per received snapshot             |
//! | `history.csv`           | one per history event, written at the end of run  |
//!
//! [`CsvWriter`] implements [`OutputWriter`]; [`SnapshotRecorder`] drives any
//! writer from the controller's [`FleetObserver`][fleet_controller::FleetObserver]
//! callbacks.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::{CsvWriter, SnapshotRecorder};
//!
//! let recorder = SnapshotRecorder::new(CsvWriter::new(Path::new("./out"))?);
//! let controller = FleetController::new(source).with_observer(recorder.clone());
//! // … run …
//! recorder.record_history(&controller.fetch_history().await?);
//! recorder.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotRecorder;
pub use row::{HistoryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
