//! Tests for fleet-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, HISTORY_FILE, SNAPSHOT_FILE};
    use crate::row::{HistoryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(id: &str, tick: u64) -> VehicleSnapshotRow {
        VehicleSnapshotRow {
            tick,
            id:        id.to_owned(),
            name:      format!("Veh{id}"),
            latitude:  37.7749,
            longitude: -122.4194,
            state:     "waiting",
        }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_in_new_directory() {
        let dir = tmp();
        let out = dir.path().join("run-1");
        let _w = CsvWriter::new(&out).unwrap();
        assert!(out.join(SNAPSHOT_FILE).exists());
        assert!(out.join(HISTORY_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(dir.path().join(SNAPSHOT_FILE)), ["tick", "id", "name", "latitude", "longitude", "state"]);
        assert_eq!(headers(dir.path().join(HISTORY_FILE)), ["id", "vehicle_id", "action", "timestamp"]);
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row("1", 4), snap_row("2", 4)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SNAPSHOT_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4");          // tick
        assert_eq!(&rows[0][1], "1");          // id
        assert_eq!(&rows[0][2], "Veh1");
        assert_eq!(&rows[0][3], "37.774900");
        assert_eq!(&rows[0][4], "-122.419400");
        assert_eq!(&rows[1][5], "waiting");
    }

    #[test]
    fn csv_history_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = HistoryRow {
            id:         1,
            vehicle_id: "7".into(),
            action:     "start".into(),
            timestamp:  "2024-05-01T12:00:00+00:00".into(),
        };
        w.write_history(&[row]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(HISTORY_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][1], "7");
        assert_eq!(&rows[0][2], "start");
        assert_eq!(&rows[0][3], "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod recorder_tests {
    use chrono::{TimeZone, Utc};
    use fleet_controller::FleetObserver;
    use fleet_core::{GeoPoint, HistoryEventId, RideState, VehicleId};
    use fleet_registry::{FleetSnapshot, HistoryEvent, Vehicle};

    use crate::csv::SNAPSHOT_FILE;
    use crate::row::{HistoryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputError, OutputResult, SnapshotRecorder};

    /// In-memory writer capturing everything it is given.
    #[derive(Default)]
    struct Capture {
        snapshots: Vec<VehicleSnapshotRow>,
        history:   Vec<HistoryRow>,
        finishes:  usize,
        fail:      bool,
    }

    impl OutputWriter for Capture {
        fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.snapshots.extend_from_slice(rows);
            Ok(())
        }

        fn write_history(&mut self, rows: &[HistoryRow]) -> OutputResult<()> {
            self.history.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    fn fleet() -> FleetSnapshot {
        FleetSnapshot::new(vec![
            Vehicle::new(VehicleId::from("1"), "Veh1", GeoPoint::new(1.0, 2.0), RideState::Waiting),
            Vehicle::new(VehicleId::from("2"), "Veh2", GeoPoint::new(3.0, 4.0), RideState::InProgress),
        ])
    }

    #[test]
    fn snapshots_become_rows_tagged_with_sequence() {
        let recorder = SnapshotRecorder::new(Capture::default());
        let mut observer = recorder.clone();
        observer.on_snapshot(1, &fleet());
        observer.on_snapshot(2, &fleet());
        observer.on_snapshot(3, &FleetSnapshot::default());

        assert_eq!(recorder.rows_written(), 4);
        let inner = recorder.inner.lock();
        assert_eq!(inner.writer.snapshots[0].tick, 1);
        assert_eq!(inner.writer.snapshots[3].tick, 2);
        assert_eq!(inner.writer.snapshots[3].id, "2");
        assert_eq!(inner.writer.snapshots[3].state, "in_progress");
    }

    #[test]
    fn history_events_are_recorded() {
        let recorder = SnapshotRecorder::new(Capture::default());
        let event = HistoryEvent {
            id:         HistoryEventId(1),
            vehicle_id: VehicleId::from("1"),
            action:     "start".into(),
            timestamp:  Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        recorder.record_history(&[event]);
        recorder.finish().unwrap();

        let inner = recorder.inner.lock();
        assert_eq!(inner.writer.history[0].timestamp, "2024-05-01T12:00:00+00:00");
        assert_eq!(inner.writer.finishes, 1);
    }

    #[test]
    fn first_write_error_surfaces_at_finish() {
        let recorder = SnapshotRecorder::new(Capture { fail: true, ..Capture::default() });
        recorder.clone().on_snapshot(1, &fleet());
        assert_eq!(recorder.rows_written(), 0);
        assert!(matches!(recorder.finish(), Err(OutputError::Io(_))));
        assert!(recorder.finish().is_ok());
    }

    #[test]
    fn recorder_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = SnapshotRecorder::new(CsvWriter::new(dir.path()).unwrap());
        recorder.clone().on_snapshot(1, &fleet());
        recorder.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SNAPSHOT_FILE)).unwrap();
        assert_eq!(rdr.records().count(), 2);
    }
}
