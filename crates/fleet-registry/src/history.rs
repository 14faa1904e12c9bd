//! Append-only history of operator actions.

use chrono::{DateTime, Utc};
use fleet_core::{HistoryEventId, VehicleId};
use serde::{Deserialize, Serialize};

/// An immutable history record.
///
/// Serializes with the backend's field names:
/// `{"id": 1, "vehicleId": "3", "action": "start", "timestamp": "2024-…Z"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub id:         HistoryEventId,
    /// Reference to a vehicle; the vehicle need not exist.
    pub vehicle_id: VehicleId,
    /// Free-form label, e.g. `"start"` or `"stop"`.
    pub action:     String,
    pub timestamp:  DateTime<Utc>,
}

/// Ordered, append-only sequence of [`HistoryEvent`]s.
///
/// Ids start at 1 and increase by one per appended record.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    events:  Vec<HistoryEvent>,
    last_id: HistoryEventId,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return a copy of it with its assigned id.
    pub fn append(
        &mut self,
        vehicle_id: VehicleId,
        action:     impl Into<String>,
        timestamp:  DateTime<Utc>,
    ) -> HistoryEvent {
        self.last_id = self.last_id.next();
        let event = HistoryEvent {
            id: self.last_id,
            vehicle_id,
            action: action.into(),
            timestamp,
        };
        self.events.push(event.clone());
        event
    }

    #[inline]
    pub fn events(&self) -> &[HistoryEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
