//! The `VehicleRegistry`: vehicles keyed by id plus the history log.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fleet_core::{GeoPoint, RideState, VehicleId};

use crate::{FleetSnapshot, HistoryEvent, HistoryLog, RegistryError, RegistryResult, Vehicle};

/// Owns every [`Vehicle`] in the session and the [`HistoryLog`].
///
/// Vehicles are kept in seeding order in a `Vec` with a side index for
/// id lookup.  The set of ids is fixed between calls to
/// [`replace_all`][Self::replace_all]; nothing is ever removed individually.
///
/// Lookups of unknown ids are not errors: updates report `false` and leave
/// the registry unchanged.
#[derive(Debug, Clone, Default)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
    index:    HashMap<VehicleId, usize>,
    history:  HistoryLog,
}

impl VehicleRegistry {
    /// Build a registry from `vehicles`, rejecting duplicate ids.
    pub fn new(vehicles: Vec<Vehicle>) -> RegistryResult<Self> {
        let index = build_index(&vehicles)?;
        Ok(Self { vehicles, index, history: HistoryLog::new() })
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// O(n) owned copy of every vehicle, in registry order.
    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot::new(self.vehicles.clone())
    }

    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.index.get(id).map(|&i| &self.vehicles[i])
    }

    pub fn contains(&self, id: &VehicleId) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &VehicleId> {
        self.vehicles.iter().map(Vehicle::id)
    }

    /// Replace the mutable fields of `id`.  Returns `false` for an unknown id.
    pub fn update(&mut self, id: &VehicleId, position: GeoPoint, state: RideState) -> bool {
        match self.get_mut(id) {
            Some(v) => {
                v.position = position;
                v.state = state;
                true
            }
            None => false,
        }
    }

    /// Set only the ride state of `id`.  Returns `false` for an unknown id.
    pub fn set_state(&mut self, id: &VehicleId, state: RideState) -> bool {
        match self.get_mut(id) {
            Some(v) => {
                v.state = state;
                true
            }
            None => false,
        }
    }

    /// Visit every vehicle in registry order with mutable access to its
    /// position and ride state.  The id is passed by shared reference so the
    /// index can never go stale.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&VehicleId, &mut GeoPoint, &mut RideState),
    {
        for v in &mut self.vehicles {
            let Vehicle { id, position, state, .. } = v;
            f(id, position, state);
        }
    }

    /// Swap in a freshly seeded fleet.  The history log is kept.
    pub fn replace_all(&mut self, vehicles: Vec<Vehicle>) -> RegistryResult<()> {
        self.index = build_index(&vehicles)?;
        self.vehicles = vehicles;
        Ok(())
    }

    /// Append a history record and return it with its assigned id.
    pub fn append_history(
        &mut self,
        vehicle_id: VehicleId,
        action:     impl Into<String>,
        timestamp:  DateTime<Utc>,
    ) -> HistoryEvent {
        self.history.append(vehicle_id, action, timestamp)
    }

    #[inline]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    fn get_mut(&mut self, id: &VehicleId) -> Option<&mut Vehicle> {
        let i = *self.index.get(id)?;
        self.vehicles.get_mut(i)
    }
}

fn build_index(vehicles: &[Vehicle]) -> RegistryResult<HashMap<VehicleId, usize>> {
    let mut index = HashMap::with_capacity(vehicles.len());
    for (i, v) in vehicles.iter().enumerate() {
        if index.insert(v.id().clone(), i).is_some() {
            return Err(RegistryError::DuplicateVehicle(v.id().clone()));
        }
    }
    Ok(index)
}
