//! Sparse per-vehicle route assignments.

use std::collections::{HashMap, VecDeque};

use fleet_core::{GeoPoint, VehicleId};

/// One step taken along an assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStep {
    /// The waypoint the vehicle moves to.
    pub waypoint: GeoPoint,
    /// `true` when that was the last waypoint.  The assignment has already
    /// been removed.
    pub finished: bool,
}

/// Remaining waypoints for every vehicle currently following a route.
///
/// The map is sparse: only vehicles on a lap have an entry, and an entry is
/// removed as soon as its queue empties.
#[derive(Debug, Clone, Default)]
pub struct RouteAssignments {
    routes: HashMap<VehicleId, VecDeque<GeoPoint>>,
}

impl RouteAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `vehicle` a fresh copy of `path`, replacing any existing
    /// assignment.  An empty `path` clears the assignment instead.
    pub fn assign(&mut self, vehicle: VehicleId, path: &[GeoPoint]) {
        if path.is_empty() {
            self.routes.remove(&vehicle);
        } else {
            self.routes.insert(vehicle, path.iter().copied().collect());
        }
    }

    /// Pop the next waypoint for `vehicle`.
    ///
    /// Returns `None` if the vehicle has no assignment.
    pub fn advance(&mut self, vehicle: &VehicleId) -> Option<RouteStep> {
        let queue = self.routes.get_mut(vehicle)?;
        let Some(waypoint) = queue.pop_front() else {
            self.routes.remove(vehicle);
            return None;
        };
        let finished = queue.is_empty();
        if finished {
            self.routes.remove(vehicle);
        }
        Some(RouteStep { waypoint, finished })
    }

    /// Drop the assignment of `vehicle`, if any.
    pub fn remove(&mut self, vehicle: &VehicleId) -> bool {
        self.routes.remove(vehicle).is_some()
    }

    /// Waypoints left for `vehicle`; `0` when unassigned.
    pub fn remaining(&self, vehicle: &VehicleId) -> usize {
        self.routes.get(vehicle).map_or(0, VecDeque::len)
    }

    pub fn contains(&self, vehicle: &VehicleId) -> bool {
        self.routes.contains_key(vehicle)
    }

    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// Number of vehicles currently on a route.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
