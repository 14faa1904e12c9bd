//! Map camera auto-tracking.

use fleet_core::GeoPoint;
use fleet_registry::{FleetSnapshot, MapRegion};

/// Camera follow state for the operator map.
///
/// * Until the first centering, each snapshot may fit the camera to the
///   fleet ([`fit_to`](Self::fit_to)).
/// * Each geolocation fix recenters the camera, and the fleet, unless the
///   operator has panned.
/// * A pan disables following until [`recenter`](Self::recenter).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutoTracking {
    pub user_panned:       bool,
    pub has_centered_once: bool,
    last_fix:              Option<GeoPoint>,
}

impl AutoTracking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Region to frame `snapshot` in, or `None` once the camera has been
    /// centered (or the fleet is empty).
    pub fn fit_to(&self, snapshot: &FleetSnapshot) -> Option<MapRegion> {
        if self.has_centered_once {
            return None;
        }
        snapshot.fit_region()
    }

    /// Record a geolocation fix.  Returns the point to center on when
    /// following is active.
    pub fn on_location(&mut self, fix: GeoPoint) -> Option<GeoPoint> {
        self.last_fix = Some(fix);
        if self.user_panned {
            return None;
        }
        self.has_centered_once = true;
        Some(fix)
    }

    /// Any operator camera movement.
    pub fn on_user_pan(&mut self) {
        self.user_panned = true;
    }

    /// The re-center button: resume following and return the last fix.
    /// Does nothing without a fix.
    pub fn recenter(&mut self) -> Option<GeoPoint> {
        let fix = self.last_fix?;
        self.user_panned = false;
        self.has_centered_once = true;
        Some(fix)
    }

    pub fn last_fix(&self) -> Option<GeoPoint> {
        self.last_fix
    }
}
