//! Geographic coordinate type and path helpers.
//!
//! `GeoPoint` uses `f64` latitude/longitude: the simulation perturbs
//! positions by thousandths of a degree per tick, and the wire format
//! carries IEEE-754 doubles.

use serde::{Deserialize, Serialize};

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both components are finite and inside
    /// [-90, 90] × [-180, 180].
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Latitude clamped to [-90, 90], longitude wrapped into [-180, 180].
    /// Points already in range are returned unchanged.
    pub fn normalized(self) -> Self {
        let lat = self.lat.clamp(-90.0, 90.0);
        let lon = if (-180.0..=180.0).contains(&self.lon) {
            self.lon
        } else {
            (self.lon + 180.0).rem_euclid(360.0) - 180.0
        };
        Self { lat, lon }
    }

    /// Return the point shifted by `d_lat` / `d_lon` degrees, normalized.
    #[inline]
    pub fn offset(self, d_lat: f64, d_lon: f64) -> Self {
        Self { lat: self.lat + d_lat, lon: self.lon + d_lon }.normalized()
    }

    /// Axis-aligned box check in degrees.
    #[inline]
    pub fn within_bbox(self, center: GeoPoint, half_deg: f64) -> bool {
        (self.lat - center.lat).abs() <= half_deg
            && (self.lon - center.lon).abs() <= half_deg
    }

    /// `points` evenly spaced positions on a circle of `radius_deg` around
    /// `self`, starting due north and running clockwise on a north-up map.
    ///
    /// Waypoint `i` sits at angle `θ = 2π·i / points`, with
    /// `lat = center.lat + r·cos θ` and `lon = center.lon + r·sin θ`.
    pub fn closed_loop(self, radius_deg: f64, points: usize) -> Vec<GeoPoint> {
        (0..points)
            .map(|i| {
                let theta = (i as f64 / points as f64) * std::f64::consts::TAU;
                self.offset(radius_deg * theta.cos(), radius_deg * theta.sin())
            })
            .collect()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
