#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate and station location types.
//!
//! Stations may require a student to be physically near them before a scan
//! counts. These types describe where a station is and why a location check
//! failed; the distance math lives in `school_commute_geography`.

use serde::{Deserialize, Serialize};

/// Allowed distance from a station when the station does not set one.
pub const DEFAULT_LOCATION_RADIUS_M: f64 = 50.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Location settings of a scan station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StationLocation {
    /// Station position, if one was recorded.
    pub coordinates: Option<Coordinates>,
    /// Whether scans must happen within `location_radius_meters`.
    #[serde(default)]
    pub require_location: bool,
    /// Allowed distance, defaults to [`DEFAULT_LOCATION_RADIUS_M`].
    pub location_radius_meters: Option<f64>,
}

impl StationLocation {
    /// Returns the configured radius or [`DEFAULT_LOCATION_RADIUS_M`].
    #[must_use]
    pub fn radius_m(&self) -> f64 {
        self.location_radius_meters
            .unwrap_or(DEFAULT_LOCATION_RADIUS_M)
    }
}

/// Why a scan location could not be verified.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LocationError {
    /// The device did not provide a position.
    #[error("could not determine your location, check location permissions")]
    Unavailable,

    /// The device is outside the station radius.
    #[error("too far from the station: {:.0} m (max: {radius_m} m)", .distance_m)]
    TooFar {
        /// Measured distance to the station in meters.
        distance_m: f64,
        /// Allowed radius in meters.
        radius_m: f64,
    },
}

impl LocationError {
    /// Measured distance to the station, when one was available.
    #[must_use]
    pub const fn distance_m(&self) -> Option<f64> {
        match self {
            Self::Unavailable => None,
            Self::TooFar { distance_m, .. } => Some(*distance_m),
        }
    }
}
