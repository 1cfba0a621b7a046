#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Station proximity checks for scan eligibility.
//!
//! Computes great-circle distances with the haversine formula from `geo`
//! and compares them against a station's allowed radius.

use geo::{Distance, Haversine, Point};
use school_commute_geography_models::{Coordinates, LocationError, StationLocation};

pub use school_commute_geography_models as models;

/// Great-circle distance between two positions in meters.
#[must_use]
pub fn haversine_distance_m(from: Coordinates, to: Coordinates) -> f64 {
    Haversine.distance(to_point(from), to_point(to))
}

/// Whether `user` is at most `radius_m` meters from `station`.
#[must_use]
pub fn is_within_radius(user: Coordinates, station: Coordinates, radius_m: f64) -> bool {
    haversine_distance_m(user, station) <= radius_m
}

/// Verifies that the device position is close enough to a station.
///
/// Returns the measured distance in meters on success.
///
/// # Errors
///
/// * [`LocationError::Unavailable`] if `user` is `None`
/// * [`LocationError::TooFar`] if the distance exceeds `radius_m`
pub fn verify_location(
    user: Option<Coordinates>,
    station: Coordinates,
    radius_m: f64,
) -> Result<f64, LocationError> {
    let Some(user) = user else {
        log::debug!("No device position available for station at {station:?}");
        return Err(LocationError::Unavailable);
    };

    let distance_m = haversine_distance_m(user, station);
    log::debug!("Device is {distance_m:.1} m from station (radius {radius_m} m)");

    if distance_m <= radius_m {
        Ok(distance_m)
    } else {
        Err(LocationError::TooFar {
            distance_m,
            radius_m,
        })
    }
}

/// Applies a station's location policy to a scan attempt.
///
/// Stations that do not require a location, or have no recorded position,
/// accept any scan and yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`LocationError`] if the station requires a location and the
/// device is missing a position or is outside the radius.
pub fn check_scan_location(
    station: &StationLocation,
    user: Option<Coordinates>,
) -> Result<Option<f64>, LocationError> {
    match station.coordinates {
        Some(coordinates) if station.require_location => {
            verify_location(user, coordinates, station.radius_m()).map(Some)
        }
        _ => Ok(None),
    }
}

fn to_point(coordinates: Coordinates) -> Point<f64> {
    Point::new(coordinates.longitude, coordinates.latitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHOOL: Coordinates = Coordinates::new(48.1486, 17.1077);

    /// Roughly 111 m north of [`SCHOOL`].
    const NORTH: Coordinates = Coordinates::new(48.1496, 17.1077);

    #[test]
    fn distance_between_identical_points_is_zero() {
        assert!(haversine_distance_m(SCHOOL, SCHOOL).abs() < 1e-9);
    }

    #[test]
    fn one_thousandth_degree_of_latitude() {
        let distance = haversine_distance_m(SCHOOL, NORTH);
        assert!((distance - 111.2).abs() < 0.5, "got {distance}");
        assert!((haversine_distance_m(NORTH, SCHOOL) - distance).abs() < 1e-9);
    }

    #[test]
    fn radius_is_inclusive_threshold() {
        assert!(is_within_radius(NORTH, SCHOOL, 150.0));
        assert!(!is_within_radius(NORTH, SCHOOL, 50.0));
    }

    #[test]
    fn verify_reports_distance_or_reason() {
        let distance = verify_location(Some(NORTH), SCHOOL, 150.0).unwrap();
        assert!(distance > 100.0);

        match verify_location(Some(NORTH), SCHOOL, 50.0) {
            Err(LocationError::TooFar {
                distance_m,
                radius_m,
            }) => {
                assert!(distance_m > 100.0);
                assert!((radius_m - 50.0).abs() < f64::EPSILON);
            }
            other => panic!("expected TooFar, got {other:?}"),
        }

        assert_eq!(
            verify_location(None, SCHOOL, 50.0),
            Err(LocationError::Unavailable)
        );
    }

    #[test]
    fn unrestricted_station_accepts_any_scan() {
        let station = StationLocation {
            coordinates: Some(SCHOOL),
            require_location: false,
            location_radius_meters: Some(10.0),
        };
        assert_eq!(check_scan_location(&station, None), Ok(None));

        let unplaced = StationLocation {
            require_location: true,
            ..StationLocation::default()
        };
        assert_eq!(check_scan_location(&unplaced, None), Ok(None));
    }

    #[test]
    fn restricted_station_uses_default_radius() {
        let station = StationLocation {
            coordinates: Some(SCHOOL),
            require_location: true,
            location_radius_meters: None,
        };
        assert!(matches!(
            check_scan_location(&station, Some(NORTH)),
            Err(LocationError::TooFar { .. })
        ));
        assert!(check_scan_location(&station, Some(SCHOOL)).unwrap().is_some());
    }
}
