#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Transport modes, emission factors, and CO₂ calculation value types.
//!
//! This crate defines the vocabulary shared by the calculator, the scan
//! flow, and every consumer that serializes requests or results. The
//! emission-factor table lives here as plain constants; changing a factor
//! is a policy change that ships with a new version, never a runtime knob.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Grams of CO₂ per kilometer for a single-occupant car.
pub const CAR_G_PER_KM: f64 = 150.0;
/// Grams of CO₂ per kilometer per passenger for a bus.
pub const BUS_G_PER_KM: f64 = 80.0;
/// Grams of CO₂ per kilometer for a bike.
pub const BIKE_G_PER_KM: f64 = 0.0;
/// Grams of CO₂ per kilometer on foot.
pub const WALK_G_PER_KM: f64 = 0.0;

/// Trips per day assumed when a request does not specify one.
pub const DEFAULT_TRIPS_PER_DAY: u32 = 2;
/// Commuting days per month assumed when a request does not specify one.
pub const DEFAULT_DAYS_PER_MONTH: u32 = 20;
/// Car occupants assumed when a request does not specify one.
pub const DEFAULT_PASSENGERS: u32 = 1;

/// Largest accepted one-way trip distance.
pub const MAX_DISTANCE_KM: f64 = 999.0;
/// Accepted range for trips per day.
pub const TRIPS_PER_DAY_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
/// Accepted range for commuting days per month.
pub const DAYS_PER_MONTH_RANGE: std::ops::RangeInclusive<u32> = 1..=31;
/// Accepted range for car occupants.
pub const PASSENGERS_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Distance credited for a scan when the student has no stored distance.
pub const DEFAULT_PROFILE_DISTANCE_KM: f64 = 2.0;
/// Mode credited for a scan when the student has no stored preference.
pub const DEFAULT_SCAN_MODE: TransportMode = TransportMode::Bike;

/// How a student gets to school.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransportMode {
    /// Private car, optionally shared (carpool)
    Car,
    /// School or public bus
    Bus,
    /// Bicycle
    Bike,
    /// On foot
    Walk,
}

impl TransportMode {
    /// Returns the emission factor for this mode in grams of CO₂ per km.
    #[must_use]
    pub const fn emission_factor(self) -> f64 {
        match self {
            Self::Car => CAR_G_PER_KM,
            Self::Bus => BUS_G_PER_KM,
            Self::Bike => BIKE_G_PER_KM,
            Self::Walk => WALK_G_PER_KM,
        }
    }

    /// Whether this mode is the car baseline that savings are measured
    /// against.
    #[must_use]
    pub const fn is_car(self) -> bool {
        matches!(self, Self::Car)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Car, Self::Bus, Self::Bike, Self::Walk]
    }
}

/// Language used for labels and validation messages.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Locale {
    /// English (`en`)
    #[default]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    /// Slovak (`sk`)
    #[serde(rename = "sk")]
    #[strum(serialize = "sk")]
    Slovak,
}

/// Request attribute that failed validation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestField {
    /// Transport mode name
    Mode,
    /// One-way trip distance
    DistanceKm,
    /// Trips per school day
    TripsPerDay,
    /// Commuting days per month
    DaysPerMonth,
    /// Car occupants
    Passengers,
}

/// Input to the calculator, as supplied by a caller.
///
/// `mode` is kept as the caller's raw text and the counts as plain numbers
/// so that an unrecognized mode, a negative count, or a fractional count is
/// reported as a field-tagged validation error rather than failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Transport mode name (`car`, `bus`, `bike`, `walk`).
    pub mode: String,
    /// One-way trip distance.
    pub distance_km: f64,
    /// Trips per day, defaults to [`DEFAULT_TRIPS_PER_DAY`]. Must be a
    /// whole number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trips_per_day: Option<f64>,
    /// Commuting days per month, defaults to [`DEFAULT_DAYS_PER_MONTH`].
    /// Must be a whole number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_per_month: Option<f64>,
    /// Car occupants sharing the trip, defaults to [`DEFAULT_PASSENGERS`].
    /// Must be a whole number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<f64>,
}

impl CalculationRequest {
    /// Creates a request for a known mode with every optional field unset.
    #[must_use]
    pub fn new(mode: TransportMode, distance_km: f64) -> Self {
        Self::for_mode_name(mode.as_ref(), distance_km)
    }

    /// Creates a request from a raw mode name, which is only checked when
    /// the request is validated.
    #[must_use]
    pub fn for_mode_name(mode: impl Into<String>, distance_km: f64) -> Self {
        Self {
            mode: mode.into(),
            distance_km,
            trips_per_day: None,
            days_per_month: None,
            passengers: None,
        }
    }

    #[must_use]
    pub fn with_trips_per_day(mut self, trips_per_day: u32) -> Self {
        self.trips_per_day = Some(f64::from(trips_per_day));
        self
    }

    #[must_use]
    pub fn with_days_per_month(mut self, days_per_month: u32) -> Self {
        self.days_per_month = Some(f64::from(days_per_month));
        self
    }

    #[must_use]
    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = Some(f64::from(passengers));
        self
    }
}

/// The effective inputs a calculation ran with, after defaults were
/// substituted. Echoed back in every [`CalculationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Resolved transport mode.
    pub mode: TransportMode,
    /// Grams of CO₂ per km for `mode`.
    pub emission_factor: f64,
    /// Trips per day after defaulting.
    pub trips_per_day: u32,
    /// Commuting days per month after defaulting.
    pub days_per_month: u32,
    /// Car occupants after defaulting. Echoed for every mode, but only
    /// divides emissions for a car.
    pub passengers: u32,
    /// One-way trip distance as supplied.
    pub distance_km: f64,
}

/// Emission figures for one validated request.
///
/// Gram figures are rounded to the nearest gram. Kilogram figures are
/// derived from the unrounded gram values and rounded to 3 decimals, so
/// `per_trip_kg * 1000` need not equal `per_trip_g`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub per_trip_g: i64,
    pub per_day_g: i64,
    pub monthly_g: i64,
    pub per_trip_kg: f64,
    pub per_day_kg: f64,
    pub monthly_kg: f64,
    /// CO₂ avoided per trip versus a single-occupant car. `None` for car.
    pub saved_vs_car_per_trip_kg: Option<f64>,
    /// CO₂ avoided per month versus a single-occupant car. `None` for car.
    pub saved_vs_car_monthly_kg: Option<f64>,
    pub assumptions: Assumptions,
}

/// A request that was rejected before any arithmetic ran.
///
/// Variants are listed in the order the rules are checked; a request that
/// breaks several rules reports the first.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("unknown transport mode '{value}', expected one of: car, bus, bike, walk")]
    UnknownMode { value: String },

    #[error("distance must be a number")]
    DistanceNotANumber,

    #[error("distance must be non-negative")]
    NegativeDistance { distance_km: f64 },

    #[error("distance is too large (max 999 km)")]
    DistanceTooLarge { distance_km: f64 },

    #[error("trips per day must be a whole number between 1 and 10")]
    TripsPerDayOutOfRange { value: f64 },

    #[error("days per month must be a whole number between 1 and 31")]
    DaysPerMonthOutOfRange { value: f64 },

    #[error("passengers must be a whole number between 1 and 10")]
    PassengersOutOfRange { value: f64 },
}

impl CalculationError {
    /// Returns the request attribute this error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<RequestField> {
        Some(match self {
            Self::UnknownMode { .. } => RequestField::Mode,
            Self::DistanceNotANumber
            | Self::NegativeDistance { .. }
            | Self::DistanceTooLarge { .. } => RequestField::DistanceKm,
            Self::TripsPerDayOutOfRange { .. } => RequestField::TripsPerDay,
            Self::DaysPerMonthOutOfRange { .. } => RequestField::DaysPerMonth,
            Self::PassengersOutOfRange { .. } => RequestField::Passengers,
        })
    }

    /// Returns the user-facing message in the given locale.
    #[must_use]
    pub fn localized_message(&self, locale: Locale) -> String {
        match locale {
            Locale::English => self.to_string(),
            Locale::Slovak => match self {
                Self::UnknownMode { .. } => {
                    "Neplatný typ dopravy. Povolené hodnoty: car, bus, bike, walk"
                }
                Self::DistanceNotANumber => "Vzdialenosť musí byť číslo",
                Self::NegativeDistance { .. } => "Vzdialenosť musí byť nezáporná",
                Self::DistanceTooLarge { .. } => "Vzdialenosť je príliš veľká (max. 999 km)",
                Self::TripsPerDayOutOfRange { .. } => {
                    "Počet ciest za deň musí byť celé číslo medzi 1 a 10"
                }
                Self::DaysPerMonthOutOfRange { .. } => {
                    "Počet dní v mesiaci musí byť celé číslo medzi 1 a 31"
                }
                Self::PassengersOutOfRange { .. } => {
                    "Počet cestujúcich musí byť celé číslo medzi 1 a 10"
                }
            }
            .to_string(),
        }
    }

    /// Builds the serializable `{ error, field }` body for this error.
    #[must_use]
    pub fn to_body(&self, locale: Locale) -> CalculationErrorBody {
        CalculationErrorBody {
            error: self.localized_message(locale),
            field: self.field(),
        }
    }
}

/// Wire shape of a [`CalculationError`] for presentation layers that map
/// `field` back to an input control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<RequestField>,
}

/// A student's stored commute defaults.
///
/// Every field is optional; missing values fall back to the scan defaults
/// ([`DEFAULT_PROFILE_DISTANCE_KM`], [`DEFAULT_SCAN_MODE`]) or the request
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommuteProfile {
    /// One-way distance from home to school.
    pub distance_to_school_km: Option<f64>,
    /// Mode the student normally uses.
    pub default_transport_mode: Option<TransportMode>,
    /// Occupants when the student carpools.
    pub carpool_passengers: Option<u32>,
    pub trips_per_day: Option<u32>,
    pub days_per_month: Option<u32>,
}

impl CommuteProfile {
    /// Returns the mode a trip is credited with: the override, then the
    /// stored preference, then [`DEFAULT_SCAN_MODE`].
    #[must_use]
    pub fn effective_mode(&self, mode_override: Option<TransportMode>) -> TransportMode {
        mode_override
            .or(self.default_transport_mode)
            .unwrap_or(DEFAULT_SCAN_MODE)
    }

    /// Returns the stored distance or [`DEFAULT_PROFILE_DISTANCE_KM`].
    ///
    /// A stored distance of `0` or `NaN` counts as unset, so a student who
    /// never filled in the field is still credited the default distance.
    #[must_use]
    pub fn effective_distance_km(&self) -> f64 {
        self.distance_to_school_km
            .filter(|km| *km != 0.0 && !km.is_nan())
            .unwrap_or(DEFAULT_PROFILE_DISTANCE_KM)
    }

    /// Builds a calculator request pre-filled from this profile.
    #[must_use]
    pub fn to_request(&self, mode_override: Option<TransportMode>) -> CalculationRequest {
        CalculationRequest {
            trips_per_day: self.trips_per_day.map(f64::from),
            days_per_month: self.days_per_month.map(f64::from),
            passengers: self.carpool_passengers.map(f64::from),
            ..CalculationRequest::new(
                self.effective_mode(mode_override),
                self.effective_distance_km(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emission_factors_match_policy_table() {
        assert!((TransportMode::Car.emission_factor() - 150.0).abs() < f64::EPSILON);
        assert!((TransportMode::Bus.emission_factor() - 80.0).abs() < f64::EPSILON);
        assert!(TransportMode::Bike.emission_factor().abs() < f64::EPSILON);
        assert!(TransportMode::Walk.emission_factor().abs() < f64::EPSILON);
    }

    #[test]
    fn mode_names_roundtrip_through_strum() {
        for mode in TransportMode::all() {
            let parsed: TransportMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, *mode);
        }
        assert!("plane".parse::<TransportMode>().is_err());
    }

    #[test]
    fn request_deserializes_with_missing_optionals() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"mode":"plane","distance_km":5}"#).unwrap();
        assert_eq!(request.mode, "plane");
        assert_eq!(request.trips_per_day, None);
        assert_eq!(request.passengers, None);
    }

    #[test]
    fn request_accepts_out_of_range_counts_for_validation() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"mode":"car","distance_km":5,"trips_per_day":-1}"#).unwrap();
        assert_eq!(request.trips_per_day, Some(-1.0));

        let request: CalculationRequest =
            serde_json::from_str(r#"{"mode":"plane","distance_km":5,"passengers":1.5}"#).unwrap();
        assert_eq!(request.mode, "plane");
        assert_eq!(request.passengers, Some(1.5));
    }

    #[test]
    fn error_fields_use_snake_case_tags() {
        let err = CalculationError::NegativeDistance { distance_km: -5.0 };
        assert_eq!(err.field(), Some(RequestField::DistanceKm));
        assert_eq!(RequestField::DistanceKm.to_string(), "distance_km");

        let body = serde_json::to_value(err.to_body(Locale::Slovak)).unwrap();
        assert_eq!(body["field"], "distance_km");
        assert!(body["error"].as_str().unwrap().contains("nezáporná"));
    }

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("SK".parse::<Locale>().unwrap(), Locale::Slovak);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::English);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn profile_falls_back_to_scan_defaults() {
        let profile = CommuteProfile::default();
        assert_eq!(profile.effective_mode(None), TransportMode::Bike);
        assert!((profile.effective_distance_km() - 2.0).abs() < f64::EPSILON);

        let request = profile.to_request(Some(TransportMode::Bus));
        assert_eq!(request.mode, "bus");
        assert_eq!(request.trips_per_day, None);
    }

    #[test]
    fn zero_stored_distance_counts_as_unset() {
        let profile = CommuteProfile {
            distance_to_school_km: Some(0.0),
            ..CommuteProfile::default()
        };
        assert!((profile.effective_distance_km() - 2.0).abs() < f64::EPSILON);

        let profile = CommuteProfile {
            distance_to_school_km: Some(0.5),
            ..CommuteProfile::default()
        };
        assert!((profile.effective_distance_km() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn profile_carries_carpool_into_request() {
        let profile = CommuteProfile {
            distance_to_school_km: Some(10.0),
            default_transport_mode: Some(TransportMode::Car),
            carpool_passengers: Some(4),
            trips_per_day: Some(2),
            days_per_month: None,
        };
        let request = profile.to_request(None);
        assert_eq!(request.mode, "car");
        assert_eq!(request.passengers, Some(4.0));
        assert_eq!(request.trips_per_day, Some(2.0));
        assert_eq!(request.days_per_month, None);
    }
}
