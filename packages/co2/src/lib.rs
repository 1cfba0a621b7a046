#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CO₂ emissions and savings calculator for school commutes.
//!
//! [`calculate`] is the single entry point for the interactive calculator:
//! it validates a [`CalculationRequest`], resolves defaults, and derives
//! per-trip, per-day, and monthly figures plus savings against a
//! single-occupant car. [`saved_per_trip`] is the lightweight variant used
//! when crediting a station scan.
//!
//! Everything here is a pure function over its input and the constant
//! emission-factor table, so calls may run concurrently without locking.

pub mod format;
pub mod scan;

use std::ops::RangeInclusive;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive as _};
use school_commute_co2_models::{
    Assumptions, CAR_G_PER_KM, CalculationError, CalculationRequest, CalculationResult,
    DAYS_PER_MONTH_RANGE, DEFAULT_DAYS_PER_MONTH, DEFAULT_PASSENGERS, DEFAULT_TRIPS_PER_DAY,
    MAX_DISTANCE_KM, PASSENGERS_RANGE, TRIPS_PER_DAY_RANGE, TransportMode,
};

pub use school_commute_co2_models as models;

/// Checks a request against the input rules and resolves its defaults.
///
/// Rules are checked in a fixed order (mode, distance, trips per day, days
/// per month, passengers) and the first violation is returned.
///
/// # Errors
///
/// Returns the [`CalculationError`] for the first rule the request breaks.
pub fn validate(request: &CalculationRequest) -> Result<Assumptions, CalculationError> {
    let mode: TransportMode =
        request
            .mode
            .parse()
            .map_err(|_| CalculationError::UnknownMode {
                value: request.mode.clone(),
            })?;

    let distance_km = request.distance_km;
    if !distance_km.is_finite() {
        return Err(CalculationError::DistanceNotANumber);
    }
    if distance_km < 0.0 {
        return Err(CalculationError::NegativeDistance { distance_km });
    }
    if distance_km > MAX_DISTANCE_KM {
        return Err(CalculationError::DistanceTooLarge { distance_km });
    }

    let trips_per_day = count_or_default(
        request.trips_per_day,
        DEFAULT_TRIPS_PER_DAY,
        &TRIPS_PER_DAY_RANGE,
    )
    .map_err(|value| CalculationError::TripsPerDayOutOfRange { value })?;

    let days_per_month = count_or_default(
        request.days_per_month,
        DEFAULT_DAYS_PER_MONTH,
        &DAYS_PER_MONTH_RANGE,
    )
    .map_err(|value| CalculationError::DaysPerMonthOutOfRange { value })?;

    let passengers = count_or_default(request.passengers, DEFAULT_PASSENGERS, &PASSENGERS_RANGE)
        .map_err(|value| CalculationError::PassengersOutOfRange { value })?;

    Ok(Assumptions {
        mode,
        emission_factor: mode.emission_factor(),
        trips_per_day,
        days_per_month,
        passengers,
        distance_km,
    })
}

/// Calculates emissions for a commute request.
///
/// # Errors
///
/// Returns a [`CalculationError`] if the request fails validation; no
/// partial result is produced in that case.
pub fn calculate(request: &CalculationRequest) -> Result<CalculationResult, CalculationError> {
    let assumptions = validate(request).inspect_err(|e| {
        log::debug!("Rejected CO2 request {request:?}: {e}");
    })?;

    let result = compute(assumptions);
    log::trace!("Computed CO2 figures: {result:?}");

    Ok(result)
}

/// Grams of CO₂ avoided by one trip compared to driving alone.
///
/// Unlike [`calculate`], this performs no range checks on distance or
/// passengers. A negative or `NaN` distance yields `0`; callers are
/// expected to pass values that already went through [`validate`] or a
/// stored profile.
#[must_use]
pub fn saved_per_trip(distance_km: f64, mode: TransportMode, passengers: Option<u32>) -> i64 {
    if distance_km.is_nan() || distance_km < 0.0 {
        return 0;
    }

    let car_g = distance_km * CAR_G_PER_KM;
    let mode_g = trip_grams(
        mode,
        distance_km,
        passengers.unwrap_or(DEFAULT_PASSENGERS),
    );

    round_grams(car_g - mode_g)
}

/// Resolves an optional count to a whole number within `range`, returning
/// the rejected value otherwise.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_or_default(
    value: Option<f64>,
    default: u32,
    range: &RangeInclusive<u32>,
) -> Result<u32, f64> {
    let Some(value) = value else {
        return Ok(default);
    };

    let whole = value.fract() == 0.0;
    if whole && value >= f64::from(*range.start()) && value <= f64::from(*range.end()) {
        Ok(value as u32)
    } else {
        Err(value)
    }
}

fn compute(assumptions: Assumptions) -> CalculationResult {
    let Assumptions {
        mode,
        trips_per_day,
        days_per_month,
        passengers,
        distance_km,
        ..
    } = assumptions;
    let trips_per_day = f64::from(trips_per_day);
    let days_per_month = f64::from(days_per_month);

    let per_trip_g = trip_grams(mode, distance_km, passengers);
    let per_day_g = per_trip_g * trips_per_day;
    let monthly_g = per_day_g * days_per_month;

    // The baseline is always one car with one occupant, so carpooling is
    // never reported as savings.
    let (saved_vs_car_per_trip_kg, saved_vs_car_monthly_kg) = if mode.is_car() {
        (None, None)
    } else {
        let car_per_trip_g = distance_km * CAR_G_PER_KM;
        let car_monthly_g = car_per_trip_g * trips_per_day * days_per_month;
        (
            Some(round3((car_per_trip_g - per_trip_g) / 1000.0)),
            Some(round3((car_monthly_g - monthly_g) / 1000.0)),
        )
    };

    CalculationResult {
        per_trip_g: round_grams(per_trip_g),
        per_day_g: round_grams(per_day_g),
        monthly_g: round_grams(monthly_g),
        per_trip_kg: round3(per_trip_g / 1000.0),
        per_day_kg: round3(per_day_g / 1000.0),
        monthly_kg: round3(monthly_g / 1000.0),
        saved_vs_car_per_trip_kg,
        saved_vs_car_monthly_kg,
        assumptions,
    }
}

/// Unrounded grams for one trip. Carpooling splits a car's emissions
/// evenly across its occupants.
fn trip_grams(mode: TransportMode, distance_km: f64, passengers: u32) -> f64 {
    let grams = distance_km * mode.emission_factor();
    if mode.is_car() && passengers > 1 {
        grams / f64::from(passengers)
    } else {
        grams
    }
}

/// Rounds to the nearest gram, halves away from zero.
#[allow(clippy::cast_possible_truncation)]
fn round_grams(grams: f64) -> i64 {
    grams.round() as i64
}

/// Rounds to 3 decimal places, halves away from zero.
///
/// Rounding happens on the exact decimal value of the double, so `1.0005`
/// (stored as `1.000499999...`) becomes `1.0` rather than being nudged onto
/// the tie by an intermediate `* 1000.0`.
#[allow(clippy::cast_precision_loss)]
fn round3(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| {
            d.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
                * Decimal::ONE_THOUSAND
        })
        .and_then(|millis| millis.to_i64())
        .map_or(value, |millis| millis as f64 / 1000.0)
}
