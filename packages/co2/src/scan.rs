//! CO₂ credited to a student when a station scan is recorded.

use school_commute_co2_models::{CommuteProfile, TransportMode};

use crate::saved_per_trip;

/// Grams of CO₂ credited for one scan.
///
/// Uses the student's stored distance and carpool size, falling back to the
/// profile defaults; a stored distance of `0` is treated as missing. `mode`
/// overrides the stored transport preference.
#[must_use]
pub fn scan_co2_saved(profile: &CommuteProfile, mode: Option<TransportMode>) -> i64 {
    let mode = profile.effective_mode(mode);
    let distance_km = profile.effective_distance_km();
    let saved = saved_per_trip(distance_km, mode, profile.carpool_passengers);

    log::debug!("Scan credit: {saved} g ({mode}, {distance_km} km)");

    saved
}
