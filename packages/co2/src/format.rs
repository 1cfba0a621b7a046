//! Display helpers for transport modes and CO₂ amounts.
//!
//! These are presentation utilities only. Labels vary by [`Locale`], but
//! the 1000 g threshold in [`format_mass`] is fixed.

use school_commute_co2_models::{Locale, TransportMode};

/// Human-readable name of a transport mode.
#[must_use]
pub const fn mode_label(mode: TransportMode, locale: Locale) -> &'static str {
    match (locale, mode) {
        (Locale::English, TransportMode::Car) => "Car",
        (Locale::English, TransportMode::Bus) => "Bus",
        (Locale::English, TransportMode::Bike) => "Bike",
        (Locale::English, TransportMode::Walk) => "Walk",
        (Locale::Slovak, TransportMode::Car) => "Auto",
        (Locale::Slovak, TransportMode::Bus) => "Autobus",
        (Locale::Slovak, TransportMode::Bike) => "Bicykel",
        (Locale::Slovak, TransportMode::Walk) => "Chôdza",
    }
}

/// Emoji shown next to a transport mode.
#[must_use]
pub const fn mode_icon(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Car => "🚗",
        TransportMode::Bus => "🚌",
        TransportMode::Bike => "🚴",
        TransportMode::Walk => "🚶",
    }
}

/// Renders a gram count as `"<n> g"` below 1000 g, otherwise as kilograms
/// with one decimal (halves round up).
#[must_use]
pub fn format_mass(grams: i64) -> String {
    if grams < 1000 {
        return format!("{grams} g");
    }

    let tenths = grams.saturating_add(50) / 100;
    format!("{}.{} kg", tenths / 10, tenths % 10)
}

/// Number of trees that absorb the given monthly CO₂ over a year, at
/// roughly 10 kg per tree per year.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn trees_equivalent(monthly_grams: i64) -> i64 {
    let kg = monthly_grams as f64 / 1000.0;
    (kg * 12.0 / 10.0).round() as i64
}
