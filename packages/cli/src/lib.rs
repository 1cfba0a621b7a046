#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the school commute CO₂ engine.
//!
//! Builds calculation requests from flags and TOML commute profiles,
//! renders results as text or JSON, and resolves the display locale from
//! `--locale` or the `SCHOOL_COMMUTE_LOCALE` environment variable.

pub mod interactive;

use std::fmt::Write as _;
use std::path::Path;

use school_commute_co2::format::{format_mass, mode_icon, mode_label, trees_equivalent};
use school_commute_co2_models::{
    CalculationError, CalculationRequest, CalculationResult, CommuteProfile, Locale, TransportMode,
};
use school_commute_geography_models::LocationError;

/// Environment variable holding the default locale (`en` or `sk`).
pub const LOCALE_ENV: &str = "SCHOOL_COMMUTE_LOCALE";

/// Errors surfaced by the command-line tools.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A commute profile could not be parsed.
    #[error("Invalid commute profile: {0}")]
    Profile(#[from] toml::de::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The locale flag or environment variable was not recognized.
    #[error("Invalid locale '{value}', expected 'en' or 'sk'")]
    Locale {
        /// The rejected value.
        value: String,
    },

    /// A required input was neither passed nor found in a profile.
    #[error("Missing required argument: {name}")]
    MissingArgument {
        /// Flag name, e.g. `--distance`.
        name: &'static str,
    },

    /// The calculation request was rejected.
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    /// A scan location check failed.
    #[error(transparent)]
    Location(#[from] LocationError),
}

/// Explicit calculator inputs from the command line. Any field left unset
/// falls back to the commute profile, then to the request defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOverrides {
    pub mode: Option<String>,
    pub distance_km: Option<f64>,
    pub trips_per_day: Option<u32>,
    pub days_per_month: Option<u32>,
    pub passengers: Option<u32>,
}

/// Resolves the display locale from an explicit flag, then from
/// [`LOCALE_ENV`], then the default.
///
/// # Errors
///
/// Returns [`CliError::Locale`] if the chosen value is not a known locale.
pub fn resolve_locale(flag: Option<&str>) -> Result<Locale, CliError> {
    match flag {
        Some(value) => parse_locale(value),
        None => std::env::var(LOCALE_ENV)
            .ok()
            .map_or_else(|| Ok(Locale::default()), |value| parse_locale(&value)),
    }
}

/// Parses a locale code such as `en` or `SK`.
///
/// # Errors
///
/// Returns [`CliError::Locale`] if the value is not a known locale.
pub fn parse_locale(value: &str) -> Result<Locale, CliError> {
    value.trim().parse().map_err(|_| CliError::Locale {
        value: value.to_string(),
    })
}

/// Reads a commute profile from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid profile.
pub fn load_profile(path: &Path) -> Result<CommuteProfile, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let profile = parse_profile_toml(&contents)?;
    log::debug!("Loaded commute profile from {}: {profile:?}", path.display());
    Ok(profile)
}

/// Parses a commute profile from TOML text.
///
/// ```toml
/// distance_to_school_km = 4.2
/// default_transport_mode = "car"
/// carpool_passengers = 3
/// ```
///
/// # Errors
///
/// Returns [`CliError::Profile`] if the text is not a valid profile.
pub fn parse_profile_toml(toml_str: &str) -> Result<CommuteProfile, CliError> {
    Ok(toml::from_str(toml_str)?)
}

/// Builds a calculation request from an optional profile and explicit
/// command-line values, which take precedence.
///
/// # Errors
///
/// Returns [`CliError::MissingArgument`] if neither source supplies a
/// transport mode or a distance. A profile without a stored distance falls
/// back to the profile default distance.
pub fn build_request(
    profile: Option<&CommuteProfile>,
    overrides: &RequestOverrides,
) -> Result<CalculationRequest, CliError> {
    let mode = overrides
        .mode
        .clone()
        .or_else(|| {
            profile
                .and_then(|p| p.default_transport_mode)
                .map(|mode| mode.as_ref().to_string())
        })
        .ok_or(CliError::MissingArgument { name: "--mode" })?;

    let distance_km = overrides
        .distance_km
        .or_else(|| profile.map(CommuteProfile::effective_distance_km))
        .ok_or(CliError::MissingArgument {
            name: "--distance",
        })?;

    Ok(CalculationRequest {
        mode,
        distance_km,
        trips_per_day: overrides
            .trips_per_day
            .or_else(|| profile.and_then(|p| p.trips_per_day))
            .map(f64::from),
        days_per_month: overrides
            .days_per_month
            .or_else(|| profile.and_then(|p| p.days_per_month))
            .map(f64::from),
        passengers: overrides
            .passengers
            .or_else(|| profile.and_then(|p| p.carpool_passengers))
            .map(f64::from),
    })
}

/// Renders a calculation result as human-readable text.
#[must_use]
pub fn render_result(result: &CalculationResult, locale: Locale) -> String {
    let assumptions = &result.assumptions;
    let mut out = String::new();

    let _ = write!(
        out,
        "{} {}: {} km, {} trip(s)/day, {} day(s)/month",
        mode_icon(assumptions.mode),
        mode_label(assumptions.mode, locale),
        assumptions.distance_km,
        assumptions.trips_per_day,
        assumptions.days_per_month,
    );
    if assumptions.mode.is_car() && assumptions.passengers > 1 {
        let _ = write!(out, ", {} passengers", assumptions.passengers);
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "Emission factor: {} g CO2/km",
        assumptions.emission_factor
    );
    let _ = writeln!(out, "Per trip:  {}", format_mass(result.per_trip_g));
    let _ = writeln!(out, "Per day:   {}", format_mass(result.per_day_g));
    let _ = writeln!(out, "Per month: {}", format_mass(result.monthly_g));

    if let (Some(per_trip_kg), Some(monthly_kg)) = (
        result.saved_vs_car_per_trip_kg,
        result.saved_vs_car_monthly_kg.filter(|kg| *kg > 0.0),
    ) {
        let monthly_g = kg_to_grams(monthly_kg);
        let _ = writeln!(
            out,
            "Saved vs car: {} per trip, {} per month (~{} tree(s)/year)",
            format_mass(kg_to_grams(per_trip_kg)),
            format_mass(monthly_g),
            trees_equivalent(monthly_g),
        );
    }

    out
}

/// Renders the transport mode table with labels and emission factors.
#[must_use]
pub fn render_modes(locale: Locale) -> String {
    let mut out = format!("{:<6} {:<10} {:<4} G CO2/KM\n", "MODE", "LABEL", "");
    out.push_str(&"-".repeat(32));
    out.push('\n');

    for mode in TransportMode::all() {
        let _ = writeln!(
            out,
            "{:<6} {:<10} {:<4} {}",
            mode.as_ref(),
            mode_label(*mode, locale),
            mode_icon(*mode),
            mode.emission_factor(),
        );
    }

    out
}

/// Renders a validation failure as `field: message`.
#[must_use]
pub fn render_error(err: &CalculationError, locale: Locale) -> String {
    let message = err.localized_message(locale);
    match err.field() {
        Some(field) => format!("{field}: {message}"),
        None => message,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn kg_to_grams(kg: f64) -> i64 {
    (kg * 1000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_commute_co2::calculate;

    #[test]
    fn parses_full_profile() {
        let profile = parse_profile_toml(
            r#"
            distance_to_school_km = 10.0
            default_transport_mode = "car"
            carpool_passengers = 4
            trips_per_day = 2
            days_per_month = 20
            "#,
        )
        .unwrap();

        assert_eq!(profile.default_transport_mode, Some(TransportMode::Car));
        assert_eq!(profile.carpool_passengers, Some(4));

        let result = calculate(&build_request(Some(&profile), &RequestOverrides::default()).unwrap())
            .unwrap();
        assert_eq!(result.per_trip_g, 375);
        assert_eq!(result.monthly_g, 15_000);
    }

    #[test]
    fn parses_empty_profile() {
        let profile = parse_profile_toml("").unwrap();
        assert_eq!(profile, CommuteProfile::default());
    }

    #[test]
    fn rejects_unknown_profile_mode() {
        let err = parse_profile_toml(r#"default_transport_mode = "plane""#).unwrap_err();
        assert!(matches!(err, CliError::Profile(_)));
    }

    #[test]
    fn flags_override_profile() {
        let profile = CommuteProfile {
            distance_to_school_km: Some(3.0),
            default_transport_mode: Some(TransportMode::Bus),
            ..CommuteProfile::default()
        };
        let overrides = RequestOverrides {
            mode: Some("walk".to_string()),
            days_per_month: Some(22),
            ..RequestOverrides::default()
        };

        let request = build_request(Some(&profile), &overrides).unwrap();
        assert_eq!(request.mode, "walk");
        assert_eq!(request.distance_km, 3.0);
        assert_eq!(request.trips_per_day, None);
        assert_eq!(request.days_per_month, Some(22.0));
    }

    #[test]
    fn mode_required_without_profile_preference() {
        let err = build_request(None, &RequestOverrides::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingArgument { name: "--mode" }));

        let err = build_request(
            None,
            &RequestOverrides {
                distance_km: Some(1.5),
                ..RequestOverrides::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, CliError::MissingArgument { name: "--mode" }));

        let profile = CommuteProfile {
            distance_to_school_km: Some(4.0),
            ..CommuteProfile::default()
        };
        let err = build_request(Some(&profile), &RequestOverrides::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingArgument { name: "--mode" }));
    }

    #[test]
    fn distance_required_without_profile() {
        let err = build_request(
            None,
            &RequestOverrides {
                mode: Some("bus".to_string()),
                ..RequestOverrides::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::MissingArgument { name: "--distance" }
        ));

        let request = build_request(
            None,
            &RequestOverrides {
                mode: Some("bus".to_string()),
                distance_km: Some(1.5),
                ..RequestOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(request.mode, "bus");
        assert_eq!(request.distance_km, 1.5);
        assert_eq!(request.passengers, None);
    }

    #[test]
    fn locale_flag_is_validated() {
        assert_eq!(resolve_locale(Some("sk")).unwrap(), Locale::Slovak);
        assert!(matches!(
            resolve_locale(Some("fr")),
            Err(CliError::Locale { .. })
        ));
    }

    #[test]
    fn renders_savings_for_bus() {
        let request = CalculationRequest::new(TransportMode::Bus, 10.0);
        let text = render_result(&calculate(&request).unwrap(), Locale::English);

        assert!(text.starts_with("🚌 Bus: 10 km, 2 trip(s)/day, 20 day(s)/month\n"));
        assert!(text.contains("Per trip:  800 g\n"));
        assert!(text.contains("Per month: 32.0 kg\n"));
        assert!(text.contains("Saved vs car: 700 g per trip, 28.0 kg per month (~34 tree(s)/year)"));
    }

    #[test]
    fn renders_car_without_savings() {
        let request = CalculationRequest::new(TransportMode::Car, 10.0).with_passengers(4);
        let text = render_result(&calculate(&request).unwrap(), Locale::Slovak);

        assert!(text.starts_with("🚗 Auto: 10 km"));
        assert!(text.contains(", 4 passengers\n"));
        assert!(!text.contains("Saved vs car"));
    }

    #[test]
    fn omits_savings_when_nothing_is_saved() {
        let request = CalculationRequest::new(TransportMode::Walk, 0.0);
        let text = render_result(&calculate(&request).unwrap(), Locale::English);

        assert!(text.contains("Per trip:  0 g\n"));
        assert!(!text.contains("Saved vs car"));
    }

    #[test]
    fn renders_mode_table() {
        let table = render_modes(Locale::Slovak);
        assert!(table.contains("Bicykel"));
        assert_eq!(table.lines().count(), 2 + TransportMode::all().len());
    }

    #[test]
    fn renders_error_with_field() {
        let err = calculate(&CalculationRequest::new(TransportMode::Car, -5.0)).unwrap_err();
        assert_eq!(
            render_error(&err, Locale::Slovak),
            "distance_km: Vzdialenosť musí byť nezáporná"
        );
    }
}
