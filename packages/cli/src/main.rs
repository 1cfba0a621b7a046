#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for the school commute CO₂ calculator.
//!
//! ```text
//! school_commute calculate --mode bus --distance 10 [--json]
//! school_commute calculate --profile student.toml
//! school_commute saved --mode car --distance 10 --passengers 3
//! school_commute scan --profile student.toml [--mode walk]
//! school_commute modes
//! school_commute verify-location --station-lat 48.1486 --station-lng 17.1077 --lat 48.149 --lng 17.108
//! ```
//!
//! Running `school_commute` with no subcommand enters interactive mode.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use school_commute_cli::{
    RequestOverrides, build_request, load_profile, render_error, render_modes, render_result,
    resolve_locale,
};
use school_commute_co2::{calculate, saved_per_trip, scan::scan_co2_saved};
use school_commute_co2_models::{CommuteProfile, TransportMode};
use school_commute_geography::verify_location;
use school_commute_geography_models::{Coordinates, DEFAULT_LOCATION_RADIUS_M};

#[derive(Parser)]
#[command(
    name = "school_commute",
    about = "CO2 emissions and savings for school commutes"
)]
struct Cli {
    /// Language for labels and messages (`en` or `sk`). Overrides
    /// `SCHOOL_COMMUTE_LOCALE`.
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate per-trip, daily, and monthly emissions
    Calculate {
        /// Transport mode (car, bus, bike, walk)
        #[arg(long)]
        mode: Option<String>,
        /// One-way distance in kilometers
        #[arg(long)]
        distance: Option<f64>,
        /// Trips per day (default 2)
        #[arg(long)]
        trips_per_day: Option<u32>,
        /// Commuting days per month (default 20)
        #[arg(long)]
        days_per_month: Option<u32>,
        /// Car occupants when carpooling (default 1)
        #[arg(long)]
        passengers: Option<u32>,
        /// TOML commute profile to take defaults from
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Grams of CO2 saved by one trip compared to driving alone
    Saved {
        /// Transport mode (car, bus, bike, walk)
        #[arg(long)]
        mode: TransportMode,
        /// One-way distance in kilometers
        #[arg(long)]
        distance: f64,
        /// Car occupants when carpooling
        #[arg(long)]
        passengers: Option<u32>,
    },
    /// Grams of CO2 credited for one station scan
    Scan {
        /// TOML commute profile of the student (defaults apply if omitted)
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Transport mode used for this trip, overriding the profile
        #[arg(long)]
        mode: Option<TransportMode>,
    },
    /// List transport modes and their emission factors
    Modes,
    /// Check whether a position is close enough to a station to scan
    VerifyLocation {
        /// Station latitude
        #[arg(long)]
        station_lat: f64,
        /// Station longitude
        #[arg(long)]
        station_lng: f64,
        /// Device latitude
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Device longitude
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Allowed radius in meters
        #[arg(long, default_value_t = DEFAULT_LOCATION_RADIUS_M)]
        radius: f64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let locale = resolve_locale(cli.locale.as_deref())?;

    let Some(command) = cli.command else {
        return school_commute_cli::interactive::run(locale);
    };

    match command {
        Commands::Calculate {
            mode,
            distance,
            trips_per_day,
            days_per_month,
            passengers,
            profile,
            json,
        } => {
            let profile = profile.as_deref().map(load_profile).transpose()?;
            let overrides = RequestOverrides {
                mode,
                distance_km: distance,
                trips_per_day,
                days_per_month,
                passengers,
            };
            let request = build_request(profile.as_ref(), &overrides)?;

            match calculate(&request) {
                Ok(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
                Ok(result) => print!("{}", render_result(&result, locale)),
                Err(e) if json => {
                    eprintln!("{}", serde_json::to_string_pretty(&e.to_body(locale))?);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("{}", render_error(&e, locale));
                    std::process::exit(1);
                }
            }
        }
        Commands::Saved {
            mode,
            distance,
            passengers,
        } => {
            println!("{}", saved_per_trip(distance, mode, passengers));
        }
        Commands::Scan { profile, mode } => {
            let profile = match profile {
                Some(path) => load_profile(&path)?,
                None => CommuteProfile::default(),
            };
            println!("{}", scan_co2_saved(&profile, mode));
        }
        Commands::Modes => print!("{}", render_modes(locale)),
        Commands::VerifyLocation {
            station_lat,
            station_lng,
            lat,
            lng,
            radius,
        } => {
            let user = lat.zip(lng).map(|(lat, lng)| Coordinates::new(lat, lng));
            let station = Coordinates::new(station_lat, station_lng);

            match verify_location(user, station, radius) {
                Ok(distance_m) => {
                    println!("Location verified: {distance_m:.0} m from station (max: {radius} m)");
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
