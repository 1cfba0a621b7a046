//! Interactive calculator for the school commute CLI.
//!
//! Prompts for a transport mode and trip details with `dialoguer` so the
//! calculator can be used without memorizing flags.

use dialoguer::{Confirm, Input, Select};
use school_commute_co2::{calculate, format::mode_icon, format::mode_label};
use school_commute_co2_models::{
    CalculationRequest, DEFAULT_DAYS_PER_MONTH, DEFAULT_PASSENGERS, DEFAULT_TRIPS_PER_DAY, Locale,
    TransportMode,
};

use crate::{render_error, render_result};

/// Runs the interactive calculator until the user declines another round.
///
/// Validation failures are printed and the user is asked again; they do not
/// end the session.
///
/// # Errors
///
/// Returns an error if reading from the terminal fails.
pub fn run(locale: Locale) -> Result<(), Box<dyn std::error::Error>> {
    println!("School Commute CO2 Calculator");
    println!();

    loop {
        let request = prompt_request(locale)?;
        log::debug!("Interactive request: {request:?}");

        match calculate(&request) {
            Ok(result) => {
                println!();
                print!("{}", render_result(&result, locale));
            }
            Err(e) => eprintln!("{}", render_error(&e, locale)),
        }
        println!();

        if !Confirm::new()
            .with_prompt("Calculate another trip?")
            .default(false)
            .interact()?
        {
            return Ok(());
        }
    }
}

fn prompt_request(locale: Locale) -> Result<CalculationRequest, Box<dyn std::error::Error>> {
    let labels: Vec<String> = TransportMode::all()
        .iter()
        .map(|mode| format!("{} {}", mode_icon(*mode), mode_label(*mode, locale)))
        .collect();

    // Bike is the default choice.
    let idx = Select::new()
        .with_prompt("How do you get to school?")
        .items(&labels)
        .default(2)
        .interact()?;
    let mode = TransportMode::all()[idx];

    let distance_km: f64 = Input::new()
        .with_prompt("One-way distance (km)")
        .interact_text()?;

    let trips_per_day: u32 = Input::new()
        .with_prompt("Trips per day")
        .default(DEFAULT_TRIPS_PER_DAY)
        .interact_text()?;

    let days_per_month: u32 = Input::new()
        .with_prompt("School days per month")
        .default(DEFAULT_DAYS_PER_MONTH)
        .interact_text()?;

    let mut request = CalculationRequest::new(mode, distance_km)
        .with_trips_per_day(trips_per_day)
        .with_days_per_month(days_per_month);

    if mode.is_car() {
        let passengers: u32 = Input::new()
            .with_prompt("People in the car (including you)")
            .default(DEFAULT_PASSENGERS)
            .interact_text()?;
        request = request.with_passengers(passengers);
    }

    Ok(request)
}
