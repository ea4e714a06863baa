//! # Directory Lookups
//!
//! `pswap pilot` and `pswap flights` query the crew directory and the
//! flight schedule through the case store configured by `SWAP_API_URL`.

use anyhow::{Context, Result};
use clap::Args;

use pswap_core::temporal::parse_calendar_date;
use pswap_core::{FlightRecord, PilotId, PilotRecord};

use crate::OutputFormat;

/// Arguments for the `pswap pilot` subcommand.
#[derive(Args, Debug)]
pub struct PilotArgs {
    /// Crew-scheduling (AIMS) pilot id.
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the `pswap flights` subcommand.
#[derive(Args, Debug)]
pub struct FlightsArgs {
    /// Operating date.
    #[arg(value_name = "YYYY-MM-DD")]
    pub date: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Execute the pilot subcommand. Exits 1 when the pilot is unknown.
pub fn run_pilot(args: &PilotArgs) -> Result<u8> {
    let id = PilotId::new(args.id.trim()).context("pilot id must not be blank")?;
    let client = crate::client_from_env()?;

    let pilot = crate::block_on(client.pilots().get(&id))?
        .with_context(|| format!("pilot lookup failed for {id}"))?;

    match pilot {
        Some(pilot) => {
            println!("{}", render_pilot(&pilot, args.format)?);
            Ok(0)
        }
        None => {
            println!("NOT FOUND: pilot {id}");
            Ok(1)
        }
    }
}

/// Execute the flights subcommand.
pub fn run_flights(args: &FlightsArgs) -> Result<u8> {
    let date = parse_calendar_date(&args.date)
        .with_context(|| format!("invalid date: \"{}\" (expected YYYY-MM-DD)", args.date))?;
    let client = crate::client_from_env()?;

    let flights = crate::block_on(client.flights().on_date(date))?
        .with_context(|| format!("flight lookup failed for {date}"))?;
    tracing::info!(%date, count = flights.len(), "flights fetched");

    println!("{}", render_flights(&flights, args.format)?);
    Ok(0)
}

pub fn render_pilot(pilot: &PilotRecord, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(pilot)?,
        OutputFormat::Table => format!(
            "{} ({})\n  position: {} {}\n  email:    {}\n  base:     {}",
            pilot.name.trim(),
            pilot.id_aims,
            pilot.position,
            pilot.position_description,
            pilot.email,
            pilot.iata_code
        )
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n"),
    })
}

pub fn render_flights(flights: &[FlightRecord], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(flights)?);
    }
    if flights.is_empty() {
        return Ok("no flights".to_string());
    }
    let rows: Vec<String> = flights
        .iter()
        .map(|f| {
            format!(
                "{:<8} {:<9} {:>5} {:>5} {}",
                f.designator(pswap_core::normalize::DEFAULT_CARRIER_CODE),
                f.route(),
                f.scheduled_departure,
                f.scheduled_arrival,
                f.registration
            )
            .trim_end()
            .to_string()
        })
        .collect();
    Ok(rows.join("\n"))
}
