//! # pswap CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pswap_cli::cases::{run_cases, CasesArgs};
use pswap_cli::lookup::{run_flights, run_pilot, FlightsArgs, PilotArgs};

/// Pilot swap portal CLI.
///
/// Classifies swap case snapshots into the portal's open, recently-closed
/// and historical tabs, and queries the crew directory and flight schedule.
#[derive(Parser, Debug)]
#[command(name = "pswap", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter and classify a case snapshot.
    Cases(CasesArgs),

    /// Look up a pilot by crew-scheduling id.
    Pilot(PilotArgs),

    /// List the flights operating on a date.
    Flights(FlightsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr so `--format json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Cases(args) => run_cases(&args),
        Commands::Pilot(args) => run_pilot(&args),
        Commands::Flights(args) => run_flights(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
