// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use heliplan_core::persistence::ConfigFile;
use heliplan_core::{
    AircraftProfile, CalcError, CalculationConfig, CalculationResult, ConfigOverrides,
    FlightEngine, GeoPoint, ValidationMode,
};
use log::warn;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the planning defaults file
    #[arg(short, long, env = "HELIPLAN_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuel, time and payload for a route
    Calc(CalcArgs),
    /// Show or change the stored planning defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    Set(OverrideArgs),
}

#[derive(Args)]
struct CalcArgs {
    /// Route stop as LON,LAT. Repeat in flight order.
    #[arg(short, long = "stop", value_parser = parse_stop, allow_hyphen_values = true)]
    stops: Vec<GeoPoint>,

    /// Aircraft profile JSON
    #[arg(short, long)]
    aircraft: Option<PathBuf>,

    #[arg(long)]
    cruise_speed: Option<f64>,
    #[arg(long)]
    fuel_burn: Option<f64>,
    #[arg(long)]
    fuel_capacity: Option<f64>,
    #[arg(long)]
    dow: Option<f64>,
    #[arg(long)]
    useful_load: Option<f64>,
    #[arg(long)]
    max_pax: Option<u32>,

    #[command(flatten)]
    overrides: OverrideArgs,

    /// Reject negative or out-of-range figures instead of using them
    #[arg(long)]
    strict: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct OverrideArgs {
    /// Contingency fuel, percent of trip fuel
    #[arg(long, allow_hyphen_values = true)]
    contingency: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    reserve: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    taxi: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pax_weight: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    deck_minutes: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    deck_flow: Option<f64>,
}

impl From<&OverrideArgs> for ConfigOverrides {
    fn from(a: &OverrideArgs) -> Self {
        ConfigOverrides {
            passenger_weight_lbs: a.pax_weight,
            contingency_fuel_percent: a.contingency,
            taxi_fuel_lbs: a.taxi,
            reserve_fuel_lbs: a.reserve,
            deck_time_per_stop_minutes: a.deck_minutes,
            deck_fuel_flow_lbs_per_hour: a.deck_flow,
        }
    }
}

fn parse_stop(s: &str) -> Result<GeoPoint, String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got '{}'", s))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("bad longitude '{}'", lon))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("bad latitude '{}'", lat))?;
    Ok(GeoPoint::new(lon, lat))
}

fn load_aircraft(args: &CalcArgs) -> Result<AircraftProfile> {
    let mut profile = match &args.aircraft {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read aircraft file {:?}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse aircraft file {:?}", path))?
        }
        None => AircraftProfile::default(),
    };

    // Flags win over the file
    profile.cruise_speed_knots = args.cruise_speed.or(profile.cruise_speed_knots);
    profile.fuel_burn_lbs_per_hour = args.fuel_burn.or(profile.fuel_burn_lbs_per_hour);
    profile.max_fuel_capacity_lbs = args.fuel_capacity.or(profile.max_fuel_capacity_lbs);
    profile.dry_operating_weight_lbs = args.dow.or(profile.dry_operating_weight_lbs);
    profile.useful_load_lbs = args.useful_load.or(profile.useful_load_lbs);
    profile.max_passengers = args.max_pax.or(profile.max_passengers);
    Ok(profile)
}

/// `config set` must be able to repair a damaged file, so an unreadable one
/// falls back to the built-in defaults instead of failing.
fn load_or_default(file: &ConfigFile) -> CalculationConfig {
    match file.load() {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "Planning defaults unreadable, starting from built-in values — path={} error={:#}",
                file.path().display(),
                e
            );
            CalculationConfig::default()
        }
    }
}

fn save_defaults(file: &ConfigFile, overrides: &ConfigOverrides) -> Result<CalculationConfig> {
    let engine = FlightEngine::with_config(load_or_default(file));
    engine.set_defaults(overrides);
    let defaults = engine.config().defaults();
    file.save(&defaults)?;
    Ok(defaults)
}

fn print_summary(r: &CalculationResult) {
    println!(
        "Route: {} stops, {} legs, {} intermediate",
        r.stop_count, r.num_stops, r.intermediate_stops
    );
    for (i, leg) in r.legs.iter().enumerate() {
        println!(
            "  Leg {:>2}: {:>7.1} nm  {:>6.0} lbs",
            i + 1,
            leg.distance_nm,
            leg.trip_fuel_lbs
        );
    }
    println!("Distance:      {:.1} nm", r.total_distance_nm);
    println!("Flight time:   {}", r.flight_time);
    println!("Total time:    {}", r.total_time);
    println!();
    println!("Trip fuel:     {:>6.0} lbs", r.trip_fuel);
    println!("Deck fuel:     {:>6.0} lbs", r.deck_fuel);
    println!("Contingency:   {:>6.0} lbs", r.contingency_fuel);
    println!("Taxi:          {:>6.0} lbs", r.taxi_fuel);
    println!("Reserve:       {:>6.0} lbs", r.reserve_fuel);
    println!("Total fuel:    {:>6.0} lbs", r.total_fuel);
    if r.fuel_exceeds_capacity {
        println!(
            "  WARNING: exceeds tank capacity of {:.0} lbs",
            r.aircraft.max_fuel_capacity_lbs
        );
    }
    println!();
    println!("Max takeoff:   {:>6.0} lbs", r.max_takeoff_weight);
    println!("Usable load:   {:>6.0} lbs", r.usable_load);
    println!(
        "Passengers:    {} (seats {}, weight allows {})",
        r.calculated_passengers, r.max_passengers, r.max_passengers_by_weight
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let file = match &cli.config {
        Some(path) => ConfigFile::at(path),
        None => ConfigFile::new(),
    };

    match &cli.command {
        Commands::Calc(args) => {
            let mode = if args.strict {
                ValidationMode::Strict
            } else {
                ValidationMode::Permissive
            };
            let engine = FlightEngine::with_config(file.load()?).with_validation(mode);
            let aircraft = load_aircraft(args)?;
            let overrides = ConfigOverrides::from(&args.overrides);

            match engine.calculate_flight_stats(&args.stops, Some(&aircraft), Some(&overrides)) {
                Ok(result) => {
                    if args.json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        print_summary(&result);
                    }
                }
                Err(CalcError::InvalidInput(_)) => {
                    eprintln!("Add more waypoints: a route needs at least 2 stops.");
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", file.path().display());
                println!("{}", serde_json::to_string_pretty(&file.load()?)?);
            }
            ConfigAction::Set(args) => {
                let overrides = ConfigOverrides::from(args);
                if overrides.is_empty() {
                    println!("Nothing to change.");
                    return Ok(());
                }
                save_defaults(&file, &overrides)?;
                println!("Saved defaults to {}", file.path().display());
            }
        },
    }

    Ok(())
}
