// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use heliplan_core::config::ConfigOverrides;
use heliplan_core::{AircraftProfile, CalcError, FlightEngine, GeoPoint, ValidationMode};
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn route() -> Vec<GeoPoint> {
    vec![GeoPoint::new(-93.2228, 30.1258), GeoPoint::new(-90.6622, 29.5704)]
}

fn aircraft() -> AircraftProfile {
    AircraftProfile::new(145.0, 1100.0, 5000.0, 15000.0, 7000.0, 19)
}

#[test]
fn test_permissive_passes_nonsense_through() {
    init_logging();
    let engine = FlightEngine::new();
    assert_eq!(engine.validation(), ValidationMode::Permissive);

    let odd = ConfigOverrides::default().reserve(-600.0).contingency(250.0);
    let r = engine
        .calculate_flight_stats(&route(), Some(&aircraft()), Some(&odd))
        .expect("permissive mode never rejects configuration");
    assert_eq!(r.reserve_fuel, -600.0);
    assert!(r.contingency_fuel > r.trip_fuel);
}

#[test]
fn test_strict_rejects_negative_reserve() {
    init_logging();
    let engine = FlightEngine::new().with_validation(ValidationMode::Strict);
    let odd = ConfigOverrides::default().reserve(-1.0);

    match engine.calculate_flight_stats(&route(), Some(&aircraft()), Some(&odd)) {
        Err(CalcError::InvalidConfig(msg)) => assert!(msg.contains("reserveFuelLbs"), "{}", msg),
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn test_strict_checks_stored_defaults_too() {
    init_logging();
    let engine = FlightEngine::new().with_validation(ValidationMode::Strict);
    engine.update_config(&ConfigOverrides::default().contingency(101.0));

    assert!(matches!(
        engine.calculate_flight_stats(&route(), Some(&aircraft()), None),
        Err(CalcError::InvalidConfig(_))
    ));

    // A one-off override can bring the call back into range
    let fixed = ConfigOverrides::default().contingency(10.0);
    assert!(engine
        .calculate_flight_stats(&route(), Some(&aircraft()), Some(&fixed))
        .is_ok());
}

#[test]
fn test_strict_rejects_bad_coordinates_and_weights() {
    init_logging();
    let engine = FlightEngine::new().with_validation(ValidationMode::Strict);

    let mut stops = route();
    stops.push(GeoPoint::new(f64::NAN, 29.0));
    assert!(matches!(
        engine.calculate_flight_stats(&stops, Some(&aircraft()), None),
        Err(CalcError::InvalidConfig(ref m)) if m.contains("stop 2")
    ));

    let mut heavy = aircraft();
    heavy.useful_load_lbs = Some(-10.0);
    assert!(matches!(
        engine.calculate_flight_stats(&route(), Some(&heavy), None),
        Err(CalcError::InvalidConfig(ref m)) if m.contains("usefulLoadLbs")
    ));
}

#[test]
fn test_strict_still_accepts_degenerate_routes() {
    init_logging();
    let engine = FlightEngine::new().with_validation(ValidationMode::Strict);
    let here = GeoPoint::new(-90.6622, 29.5704);
    let r = engine
        .calculate_flight_stats(&[here, here], Some(&aircraft()), None)
        .unwrap();
    assert_eq!(r.total_distance_nm, 0.0);
}
