// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::aircraft::{AircraftProfile, ResolvedAircraft};
use crate::config::{CalculationConfig, ConfigOverrides, ConfigStore};
use crate::geo::{self, GeoPoint};
use crate::notify::{EventSlots, Listener, ON_CALCULATION_COMPLETE};
use crate::time_fmt::format_hhmm;
use crate::{CalcError, InvalidInput};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Configuration values are used unchecked.
    #[default]
    Permissive,
    /// Reject negative/non-finite configuration and unusable aircraft figures.
    Strict,
}

/// One leg of the route, unrounded. Used for report leg tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegSummary {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub distance_nm: f64,
    pub flight_time_hours: f64,
    pub trip_fuel_lbs: f64,
}

/// Everything a quote or summary panel needs for one route/aircraft pairing.
///
/// Fuel figures are whole pounds. `total_fuel` is rounded once from the
/// unrounded components, so it can differ by one from the sum of the
/// rounded trip/deck/contingency values shown next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_distance_nm: f64,
    pub legs: Vec<LegSummary>,

    pub trip_fuel: f64,
    pub deck_fuel: f64,
    pub contingency_fuel: f64,
    pub taxi_fuel: f64,
    pub reserve_fuel: f64,
    pub total_fuel: f64,
    pub fuel_exceeds_capacity: bool,

    pub flight_time_hours: f64,
    pub deck_time_hours: f64,
    pub total_time_hours: f64,
    pub flight_time: String,
    pub total_time: String,

    pub dry_operating_weight: f64,
    pub max_takeoff_weight: f64,
    pub useful_load: f64,
    pub usable_load: f64,

    pub max_passengers: u32,
    pub max_passengers_by_weight: u32,
    pub calculated_passengers: u32,

    /// Number of points on the route.
    pub stop_count: usize,
    /// Number of legs.
    pub num_stops: usize,
    pub intermediate_stops: usize,

    pub aircraft: ResolvedAircraft,
    pub config: CalculationConfig,
    pub calculated_at: DateTime<Utc>,
}

/// Fuel, time and weight-balance calculator.
///
/// Owns the live planning defaults and the completion listener slots, so two
/// engines never share configuration.
#[derive(Debug, Default)]
pub struct FlightEngine {
    config: ConfigStore,
    events: EventSlots,
    validation: ValidationMode,
}

impl FlightEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(defaults: CalculationConfig) -> Self {
        Self {
            config: ConfigStore::new(defaults),
            ..Self::default()
        }
    }

    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn events(&self) -> &EventSlots {
        &self.events
    }

    pub fn update_config(&self, partial: &ConfigOverrides) {
        self.config.update_config(partial);
    }

    pub fn set_defaults(&self, partial: &ConfigOverrides) {
        self.config.set_defaults(partial);
    }

    /// Registers the completion listener, replacing any earlier one.
    pub fn on_calculation_complete<F>(&self, listener: F) -> Option<Listener>
    where
        F: Fn(&CalculationResult) + Send + Sync + 'static,
    {
        self.events.register(ON_CALCULATION_COMPLETE, Arc::new(listener))
    }

    pub fn calculate_flight_stats(
        &self,
        stops: &[GeoPoint],
        aircraft: Option<&AircraftProfile>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<CalculationResult, CalcError> {
        if stops.len() < 2 {
            warn!(
                "Flight calculation skipped: not enough stops — stops={}",
                stops.len()
            );
            return Err(InvalidInput::TooFewStops { count: stops.len() }.into());
        }
        let Some(profile) = aircraft else {
            warn!("Flight calculation skipped: no aircraft selected");
            return Err(InvalidInput::MissingAircraft.into());
        };

        // Single snapshot; later updates to the store do not affect this call.
        let cfg = match overrides {
            Some(o) => self.config.with_overrides(o),
            None => self.config.defaults(),
        };
        let ac = ResolvedAircraft::resolve(profile);

        if self.validation == ValidationMode::Strict {
            check_strict(stops, &ac, &cfg)?;
        }

        let result = compute(stops, ac, cfg);

        info!(
            "Flight calculated — aircraft={} legs={} distance_nm={:.1} total_fuel_lbs={} total_time={} pax={}",
            profile.label(),
            result.num_stops,
            result.total_distance_nm,
            result.total_fuel,
            result.total_time,
            result.calculated_passengers
        );
        if result.fuel_exceeds_capacity {
            warn!(
                "Planned fuel exceeds tank capacity — total_fuel_lbs={} capacity_lbs={}",
                result.total_fuel, result.aircraft.max_fuel_capacity_lbs
            );
        }

        if self.events.emit(ON_CALCULATION_COMPLETE, &result) {
            debug!("Delivered result to {} listener", ON_CALCULATION_COMPLETE);
        }

        Ok(result)
    }
}

fn check_strict(
    stops: &[GeoPoint],
    ac: &ResolvedAircraft,
    cfg: &CalculationConfig,
) -> Result<(), CalcError> {
    cfg.validate().map_err(CalcError::InvalidConfig)?;

    if let Some(i) = stops.iter().position(|p| !p.is_finite()) {
        return Err(CalcError::InvalidConfig(format!(
            "stop {} has non-finite coordinates",
            i
        )));
    }
    if !(ac.cruise_speed_knots.is_finite() && ac.cruise_speed_knots > 0.0) {
        return Err(CalcError::InvalidConfig(format!(
            "cruiseSpeedKnots must be positive, got {}",
            ac.cruise_speed_knots
        )));
    }
    let weights = [
        ("fuelBurnLbsPerHour", ac.fuel_burn_lbs_per_hour),
        ("dryOperatingWeightLbs", ac.dry_operating_weight_lbs),
        ("usefulLoadLbs", ac.useful_load_lbs),
        ("maxFuelCapacityLbs", ac.max_fuel_capacity_lbs),
    ];
    for (name, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(CalcError::InvalidConfig(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

fn hours_at(distance_nm: f64, speed_knots: f64) -> f64 {
    if speed_knots.is_finite() && speed_knots > 0.0 {
        distance_nm / speed_knots
    } else {
        0.0
    }
}

fn compute(stops: &[GeoPoint], ac: ResolvedAircraft, cfg: CalculationConfig) -> CalculationResult {
    let leg_distances = geo::leg_distances_nm(stops);
    let total_distance_nm: f64 = leg_distances.iter().sum();

    let legs: Vec<LegSummary> = stops
        .windows(2)
        .zip(&leg_distances)
        .map(|(pair, &distance_nm)| {
            let flight_time_hours = hours_at(distance_nm, ac.cruise_speed_knots);
            LegSummary {
                from: pair[0],
                to: pair[1],
                distance_nm,
                flight_time_hours,
                trip_fuel_lbs: flight_time_hours * ac.fuel_burn_lbs_per_hour,
            }
        })
        .collect();

    let num_stops = stops.len().saturating_sub(1);
    // The last leg's destination is never charged deck time.
    let intermediate_stops = num_stops.saturating_sub(1);

    let flight_time_hours = hours_at(total_distance_nm, ac.cruise_speed_knots);
    let trip_fuel = flight_time_hours * ac.fuel_burn_lbs_per_hour;

    let deck_time_hours = intermediate_stops as f64 * cfg.deck_time_per_stop_minutes / 60.0;
    let deck_fuel = deck_time_hours * cfg.deck_fuel_flow_lbs_per_hour;

    let contingency_fuel = trip_fuel * (cfg.contingency_fuel_percent / 100.0);

    let total_fuel =
        (trip_fuel + deck_fuel + contingency_fuel + cfg.taxi_fuel_lbs + cfg.reserve_fuel_lbs)
            .round();

    let max_takeoff_weight = ac.max_takeoff_weight_lbs();
    let usable_load = (ac.useful_load_lbs - total_fuel).max(0.0);
    let max_passengers_by_weight = passengers_by_weight(usable_load, cfg.passenger_weight_lbs);
    let calculated_passengers = max_passengers_by_weight.min(ac.max_passengers);

    let total_time_hours = flight_time_hours + deck_time_hours;

    CalculationResult {
        total_distance_nm,
        legs,
        trip_fuel: trip_fuel.round(),
        deck_fuel: deck_fuel.round(),
        contingency_fuel: contingency_fuel.round(),
        taxi_fuel: cfg.taxi_fuel_lbs,
        reserve_fuel: cfg.reserve_fuel_lbs,
        total_fuel,
        fuel_exceeds_capacity: total_fuel > ac.max_fuel_capacity_lbs,
        flight_time_hours,
        deck_time_hours,
        total_time_hours,
        flight_time: format_hhmm(flight_time_hours),
        total_time: format_hhmm(total_time_hours),
        dry_operating_weight: ac.dry_operating_weight_lbs,
        max_takeoff_weight,
        useful_load: ac.useful_load_lbs,
        usable_load,
        max_passengers: ac.max_passengers,
        max_passengers_by_weight,
        calculated_passengers,
        stop_count: stops.len(),
        num_stops,
        intermediate_stops,
        aircraft: ac,
        config: cfg,
        calculated_at: Utc::now(),
    }
}

fn passengers_by_weight(usable_load: f64, passenger_weight: f64) -> u32 {
    if !(passenger_weight.is_finite() && passenger_weight > 0.0) {
        return 0;
    }
    // `as` saturates and maps NaN to 0.
    (usable_load / passenger_weight).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s76() -> AircraftProfile {
        AircraftProfile::new(145.0, 1100.0, 5000.0, 15000.0, 7000.0, 19)
    }

    #[test]
    fn test_one_hour_leg_by_hand() {
        // 145 nm due north at the equator -> exactly one hour at 145 kt.
        let deg = (145.0 / (geo::EARTH_RADIUS_KM * geo::KM_TO_NM)).to_degrees();
        let stops = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, deg)];
        let engine = FlightEngine::new();
        let r = engine
            .calculate_flight_stats(&stops, Some(&s76()), None)
            .unwrap();

        assert!((r.total_distance_nm - 145.0).abs() < 1e-6);
        assert!((r.flight_time_hours - 1.0).abs() < 1e-9);
        assert_eq!(r.trip_fuel, 1100.0);
        assert_eq!(r.contingency_fuel, 110.0);
        assert_eq!(r.deck_fuel, 0.0);
        // 1100 + 110 + 50 taxi + 600 reserve
        assert_eq!(r.total_fuel, 1860.0);
        assert_eq!(r.usable_load, 5140.0);
        // 5140 / 220 = 23.36 -> 23, capped by 19 seats
        assert_eq!(r.max_passengers_by_weight, 23);
        assert_eq!(r.calculated_passengers, 19);
        assert_eq!(r.max_takeoff_weight, 22000.0);
        assert!(!r.fuel_exceeds_capacity);
        assert_eq!(r.legs.len(), 1);
    }

    #[test]
    fn test_zero_speed_does_not_divide_by_zero() {
        let mut ac = s76();
        ac.cruise_speed_knots = Some(0.0);
        let stops = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        let r = FlightEngine::new()
            .calculate_flight_stats(&stops, Some(&ac), None)
            .unwrap();
        assert_eq!(r.flight_time_hours, 0.0);
        assert_eq!(r.trip_fuel, 0.0);
        assert!(r.total_distance_nm > 0.0);
    }

    #[test]
    fn test_passengers_by_weight_guards() {
        assert_eq!(passengers_by_weight(1000.0, 0.0), 0);
        assert_eq!(passengers_by_weight(1000.0, -200.0), 0);
        assert_eq!(passengers_by_weight(1000.0, 200.0), 5);
        assert_eq!(passengers_by_weight(999.9, 200.0), 4);
        assert_eq!(passengers_by_weight(0.0, 200.0), 0);
    }

    #[test]
    fn test_strict_rejects_zero_speed() {
        let mut ac = s76();
        ac.cruise_speed_knots = Some(0.0);
        let stops = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        let engine = FlightEngine::new().with_validation(ValidationMode::Strict);
        let err = engine
            .calculate_flight_stats(&stops, Some(&ac), None)
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfig(ref m) if m.contains("cruiseSpeedKnots")));
    }
}
