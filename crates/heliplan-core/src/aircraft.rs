// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

// Fallbacks for profiles that omit a performance field (medium twin, S-76 class).
pub const FALLBACK_CRUISE_SPEED_KNOTS: f64 = 145.0;
pub const FALLBACK_FUEL_BURN_LBS_PER_HOUR: f64 = 1100.0;
pub const FALLBACK_MAX_FUEL_CAPACITY_LBS: f64 = 5000.0;
pub const FALLBACK_DRY_OPERATING_WEIGHT_LBS: f64 = 15000.0;
pub const FALLBACK_USEFUL_LOAD_LBS: f64 = 7000.0;
pub const FALLBACK_MAX_PASSENGERS: u32 = 19;

/// Aircraft performance record as delivered by the aircraft-data service.
/// Any field may be missing; see [`ResolvedAircraft::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AircraftProfile {
    pub registration: Option<String>,
    pub model: Option<String>,
    pub cruise_speed_knots: Option<f64>,
    pub fuel_burn_lbs_per_hour: Option<f64>,
    pub max_fuel_capacity_lbs: Option<f64>,
    pub dry_operating_weight_lbs: Option<f64>,
    pub useful_load_lbs: Option<f64>,
    pub max_passengers: Option<u32>,
}

impl AircraftProfile {
    /// Builds a fully specified profile.
    pub fn new(
        cruise_speed_knots: f64,
        fuel_burn_lbs_per_hour: f64,
        max_fuel_capacity_lbs: f64,
        dry_operating_weight_lbs: f64,
        useful_load_lbs: f64,
        max_passengers: u32,
    ) -> Self {
        Self {
            registration: None,
            model: None,
            cruise_speed_knots: Some(cruise_speed_knots),
            fuel_burn_lbs_per_hour: Some(fuel_burn_lbs_per_hour),
            max_fuel_capacity_lbs: Some(max_fuel_capacity_lbs),
            dry_operating_weight_lbs: Some(dry_operating_weight_lbs),
            useful_load_lbs: Some(useful_load_lbs),
            max_passengers: Some(max_passengers),
        }
    }

    pub fn label(&self) -> String {
        match (&self.registration, &self.model) {
            (Some(reg), Some(model)) => format!("{} ({})", reg, model),
            (Some(reg), None) => reg.clone(),
            (None, Some(model)) => model.clone(),
            (None, None) => "unnamed aircraft".to_string(),
        }
    }
}

/// Picks the profile's own value when present, otherwise the named fallback.
pub fn resolve_field<T: Copy>(profile_value: Option<T>, fallback: T) -> T {
    profile_value.unwrap_or(fallback)
}

fn resolve_logged<T>(label: &str, name: &str, value: Option<T>, fallback: T) -> T
where
    T: Copy + Display,
{
    if value.is_none() {
        debug!(
            "Aircraft profile missing field, using fallback — aircraft={} field={} fallback={}",
            label, name, fallback
        );
    }
    resolve_field(value, fallback)
}

/// Aircraft figures with every fallback applied. This is what the engine computes with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAircraft {
    pub cruise_speed_knots: f64,
    pub fuel_burn_lbs_per_hour: f64,
    pub max_fuel_capacity_lbs: f64,
    pub dry_operating_weight_lbs: f64,
    pub useful_load_lbs: f64,
    pub max_passengers: u32,
}

impl ResolvedAircraft {
    pub fn resolve(profile: &AircraftProfile) -> Self {
        let label = profile.label();
        Self {
            cruise_speed_knots: resolve_logged(
                &label,
                "cruiseSpeedKnots",
                profile.cruise_speed_knots,
                FALLBACK_CRUISE_SPEED_KNOTS,
            ),
            fuel_burn_lbs_per_hour: resolve_logged(
                &label,
                "fuelBurnLbsPerHour",
                profile.fuel_burn_lbs_per_hour,
                FALLBACK_FUEL_BURN_LBS_PER_HOUR,
            ),
            max_fuel_capacity_lbs: resolve_logged(
                &label,
                "maxFuelCapacityLbs",
                profile.max_fuel_capacity_lbs,
                FALLBACK_MAX_FUEL_CAPACITY_LBS,
            ),
            dry_operating_weight_lbs: resolve_logged(
                &label,
                "dryOperatingWeightLbs",
                profile.dry_operating_weight_lbs,
                FALLBACK_DRY_OPERATING_WEIGHT_LBS,
            ),
            useful_load_lbs: resolve_logged(
                &label,
                "usefulLoadLbs",
                profile.useful_load_lbs,
                FALLBACK_USEFUL_LOAD_LBS,
            ),
            max_passengers: resolve_logged(
                &label,
                "maxPassengers",
                profile.max_passengers,
                FALLBACK_MAX_PASSENGERS,
            ),
        }
    }

    pub fn max_takeoff_weight_lbs(&self) -> f64 {
        self.dry_operating_weight_lbs + self.useful_load_lbs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_field_prefers_profile() {
        assert_eq!(resolve_field(Some(120.0), FALLBACK_CRUISE_SPEED_KNOTS), 120.0);
        assert_eq!(resolve_field(None, FALLBACK_CRUISE_SPEED_KNOTS), 145.0);
        // Zero is a real value, not "missing"
        assert_eq!(resolve_field(Some(0u32), FALLBACK_MAX_PASSENGERS), 0);
    }

    #[test]
    fn test_empty_profile_gets_all_fallbacks() {
        let resolved = ResolvedAircraft::resolve(&AircraftProfile::default());
        assert_eq!(resolved.cruise_speed_knots, 145.0);
        assert_eq!(resolved.fuel_burn_lbs_per_hour, 1100.0);
        assert_eq!(resolved.max_fuel_capacity_lbs, 5000.0);
        assert_eq!(resolved.dry_operating_weight_lbs, 15000.0);
        assert_eq!(resolved.useful_load_lbs, 7000.0);
        assert_eq!(resolved.max_passengers, 19);
        assert_eq!(resolved.max_takeoff_weight_lbs(), 22000.0);
    }

    #[test]
    fn test_partial_profile_from_json() {
        let profile: AircraftProfile = serde_json::from_str(
            r#"{"registration": "N76HP", "cruiseSpeedKnots": 155, "maxPassengers": 12}"#,
        )
        .unwrap();
        let resolved = ResolvedAircraft::resolve(&profile);
        assert_eq!(resolved.cruise_speed_knots, 155.0);
        assert_eq!(resolved.max_passengers, 12);
        assert_eq!(resolved.fuel_burn_lbs_per_hour, FALLBACK_FUEL_BURN_LBS_PER_HOUR);
        assert_eq!(profile.label(), "N76HP");
    }
}
