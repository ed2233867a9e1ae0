// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::info;
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Operator-tunable planning defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationConfig {
    pub passenger_weight_lbs: f64,
    pub contingency_fuel_percent: f64,
    pub taxi_fuel_lbs: f64,
    pub reserve_fuel_lbs: f64,
    pub deck_time_per_stop_minutes: f64,
    pub deck_fuel_flow_lbs_per_hour: f64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            passenger_weight_lbs: 220.0,
            contingency_fuel_percent: 10.0,
            taxi_fuel_lbs: 50.0,
            reserve_fuel_lbs: 600.0,
            deck_time_per_stop_minutes: 5.0,
            deck_fuel_flow_lbs_per_hour: 400.0,
        }
    }
}

impl CalculationConfig {
    /// Returns a copy with every `Some` field of `overrides` applied.
    pub fn merged(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            passenger_weight_lbs: overrides
                .passenger_weight_lbs
                .unwrap_or(self.passenger_weight_lbs),
            contingency_fuel_percent: overrides
                .contingency_fuel_percent
                .unwrap_or(self.contingency_fuel_percent),
            taxi_fuel_lbs: overrides.taxi_fuel_lbs.unwrap_or(self.taxi_fuel_lbs),
            reserve_fuel_lbs: overrides.reserve_fuel_lbs.unwrap_or(self.reserve_fuel_lbs),
            deck_time_per_stop_minutes: overrides
                .deck_time_per_stop_minutes
                .unwrap_or(self.deck_time_per_stop_minutes),
            deck_fuel_flow_lbs_per_hour: overrides
                .deck_fuel_flow_lbs_per_hour
                .unwrap_or(self.deck_fuel_flow_lbs_per_hour),
        }
    }

    /// Sanity checks used by strict validation. The default permissive engine never calls this.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("passengerWeightLbs", self.passenger_weight_lbs),
            ("contingencyFuelPercent", self.contingency_fuel_percent),
            ("taxiFuelLbs", self.taxi_fuel_lbs),
            ("reserveFuelLbs", self.reserve_fuel_lbs),
            ("deckTimePerStopMinutes", self.deck_time_per_stop_minutes),
            ("deckFuelFlowLbsPerHour", self.deck_fuel_flow_lbs_per_hour),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", name, value));
            }
            if value < 0.0 {
                return Err(format!("{} must not be negative, got {}", name, value));
            }
        }
        if self.contingency_fuel_percent > 100.0 {
            return Err(format!(
                "contingencyFuelPercent must be at most 100, got {}",
                self.contingency_fuel_percent
            ));
        }
        if self.passenger_weight_lbs == 0.0 {
            return Err("passengerWeightLbs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Partial configuration. `None` keeps whatever the store holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passenger_weight_lbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contingency_fuel_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxi_fuel_lbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_fuel_lbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_time_per_stop_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_fuel_flow_lbs_per_hour: Option<f64>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn contingency(mut self, percent: f64) -> Self {
        self.contingency_fuel_percent = Some(percent);
        self
    }

    pub fn reserve(mut self, lbs: f64) -> Self {
        self.reserve_fuel_lbs = Some(lbs);
        self
    }

    pub fn taxi(mut self, lbs: f64) -> Self {
        self.taxi_fuel_lbs = Some(lbs);
        self
    }

    pub fn passenger_weight(mut self, lbs: f64) -> Self {
        self.passenger_weight_lbs = Some(lbs);
        self
    }

    pub fn deck_time(mut self, minutes: f64) -> Self {
        self.deck_time_per_stop_minutes = Some(minutes);
        self
    }

    pub fn deck_flow(mut self, lbs_per_hour: f64) -> Self {
        self.deck_fuel_flow_lbs_per_hour = Some(lbs_per_hour);
        self
    }
}

/// Live planning defaults shared by every calculation on an engine.
///
/// Reads hand out copies, so a calculation works from a snapshot taken once
/// at entry and a concurrent [`ConfigStore::update_config`] can never be seen half-applied.
#[derive(Debug, Default)]
pub struct ConfigStore {
    defaults: RwLock<CalculationConfig>,
}

impl ConfigStore {
    pub fn new(defaults: CalculationConfig) -> Self {
        Self {
            defaults: RwLock::new(defaults),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CalculationConfig> {
        // Copy data; a poisoned lock carries no broken invariant.
        self.defaults.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CalculationConfig> {
        self.defaults.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn defaults(&self) -> CalculationConfig {
        *self.read()
    }

    /// Effective configuration for one call. Stored defaults are left alone.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> CalculationConfig {
        self.read().merged(overrides)
    }

    /// Merges `partial` into the stored defaults. Last write wins; nothing is validated.
    pub fn update_config(&self, partial: &ConfigOverrides) {
        let mut guard = self.write();
        let merged = guard.merged(partial);
        *guard = merged;
        info!(
            "Planning defaults updated — contingency_pct={} reserve_lbs={} taxi_lbs={} pax_lbs={} deck_min={} deck_flow={}",
            guard.contingency_fuel_percent,
            guard.reserve_fuel_lbs,
            guard.taxi_fuel_lbs,
            guard.passenger_weight_lbs,
            guard.deck_time_per_stop_minutes,
            guard.deck_fuel_flow_lbs_per_hour
        );
    }

    pub fn set_defaults(&self, partial: &ConfigOverrides) {
        self.update_config(partial);
    }
}
