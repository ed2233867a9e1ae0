// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod aircraft;
pub mod config;
pub mod engine;
pub mod geo;
pub mod notify;
pub mod persistence;
pub mod time_fmt;

use std::path::PathBuf;
use thiserror::Error;

pub use aircraft::{AircraftProfile, ResolvedAircraft};
pub use config::{CalculationConfig, ConfigOverrides, ConfigStore};
pub use engine::{CalculationResult, FlightEngine, LegSummary, ValidationMode};
pub use geo::GeoPoint;

/// Why a calculation produced no result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("route needs at least 2 stops, got {count}")]
    TooFewStops { count: usize },
    #[error("no aircraft profile supplied")]
    MissingAircraft,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// Only raised when the engine runs in [`ValidationMode::Strict`].
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Per-user configuration directory shared by the CLI and any other front end.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "heliplan", "HeliPlan")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".heliplan"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: CalcError = InvalidInput::TooFewStops { count: 1 }.into();
        assert_eq!(
            err.to_string(),
            "Invalid input: route needs at least 2 stops, got 1"
        );
        assert_eq!(
            CalcError::from(InvalidInput::MissingAircraft).to_string(),
            "Invalid input: no aircraft profile supplied"
        );
    }

    #[test]
    fn test_config_root_is_not_empty() {
        assert!(!get_config_root().as_os_str().is_empty());
    }
}
