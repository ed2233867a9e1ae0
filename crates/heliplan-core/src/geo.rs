// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Exact conversion ratio used throughout route planning.
pub const KM_TO_NM: f64 = 0.539957;

/// A route stop in degrees. Longitude first, matching the map collaborator's ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "longitude")]
    pub lon: f64,
    #[serde(alias = "latitude")]
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // h can drift a hair above 1.0 for antipodal points.
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn haversine_nm(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_km(a, b) * KM_TO_NM
}

/// Distance of every consecutive pair, in flight order.
/// Fewer than two stops yields an empty list.
pub fn leg_distances_nm(stops: &[GeoPoint]) -> Vec<f64> {
    stops
        .windows(2)
        .map(|pair| haversine_nm(pair[0], pair[1]))
        .collect()
}

/// Path length along the stops as given. This is not shortest-route distance.
pub fn route_distance_nm(stops: &[GeoPoint]) -> f64 {
    leg_distances_nm(stops).iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAKE_CHARLES: GeoPoint = GeoPoint {
        lon: -93.2228,
        lat: 30.1258,
    };
    const HOUMA: GeoPoint = GeoPoint {
        lon: -90.6622,
        lat: 29.5704,
    };

    #[test]
    fn test_coincident_points_are_zero() {
        assert_eq!(haversine_nm(LAKE_CHARLES, LAKE_CHARLES), 0.0);
        assert_eq!(route_distance_nm(&[HOUMA, HOUMA, HOUMA]), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // 1 degree of arc on a 6371 km sphere is ~111.19 km.
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01, "got {}", d);
        let nm = haversine_nm(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((nm - 111.195 * KM_TO_NM).abs() < 0.01, "got {}", nm);
    }

    #[test]
    fn test_gulf_coast_leg() {
        let d = haversine_nm(LAKE_CHARLES, HOUMA);
        assert!(d > 130.0 && d < 150.0, "unexpected leg length {}", d);
        // Symmetric
        assert!((d - haversine_nm(HOUMA, LAKE_CHARLES)).abs() < 1e-9);
    }

    #[test]
    fn test_route_is_path_dependent() {
        let direct = route_distance_nm(&[LAKE_CHARLES, HOUMA]);
        let out_and_back = route_distance_nm(&[LAKE_CHARLES, HOUMA, LAKE_CHARLES, HOUMA]);
        assert!((out_and_back - 3.0 * direct).abs() < 1e-6);
    }

    #[test]
    fn test_leg_list_shape() {
        assert!(leg_distances_nm(&[]).is_empty());
        assert!(leg_distances_nm(&[HOUMA]).is_empty());
        assert_eq!(route_distance_nm(&[HOUMA]), 0.0);

        let legs = leg_distances_nm(&[LAKE_CHARLES, HOUMA, HOUMA]);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[1], 0.0);
    }

    #[test]
    fn test_deserialize_long_field_names() {
        let p: GeoPoint = serde_json::from_str(r#"{"longitude": -90.5, "latitude": 29.1}"#).unwrap();
        assert_eq!(p, GeoPoint::new(-90.5, 29.1));
        let q: GeoPoint = serde_json::from_str(r#"{"lon": 1.0, "lat": 2.0}"#).unwrap();
        assert_eq!(q, (1.0, 2.0).into());
    }
}
