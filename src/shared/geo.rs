use std::{cmp, fmt::Display};

use serde::{Deserialize, Serialize};

/// Straight-line distance measured in raw coordinate degrees.
/// Latitude and longitude are treated as a flat plane, which is close
/// enough for picking a stop within a single city.
#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Distance {
    pub const fn from_degrees(distance: f64) -> Self {
        Self(distance)
    }
}

/// A (latitude, longitude) pair in degrees.
/// On the wire this is always a two element array in that order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both parts are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Euclidean distance on the raw (lat, lon) pair, not a geodesic.
    pub fn planar_distance(&self, coord: &Self) -> Distance {
        let dist_lat = self.latitude - coord.latitude;
        let dist_lon = self.longitude - coord.longitude;
        Distance::from_degrees(f64::sqrt(dist_lat * dist_lat + dist_lon * dist_lon))
    }

    /// The same point ordered longitude first, as routing engines expect.
    pub const fn to_lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

#[test]
fn planar_distance_test() {
    let coord_a = Coordinate::new(0.0, 0.0);
    let coord_b = Coordinate::new(3.0, 4.0);
    assert_eq!(coord_a.planar_distance(&coord_b), Distance::from_degrees(5.0));
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_degrees(0.01);
    let dist_b = Distance::from_degrees(0.005);
    assert!(dist_a > dist_b)
}

#[test]
fn lon_lat_swap_test() {
    let coord = Coordinate::new(12.97, 77.59);
    assert_eq!(coord.to_lon_lat(), [77.59, 12.97]);
}

#[test]
fn coordinate_wire_format_test() {
    let coord: Coordinate = serde_json::from_str("[12.5, 77.25]").unwrap();
    assert_eq!(coord, Coordinate::new(12.5, 77.25));
    assert_eq!(serde_json::to_string(&coord).unwrap(), "[12.5,77.25]");
}
