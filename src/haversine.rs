//! Haversine travel-time provider (fallback when no routing service is set).
//!
//! Uses great-circle distance and an assumed walking speed.
//! Less accurate than OSRM (ignores streets) but always available.

use crate::error::RoutingError;
use crate::matrix::DurationMatrix;
use crate::polyline::{DEFAULT_PRECISION, Polyline};
use crate::traits::TravelTimeProvider;
use crate::venue::GeoPoint;

/// Average walking speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 4.8;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters.
pub fn distance_meters(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Haversine-based travel-time provider.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Assumed average speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert a distance in meters to whole minutes at the configured speed.
    fn meters_to_minutes(&self, meters: f64) -> u32 {
        let hours = meters / 1000.0 / self.speed_kmh;
        (hours * 60.0).round() as u32
    }
}

impl TravelTimeProvider for HaversineMatrix {
    fn durations(&self, points: &[GeoPoint]) -> Result<DurationMatrix, RoutingError> {
        let rows: Vec<Vec<u32>> = points
            .iter()
            .enumerate()
            .map(|(i, from)| {
                points
                    .iter()
                    .enumerate()
                    .map(|(j, to)| {
                        if i == j {
                            0
                        } else {
                            self.meters_to_minutes(distance_meters(*from, *to))
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(DurationMatrix::from_rows(rows)?)
    }

    /// Straight segments between the points.
    fn route_polyline(&self, points: &[GeoPoint]) -> Result<String, RoutingError> {
        let polyline = Polyline::new(points.iter().map(|p| (p.lat, p.lon)).collect());
        Ok(polyline.encode(DEFAULT_PRECISION))
    }
}
