//! OSRM HTTP adapter for travel times and route geometry.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::RoutingError;
use crate::matrix::DurationMatrix;
use crate::traits::TravelTimeProvider;
use crate::venue::GeoPoint;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "foot".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn table_url(&self, points: &[GeoPoint]) -> String {
        format!(
            "{}/table/v1/{}/{}?annotations=duration",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coordinate_list(points)
        )
    }

    fn route_url(&self, points: &[GeoPoint]) -> String {
        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=polyline",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coordinate_list(points)
        )
    }

    fn get<T: DeserializeOwned + OsrmStatus>(&self, url: &str) -> Result<T, RoutingError> {
        let response = self.client.get(url).send().map_err(|err| {
            warn!(error = %err, "OSRM request failed");
            RoutingError::Http(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
            warn!(status = status.as_u16(), "OSRM returned an error status");
            return Err(RoutingError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: T = response
            .json()
            .map_err(|err| RoutingError::MalformedResponse(err.to_string()))?;
        body.check()?;
        Ok(body)
    }
}

/// OSRM wants `lon,lat` pairs separated by `;`.
fn coordinate_list(points: &[GeoPoint]) -> String {
    points
        .iter()
        .map(|point| format!("{:.6},{:.6}", point.lon, point.lat))
        .collect::<Vec<_>>()
        .join(";")
}

fn seconds_to_minutes(seconds: f64) -> u32 {
    (seconds / 60.0).round().max(0.0) as u32
}

impl TravelTimeProvider for OsrmClient {
    fn durations(&self, points: &[GeoPoint]) -> Result<DurationMatrix, RoutingError> {
        if points.is_empty() {
            return Ok(DurationMatrix::from_rows(Vec::new())?);
        }

        let body: OsrmTableResponse = self.get(&self.table_url(points))?;
        let rows = body
            .durations
            .ok_or_else(|| RoutingError::MalformedResponse("table response has no durations".into()))?;

        let matrix = DurationMatrix::from_optional_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(|cell| cell.map(seconds_to_minutes)).collect())
                .collect(),
        )?;
        matrix.expect_size(points.len())?;

        debug!(points = points.len(), "fetched OSRM duration table");
        Ok(matrix)
    }

    fn route_polyline(&self, points: &[GeoPoint]) -> Result<String, RoutingError> {
        let body: OsrmRouteResponse = self.get(&self.route_url(points))?;
        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::MalformedResponse("route response has no routes".into()))?;

        debug!(points = points.len(), "fetched OSRM route geometry");
        Ok(route.geometry)
    }
}

trait OsrmStatus {
    fn check(&self) -> Result<(), RoutingError>;
}

fn check_code(code: &str, message: &Option<String>) -> Result<(), RoutingError> {
    if code == "Ok" {
        Ok(())
    } else {
        Err(RoutingError::Provider {
            code: code.to_string(),
            message: message.clone().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmStatus for OsrmTableResponse {
    fn check(&self) -> Result<(), RoutingError> {
        check_code(&self.code, &self.message)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

impl OsrmStatus for OsrmRouteResponse {
    fn check(&self) -> Result<(), RoutingError> {
        check_code(&self.code, &self.message)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
}
