use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use serde::{Deserialize, Serialize};

use super::{EtaProvider, Error};
use crate::shared::geo::Coordinate;

/// OpenRouteService directions client.
#[derive(Debug, Clone)]
pub struct OpenRouteService {
    client: Client,
    api_key: String,
    directions_url: String,
}

/// Request body for the directions endpoint.
/// The service wants every point as `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsRequest {
    pub coordinates: [[f64; 2]; 2],
}

impl DirectionsRequest {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self {
            coordinates: [from.to_lon_lat(), to.to_lon_lat()],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    pub summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
pub struct RouteSummary {
    pub duration: Option<f64>,
}

impl DirectionsResponse {
    /// Duration in seconds of the first route. An empty route list counts
    /// as a failure, the same as a transport error.
    pub fn duration(&self) -> Result<f64, Error> {
        let route = self.routes.first().ok_or(Error::NoRoute)?;
        route
            .summary
            .duration
            .ok_or_else(|| Error::Malformed("route summary has no duration".into()))
    }
}

impl OpenRouteService {
    pub fn new(api_key: impl Into<String>, directions_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            directions_url: directions_url.into(),
        }
    }
}

#[async_trait]
impl EtaProvider for OpenRouteService {
    async fn driving_duration(&self, from: Coordinate, to: Coordinate) -> Result<f64, Error> {
        let response = self
            .client
            .post(&self.directions_url)
            .header(AUTHORIZATION, &self.api_key)
            .json(&DirectionsRequest::new(from, to))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }
        let body = response.text().await?;
        let directions: DirectionsResponse =
            serde_json::from_str(&body).map_err(|err| Error::Malformed(err.to_string()))?;
        directions.duration()
    }
}
