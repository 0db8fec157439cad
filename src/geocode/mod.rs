//! Place name lookups against an external geocoding service.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::shared::geo::Coordinate;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    #[error("Geocoder answered with status {0}")]
    Status(u16),
    #[error("No place matched {0:?}")]
    Unresolvable(String),
    #[error("Malformed geocoder response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub display_name: String,
    pub coordinate: Coordinate,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a place name to a single best coordinate.
    async fn geocode(&self, place: &str) -> Result<Coordinate, Error>;

    /// Candidate places for a partial query, best first.
    /// An empty query is an empty list. Upstream failures are errors.
    async fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<PlaceSuggestion>, Error>;
}

/// LocationIQ search and autocomplete endpoints.
#[derive(Debug, Clone)]
pub struct LocationIq {
    client: Client,
    api_key: String,
    search_url: String,
    autocomplete_url: String,
}

/// One entry of a LocationIQ search or autocomplete answer.
/// Coordinates arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationIqPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl LocationIqPlace {
    pub fn coordinate(&self) -> Result<Coordinate, Error> {
        let latitude: f64 = self
            .lat
            .parse()
            .map_err(|_| Error::Malformed(format!("latitude {:?}", self.lat)))?;
        let longitude: f64 = self
            .lon
            .parse()
            .map_err(|_| Error::Malformed(format!("longitude {:?}", self.lon)))?;
        Ok(Coordinate {
            latitude,
            longitude,
        })
    }

    /// `None` when the coordinates do not parse.
    pub fn into_suggestion(self) -> Option<PlaceSuggestion> {
        let coordinate = self.coordinate().ok()?;
        Some(PlaceSuggestion {
            display_name: self.display_name,
            coordinate,
        })
    }
}

impl LocationIq {
    pub fn new(
        api_key: impl Into<String>,
        search_url: impl Into<String>,
        autocomplete_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            search_url: search_url.into(),
            autocomplete_url: autocomplete_url.into(),
        }
    }


    async fn places(
        &self,
        base: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<LocationIqPlace>, Error> {
        let mut query = vec![("key", self.api_key.as_str())];
        query.extend_from_slice(params);
        let url =
            Url::parse_with_params(base, &query).map_err(|err| Error::InvalidUrl(err.to_string()))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| Error::Malformed(err.to_string()))
    }
}

#[async_trait]
impl Geocoder for LocationIq {
    async fn geocode(&self, place: &str) -> Result<Coordinate, Error> {
        let places = self
            .places(
                &self.search_url,
                &[("q", place), ("format", "json"), ("limit", "1")],
            )
            .await?;
        let first = places
            .first()
            .ok_or_else(|| Error::Unresolvable(place.to_string()))?;
        let coordinate = first.coordinate()?;
        debug!(place = %place, coordinate = %coordinate, "Geocoded place");
        Ok(coordinate)
    }

    async fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<PlaceSuggestion>, Error> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let limit = limit.to_string();
        let places = self
            .places(&self.autocomplete_url, &[("q", query), ("limit", limit.as_str())])
            .await?;
        Ok(places
            .into_iter()
            .filter_map(LocationIqPlace::into_suggestion)
            .collect())
    }
}
