//! Driving time estimates from an external routing service.

mod openrouteservice;

pub use openrouteservice::*;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::shared::{geo::Coordinate, time::Minutes};

/// Upper bound on a single ETA lookup when none is configured.
pub const DEFAULT_ETA_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum Error {
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Routing service answered with status {0}")]
    Status(u16),
    #[error("Routing service returned no route")]
    NoRoute,
    #[error("Malformed routing response: {0}")]
    Malformed(String),
    #[error("Routing service did not answer within {0:?}")]
    Timeout(Duration),
}

/// The one failure callers see: this pair of points could not be scored.
#[derive(Error, Debug)]
#[error("ETA unavailable: {reason}")]
pub struct Unavailable {
    #[source]
    pub reason: Error,
}

impl From<Error> for Unavailable {
    fn from(reason: Error) -> Self {
        Self { reason }
    }
}

#[async_trait]
pub trait EtaProvider: Send + Sync {
    /// Driving time in seconds for the best route from `from` to `to`.
    /// Both points use this crate's (lat, lon) convention; adapters reorder
    /// as their service requires. "No route" must be an error.
    async fn driving_duration(&self, from: Coordinate, to: Coordinate) -> Result<f64, Error>;
}

/// Wraps an [`EtaProvider`] with a per call timeout and minute rounding.
#[derive(Clone)]
pub struct EtaResolver {
    provider: Arc<dyn EtaProvider>,
    timeout: Duration,
}

impl EtaResolver {
    pub fn new(provider: Arc<dyn EtaProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_ETA_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whole minutes from `from` to `to`, always rounded up.
    pub async fn estimate(&self, from: Coordinate, to: Coordinate) -> Result<Minutes, Unavailable> {
        let lookup = self.provider.driving_duration(from, to);
        let seconds = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(seconds)) => seconds,
            Ok(Err(err)) => {
                warn!(from = %from, to = %to, "ETA lookup failed: {err}");
                return Err(err.into());
            }
            Err(_) => {
                warn!(from = %from, to = %to, "ETA lookup timed out after {:?}", self.timeout);
                return Err(Error::Timeout(self.timeout).into());
            }
        };
        let minutes = Minutes::ceil_from_seconds(seconds)
            .ok_or_else(|| Error::Malformed(format!("duration {seconds}")))?;
        debug!(from = %from, to = %to, seconds, "ETA is {} min", minutes.as_minutes());
        Ok(minutes)
    }
}
