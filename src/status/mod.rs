//! "Which bus reaches my nearest stop first, and when."

use std::{sync::Arc, time::Duration};

use futures_util::future::join_all;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    eta::EtaResolver,
    registry::{ActiveVehicleRegistry, DEFAULT_FRESHNESS_WINDOW, VehicleEntry},
    routes::{self, RouteStore, Stop, find_nearest},
    shared::{geo::Coordinate, time::Minutes},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Route error: {0}")]
    Route(#[from] routes::Error),
}

/// The winning vehicle for a status query.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub vehicle_id: String,
    pub vehicle_location: Coordinate,
    pub route_name: String,
    pub nearest_stop: Stop,
    pub eta: Minutes,
}

/// Every answer a status query can give. None of these are failures.
#[derive(Debug, Clone, PartialEq)]
pub enum BusStatus {
    Active(BestMatch),
    NoActiveVehicles,
    RouteNotFound,
    /// Vehicles are live but no ETA lookup succeeded.
    EtaUnavailable,
    /// The stored route has no stops to measure against.
    NoStopsAvailable,
}

pub struct StatusService {
    registry: Arc<ActiveVehicleRegistry>,
    routes: Arc<dyn RouteStore>,
    eta: EtaResolver,
    freshness: Duration,
}

impl StatusService {
    pub fn new(
        registry: Arc<ActiveVehicleRegistry>,
        routes: Arc<dyn RouteStore>,
        eta: EtaResolver,
    ) -> Self {
        Self {
            registry,
            routes,
            eta,
            freshness: DEFAULT_FRESHNESS_WINDOW,
        }
    }

    pub fn with_freshness(mut self, window: Duration) -> Self {
        self.freshness = window;
        self
    }

    /// Picks the live vehicle on `route_name` with the smallest ETA to the
    /// stop nearest the rider.
    ///
    /// ETA lookups run concurrently, one per vehicle, and all of them are
    /// awaited. A vehicle whose lookup fails is left out. Equal ETAs go to
    /// the vehicle seen first by the registry.
    pub async fn query(&self, rider: Coordinate, route_name: &str) -> Result<BusStatus, self::Error> {
        let Some(route) = self.routes.get(route_name).await? else {
            debug!(route = %route_name, "Status query for unknown route");
            return Ok(BusStatus::RouteNotFound);
        };

        let vehicles = self
            .registry
            .live_entries_for_route(route_name, self.freshness)
            .await;
        if vehicles.is_empty() {
            debug!(route = %route_name, "No live vehicles");
            return Ok(BusStatus::NoActiveVehicles);
        }

        let nearest = match find_nearest(&rider, route.stops()) {
            Ok(stop) => stop.clone(),
            Err(routes::Error::NoStopsAvailable) => return Ok(BusStatus::NoStopsAvailable),
            Err(err) => return Err(err.into()),
        };

        let lookups = vehicles
            .iter()
            .map(|vehicle| self.eta.estimate(vehicle.location, nearest.coordinate));
        let estimates = join_all(lookups).await;

        let mut best: Option<(&VehicleEntry, Minutes)> = None;
        for (vehicle, estimate) in vehicles.iter().zip(estimates) {
            let Ok(eta) = estimate else {
                continue;
            };
            if best.is_none_or(|(_, best_eta)| eta < best_eta) {
                best = Some((vehicle, eta));
            }
        }

        let Some((vehicle, eta)) = best else {
            info!(
                route = %route_name,
                "No ETA for any of {} live vehicles",
                vehicles.len()
            );
            return Ok(BusStatus::EtaUnavailable);
        };

        info!(
            route = %route_name,
            vehicle_id = %vehicle.vehicle_id,
            stop = %nearest.name,
            "Best vehicle arrives in {} min",
            eta.as_minutes()
        );
        Ok(BusStatus::Active(BestMatch {
            vehicle_id: vehicle.vehicle_id.clone(),
            vehicle_location: vehicle.location,
            route_name: route_name.to_string(),
            nearest_stop: nearest,
            eta,
        }))
    }
}
