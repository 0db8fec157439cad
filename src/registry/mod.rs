mod models;
mod store;

pub use models::*;
pub use store::*;

use std::{io, sync::Arc, time::Duration};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::shared::time::{Clock, SystemClock, Timestamp};

/// How long a report keeps a vehicle live.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(120);

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Vehicle id is required")]
    MissingVehicleId,
}

/// Last known position of every vehicle, where liveness is derived from the
/// age of the report rather than stored.
pub struct ActiveVehicleRegistry {
    store: Arc<dyn VehicleStore>,
    clock: Arc<dyn Clock>,
    writer: Mutex<()>,
}

impl ActiveVehicleRegistry {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            writer: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Reads the persisted registry.
    /// Missing or unreadable storage reads as an empty registry.
    async fn snapshot(&self) -> Vehicles {
        match self.store.load().await {
            Ok(vehicles) => vehicles,
            Err(err) => {
                warn!("Failed to read vehicle registry, treating it as empty: {err}");
                Vehicles::new()
            }
        }
    }

    /// Reads the registry ahead of a write.
    /// Only unparseable storage starts over empty. Any other read failure
    /// aborts the write so stored vehicles are never dropped.
    async fn load_for_write(&self) -> Result<Vehicles, self::Error> {
        match self.store.load().await {
            Ok(vehicles) => Ok(vehicles),
            Err(Error::Json(err)) => {
                warn!("Vehicle registry is unparseable, starting over: {err}");
                Ok(Vehicles::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Stores the report under `vehicle_id`, replacing whatever was there,
    /// and stamps it with the current server time.
    /// The full registry is written back before this returns.
    pub async fn record(
        &self,
        vehicle_id: &str,
        report: VehicleReport,
    ) -> Result<VehicleEntry, self::Error> {
        let vehicle_id = vehicle_id.trim();
        if vehicle_id.is_empty() {
            return Err(Error::MissingVehicleId);
        }

        let _writer = self.writer.lock().await;
        let mut vehicles = self.load_for_write().await?;
        let entry = VehicleEntry {
            vehicle_id: vehicle_id.to_string(),
            route: report.route,
            location: report.location,
            timestamp: self.clock.now(),
        };
        vehicles.upsert(entry.clone());
        self.store.save(&vehicles).await?;
        debug!(
            vehicle_id = %entry.vehicle_id,
            route = %entry.route,
            location = %entry.location,
            "Recorded vehicle position"
        );
        Ok(entry)
    }

    /// Every vehicle on `route` whose report is younger than `window`,
    /// in first-seen order.
    pub async fn live_entries_for_route(&self, route: &str, window: Duration) -> Vec<VehicleEntry> {
        let now = self.clock.now();
        self.snapshot()
            .await
            .iter()
            .filter(|entry| entry.is_on_route(route) && entry.timestamp.is_fresh(now, window))
            .cloned()
            .collect()
    }

    /// Names of the routes with at least one live vehicle, each listed once.
    pub async fn active_routes(&self, window: Duration) -> Vec<String> {
        let now = self.clock.now();
        let mut routes: Vec<String> = Vec::new();
        self.snapshot()
            .await
            .iter()
            .filter(|entry| entry.timestamp.is_fresh(now, window))
            .for_each(|entry| {
                if !routes.contains(&entry.route) {
                    routes.push(entry.route.clone());
                }
            });
        routes
    }

    /// Drops entries that are at least `max_age` old.
    /// Returns how many were removed; nothing is written when none are.
    pub async fn compact(&self, max_age: Duration) -> Result<usize, self::Error> {
        let _writer = self.writer.lock().await;
        let now = self.clock.now();
        let mut vehicles = self.load_for_write().await?;
        let before = vehicles.len();
        vehicles.retain(|entry| entry.timestamp.is_fresh(now, max_age));
        let removed = before - vehicles.len();
        if removed > 0 {
            self.store.save(&vehicles).await?;
            info!("Compacted vehicle registry, removed {removed} stale entries");
        }
        Ok(removed)
    }
}
