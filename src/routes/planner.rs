use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, warn};

use super::{Error, Route, RouteStore, Stop, validate_name};
use crate::geocode::Geocoder;

/// Turns a list of place names into a stored route.
pub struct RoutePlanner {
    geocoder: Arc<dyn Geocoder>,
    store: Arc<dyn RouteStore>,
}

impl RoutePlanner {
    pub fn new(geocoder: Arc<dyn Geocoder>, store: Arc<dyn RouteStore>) -> Self {
        Self { geocoder, store }
    }

    /// Geocodes every stop name and saves the route.
    /// Names that cannot be resolved are skipped. If fewer than two stops
    /// remain the route is rejected and nothing is written.
    pub async fn create(&self, name: &str, stop_names: &[String]) -> Result<Route, Error> {
        let name = name.trim();
        validate_name(name)?;

        let lookups = stop_names.iter().map(|stop_name| async move {
            match self.geocoder.geocode(stop_name).await {
                Ok(coordinate) => Some(Stop::new(stop_name.as_str(), coordinate)),
                Err(err) => {
                    warn!(route = %name, stop = %stop_name, "Could not geocode stop: {err}");
                    None
                }
            }
        });
        let stops: Vec<Stop> = join_all(lookups).await.into_iter().flatten().collect();

        let route = Route::new(name, stops)?;
        self.store.put(&route).await?;
        info!(
            route = %route.name(),
            "Saved route with {} stops",
            route.stops().len()
        );
        Ok(route)
    }
}
