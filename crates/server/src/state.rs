use std::sync::Arc;

use buswatch::prelude::*;

pub struct AppState {
    pub config: Config,
    pub registry: Arc<ActiveVehicleRegistry>,
    pub routes: Arc<dyn RouteStore>,
    pub geocoder: Arc<dyn Geocoder>,
    pub planner: RoutePlanner,
    pub status: StatusService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(ActiveVehicleRegistry::new(Arc::new(FileVehicleStore::new(
            &config.registry_path,
        ))));
        let routes: Arc<dyn RouteStore> = Arc::new(FileRouteStore::new(&config.routes_dir));
        let geocoder: Arc<dyn Geocoder> = Arc::new(LocationIq::new(
            &config.locationiq_api_key,
            &config.locationiq_search_url,
            &config.locationiq_autocomplete_url,
        ));
        let eta = EtaResolver::new(Arc::new(OpenRouteService::new(
            &config.ors_api_key,
            &config.ors_directions_url,
        )))
        .with_timeout(config.eta_timeout);

        let planner = RoutePlanner::new(geocoder.clone(), routes.clone());
        let status = StatusService::new(registry.clone(), routes.clone(), eta)
            .with_freshness(config.freshness_window);
        Self {
            config,
            registry,
            routes,
            geocoder,
            planner,
            status,
        }
    }
}
