mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::routing::{get, post};
use buswatch::prelude::Config;
use std::{sync::Arc, time::Duration};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let config = Config::from_env();
    if config.ors_api_key.is_empty() {
        warn!("ORS_API_KEY is not set, ETA lookups will fail");
    }
    if config.locationiq_api_key.is_empty() {
        warn!("LOCATIONIQ_API_KEY is not set, geocoding will fail");
    }
    info!(
        "Registry at {}, routes in {}, freshness window {:?}",
        config.registry_path.display(),
        config.routes_dir.display(),
        config.freshness_window
    );

    let port = config.port;
    let compact_after = config.compact_after;
    let state = Arc::new(AppState::new(config));
    if let Some(max_age) = compact_after {
        spawn_compaction(state.clone(), max_age);
    }

    let app = axum::Router::new()
        .route("/api/update_location", post(api::update_location))
        .route("/api/bus_status", get(api::bus_status))
        .route("/api/create_route", post(api::create_route))
        .route("/api/get_route_data", get(api::route_data))
        .route("/api/active_routes", get(api::active_routes))
        .route("/api/autocomplete", get(api::autocomplete))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
        std::process::exit(1);
    }
}

fn spawn_compaction(state: Arc<AppState>, max_age: Duration) {
    info!("Compacting vehicles older than {max_age:?}");
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(max_age);
        loop {
            interval.tick().await;
            if let Err(err) = state.registry.compact(max_age).await {
                error!("Failed to compact vehicle registry: {err}");
            }
        }
    });
}
