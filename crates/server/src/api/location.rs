use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use buswatch::{
    prelude::{Coordinate, VehicleReport},
    registry,
};
use serde::Deserialize;
use tracing::{error, warn};

use crate::{dto::AckDto, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocation {
    #[serde(default)]
    pub bus_id: Option<String>,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
}

fn rejected(message: &str) -> (StatusCode, Json<AckDto>) {
    (StatusCode::BAD_REQUEST, Json(AckDto::failed(message)))
}

pub async fn update_location(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateLocation>, JsonRejection>,
) -> (StatusCode, Json<AckDto>) {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Unreadable location update: {rejection}");
            return rejected("Location update is not valid JSON.");
        }
    };
    let bus_id = body.bus_id.unwrap_or_default();
    if bus_id.trim().is_empty() {
        return rejected("Bus ID is required.");
    }
    let Some(location) = body.location else {
        return rejected("Location is required.");
    };

    let report = VehicleReport::new(body.route, location);
    match state.registry.record(&bus_id, report).await {
        Ok(_) => (StatusCode::OK, Json(AckDto::ok())),
        Err(registry::Error::MissingVehicleId) => rejected("Bus ID is required."),
        Err(err) => {
            error!("Failed to record location for {bus_id}: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AckDto::failed("Could not store location.")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{Json, extract::State, http::StatusCode};
    use buswatch::prelude::{Config, Coordinate};

    use super::{UpdateLocation, update_location};
    use crate::state::AppState;

    fn state(name: &str) -> Arc<AppState> {
        let dir = std::env::temp_dir().join(format!(
            "buswatch-server-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let config = Config {
            registry_path: dir.join("active_buses.json"),
            routes_dir: dir.join("routes"),
            ..Default::default()
        };
        Arc::new(AppState::new(config))
    }

    #[tokio::test]
    async fn empty_body_asks_for_bus_id() {
        let body: UpdateLocation = serde_json::from_str("{}").unwrap();
        let (status, Json(ack)) = update_location(State(state("empty")), Ok(Json(body))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!ack.success);
        assert_eq!(ack.message.as_deref(), Some("Bus ID is required."));
    }

    #[tokio::test]
    async fn missing_location_is_a_structured_failure() {
        let body = UpdateLocation {
            bus_id: Some("bus-1".into()),
            ..Default::default()
        };
        let (status, Json(ack)) = update_location(State(state("no-location")), Ok(Json(body))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!ack.success);
        assert_eq!(ack.message.as_deref(), Some("Location is required."));
    }

    #[tokio::test]
    async fn complete_report_is_recorded() {
        let state = state("complete");
        let body = UpdateLocation {
            bus_id: Some("bus-1".into()),
            route: "R1".into(),
            location: Some(Coordinate::new(12.9, 77.6)),
        };
        let (status, Json(ack)) = update_location(State(state.clone()), Ok(Json(body))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(ack.success);
        assert_eq!(
            state.registry.active_routes(Duration::from_secs(120)).await,
            ["R1"]
        );
    }
}
