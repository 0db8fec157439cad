use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buswatch::routes;
use serde::Deserialize;
use tracing::error;

use crate::{
    dto::{AckDto, ErrorDto},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoute {
    #[serde(default)]
    pub route_name: String,
    #[serde(default)]
    pub stops: Vec<String>,
}

pub async fn create_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateRoute>,
) -> (StatusCode, Json<AckDto>) {
    match state.planner.create(&body.route_name, &body.stops).await {
        Ok(route) => (
            StatusCode::OK,
            Json(AckDto::ok_with(format!("Route '{}' saved!", route.name()))),
        ),
        Err(routes::Error::NotEnoughStops { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(AckDto::failed("Need at least 2 valid stops.")),
        ),
        Err(routes::Error::InvalidName(_)) => (
            StatusCode::BAD_REQUEST,
            Json(AckDto::failed("A valid route name is required.")),
        ),
        Err(err) => {
            error!("Failed to create route {}: {err}", body.route_name);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AckDto::failed("Could not save route.")),
            )
        }
    }
}

pub async fn route_data(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, (StatusCode, Json<ErrorDto>)> {
    let Some(route_name) = params.get("routeName").filter(|name| !name.is_empty()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorDto::new("Route name is required.")),
        ));
    };
    match state.routes.get(route_name).await {
        Ok(Some(route)) => Ok(Json(route.to_record()).into_response()),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorDto::new("Route data not found.")),
        )),
        Err(err) => {
            error!("Failed to read route {route_name}: {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto::new("Route data could not be read.")),
            ))
        }
    }
}

pub async fn active_routes(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .registry
            .active_routes(state.config.freshness_window)
            .await,
    )
}
