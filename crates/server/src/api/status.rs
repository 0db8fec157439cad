use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buswatch::prelude::Coordinate;
use tracing::error;

use crate::{
    dto::{ErrorDto, StatusDto},
    state::AppState,
};

pub async fn bus_status(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, (StatusCode, Json<ErrorDto>)> {
    let (Some(latitude), Some(longitude), Some(route_name)) = (
        coordinate_param(&params, "lat"),
        coordinate_param(&params, "lon"),
        params.get("routeName").filter(|name| !name.is_empty()),
    ) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorDto::new("User location and route name are required.")),
        ));
    };

    let rider = Coordinate {
        latitude,
        longitude,
    };
    let status = state.status.query(rider, route_name).await.map_err(|err| {
        error!("Status query for {route_name} failed: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Route data could not be read.")),
        )
    })?;
    Ok(Json(StatusDto::from(status, route_name)).into_response())
}

fn coordinate_param(params: &HashMap<String, String>, key: &str) -> Option<f64> {
    params
        .get(key)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
