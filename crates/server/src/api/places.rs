use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
};
use buswatch::prelude::{Geocoder, PlaceSuggestion};
use tracing::warn;

use crate::state::AppState;

const SUGGESTION_COUNT: usize = 5;

pub async fn autocomplete(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<PlaceSuggestion>> {
    let query = params.get("q").map(String::as_str).unwrap_or_default();
    Json(suggestions(state.geocoder.as_ref(), query).await)
}

/// Upstream failures answer as "no suggestions".
async fn suggestions(geocoder: &dyn Geocoder, query: &str) -> Vec<PlaceSuggestion> {
    match geocoder.autocomplete(query, SUGGESTION_COUNT).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            warn!("Autocomplete for {query:?} failed: {err}");
            Vec::new()
        }
    }
}
