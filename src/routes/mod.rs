mod models;
mod nearest;
mod planner;
mod store;

pub use models::*;
pub use nearest::*;
pub use planner::*;
pub use store::*;

use std::io;

use thiserror::Error;

use crate::shared::geo::Coordinate;

/// Fewest stops a route may be created with.
pub const MIN_STOPS: usize = 2;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid route name: {0:?}")]
    InvalidName(String),
    #[error("Need at least {MIN_STOPS} valid stops, found {found}")]
    NotEnoughStops { found: usize },
    #[error("Route has no stops")]
    NoStopsAvailable,
    #[error("Not a usable location: {0}")]
    InvalidLocation(Coordinate),
}

/// Route names double as storage keys, so they must be non-empty and must
/// not be able to point outside the route directory.
pub fn validate_name(name: &str) -> Result<(), self::Error> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.contains("..")
    {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}
