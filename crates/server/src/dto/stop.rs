use buswatch::prelude::{Coordinate, Stop};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub name: String,
    pub coords: Coordinate,
}

impl StopDto {
    pub fn from(stop: &Stop) -> Self {
        Self {
            name: stop.name.clone(),
            coords: stop.coordinate,
        }
    }
}
