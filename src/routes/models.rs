use serde::{Deserialize, Serialize};

use super::{Error, MIN_STOPS, validate_name};
use crate::shared::{geo::Coordinate, ordered};

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coordinate: Coordinate,
}

impl Stop {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

/// A named set of stops. Stop names are unique and keep the order they were
/// given in, which is also the tie-break order for nearest stop lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    name: String,
    stops: Vec<Stop>,
}

impl Route {
    /// Builds a route for storage.
    /// Later stops reusing an earlier name are dropped, and the route must
    /// end up with at least two stops.
    pub fn new(name: impl Into<String>, stops: Vec<Stop>) -> Result<Self, self::Error> {
        let name = name.into();
        validate_name(&name)?;
        let route = Self::from_record(name, RouteRecord::from(stops));
        if route.stops.len() < MIN_STOPS {
            return Err(Error::NotEnoughStops {
                found: route.stops.len(),
            });
        }
        Ok(route)
    }

    /// Rebuilds a stored route as is. Stop count is only checked on creation.
    pub fn from_record(name: impl Into<String>, record: RouteRecord) -> Self {
        let mut stops: Vec<Stop> = Vec::with_capacity(record.stops.len());
        for (stop_name, coordinate) in record.stops {
            if stops.iter().all(|stop| stop.name != stop_name) {
                stops.push(Stop::new(stop_name, coordinate));
            }
        }
        Self {
            name: name.into(),
            stops,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.name == name)
    }

    pub fn to_record(&self) -> RouteRecord {
        RouteRecord {
            stops: self
                .stops
                .iter()
                .map(|stop| (stop.name.clone(), stop.coordinate))
                .collect(),
        }
    }
}

/// On-disk shape of a route: `{"stops": {"<name>": [lat, lon], ...}}`.
/// The route name is the storage key and is not repeated inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(with = "ordered")]
    pub stops: Vec<(String, Coordinate)>,
}

impl From<Vec<Stop>> for RouteRecord {
    fn from(value: Vec<Stop>) -> Self {
        Self {
            stops: value
                .into_iter()
                .map(|stop| (stop.name, stop.coordinate))
                .collect(),
        }
    }
}
