use serde::{Deserialize, Serialize};

use crate::shared::{geo::Coordinate, ordered, time::Timestamp};

/// What a driver client reports about a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleReport {
    pub route: String,
    pub location: Coordinate,
}

impl VehicleReport {
    pub fn new(route: impl Into<String>, location: Coordinate) -> Self {
        Self {
            route: route.into(),
            location,
        }
    }
}

/// A stored report stamped with the server time it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEntry {
    #[serde(rename = "busId")]
    pub vehicle_id: String,
    #[serde(default)]
    pub route: String,
    pub location: Coordinate,
    #[serde(default)]
    pub timestamp: Timestamp,
}

impl VehicleEntry {
    pub fn is_on_route(&self, route: &str) -> bool {
        self.route == route
    }
}

/// Every vehicle ever seen, keyed by id, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vehicles {
    #[serde(with = "ordered")]
    entries: Vec<(String, VehicleEntry)>,
}

impl Vehicles {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the entry with the same id in place, or appends a new one.
    pub fn upsert(&mut self, entry: VehicleEntry) {
        match self
            .entries
            .iter_mut()
            .find(|(id, _)| *id == entry.vehicle_id)
        {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((entry.vehicle_id.clone(), entry)),
        }
    }

    pub fn get(&self, vehicle_id: &str) -> Option<&VehicleEntry> {
        self.entries
            .iter()
            .find(|(id, _)| id == vehicle_id)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&VehicleEntry) -> bool,
    {
        self.entries.retain(|(_, entry)| f(entry));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
