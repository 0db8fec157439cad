use buswatch::prelude::{BusStatus, Coordinate};
use serde::Serialize;

use crate::dto::StopDto;

/// Wire form of a status answer, tagged by `status`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum StatusDto {
    Active {
        bus_id: String,
        bus_location: Coordinate,
        route_name: String,
        nearest_stop: StopDto,
        eta: u32,
    },
    NoActiveVehicles {
        message: String,
    },
    RouteNotFound {
        message: String,
    },
    EtaUnavailable {
        message: String,
    },
    NoStops {
        message: String,
    },
}

impl StatusDto {
    pub fn from(status: BusStatus, route_name: &str) -> Self {
        match status {
            BusStatus::Active(best) => Self::Active {
                bus_id: best.vehicle_id,
                bus_location: best.vehicle_location,
                route_name: best.route_name,
                nearest_stop: StopDto::from(&best.nearest_stop),
                eta: best.eta.as_minutes(),
            },
            BusStatus::NoActiveVehicles => Self::NoActiveVehicles {
                message: format!("No active buses found for {route_name}."),
            },
            BusStatus::RouteNotFound => Self::RouteNotFound {
                message: format!("Route data for '{route_name}' not found."),
            },
            BusStatus::EtaUnavailable => Self::EtaUnavailable {
                message: format!("Could not calculate ETA for buses on {route_name}."),
            },
            BusStatus::NoStopsAvailable => Self::NoStops {
                message: format!("Route '{route_name}' has no stops."),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use buswatch::prelude::*;
    use serde_json::json;

    use super::StatusDto;

    #[test]
    fn active_status_json() {
        let status = BusStatus::Active(BestMatch {
            vehicle_id: "bus-7".into(),
            vehicle_location: Coordinate::new(1.0, 2.0),
            route_name: "R1".into(),
            nearest_stop: Stop::new("Depot", Coordinate::new(1.5, 2.5)),
            eta: Minutes::from(4),
        });
        let value = serde_json::to_value(StatusDto::from(status, "R1")).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "active",
                "busId": "bus-7",
                "busLocation": [1.0, 2.0],
                "routeName": "R1",
                "nearestStop": { "name": "Depot", "coords": [1.5, 2.5] },
                "eta": 4
            })
        );
    }

    #[test]
    fn outcomes_stay_distinguishable() {
        let tags: Vec<_> = [
            BusStatus::NoActiveVehicles,
            BusStatus::RouteNotFound,
            BusStatus::EtaUnavailable,
            BusStatus::NoStopsAvailable,
        ]
        .into_iter()
        .map(|status| serde_json::to_value(StatusDto::from(status, "R1")).unwrap()["status"].clone())
        .collect();
        assert_eq!(
            tags,
            [
                json!("no_active_vehicles"),
                json!("route_not_found"),
                json!("eta_unavailable"),
                json!("no_stops")
            ]
        );
    }
}
