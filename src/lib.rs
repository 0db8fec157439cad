pub mod config;
pub mod eta;
pub mod geocode;
pub mod registry;
pub mod routes;
pub mod shared;
pub mod status;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::eta::{EtaProvider, EtaResolver, OpenRouteService, Unavailable};
    pub use crate::geocode::{Geocoder, LocationIq, PlaceSuggestion};
    pub use crate::registry::{
        ActiveVehicleRegistry, FileVehicleStore, MemoryVehicleStore, VehicleEntry, VehicleReport,
        VehicleStore,
    };
    pub use crate::routes::{
        FileRouteStore, MemoryRouteStore, Route, RoutePlanner, RouteStore, Stop, find_nearest,
    };
    pub use crate::shared::{Clock, Coordinate, Minutes, SystemClock, Timestamp};
    pub use crate::status::{BestMatch, BusStatus, StatusService};
}
