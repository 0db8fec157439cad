pub mod geo;
pub mod ordered;
pub mod time;

pub use geo::*;
pub use time::*;
