mod location;
mod places;
mod routes;
mod status;

pub use location::*;
pub use places::*;
pub use routes::*;
pub use status::*;
