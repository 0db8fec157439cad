mod ack;
mod status;
mod stop;

pub use ack::*;
pub use status::*;
pub use stop::*;
