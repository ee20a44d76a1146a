mod collision_response;
mod environment;

pub use collision_response::*;
pub use environment::*;
