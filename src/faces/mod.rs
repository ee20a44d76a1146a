mod face_atlas;
mod orientation;

pub use face_atlas::*;
pub use orientation::*;
