mod pose;
mod quaternion;

pub use pose::*;
pub use quaternion::*;
