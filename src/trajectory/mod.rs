mod playback;
mod trajectory;

pub use playback::*;
pub use trajectory::*;
