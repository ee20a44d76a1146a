mod dice_roller;

pub use dice_roller::*;
