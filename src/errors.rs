use std::fmt;
use std::error::Error;

/// Represents errors that can occur while throwing, resolving or steering a die.
#[derive(Debug, Clone, PartialEq)]
pub enum DiceError {
    /// The face value is not present in the face atlas.
    UnknownFace(u32),
    /// The operation is not allowed in the current throw phase
    /// (e.g. triggering a throw while another one is still running).
    InvalidState(String),
    /// The face atlas could not be built from the given entries.
    InvalidAtlas(String),
    /// Indicates an invalid time step (zero, negative or not finite).
    InvalidTime,
    /// Indicates an invalid coefficient value; carries the name of the coefficient.
    InvalidCoefficient(&'static str),
    /// Indicates a step budget or frame count of zero.
    InvalidStepBudget,
}

impl fmt::Display for DiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiceError::UnknownFace(face) => write!(f, "Unknown face value: {}", face),
            DiceError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            DiceError::InvalidAtlas(msg) => write!(f, "Invalid face atlas: {}", msg),
            DiceError::InvalidTime => write!(f, "Invalid time step value"),
            DiceError::InvalidCoefficient(name) => write!(f, "Invalid coefficient value for {}", name),
            DiceError::InvalidStepBudget => write!(f, "Step budget and frame counts must be positive"),
        }
    }
}

impl Error for DiceError {}
