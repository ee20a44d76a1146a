mod outcome_corrector;
mod presentation;

pub use outcome_corrector::*;
pub use presentation::*;

#[cfg(test)]
mod outcome_corrector_tests;
