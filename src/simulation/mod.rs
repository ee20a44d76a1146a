mod settle_detector;
mod throw_integrator;
mod throw_state;

pub use settle_detector::*;
pub use throw_integrator::*;
pub use throw_state::*;

#[cfg(test)]
mod throw_integrator_tests;
