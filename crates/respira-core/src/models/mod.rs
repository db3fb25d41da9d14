//! Domain models for the respiratory diagnosis engine.

mod diagnosis;
mod profile;

pub use diagnosis::*;
pub use profile::*;
