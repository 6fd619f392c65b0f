//! openFDA model types.

mod clearance;

pub use clearance::*;
