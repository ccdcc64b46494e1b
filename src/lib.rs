pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod snapshot;
pub mod topology;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use config::PlanConfig;
pub use error::{FloorplanError, Result};
pub use snapshot::PlanSnapshot;
pub use topology::FloorPlan;
