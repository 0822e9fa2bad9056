pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod report;

pub use config::Config;
pub use error::{Result, SweepError};
pub use model::{ArtifactCoordinate, Severity, SeverityTally, SweepSummary};
pub use pipeline::run_sweep;
