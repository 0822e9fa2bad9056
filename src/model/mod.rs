//! Core data types for coordinates, scan requests, and severity tallies.
//!
//! - [`ArtifactCoordinate`] - A `group:artifact:version` triple
//! - [`ProjectDependency`] - The synthetic dependency handed to the engine
//! - [`ScanRequest`] - Everything the engine needs to scan one version
//! - [`Severity`] / [`SeverityTally`] - Per-version severity counts
//! - [`SweepSummary`] - Complete results of one run
//!
//! # Example
//!
//! ```
//! use versweep::ArtifactCoordinate;
//!
//! let coord: ArtifactCoordinate = "org.example:demo:1.0".parse().unwrap();
//! assert_eq!(coord.version.as_deref(), Some("1.0"));
//! ```

mod coordinate;
mod summary;
mod tally;

pub use coordinate::*;
pub use summary::*;
pub use tally::*;
