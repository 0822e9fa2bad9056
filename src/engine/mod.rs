//! Boundary to the external vulnerability scanner.
//!
//! Matching, database updates and report rendering all happen inside the
//! engine. This crate only hands it a [`ScanRequest`] per version and expects
//! an HTML report at [`ScanRequest::report_path`] afterwards.
//!
//! # Example
//!
//! ```no_run
//! use versweep::engine::{CommandEngine, ScanEngine};
//!
//! let engine = CommandEngine::default();
//! println!("Using {}", engine.name());
//! ```

mod command;

pub use command::{render_pom, CommandEngine, DEFAULT_ENGINE_COMMAND, DEFAULT_GENERATED_REPORT};

use crate::error::Result;
use crate::model::ScanRequest;
use async_trait::async_trait;

#[async_trait]
pub trait ScanEngine: Send + Sync {
    /// Human-readable engine name used in logs and errors.
    fn name(&self) -> &str;

    /// Scans the single dependency in `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Engine`](crate::error::SweepError::Engine) when
    /// the scan cannot be executed or processed, including when it exits
    /// cleanly but leaves no report behind.
    async fn scan(&self, request: &ScanRequest) -> Result<()>;
}
