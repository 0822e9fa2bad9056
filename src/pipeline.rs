//! The end-to-end batch: discover, scan each version, aggregate, write.
//!
//! # Example
//!
//! ```no_run
//! use versweep::driver::SweepSettings;
//! use versweep::engine::CommandEngine;
//! use versweep::pipeline::run_sweep;
//! use versweep::registry::MavenRegistry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = SweepSettings::new("target/versweep", "dependency-analyze-");
//!     let summary = run_sweep(
//!         &MavenRegistry::new(),
//!         &CommandEngine::default(),
//!         "org.apache.commons",
//!         "commons-text",
//!         &settings,
//!     )
//!     .await?;
//!     println!("Wrote {}", summary.csv_path.display());
//!     Ok(())
//! }
//! ```

use crate::driver::{scan_versions, SweepSettings};
use crate::engine::ScanEngine;
use crate::error::{Result, SweepError};
use crate::model::{ArtifactCoordinate, SweepSummary};
use crate::registry::VersionSource;
use crate::report::{collect_tallies, write_csv};
use chrono::Utc;
use tracing::{info, warn};

/// Runs one full sweep.
///
/// # Errors
///
/// Fails only when versions cannot be listed or the output directory and CSV
/// cannot be written. Per-version scan and report failures are logged and
/// reflected in the returned summary.
pub async fn run_sweep(
    source: &dyn VersionSource,
    engine: &dyn ScanEngine,
    group_id: &str,
    artifact_id: &str,
    settings: &SweepSettings,
) -> Result<SweepSummary> {
    let started_at = Utc::now();
    let artifact = ArtifactCoordinate::new(group_id, artifact_id);

    let versions = source.available_versions(group_id, artifact_id).await?;
    info!(
        %artifact,
        registry = source.name(),
        count = versions.len(),
        "discovered versions"
    );

    std::fs::create_dir_all(&settings.output_dir)
        .map_err(|e| SweepError::io(&settings.output_dir, e))?;

    let scans = scan_versions(engine, group_id, artifact_id, &versions, settings).await;

    let failed = scans.iter().filter(|s| s.is_failed()).count();
    if failed > 0 {
        warn!(failed, total = scans.len(), "some versions failed to scan");
    }

    let tallies = collect_tallies(&versions, &settings.output_dir, &settings.report_prefix);
    let csv_path = write_csv(&settings.output_dir, &settings.report_prefix, &tallies)?;
    info!(path = %csv_path.display(), rows = tallies.len(), "wrote summary");

    Ok(SweepSummary {
        artifact,
        versions,
        scans,
        tallies,
        csv_path,
        started_at,
        finished_at: Utc::now(),
    })
}
