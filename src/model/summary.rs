use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{ArtifactCoordinate, SeverityTally};

/// Outcome of the engine call for a single version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScanOutcome {
    Completed,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionScan {
    pub version: String,
    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

impl VersionScan {
    pub fn completed(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            outcome: ScanOutcome::Completed,
        }
    }

    pub fn failed(version: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            outcome: ScanOutcome::Failed {
                message: message.into(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    pub artifact: ArtifactCoordinate,
    pub versions: Vec<String>,
    pub scans: Vec<VersionScan>,
    pub tallies: Vec<SeverityTally>,
    pub csv_path: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SweepSummary {
    pub fn failed_scans(&self) -> impl Iterator<Item = &VersionScan> {
        self.scans.iter().filter(|s| s.is_failed())
    }

    /// Versions that were discovered but have no CSV row.
    pub fn missing_reports(&self) -> Vec<&str> {
        self.versions
            .iter()
            .filter(|v| !self.tallies.iter().any(|t| &t.version == *v))
            .map(String::as_str)
            .collect()
    }
}
