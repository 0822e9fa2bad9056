use crate::error::SweepError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Scope given to the synthetic dependency.
pub const DEPENDENCY_SCOPE: &str = "compile";

/// Packaging type given to the synthetic dependency.
pub const DEPENDENCY_TYPE: &str = "jar";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ArtifactCoordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// `group.id/path` form used by Maven repository layouts.
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }
}

impl std::fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, v),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) || parts.iter().any(|p| p.is_empty()) {
            return Err(SweepError::InvalidCoordinate(s.to_string()));
        }

        let coord = ArtifactCoordinate::new(parts[0], parts[1]);
        Ok(match parts.get(2) {
            Some(version) => coord.with_version(*version),
            None => coord,
        })
    }
}

/// The single dependency a per-version scan project declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub scope: &'static str,
    #[serde(rename = "type")]
    pub dependency_type: &'static str,
}

impl ProjectDependency {
    pub fn compile_jar(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            scope: DEPENDENCY_SCOPE,
            dependency_type: DEPENDENCY_TYPE,
        }
    }

    pub fn coordinate(&self) -> ArtifactCoordinate {
        ArtifactCoordinate::new(&self.group_id, &self.artifact_id).with_version(&self.version)
    }
}

/// A fully populated descriptor for one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub project_name: String,
    pub dependency: ProjectDependency,
    /// Where the engine must write its HTML report.
    pub report_path: PathBuf,
    /// Scratch directory for this version only.
    pub work_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ScanRequest {
    pub fn version(&self) -> &str {
        &self.dependency.version
    }
}
