//! Sequential scan loop over discovered versions.

use crate::engine::ScanEngine;
use crate::error::{Result, SweepError};
use crate::model::{ArtifactCoordinate, ProjectDependency, ScanRequest, VersionScan};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

/// Where and how per-version reports are laid out.
#[derive(Debug, Clone)]
pub struct SweepSettings {
    pub output_dir: PathBuf,
    pub report_prefix: String,
    pub show_progress: bool,
}

impl SweepSettings {
    pub fn new(output_dir: impl Into<PathBuf>, report_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            report_prefix: report_prefix.into(),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// `<output_dir>/<prefix><version>.html`, with the version made safe as a
/// single path component.
pub fn report_path(output_dir: &Path, prefix: &str, version: &str) -> PathBuf {
    output_dir.join(format!("{}{}.html", prefix, file_component(version)))
}

/// Builds the engine request for one fully-versioned coordinate.
///
/// # Errors
///
/// Returns [`SweepError::InvalidCoordinate`] when `coordinate` has no version.
pub fn build_request(
    coordinate: &ArtifactCoordinate,
    output_dir: &Path,
    prefix: &str,
) -> Result<ScanRequest> {
    let version = coordinate
        .version
        .as_deref()
        .ok_or_else(|| SweepError::InvalidCoordinate(coordinate.to_string()))?;

    let dependency =
        ProjectDependency::compile_jar(&coordinate.group_id, &coordinate.artifact_id, version);
    Ok(ScanRequest {
        project_name: format!("{}-{}", coordinate.artifact_id, version),
        dependency,
        report_path: report_path(output_dir, prefix, version),
        work_dir: output_dir.join("work").join(file_component(version)),
        output_dir: output_dir.to_path_buf(),
    })
}

/// Replaces anything outside `[A-Za-z0-9._-]` so a version cannot escape
/// its directory.
pub fn file_component(version: &str) -> String {
    version
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Scans one version. Kept free of loop state so iterations stay independent.
pub async fn scan_version(
    engine: &dyn ScanEngine,
    coordinate: &ArtifactCoordinate,
    settings: &SweepSettings,
) -> VersionScan {
    let version = coordinate.version.clone().unwrap_or_else(|| coordinate.to_string());

    let result = match build_request(coordinate, &settings.output_dir, &settings.report_prefix) {
        Ok(request) => engine.scan(&request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            info!(%coordinate, "scan completed");
            VersionScan::completed(version)
        }
        Err(e) => {
            error!(%coordinate, error = %e, "scan failed for version {}", version);
            VersionScan::failed(version, e.to_string())
        }
    }
}

/// Runs the engine once per version, in order. A failing version is logged
/// and recorded; the remaining versions still run.
pub async fn scan_versions(
    engine: &dyn ScanEngine,
    group_id: &str,
    artifact_id: &str,
    versions: &[String],
    settings: &SweepSettings,
) -> Vec<VersionScan> {
    let progress = if settings.show_progress {
        let pb = ProgressBar::new(versions.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut scans = Vec::with_capacity(versions.len());

    for version in versions {
        if let Some(ref pb) = progress {
            pb.set_message(format!("Scanning {}...", version));
        }

        let coordinate = ArtifactCoordinate::new(group_id, artifact_id).with_version(version);
        scans.push(scan_version(engine, &coordinate, settings).await);

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        let failed = scans.iter().filter(|s| s.is_failed()).count();
        pb.finish_with_message(format!(
            "Scanned {} versions ({} failed)",
            scans.len(),
            failed
        ));
    }

    scans
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingEngine {
        seen: Mutex<Vec<ScanRequest>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl ScanEngine for RecordingEngine {
        fn name(&self) -> &str {
            "recording"
        }

        async fn scan(&self, request: &ScanRequest) -> Result<()> {
            self.seen.lock().unwrap().push(request.clone());
            if Some(request.version()) == self.fail_on {
                return Err(SweepError::Engine {
                    engine: "recording".to_string(),
                    version: request.version().to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_build_request() {
        let coord = ArtifactCoordinate::new("g.h", "lib").with_version("1.0");
        let req = build_request(&coord, Path::new("/out"), "dependency-analyze-").unwrap();
        assert_eq!(req.dependency.group_id, "g.h");
        assert_eq!(req.dependency.version, "1.0");
        assert_eq!(req.dependency.scope, "compile");
        assert_eq!(req.dependency.dependency_type, "jar");
        assert_eq!(req.project_name, "lib-1.0");
        assert_eq!(
            req.report_path,
            PathBuf::from("/out/dependency-analyze-1.0.html")
        );
        assert_eq!(req.work_dir, PathBuf::from("/out/work/1.0"));
    }

    #[test]
    fn test_build_request_requires_version() {
        let coord = ArtifactCoordinate::new("g", "a");
        let err = build_request(&coord, Path::new("/out"), "p-").unwrap_err();
        assert!(matches!(err, SweepError::InvalidCoordinate(_)));
    }

    #[test]
    fn test_file_component() {
        assert_eq!(file_component("1.0-SNAPSHOT"), "1.0-SNAPSHOT");
        assert_eq!(file_component("../evil"), ".._evil");
    }

    #[test]
    fn test_slash_in_version_stays_in_output_dir() {
        let coord = ArtifactCoordinate::new("g", "a").with_version("1.0/beta");
        let req = build_request(&coord, Path::new("/out"), "p-").unwrap();

        assert_eq!(req.report_path, PathBuf::from("/out/p-1.0_beta.html"));
        assert_eq!(req.report_path.parent(), Some(Path::new("/out")));
        assert_eq!(req.work_dir, PathBuf::from("/out/work/1.0_beta"));
        assert_eq!(req.version(), "1.0/beta");
    }

    #[tokio::test]
    async fn test_scan_version_without_version_is_failed() {
        let engine = RecordingEngine {
            seen: Mutex::new(Vec::new()),
            fail_on: None,
        };
        let settings = SweepSettings::new("/tmp/versweep-test", "p-");

        let scan = scan_version(&engine, &ArtifactCoordinate::new("g", "a"), &settings).await;

        assert!(scan.is_failed());
        assert!(engine.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_versions_continues_after_failure() {
        let engine = RecordingEngine {
            seen: Mutex::new(Vec::new()),
            fail_on: Some("2.0"),
        };
        let versions: Vec<String> = ["1.0", "2.0", "3.0"].iter().map(|s| s.to_string()).collect();
        let settings = SweepSettings::new("/tmp/versweep-test", "p-");

        let scans = scan_versions(&engine, "g", "a", &versions, &settings).await;

        assert_eq!(scans.len(), 3);
        assert!(!scans[0].is_failed());
        assert!(scans[1].is_failed());
        assert!(!scans[2].is_failed());

        let seen = engine.seen.lock().unwrap();
        let order: Vec<&str> = seen.iter().map(|r| r.version()).collect();
        assert_eq!(order, vec!["1.0", "2.0", "3.0"]);
        assert!(seen.iter().all(|r| r.dependency.artifact_id == "a"));
    }
}
