use super::ScanEngine;
use crate::error::{Result, SweepError};
use crate::model::{ProjectDependency, ScanRequest};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

/// Runs dependency-check through its Maven plugin against the synthetic pom.
pub const DEFAULT_ENGINE_COMMAND: &[&str] = &[
    "mvn",
    "-q",
    "-f",
    "{pom}",
    "org.owasp:dependency-check-maven:check",
    "-Dformat=HTML",
    "-Dodc.outputDirectory={work_dir}",
];

/// File name dependency-check gives its HTML report.
pub const DEFAULT_GENERATED_REPORT: &str = "dependency-check-report.html";

/// Lines of stderr kept in an engine error.
const STDERR_TAIL_LINES: usize = 20;

/// Drives an external scanner process once per version.
///
/// The command is a program followed by arguments; each may contain the
/// placeholders `{group_id}`, `{artifact_id}`, `{version}`, `{project}`,
/// `{pom}`, `{work_dir}`, `{report}` and `{output_dir}`. No shell is involved.
pub struct CommandEngine {
    command: Vec<String>,
    generated_report: Option<String>,
}

impl CommandEngine {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            generated_report: None,
        }
    }

    /// Name of a report the command writes into `{work_dir}`; it is moved to
    /// the request's report path after a successful run.
    pub fn with_generated_report(mut self, file_name: impl Into<String>) -> Self {
        self.generated_report = Some(file_name.into());
        self
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    fn expand(&self, request: &ScanRequest, pom: &Path) -> Vec<String> {
        let dep = &request.dependency;
        let substitutions = [
            ("{group_id}", dep.group_id.clone()),
            ("{artifact_id}", dep.artifact_id.clone()),
            ("{version}", dep.version.clone()),
            ("{project}", request.project_name.clone()),
            ("{pom}", pom.display().to_string()),
            ("{work_dir}", request.work_dir.display().to_string()),
            ("{report}", request.report_path.display().to_string()),
            ("{output_dir}", request.output_dir.display().to_string()),
        ];

        self.command
            .iter()
            .map(|arg| {
                substitutions
                    .iter()
                    .fold(arg.clone(), |acc, (key, value)| acc.replace(key, value))
            })
            .collect()
    }

    fn engine_error(&self, request: &ScanRequest, message: impl Into<String>) -> SweepError {
        SweepError::Engine {
            engine: self.name().to_string(),
            version: request.version().to_string(),
            message: message.into(),
        }
    }

    /// Moves a generated report into place and checks the report exists.
    async fn collect_report(&self, request: &ScanRequest) -> Result<()> {
        if let Some(file_name) = &self.generated_report {
            let generated = request.work_dir.join(file_name);
            if generated.exists() {
                fs::rename(&generated, &request.report_path)
                    .await
                    .map_err(|e| SweepError::io(&request.report_path, e))?;
            }
        }

        if !request.report_path.exists() {
            return Err(self.engine_error(
                request,
                format!("engine produced no report at {}", request.report_path.display()),
            ));
        }

        Ok(())
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_COMMAND.iter().map(|s| s.to_string()).collect())
            .with_generated_report(DEFAULT_GENERATED_REPORT)
    }
}

#[async_trait]
impl ScanEngine for CommandEngine {
    fn name(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or("command")
    }

    async fn scan(&self, request: &ScanRequest) -> Result<()> {
        fs::create_dir_all(&request.work_dir)
            .await
            .map_err(|e| SweepError::io(&request.work_dir, e))?;

        let pom = request.work_dir.join("pom.xml");
        fs::write(&pom, render_pom(&request.project_name, &request.dependency))
            .await
            .map_err(|e| SweepError::io(&pom, e))?;

        let args = self.expand(request, &pom);
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| self.engine_error(request, "engine command is empty"))?;

        debug!(%program, args = ?rest, "running engine");

        let output = Command::new(program)
            .args(rest)
            .current_dir(&request.work_dir)
            .output()
            .await
            .map_err(|e| self.engine_error(request, format!("failed to execute {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(STDERR_TAIL_LINES).collect();
            let tail: Vec<&str> = tail.into_iter().rev().collect();
            return Err(self.engine_error(
                request,
                format!("exited with {}: {}", output.status, tail.join("\n")),
            ));
        }

        self.collect_report(request).await
    }
}

/// Renders a minimal project declaring exactly one dependency.
pub fn render_pom(project_name: &str, dependency: &ProjectDependency) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>versweep.scan</groupId>
  <artifactId>{project}</artifactId>
  <version>{version}</version>
  <packaging>pom</packaging>
  <dependencies>
    <dependency>
      <groupId>{group_id}</groupId>
      <artifactId>{artifact_id}</artifactId>
      <version>{version}</version>
      <scope>{scope}</scope>
      <type>{dependency_type}</type>
    </dependency>
  </dependencies>
</project>
"#,
        project = project_name,
        group_id = dependency.group_id,
        artifact_id = dependency.artifact_id,
        version = dependency.version,
        scope = dependency.scope,
        dependency_type = dependency.dependency_type,
    )
}
