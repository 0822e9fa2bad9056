use crate::error::{Result, SweepError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_REGISTRY_URL: &str = "https://repo1.maven.org/maven2";

const VERSION_OPEN: &str = "<version>";
const VERSION_CLOSE: &str = "</version>";

/// Reads `maven-metadata.xml` from a Maven 2 layout repository.
pub struct MavenRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl MavenRegistry {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_REGISTRY_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Applies a request timeout. Without one the fetch may block indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SweepError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_metadata(&self, url: &str) -> Result<String> {
        let registry_err = |source| SweepError::Registry {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(registry_err)?;

        response.text().await.map_err(registry_err)
    }
}

impl Default for MavenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl super::VersionSource for MavenRegistry {
    fn name(&self) -> &'static str {
        "Maven Central"
    }

    async fn available_versions(&self, group_id: &str, artifact_id: &str) -> Result<Vec<String>> {
        let url = metadata_url(&self.base_url, group_id, artifact_id);
        debug!(%url, "fetching registry metadata");

        let body = self.fetch_metadata(&url).await?;
        let versions = parse_versions(&body);

        debug!(count = versions.len(), "parsed versions");
        Ok(versions)
    }
}

/// Builds the metadata URL for `group_id:artifact_id` under `base`.
pub fn metadata_url(base: &str, group_id: &str, artifact_id: &str) -> String {
    format!(
        "{}/{}/{}/maven-metadata.xml",
        base.trim_end_matches('/'),
        group_id.replace('.', "/"),
        artifact_id
    )
}

/// Extracts every `<version>...</version>` body in document order.
///
/// This is a flat substring scan, not an XML parse: nesting is ignored and
/// an unterminated trailing tag is dropped.
pub fn parse_versions(xml: &str) -> Vec<String> {
    let mut versions = Vec::new();
    let mut rest = xml;

    while let Some(start) = rest.find(VERSION_OPEN) {
        let after_open = &rest[start + VERSION_OPEN.len()..];
        match after_open.find(VERSION_CLOSE) {
            Some(end) => {
                versions.push(after_open[..end].to_string());
                rest = &after_open[end + VERSION_CLOSE.len()..];
            }
            None => break,
        }
    }

    versions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::VersionSource;

    #[test]
    fn test_parse_versions_document_order() {
        let xml = "<version>1.0</version><version>2.0</version>";
        assert_eq!(parse_versions(xml), vec!["1.0", "2.0"]);
    }

    #[test]
    fn test_parse_versions_real_metadata() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>org.example</groupId>
  <artifactId>demo</artifactId>
  <versioning>
    <latest>1.2</latest>
    <release>1.2</release>
    <versions>
      <version>1.0</version>
      <version>1.1-RC1</version>
      <version>1.2</version>
    </versions>
    <lastUpdated>20240101000000</lastUpdated>
  </versioning>
</metadata>"#;
        assert_eq!(parse_versions(xml), vec!["1.0", "1.1-RC1", "1.2"]);
    }

    #[test]
    fn test_parse_versions_keeps_duplicates_and_drops_unterminated() {
        let xml = "<version>1.0</version><version>1.0</version><version>2.0";
        assert_eq!(parse_versions(xml), vec!["1.0", "1.0"]);
    }

    #[test]
    fn test_parse_versions_empty() {
        assert!(parse_versions("<metadata/>").is_empty());
        assert!(parse_versions("").is_empty());
    }

    #[test]
    fn test_metadata_url() {
        assert_eq!(
            metadata_url(DEFAULT_REGISTRY_URL, "org.apache.commons", "commons-text"),
            "https://repo1.maven.org/maven2/org/apache/commons/commons-text/maven-metadata.xml"
        );
        assert_eq!(
            metadata_url("http://localhost:8080/", "g", "a"),
            "http://localhost:8080/g/a/maven-metadata.xml"
        );
    }

    #[test]
    fn test_maven_registry_default() {
        let registry = MavenRegistry::default();
        assert_eq!(registry.name(), "Maven Central");
        assert_eq!(registry.base_url(), DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn test_with_timeout_builds_client() {
        let registry = MavenRegistry::with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(registry.base_url(), "http://localhost:8080");
    }
}
