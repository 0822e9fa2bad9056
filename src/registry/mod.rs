mod maven;

pub use maven::{metadata_url, parse_versions, MavenRegistry, DEFAULT_REGISTRY_URL};

use crate::error::Result;
use async_trait::async_trait;

/// Lists the published versions of an artifact.
#[async_trait]
pub trait VersionSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns versions in the order the registry lists them.
    async fn available_versions(&self, group_id: &str, artifact_id: &str) -> Result<Vec<String>>;
}
