use crate::compliance::domain::ProjectMetadata;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// ProjectMetadataRepository port for batch lookups of project metadata
///
/// # Async Support
/// Lookups for distinct projects are independent and may run concurrently.
/// Implementations must be `Send + Sync` to support concurrent access.
#[async_trait]
pub trait ProjectMetadataRepository: Send + Sync {
    /// Fetches the metadata records of every project in `projects`
    ///
    /// # Returns
    /// A map from project directory to its record. Projects without a
    /// metadata file are absent from the map.
    ///
    /// # Errors
    /// Returns one error listing every project whose record could not be
    /// read or parsed.
    async fn get(&self, projects: &[String]) -> Result<BTreeMap<String, ProjectMetadata>>;
}
