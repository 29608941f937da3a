use crate::compliance::domain::ProjectMetadata;
use crate::shared::Result;

/// ProjectMetadataReader port for reading one project directory's record
///
/// Reads are blocking; callers that need concurrency (see
/// [`ProjectMetadataRepository`](super::ProjectMetadataRepository)) run them
/// on a blocking pool, hence the `Send + Sync` bound.
pub trait ProjectMetadataReader: Send + Sync {
    /// Reads and parses the metadata record of `project`
    ///
    /// # Returns
    /// `Ok(None)` when the directory has no metadata file at all.
    ///
    /// # Errors
    /// Returns an error naming the project and file if a record exists but
    /// cannot be read or fails to parse.
    fn read_project_metadata(&self, project: &str) -> Result<Option<ProjectMetadata>>;
}
