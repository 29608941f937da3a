use crate::shared::Result;

/// MetadataReader port for reading per-artifact license metadata records
///
/// This port abstracts where `.meta_lic` records come from (file system,
/// in-memory fixtures). Parsing stays in the loader; the reader only hands
/// back the raw record text.
pub trait MetadataReader {
    /// Reads the raw metadata record stored at `path`
    ///
    /// # Arguments
    /// * `path` - Metadata file path, as named by a root or a dependency edge
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist
    /// - The file cannot be read due to permissions or I/O errors
    fn read_metadata(&self, path: &str) -> Result<String>;
}

impl<T: MetadataReader + ?Sized> MetadataReader for &T {
    fn read_metadata(&self, path: &str) -> Result<String> {
        (**self).read_metadata(path)
    }
}
