use crate::shared::Result;

/// LicenseTextReader port for reading license text files named by metadata
pub trait LicenseTextReader {
    /// Reads the license text at `path` (without any `:libname` suffix)
    ///
    /// # Errors
    /// Returns an error if the text file cannot be read.
    fn read_license_text(&self, path: &str) -> Result<String>;
}
