use crate::compliance::domain::ProjectMetadata;
use crate::ports::outbound::{LicenseTextReader, MetadataReader, ProjectMetadataReader};
use crate::shared::error::ComplianceError;
use crate::shared::security::read_text_file;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Project metadata file names, highest precedence first
const PROJECT_METADATA_FILES: [&str; 2] = ["METADATA.android", "METADATA"];

/// FileSystemReader adapter for reading files from the file system
///
/// Implements the metadata, license text and project metadata reader
/// ports. Relative paths resolve against `root` (the current directory
/// unless set with [`FileSystemReader::with_root`]).
#[derive(Debug, Clone, Default)]
pub struct FileSystemReader {
    root: Option<PathBuf>,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }

    fn read_existing(&self, path: &Path, description: &str) -> Result<String> {
        if !path.exists() {
            return Err(ComplianceError::FileReadError {
                path: path.to_path_buf(),
                details: format!("{} does not exist", description),
            }
            .into());
        }
        read_text_file(path, description).map_err(|e| {
            ComplianceError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl MetadataReader for FileSystemReader {
    fn read_metadata(&self, path: &str) -> Result<String> {
        self.read_existing(&self.resolve(path), "license metadata")
    }
}

impl LicenseTextReader for FileSystemReader {
    fn read_license_text(&self, path: &str) -> Result<String> {
        self.read_existing(&self.resolve(path), "license text")
    }
}

impl ProjectMetadataReader for FileSystemReader {
    fn read_project_metadata(&self, project: &str) -> Result<Option<ProjectMetadata>> {
        let dir = self.resolve(project);
        let Some(file) = PROJECT_METADATA_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        else {
            return Ok(None);
        };

        let content = read_text_file(&file, "project metadata")?;
        let metadata: ProjectMetadata = serde_yaml_ng::from_str(&content).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse project metadata for {}: {}: {}",
                project,
                file.display(),
                e
            )
        })?;
        Ok(Some(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_metadata_success() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("bin.meta_lic"),
            "license_conditions = [\"notice\"]",
        )
        .unwrap();

        let reader = FileSystemReader::with_root(temp_dir.path());
        let content = reader.read_metadata("bin.meta_lic").unwrap();

        assert_eq!(content, "license_conditions = [\"notice\"]");
    }

    #[test]
    fn test_read_metadata_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::with_root(temp_dir.path());
        let result = reader.read_metadata("missing.meta_lic");

        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("missing.meta_lic"));
        assert!(err_string.contains("license metadata does not exist"));
    }

    #[test]
    fn test_read_license_text() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("licenses")).unwrap();
        fs::write(temp_dir.path().join("licenses/MIT"), "MIT License").unwrap();

        let reader = FileSystemReader::with_root(temp_dir.path());
        assert_eq!(reader.read_license_text("licenses/MIT").unwrap(), "MIT License");
    }

    #[test]
    fn test_project_metadata_android_takes_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("external/foo");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("METADATA"), "name: generic").unwrap();
        fs::write(project.join("METADATA.android"), "name: override").unwrap();

        let reader = FileSystemReader::with_root(temp_dir.path());
        let metadata = reader.read_project_metadata("external/foo").unwrap().unwrap();

        assert_eq!(metadata.name(), Some("override"));
    }

    #[test]
    fn test_project_metadata_falls_back_to_generic() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("external/foo");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("METADATA"), "name: generic").unwrap();

        let reader = FileSystemReader::with_root(temp_dir.path());
        let metadata = reader.read_project_metadata("external/foo").unwrap().unwrap();

        assert_eq!(metadata.name(), Some("generic"));
    }

    #[test]
    fn test_project_without_metadata_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("external/bare")).unwrap();

        let reader = FileSystemReader::with_root(temp_dir.path());
        assert!(reader.read_project_metadata("external/bare").unwrap().is_none());
    }

    #[test]
    fn test_malformed_project_metadata_names_project_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("external/bad");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("METADATA"), "third_party:\n  url: 42\n").unwrap();

        let reader = FileSystemReader::with_root(temp_dir.path());
        let err = reader.read_project_metadata("external/bad").unwrap_err();
        let message = err.to_string();

        assert!(message.contains("external/bad"));
        assert!(message.contains("METADATA"));
    }
}
