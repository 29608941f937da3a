/// Mock implementations for testing
mod mock_license_text_reader;
mod mock_metadata_reader;
mod mock_progress_reporter;
mod mock_project_metadata_reader;

pub use mock_license_text_reader::MockLicenseTextReader;
pub use mock_metadata_reader::MockMetadataReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_project_metadata_reader::MockProjectMetadataReader;
