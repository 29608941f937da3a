/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, caches).
pub mod formatter;
pub mod license_text_reader;
pub mod metadata_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_metadata_reader;
pub mod project_metadata_repository;

pub use formatter::ReportFormatter;
pub use license_text_reader::LicenseTextReader;
pub use metadata_reader::MetadataReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_metadata_reader::ProjectMetadataReader;
pub use project_metadata_repository::ProjectMetadataRepository;
