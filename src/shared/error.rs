use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a policy failure
/// (the analysis ran and found a problem) and the analysis not running at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - analysis completed and no policy violation was found
    Success = 0,
    /// The analysis completed and reported a policy violation (FAIL)
    PolicyViolation = 1,
    /// Invalid command-line arguments (clap parsing errors, missing roots)
    InvalidArguments = 2,
    /// Application error (unreadable or malformed metadata, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PolicyViolation => write!(f, "Policy Violation (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// One file (or project directory) that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    pub details: String,
}

impl Failure {
    pub fn new(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            details: details.into(),
        }
    }
}

fn list_failures(failures: &[Failure]) -> String {
    failures
        .iter()
        .map(|f| format!("  - {}: {}", f.path.display(), f.details))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Application-specific errors for license graph analysis.
///
/// Batch operations (graph loading, project metadata lookup) collect every
/// failure before returning, so a single run reports the complete set of
/// problems.
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("No license metadata files requested\n\n💡 Hint: Pass one or more .meta_lic files (or @response files) as arguments")]
    NoFilesRequested,

    #[error("Failed to load license metadata ({} file(s)):\n{}\n\n💡 Hint: Verify that every referenced metadata file exists and is valid TOML", .failures.len(), list_failures(.failures))]
    MetadataLoad { failures: Vec<Failure> },

    #[error("Conflicting dependency annotations in {file}: dependency {dependency} is annotated as {kinds}\n\n💡 Hint: An edge must carry exactly one kind of annotation; confirm which linkage is intended")]
    ConflictingAnnotations {
        file: String,
        dependency: String,
        kinds: String,
    },

    #[error("Failed to read project metadata ({} project(s)):\n{}", .failures.len(), list_failures(.failures))]
    ProjectMetadata { failures: Vec<Failure> },

    #[error("Failed to read license text: {path}\nDetails: {details}")]
    LicenseTextRead { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ComplianceError {
    /// Usage errors are reported with exit code 2 rather than 3.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ComplianceError::NoFilesRequested | ComplianceError::InvalidArgument { .. } => {
                ExitCode::InvalidArguments
            }
            _ => ExitCode::ApplicationError,
        }
    }
}
