//! license-graph - license-compliance analysis over build dependency graphs
//!
//! This library loads a graph of per-artifact license metadata records,
//! resolves how license conditions propagate across its edges and answers
//! compliance queries over the result, following hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`compliance`): conditions, the license graph, edge
//!   policy, the resolution engine and the policy queries
//! - **Application Layer** (`application`): the analysis use case, request
//!   DTOs and report read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use license_graph::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let project_metadata = ProjectMetadataIndex::new(FileSystemReader::new(), 8);
//! let use_case = LicenseAnalysisUseCase::new(
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     project_metadata,
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let request = AnalysisRequest::new(vec!["out/highest.apex.meta_lic".to_string()]);
//! let report = use_case.execute(Analysis::CheckShare, &request).await?;
//!
//! // Format output
//! let output = TextFormatter::new().format(&report)?;
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod compliance;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cache::ProjectMetadataIndex;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::application::dto::{Analysis, AnalysisRequest, OutputFormat};
    pub use crate::application::read_models::{Report, ReportBuilder};
    pub use crate::application::use_cases::LicenseAnalysisUseCase;
    pub use crate::compliance::domain::{
        ConditionKind, ConditionSet, EdgeKind, LicenseGraph, NodeId, ProjectMetadata,
        Resolution, ResolutionSet, TargetEdge, TargetNode,
    };
    pub use crate::compliance::policies::{EdgePolicy, Propagation};
    pub use crate::compliance::services::{
        ConditionResolver, ConflictDetector, GraphWalker, MetadataLoader, NoticeIndex,
        NoticeIndexBuilder, RelationshipBuilder, ResolvedConditions, RestrictedTracer,
        SourceSharing,
    };
    pub use crate::ports::outbound::{
        LicenseTextReader, MetadataReader, OutputPresenter, ProgressReporter,
        ProjectMetadataReader, ProjectMetadataRepository, ReportFormatter,
    };
    pub use crate::shared::error::{ComplianceError, ExitCode};
    pub use crate::shared::Result;
}
