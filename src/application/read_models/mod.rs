//! Read models for CQRS-lite pattern
//!
//! View-optimized, serializable reports built from analysis results and
//! consumed by the report formatters.

mod notice_view;
mod relationships_view;
mod report;
mod report_builder;

pub use notice_view::{InstallPathView, LibraryView, LicenseTextView, NoticeView};
pub use relationships_view::{PackageView, RelationshipsView};
pub use report::{NodeConditionsView, Report, TraceView};
pub use report_builder::ReportBuilder;
