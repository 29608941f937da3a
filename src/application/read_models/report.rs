//! Report read model
//!
//! One variant per analysis. Every view holds names rather than node ids,
//! so a report can be formatted without the graph it came from.

use super::notice_view::NoticeView;
use super::relationships_view::RelationshipsView;
use crate::compliance::domain::ConditionSet;
use crate::compliance::services::{ConflictView, ProjectShare, TraceEntryView};
use crate::shared::error::ExitCode;
use serde::Serialize;

/// Effective conditions of one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeConditionsView {
    pub target: String,
    pub conditions: ConditionSet,
}

/// Restricted trace with the sources it was seeded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceView {
    pub sources: Vec<String>,
    pub entries: Vec<TraceEntryView>,
}

/// Result of one analysis, ready for formatting
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// The roots loaded but no node declares a license condition
    NoLicenses,
    Conditions(Vec<NodeConditionsView>),
    /// Sharing/privacy conflicts; empty means PASS
    ShareCheck(Vec<ConflictView>),
    ShareList(Vec<ProjectShare>),
    Trace(TraceView),
    Notice(NoticeView),
    Relationships(RelationshipsView),
}

impl Report {
    /// A share check with conflicts is a policy violation; every other
    /// report, including an empty one, is a success.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Report::ShareCheck(conflicts) if !conflicts.is_empty() => ExitCode::PolicyViolation,
            _ => ExitCode::Success,
        }
    }

    pub fn passed(&self) -> bool {
        self.exit_code() == ExitCode::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict() -> ConflictView {
        ConflictView {
            target: "bin3".to_string(),
            privacy_condition: "proprietary",
            sharing_condition: "restricted",
        }
    }

    #[test]
    fn test_share_check_with_conflicts_fails() {
        let report = Report::ShareCheck(vec![conflict()]);
        assert_eq!(report.exit_code(), ExitCode::PolicyViolation);
        assert!(!report.passed());
    }

    #[test]
    fn test_empty_share_check_passes() {
        assert!(Report::ShareCheck(vec![]).passed());
    }

    #[test]
    fn test_empty_results_are_not_failures() {
        assert_eq!(Report::NoLicenses.exit_code(), ExitCode::Success);
        let trace = Report::Trace(TraceView {
            sources: vec!["external/typo".to_string()],
            entries: vec![],
        });
        assert_eq!(trace.exit_code(), ExitCode::Success);
    }
}
