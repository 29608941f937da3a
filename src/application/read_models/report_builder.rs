//! Builder for constructing report read models from analysis results

use super::notice_view::NoticeView;
use super::relationships_view::{PackageView, RelationshipsView};
use super::report::{NodeConditionsView, Report, TraceView};
use crate::compliance::domain::{LicenseGraph, ProjectMetadata};
use crate::compliance::services::{
    GraphWalker, NoticeIndex, Relationship, ResolvedConditions, RestrictedTrace,
    SourceSharePrivacyConflict,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// ReportBuilder - turns node ids into names and fixes the output order
pub struct ReportBuilder;

impl ReportBuilder {
    /// Effective conditions of every node, sorted by node name.
    pub fn conditions(graph: &LicenseGraph, resolved: &ResolvedConditions) -> Report {
        let mut views: Vec<NodeConditionsView> = resolved
            .iter()
            .map(|(id, conditions)| NodeConditionsView {
                target: graph.node(id).name().to_string(),
                conditions,
            })
            .collect();
        views.sort_by(|a, b| a.target.cmp(&b.target));
        Report::Conditions(views)
    }

    pub fn share_check(graph: &LicenseGraph, conflicts: &[SourceSharePrivacyConflict]) -> Report {
        Report::ShareCheck(conflicts.iter().map(|c| c.view(graph)).collect())
    }

    pub fn trace(graph: &LicenseGraph, trace: &RestrictedTrace, requested: &[String]) -> Report {
        let sources = if trace.sources.is_empty() {
            requested.to_vec()
        } else {
            trace
                .sources
                .iter()
                .map(|id| graph.node(*id).name().to_string())
                .collect()
        };
        Report::Trace(TraceView {
            sources,
            entries: trace.entries.iter().map(|e| e.view(graph)).collect(),
        })
    }

    pub fn notice(index: &NoticeIndex, product: Option<String>, created: DateTime<Utc>) -> Report {
        Report::Notice(NoticeView::from_index(index, product, created))
    }

    /// Packages in breadth-first walk order, plus their relationships.
    ///
    /// A package's version and download location come from the record of
    /// the first of its projects that has one. Every document gets a fresh
    /// `urn:uuid:` namespace.
    pub fn relationships(
        graph: &LicenseGraph,
        relationships: &[Relationship],
        projects: &BTreeMap<String, ProjectMetadata>,
        product: Option<String>,
        created: DateTime<Utc>,
    ) -> Report {
        let mut packages = Vec::new();
        GraphWalker::walk_top_down_breadth_first(graph, |id, _| {
            let node = graph.node(id);
            let record = node.projects().iter().find_map(|p| projects.get(p));
            packages.push(PackageView {
                name: node.name().to_string(),
                package_name: node.package_name().map(str::to_string),
                version: record.and_then(|m| m.version()).map(str::to_string),
                download_location: record.and_then(|m| m.download_url()).map(str::to_string),
                conditions: node.conditions(),
            });
            true
        });

        Report::Relationships(RelationshipsView {
            document_namespace: format!("urn:uuid:{}", Uuid::new_v4()),
            product,
            created,
            packages,
            relationships: relationships.iter().map(|r| r.view(graph)).collect(),
        })
    }
}
