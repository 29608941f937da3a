use super::graph_walker::GraphWalker;
use crate::compliance::domain::{EdgeKind, LicenseGraph, NodeId};
use serde::Serialize;
use std::fmt;

/// SPDX-style relationship types derived from edge kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    Contains,
    RuntimeDependencyOf,
    BuildToolOf,
    StaticLinkOf,
    DynamicLink,
}

impl RelationshipKind {
    pub fn name(self) -> &'static str {
        match self {
            RelationshipKind::Contains => "CONTAINS",
            RelationshipKind::RuntimeDependencyOf => "RUNTIME_DEPENDENCY_OF",
            RelationshipKind::BuildToolOf => "BUILD_TOOL_OF",
            RelationshipKind::StaticLinkOf => "STATIC_LINK_OF",
            RelationshipKind::DynamicLink => "DYNAMIC_LINK",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `subject kind object`, e.g. `libc.a STATIC_LINK_OF bin1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub subject: NodeId,
    pub kind: RelationshipKind,
    pub object: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipView {
    pub subject: String,
    pub relationship: RelationshipKind,
    pub object: String,
}

impl Relationship {
    pub fn view(&self, graph: &LicenseGraph) -> RelationshipView {
        RelationshipView {
            subject: graph.node(self.subject).name().to_string(),
            relationship: self.kind,
            object: graph.node(self.object).name().to_string(),
        }
    }
}

/// RelationshipBuilder service - package relationships for SBOM-style output
pub struct RelationshipBuilder;

impl RelationshipBuilder {
    /// One relationship per edge leaving a visited node, in walk order.
    pub fn relationships(graph: &LicenseGraph) -> Vec<Relationship> {
        let mut relationships = Vec::new();
        GraphWalker::walk_top_down_breadth_first(graph, |id, _| {
            for edge in graph.edges_from(id) {
                let (dependent, dependency) = (edge.target(), edge.dependency());
                let relationship = match edge.kind() {
                    EdgeKind::Containment => Relationship {
                        subject: dependent,
                        kind: RelationshipKind::Contains,
                        object: dependency,
                    },
                    EdgeKind::Dynamic => Relationship {
                        subject: dependent,
                        kind: RelationshipKind::DynamicLink,
                        object: dependency,
                    },
                    EdgeKind::Runtime => Relationship {
                        subject: dependency,
                        kind: RelationshipKind::RuntimeDependencyOf,
                        object: dependent,
                    },
                    EdgeKind::Toolchain | EdgeKind::BuildTool => Relationship {
                        subject: dependency,
                        kind: RelationshipKind::BuildToolOf,
                        object: dependent,
                    },
                    EdgeKind::Static => Relationship {
                        subject: dependency,
                        kind: RelationshipKind::StaticLinkOf,
                        object: dependent,
                    },
                };
                relationships.push(relationship);
            }
            true
        });
        relationships
    }
}
