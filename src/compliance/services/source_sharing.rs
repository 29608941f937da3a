use super::condition_resolver::{ConditionResolver, ResolvedConditions};
use crate::compliance::domain::{ConditionSet, LicenseGraph, ResolutionSet, TargetNode};
use serde::Serialize;
use std::collections::BTreeMap;

/// A project directory whose source must be published, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectShare {
    pub project: String,
    pub conditions: ConditionSet,
}

/// SourceSharing service - which source trees a distributor must publish
pub struct SourceSharing;

impl SourceSharing {
    /// Sharing resolutions owed by the roots of `graph`.
    pub fn resolve(graph: &LicenseGraph, resolved: &ResolvedConditions) -> ResolutionSet {
        let all = ConditionResolver::resolutions(graph, resolved, ConditionSet::IMPLIES_SHARED);
        let mut for_roots = ResolutionSet::new();
        for &root in graph.roots() {
            for r in all.resolutions_for(root) {
                for_roots.add(r.applies_to, r.acts_on, r.conditions);
            }
        }
        for_roots
    }

    /// Groups the `ActsOn` targets of `resolutions` by project directory,
    /// unioning the conditions per project. Sorted by project.
    pub fn projects(graph: &LicenseGraph, resolutions: &ResolutionSet) -> Vec<ProjectShare> {
        let mut by_project: BTreeMap<String, ConditionSet> = BTreeMap::new();
        for r in resolutions.matching(ConditionSet::IMPLIES_SHARED).iter() {
            for project in Self::projects_of(graph.node(r.acts_on)) {
                let entry = by_project.entry(project).or_default();
                *entry = entry.union(r.conditions);
            }
        }
        by_project
            .into_iter()
            .map(|(project, conditions)| ProjectShare {
                project,
                conditions,
            })
            .collect()
    }

    /// Declared projects, or the directory holding the metadata file.
    fn projects_of(node: &TargetNode) -> Vec<String> {
        if !node.projects().is_empty() {
            return node.projects().to_vec();
        }
        let dir = node
            .name()
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or(".");
        vec![dir.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::{ConditionKind::*, EdgeKind};

    #[test]
    fn test_same_project_unions_conditions() {
        let graph = LicenseGraph::new(
            vec![
                TargetNode::new("bin", ConditionSet::from(Notice)),
                TargetNode::new("liba", ConditionSet::from(Reciprocal))
                    .with_projects(vec!["external/shared".to_string()]),
                TargetNode::new("libb", ConditionSet::from(Restricted))
                    .with_projects(vec!["external/shared".to_string()]),
                TargetNode::new("out/libc", ConditionSet::from(Reciprocal)),
            ],
            vec![
                ("bin".to_string(), "liba".to_string(), EdgeKind::Static),
                ("bin".to_string(), "libb".to_string(), EdgeKind::Dynamic),
                ("bin".to_string(), "out/libc".to_string(), EdgeKind::Static),
            ],
            vec!["bin".to_string()],
        )
        .unwrap();

        let resolved = ConditionResolver::resolve(&graph);
        let sharing = SourceSharing::resolve(&graph, &resolved);
        let projects = SourceSharing::projects(&graph, &sharing);

        assert_eq!(
            projects,
            vec![
                ProjectShare {
                    project: "external/shared".to_string(),
                    conditions: ConditionSet::from_kinds(&[Reciprocal, Restricted]),
                },
                // restricted is pushed down from bin onto its static deps
                ProjectShare {
                    project: "out".to_string(),
                    conditions: ConditionSet::from_kinds(&[Reciprocal, Restricted]),
                },
            ]
        );
    }

    #[test]
    fn test_notice_only_graph_shares_nothing() {
        let graph = LicenseGraph::new(
            vec![
                TargetNode::new("bin", ConditionSet::from(Notice)),
                TargetNode::new("lib", ConditionSet::from(Permissive)),
            ],
            vec![("bin".to_string(), "lib".to_string(), EdgeKind::Static)],
            vec!["bin".to_string()],
        )
        .unwrap();

        let resolved = ConditionResolver::resolve(&graph);
        let sharing = SourceSharing::resolve(&graph, &resolved);
        assert!(sharing.is_empty());
        assert!(SourceSharing::projects(&graph, &sharing).is_empty());
    }
}
