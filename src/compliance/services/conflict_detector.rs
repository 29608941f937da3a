use super::condition_resolver::ResolvedConditions;
use crate::compliance::domain::{ConditionKind, ConditionSet, LicenseGraph, NodeId};
use serde::Serialize;

/// A target that policy requires both to keep private and to share
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceSharePrivacyConflict {
    pub target: NodeId,
    pub privacy_condition: ConditionKind,
    pub sharing_condition: ConditionKind,
}

/// Serializable view of a conflict with the target resolved to its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictView {
    pub target: String,
    pub privacy_condition: &'static str,
    pub sharing_condition: &'static str,
}

impl SourceSharePrivacyConflict {
    pub fn view(&self, graph: &LicenseGraph) -> ConflictView {
        ConflictView {
            target: graph.node(self.target).name().to_string(),
            privacy_condition: self.privacy_condition.name(),
            sharing_condition: self.sharing_condition.name(),
        }
    }
}

/// ConflictDetector service for source-sharing vs. privacy conflicts
///
/// Derived purely from resolved conditions. Containers are aggregates of
/// separately licensed parts, not a single work, so they are never reported.
pub struct ConflictDetector;

impl ConflictDetector {
    pub fn detect(
        graph: &LicenseGraph,
        resolved: &ResolvedConditions,
    ) -> Vec<SourceSharePrivacyConflict> {
        let mut conflicts = Vec::new();
        for id in graph.node_ids() {
            if graph.node(id).is_container() {
                continue;
            }
            let effective = resolved.effective(id);
            let private = effective.intersection(ConditionSet::IMPLIES_PRIVATE);
            let shared = effective.intersection(ConditionSet::IMPLIES_SHARED);
            for privacy_condition in private.iter() {
                for sharing_condition in shared.iter() {
                    conflicts.push(SourceSharePrivacyConflict {
                        target: id,
                        privacy_condition,
                        sharing_condition,
                    });
                }
            }
        }
        conflicts.sort();
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::{ConditionKind::*, EdgeKind, TargetNode};
    use crate::compliance::services::ConditionResolver;

    #[test]
    fn test_proprietary_linking_restricted_conflicts_once() {
        let graph = LicenseGraph::new(
            vec![
                TargetNode::new("secret_bin", ConditionSet::from_kinds(&[Proprietary, ByExceptionOnly])),
                TargetNode::new("gpl_lib", ConditionSet::from(Restricted)),
            ],
            vec![(
                "secret_bin".to_string(),
                "gpl_lib".to_string(),
                EdgeKind::Dynamic,
            )],
            vec!["secret_bin".to_string()],
        )
        .unwrap();

        let resolved = ConditionResolver::resolve(&graph);
        let conflicts = ConflictDetector::detect(&graph, &resolved);

        assert_eq!(conflicts.len(), 1);
        let view = conflicts[0].view(&graph);
        assert_eq!(view.target, "secret_bin");
        assert_eq!(view.privacy_condition, "proprietary");
        assert_eq!(view.sharing_condition, "restricted");
    }

    #[test]
    fn test_dynamic_link_conditional_is_not_a_conflict() {
        let graph = LicenseGraph::new(
            vec![
                TargetNode::new("secret_bin", ConditionSet::from(Proprietary)),
                TargetNode::new("lgpl_lib", ConditionSet::from(RestrictedIfStaticallyLinked)),
            ],
            vec![(
                "secret_bin".to_string(),
                "lgpl_lib".to_string(),
                EdgeKind::Dynamic,
            )],
            vec!["secret_bin".to_string()],
        )
        .unwrap();

        let resolved = ConditionResolver::resolve(&graph);
        assert!(ConflictDetector::detect(&graph, &resolved).is_empty());
    }

    #[test]
    fn test_container_is_exempt() {
        let graph = LicenseGraph::new(
            vec![
                TargetNode::new("image", ConditionSet::from(Notice)).with_container(true),
                TargetNode::new("secret_bin", ConditionSet::from(Proprietary)),
                TargetNode::new("gpl_bin", ConditionSet::from(Restricted)),
            ],
            vec![
                ("image".to_string(), "secret_bin".to_string(), EdgeKind::Containment),
                ("image".to_string(), "gpl_bin".to_string(), EdgeKind::Containment),
            ],
            vec!["image".to_string()],
        )
        .unwrap();

        let resolved = ConditionResolver::resolve(&graph);
        assert!(resolved
            .effective(graph.find("image").unwrap())
            .covers(ConditionSet::from_kinds(&[Proprietary, Restricted])));
        assert!(ConflictDetector::detect(&graph, &resolved).is_empty());
    }
}
