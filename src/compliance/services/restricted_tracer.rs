use super::condition_resolver::ConditionResolver;
use super::graph_walker::GraphWalker;
use crate::compliance::domain::{ConditionKind, ConditionSet, LicenseGraph, NodeId, TargetNode};
use serde::Serialize;

/// One target that ends up restricted, and the nodes the restriction comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub target: NodeId,
    pub origins: Vec<NodeId>,
    pub conditions: ConditionSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntryView {
    pub target: String,
    pub origins: Vec<String>,
    pub conditions: ConditionSet,
}

impl TraceEntry {
    pub fn view(&self, graph: &LicenseGraph) -> TraceEntryView {
        TraceEntryView {
            target: graph.node(self.target).name().to_string(),
            origins: self
                .origins
                .iter()
                .map(|id| graph.node(*id).name().to_string())
                .collect(),
            conditions: self.conditions,
        }
    }
}

/// Result of [`RestrictedTracer::trace`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictedTrace {
    pub sources: Vec<NodeId>,
    pub entries: Vec<TraceEntry>,
}

impl RestrictedTrace {
    /// True when nothing matched the requested sources, usually a typo.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// RestrictedTracer service - where would restriction spread from these sources?
///
/// The matching nodes are seeded as `restricted` (and every other node with
/// nothing), the seeded resolution is run, and every shipped node that ends
/// up with a restricted-family condition from a source is reported together
/// with the sources it comes from.
pub struct RestrictedTracer;

impl RestrictedTracer {
    pub fn trace(graph: &LicenseGraph, sources: &[String]) -> RestrictedTrace {
        let seeded = ConditionResolver::resolve_seeded(graph, |node| {
            if Self::matches(node, sources) {
                ConditionSet::from(ConditionKind::Restricted)
            } else {
                ConditionSet::empty()
            }
        });
        let source_ids: Vec<NodeId> = graph
            .node_ids()
            .filter(|id| Self::matches(graph.node(*id), sources))
            .collect();
        // restriction pushed onto a sibling is not a source of its own
        let resolutions =
            ConditionResolver::resolutions(graph, &seeded, ConditionSet::IMPLIES_RESTRICTED)
                .acting_on(&source_ids);

        let entries = GraphWalker::shipped_nodes(graph)
            .into_iter()
            .filter_map(|id| {
                let traced = resolutions.resolutions_for(id);
                if traced.is_empty() {
                    return None;
                }
                Some(TraceEntry {
                    target: id,
                    origins: traced.iter().map(|r| r.acts_on).collect(),
                    conditions: resolutions.all_conditions(id),
                })
            })
            .collect();

        RestrictedTrace {
            sources: source_ids,
            entries,
        }
    }

    /// A source names a node by metadata file, short name, or project
    /// directory (including any project below it).
    fn matches(node: &TargetNode, sources: &[String]) -> bool {
        sources.iter().any(|source| {
            let source = source.trim_end_matches('/');
            node.name() == source
                || node.short_name() == source
                || node.projects().iter().any(|p| {
                    p == source
                        || p.strip_prefix(source)
                            .is_some_and(|rest| rest.starts_with('/'))
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::{ConditionKind::*, EdgeKind};

    fn sample() -> LicenseGraph {
        LicenseGraph::new(
            vec![
                TargetNode::new("apex.meta_lic", ConditionSet::from(Notice)).with_container(true),
                TargetNode::new("bin1.meta_lic", ConditionSet::from(Notice)),
                TargetNode::new("bin2.meta_lic", ConditionSet::from(Notice)),
                TargetNode::new("libsecret.so.meta_lic", ConditionSet::from(Notice))
                    .with_projects(vec!["vendor/secret/lib".to_string()]),
                TargetNode::new("cc.meta_lic", ConditionSet::from(Notice)),
            ],
            vec![
                ("apex.meta_lic".to_string(), "bin1.meta_lic".to_string(), EdgeKind::Containment),
                ("apex.meta_lic".to_string(), "bin2.meta_lic".to_string(), EdgeKind::Containment),
                ("bin1.meta_lic".to_string(), "libsecret.so.meta_lic".to_string(), EdgeKind::Dynamic),
                ("bin2.meta_lic".to_string(), "cc.meta_lic".to_string(), EdgeKind::Toolchain),
            ],
            vec!["apex.meta_lic".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_trace_by_project() {
        let graph = sample();
        let trace = RestrictedTracer::trace(&graph, &["vendor/secret".to_string()]);

        let targets: Vec<_> = trace
            .entries
            .iter()
            .map(|e| graph.node(e.target).name())
            .collect();
        assert_eq!(
            targets,
            vec!["apex.meta_lic", "bin1.meta_lic", "libsecret.so.meta_lic"]
        );
        let secret = graph.find("libsecret.so.meta_lic").unwrap();
        assert_eq!(trace.sources, vec![secret]);
        for entry in &trace.entries {
            assert!(entry.origins.contains(&secret));
            assert!(entry.conditions.contains(Restricted));
        }
    }

    #[test]
    fn test_trace_by_short_name_skips_tools() {
        let graph = sample();
        let trace = RestrictedTracer::trace(&graph, &["cc".to_string()]);
        assert!(trace.is_empty());
        assert_eq!(trace.sources.len(), 1);
    }

    #[test]
    fn test_trace_no_match() {
        let graph = sample();
        let trace = RestrictedTracer::trace(&graph, &["vendor/secre".to_string()]);
        assert!(trace.is_empty());
        assert!(trace.sources.is_empty());
    }

    #[test]
    fn test_statically_linked_sibling_is_not_an_origin() {
        let graph = LicenseGraph::new(
            vec![
                TargetNode::new("bin.meta_lic", ConditionSet::from(Notice)),
                TargetNode::new("libfoo.a.meta_lic", ConditionSet::from(Notice)),
                TargetNode::new("libsecret.so.meta_lic", ConditionSet::from(Notice)),
            ],
            vec![
                ("bin.meta_lic".to_string(), "libsecret.so.meta_lic".to_string(), EdgeKind::Dynamic),
                ("bin.meta_lic".to_string(), "libfoo.a.meta_lic".to_string(), EdgeKind::Static),
            ],
            vec!["bin.meta_lic".to_string()],
        )
        .unwrap();
        let secret = graph.find("libsecret.so.meta_lic").unwrap();

        let trace = RestrictedTracer::trace(&graph, &["libsecret.so".to_string()]);
        let entries: Vec<_> = trace.entries.iter().map(|e| e.view(&graph)).collect();

        assert_eq!(
            entries,
            vec![
                TraceEntryView {
                    target: "bin.meta_lic".to_string(),
                    origins: vec!["libsecret.so.meta_lic".to_string()],
                    conditions: ConditionSet::from(Restricted),
                },
                TraceEntryView {
                    target: "libsecret.so.meta_lic".to_string(),
                    origins: vec!["libsecret.so.meta_lic".to_string()],
                    conditions: ConditionSet::from(Restricted),
                },
            ]
        );
        assert_eq!(trace.sources, vec![secret]);
    }
}
