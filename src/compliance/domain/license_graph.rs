use super::{EdgeKind, NodeId, TargetEdge, TargetNode};
use std::collections::{BTreeSet, HashMap};

/// LicenseGraph aggregate - artifacts reachable from a set of root files
///
/// Nodes live in an arena sorted by name and are looked up by [`NodeId`];
/// edges refer to nodes by id. The graph is read-only once built, so any
/// number of walks may run against it independently.
#[derive(Debug, Clone)]
pub struct LicenseGraph {
    nodes: Vec<TargetNode>,
    index: HashMap<String, NodeId>,
    edges: Vec<TargetEdge>,
    outgoing: Vec<Vec<usize>>,
    roots: Vec<NodeId>,
}

impl LicenseGraph {
    /// Assembles the graph from loaded nodes and `(target, dependency, kind)`
    /// name triples.
    ///
    /// # Errors
    /// Returns an error naming the missing node if an edge or root refers to
    /// a name that is not among `nodes`.
    pub fn new(
        mut nodes: Vec<TargetNode>,
        edges: Vec<(String, String, EdgeKind)>,
        roots: Vec<String>,
    ) -> crate::shared::Result<Self> {
        nodes.sort_by(|a, b| a.name().cmp(b.name()));
        nodes.dedup_by(|a, b| a.name() == b.name());

        let index: HashMap<String, NodeId> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name().to_string(), NodeId(i)))
            .collect();

        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("License graph has no node named {}", name))
        };

        let mut resolved = edges
            .iter()
            .map(|(target, dependency, kind)| {
                Ok(TargetEdge::new(lookup(target)?, lookup(dependency)?, *kind))
            })
            .collect::<crate::shared::Result<Vec<_>>>()?;
        resolved.sort_by_key(|e| (e.target(), e.dependency(), e.kind()));
        resolved.dedup();

        let mut outgoing = vec![Vec::new(); nodes.len()];
        for (i, edge) in resolved.iter().enumerate() {
            outgoing[edge.target().0].push(i);
        }

        let mut root_ids = roots
            .iter()
            .map(|name| lookup(name))
            .collect::<crate::shared::Result<Vec<_>>>()?;
        root_ids.sort();
        root_ids.dedup();

        Ok(Self {
            nodes,
            index,
            edges: resolved,
            outgoing,
            roots: root_ids,
        })
    }

    pub fn node(&self, id: NodeId) -> &TargetNode {
        &self.nodes[id.0]
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn nodes(&self) -> &[TargetNode] {
        &self.nodes
    }

    /// Node ids in name order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn edges(&self) -> &[TargetEdge] {
        &self.edges
    }

    /// Edges from `id` to its dependencies, ordered by dependency name.
    pub fn edges_from(&self, id: NodeId) -> impl DoubleEndedIterator<Item = &TargetEdge> + '_ {
        self.outgoing[id.0].iter().map(move |&i| &self.edges[i])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// False when no node declares any condition or license text.
    pub fn has_licenses(&self) -> bool {
        self.nodes.iter().any(TargetNode::has_license_info)
    }

    /// Every project directory named by any node, sorted and deduplicated.
    pub fn projects(&self) -> Vec<String> {
        self.nodes
            .iter()
            .flat_map(|n| n.projects().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::{ConditionKind, ConditionSet};

    fn node(name: &str) -> TargetNode {
        TargetNode::new(name, ConditionKind::Notice.into())
    }

    #[test]
    fn test_license_graph_new_sorts_and_indexes() {
        let graph = LicenseGraph::new(
            vec![node("c"), node("a"), node("b")],
            vec![
                ("a".to_string(), "c".to_string(), EdgeKind::Static),
                ("a".to_string(), "b".to_string(), EdgeKind::Dynamic),
            ],
            vec!["a".to_string()],
        )
        .unwrap();

        assert_eq!(graph.len(), 3);
        let names: Vec<_> = graph.nodes().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let a = graph.find("a").unwrap();
        assert_eq!(graph.roots(), &[a]);
        let deps: Vec<_> = graph
            .edges_from(a)
            .map(|e| graph.node(e.dependency()).name())
            .collect();
        assert_eq!(deps, vec!["b", "c"]);
    }

    #[test]
    fn test_license_graph_deduplicates_nodes_and_edges() {
        let graph = LicenseGraph::new(
            vec![node("a"), node("a"), node("b")],
            vec![
                ("a".to_string(), "b".to_string(), EdgeKind::Static),
                ("a".to_string(), "b".to_string(), EdgeKind::Static),
            ],
            vec!["a".to_string(), "a".to_string()],
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.roots().len(), 1);
    }

    #[test]
    fn test_license_graph_rejects_dangling_edge() {
        let result = LicenseGraph::new(
            vec![node("a")],
            vec![("a".to_string(), "missing".to_string(), EdgeKind::Static)],
            vec!["a".to_string()],
        );
        assert!(result.unwrap_err().to_string().contains("missing"));
    }

    #[test]
    fn test_has_licenses() {
        let unlicensed = LicenseGraph::new(
            vec![TargetNode::new("a", ConditionSet::empty())],
            vec![],
            vec!["a".to_string()],
        )
        .unwrap();
        assert!(!unlicensed.has_licenses());

        let licensed = LicenseGraph::new(vec![node("a")], vec![], vec!["a".to_string()]).unwrap();
        assert!(licensed.has_licenses());
    }

    #[test]
    fn test_projects_cover_every_node_project() {
        let graph = LicenseGraph::new(
            vec![
                node("a").with_projects(vec!["external/zlib".to_string(), "vendor/z".to_string()]),
                node("b").with_projects(vec!["external/zlib".to_string()]),
                node("c"),
            ],
            vec![],
            vec!["a".to_string()],
        )
        .unwrap();
        assert_eq!(graph.projects(), vec!["external/zlib", "vendor/z"]);
    }
}
