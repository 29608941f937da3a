use crate::compliance::domain::{LicenseGraph, NodeId, TargetEdge, TargetPath};
use std::collections::{BTreeSet, VecDeque};

/// GraphWalker service for breadth-first traversal of a [`LicenseGraph`]
pub struct GraphWalker;

impl GraphWalker {
    /// Visits every node reachable from the roots once, breadth-first
    ///
    /// Roots are taken in name order and dependencies in edge order, so the
    /// visiting order is deterministic. `visitor` receives the node and the
    /// edges taken to reach it (empty for a root) and returns whether to
    /// descend into the node's dependencies. A node reachable only through
    /// nodes that were not descended into is never visited.
    pub fn walk_top_down_breadth_first<F>(graph: &LicenseGraph, mut visitor: F)
    where
        F: FnMut(NodeId, &TargetPath) -> bool,
    {
        let mut seen = vec![false; graph.len()];
        let mut queue: VecDeque<(NodeId, TargetPath)> = VecDeque::new();

        for &root in graph.roots() {
            if !seen[root.index()] {
                seen[root.index()] = true;
                queue.push_back((root, Vec::new()));
            }
        }

        while let Some((id, path)) = queue.pop_front() {
            if !visitor(id, &path) {
                continue;
            }
            for edge in graph.edges_from(id) {
                let dep = edge.dependency();
                if seen[dep.index()] {
                    continue;
                }
                seen[dep.index()] = true;
                let mut next = path.clone();
                next.push(*edge);
                queue.push_back((dep, next));
            }
        }
    }

    /// Nodes that ship with some root: reachable without crossing a
    /// toolchain or build-tool edge.
    pub fn shipped_nodes(graph: &LicenseGraph) -> BTreeSet<NodeId> {
        let mut shipped: BTreeSet<NodeId> = graph.roots().iter().copied().collect();
        let mut queue: VecDeque<NodeId> = shipped.iter().copied().collect();

        while let Some(id) = queue.pop_front() {
            for edge in graph.edges_from(id).filter(|e| e.kind().is_shipped()) {
                if shipped.insert(edge.dependency()) {
                    queue.push_back(edge.dependency());
                }
            }
        }
        shipped
    }

    /// Post-order over the whole graph: dependencies before their dependents.
    ///
    /// Starts from the sorted roots and then any node not reachable from
    /// them. The back edge of a cycle is skipped, so every node appears once.
    pub fn dependency_first_order(graph: &LicenseGraph) -> Vec<NodeId> {
        let starts = graph.roots().iter().copied().chain(graph.node_ids());
        Self::post_order(graph, starts, |_| true)
    }

    /// Post-order over the shipped part of the graph only: the roots and
    /// what they reach without crossing a toolchain or build-tool edge.
    pub fn shipped_dependency_first_order(graph: &LicenseGraph) -> Vec<NodeId> {
        let roots = graph.roots().iter().copied();
        Self::post_order(graph, roots, |e| e.kind().is_shipped())
    }

    fn post_order<I, F>(graph: &LicenseGraph, starts: I, follow: F) -> Vec<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
        F: Fn(&TargetEdge) -> bool,
    {
        let mut visited = vec![false; graph.len()];
        let mut order = Vec::with_capacity(graph.len());
        // dependencies are reversed so popping yields name order
        let dependencies = |id: NodeId| -> Vec<NodeId> {
            graph
                .edges_from(id)
                .rev()
                .filter(|&e| follow(e))
                .map(|e| e.dependency())
                .collect()
        };

        for start in starts {
            if visited[start.index()] {
                continue;
            }
            visited[start.index()] = true;
            let mut stack: Vec<(NodeId, Vec<NodeId>)> = vec![(start, dependencies(start))];

            while let Some((id, pending)) = stack.last_mut() {
                match pending.pop() {
                    Some(dep) => {
                        if !visited[dep.index()] {
                            visited[dep.index()] = true;
                            let deps = dependencies(dep);
                            stack.push((dep, deps));
                        }
                    }
                    None => {
                        order.push(*id);
                        stack.pop();
                    }
                }
            }
        }
        order
    }
}
