use super::graph_walker::GraphWalker;
use crate::compliance::domain::{
    ConditionSet, LicenseGraph, NodeId, ResolutionSet, TargetEdge, TargetNode,
};
use crate::compliance::policies::EdgePolicy;
use std::collections::BTreeMap;

/// Per-node condition sets computed by one [`ConditionResolver`] run
///
/// Indexed by [`NodeId`]. The values belong to the call that produced them;
/// nothing is written back onto the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConditions {
    start: Vec<ConditionSet>,
    inherited: Vec<ConditionSet>,
    pushed: Vec<ConditionSet>,
}

impl ResolvedConditions {
    /// The intrinsic (or seeded) conditions the run started from.
    pub fn start(&self, id: NodeId) -> ConditionSet {
        self.start[id.index()]
    }

    /// Restricted-family conditions pushed onto the node by its dependents.
    pub fn pushed(&self, id: NodeId) -> ConditionSet {
        self.pushed[id.index()]
    }

    /// Conditions originating at the node itself: its start set plus what
    /// was pushed down onto it.
    pub fn local(&self, id: NodeId) -> ConditionSet {
        self.start(id).union(self.pushed(id))
    }

    /// Everything that applies to the node: local conditions plus those
    /// inherited from its dependencies.
    pub fn effective(&self, id: NodeId) -> ConditionSet {
        self.local(id).union(self.inherited[id.index()])
    }

    pub fn len(&self) -> usize {
        self.start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    /// `(node, effective conditions)` in node name order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, ConditionSet)> + '_ {
        (0..self.len()).map(move |i| (NodeId(i), self.effective(NodeId(i))))
    }
}

/// ConditionResolver service - the resolution engine
///
/// Runs in three phases over an immutable [`LicenseGraph`]:
///
/// 1. bottom-up: every node inherits from its dependencies what
///    [`EdgePolicy::upward`] lets through, iterated in dependency-first
///    order until stable (a diamond contributes once, a cycle terminates);
/// 2. top-down: restricted-family conditions are pushed onto dependencies
///    per [`EdgePolicy::downward`], again to a fixpoint;
/// 3. on request, [`ConditionResolver::resolutions`] traces every condition
///    back to the node it originates at.
///
/// All bookkeeping is local to each call, so runs with different seeds or
/// masks never interfere.
pub struct ConditionResolver;

impl ConditionResolver {
    /// Resolves conditions starting from each node's intrinsic set.
    pub fn resolve(graph: &LicenseGraph) -> ResolvedConditions {
        Self::resolve_seeded(graph, TargetNode::conditions)
    }

    /// Resolves conditions starting from `seed(node)` instead of the
    /// intrinsic set, e.g. to trace where a hypothetical condition spreads.
    pub fn resolve_seeded<F>(graph: &LicenseGraph, seed: F) -> ResolvedConditions
    where
        F: Fn(&TargetNode) -> ConditionSet,
    {
        let start: Vec<ConditionSet> = graph.nodes().iter().map(seed).collect();
        let order = GraphWalker::dependency_first_order(graph);

        let mut inherited = vec![ConditionSet::empty(); graph.len()];
        loop {
            let mut changed = false;
            for &id in &order {
                let mut acquired = inherited[id.index()];
                for edge in graph.edges_from(id) {
                    let dep = edge.dependency().index();
                    let dep_effective = start[dep].union(inherited[dep]);
                    acquired = acquired.union(EdgePolicy::inherited(dep_effective, edge.kind()));
                }
                if acquired != inherited[id.index()] {
                    inherited[id.index()] = acquired;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let mut pushed = vec![ConditionSet::empty(); graph.len()];
        loop {
            let mut changed = false;
            for &id in order.iter().rev() {
                let node = graph.node(id);
                let i = id.index();
                let effective = start[i].union(inherited[i]).union(pushed[i]);
                let aggregate_restricted = node
                    .is_container()
                    .then(|| start[i].matches_any(ConditionSet::IMPLIES_RESTRICTED));

                for edge in graph.edges_from(id) {
                    let dep = edge.dependency().index();
                    let down = EdgePolicy::pushed_down(effective, edge.kind(), aggregate_restricted);
                    let merged = pushed[dep].union(down);
                    if merged != pushed[dep] {
                        pushed[dep] = merged;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        ResolvedConditions {
            start,
            inherited,
            pushed,
        }
    }

    /// Builds the resolution set for the conditions in `mask`
    ///
    /// For every node `N`, each condition in the mask is attributed to the
    /// node it originates at (`ActsOn`). `N`'s own local conditions yield a
    /// self-resolution; an origin traced at a dependency `D` carries on to
    /// `N` for the conditions that cross the `N -> D` edge, inherited or
    /// share-only.
    pub fn resolutions(
        graph: &LicenseGraph,
        resolved: &ResolvedConditions,
        mask: ConditionSet,
    ) -> ResolutionSet {
        let order = GraphWalker::dependency_first_order(graph);

        let mut origins: Vec<BTreeMap<NodeId, ConditionSet>> = graph
            .node_ids()
            .map(|id| {
                let mut reach = BTreeMap::new();
                let own = resolved.local(id).intersection(mask);
                if !own.is_empty() {
                    reach.insert(id, own);
                }
                reach
            })
            .collect();

        loop {
            let mut changed = false;
            for &id in &order {
                for edge in graph.edges_from(id) {
                    let carried = Self::carried_origins(&origins[edge.dependency().index()], edge);
                    let reach = &mut origins[id.index()];
                    for (origin, conditions) in carried {
                        let entry = reach.entry(origin).or_default();
                        let merged = entry.union(conditions);
                        if merged != *entry {
                            *entry = merged;
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }

        let mut result = ResolutionSet::new();
        for (i, reach) in origins.into_iter().enumerate() {
            for (origin, conditions) in reach {
                result.add(NodeId(i), origin, conditions);
            }
        }
        result
    }

    fn carried_origins(
        reach: &BTreeMap<NodeId, ConditionSet>,
        edge: &TargetEdge,
    ) -> Vec<(NodeId, ConditionSet)> {
        reach
            .iter()
            .map(|(&origin, &conditions)| (origin, EdgePolicy::traced(conditions, edge.kind())))
            .filter(|(_, conditions)| !conditions.is_empty())
            .collect()
    }
}
