use super::{ConditionSet, NodeId};
use std::collections::BTreeMap;

/// Resolution value object - `applies_to` must address `conditions` originating at `acts_on`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub applies_to: NodeId,
    pub acts_on: NodeId,
    pub conditions: ConditionSet,
}

/// ResolutionSet - resolutions grouped by the target they apply to
///
/// Adding the same `(applies_to, acts_on)` pair twice merges the condition
/// sets. Because node ids follow name order, iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSet {
    by_applies_to: BTreeMap<NodeId, BTreeMap<NodeId, ConditionSet>>,
}

impl ResolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a resolution; empty condition sets are ignored.
    pub fn add(&mut self, applies_to: NodeId, acts_on: NodeId, conditions: ConditionSet) {
        if conditions.is_empty() {
            return;
        }
        let entry = self
            .by_applies_to
            .entry(applies_to)
            .or_default()
            .entry(acts_on)
            .or_default();
        *entry = entry.union(conditions);
    }

    pub fn union(&self, other: &ResolutionSet) -> ResolutionSet {
        let mut result = self.clone();
        for r in other.iter() {
            result.add(r.applies_to, r.acts_on, r.conditions);
        }
        result
    }

    /// Resolutions restricted to the conditions in `mask`.
    pub fn matching(&self, mask: ConditionSet) -> ResolutionSet {
        let mut result = ResolutionSet::new();
        for r in self.iter() {
            result.add(r.applies_to, r.acts_on, r.conditions.intersection(mask));
        }
        result
    }

    /// Resolutions whose origin is one of `origins`.
    pub fn acting_on(&self, origins: &[NodeId]) -> ResolutionSet {
        let mut result = ResolutionSet::new();
        for r in self.iter().filter(|r| origins.contains(&r.acts_on)) {
            result.add(r.applies_to, r.acts_on, r.conditions);
        }
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = Resolution> + '_ {
        self.by_applies_to.iter().flat_map(|(&applies_to, acts)| {
            acts.iter().map(move |(&acts_on, &conditions)| Resolution {
                applies_to,
                acts_on,
                conditions,
            })
        })
    }

    /// Targets that have at least one resolution.
    pub fn applies_to(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.by_applies_to.keys().copied()
    }

    pub fn resolutions_for(&self, applies_to: NodeId) -> Vec<Resolution> {
        self.by_applies_to
            .get(&applies_to)
            .map(|acts| {
                acts.iter()
                    .map(|(&acts_on, &conditions)| Resolution {
                        applies_to,
                        acts_on,
                        conditions,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn conditions(&self, applies_to: NodeId, acts_on: NodeId) -> ConditionSet {
        self.by_applies_to
            .get(&applies_to)
            .and_then(|acts| acts.get(&acts_on))
            .copied()
            .unwrap_or_default()
    }

    /// Union of every condition that applies to `applies_to`.
    pub fn all_conditions(&self, applies_to: NodeId) -> ConditionSet {
        self.by_applies_to
            .get(&applies_to)
            .map(|acts| acts.values().fold(ConditionSet::empty(), |a, b| a.union(*b)))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_applies_to.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_applies_to.is_empty()
    }
}
