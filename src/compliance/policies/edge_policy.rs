use crate::compliance::domain::{ConditionKind, ConditionSet, EdgeKind};

/// How a dependency's condition reaches the target that depends on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The dependent inherits the condition into its own effective set.
    Inherit,
    /// The dependent does not inherit the condition, but must make the
    /// originating dependency's source available.
    ShareOnly,
    Stop,
}

impl Propagation {
    pub fn reaches_dependent(self) -> bool {
        !matches!(self, Propagation::Stop)
    }
}

/// EdgePolicy - the propagation table for conditions across dependency edges
///
/// Both directions are encoded as single exhaustive matches so every
/// (condition, edge kind) combination is decided in exactly one place:
///
/// - upward, from a dependency to the target depending on it
///   ([`EdgePolicy::upward`]);
/// - downward, from a target to what it depends on
///   ([`EdgePolicy::downward`]), which only ever carries restricted-family
///   conditions.
pub struct EdgePolicy;

impl EdgePolicy {
    pub fn upward(condition: ConditionKind, edge: EdgeKind) -> Propagation {
        use ConditionKind::*;
        use EdgeKind::*;
        use Propagation::*;

        match (condition, edge) {
            // Tools used to build a target never license-taint it.
            (_, Toolchain | BuildTool) => Stop,

            (Notice | Permissive, _) => Inherit,
            (Unencumbered, _) => Stop,

            (Reciprocal, Static | Containment | Dynamic | Runtime) => ShareOnly,

            (
                Restricted | NotAllowed | Proprietary | ByExceptionOnly,
                Static | Containment | Dynamic | Runtime,
            ) => Inherit,

            (
                RestrictedIfStaticallyLinked | RestrictedAllowsDynamicLinking,
                Static | Containment,
            ) => Inherit,
            (RestrictedIfStaticallyLinked | RestrictedAllowsDynamicLinking, Dynamic | Runtime) => {
                Stop
            }
        }
    }

    /// Whether `condition` held by a target is pushed down onto a dependency.
    ///
    /// `aggregate_restricted` is `Some(intrinsic_is_restricted)` when the
    /// target is a container: an aggregate only passes restricted conditions
    /// down when it is itself licensed restricted.
    pub fn downward(
        condition: ConditionKind,
        edge: EdgeKind,
        aggregate_restricted: Option<bool>,
    ) -> bool {
        use ConditionKind::*;
        use EdgeKind::*;

        if !ConditionSet::IMPLIES_RESTRICTED.contains(condition) {
            return false;
        }
        if aggregate_restricted == Some(false) {
            return false;
        }
        match (condition, edge) {
            (_, Toolchain | BuildTool) => false,
            (_, Static | Containment) => true,
            (Restricted, Dynamic | Runtime) => true,
            (_, Dynamic | Runtime) => false,
        }
    }

    /// Conditions from `conditions` the dependent inherits across `edge`.
    pub fn inherited(conditions: ConditionSet, edge: EdgeKind) -> ConditionSet {
        conditions
            .iter()
            .filter(|c| Self::upward(*c, edge) == Propagation::Inherit)
            .collect()
    }

    /// Conditions from `conditions` traced on to the dependent across `edge`,
    /// whether inherited or share-only.
    pub fn traced(conditions: ConditionSet, edge: EdgeKind) -> ConditionSet {
        conditions
            .iter()
            .filter(|c| Self::upward(*c, edge).reaches_dependent())
            .collect()
    }

    pub fn pushed_down(
        conditions: ConditionSet,
        edge: EdgeKind,
        aggregate_restricted: Option<bool>,
    ) -> ConditionSet {
        conditions
            .iter()
            .filter(|c| Self::downward(*c, edge, aggregate_restricted))
            .collect()
    }
}
