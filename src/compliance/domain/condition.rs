use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

/// ConditionKind - one license obligation category from the fixed vocabulary
///
/// Discriminants are assigned in lexicographic order of the names, so
/// iterating a [`ConditionSet`] by bit yields names in sorted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ConditionKind {
    ByExceptionOnly = 0,
    NotAllowed = 1,
    Notice = 2,
    Permissive = 3,
    Proprietary = 4,
    Reciprocal = 5,
    Restricted = 6,
    RestrictedAllowsDynamicLinking = 7,
    RestrictedIfStaticallyLinked = 8,
    Unencumbered = 9,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 10] = [
        ConditionKind::ByExceptionOnly,
        ConditionKind::NotAllowed,
        ConditionKind::Notice,
        ConditionKind::Permissive,
        ConditionKind::Proprietary,
        ConditionKind::Reciprocal,
        ConditionKind::Restricted,
        ConditionKind::RestrictedAllowsDynamicLinking,
        ConditionKind::RestrictedIfStaticallyLinked,
        ConditionKind::Unencumbered,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConditionKind::ByExceptionOnly => "by_exception_only",
            ConditionKind::NotAllowed => "not_allowed",
            ConditionKind::Notice => "notice",
            ConditionKind::Permissive => "permissive",
            ConditionKind::Proprietary => "proprietary",
            ConditionKind::Reciprocal => "reciprocal",
            ConditionKind::Restricted => "restricted",
            ConditionKind::RestrictedAllowsDynamicLinking => "restricted_allows_dynamic_linking",
            ConditionKind::RestrictedIfStaticallyLinked => "restricted_if_statically_linked",
            ConditionKind::Unencumbered => "unencumbered",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConditionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("Unknown license condition: {}", s))
    }
}

/// ConditionSet value object - an immutable subset of the condition vocabulary
///
/// All operations are total and return new values; the empty set is the
/// identity of [`ConditionSet::union`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ConditionSet(u16);

impl ConditionSet {
    /// Conditions that require attribution (a notice) when distributed.
    pub const IMPLIES_NOTICE: ConditionSet = ConditionSet::from_kinds(&[
        ConditionKind::Unencumbered,
        ConditionKind::Permissive,
        ConditionKind::Notice,
        ConditionKind::Reciprocal,
        ConditionKind::Restricted,
        ConditionKind::RestrictedAllowsDynamicLinking,
        ConditionKind::RestrictedIfStaticallyLinked,
        ConditionKind::Proprietary,
        ConditionKind::ByExceptionOnly,
    ]);

    pub const IMPLIES_RESTRICTED: ConditionSet = ConditionSet::from_kinds(&[
        ConditionKind::Restricted,
        ConditionKind::RestrictedAllowsDynamicLinking,
        ConditionKind::RestrictedIfStaticallyLinked,
    ]);

    /// Conditions that require source code to be shared.
    pub const IMPLIES_SHARED: ConditionSet = ConditionSet::from_kinds(&[
        ConditionKind::Reciprocal,
        ConditionKind::Restricted,
        ConditionKind::RestrictedAllowsDynamicLinking,
        ConditionKind::RestrictedIfStaticallyLinked,
    ]);

    /// Conditions that require source code to be kept private.
    pub const IMPLIES_PRIVATE: ConditionSet =
        ConditionSet::from_kinds(&[ConditionKind::Proprietary]);

    pub const IMPLIES_BY_EXCEPTION_ONLY: ConditionSet = ConditionSet::from_kinds(&[
        ConditionKind::Proprietary,
        ConditionKind::ByExceptionOnly,
    ]);

    pub const ALL: ConditionSet = ConditionSet((1u16 << ConditionKind::ALL.len() as u32) - 1);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_kinds(kinds: &[ConditionKind]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Parses condition names, rejecting anything outside the vocabulary.
    pub fn from_names<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Self::empty(), |set, name| {
            Ok(set.plus(name.as_ref().parse::<ConditionKind>()?))
        })
    }

    pub fn plus(self, kind: ConditionKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub fn minus(self, kind: ConditionKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    pub fn union(self, other: ConditionSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersection(self, other: ConditionSet) -> Self {
        Self(self.0 & other.0)
    }

    pub fn difference(self, other: ConditionSet) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn contains(self, kind: ConditionKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn matches_any(self, mask: ConditionSet) -> bool {
        self.0 & mask.0 != 0
    }

    /// True when every member of `other` is also in `self`.
    pub fn covers(self, other: ConditionSet) -> bool {
        other.0 & !self.0 == 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = ConditionKind> {
        ConditionKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }

    /// Condition names in stable sorted order.
    pub fn names(self) -> Vec<&'static str> {
        self.iter().map(ConditionKind::name).collect()
    }
}

impl FromIterator<ConditionKind> for ConditionSet {
    fn from_iter<T: IntoIterator<Item = ConditionKind>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), ConditionSet::plus)
    }
}

impl From<ConditionKind> for ConditionSet {
    fn from(kind: ConditionKind) -> Self {
        Self::empty().plus(kind)
    }
}

impl BitOr for ConditionSet {
    type Output = ConditionSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd for ConditionSet {
    type Output = ConditionSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl fmt::Display for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join("|"))
    }
}

impl fmt::Debug for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl Serialize for ConditionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConditionKind::*;

    fn sample_sets() -> Vec<ConditionSet> {
        vec![
            ConditionSet::empty(),
            ConditionSet::from(Notice),
            ConditionSet::from_kinds(&[Restricted, Proprietary]),
            ConditionSet::from_kinds(&[Reciprocal, RestrictedIfStaticallyLinked, Notice]),
            ConditionSet::ALL,
        ]
    }

    #[test]
    fn test_union_is_idempotent_and_commutative() {
        for a in sample_sets() {
            for b in sample_sets() {
                assert_eq!(a.union(b).union(b), a.union(b));
                assert_eq!(a.union(b), b.union(a));
            }
        }
    }

    #[test]
    fn test_union_is_associative() {
        let sets = sample_sets();
        for a in &sets {
            for b in &sets {
                for c in &sets {
                    assert_eq!(a.union(*b).union(*c), a.union(b.union(*c)));
                }
            }
        }
    }

    #[test]
    fn test_empty_set() {
        let set = ConditionSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.names().is_empty());
        assert_eq!(set, ConditionSet::default());
    }

    #[test]
    fn test_plus_and_contains() {
        let set = ConditionSet::empty().plus(Notice).plus(Restricted);
        assert!(set.contains(Notice));
        assert!(set.contains(Restricted));
        assert!(!set.contains(Reciprocal));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_minus_and_difference() {
        let set = ConditionSet::from_kinds(&[Notice, Restricted, Reciprocal]);
        assert_eq!(set.minus(Restricted), ConditionSet::from_kinds(&[Notice, Reciprocal]));
        assert_eq!(set.difference(ConditionSet::IMPLIES_SHARED), ConditionSet::from(Notice));
    }

    #[test]
    fn test_matches_any() {
        let set = ConditionSet::from_kinds(&[Notice, RestrictedIfStaticallyLinked]);
        assert!(set.matches_any(ConditionSet::IMPLIES_RESTRICTED));
        assert!(!set.matches_any(ConditionSet::IMPLIES_PRIVATE));
        assert!(!ConditionSet::empty().matches_any(ConditionSet::ALL));
    }

    #[test]
    fn test_names_are_sorted() {
        let set = ConditionSet::from_kinds(&[
            Unencumbered,
            RestrictedIfStaticallyLinked,
            Notice,
            ByExceptionOnly,
            Restricted,
        ]);
        let names = set.names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(
            names,
            vec![
                "by_exception_only",
                "notice",
                "restricted",
                "restricted_if_statically_linked",
                "unencumbered"
            ]
        );
    }

    #[test]
    fn test_all_kinds_sorted_by_discriminant() {
        let names: Vec<_> = ConditionKind::ALL.iter().map(|k| k.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(ConditionSet::ALL.len(), ConditionKind::ALL.len());
    }

    #[test]
    fn test_from_names_round_trips_vocabulary() {
        for kind in ConditionKind::ALL {
            assert_eq!(kind.name().parse::<ConditionKind>().unwrap(), kind);
        }
        let set = ConditionSet::from_names(["notice", "reciprocal"]).unwrap();
        assert_eq!(set, ConditionSet::from_kinds(&[Notice, Reciprocal]));
    }

    #[test]
    fn test_from_names_rejects_unknown() {
        let result = ConditionSet::from_names(["notice", "copyleft"]);
        assert!(result.unwrap_err().contains("copyleft"));
    }

    #[test]
    fn test_covers() {
        let big = ConditionSet::from_kinds(&[Notice, Restricted]);
        assert!(big.covers(ConditionSet::from(Notice)));
        assert!(big.covers(ConditionSet::empty()));
        assert!(!big.covers(ConditionSet::from(Reciprocal)));
    }

    #[test]
    fn test_display_and_serialize() {
        let set = ConditionSet::from_kinds(&[Restricted, Notice]);
        assert_eq!(set.to_string(), "notice|restricted");
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["notice","restricted"]"#
        );
    }

    #[test]
    fn test_class_masks() {
        assert!(ConditionSet::IMPLIES_SHARED.covers(ConditionSet::IMPLIES_RESTRICTED));
        assert!(ConditionSet::IMPLIES_BY_EXCEPTION_ONLY.covers(ConditionSet::IMPLIES_PRIVATE));
        assert!(!ConditionSet::IMPLIES_NOTICE.contains(NotAllowed));
    }
}
