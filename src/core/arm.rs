//! Arm identification and per-arm data storage.
//!
//! ## ArmId
//!
//! Type-safe arm identifier. Arms are indexed in the fixed order they were
//! configured in, and that order is what breaks ties during selection.
//!
//! ## ArmMap
//!
//! Per-arm data storage backed by a `SmallVec`, inline for up to four arms.
//! Supports iteration and indexing by `ArmId`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// Arm identifier, 0-based in configuration order.
///
/// Supports at most 255 arms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArmId(pub u8);

impl ArmId {
    /// Create a new arm ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw arm index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all arm IDs for a simulation with `arm_count` arms.
    ///
    /// ```
    /// use ab_bandit::core::ArmId;
    ///
    /// let arms: Vec<_> = ArmId::all(3).collect();
    /// assert_eq!(arms, vec![ArmId::new(0), ArmId::new(1), ArmId::new(2)]);
    /// ```
    pub fn all(arm_count: usize) -> impl Iterator<Item = ArmId> {
        debug_assert!(arm_count <= 256, "At most 256 arm ids exist");
        (0..arm_count).map(|i| ArmId(i as u8))
    }
}

impl std::fmt::Display for ArmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arm {}", self.0)
    }
}

/// Per-arm data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ab_bandit::core::{ArmId, ArmMap};
///
/// let mut plays = ArmMap::from_values([0u64; 3]);
/// plays[ArmId::new(1)] += 5;
///
/// assert_eq!(plays[ArmId::new(0)], 0);
/// assert_eq!(plays[ArmId::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArmMap<T> {
    data: SmallVec<[T; 4]>,
}

impl<T> ArmMap<T> {
    /// Build an ArmMap from values already in arm order.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let data: SmallVec<[T; 4]> = values.into_iter().collect();
        assert!(!data.is_empty(), "Must have at least 1 arm");
        assert!(data.len() <= 255, "At most 255 arms supported");
        Self { data }
    }

    /// Get the number of arms.
    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.data.len()
    }

    /// Whether `arm` addresses an entry of this map.
    #[must_use]
    pub fn contains(&self, arm: ArmId) -> bool {
        arm.index() < self.data.len()
    }

    /// Get a reference to an arm's data, if the arm exists.
    #[must_use]
    pub fn get(&self, arm: ArmId) -> Option<&T> {
        self.data.get(arm.index())
    }

    /// Iterate over (ArmId, &T) pairs in arm order.
    pub fn iter(&self) -> impl Iterator<Item = (ArmId, &T)> {
        ArmId::all(self.data.len()).zip(self.data.iter())
    }

    /// Iterate over values in arm order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<ArmId> for ArmMap<T> {
    type Output = T;

    fn index(&self, arm: ArmId) -> &Self::Output {
        &self.data[arm.index()]
    }
}

impl<T> IndexMut<ArmId> for ArmMap<T> {
    fn index_mut(&mut self, arm: ArmId) -> &mut Self::Output {
        &mut self.data[arm.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_id_basics() {
        let a0 = ArmId::new(0);
        let a2 = ArmId::new(2);

        assert_eq!(a0.index(), 0);
        assert_eq!(a2.index(), 2);
        assert_eq!(format!("{}", a2), "Arm 2");
        assert!(a0 < a2);
    }

    #[test]
    fn test_arm_id_all_covers_full_range() {
        assert_eq!(ArmId::all(0).count(), 0);
        assert_eq!(ArmId::all(255).count(), 255);
        assert_eq!(ArmId::all(256).count(), 256);
        assert_eq!(ArmId::all(256).last(), Some(ArmId::new(255)));
    }

    #[test]
    fn test_arm_map_from_values_keeps_order() {
        let map = ArmMap::from_values(["A", "B", "C"]);
        let pairs: Vec<_> = map.iter().collect();

        assert_eq!(map.arm_count(), 3);
        assert_eq!(pairs[0], (ArmId::new(0), &"A"));
        assert_eq!(pairs[2], (ArmId::new(2), &"C"));
    }

    #[test]
    fn test_arm_map_contains_and_get() {
        let map = ArmMap::from_values([0u64; 3]);

        assert!(map.contains(ArmId::new(2)));
        assert!(!map.contains(ArmId::new(3)));
        assert_eq!(map.get(ArmId::new(1)), Some(&0));
        assert_eq!(map.get(ArmId::new(9)), None);
    }

    #[test]
    fn test_arm_map_mutation() {
        let mut map = ArmMap::from_values([0u64; 2]);

        map[ArmId::new(0)] = 10;
        map[ArmId::new(1)] = 20;

        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn test_arm_map_beyond_inline_capacity() {
        let map = ArmMap::from_values(0u64..6);
        assert_eq!(map.iter().count(), 6);
        assert_eq!(map[ArmId::new(5)], 5);
    }

    #[test]
    fn test_arm_map_at_max_arms() {
        let map = ArmMap::from_values(0u64..255);
        assert_eq!(map.iter().last(), Some((ArmId::new(254), &254)));
    }

    #[test]
    fn test_arm_map_serialization() {
        let map = ArmMap::from_values([1u64, 2, 3]);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: ArmMap<u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 arm")]
    fn test_arm_map_zero_arms() {
        let _ = ArmMap::from_values(Vec::<u64>::new());
    }
}
