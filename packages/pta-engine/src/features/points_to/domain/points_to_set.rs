//! Points-to Sets
//!
//! Sorted-vector set of [`CSObjId`]s, insertion-only:
//! - **Delta-friendly**: `add_all` returns exactly the newly inserted objects,
//!   which is the delta propagated along out-edges
//! - **Cache-friendly**: sequential memory, merge-based set operations
//!
//! # Performance Characteristics
//! - Insert: O(log n) search + O(n) shift (sets are small in practice)
//! - Contains: O(log n)
//! - Union / difference: O(n + m) merge
//!
//! # References
//! - Briggs & Torczon "Efficient Implementation of Set Operations"

use super::cs_element::CSObjId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Monotonically growing set of context-sensitive objects
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointsToSet {
    /// Sorted, deduplicated
    objs: Vec<CSObjId>,
}

impl PointsToSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn singleton(obj: CSObjId) -> Self {
        Self { objs: vec![obj] }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Basic Operations
    // ═══════════════════════════════════════════════════════════════════════

    /// Insert an object. Returns true if it was not present.
    #[inline]
    pub fn add(&mut self, obj: CSObjId) -> bool {
        match self.objs.binary_search(&obj) {
            Ok(_) => false,
            Err(pos) => {
                self.objs.insert(pos, obj);
                true
            }
        }
    }

    #[inline]
    pub fn contains(&self, obj: CSObjId) -> bool {
        self.objs.binary_search(&obj).is_ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }

    /// Objects in ascending id order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = CSObjId> + '_ {
        self.objs.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[CSObjId] {
        &self.objs
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Set Operations
    // ═══════════════════════════════════════════════════════════════════════

    /// `self \ other`, as a new set
    pub fn diff(&self, other: &PointsToSet) -> PointsToSet {
        if other.is_empty() {
            return self.clone();
        }
        let mut result = Vec::new();
        let mut j = 0;
        for &obj in &self.objs {
            while j < other.objs.len() && other.objs[j] < obj {
                j += 1;
            }
            if j >= other.objs.len() || other.objs[j] != obj {
                result.push(obj);
            }
        }
        PointsToSet { objs: result }
    }

    /// `self = self ∪ other`; returns the objects that were actually added
    pub fn add_all(&mut self, other: &PointsToSet) -> PointsToSet {
        if other.is_empty() {
            return PointsToSet::new();
        }
        if self.is_empty() {
            self.objs = other.objs.clone();
            return other.clone();
        }

        let mut merged = Vec::with_capacity(self.objs.len() + other.objs.len());
        let mut added = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < self.objs.len() && j < other.objs.len() {
            match self.objs[i].cmp(&other.objs[j]) {
                Ordering::Less => {
                    merged.push(self.objs[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(other.objs[j]);
                    added.push(other.objs[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(self.objs[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.objs[i..]);
        merged.extend_from_slice(&other.objs[j..]);
        added.extend_from_slice(&other.objs[j..]);

        self.objs = merged;
        PointsToSet { objs: added }
    }

    /// Subset of objects accepted by `keep`
    pub fn filter(&self, mut keep: impl FnMut(CSObjId) -> bool) -> PointsToSet {
        PointsToSet {
            objs: self.objs.iter().copied().filter(|&o| keep(o)).collect(),
        }
    }

    /// Whether the sets share any object
    pub fn intersects(&self, other: &PointsToSet) -> bool {
        let mut i = 0;
        let mut j = 0;
        while i < self.objs.len() && j < other.objs.len() {
            match self.objs[i].cmp(&other.objs[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => return true,
            }
        }
        false
    }
}

impl FromIterator<CSObjId> for PointsToSet {
    fn from_iter<T: IntoIterator<Item = CSObjId>>(iter: T) -> Self {
        let mut objs: Vec<CSObjId> = iter.into_iter().collect();
        objs.sort_unstable();
        objs.dedup();
        Self { objs }
    }
}

impl<'a> IntoIterator for &'a PointsToSet {
    type Item = CSObjId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, CSObjId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.objs.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[usize]) -> PointsToSet {
        ids.iter().map(|&i| CSObjId::new(i)).collect()
    }

    #[test]
    fn test_add_and_contains() {
        let mut pts = PointsToSet::new();
        assert!(pts.add(CSObjId::new(3)));
        assert!(pts.add(CSObjId::new(1)));
        assert!(!pts.add(CSObjId::new(3)));
        assert_eq!(pts.len(), 2);
        assert!(pts.contains(CSObjId::new(1)));
        assert!(!pts.contains(CSObjId::new(2)));
        assert_eq!(pts.as_slice(), &[CSObjId::new(1), CSObjId::new(3)]);
    }

    #[test]
    fn test_diff() {
        let a = set(&[1, 2, 3, 5]);
        let b = set(&[2, 5, 7]);
        assert_eq!(a.diff(&b), set(&[1, 3]));
        assert_eq!(b.diff(&a), set(&[7]));
        assert!(a.diff(&a).is_empty());
    }

    #[test]
    fn test_add_all_returns_delta() {
        let mut a = set(&[1, 4]);
        let delta = a.add_all(&set(&[0, 1, 2, 9]));
        assert_eq!(delta, set(&[0, 2, 9]));
        assert_eq!(a, set(&[0, 1, 2, 4, 9]));

        // idempotent: re-adding absorbs nothing
        let delta = a.add_all(&set(&[0, 1, 2, 9]));
        assert!(delta.is_empty());
    }

    #[test]
    fn test_filter_and_intersects() {
        let a = set(&[1, 2, 3, 4]);
        assert_eq!(a.filter(|o| o.0 % 2 == 0), set(&[2, 4]));
        assert!(a.intersects(&set(&[4, 8])));
        assert!(!a.intersects(&set(&[5, 8])));
    }

    // ========== EDGE CASES ==========

    #[test]
    fn test_edge_empty_operands() {
        let mut empty = PointsToSet::new();
        assert!(empty.add_all(&PointsToSet::new()).is_empty());
        assert_eq!(empty.add_all(&set(&[2])), set(&[2]));
        assert_eq!(set(&[1]).diff(&PointsToSet::new()), set(&[1]));
        assert!(!PointsToSet::new().intersects(&set(&[1])));
    }
}
