//! Solver Work List
//!
//! Two decoupled FIFO queues with fixed priority: pending pointer entries are
//! always drained before the next call edge is handed out.

use crate::features::points_to::domain::{CallEdge, PointerId, PointsToSet};
use std::collections::VecDeque;

/// One unit of solver work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    /// Objects that may flow into a pointer
    Pointer(PointerId, PointsToSet),

    /// A call edge to wire up
    CallEdge(CallEdge),
}

#[derive(Debug, Default)]
pub struct WorkList {
    pointer_entries: VecDeque<(PointerId, PointsToSet)>,
    call_edges: VecDeque<CallEdge>,
}

impl WorkList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_pointer_entry(&mut self, pointer: PointerId, pts: PointsToSet) {
        self.pointer_entries.push_back((pointer, pts));
    }

    #[inline]
    pub fn add_call_edge(&mut self, edge: CallEdge) {
        self.call_edges.push_back(edge);
    }

    /// Next item: pointer entries first, then call edges
    pub fn poll(&mut self) -> Option<WorkItem> {
        if let Some((pointer, pts)) = self.pointer_entries.pop_front() {
            return Some(WorkItem::Pointer(pointer, pts));
        }
        self.call_edges.pop_front().map(WorkItem::CallEdge)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pointer_entries.is_empty() && self.call_edges.is_empty()
    }

    /// `(pending pointer entries, pending call edges)`
    #[inline]
    pub fn sizes(&self) -> (usize, usize) {
        (self.pointer_entries.len(), self.call_edges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::points_to::domain::{CSCallSiteId, CSMethodId, CSObjId};
    use crate::features::program::CallKind;

    #[test]
    fn test_pointer_entries_have_priority() {
        let mut wl = WorkList::new();
        let edge = CallEdge::new(CallKind::Static, CSCallSiteId::new(0), CSMethodId::new(0));
        wl.add_call_edge(edge);
        wl.add_pointer_entry(PointerId::new(1), PointsToSet::singleton(CSObjId::new(0)));
        wl.add_pointer_entry(PointerId::new(2), PointsToSet::new());

        assert!(matches!(wl.poll(), Some(WorkItem::Pointer(p, _)) if p == PointerId::new(1)));
        assert!(matches!(wl.poll(), Some(WorkItem::Pointer(p, _)) if p == PointerId::new(2)));
        assert_eq!(wl.poll(), Some(WorkItem::CallEdge(edge)));
        assert!(wl.poll().is_none());
        assert!(wl.is_empty());
    }

    #[test]
    fn test_sizes() {
        let mut wl = WorkList::new();
        wl.add_pointer_entry(PointerId::new(0), PointsToSet::new());
        assert_eq!(wl.sizes(), (1, 0));
    }
}
