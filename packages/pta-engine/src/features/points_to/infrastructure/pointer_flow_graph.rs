//! Pointer Flow Graph
//!
//! Directed graph over [`PointerId`]s. Out-edges are stored per source in
//! insertion order (amortized O(1) append and lookup); an edge set
//! deduplicates exact `(kind, source, target, filter)` duplicates.
//!
//! Adding an edge returns the delta it implies: the source's current
//! points-to set, narrowed by the edge's type filter. An edge installed after
//! its source already received objects therefore never misses them.

use crate::features::points_to::domain::{CSObjId, PointerFlowEdge, PointerId, PointsToSet};
use crate::features::program::TypeId;
use rustc_hash::FxHashSet;

#[derive(Debug, Default)]
pub struct PointerFlowGraph {
    out_edges: Vec<Vec<PointerFlowEdge>>,
    edges: FxHashSet<PointerFlowEdge>,
}

impl PointerFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge
    ///
    /// Returns `None` for a duplicate. For a new edge returns the objects of
    /// `source_pts` that may flow along it (`is_assignable(obj, filter)` is
    /// consulted only for filtered edges).
    pub fn add_edge(
        &mut self,
        edge: PointerFlowEdge,
        source_pts: &PointsToSet,
        mut is_assignable: impl FnMut(CSObjId, TypeId) -> bool,
    ) -> Option<PointsToSet> {
        if !self.edges.insert(edge) {
            return None;
        }
        let source = edge.source.index();
        if source >= self.out_edges.len() {
            self.out_edges.resize_with(source + 1, Vec::new);
        }
        self.out_edges[source].push(edge);

        Some(match edge.filter {
            Some(ty) => source_pts.filter(|obj| is_assignable(obj, ty)),
            None => source_pts.clone(),
        })
    }

    #[inline]
    pub fn out_edges_of(&self, pointer: PointerId) -> &[PointerFlowEdge] {
        self.out_edges
            .get(pointer.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn contains_edge(&self, edge: &PointerFlowEdge) -> bool {
        self.edges.contains(edge)
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &PointerFlowEdge> + '_ {
        self.out_edges.iter().flatten()
    }
}
