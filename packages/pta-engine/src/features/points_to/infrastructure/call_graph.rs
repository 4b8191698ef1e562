//! On-the-fly Call Graph
//!
//! Grows monotonically while the solver runs:
//! - entry methods (seeded before the loop)
//! - reachable methods, with the call sites each one contains
//! - call edges, indexed by call site and by callee
//!
//! Generic over node types: the solver builds a
//! `CallGraph<CSCallSiteId, CSMethodId>`, and the result projects it onto a
//! context-erased `CallGraph<CallSiteId, MethodId>`.

use crate::features::points_to::domain::Edge;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct CallGraph<C, M> {
    entry_methods: Vec<M>,
    reachable: FxHashSet<M>,
    /// Reachable methods in discovery order
    reachable_order: Vec<M>,
    call_sites_in: FxHashMap<M, Vec<C>>,
    container_of: FxHashMap<C, M>,
    edges: FxHashSet<Edge<C, M>>,
    edges_out: FxHashMap<C, Vec<Edge<C, M>>>,
    edges_in: FxHashMap<M, Vec<Edge<C, M>>>,
}

impl<C, M> Default for CallGraph<C, M> {
    fn default() -> Self {
        Self {
            entry_methods: Vec::new(),
            reachable: FxHashSet::default(),
            reachable_order: Vec::new(),
            call_sites_in: FxHashMap::default(),
            container_of: FxHashMap::default(),
            edges: FxHashSet::default(),
            edges_out: FxHashMap::default(),
            edges_in: FxHashMap::default(),
        }
    }
}

impl<C, M> CallGraph<C, M>
where
    C: Copy + Eq + Hash,
    M: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Growth
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_entry_method(&mut self, method: M) {
        if !self.entry_methods.contains(&method) {
            self.entry_methods.push(method);
        }
    }

    /// Mark a method reachable. Returns true if it was not reachable before.
    pub fn add_reachable_method(&mut self, method: M) -> bool {
        if self.reachable.insert(method) {
            self.reachable_order.push(method);
            true
        } else {
            false
        }
    }

    /// Record that `call_site` belongs to `method`
    pub fn add_call_site(&mut self, method: M, call_site: C) {
        if self.container_of.insert(call_site, method).is_none() {
            self.call_sites_in.entry(method).or_default().push(call_site);
        }
    }

    /// Insert an edge. Returns true if it was not present.
    pub fn add_edge(&mut self, edge: Edge<C, M>) -> bool {
        if !self.edges.insert(edge) {
            return false;
        }
        self.edges_out.entry(edge.call_site).or_default().push(edge);
        self.edges_in.entry(edge.callee).or_default().push(edge);
        true
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn contains_edge(&self, edge: &Edge<C, M>) -> bool {
        self.edges.contains(edge)
    }

    #[inline]
    pub fn is_reachable(&self, method: M) -> bool {
        self.reachable.contains(&method)
    }

    pub fn entry_methods(&self) -> &[M] {
        &self.entry_methods
    }

    /// Reachable methods in discovery order
    pub fn reachable_methods(&self) -> &[M] {
        &self.reachable_order
    }

    pub fn call_sites_in(&self, method: M) -> &[C] {
        self.call_sites_in
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn container_of(&self, call_site: C) -> Option<M> {
        self.container_of.get(&call_site).copied()
    }

    /// Edges leaving a call site
    pub fn edges_out_of(&self, call_site: C) -> &[Edge<C, M>] {
        self.edges_out
            .get(&call_site)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Edges entering a method
    pub fn edges_into(&self, method: M) -> &[Edge<C, M>] {
        self.edges_in
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn callees_of(&self, call_site: C) -> impl Iterator<Item = M> + '_ {
        self.edges_out_of(call_site).iter().map(|e| e.callee)
    }

    pub fn callers_of(&self, method: M) -> impl Iterator<Item = C> + '_ {
        self.edges_into(method).iter().map(|e| e.call_site)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<C, M>> + '_ {
        self.edges.iter()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.reachable_order.len()
    }

    /// Method-level graph: one node per reachable method, one edge per
    /// distinct `(caller, callee)` pair, weighted by the call site
    pub fn to_digraph(&self) -> DiGraph<M, C> {
        let mut graph = DiGraph::with_capacity(self.reachable_order.len(), self.edges.len());
        let mut nodes: FxHashMap<M, NodeIndex> = FxHashMap::default();
        for &method in &self.reachable_order {
            nodes.insert(method, graph.add_node(method));
        }

        let mut seen: FxHashSet<(M, M)> = FxHashSet::default();
        for &method in &self.reachable_order {
            for &call_site in self.call_sites_in(method) {
                for edge in self.edges_out_of(call_site) {
                    if !seen.insert((method, edge.callee)) {
                        continue;
                    }
                    if let (Some(&from), Some(&to)) = (nodes.get(&method), nodes.get(&edge.callee))
                    {
                        graph.add_edge(from, to, call_site);
                    }
                }
            }
        }
        graph
    }
}
