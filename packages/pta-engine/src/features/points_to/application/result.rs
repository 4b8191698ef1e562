//! Analysis Result
//!
//! Immutable view over everything the solver computed. Offers both
//! context-sensitive queries (by CS element id) and context-erased ones
//! (by raw variable / method), plus the context-erased call graph.

use crate::config::PtaConfig;
use crate::features::context::{Context, ContextId};
use crate::features::heap::{HeapModel, Obj, ObjId};
use crate::features::points_to::domain::{
    CSCallSiteId, CSMethod, CSMethodId, CSObj, CSObjId, CSVar, CSVarId, Diagnostic, Edge,
    PointerId, PointsToSet,
};
use crate::features::points_to::infrastructure::{
    CSManager, CallGraph, ClassInitializer, PointerFlowGraph, SolverState,
};
use crate::features::program::{CallSiteId, FieldId, MethodId, Program, TypeId, VarId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

/// Summary statistics of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub strategy: String,
    pub reachable_methods: usize,
    pub cs_methods: usize,
    pub contexts: usize,
    pub cs_vars: usize,
    pub cs_objs: usize,
    pub objs: usize,
    pub pointers: usize,
    pub pfg_edges: usize,
    pub cs_call_edges: usize,
    pub call_edges: usize,
    pub work_items: usize,
    pub propagations: usize,
    pub diagnostics: usize,
    pub duration_ms: f64,
}

impl AnalysisStats {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Context-erased object ids of a points-to set, sorted and deduplicated
fn erase(cs: &CSManager, pts: &PointsToSet) -> Vec<ObjId> {
    let mut objs: Vec<ObjId> = pts.iter().map(|o| cs.cs_obj(o).obj).collect();
    objs.sort_unstable();
    objs.dedup();
    objs
}

/// Whether two sorted slices share an element
fn sorted_intersects(a: &[ObjId], b: &[ObjId]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => return true,
        }
    }
    false
}

/// Result of a points-to analysis run
#[derive(Debug)]
pub struct PointerAnalysisResult<'p> {
    program: &'p Program,
    config: PtaConfig,
    heap: HeapModel,
    cs: CSManager,
    pfg: PointerFlowGraph,
    cs_call_graph: CallGraph<CSCallSiteId, CSMethodId>,
    call_graph: CallGraph<CallSiteId, MethodId>,
    initializer: ClassInitializer,
    diagnostics: Vec<Diagnostic>,
    stats: AnalysisStats,

    /// Raw variable → its CS variables
    vars_by_raw: FxHashMap<VarId, Vec<CSVarId>>,
    /// Raw method → its reachable CS methods
    methods_by_raw: FxHashMap<MethodId, Vec<CSMethodId>>,
}

impl<'p> PointerAnalysisResult<'p> {
    pub fn new(state: SolverState<'p>, elapsed: Duration) -> Self {
        let SolverState {
            program,
            config,
            heap,
            cs,
            pfg,
            call_graph: cs_call_graph,
            initializer,
            diagnostics,
            stats: solver_stats,
        } = state;

        let call_graph = Self::erase_call_graph(&cs, &cs_call_graph);

        let mut vars_by_raw: FxHashMap<VarId, Vec<CSVarId>> = FxHashMap::default();
        for (id, cs_var) in cs.cs_vars() {
            vars_by_raw.entry(cs_var.var).or_default().push(id);
        }
        let mut methods_by_raw: FxHashMap<MethodId, Vec<CSMethodId>> = FxHashMap::default();
        for &id in cs_call_graph.reachable_methods() {
            methods_by_raw
                .entry(cs.cs_method(id).method)
                .or_default()
                .push(id);
        }

        let stats = AnalysisStats {
            strategy: config.context_sensitivity.to_string(),
            reachable_methods: call_graph.reachable_count(),
            cs_methods: cs_call_graph.reachable_count(),
            contexts: cs.context_count(),
            cs_vars: cs.cs_var_count(),
            cs_objs: cs.cs_obj_count(),
            objs: heap.len(),
            pointers: cs.pointer_count(),
            pfg_edges: pfg.edge_count(),
            cs_call_edges: cs_call_graph.edge_count(),
            call_edges: call_graph.edge_count(),
            work_items: solver_stats.work_items,
            propagations: solver_stats.propagations,
            diagnostics: diagnostics.len(),
            duration_ms: elapsed.as_secs_f64() * 1000.0,
        };

        Self {
            program,
            config,
            heap,
            cs,
            pfg,
            cs_call_graph,
            call_graph,
            initializer,
            diagnostics,
            stats,
            vars_by_raw,
            methods_by_raw,
        }
    }

    /// Project the CS call graph onto raw call sites and methods
    fn erase_call_graph(
        cs: &CSManager,
        cs_graph: &CallGraph<CSCallSiteId, CSMethodId>,
    ) -> CallGraph<CallSiteId, MethodId> {
        let mut graph = CallGraph::new();
        for &entry in cs_graph.entry_methods() {
            graph.add_entry_method(cs.cs_method(entry).method);
        }
        for &cs_method in cs_graph.reachable_methods() {
            let method = cs.cs_method(cs_method).method;
            graph.add_reachable_method(method);
            for &cs_call_site in cs_graph.call_sites_in(cs_method) {
                let call_site = cs.cs_call_site(cs_call_site).call_site;
                graph.add_call_site(method, call_site);
                for edge in cs_graph.edges_out_of(cs_call_site) {
                    graph.add_edge(Edge::new(
                        edge.kind,
                        call_site,
                        cs.cs_method(edge.callee).method,
                    ));
                }
            }
        }
        graph
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Points-to queries
    // ═══════════════════════════════════════════════════════════════════════

    /// Points-to set of `var` under `context`
    pub fn points_to_of_var(&self, context: ContextId, var: VarId) -> Option<&PointsToSet> {
        self.cs
            .find_cs_var(context, var)
            .map(|id| self.cs.points_to(self.cs.cs_var(id).pointer))
    }

    /// Context-erased points-to set of `var` across all its contexts
    pub fn points_to(&self, var: VarId) -> Vec<ObjId> {
        let mut objs: Vec<ObjId> = self
            .vars_by_raw
            .get(&var)
            .into_iter()
            .flatten()
            .flat_map(|&id| self.cs.points_to(self.cs.cs_var(id).pointer).iter())
            .map(|o| self.cs.cs_obj(o).obj)
            .collect();
        objs.sort_unstable();
        objs.dedup();
        objs
    }

    /// Points-to set of any pointer
    #[inline]
    pub fn pointer_points_to(&self, pointer: PointerId) -> &PointsToSet {
        self.cs.points_to(pointer)
    }

    pub fn instance_field_points_to(&self, base: CSObjId, field: FieldId) -> Option<&PointsToSet> {
        self.cs
            .find_instance_field(base, field)
            .map(|p| self.cs.points_to(p))
    }

    pub fn array_index_points_to(&self, array: CSObjId) -> Option<&PointsToSet> {
        self.cs.find_array_index(array).map(|p| self.cs.points_to(p))
    }

    pub fn static_field_points_to(&self, field: FieldId) -> Option<&PointsToSet> {
        self.cs.find_static_field(field).map(|p| self.cs.points_to(p))
    }

    /// Context-erased `obj.field`, merged over every heap context of `obj`
    pub fn field_points_to(&self, obj: ObjId, field: FieldId) -> Vec<ObjId> {
        let mut objs: Vec<ObjId> = self
            .cs
            .instance_fields()
            .filter(|&(base, f, _)| f == field && self.cs.cs_obj(base).obj == obj)
            .flat_map(|(_, _, pointer)| erase(&self.cs, self.cs.points_to(pointer)))
            .collect();
        objs.sort_unstable();
        objs.dedup();
        objs
    }

    /// Context-erased `obj[*]`
    pub fn array_points_to(&self, obj: ObjId) -> Vec<ObjId> {
        let mut objs: Vec<ObjId> = self
            .cs
            .array_indexes()
            .filter(|&(base, _)| self.cs.cs_obj(base).obj == obj)
            .flat_map(|(_, pointer)| erase(&self.cs, self.cs.points_to(pointer)))
            .collect();
        objs.sort_unstable();
        objs.dedup();
        objs
    }

    /// Whether `a` and `b` may point to a common object (contexts erased)
    pub fn may_alias(&self, a: VarId, b: VarId) -> bool {
        sorted_intersects(&self.points_to(a), &self.points_to(b))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Enumeration
    // ═══════════════════════════════════════════════════════════════════════

    pub fn cs_vars(&self) -> impl Iterator<Item = (CSVarId, &CSVar)> + '_ {
        self.cs.cs_vars()
    }

    pub fn cs_objs(&self) -> impl Iterator<Item = (CSObjId, &CSObj)> + '_ {
        self.cs.cs_objs()
    }

    pub fn instance_fields(&self) -> impl Iterator<Item = (CSObjId, FieldId, PointerId)> + '_ {
        self.cs.instance_fields()
    }

    pub fn array_indexes(&self) -> impl Iterator<Item = (CSObjId, PointerId)> + '_ {
        self.cs.array_indexes()
    }

    pub fn static_fields(&self) -> impl Iterator<Item = (FieldId, PointerId)> + '_ {
        self.cs.static_fields()
    }

    /// Reachable CS methods in discovery order
    pub fn reachable_cs_methods(&self) -> &[CSMethodId] {
        self.cs_call_graph.reachable_methods()
    }

    pub fn cs_method(&self, id: CSMethodId) -> &CSMethod {
        self.cs.cs_method(id)
    }

    /// Result a later pass attached to `method` under `key`
    pub fn method_result<T: Any + Send + Sync>(&self, method: CSMethodId, key: &str) -> Option<Arc<T>> {
        self.cs.method_result(method, key)
    }

    /// Attach a per-method result for passes that run after solving
    pub fn set_method_result<T: Any + Send + Sync>(
        &mut self,
        method: CSMethodId,
        key: impl Into<String>,
        value: T,
    ) {
        self.cs.set_method_result(method, key, value);
    }

    /// Contexts under which `method` was analyzed
    pub fn contexts_of(&self, method: MethodId) -> Vec<ContextId> {
        self.methods_by_raw
            .get(&method)
            .into_iter()
            .flatten()
            .map(|&id| self.cs.cs_method(id).context)
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Call graphs
    // ═══════════════════════════════════════════════════════════════════════

    pub fn cs_call_graph(&self) -> &CallGraph<CSCallSiteId, CSMethodId> {
        &self.cs_call_graph
    }

    pub fn callees_of(&self, call_site: CSCallSiteId) -> Vec<CSMethodId> {
        self.cs_call_graph.callees_of(call_site).collect()
    }

    pub fn callers_of(&self, method: CSMethodId) -> Vec<CSCallSiteId> {
        self.cs_call_graph.callers_of(method).collect()
    }

    pub fn entry_methods(&self) -> &[CSMethodId] {
        self.cs_call_graph.entry_methods()
    }

    /// Context-erased call graph
    pub fn call_graph(&self) -> &CallGraph<CallSiteId, MethodId> {
        &self.call_graph
    }

    /// Raw methods reachable in any context, in discovery order
    pub fn reachable_methods(&self) -> &[MethodId] {
        self.call_graph.reachable_methods()
    }

    /// Context-erased callees of a raw call site
    pub fn callee_methods(&self, call_site: CallSiteId) -> Vec<MethodId> {
        self.call_graph.callees_of(call_site).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Objects, contexts and bookkeeping
    // ═══════════════════════════════════════════════════════════════════════

    pub fn obj(&self, obj: ObjId) -> &Obj {
        self.heap.obj(obj)
    }

    pub fn cs_obj(&self, obj: CSObjId) -> &CSObj {
        self.cs.cs_obj(obj)
    }

    pub fn describe_obj(&self, obj: ObjId) -> String {
        self.heap.obj(obj).describe(self.program)
    }

    /// Objects a merged object stands for
    pub fn represented_objs(&self, merged: ObjId) -> Vec<ObjId> {
        self.heap.represented_objs(merged)
    }

    pub fn context(&self, id: ContextId) -> &Context {
        self.cs.context(id)
    }

    /// Types whose initializers were triggered, in trigger order
    pub fn initialized_types(&self) -> &[TypeId] {
        self.initializer.triggered_types()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn stats(&self) -> &AnalysisStats {
        &self.stats
    }

    pub fn config(&self) -> &PtaConfig {
        &self.config
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn heap(&self) -> &HeapModel {
        &self.heap
    }

    pub fn cs_manager(&self) -> &CSManager {
        &self.cs
    }

    pub fn pointer_flow_graph(&self) -> &PointerFlowGraph {
        &self.pfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContextStrategy;
    use crate::features::points_to::infrastructure::Solver;
    use crate::features::program::{CallKind, MethodRef, ProgramBuilder};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_result_is_shareable() {
        assert_send_sync::<PointerAnalysisResult<'static>>();
    }

    #[test]
    fn test_erased_queries_and_call_graph() {
        let mut b = ProgramBuilder::new();
        let object = b.add_class("Object", None);
        let main_cls = b.add_class("Main", Some(object));
        let main = b.add_method(main_cls, "main", "main()", true);
        let id = b.add_method(main_cls, "id", "id(Object)", true);
        let p = b.add_param(id, "p", object);
        b.add_return(id, p);
        let x = b.add_var(main, "x", object);
        let y = b.add_var(main, "y", object);
        let z = b.add_var(main, "z", object);
        b.new_obj(main, x, object);
        b.new_obj(main, z, object);
        let call = b.invoke(main, CallKind::Static, MethodRef::new(main_cls, "id(Object)"), None, vec![x], Some(y));
        b.add_main(main);
        let program = b.build().unwrap();

        let config = PtaConfig::default().context_sensitivity(ContextStrategy::CallSite(1));
        let mut solver = Solver::new(&program, config);
        solver.solve().unwrap();
        let result = PointerAnalysisResult::new(solver.finish(), Duration::from_millis(3));

        assert_eq!(result.points_to(y), result.points_to(x));
        assert!(result.may_alias(x, y));
        assert!(!result.may_alias(x, z));
        assert_eq!(result.reachable_methods(), &[main, id]);
        assert_eq!(result.callee_methods(call), vec![id]);
        assert_eq!(result.contexts_of(id).len(), 1);
        assert_eq!(result.call_graph().to_digraph().edge_count(), 1);

        let stats = result.stats();
        assert_eq!(stats.strategy, "1-call");
        assert_eq!(stats.reachable_methods, 2);
        assert_eq!(stats.call_edges, 1);
        let json = stats.to_json().unwrap();
        assert!(json.contains("\"reachable_methods\": 2"));
    }

    #[test]
    fn test_later_pass_caches_results_per_cs_method() {
        let mut b = ProgramBuilder::new();
        let object = b.add_class("Object", None);
        let main = b.add_method(object, "main", "main()", true);
        let x = b.add_var(main, "x", object);
        b.new_obj(main, x, object);
        b.add_main(main);
        let program = b.build().unwrap();

        let mut solver = Solver::new(&program, PtaConfig::default());
        solver.solve().unwrap();
        let cs_main = solver
            .cs_manager()
            .cs_methods()
            .find(|(_, m)| m.method == main)
            .map(|(id, _)| id)
            .unwrap();
        solver.set_method_result(cs_main, "allocs", 1usize);
        let mut result = PointerAnalysisResult::new(solver.finish(), Duration::ZERO);

        assert_eq!(result.method_result::<usize>(cs_main, "allocs").as_deref(), Some(&1));
        result.set_method_result(cs_main, "locals", vec![x]);
        assert_eq!(
            result.method_result::<Vec<VarId>>(cs_main, "locals").as_deref(),
            Some(&vec![x])
        );
        assert!(result.method_result::<usize>(cs_main, "missing").is_none());
    }

    // ========== EDGE CASES ==========

    #[test]
    fn test_unknown_variables_are_empty() {
        let mut b = ProgramBuilder::new();
        let object = b.add_class("Object", None);
        let main = b.add_method(object, "main", "main()", true);
        let unused = b.add_var(main, "unused", object);
        b.add_main(main);
        let program = b.build().unwrap();

        let mut solver = Solver::new(&program, PtaConfig::default());
        solver.solve().unwrap();
        let result = PointerAnalysisResult::new(solver.finish(), Duration::ZERO);
        assert!(result.points_to(unused).is_empty());
        assert!(result.points_to_of_var(ContextId::EMPTY, unused).is_none());
        assert!(!result.may_alias(unused, unused));
    }
}
