//! Context-Sensitive Inclusion Solver
//!
//! One worklist fixpoint that grows the pointer flow graph and the call graph
//! together:
//!
//! ```text
//! reachable CS method ──stmts──▶ facts + PFG edges
//!        ▲                              │
//!        │                         propagation
//!   call edges ◀──dispatch── new receiver objects
//! ```
//!
//! # Scheduling
//! - Newly reachable CS methods are queued and processed before the next
//!   work item, so statement scans never recurse into each other
//! - The work list hands out every pending pointer entry before the next call
//!   edge
//!
//! # Transfer rules
//! | statement            | when the method becomes reachable | when a base var grows              |
//! |----------------------|-----------------------------------|------------------------------------|
//! | `v = new T`          | seed `v` with the new CS object   |                                    |
//! | `v = "lit"`          | seed `v` with the constant object |                                    |
//! | `v = u`, `v = (T) u` | `u → v` (cast edges filtered)     |                                    |
//! | `v = T.f`, `T.f = u` | edges to/from the static field    |                                    |
//! | `v = b.f`, `b.f = u` |                                   | `o.f → v`, `u → o.f` per new `o`   |
//! | `v = b[*]`, `b[*]=u` |                                   | `o[*] → v`, `u → o[*]` (filtered)  |
//! | static call          | resolve once, enqueue the edge    |                                    |
//! | direct call          |                                   | resolve once, bind per new receiver|
//! | virtual/interface    |                                   | dispatch per new receiver          |
//!
//! Plugins run synchronously at fixed hook points and may feed more work
//! through the `add_*` methods, which only enqueue.

use crate::config::PtaConfig;
use crate::errors::{PtaError, Result};
use crate::features::context::{ContextId, ContextSelector, Receiver};
use crate::features::heap::{HeapModel, ObjId};
use crate::features::points_to::domain::{
    CSCallSite, CSCallSiteId, CSMethod, CSMethodId, CSObj, CSObjId, CSVar, CSVarId, CallEdge,
    Diagnostic, FlowKind, Pointer, PointerFlowEdge, PointerId, PointsToSet,
};
use crate::features::points_to::infrastructure::{
    CSManager, CallGraph, ClassInitializer, PointerFlowGraph, WorkItem, WorkList,
};
use crate::features::points_to::ports::Plugin;
use crate::features::program::{CallKind, CallSiteId, MethodId, Program, Stmt, TypeId, VarId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, trace, warn};

/// Counters collected while solving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStats {
    /// Work items polled (pointer entries + call edges)
    pub work_items: usize,

    /// Propagation steps that grew a points-to set
    pub propagations: usize,

    /// Distinct call edges wired
    pub call_edges: usize,

    /// Statement scans (one per reachable CS method)
    pub methods_processed: usize,
}

/// Everything the solver computed, handed over once it is done
#[derive(Debug)]
pub struct SolverState<'p> {
    pub program: &'p Program,
    pub config: PtaConfig,
    pub heap: HeapModel,
    pub cs: CSManager,
    pub pfg: PointerFlowGraph,
    pub call_graph: CallGraph<CSCallSiteId, CSMethodId>,
    pub initializer: ClassInitializer,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: SolverStats,
}

pub struct Solver<'p> {
    program: &'p Program,
    config: PtaConfig,
    selector: ContextSelector,
    heap: HeapModel,
    cs: CSManager,
    pfg: PointerFlowGraph,
    work_list: WorkList,
    call_graph: CallGraph<CSCallSiteId, CSMethodId>,
    initializer: ClassInitializer,

    /// Raw methods reachable in at least one context
    reached_methods: FxHashSet<MethodId>,
    pending_methods: VecDeque<CSMethodId>,
    extra_entries: Vec<MethodId>,

    diagnostics: Vec<Diagnostic>,
    seen_diagnostics: FxHashSet<Diagnostic>,

    plugins: Vec<Box<dyn Plugin>>,
    stats: SolverStats,
}

impl std::fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("strategy", &self.selector.strategy())
            .field("reachable", &self.call_graph.reachable_count())
            .field("pointers", &self.cs.pointer_count())
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

/// Whether the runtime type of `obj` is assignable to `ty`
fn assignable(program: &Program, heap: &HeapModel, cs: &CSManager, obj: CSObjId, ty: TypeId) -> bool {
    program.is_subtype(heap.obj(cs.cs_obj(obj).obj).ty, ty)
}

impl<'p> Solver<'p> {
    pub fn new(program: &'p Program, config: PtaConfig) -> Self {
        let heap = HeapModel::new(program, &config.heap);
        Self {
            program,
            selector: ContextSelector::new(config.context_sensitivity),
            config,
            heap,
            cs: CSManager::new(),
            pfg: PointerFlowGraph::new(),
            work_list: WorkList::new(),
            call_graph: CallGraph::new(),
            initializer: ClassInitializer::new(),
            reached_methods: FxHashSet::default(),
            pending_methods: VecDeque::new(),
            extra_entries: Vec::new(),
            diagnostics: Vec::new(),
            seen_diagnostics: FxHashSet::default(),
            plugins: Vec::new(),
            stats: SolverStats::default(),
        }
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Extra entry method, analyzed in the empty context
    pub fn add_entry(&mut self, method: MethodId) -> Result<()> {
        if method.index() >= self.program.method_count() {
            return Err(PtaError::UnknownEntry(method.to_string()));
        }
        if !self.extra_entries.contains(&method) {
            self.extra_entries.push(method);
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Main loop
    // ═══════════════════════════════════════════════════════════════════════

    /// Run to fixpoint
    pub fn solve(&mut self) -> Result<()> {
        info!(
            strategy = %self.selector.strategy(),
            methods = self.program.method_count(),
            plugins = self.plugins.len(),
            "points-to analysis started"
        );

        self.notify(|plugin, solver| plugin.on_start(solver))?;
        self.seed_entries();
        self.run_fixpoint()?;

        // Plugins may feed more work on finish; drain it once more
        self.notify(|plugin, solver| plugin.on_finish(solver))?;
        self.run_fixpoint()?;

        info!(
            reachable_methods = self.reached_methods.len(),
            cs_methods = self.call_graph.reachable_count(),
            call_edges = self.call_graph.edge_count(),
            pfg_edges = self.pfg.edge_count(),
            contexts = self.cs.context_count(),
            work_items = self.stats.work_items,
            diagnostics = self.diagnostics.len(),
            "points-to analysis finished"
        );
        Ok(())
    }

    fn run_fixpoint(&mut self) -> Result<()> {
        loop {
            while let Some(method) = self.pending_methods.pop_front() {
                self.mark_reachable(method)?;
            }
            match self.work_list.poll() {
                Some(WorkItem::Pointer(pointer, pts)) => {
                    self.stats.work_items += 1;
                    self.propagate(pointer, pts)?;
                }
                Some(WorkItem::CallEdge(edge)) => {
                    self.stats.work_items += 1;
                    self.process_call_edge(edge)?;
                }
                None => return Ok(()),
            }
        }
    }

    /// Hand over the computed state
    pub fn finish(self) -> SolverState<'p> {
        SolverState {
            program: self.program,
            config: self.config,
            heap: self.heap,
            cs: self.cs,
            pfg: self.pfg,
            call_graph: self.call_graph,
            initializer: self.initializer,
            diagnostics: self.diagnostics,
            stats: self.stats,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Entries
    // ═══════════════════════════════════════════════════════════════════════

    fn seed_entries(&mut self) {
        let program = self.program;
        let mut entries: Vec<MethodId> = program.main_methods().to_vec();
        if self.config.implicit_entries {
            entries.extend_from_slice(program.implicit_entries());
        }
        entries.extend(self.extra_entries.iter().copied());

        let mut seen = FxHashSet::default();
        for method in entries {
            if !seen.insert(method) {
                continue;
            }
            self.initialize_class(program.method(method).declaring);
            let cs_method = self.cs.get_cs_method(ContextId::EMPTY, method);
            self.call_graph.add_entry_method(cs_method);
            self.pending_methods.push_back(cs_method);
            debug!(method = %program.method_signature(method), "entry method");
        }

        if self.config.main_args {
            for &main in program.main_methods() {
                self.seed_main_args(main);
            }
        }
    }

    /// `main(String[] args)`: `args → <main-arg>`, `<main-arg>[*] → <main-arg-elem>`
    fn seed_main_args(&mut self, main: MethodId) {
        let program = self.program;
        let Some(Some(param)) = program.method(main).params.first().copied() else {
            return;
        };
        let array_type = program.var(param).ty;
        let Some(element_type) = program.type_info(array_type).element() else {
            return;
        };

        let array = self.heap.mock_obj(program, "<main-arg>", array_type, Some(main));
        let element = self
            .heap
            .mock_obj(program, "<main-arg-elem>", element_type, Some(main));
        let cs_array = self.cs.get_cs_obj(ContextId::EMPTY, array);
        let cs_element = self.cs.get_cs_obj(ContextId::EMPTY, element);

        let param_ptr = self.var_pointer(ContextId::EMPTY, param);
        self.work_list
            .add_pointer_entry(param_ptr, PointsToSet::singleton(cs_array));
        let index_ptr = self.cs.get_array_index(cs_array);
        self.work_list
            .add_pointer_entry(index_ptr, PointsToSet::singleton(cs_element));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // New reachable methods
    // ═══════════════════════════════════════════════════════════════════════

    fn mark_reachable(&mut self, cs_method: CSMethodId) -> Result<()> {
        if !self.call_graph.add_reachable_method(cs_method) {
            return Ok(());
        }
        let CSMethod { context, method } = *self.cs.cs_method(cs_method);
        debug!(
            method = %self.program.method_signature(method),
            context = %self.cs.context(context),
            "new reachable method"
        );

        if self.reached_methods.insert(method) {
            self.notify(|plugin, solver| plugin.on_new_method(solver, method))?;
        }

        self.stats.methods_processed += 1;
        self.process_stmts(cs_method, context, method)?;
        self.notify(|plugin, solver| plugin.on_new_cs_method(solver, cs_method))
    }

    fn process_stmts(&mut self, cs_method: CSMethodId, context: ContextId, method: MethodId) -> Result<()> {
        let program = self.program;
        for stmt in &program.method(method).stmts {
            match *stmt {
                Stmt::New { lhs, site } => {
                    let alloc = program.alloc_site(site);
                    self.trigger_initializer(alloc.ty);
                    let obj = self.heap.obj_for_alloc(program, site);
                    let cs_obj = self.cs_obj_in(context, obj);
                    let lhs_ptr = self.var_pointer(context, lhs);
                    self.work_list
                        .add_pointer_entry(lhs_ptr, PointsToSet::singleton(cs_obj));

                    if alloc.dimensions > 1 {
                        // Inner arrays share the outer array's heap context
                        let heap_context = self.cs.cs_obj(cs_obj).context;
                        let mut outer = cs_obj;
                        for inner in self.heap.multi_array_objs(program, site) {
                            let cs_inner = self.cs.get_cs_obj(heap_context, inner);
                            let index_ptr = self.cs.get_array_index(outer);
                            self.work_list
                                .add_pointer_entry(index_ptr, PointsToSet::singleton(cs_inner));
                            outer = cs_inner;
                        }
                    }
                }
                Stmt::AssignLiteral { lhs, literal } => {
                    let obj = self.heap.constant_obj(program, literal);
                    let cs_obj = self.cs_obj_in(context, obj);
                    let lhs_ptr = self.var_pointer(context, lhs);
                    self.work_list
                        .add_pointer_entry(lhs_ptr, PointsToSet::singleton(cs_obj));
                }
                Stmt::Copy { lhs, rhs } => {
                    let source = self.var_pointer(context, rhs);
                    let target = self.var_pointer(context, lhs);
                    self.add_flow_edge(PointerFlowEdge::new(FlowKind::LocalAssign, source, target));
                }
                Stmt::Cast { lhs, rhs, ty } => {
                    let source = self.var_pointer(context, rhs);
                    let target = self.var_pointer(context, lhs);
                    self.add_flow_edge(
                        PointerFlowEdge::new(FlowKind::Cast, source, target).with_filter(ty),
                    );
                }
                Stmt::LoadStatic { lhs, field } => {
                    self.trigger_initializer(program.field(field).declaring);
                    let source = self.cs.get_static_field(field);
                    let target = self.var_pointer(context, lhs);
                    self.add_flow_edge(PointerFlowEdge::new(FlowKind::StaticLoad, source, target));
                }
                Stmt::StoreStatic { field, rhs } => {
                    self.trigger_initializer(program.field(field).declaring);
                    let source = self.var_pointer(context, rhs);
                    let target = self.cs.get_static_field(field);
                    self.add_flow_edge(PointerFlowEdge::new(FlowKind::StaticStore, source, target));
                }
                // Driven by the base variable's points-to set
                Stmt::LoadField { .. }
                | Stmt::StoreField { .. }
                | Stmt::LoadArray { .. }
                | Stmt::StoreArray { .. } => {}
                Stmt::Invoke(call_site) => {
                    self.process_invoke(cs_method, context, method, call_site)?;
                }
            }
        }
        Ok(())
    }

    fn process_invoke(
        &mut self,
        cs_method: CSMethodId,
        context: ContextId,
        method: MethodId,
        call_site: CallSiteId,
    ) -> Result<()> {
        let program = self.program;
        let site = program.call_site(call_site);
        let cs_call_site = self.cs.get_cs_call_site(context, call_site, cs_method);
        self.call_graph.add_call_site(cs_method, cs_call_site);

        match site.kind {
            CallKind::Dynamic => Err(PtaError::unsupported(
                program.method_signature(method),
                format!("dynamic call site #{}", call_site.index()),
            )),
            CallKind::Other => Err(PtaError::inconsistent(format!(
                "call site {} in {} uses the plugin-only kind other",
                call_site,
                program.method_signature(method)
            ))),
            CallKind::Static if site.receiver.is_some() => Err(PtaError::inconsistent(format!(
                "static call site {} in {} has a receiver",
                call_site,
                program.method_signature(method)
            ))),
            CallKind::Special | CallKind::Virtual | CallKind::Interface
                if site.receiver.is_none() =>
            {
                Err(PtaError::inconsistent(format!(
                    "{} call site {} in {} has no receiver",
                    site.kind.as_str(),
                    call_site,
                    program.method_signature(method)
                )))
            }
            CallKind::Static => {
                self.process_static_call(context, cs_call_site, call_site);
                Ok(())
            }
            // Bound as receiver objects arrive
            CallKind::Special | CallKind::Virtual | CallKind::Interface => Ok(()),
        }
    }

    /// Static calls: resolve once, enqueue the edge
    fn process_static_call(&mut self, context: ContextId, cs_call_site: CSCallSiteId, call_site: CallSiteId) {
        let program = self.program;
        let site = program.call_site(call_site);
        let Some(callee) = program.resolve_method(&site.target) else {
            warn!(
                call_site = %call_site,
                target = %site.target.subsignature,
                "unresolved call target"
            );
            self.record(Diagnostic::UnresolvedTarget {
                call_site,
                target: site.target.clone(),
            });
            return;
        };

        self.trigger_initializer(program.method(callee).declaring);
        let callee_context = self.selector.select_call_context(
            self.cs.context(context),
            call_site,
            None,
            callee,
        );
        let callee_context = self.cs.intern_context(callee_context);
        let cs_callee = self.cs.get_cs_method(callee_context, callee);
        self.work_list
            .add_call_edge(CallEdge::new(site.kind, cs_call_site, cs_callee));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Propagation
    // ═══════════════════════════════════════════════════════════════════════

    fn propagate(&mut self, pointer: PointerId, pts: PointsToSet) -> Result<()> {
        let diff = self.cs.points_to_mut(pointer).add_all(&pts);
        if diff.is_empty() {
            return Ok(());
        }
        self.stats.propagations += 1;
        trace!(pointer = %pointer, added = diff.len(), "propagate");

        let program = self.program;
        let (heap, cs) = (&self.heap, &self.cs);
        for edge in self.pfg.out_edges_of(pointer) {
            let flowing = match edge.filter {
                Some(ty) => diff.filter(|obj| assignable(program, heap, cs, obj, ty)),
                None => diff.clone(),
            };
            if !flowing.is_empty() {
                self.work_list.add_pointer_entry(edge.target, flowing);
            }
        }

        if let Pointer::Var(cs_var) = self.cs.pointer(pointer) {
            self.process_var_uses(cs_var, &diff)?;
            self.notify(|plugin, solver| plugin.on_new_points_to_set(solver, cs_var, &diff))?;
        }
        Ok(())
    }

    /// Re-run the base-driven transfer rules of `cs_var` for the new objects
    fn process_var_uses(&mut self, cs_var: CSVarId, diff: &PointsToSet) -> Result<()> {
        let CSVar { context, var, .. } = *self.cs.cs_var(cs_var);
        let program = self.program;
        let uses = program.var_uses(var);
        if uses.is_empty() {
            return Ok(());
        }

        for &(lhs, field) in &uses.instance_loads {
            let target = self.var_pointer(context, lhs);
            for obj in diff {
                let source = self.cs.get_instance_field(obj, field);
                self.add_flow_edge(PointerFlowEdge::new(FlowKind::InstanceLoad, source, target));
            }
        }
        for &(rhs, field) in &uses.instance_stores {
            let source = self.var_pointer(context, rhs);
            for obj in diff {
                let target = self.cs.get_instance_field(obj, field);
                self.add_flow_edge(PointerFlowEdge::new(FlowKind::InstanceStore, source, target));
            }
        }

        if !uses.array_loads.is_empty() || !uses.array_stores.is_empty() {
            for array in diff {
                let Some(element_type) = self.element_type_of(array) else {
                    continue;
                };
                let index = self.cs.get_array_index(array);
                for &lhs in &uses.array_loads {
                    let target = self.var_pointer(context, lhs);
                    self.add_flow_edge(PointerFlowEdge::new(FlowKind::ArrayLoad, index, target));
                }
                for &rhs in &uses.array_stores {
                    let source = self.var_pointer(context, rhs);
                    self.add_flow_edge(
                        PointerFlowEdge::new(FlowKind::ArrayStore, source, index)
                            .with_filter(element_type),
                    );
                }
            }
        }

        for &call_site in &uses.invokes {
            for receiver in diff {
                self.dispatch_call(context, call_site, receiver)?;
            }
        }
        Ok(())
    }

    /// Element type of an array object; `None` for non-array objects
    fn element_type_of(&self, obj: CSObjId) -> Option<TypeId> {
        let ty = self.heap.obj(self.cs.cs_obj(obj).obj).ty;
        self.program.type_info(ty).element()
    }

    /// Direct, virtual or interface call on one receiver object
    fn dispatch_call(&mut self, context: ContextId, call_site: CallSiteId, receiver: CSObjId) -> Result<()> {
        let program = self.program;
        let site = program.call_site(call_site);
        let CSObj {
            context: heap_context,
            obj,
        } = *self.cs.cs_obj(receiver);
        let receiver_type = self.heap.obj(obj).ty;

        let callee = if site.kind == CallKind::Special {
            let Some(callee) = program.resolve_method(&site.target) else {
                warn!(
                    call_site = %call_site,
                    target = %site.target.subsignature,
                    "unresolved call target"
                );
                self.record(Diagnostic::UnresolvedTarget {
                    call_site,
                    target: site.target.clone(),
                });
                return Ok(());
            };
            callee
        } else {
            let Some(callee) = program.dispatch(receiver_type, &site.target.subsignature) else {
                warn!(
                    call_site = %call_site,
                    receiver_type = %program.type_name(receiver_type),
                    subsignature = %site.target.subsignature,
                    "unresolved dispatch"
                );
                self.record(Diagnostic::UnresolvedDispatch {
                    call_site,
                    context,
                    receiver_type,
                    subsignature: site.target.subsignature.clone(),
                });
                return self.notify(|plugin, solver| {
                    plugin.on_unresolved_call(solver, receiver, context, call_site)
                });
            };
            callee
        };

        let callee_context = self.selector.select_call_context(
            self.cs.context(context),
            call_site,
            Some(Receiver {
                heap_context: self.cs.context(heap_context),
                obj,
                info: self.heap.obj(obj),
            }),
            callee,
        );
        let callee_context = self.cs.intern_context(callee_context);
        let caller = self.cs.get_cs_method(context, site.container);
        let cs_call_site = self.cs.get_cs_call_site(context, call_site, caller);
        let cs_callee = self.cs.get_cs_method(callee_context, callee);
        self.work_list
            .add_call_edge(CallEdge::new(site.kind, cs_call_site, cs_callee));

        // `this` sees the receiver right away, not when the edge is processed
        if let Some(this) = program.method(callee).this {
            let this_ptr = self.var_pointer(callee_context, this);
            self.work_list
                .add_pointer_entry(this_ptr, PointsToSet::singleton(receiver));
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Call edges
    // ═══════════════════════════════════════════════════════════════════════

    fn process_call_edge(&mut self, edge: CallEdge) -> Result<()> {
        if !self.call_graph.add_edge(edge) {
            return Ok(());
        }
        self.stats.call_edges += 1;
        self.mark_reachable(edge.callee)?;

        let program = self.program;
        let CSCallSite {
            context: caller_context,
            call_site,
            ..
        } = *self.cs.cs_call_site(edge.call_site);
        let CSMethod {
            context: callee_context,
            method: callee,
        } = *self.cs.cs_method(edge.callee);
        let site = program.call_site(call_site);
        let callee_method = program.method(callee);

        if edge.kind == CallKind::Other {
            debug!(
                call_site = %call_site,
                callee = %program.method_signature(callee),
                callee_context = %self.cs.context(callee_context),
                "new plugin call edge"
            );
            return self.notify(|plugin, solver| plugin.on_new_call_edge(solver, &edge));
        }
        if site.args.len() != callee_method.params.len() {
            return Err(PtaError::inconsistent(format!(
                "call site {} passes {} arguments to {} which takes {}",
                call_site,
                site.args.len(),
                program.method_signature(callee),
                callee_method.params.len()
            )));
        }
        for (arg, param) in site.args.iter().zip(&callee_method.params) {
            if let (Some(arg), Some(param)) = (*arg, *param) {
                self.add_var_edge(caller_context, arg, callee_context, param, FlowKind::ParameterPassing);
            }
        }
        if let Some(result) = site.result {
            for &ret in &callee_method.return_vars {
                self.add_var_edge(callee_context, ret, caller_context, result, FlowKind::Return);
            }
        }

        debug!(
            kind = edge.kind.as_str(),
            call_site = %call_site,
            caller_context = %self.cs.context(caller_context),
            callee = %program.method_signature(callee),
            callee_context = %self.cs.context(callee_context),
            "new call edge"
        );
        self.notify(|plugin, solver| plugin.on_new_call_edge(solver, &edge))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Helpers
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    fn var_pointer(&mut self, context: ContextId, var: VarId) -> PointerId {
        let cs_var = self.cs.get_cs_var(context, var);
        self.cs.cs_var(cs_var).pointer
    }

    fn add_var_edge(&mut self, from_ctx: ContextId, from: VarId, to_ctx: ContextId, to: VarId, kind: FlowKind) {
        let source = self.var_pointer(from_ctx, from);
        let target = self.var_pointer(to_ctx, to);
        self.add_flow_edge(PointerFlowEdge::new(kind, source, target));
    }

    /// CS object for `obj` allocated in a method running under `context`
    fn cs_obj_in(&mut self, context: ContextId, obj: ObjId) -> CSObjId {
        let heap_context = self
            .selector
            .select_heap_context(self.cs.context(context), self.heap.obj(obj));
        let heap_context = self.cs.intern_context(heap_context);
        self.cs.get_cs_obj(heap_context, obj)
    }

    /// Insert a PFG edge and enqueue what already flows along it
    fn add_flow_edge(&mut self, edge: PointerFlowEdge) -> bool {
        let program = self.program;
        let (heap, cs) = (&self.heap, &self.cs);
        let delta = self.pfg.add_edge(edge, cs.points_to(edge.source), |obj, ty| {
            assignable(program, heap, cs, obj, ty)
        });
        match delta {
            Some(delta) => {
                if !delta.is_empty() {
                    self.work_list.add_pointer_entry(edge.target, delta);
                }
                true
            }
            None => false,
        }
    }

    fn trigger_initializer(&mut self, ty: TypeId) {
        for clinit in self.initializer.initialize(self.program, ty) {
            debug!(
                initializer = %self.program.method_signature(clinit),
                "class initializer triggered"
            );
            let cs_method = self.cs.get_cs_method(ContextId::EMPTY, clinit);
            self.pending_methods.push_back(cs_method);
        }
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        if self.seen_diagnostics.insert(diagnostic.clone()) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Run `hook` on every plugin
    ///
    /// Plugins are taken out for the duration of the call so each hook gets
    /// `&mut Solver`.
    fn notify(&mut self, mut hook: impl FnMut(&mut Box<dyn Plugin>, &mut Self) -> Result<()>) -> Result<()> {
        if self.plugins.is_empty() {
            return Ok(());
        }
        let mut plugins = std::mem::take(&mut self.plugins);
        let mut outcome = Ok(());
        for plugin in plugins.iter_mut() {
            if let Err(err) = hook(plugin, self) {
                outcome = Err(match err {
                    err @ PtaError::Plugin { .. } => err,
                    other => PtaError::plugin(plugin.name(), other.to_string()),
                });
                break;
            }
        }
        plugins.append(&mut self.plugins);
        self.plugins = plugins;
        outcome
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Feed API (plugins)
    // ═══════════════════════════════════════════════════════════════════════

    /// Objects that may flow into `var` under `context`
    pub fn add_var_points_to(&mut self, context: ContextId, var: VarId, pts: PointsToSet) {
        let pointer = self.var_pointer(context, var);
        self.add_points_to(pointer, pts);
    }

    pub fn add_points_to(&mut self, pointer: PointerId, pts: PointsToSet) {
        if !pts.is_empty() {
            self.work_list.add_pointer_entry(pointer, pts);
        }
    }

    /// Returns false if the edge already existed
    pub fn add_pfg_edge(
        &mut self,
        source: PointerId,
        target: PointerId,
        kind: FlowKind,
        filter: Option<TypeId>,
    ) -> bool {
        let edge = PointerFlowEdge::new(kind, source, target);
        self.add_flow_edge(match filter {
            Some(ty) => edge.with_filter(ty),
            None => edge,
        })
    }

    /// Edges of kind [`CallKind::Other`] make the callee reachable without
    /// wiring arguments or returns
    pub fn add_call_edge(&mut self, edge: CallEdge) {
        self.work_list.add_call_edge(edge);
    }

    /// Make a CS method reachable (processed before the next work item)
    pub fn add_cs_method(&mut self, method: CSMethodId) {
        self.pending_methods.push_back(method);
    }

    pub fn initialize_class(&mut self, ty: TypeId) {
        self.trigger_initializer(ty);
    }

    /// Synthesized object for plugin-injected facts
    pub fn mock_obj(&mut self, description: impl Into<String>, ty: TypeId, container: Option<MethodId>) -> ObjId {
        self.heap.mock_obj(self.program, description, ty, container)
    }

    /// Cache a per-method result for later passes
    pub fn set_method_result<T: std::any::Any + Send + Sync>(
        &mut self,
        method: CSMethodId,
        key: impl Into<String>,
        value: T,
    ) {
        self.cs.set_method_result(method, key, value);
    }

    pub fn cs_manager_mut(&mut self) -> &mut CSManager {
        &mut self.cs
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Read access
    // ═══════════════════════════════════════════════════════════════════════

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn config(&self) -> &PtaConfig {
        &self.config
    }

    pub fn cs_manager(&self) -> &CSManager {
        &self.cs
    }

    pub fn heap(&self) -> &HeapModel {
        &self.heap
    }

    pub fn call_graph(&self) -> &CallGraph<CSCallSiteId, CSMethodId> {
        &self.call_graph
    }

    pub fn pointer_flow_graph(&self) -> &PointerFlowGraph {
        &self.pfg
    }

    pub fn class_initializer(&self) -> &ClassInitializer {
        &self.initializer
    }

    #[inline]
    pub fn points_to(&self, pointer: PointerId) -> &PointsToSet {
        self.cs.points_to(pointer)
    }

    /// Current points-to set of `var` under `context`, if the pair exists
    pub fn var_points_to(&self, context: ContextId, var: VarId) -> Option<&PointsToSet> {
        self.cs
            .find_cs_var(context, var)
            .map(|v| self.cs.points_to(self.cs.cs_var(v).pointer))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }
}
