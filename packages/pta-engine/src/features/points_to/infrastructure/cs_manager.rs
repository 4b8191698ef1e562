//! Context-Sensitive Element Manager
//!
//! Canonicalizes `(context, raw entity)` pairs into unique elements:
//! - contexts → `ContextId` (the empty context is always `ContextId::EMPTY`)
//! - variables, objects, call sites, methods → typed ids
//! - instance-field, array-index and static-field pointers → `PointerId`
//!
//! Elements live in per-kind arenas for the whole run; lookups are
//! O(1)-amortized `FxHashMap` hits. Each pointer's points-to set is stored
//! here, next to the pointer it belongs to.
//!
//! CS methods also carry a keyed result cache that later passes fill in
//! (type-erased, read back with a downcast).

use crate::features::context::{Context, ContextId};
use crate::features::heap::ObjId;
use crate::features::points_to::domain::{
    CSCallSite, CSCallSiteId, CSMethod, CSMethodId, CSObj, CSObjId, CSVar, CSVarId, Pointer,
    PointerId, PointsToSet,
};
use crate::features::program::{CallSiteId, FieldId, MethodId, VarId};
use rustc_hash::FxHashMap;
use std::any::Any;
use std::sync::Arc;

type MethodResult = Arc<dyn Any + Send + Sync>;

/// A pointer node and its points-to set
#[derive(Debug, Clone)]
struct PointerNode {
    pointer: Pointer,
    pts: PointsToSet,
}

/// Hash-consing factory for every context-sensitive element
#[derive(Debug)]
pub struct CSManager {
    contexts: Vec<Context>,
    context_index: FxHashMap<Context, ContextId>,

    vars: Vec<CSVar>,
    var_index: FxHashMap<(ContextId, VarId), CSVarId>,

    objs: Vec<CSObj>,
    obj_index: FxHashMap<(ContextId, ObjId), CSObjId>,

    call_sites: Vec<CSCallSite>,
    call_site_index: FxHashMap<(ContextId, CallSiteId), CSCallSiteId>,

    methods: Vec<CSMethod>,
    method_index: FxHashMap<(ContextId, MethodId), CSMethodId>,

    pointers: Vec<PointerNode>,
    instance_fields: FxHashMap<(CSObjId, FieldId), PointerId>,
    array_indexes: FxHashMap<CSObjId, PointerId>,
    static_fields: FxHashMap<FieldId, PointerId>,

    method_results: FxHashMap<CSMethodId, FxHashMap<String, MethodResult>>,
}

impl Default for CSManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CSManager {
    pub fn new() -> Self {
        let mut manager = Self {
            contexts: Vec::new(),
            context_index: FxHashMap::default(),
            vars: Vec::new(),
            var_index: FxHashMap::default(),
            objs: Vec::new(),
            obj_index: FxHashMap::default(),
            call_sites: Vec::new(),
            call_site_index: FxHashMap::default(),
            methods: Vec::new(),
            method_index: FxHashMap::default(),
            pointers: Vec::new(),
            instance_fields: FxHashMap::default(),
            array_indexes: FxHashMap::default(),
            static_fields: FxHashMap::default(),
            method_results: FxHashMap::default(),
        };
        let empty = manager.intern_context(Context::empty());
        debug_assert_eq!(empty, ContextId::EMPTY);
        manager
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Contexts
    // ═══════════════════════════════════════════════════════════════════════

    /// Intern a context
    pub fn intern_context(&mut self, context: Context) -> ContextId {
        if let Some(&id) = self.context_index.get(&context) {
            return id;
        }
        let id = ContextId::new(self.contexts.len());
        self.contexts.push(context.clone());
        self.context_index.insert(context, id);
        id
    }

    #[inline]
    pub fn context(&self, id: ContextId) -> &Context {
        &self.contexts[id.index()]
    }

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Canonicalizing getters
    // ═══════════════════════════════════════════════════════════════════════

    fn new_pointer(&mut self, pointer: Pointer) -> PointerId {
        let id = PointerId::new(self.pointers.len());
        self.pointers.push(PointerNode {
            pointer,
            pts: PointsToSet::new(),
        });
        id
    }

    pub fn get_cs_var(&mut self, context: ContextId, var: VarId) -> CSVarId {
        if let Some(&id) = self.var_index.get(&(context, var)) {
            return id;
        }
        let id = CSVarId::new(self.vars.len());
        let pointer = self.new_pointer(Pointer::Var(id));
        self.vars.push(CSVar {
            context,
            var,
            pointer,
        });
        self.var_index.insert((context, var), id);
        id
    }

    pub fn get_cs_obj(&mut self, heap_context: ContextId, obj: ObjId) -> CSObjId {
        if let Some(&id) = self.obj_index.get(&(heap_context, obj)) {
            return id;
        }
        let id = CSObjId::new(self.objs.len());
        self.objs.push(CSObj {
            context: heap_context,
            obj,
        });
        self.obj_index.insert((heap_context, obj), id);
        id
    }

    /// CS call site; `container` is recorded on first creation
    pub fn get_cs_call_site(
        &mut self,
        context: ContextId,
        call_site: CallSiteId,
        container: CSMethodId,
    ) -> CSCallSiteId {
        if let Some(&id) = self.call_site_index.get(&(context, call_site)) {
            return id;
        }
        let id = CSCallSiteId::new(self.call_sites.len());
        self.call_sites.push(CSCallSite {
            context,
            call_site,
            container,
        });
        self.call_site_index.insert((context, call_site), id);
        id
    }

    pub fn get_cs_method(&mut self, context: ContextId, method: MethodId) -> CSMethodId {
        if let Some(&id) = self.method_index.get(&(context, method)) {
            return id;
        }
        let id = CSMethodId::new(self.methods.len());
        self.methods.push(CSMethod { context, method });
        self.method_index.insert((context, method), id);
        id
    }

    pub fn get_instance_field(&mut self, base: CSObjId, field: FieldId) -> PointerId {
        if let Some(&id) = self.instance_fields.get(&(base, field)) {
            return id;
        }
        let id = self.new_pointer(Pointer::InstanceField(base, field));
        self.instance_fields.insert((base, field), id);
        id
    }

    pub fn get_array_index(&mut self, array: CSObjId) -> PointerId {
        if let Some(&id) = self.array_indexes.get(&array) {
            return id;
        }
        let id = self.new_pointer(Pointer::ArrayIndex(array));
        self.array_indexes.insert(array, id);
        id
    }

    pub fn get_static_field(&mut self, field: FieldId) -> PointerId {
        if let Some(&id) = self.static_fields.get(&field) {
            return id;
        }
        let id = self.new_pointer(Pointer::StaticField(field));
        self.static_fields.insert(field, id);
        id
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lookups without creation
    // ═══════════════════════════════════════════════════════════════════════

    pub fn find_context(&self, context: &Context) -> Option<ContextId> {
        self.context_index.get(context).copied()
    }

    pub fn find_cs_var(&self, context: ContextId, var: VarId) -> Option<CSVarId> {
        self.var_index.get(&(context, var)).copied()
    }

    pub fn find_instance_field(&self, base: CSObjId, field: FieldId) -> Option<PointerId> {
        self.instance_fields.get(&(base, field)).copied()
    }

    pub fn find_array_index(&self, array: CSObjId) -> Option<PointerId> {
        self.array_indexes.get(&array).copied()
    }

    pub fn find_static_field(&self, field: FieldId) -> Option<PointerId> {
        self.static_fields.get(&field).copied()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Element access
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn cs_var(&self, id: CSVarId) -> &CSVar {
        &self.vars[id.index()]
    }

    #[inline]
    pub fn cs_obj(&self, id: CSObjId) -> &CSObj {
        &self.objs[id.index()]
    }

    #[inline]
    pub fn cs_call_site(&self, id: CSCallSiteId) -> &CSCallSite {
        &self.call_sites[id.index()]
    }

    #[inline]
    pub fn cs_method(&self, id: CSMethodId) -> &CSMethod {
        &self.methods[id.index()]
    }

    #[inline]
    pub fn pointer(&self, id: PointerId) -> Pointer {
        self.pointers[id.index()].pointer
    }

    #[inline]
    pub fn points_to(&self, id: PointerId) -> &PointsToSet {
        &self.pointers[id.index()].pts
    }

    #[inline]
    pub fn points_to_mut(&mut self, id: PointerId) -> &mut PointsToSet {
        &mut self.pointers[id.index()].pts
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Enumeration (reporting only)
    // ═══════════════════════════════════════════════════════════════════════

    pub fn cs_vars(&self) -> impl Iterator<Item = (CSVarId, &CSVar)> + '_ {
        self.vars
            .iter()
            .enumerate()
            .map(|(i, v)| (CSVarId::new(i), v))
    }

    pub fn cs_objs(&self) -> impl Iterator<Item = (CSObjId, &CSObj)> + '_ {
        self.objs
            .iter()
            .enumerate()
            .map(|(i, o)| (CSObjId::new(i), o))
    }

    pub fn cs_call_sites(&self) -> impl Iterator<Item = (CSCallSiteId, &CSCallSite)> + '_ {
        self.call_sites
            .iter()
            .enumerate()
            .map(|(i, c)| (CSCallSiteId::new(i), c))
    }

    pub fn cs_methods(&self) -> impl Iterator<Item = (CSMethodId, &CSMethod)> + '_ {
        self.methods
            .iter()
            .enumerate()
            .map(|(i, m)| (CSMethodId::new(i), m))
    }

    pub fn instance_fields(&self) -> impl Iterator<Item = (CSObjId, FieldId, PointerId)> + '_ {
        self.instance_fields
            .iter()
            .map(|(&(base, field), &ptr)| (base, field, ptr))
    }

    pub fn array_indexes(&self) -> impl Iterator<Item = (CSObjId, PointerId)> + '_ {
        self.array_indexes.iter().map(|(&obj, &ptr)| (obj, ptr))
    }

    pub fn static_fields(&self) -> impl Iterator<Item = (FieldId, PointerId)> + '_ {
        self.static_fields.iter().map(|(&field, &ptr)| (field, ptr))
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn cs_var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn cs_obj_count(&self) -> usize {
        self.objs.len()
    }

    pub fn cs_method_count(&self) -> usize {
        self.methods.len()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Per-method results
    // ═══════════════════════════════════════════════════════════════════════

    /// Attach `value` to `method` under `key`, returning the previous value
    pub fn set_method_result<T: Any + Send + Sync>(
        &mut self,
        method: CSMethodId,
        key: impl Into<String>,
        value: T,
    ) -> Option<MethodResult> {
        self.method_results
            .entry(method)
            .or_default()
            .insert(key.into(), Arc::new(value))
    }

    /// Result stored under `key`; `None` if missing or of another type
    pub fn method_result<T: Any + Send + Sync>(&self, method: CSMethodId, key: &str) -> Option<Arc<T>> {
        self.method_results
            .get(&method)?
            .get(key)?
            .clone()
            .downcast::<T>()
            .ok()
    }

    pub fn has_method_result(&self, method: CSMethodId, key: &str) -> bool {
        self.method_results
            .get(&method)
            .is_some_and(|results| results.contains_key(key))
    }
}
