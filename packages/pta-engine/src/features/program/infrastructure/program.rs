//! Frozen Program Representation
//!
//! Immutable view of the analyzed program produced by
//! [`ProgramBuilder::build`](super::builder::ProgramBuilder::build).
//! Answers the queries the solver needs from the frontend:
//! - Subtyping / assignability (precomputed transitive supertype sets)
//! - Method-ref resolution for statically-bound calls
//! - Virtual dispatch: runtime type + subsignature → most-specific override
//! - Per-variable use indexes (field/array accesses and calls on a base variable)
//!
//! The struct holds no interior mutability, so it is `Send + Sync` and can be
//! shared by reference across analyses.

use crate::features::program::domain::{
    AllocSite, AllocSiteId, CallSite, CallSiteId, Field, FieldId, Literal, LiteralId, Method,
    MethodId, MethodRef, TypeId, TypeInfo, TypeKind, Var, VarId,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Field load/store on a base variable: `(other variable, field)`
///
/// For a load `x = base.f` the variable is `x`; for a store `base.f = y` it is `y`.
pub type FieldAccess = (VarId, FieldId);

/// Statements that must be re-processed when a variable's points-to set grows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarUses {
    /// `x = v.f`
    pub instance_loads: Vec<FieldAccess>,

    /// `v.f = y`
    pub instance_stores: Vec<FieldAccess>,

    /// `x = v[*]` (target variables)
    pub array_loads: Vec<VarId>,

    /// `v[*] = y` (stored variables)
    pub array_stores: Vec<VarId>,

    /// Virtual/interface calls with `v` as receiver
    pub invokes: Vec<CallSiteId>,
}

impl VarUses {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instance_loads.is_empty()
            && self.instance_stores.is_empty()
            && self.array_loads.is_empty()
            && self.array_stores.is_empty()
            && self.invokes.is_empty()
    }
}

/// Immutable program representation
#[derive(Debug, Clone)]
pub struct Program {
    pub(super) types: Vec<TypeInfo>,
    pub(super) type_names: FxHashMap<String, TypeId>,
    pub(super) array_types: FxHashMap<TypeId, TypeId>,
    /// Transitive supertypes of each class/interface (including itself)
    pub(super) supertypes: Vec<FxHashSet<TypeId>>,
    pub(super) root_type: Option<TypeId>,

    pub(super) fields: Vec<Field>,
    pub(super) methods: Vec<Method>,
    pub(super) declared_methods: FxHashMap<TypeId, FxHashMap<String, MethodId>>,
    pub(super) vars: Vec<Var>,
    pub(super) var_uses: Vec<VarUses>,
    pub(super) call_sites: Vec<CallSite>,
    pub(super) alloc_sites: Vec<AllocSite>,
    pub(super) literals: Vec<Literal>,

    pub(super) main_methods: Vec<MethodId>,
    pub(super) implicit_entries: Vec<MethodId>,
}

impl Program {
    // ═══════════════════════════════════════════════════════════════════════
    // Entity Access
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn type_info(&self, ty: TypeId) -> &TypeInfo {
        &self.types[ty.index()]
    }

    #[inline]
    pub fn type_name(&self, ty: TypeId) -> &str {
        &self.types[ty.index()].name
    }

    /// Look up a type by its fully-qualified name
    #[inline]
    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Array type with the given element type, if the frontend declared one
    #[inline]
    pub fn array_type_of(&self, element: TypeId) -> Option<TypeId> {
        self.array_types.get(&element).copied()
    }

    /// Hierarchy root class (a class without superclass)
    #[inline]
    pub fn root_type(&self) -> Option<TypeId> {
        self.root_type
    }

    #[inline]
    pub fn field(&self, field: FieldId) -> &Field {
        &self.fields[field.index()]
    }

    #[inline]
    pub fn method(&self, method: MethodId) -> &Method {
        &self.methods[method.index()]
    }

    #[inline]
    pub fn var(&self, var: VarId) -> &Var {
        &self.vars[var.index()]
    }

    #[inline]
    pub fn var_uses(&self, var: VarId) -> &VarUses {
        &self.var_uses[var.index()]
    }

    #[inline]
    pub fn call_site(&self, call_site: CallSiteId) -> &CallSite {
        &self.call_sites[call_site.index()]
    }

    #[inline]
    pub fn alloc_site(&self, site: AllocSiteId) -> &AllocSite {
        &self.alloc_sites[site.index()]
    }

    #[inline]
    pub fn literal(&self, literal: LiteralId) -> &Literal {
        &self.literals[literal.index()]
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// All method ids in declaration order
    pub fn methods(&self) -> impl Iterator<Item = MethodId> + '_ {
        (0..self.methods.len()).map(MethodId::new)
    }

    /// Explicit program entries
    #[inline]
    pub fn main_methods(&self) -> &[MethodId] {
        &self.main_methods
    }

    /// Implicit lifecycle entries (e.g. runtime start-up hooks)
    #[inline]
    pub fn implicit_entries(&self) -> &[MethodId] {
        &self.implicit_entries
    }

    /// `Type.subsignature`, used in logs and error messages
    pub fn method_signature(&self, method: MethodId) -> String {
        let m = self.method(method);
        format!("{}.{}", self.type_name(m.declaring), m.subsignature)
    }

    /// Look up a method by its `Type.subsignature` form
    pub fn method_by_signature(&self, signature: &str) -> Option<MethodId> {
        let paren = signature.find('(')?;
        let dot = signature[..paren].rfind('.')?;
        let ty = self.type_by_name(&signature[..dot])?;
        self.declared_method(ty, &signature[dot + 1..])
    }

    /// `Type.subsignature/name` for a variable
    pub fn var_display(&self, var: VarId) -> String {
        let v = self.var(var);
        format!("{}/{}", self.method_signature(v.method), v.name)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Subtyping
    // ═══════════════════════════════════════════════════════════════════════

    /// Whether a value of type `sub` can be assigned to a location of type `sup`
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        let sub_info = self.type_info(sub);
        let sup_info = self.type_info(sup);
        match (&sub_info.kind, &sup_info.kind) {
            (TypeKind::Null, _) => true,
            (_, TypeKind::Null) => false,
            (TypeKind::Array { element: e1 }, TypeKind::Array { element: e2 }) => {
                self.is_subtype(*e1, *e2)
            }
            (TypeKind::Array { .. }, _) => Some(sup) == self.root_type,
            (_, TypeKind::Array { .. }) => false,
            (TypeKind::Interface { .. }, _) if Some(sup) == self.root_type => true,
            _ => self.supertypes[sub.index()].contains(&sup),
        }
    }

    /// Alias of [`is_subtype`](Self::is_subtype) phrased as an assignment check
    #[inline]
    pub fn can_assign(&self, from: TypeId, to: TypeId) -> bool {
        self.is_subtype(from, to)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Method Resolution
    // ═══════════════════════════════════════════════════════════════════════

    /// Method declared directly in `ty` with the given subsignature
    #[inline]
    pub fn declared_method(&self, ty: TypeId, subsignature: &str) -> Option<MethodId> {
        self.declared_methods
            .get(&ty)
            .and_then(|methods| methods.get(subsignature))
            .copied()
    }

    /// Resolve a statically-bound method reference (static and direct calls)
    ///
    /// Looks in the named type, then its superclasses, then its interfaces.
    pub fn resolve_method(&self, target: &MethodRef) -> Option<MethodId> {
        let mut current = Some(target.declaring);
        while let Some(ty) = current {
            if let Some(m) = self.declared_method(ty, &target.subsignature) {
                return Some(m);
            }
            current = self.type_info(ty).superclass();
        }
        self.find_in_interfaces(target.declaring, &target.subsignature, false)
    }

    /// Virtual dispatch: the most-specific non-abstract method with the given
    /// subsignature visible from `runtime_type`.
    ///
    /// Arrays dispatch through the hierarchy root. Returns `None` when no
    /// override exists (an unresolved call).
    pub fn dispatch(&self, runtime_type: TypeId, subsignature: &str) -> Option<MethodId> {
        let start = if self.type_info(runtime_type).is_array() {
            self.root_type?
        } else {
            runtime_type
        };
        let mut current = Some(start);
        while let Some(ty) = current {
            if let Some(m) = self.declared_method(ty, subsignature) {
                if !self.method(m).is_abstract {
                    return Some(m);
                }
            }
            current = self.type_info(ty).superclass();
        }
        self.find_in_interfaces(start, subsignature, true)
    }

    /// Breadth-first search over the interfaces reachable from `ty`
    fn find_in_interfaces(
        &self,
        ty: TypeId,
        subsignature: &str,
        concrete_only: bool,
    ) -> Option<MethodId> {
        let mut visited: FxHashSet<TypeId> = FxHashSet::default();
        let mut queue: std::collections::VecDeque<TypeId> = std::collections::VecDeque::new();

        // Seed with the interfaces of the whole class chain
        let mut current = Some(ty);
        while let Some(t) = current {
            let info = self.type_info(t);
            match &info.kind {
                TypeKind::Class { interfaces, .. } => queue.extend(interfaces.iter().copied()),
                TypeKind::Interface { .. } => queue.push_back(t),
                _ => {}
            }
            current = info.superclass();
        }

        while let Some(iface) = queue.pop_front() {
            if !visited.insert(iface) {
                continue;
            }
            if let Some(m) = self.declared_method(iface, subsignature) {
                if !concrete_only || !self.method(m).is_abstract {
                    return Some(m);
                }
            }
            queue.extend(self.type_info(iface).direct_supertypes());
        }
        None
    }
}
