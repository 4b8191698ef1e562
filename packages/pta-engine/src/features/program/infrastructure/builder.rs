//! Program Builder
//!
//! Mutable collector for the frontend. Everything is set through explicit
//! calls and frozen by [`ProgramBuilder::build`], which validates the frontend
//! contract and precomputes the indexes the solver relies on:
//! - transitive supertype sets
//! - per-type declared-method tables
//! - per-variable use lists (`VarUses`)
//!
//! Once built, a [`Program`] is never mutated again.

use super::program::{Program, VarUses};
use crate::errors::{PtaError, Result};
use crate::features::program::domain::{
    AllocSite, AllocSiteId, CallKind, CallSite, CallSiteId, Field, FieldId, Literal, LiteralId,
    Method, MethodId, MethodRef, Stmt, TypeId, TypeInfo, TypeKind, Var, VarId,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Builder for [`Program`]
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    types: Vec<TypeInfo>,
    type_names: FxHashMap<String, TypeId>,
    array_types: FxHashMap<TypeId, TypeId>,
    null_type: Option<TypeId>,
    fields: Vec<Field>,
    methods: Vec<Method>,
    vars: Vec<Var>,
    call_sites: Vec<CallSite>,
    alloc_sites: Vec<AllocSite>,
    literals: Vec<Literal>,
    literal_index: FxHashMap<Literal, LiteralId>,
    main_methods: Vec<MethodId>,
    implicit_entries: Vec<MethodId>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Types
    // ═══════════════════════════════════════════════════════════════════════

    fn add_type(&mut self, name: impl Into<String>, kind: TypeKind) -> TypeId {
        let name = name.into();
        let id = TypeId::new(self.types.len());
        self.type_names.insert(name.clone(), id);
        self.types.push(TypeInfo { name, kind });
        id
    }

    /// Declare a class
    pub fn add_class(&mut self, name: impl Into<String>, superclass: Option<TypeId>) -> TypeId {
        self.add_type(
            name,
            TypeKind::Class {
                superclass,
                interfaces: Vec::new(),
                initializer: None,
            },
        )
    }

    /// Declare an interface
    pub fn add_interface(
        &mut self,
        name: impl Into<String>,
        superinterfaces: Vec<TypeId>,
    ) -> TypeId {
        self.add_type(name, TypeKind::Interface { superinterfaces })
    }

    /// Record that `class` implements `iface`
    pub fn add_implements(&mut self, class: TypeId, iface: TypeId) {
        if let TypeKind::Class { interfaces, .. } = &mut self.types[class.index()].kind {
            interfaces.push(iface);
        }
    }

    /// Array type of `element` (interned)
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        if let Some(&existing) = self.array_types.get(&element) {
            return existing;
        }
        let name = format!("{}[]", self.types[element.index()].name);
        let id = self.add_type(name, TypeKind::Array { element });
        self.array_types.insert(element, id);
        id
    }

    /// The null type (interned)
    pub fn null_type(&mut self) -> TypeId {
        if let Some(id) = self.null_type {
            return id;
        }
        let id = self.add_type("null", TypeKind::Null);
        self.null_type = Some(id);
        id
    }

    /// Look up a previously declared type by name
    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Members
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_field(
        &mut self,
        declaring: TypeId,
        name: impl Into<String>,
        ty: TypeId,
        is_static: bool,
    ) -> FieldId {
        let id = FieldId::new(self.fields.len());
        self.fields.push(Field {
            name: name.into(),
            declaring,
            is_static,
            ty,
        });
        id
    }

    /// Declare a method; instance methods get a `this` variable automatically
    pub fn add_method(
        &mut self,
        declaring: TypeId,
        name: impl Into<String>,
        subsignature: impl Into<String>,
        is_static: bool,
    ) -> MethodId {
        let id = MethodId::new(self.methods.len());
        self.methods.push(Method {
            name: name.into(),
            subsignature: subsignature.into(),
            declaring,
            is_static,
            is_abstract: false,
            this: None,
            params: Vec::new(),
            return_vars: Vec::new(),
            stmts: Vec::new(),
        });
        if !is_static {
            let this = self.add_var(id, "this", declaring);
            self.methods[id.index()].this = Some(this);
        }
        id
    }

    /// Declare the static initializer of `class`
    pub fn add_initializer(&mut self, class: TypeId) -> MethodId {
        let method = self.add_method(class, "<clinit>", "<clinit>()", true);
        if let TypeKind::Class { initializer, .. } = &mut self.types[class.index()].kind {
            *initializer = Some(method);
        }
        method
    }

    pub fn set_abstract(&mut self, method: MethodId) {
        self.methods[method.index()].is_abstract = true;
    }

    /// `this` of an instance method
    pub fn this_of(&self, method: MethodId) -> Option<VarId> {
        self.methods.get(method.index()).and_then(|m| m.this)
    }

    pub fn add_var(&mut self, method: MethodId, name: impl Into<String>, ty: TypeId) -> VarId {
        let id = VarId::new(self.vars.len());
        self.vars.push(Var {
            name: name.into(),
            method,
            ty,
        });
        id
    }

    /// Append a reference parameter
    pub fn add_param(&mut self, method: MethodId, name: impl Into<String>, ty: TypeId) -> VarId {
        let var = self.add_var(method, name, ty);
        self.methods[method.index()].params.push(Some(var));
        var
    }

    /// Append a non-reference parameter (keeps argument positions aligned)
    pub fn add_primitive_param(&mut self, method: MethodId) {
        self.methods[method.index()].params.push(None);
    }

    pub fn add_return(&mut self, method: MethodId, var: VarId) {
        self.methods[method.index()].return_vars.push(var);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn push_stmt(&mut self, method: MethodId, stmt: Stmt) {
        self.methods[method.index()].stmts.push(stmt);
    }

    /// `lhs = new ty`
    pub fn new_obj(&mut self, method: MethodId, lhs: VarId, ty: TypeId) -> AllocSiteId {
        self.new_array(method, lhs, ty, 0)
    }

    /// `lhs = new ty` with `dimensions` array lengths (`new T[2][3]` has two)
    pub fn new_array(
        &mut self,
        method: MethodId,
        lhs: VarId,
        ty: TypeId,
        dimensions: u32,
    ) -> AllocSiteId {
        let site = AllocSiteId::new(self.alloc_sites.len());
        self.alloc_sites.push(AllocSite {
            container: method,
            ty,
            dimensions,
            line: None,
        });
        self.push_stmt(method, Stmt::New { lhs, site });
        site
    }

    /// `lhs = "value"` (literals with equal type and value are shared)
    pub fn assign_literal(
        &mut self,
        method: MethodId,
        lhs: VarId,
        ty: TypeId,
        value: impl Into<String>,
    ) -> LiteralId {
        let literal = Literal {
            ty,
            value: value.into(),
        };
        let id = match self.literal_index.get(&literal) {
            Some(&id) => id,
            None => {
                let id = LiteralId::new(self.literals.len());
                self.literals.push(literal.clone());
                self.literal_index.insert(literal, id);
                id
            }
        };
        self.push_stmt(method, Stmt::AssignLiteral { lhs, literal: id });
        id
    }

    pub fn copy(&mut self, method: MethodId, lhs: VarId, rhs: VarId) {
        self.push_stmt(method, Stmt::Copy { lhs, rhs });
    }

    pub fn cast(&mut self, method: MethodId, lhs: VarId, rhs: VarId, ty: TypeId) {
        self.push_stmt(method, Stmt::Cast { lhs, rhs, ty });
    }

    pub fn load_field(&mut self, method: MethodId, lhs: VarId, base: VarId, field: FieldId) {
        self.push_stmt(method, Stmt::LoadField { lhs, base, field });
    }

    pub fn store_field(&mut self, method: MethodId, base: VarId, field: FieldId, rhs: VarId) {
        self.push_stmt(method, Stmt::StoreField { base, field, rhs });
    }

    pub fn load_static(&mut self, method: MethodId, lhs: VarId, field: FieldId) {
        self.push_stmt(method, Stmt::LoadStatic { lhs, field });
    }

    pub fn store_static(&mut self, method: MethodId, field: FieldId, rhs: VarId) {
        self.push_stmt(method, Stmt::StoreStatic { field, rhs });
    }

    pub fn load_array(&mut self, method: MethodId, lhs: VarId, base: VarId) {
        self.push_stmt(method, Stmt::LoadArray { lhs, base });
    }

    pub fn store_array(&mut self, method: MethodId, base: VarId, rhs: VarId) {
        self.push_stmt(method, Stmt::StoreArray { base, rhs });
    }

    /// Call statement; `args` are reference arguments in parameter order
    pub fn invoke(
        &mut self,
        method: MethodId,
        kind: CallKind,
        target: MethodRef,
        receiver: Option<VarId>,
        args: Vec<VarId>,
        result: Option<VarId>,
    ) -> CallSiteId {
        self.invoke_with_args(
            method,
            kind,
            target,
            receiver,
            args.into_iter().map(Some).collect(),
            result,
        )
    }

    /// Call statement with explicit non-reference argument slots
    pub fn invoke_with_args(
        &mut self,
        method: MethodId,
        kind: CallKind,
        target: MethodRef,
        receiver: Option<VarId>,
        args: Vec<Option<VarId>>,
        result: Option<VarId>,
    ) -> CallSiteId {
        let id = CallSiteId::new(self.call_sites.len());
        self.call_sites.push(CallSite {
            container: method,
            kind,
            target,
            receiver,
            args,
            result,
            line: None,
        });
        self.push_stmt(method, Stmt::Invoke(id));
        id
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Entries
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_main(&mut self, method: MethodId) {
        self.main_methods.push(method);
    }

    pub fn add_implicit_entry(&mut self, method: MethodId) {
        self.implicit_entries.push(method);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Freeze
    // ═══════════════════════════════════════════════════════════════════════

    /// Validate and freeze the program
    pub fn build(self) -> Result<Program> {
        self.validate()?;

        let supertypes = self.compute_supertypes();
        let root_type = self.find_root();

        let mut declared_methods: FxHashMap<TypeId, FxHashMap<String, MethodId>> =
            FxHashMap::default();
        for (index, method) in self.methods.iter().enumerate() {
            if method.name == "<clinit>" {
                continue;
            }
            declared_methods
                .entry(method.declaring)
                .or_default()
                .insert(method.subsignature.clone(), MethodId::new(index));
        }

        let var_uses = self.compute_var_uses();

        Ok(Program {
            types: self.types,
            type_names: self.type_names,
            array_types: self.array_types,
            supertypes,
            root_type,
            fields: self.fields,
            methods: self.methods,
            declared_methods,
            vars: self.vars,
            var_uses,
            call_sites: self.call_sites,
            alloc_sites: self.alloc_sites,
            literals: self.literals,
            main_methods: self.main_methods,
            implicit_entries: self.implicit_entries,
        })
    }

    fn validate(&self) -> Result<()> {
        let type_count = self.types.len();
        for info in &self.types {
            for sup in info.direct_supertypes() {
                if sup.index() >= type_count {
                    return Err(PtaError::inconsistent(format!(
                        "type {} refers to undeclared supertype {}",
                        info.name, sup
                    )));
                }
            }
        }

        for (index, site) in self.call_sites.iter().enumerate() {
            let id = CallSiteId::new(index);
            let method = &self.methods[site.container.index()];
            let where_ = format!("{}.{}", self.types[method.declaring.index()].name, method.subsignature);
            match site.kind {
                CallKind::Static if site.receiver.is_some() => {
                    return Err(PtaError::inconsistent(format!(
                        "static call site {} in {} has a receiver",
                        id, where_
                    )));
                }
                CallKind::Special | CallKind::Virtual | CallKind::Interface
                    if site.receiver.is_none() =>
                {
                    return Err(PtaError::inconsistent(format!(
                        "{} call site {} in {} has no receiver",
                        site.kind, id, where_
                    )));
                }
                CallKind::Other => {
                    return Err(PtaError::inconsistent(format!(
                        "call site {} in {} uses the plugin-only kind other",
                        id, where_
                    )));
                }
                _ => {}
            }
        }

        for &main in &self.main_methods {
            if !self.methods[main.index()].is_static {
                let method = &self.methods[main.index()];
                return Err(PtaError::inconsistent(format!(
                    "main method {}.{} is not static",
                    self.types[method.declaring.index()].name,
                    method.subsignature
                )));
            }
        }
        Ok(())
    }

    /// Transitive closure of the supertype relation for classes and interfaces
    fn compute_supertypes(&self) -> Vec<FxHashSet<TypeId>> {
        let mut result: Vec<FxHashSet<TypeId>> = Vec::with_capacity(self.types.len());
        for index in 0..self.types.len() {
            let mut seen: FxHashSet<TypeId> = FxHashSet::default();
            let info = &self.types[index];
            if info.is_class() || info.is_interface() {
                let mut stack = vec![TypeId::new(index)];
                while let Some(ty) = stack.pop() {
                    if seen.insert(ty) {
                        stack.extend(self.types[ty.index()].direct_supertypes());
                    }
                }
            }
            result.push(seen);
        }
        result
    }

    /// The unique class without a superclass, if there is exactly one
    fn find_root(&self) -> Option<TypeId> {
        let mut roots = self
            .types
            .iter()
            .enumerate()
            .filter(|(_, info)| info.is_class() && info.superclass().is_none())
            .map(|(index, _)| TypeId::new(index));
        let root = roots.next()?;
        if roots.next().is_some() {
            return None;
        }
        Some(root)
    }

    fn compute_var_uses(&self) -> Vec<VarUses> {
        let mut uses = vec![VarUses::default(); self.vars.len()];
        for method in &self.methods {
            for stmt in &method.stmts {
                match *stmt {
                    Stmt::LoadField { lhs, base, field } => {
                        uses[base.index()].instance_loads.push((lhs, field));
                    }
                    Stmt::StoreField { base, field, rhs } => {
                        uses[base.index()].instance_stores.push((rhs, field));
                    }
                    Stmt::LoadArray { lhs, base } => {
                        uses[base.index()].array_loads.push(lhs);
                    }
                    Stmt::StoreArray { base, rhs } => {
                        uses[base.index()].array_stores.push(rhs);
                    }
                    Stmt::Invoke(cs) => {
                        let site = &self.call_sites[cs.index()];
                        if site.kind.is_receiver_driven() {
                            if let Some(recv) = site.receiver {
                                uses[recv.index()].invokes.push(cs);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        uses
    }
}
