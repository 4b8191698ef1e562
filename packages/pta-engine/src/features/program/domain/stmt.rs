//! Pointer-Relevant Statements
//!
//! The fixed statement vocabulary the solver understands:
//! - `v = new T` / `v = "literal"`  → seed facts
//! - `v = w` / `v = (T) w`         → local flow (cast carries a type filter)
//! - `v = w.f` / `w.f = v`         → instance field load/store
//! - `v = T.f` / `T.f = v`         → static field load/store
//! - `v = a[i]` / `a[i] = v`       → array load/store (index-insensitive)
//! - calls                          → call sites, resolved statically or by receiver

use super::members::{FieldId, MethodId, MethodRef, VarId};
use super::types::TypeId;
use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Call site identifier
    CallSiteId
}

crate::define_id! {
    /// Allocation site identifier
    AllocSiteId
}

crate::define_id! {
    /// Reference literal identifier
    LiteralId
}

/// Dispatch kind of a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallKind {
    /// Static method call, no receiver
    Static,

    /// Statically-bound instance call (constructor, private or super call)
    Special,

    /// Virtual call through a class type
    Virtual,

    /// Interface call
    Interface,

    /// Dynamically-linked call site; not handled by the core solver
    Dynamic,

    /// Edge injected by a plugin (reflection, lambdas); arguments and
    /// returns are wired by the plugin itself
    Other,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::Static => "static",
            CallKind::Special => "direct",
            CallKind::Virtual => "virtual",
            CallKind::Interface => "interface",
            CallKind::Dynamic => "dynamic",
            CallKind::Other => "other",
        }
    }

    /// Whether the callee is chosen by the receiver object's runtime type
    #[inline]
    pub fn is_receiver_dispatched(&self) -> bool {
        matches!(self, CallKind::Virtual | CallKind::Interface)
    }

    /// Whether the call runs once per receiver object, with `this` bound to it
    #[inline]
    pub fn is_receiver_driven(&self) -> bool {
        matches!(self, CallKind::Special | CallKind::Virtual | CallKind::Interface)
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    /// Method containing the call
    pub container: MethodId,

    pub kind: CallKind,

    /// Symbolic target resolved by the program model
    pub target: MethodRef,

    /// Receiver variable for instance calls
    pub receiver: Option<VarId>,

    /// Actual arguments; `None` marks a non-reference argument
    pub args: Vec<Option<VarId>>,

    /// Variable receiving the call result
    pub result: Option<VarId>,

    /// Source line, if known (diagnostics only)
    pub line: Option<u32>,
}

/// An allocation site `new T` (or `new T[n]...[m]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocSite {
    /// Method containing the allocation
    pub container: MethodId,

    /// Allocated type
    pub ty: TypeId,

    /// Number of dimension lengths of an array allocation (0 for objects).
    /// `new T[2][3]` has two; its inner arrays get mock objects.
    pub dimensions: u32,

    pub line: Option<u32>,
}

/// A reference literal (string or class constant)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub ty: TypeId,
    pub value: String,
}

/// Pointer-relevant statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stmt {
    /// `lhs = new T`
    New { lhs: VarId, site: AllocSiteId },

    /// `lhs = literal`
    AssignLiteral { lhs: VarId, literal: LiteralId },

    /// `lhs = rhs`
    Copy { lhs: VarId, rhs: VarId },

    /// `lhs = (ty) rhs`
    Cast { lhs: VarId, rhs: VarId, ty: TypeId },

    /// `lhs = base.field`
    LoadField {
        lhs: VarId,
        base: VarId,
        field: FieldId,
    },

    /// `base.field = rhs`
    StoreField {
        base: VarId,
        field: FieldId,
        rhs: VarId,
    },

    /// `lhs = T.field`
    LoadStatic { lhs: VarId, field: FieldId },

    /// `T.field = rhs`
    StoreStatic { field: FieldId, rhs: VarId },

    /// `lhs = base[*]`
    LoadArray { lhs: VarId, base: VarId },

    /// `base[*] = rhs`
    StoreArray { base: VarId, rhs: VarId },

    /// Call statement
    Invoke(CallSiteId),
}

impl Stmt {
    /// Statement kind name (for diagnostics)
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::New { .. } => "new",
            Stmt::AssignLiteral { .. } => "assign-literal",
            Stmt::Copy { .. } => "copy",
            Stmt::Cast { .. } => "cast",
            Stmt::LoadField { .. } => "load-field",
            Stmt::StoreField { .. } => "store-field",
            Stmt::LoadStatic { .. } => "load-static",
            Stmt::StoreStatic { .. } => "store-static",
            Stmt::LoadArray { .. } => "load-array",
            Stmt::StoreArray { .. } => "store-array",
            Stmt::Invoke(_) => "invoke",
        }
    }

    /// Call site of an invoke statement
    #[inline]
    pub fn as_invoke(&self) -> Option<CallSiteId> {
        match self {
            Stmt::Invoke(cs) => Some(*cs),
            _ => None,
        }
    }
}
