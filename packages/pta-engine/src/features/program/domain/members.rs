//! Class Members and Variables
//!
//! Fields, methods and method-local variables as delivered by the frontend.
//! Only reference-typed variables are modeled: the frontend drops primitive
//! flows before handing a method body to the solver.

use super::stmt::Stmt;
use super::types::TypeId;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Field identifier
    FieldId
}

crate::define_id! {
    /// Method identifier
    MethodId
}

crate::define_id! {
    /// Method-local variable identifier
    VarId
}

/// A field declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub declaring: TypeId,
    pub is_static: bool,
    pub ty: TypeId,
}

/// Symbolic reference to a method, as written at a call site
///
/// `subsignature` is the name plus parameter descriptor (e.g. `foo(int)`),
/// which is what virtual dispatch matches on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    /// Type named at the call site
    pub declaring: TypeId,

    /// Name and parameter descriptor
    pub subsignature: String,
}

impl MethodRef {
    pub fn new(declaring: TypeId, subsignature: impl Into<String>) -> Self {
        Self {
            declaring,
            subsignature: subsignature.into(),
        }
    }
}

/// A method with its body in statement form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,

    /// Name and parameter descriptor used for dispatch
    pub subsignature: String,

    pub declaring: TypeId,
    pub is_static: bool,
    pub is_abstract: bool,

    /// Receiver parameter (`None` for static methods)
    pub this: Option<VarId>,

    /// Formal parameters; `None` marks a non-reference parameter
    pub params: Vec<Option<VarId>>,

    /// Variables returned by the method's return statements
    pub return_vars: Vec<VarId>,

    /// Pointer-relevant statements in program order
    pub stmts: Vec<Stmt>,
}

impl Method {
    /// Formal parameter at `index`, if it is a reference variable
    #[inline]
    pub fn param(&self, index: usize) -> Option<VarId> {
        self.params.get(index).copied().flatten()
    }

    #[inline]
    pub fn short_name(&self) -> &str {
        &self.subsignature
    }
}

/// A method-local variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Var {
    pub name: String,
    pub method: MethodId,
    pub ty: TypeId,
}
