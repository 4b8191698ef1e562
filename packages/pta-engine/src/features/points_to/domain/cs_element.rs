//! Context-Sensitive Elements
//!
//! Every program entity the solver tracks is qualified by a context. The CS
//! element manager canonicalizes `(context, raw entity)` pairs, so two
//! elements are the same instance exactly when their ids are equal.

use crate::features::context::ContextId;
use crate::features::heap::ObjId;
use crate::features::program::{CallSiteId, MethodId, VarId};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Context-sensitive variable
    CSVarId
}

crate::define_id! {
    /// Context-sensitive (heap-context qualified) object
    CSObjId
}

crate::define_id! {
    /// Context-sensitive call site
    CSCallSiteId
}

crate::define_id! {
    /// Context-sensitive method
    CSMethodId
}

crate::define_id! {
    /// Node of the pointer flow graph
    PointerId
}

/// `(context, variable)`; owns the variable's pointer node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CSVar {
    pub context: ContextId,
    pub var: VarId,
    pub pointer: PointerId,
}

/// `(heap context, object)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CSObj {
    pub context: ContextId,
    pub obj: ObjId,
}

/// `(context, call site)` with the CS method containing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CSCallSite {
    pub context: ContextId,
    pub call_site: CallSiteId,
    pub container: CSMethodId,
}

/// `(context, method)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CSMethod {
    pub context: ContextId,
    pub method: MethodId,
}
