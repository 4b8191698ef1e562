//! Pointer Nodes
//!
//! The four pointer kinds share nothing beyond "has a points-to set and
//! out-edges", so they are one sum type. Points-to sets live in the CS
//! manager, out-edges in the pointer flow graph; both are indexed by
//! [`PointerId`](super::PointerId).

use super::cs_element::{CSObjId, CSVarId};
use crate::features::program::FieldId;
use serde::{Deserialize, Serialize};

/// A node of the pointer flow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pointer {
    /// Context-sensitive local variable
    Var(CSVarId),

    /// `o.f`
    InstanceField(CSObjId, FieldId),

    /// `o[*]` (all indexes collapsed)
    ArrayIndex(CSObjId),

    /// `T.f` (context-independent)
    StaticField(FieldId),
}

impl Pointer {
    #[inline]
    pub fn as_var(&self) -> Option<CSVarId> {
        match self {
            Pointer::Var(var) => Some(*var),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Pointer::Var(_) => "var",
            Pointer::InstanceField(..) => "instance-field",
            Pointer::ArrayIndex(_) => "array-index",
            Pointer::StaticField(_) => "static-field",
        }
    }
}
