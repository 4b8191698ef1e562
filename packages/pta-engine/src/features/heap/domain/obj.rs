//! Abstract Heap Object
//!
//! Concrete heap addresses are abstracted to a finite set of objects:
//! - **New**: one object per allocation site (`new T` at a given statement)
//! - **Merged**: one object standing for every allocation of a type
//! - **Constant**: one object per reference literal
//! - **Mock**: synthesized objects with no allocation statement (inner arrays
//!   of `new T[n][m]`, entry-method arguments)
//!
//! Objects are immutable once created; the heap model hands out [`ObjId`]s.

use crate::features::program::{AllocSiteId, LiteralId, MethodId, Program, TypeId};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Abstract object identifier
    ObjId
}

/// What an abstract object stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjKind {
    /// Allocation-site object
    New(AllocSiteId),

    /// All allocations of one type
    Merged(TypeId),

    /// All constants of one type (merged string constants)
    MergedConstants(TypeId),

    /// Reference literal
    Constant(LiteralId),

    /// Synthesized object, identified by its description
    Mock(String),
}

/// An abstract heap object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obj {
    pub kind: ObjKind,

    /// Runtime type
    pub ty: TypeId,

    /// Method containing the allocation, if any
    pub container: Option<MethodId>,

    /// Type used as the object's discriminant by type-sensitive selectors:
    /// the declaring type of the allocating method, or the object's own type
    /// when there is no allocating method
    pub container_type: TypeId,
}

impl Obj {
    /// Whether this is a plain allocation-site object
    #[inline]
    pub fn is_allocation(&self) -> bool {
        matches!(self.kind, ObjKind::New(_))
    }

    #[inline]
    pub fn alloc_site(&self) -> Option<AllocSiteId> {
        match self.kind {
            ObjKind::New(site) => Some(site),
            _ => None,
        }
    }

    /// Human-readable description, e.g. `NewObj{Main.main()[2]:A}`
    pub fn describe(&self, program: &Program) -> String {
        let ty = program.type_name(self.ty);
        match &self.kind {
            ObjKind::New(site) => {
                let container = self
                    .container
                    .map(|m| program.method_signature(m))
                    .unwrap_or_default();
                format!("NewObj{{{}[{}]:{}}}", container, site.0, ty)
            }
            ObjKind::Merged(_) => format!("MergedObj{{<Merged {}>}}", ty),
            ObjKind::MergedConstants(_) => format!("MergedObj{{<Merged {} constants>}}", ty),
            ObjKind::Constant(literal) => {
                format!("ConstantObj{{{}: {:?}}}", ty, program.literal(*literal).value)
            }
            ObjKind::Mock(description) => format!("MockObj{{{}:{}}}", description, ty),
        }
    }
}
