//! Analysis Context
//!
//! A context is an immutable, bounded sequence of discriminants that tells
//! apart several analysis instances of the same method or object:
//! - **CallSite**: k-call-site sensitivity (k-CFA)
//! - **Obj**: object sensitivity (receiver allocation)
//! - **Type**: type sensitivity (class containing the receiver's allocation)
//!
//! The empty context is the default and the only context of a
//! context-insensitive run. Contexts are interned by the CS element manager
//! into [`ContextId`]s; `ContextId(0)` is always the empty context.
//!
//! # References
//! - Milanova et al. "Parameterized Object Sensitivity" (TOSEM 2005)
//! - Smaragdakis et al. "Pick Your Contexts Well" (POPL 2011)

use crate::features::heap::ObjId;
use crate::features::program::{CallSiteId, TypeId};
use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Interned context identifier
    ContextId
}

impl ContextId {
    /// The empty context (interned first by every manager)
    pub const EMPTY: ContextId = ContextId(0);
}

/// One discriminant of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContextElement {
    CallSite(CallSiteId),
    Obj(ObjId),
    Type(TypeId),
}

impl fmt::Display for ContextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextElement::CallSite(cs) => write!(f, "cs{}", cs.0),
            ContextElement::Obj(obj) => write!(f, "o{}", obj.0),
            ContextElement::Type(ty) => write!(f, "t{}", ty.0),
        }
    }
}

/// Immutable context tuple
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    elements: Vec<ContextElement>,
}

impl Context {
    /// The empty context
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<ContextElement>) -> Self {
        Self { elements }
    }

    /// Append `element` and keep only the last `k` elements (k-limiting)
    pub fn append(&self, element: ContextElement, k: usize) -> Self {
        if k == 0 {
            return Self::empty();
        }
        let keep = self.elements.len().min(k - 1);
        let mut elements = Vec::with_capacity(keep + 1);
        elements.extend_from_slice(&self.elements[self.elements.len() - keep..]);
        elements.push(element);
        Self { elements }
    }

    /// The last `k` elements
    pub fn last(&self, k: usize) -> Self {
        let keep = self.elements.len().min(k);
        Self {
            elements: self.elements[self.elements.len() - keep..].to_vec(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn elements(&self) -> &[ContextElement] {
        &self.elements
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}
