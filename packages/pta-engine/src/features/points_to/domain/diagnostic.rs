//! Non-fatal Analysis Diagnostics

use crate::features::context::ContextId;
use crate::features::program::{CallSiteId, MethodRef, TypeId};
use serde::{Deserialize, Serialize};

/// A recorded, non-fatal analysis event
///
/// Each variant means one call edge was omitted; the run continued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnostic {
    /// No override of the target exists for a receiver's runtime type
    UnresolvedDispatch {
        call_site: CallSiteId,
        context: ContextId,
        receiver_type: TypeId,
        subsignature: String,
    },

    /// The target of a static or direct call does not resolve
    UnresolvedTarget {
        call_site: CallSiteId,
        target: MethodRef,
    },
}

impl Diagnostic {
    #[inline]
    pub fn call_site(&self) -> CallSiteId {
        match self {
            Diagnostic::UnresolvedDispatch { call_site, .. }
            | Diagnostic::UnresolvedTarget { call_site, .. } => *call_site,
        }
    }
}
