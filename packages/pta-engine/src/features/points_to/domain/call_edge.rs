//! Call Graph Edges

use crate::features::program::CallKind;
use serde::{Deserialize, Serialize};

/// `call_site → callee` with the dispatch kind of the call site
///
/// Generic over the node types so the same shape serves the
/// context-sensitive graph and its context-erased projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<C, M> {
    pub kind: CallKind,
    pub call_site: C,
    pub callee: M,
}

impl<C, M> Edge<C, M> {
    pub fn new(kind: CallKind, call_site: C, callee: M) -> Self {
        Self {
            kind,
            call_site,
            callee,
        }
    }
}

/// Context-sensitive call edge
pub type CallEdge = Edge<super::CSCallSiteId, super::CSMethodId>;
