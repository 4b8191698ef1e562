//! Ports (Extension Points) for the Points-to Solver
//!
//! Plugins observe the fixpoint at fixed points and may feed more work into
//! the same queues through the solver's public feed API:
//! `add_var_points_to`, `add_points_to`, `add_pfg_edge`, `add_call_edge`,
//! `add_cs_method`, `initialize_class`. The feed API only enqueues; it never
//! re-enters the solver loop.
//!
//! Every hook defaults to a no-op. A hook error aborts the run.
//!
//! # Example
//! ```ignore
//! struct EdgeCounter(usize);
//!
//! impl Plugin for EdgeCounter {
//!     fn name(&self) -> &str { "edge-counter" }
//!
//!     fn on_new_call_edge(&mut self, _solver: &mut Solver<'_>, _edge: &CallEdge) -> Result<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//! ```

use crate::errors::Result;
use crate::features::context::ContextId;
use crate::features::points_to::domain::{CSMethodId, CSObjId, CSVarId, CallEdge, PointsToSet};
use crate::features::points_to::infrastructure::Solver;
use crate::features::program::{CallSiteId, MethodId};

/// Solver plugin
pub trait Plugin {
    /// Name used in error reports
    fn name(&self) -> &str;

    /// Before entry methods are seeded
    fn on_start(&mut self, _solver: &mut Solver<'_>) -> Result<()> {
        Ok(())
    }

    /// A raw method became reachable for the first time (in any context)
    fn on_new_method(&mut self, _solver: &mut Solver<'_>, _method: MethodId) -> Result<()> {
        Ok(())
    }

    /// A context-sensitive method became reachable
    ///
    /// Fires after the method's statements have been scanned, so its local
    /// CS variables and call sites already exist.
    fn on_new_cs_method(&mut self, _solver: &mut Solver<'_>, _method: CSMethodId) -> Result<()> {
        Ok(())
    }

    /// A variable's points-to set grew by `delta`
    fn on_new_points_to_set(
        &mut self,
        _solver: &mut Solver<'_>,
        _var: CSVarId,
        _delta: &PointsToSet,
    ) -> Result<()> {
        Ok(())
    }

    /// A call edge was added to the call graph
    fn on_new_call_edge(&mut self, _solver: &mut Solver<'_>, _edge: &CallEdge) -> Result<()> {
        Ok(())
    }

    /// Dispatch found no callee for `receiver` at `call_site`
    fn on_unresolved_call(
        &mut self,
        _solver: &mut Solver<'_>,
        _receiver: CSObjId,
        _context: ContextId,
        _call_site: CallSiteId,
    ) -> Result<()> {
        Ok(())
    }

    /// The work list is empty; work fed here is still processed
    fn on_finish(&mut self, _solver: &mut Solver<'_>) -> Result<()> {
        Ok(())
    }
}
