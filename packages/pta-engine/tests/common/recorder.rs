//! Plugin that records every hook invocation

use parking_lot::Mutex;
use pta_engine::features::points_to::{CSMethodId, CSObjId, CSVarId, CallEdge, PointsToSet};
use pta_engine::features::program::{CallSiteId, MethodId, TypeId};
use pta_engine::{ContextId, Plugin, Result, Solver};
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct Events {
    pub started: usize,
    pub finished: usize,
    pub new_methods: Vec<MethodId>,
    pub new_cs_methods: Vec<CSMethodId>,
    /// Triggered types once each reachable CS method was scanned
    pub triggered_on_reach: Vec<(MethodId, Vec<TypeId>)>,
    pub deltas: Vec<(CSVarId, PointsToSet)>,
    pub call_edges: Vec<CallEdge>,
    pub unresolved: Vec<(CSObjId, ContextId, CallSiteId)>,
}

impl Events {
    /// How often `method` became reachable in any context
    pub fn reach_count(&self, method: MethodId) -> usize {
        self.triggered_on_reach
            .iter()
            .filter(|(m, _)| *m == method)
            .count()
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    events: Arc<Mutex<Events>>,
}

impl Recorder {
    pub fn new() -> (Self, Arc<Mutex<Events>>) {
        let recorder = Self::default();
        let events = Arc::clone(&recorder.events);
        (recorder, events)
    }
}

impl Plugin for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn on_start(&mut self, _solver: &mut Solver<'_>) -> Result<()> {
        self.events.lock().started += 1;
        Ok(())
    }

    fn on_new_method(&mut self, _solver: &mut Solver<'_>, method: MethodId) -> Result<()> {
        self.events.lock().new_methods.push(method);
        Ok(())
    }

    fn on_new_cs_method(&mut self, solver: &mut Solver<'_>, method: CSMethodId) -> Result<()> {
        let raw = solver.cs_manager().cs_method(method).method;
        let triggered = solver.class_initializer().triggered_types().to_vec();
        let mut events = self.events.lock();
        events.new_cs_methods.push(method);
        events.triggered_on_reach.push((raw, triggered));
        Ok(())
    }

    fn on_new_points_to_set(
        &mut self,
        _solver: &mut Solver<'_>,
        var: CSVarId,
        delta: &PointsToSet,
    ) -> Result<()> {
        self.events.lock().deltas.push((var, delta.clone()));
        Ok(())
    }

    fn on_new_call_edge(&mut self, _solver: &mut Solver<'_>, edge: &CallEdge) -> Result<()> {
        self.events.lock().call_edges.push(*edge);
        Ok(())
    }

    fn on_unresolved_call(
        &mut self,
        _solver: &mut Solver<'_>,
        receiver: CSObjId,
        context: ContextId,
        call_site: CallSiteId,
    ) -> Result<()> {
        self.events
            .lock()
            .unresolved
            .push((receiver, context, call_site));
        Ok(())
    }

    fn on_finish(&mut self, _solver: &mut Solver<'_>) -> Result<()> {
        self.events.lock().finished += 1;
        Ok(())
    }
}
