//! Profiler Plugin
//!
//! Counts, per raw method, how many contexts it was analyzed under and how
//! many call edges enter and leave it. Context blow-up shows up as a few
//! methods with many contexts; the top entries are logged on finish.
//!
//! The report is shared through a [`ProfileHandle`] so it can be read after
//! the plugin has been moved into the analysis.

use crate::errors::Result;
use crate::features::points_to::domain::{CSMethodId, CallEdge};
use crate::features::points_to::infrastructure::Solver;
use crate::features::points_to::ports::Plugin;
use crate::features::program::MethodId;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodProfile {
    pub signature: String,
    pub contexts: usize,
    pub call_edges_in: usize,
    pub call_edges_out: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileReport {
    /// Sorted by context count, then signature
    pub methods: Vec<MethodProfile>,
    pub cs_methods: usize,
    pub call_edges: usize,
}

/// Read access to a [`Profiler`]'s report
#[derive(Debug, Clone)]
pub struct ProfileHandle(Arc<Mutex<ProfileReport>>);

impl ProfileHandle {
    /// Snapshot of the report (empty until the analysis finishes)
    pub fn report(&self) -> ProfileReport {
        self.0.lock().clone()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    contexts: usize,
    edges_in: usize,
    edges_out: usize,
}

#[derive(Debug)]
pub struct Profiler {
    top_n: usize,
    counts: FxHashMap<MethodId, Counts>,
    report: Arc<Mutex<ProfileReport>>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Profiler {
    /// Profiler that logs the `top_n` methods with the most contexts
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            counts: FxHashMap::default(),
            report: Arc::new(Mutex::new(ProfileReport::default())),
        }
    }

    pub fn handle(&self) -> ProfileHandle {
        ProfileHandle(Arc::clone(&self.report))
    }
}

impl Plugin for Profiler {
    fn name(&self) -> &str {
        "profiler"
    }

    fn on_new_cs_method(&mut self, solver: &mut Solver<'_>, method: CSMethodId) -> Result<()> {
        let raw = solver.cs_manager().cs_method(method).method;
        self.counts.entry(raw).or_default().contexts += 1;
        Ok(())
    }

    fn on_new_call_edge(&mut self, solver: &mut Solver<'_>, edge: &CallEdge) -> Result<()> {
        let cs = solver.cs_manager();
        let caller = cs.cs_method(cs.cs_call_site(edge.call_site).container).method;
        let callee = cs.cs_method(edge.callee).method;
        self.counts.entry(caller).or_default().edges_out += 1;
        self.counts.entry(callee).or_default().edges_in += 1;
        Ok(())
    }

    fn on_finish(&mut self, solver: &mut Solver<'_>) -> Result<()> {
        let program = solver.program();
        let mut methods: Vec<MethodProfile> = self
            .counts
            .iter()
            .map(|(&method, counts)| MethodProfile {
                signature: program.method_signature(method),
                contexts: counts.contexts,
                call_edges_in: counts.edges_in,
                call_edges_out: counts.edges_out,
            })
            .collect();
        methods.sort_by(|a, b| {
            b.contexts
                .cmp(&a.contexts)
                .then_with(|| a.signature.cmp(&b.signature))
        });

        for profile in methods.iter().take(self.top_n) {
            info!(
                method = %profile.signature,
                contexts = profile.contexts,
                edges_in = profile.call_edges_in,
                edges_out = profile.call_edges_out,
                "profile"
            );
        }

        let mut report = self.report.lock();
        report.cs_methods = methods.iter().map(|m| m.contexts).sum();
        report.call_edges = solver.call_graph().edge_count();
        report.methods = methods;
        Ok(())
    }
}
