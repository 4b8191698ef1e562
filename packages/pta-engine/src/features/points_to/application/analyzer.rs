//! High-Level Points-to Analysis
//!
//! Builder over [`Solver`]: configuration, plugins and extra entry methods
//! are collected first, `run()` validates and solves.
//!
//! # Usage
//! ```ignore
//! use pta_engine::{PointerAnalysis, Preset, Profiler};
//!
//! let result = PointerAnalysis::new(&program)
//!     .with_preset(Preset::Balanced)
//!     .add_plugin(Profiler::new(10))
//!     .entry_method("Service.start()")
//!     .run()?;
//!
//! for obj in result.points_to(var) {
//!     println!("{}", result.describe_obj(obj));
//! }
//! ```

use super::result::PointerAnalysisResult;
use crate::config::{Preset, PtaConfig};
use crate::errors::{PtaError, Result};
use crate::features::points_to::infrastructure::Solver;
use crate::features::points_to::ports::Plugin;
use crate::features::program::Program;
use std::time::Instant;

pub struct PointerAnalysis<'p> {
    program: &'p Program,
    config: PtaConfig,
    plugins: Vec<Box<dyn Plugin>>,
    /// `Type.subsignature` of extra entry methods
    entry_methods: Vec<String>,
}

impl<'p> PointerAnalysis<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            config: PtaConfig::default(),
            plugins: Vec::new(),
            entry_methods: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: PtaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.config = PtaConfig::from_preset(preset);
        self
    }

    pub fn add_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Extra entry method by signature, e.g. `"Service.start()"`
    pub fn entry_method(mut self, signature: impl Into<String>) -> Self {
        self.entry_methods.push(signature.into());
        self
    }

    pub fn config(&self) -> &PtaConfig {
        &self.config
    }

    /// Solve to fixpoint
    pub fn run(self) -> Result<PointerAnalysisResult<'p>> {
        self.config.validate()?;
        let start = Instant::now();

        let mut solver = Solver::new(self.program, self.config);
        for signature in &self.entry_methods {
            let method = self
                .program
                .method_by_signature(signature)
                .ok_or_else(|| PtaError::UnknownEntry(signature.clone()))?;
            solver.add_entry(method)?;
        }
        for plugin in self.plugins {
            solver.add_plugin(plugin);
        }

        solver.solve()?;
        Ok(PointerAnalysisResult::new(solver.finish(), start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContextStrategy;
    use crate::features::program::ProgramBuilder;

    fn program_with_service() -> Program {
        let mut b = ProgramBuilder::new();
        let object = b.add_class("Object", None);
        let service = b.add_class("Service", Some(object));
        let start = b.add_method(service, "start", "start()", true);
        let x = b.add_var(start, "x", object);
        b.new_obj(start, x, object);
        b.build().unwrap()
    }

    #[test]
    fn test_extra_entry_by_signature() {
        let program = program_with_service();
        let result = PointerAnalysis::new(&program)
            .entry_method("Service.start()")
            .run()
            .unwrap();
        assert_eq!(result.reachable_methods().len(), 1);
        assert_eq!(result.entry_methods().len(), 1);
    }

    #[test]
    fn test_preset_sets_strategy() {
        let program = program_with_service();
        let analysis = PointerAnalysis::new(&program).with_preset(Preset::Balanced);
        assert_eq!(
            analysis.config().context_sensitivity,
            ContextStrategy::Object(1)
        );
    }

    // ========== EDGE CASES ==========

    #[test]
    fn test_unknown_entry_is_an_error() {
        let program = program_with_service();
        let err = PointerAnalysis::new(&program)
            .entry_method("Service.stop()")
            .run()
            .unwrap_err();
        assert!(matches!(err, PtaError::UnknownEntry(ref s) if s == "Service.stop()"));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_solving() {
        let program = program_with_service();
        let config = PtaConfig::default().context_sensitivity(ContextStrategy::Object(99));
        let err = PointerAnalysis::new(&program)
            .with_config(config)
            .run()
            .unwrap_err();
        assert!(matches!(err, PtaError::Config(_)));
    }
}
