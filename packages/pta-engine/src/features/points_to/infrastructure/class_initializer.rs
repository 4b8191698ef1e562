//! Static Initializer Trigger
//!
//! Decides which class initializers must become reachable when a type is
//! first used (allocation, static call, static field access). Superclasses
//! are initialized first, and a type is marked triggered before its
//! initializer is handed back, so recursive uses from inside the
//! initializer are no-ops.

use crate::features::program::{MethodId, Program, TypeId};
use rustc_hash::FxHashSet;

#[derive(Debug, Default)]
pub struct ClassInitializer {
    triggered: FxHashSet<TypeId>,
    /// Types in the order they were triggered
    order: Vec<TypeId>,
}

impl ClassInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `ty` (or the element class of an array type) is initialized
    ///
    /// Returns the initializers to make reachable, superclass first. Empty if
    /// the type and all its superclasses were already triggered.
    pub fn initialize(&mut self, program: &Program, ty: TypeId) -> Vec<MethodId> {
        let mut ty = ty;
        while let Some(element) = program.type_info(ty).element() {
            ty = element;
        }
        if !program.type_info(ty).is_class() {
            return Vec::new();
        }

        // Chain from `ty` up to the first already-triggered ancestor
        let mut chain = Vec::new();
        let mut current = Some(ty);
        while let Some(t) = current {
            if self.triggered.contains(&t) {
                break;
            }
            chain.push(t);
            current = program.type_info(t).superclass();
        }

        let mut initializers = Vec::new();
        for &t in chain.iter().rev() {
            self.triggered.insert(t);
            self.order.push(t);
            if let Some(clinit) = program.type_info(t).initializer() {
                initializers.push(clinit);
            }
        }
        initializers
    }

    #[inline]
    pub fn is_triggered(&self, ty: TypeId) -> bool {
        self.triggered.contains(&ty)
    }

    /// Triggered types, in trigger order
    pub fn triggered_types(&self) -> &[TypeId] {
        &self.order
    }
}
