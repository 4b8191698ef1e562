//! Context Selectors
//!
//! Derive the context of a callee (at a call edge) and of a heap object (at
//! an allocation). Selectors are pure functions of their arguments: they never
//! read or write solver state, so they can be swapped and tested in
//! isolation.
//!
//! | strategy | callee context                               | heap context      |
//! |----------|----------------------------------------------|-------------------|
//! | ci       | `[]`                                         | `[]`              |
//! | k-call   | last-k(caller ++ [call site])                | last-(k-1)(method)|
//! | k-obj    | last-k(recv heap ctx ++ [recv obj])          | last-(k-1)(method)|
//! | k-type   | last-k(recv heap ctx ++ [recv container type])| last-(k-1)(method)|
//!
//! Static calls under k-obj and k-type inherit the caller's context.
//! Objects that are not allocation-site objects always get `[]`.

use crate::config::ContextStrategy;
use crate::features::context::domain::{Context, ContextElement};
use crate::features::heap::{Obj, ObjId};
use crate::features::program::{CallSiteId, MethodId};

/// Receiver object of an instance call, as seen by a selector
#[derive(Debug, Clone, Copy)]
pub struct Receiver<'a> {
    /// Heap context of the receiver
    pub heap_context: &'a Context,
    pub obj: ObjId,
    pub info: &'a Obj,
}

/// Context selector for one [`ContextStrategy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextSelector {
    strategy: ContextStrategy,
}

impl ContextSelector {
    pub fn new(strategy: ContextStrategy) -> Self {
        Self { strategy }
    }

    #[inline]
    pub fn strategy(&self) -> ContextStrategy {
        self.strategy
    }

    /// Context of `callee` when called from `call_site` in context `caller`
    ///
    /// `receiver` is `None` for static calls.
    pub fn select_call_context(
        &self,
        caller: &Context,
        call_site: CallSiteId,
        receiver: Option<Receiver<'_>>,
        _callee: MethodId,
    ) -> Context {
        match self.strategy {
            ContextStrategy::Insensitive => Context::empty(),
            ContextStrategy::CallSite(k) => {
                caller.append(ContextElement::CallSite(call_site), k)
            }
            ContextStrategy::Object(k) => match receiver {
                Some(recv) => recv
                    .heap_context
                    .append(ContextElement::Obj(recv.obj), k),
                None => caller.clone(),
            },
            ContextStrategy::Type(k) => match receiver {
                Some(recv) => recv
                    .heap_context
                    .append(ContextElement::Type(recv.info.container_type), k),
                None => caller.clone(),
            },
        }
    }

    /// Heap context of `obj` allocated in a method running under `method_context`
    pub fn select_heap_context(&self, method_context: &Context, obj: &Obj) -> Context {
        if self.strategy.is_insensitive() || !obj.is_allocation() {
            return Context::empty();
        }
        method_context.last(self.strategy.heap_k())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::heap::ObjKind;
    use crate::features::program::{AllocSiteId, TypeId};

    fn alloc_obj(container_type: usize) -> Obj {
        Obj {
            kind: ObjKind::New(AllocSiteId::new(0)),
            ty: TypeId::new(9),
            container: Some(MethodId::new(0)),
            container_type: TypeId::new(container_type),
        }
    }

    fn cs(n: usize) -> ContextElement {
        ContextElement::CallSite(CallSiteId::new(n))
    }

    #[test]
    fn test_insensitive_is_always_empty() {
        let selector = ContextSelector::new(ContextStrategy::Insensitive);
        let caller = Context::from_elements(vec![cs(1)]);
        let obj = alloc_obj(0);
        let heap_ctx = Context::from_elements(vec![cs(7)]);
        let recv = Receiver {
            heap_context: &heap_ctx,
            obj: ObjId::new(1),
            info: &obj,
        };
        assert!(selector
            .select_call_context(&caller, CallSiteId::new(2), Some(recv), MethodId::new(0))
            .is_empty());
        assert!(selector.select_heap_context(&caller, &obj).is_empty());
    }

    #[test]
    fn test_call_site_appends_even_for_static_calls() {
        let selector = ContextSelector::new(ContextStrategy::CallSite(2));
        let caller = Context::from_elements(vec![cs(1), cs(2)]);
        let callee_ctx =
            selector.select_call_context(&caller, CallSiteId::new(3), None, MethodId::new(0));
        assert_eq!(callee_ctx.elements(), &[cs(2), cs(3)]);

        let heap = selector.select_heap_context(&callee_ctx, &alloc_obj(0));
        assert_eq!(heap.elements(), &[cs(3)]);
    }

    #[test]
    fn test_object_sensitivity_uses_receiver() {
        let selector = ContextSelector::new(ContextStrategy::Object(2));
        let caller = Context::from_elements(vec![ContextElement::Obj(ObjId::new(5))]);
        let heap_ctx = Context::from_elements(vec![ContextElement::Obj(ObjId::new(8))]);
        let obj = alloc_obj(0);
        let recv = Receiver {
            heap_context: &heap_ctx,
            obj: ObjId::new(1),
            info: &obj,
        };
        let ctx = selector.select_call_context(&caller, CallSiteId::new(3), Some(recv), MethodId::new(0));
        assert_eq!(
            ctx.elements(),
            &[
                ContextElement::Obj(ObjId::new(8)),
                ContextElement::Obj(ObjId::new(1))
            ]
        );

        // static call inherits
        let ctx = selector.select_call_context(&caller, CallSiteId::new(3), None, MethodId::new(0));
        assert_eq!(ctx, caller);
    }

    #[test]
    fn test_type_sensitivity_uses_container_type() {
        let selector = ContextSelector::new(ContextStrategy::Type(1));
        let empty = Context::empty();
        let obj = alloc_obj(4);
        let recv = Receiver {
            heap_context: &empty,
            obj: ObjId::new(1),
            info: &obj,
        };
        let ctx = selector.select_call_context(&empty, CallSiteId::new(0), Some(recv), MethodId::new(0));
        assert_eq!(ctx.elements(), &[ContextElement::Type(TypeId::new(4))]);
        // 1-type: heap contexts are empty
        assert!(selector.select_heap_context(&ctx, &obj).is_empty());
    }

    // ========== EDGE CASES ==========

    #[test]
    fn test_non_allocation_objects_get_empty_heap_context() {
        let selector = ContextSelector::new(ContextStrategy::Object(3));
        let ctx = Context::from_elements(vec![cs(1), cs(2)]);
        let mock = Obj {
            kind: ObjKind::Mock("<main-arg>".to_string()),
            ty: TypeId::new(1),
            container: None,
            container_type: TypeId::new(1),
        };
        assert!(selector.select_heap_context(&ctx, &mock).is_empty());
        assert_eq!(selector.select_heap_context(&ctx, &alloc_obj(0)).len(), 2);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let selector = ContextSelector::new(ContextStrategy::CallSite(3));
        let caller = Context::from_elements(vec![cs(1)]);
        let a = selector.select_call_context(&caller, CallSiteId::new(2), None, MethodId::new(0));
        let b = selector.select_call_context(&caller, CallSiteId::new(2), None, MethodId::new(0));
        assert_eq!(a, b);
    }
}
