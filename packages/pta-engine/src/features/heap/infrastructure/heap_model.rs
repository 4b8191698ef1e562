//! Allocation-Site Heap Model
//!
//! Maps allocation statements, literals and synthesized values to abstract
//! objects. Every mapping is memoized, so asking twice for the same site
//! yields the same [`ObjId`].
//!
//! Type merging (configurable):
//! - string allocations → one object for the string type
//! - string-builder allocations → one object per builder type
//! - throwable-subtype allocations → one object per exception type
//! - string constants → one object for all of them
//!
//! Merged objects remember the allocation-site objects they represent.

use crate::config::HeapModelConfig;
use crate::features::heap::domain::{Obj, ObjId, ObjKind};
use crate::features::program::{AllocSiteId, LiteralId, MethodId, Program, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Allocation-site based heap model with optional type merging
#[derive(Debug)]
pub struct HeapModel {
    objs: Vec<Obj>,

    new_objs: FxHashMap<AllocSiteId, ObjId>,
    constant_objs: FxHashMap<LiteralId, ObjId>,
    merged_objs: FxHashMap<TypeId, ObjId>,
    merged_constants: Option<ObjId>,
    mock_objs: FxHashMap<(String, TypeId), ObjId>,

    /// Merged object → represented allocation-site objects
    represented: FxHashMap<ObjId, FxHashSet<ObjId>>,

    merge_string_constants: bool,
    merge_string_objects: bool,
    merge_string_builders: bool,
    merge_exception_objects: bool,
    string: Option<TypeId>,
    string_builders: Vec<TypeId>,
    throwable: Option<TypeId>,
}

impl HeapModel {
    /// Create a heap model, resolving the configured type names against `program`
    ///
    /// Type names the program does not declare simply disable their category.
    pub fn new(program: &Program, config: &HeapModelConfig) -> Self {
        let string = program.type_by_name(&config.string_type);
        let string_builders = config
            .string_builder_types
            .iter()
            .filter_map(|name| program.type_by_name(name))
            .collect();
        let throwable = program.type_by_name(&config.throwable_type);
        debug!(
            ?string,
            ?throwable,
            merge_strings = config.merge_string_objects,
            merge_exceptions = config.merge_exception_objects,
            "Heap model created"
        );

        Self {
            objs: Vec::new(),
            new_objs: FxHashMap::default(),
            constant_objs: FxHashMap::default(),
            merged_objs: FxHashMap::default(),
            merged_constants: None,
            mock_objs: FxHashMap::default(),
            represented: FxHashMap::default(),
            merge_string_constants: config.merge_string_constants,
            merge_string_objects: config.merge_string_objects,
            merge_string_builders: config.merge_string_builders,
            merge_exception_objects: config.merge_exception_objects,
            string,
            string_builders,
            throwable,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Object Access
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn obj(&self, obj: ObjId) -> &Obj {
        &self.objs[obj.index()]
    }

    /// Number of objects created so far
    #[inline]
    pub fn len(&self) -> usize {
        self.objs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }

    /// All objects in creation order
    pub fn objs(&self) -> impl Iterator<Item = (ObjId, &Obj)> + '_ {
        self.objs
            .iter()
            .enumerate()
            .map(|(index, obj)| (ObjId::new(index), obj))
    }

    /// Objects represented by a merged object (sorted; empty for others)
    pub fn represented_objs(&self, merged: ObjId) -> Vec<ObjId> {
        let mut objs: Vec<ObjId> = self
            .represented
            .get(&merged)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        objs.sort_unstable();
        objs
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Object Creation
    // ═══════════════════════════════════════════════════════════════════════

    fn push(&mut self, obj: Obj) -> ObjId {
        let id = ObjId::new(self.objs.len());
        self.objs.push(obj);
        id
    }

    /// Object for an allocation site, honoring the merge switches
    pub fn obj_for_alloc(&mut self, program: &Program, site: AllocSiteId) -> ObjId {
        let ty = program.alloc_site(site).ty;
        if self.should_merge(program, ty) {
            return self.merged_obj(program, site);
        }
        self.new_obj(program, site)
    }

    fn should_merge(&self, program: &Program, ty: TypeId) -> bool {
        if self.merge_string_objects && Some(ty) == self.string {
            return true;
        }
        if self.merge_string_builders && self.string_builders.contains(&ty) {
            return true;
        }
        if self.merge_exception_objects {
            if let Some(throwable) = self.throwable {
                if program.type_info(ty).is_class() && program.is_subtype(ty, throwable) {
                    return true;
                }
            }
        }
        false
    }

    fn new_obj(&mut self, program: &Program, site: AllocSiteId) -> ObjId {
        if let Some(&obj) = self.new_objs.get(&site) {
            return obj;
        }
        let alloc = program.alloc_site(site);
        let container_type = program.method(alloc.container).declaring;
        let obj = self.push(Obj {
            kind: ObjKind::New(site),
            ty: alloc.ty,
            container: Some(alloc.container),
            container_type,
        });
        self.new_objs.insert(site, obj);
        obj
    }

    fn merged_obj(&mut self, program: &Program, site: AllocSiteId) -> ObjId {
        let ty = program.alloc_site(site).ty;
        let merged = match self.merged_objs.get(&ty) {
            Some(&obj) => obj,
            None => {
                let obj = self.push(Obj {
                    kind: ObjKind::Merged(ty),
                    ty,
                    container: None,
                    container_type: ty,
                });
                self.merged_objs.insert(ty, obj);
                obj
            }
        };
        let represented = self.new_obj(program, site);
        self.represented.entry(merged).or_default().insert(represented);
        merged
    }

    /// Object for a reference literal
    pub fn constant_obj(&mut self, program: &Program, literal: LiteralId) -> ObjId {
        let ty = program.literal(literal).ty;
        let obj = match self.constant_objs.get(&literal) {
            Some(&obj) => obj,
            None => {
                let obj = self.push(Obj {
                    kind: ObjKind::Constant(literal),
                    ty,
                    container: None,
                    container_type: ty,
                });
                self.constant_objs.insert(literal, obj);
                obj
            }
        };
        if self.merge_string_constants && Some(ty) == self.string {
            let merged = match self.merged_constants {
                Some(merged) => merged,
                None => {
                    let merged = self.push(Obj {
                        kind: ObjKind::MergedConstants(ty),
                        ty,
                        container: None,
                        container_type: ty,
                    });
                    self.merged_constants = Some(merged);
                    merged
                }
            };
            self.represented.entry(merged).or_default().insert(obj);
            return merged;
        }
        obj
    }

    /// Synthesized object, memoized by `(description, type)`
    pub fn mock_obj(
        &mut self,
        program: &Program,
        description: impl Into<String>,
        ty: TypeId,
        container: Option<MethodId>,
    ) -> ObjId {
        let key = (description.into(), ty);
        if let Some(&obj) = self.mock_objs.get(&key) {
            return obj;
        }
        let container_type = container
            .map(|m| program.method(m).declaring)
            .unwrap_or(ty);
        let obj = self.push(Obj {
            kind: ObjKind::Mock(key.0.clone()),
            ty,
            container,
            container_type,
        });
        self.mock_objs.insert(key, obj);
        obj
    }

    /// Inner array objects of a multi-dimensional allocation, outermost first
    ///
    /// `new T[2][3]` (two dimensions, type `T[][]`) yields one mock of type
    /// `T[]`. Dimensions beyond the array type's nesting are ignored.
    pub fn multi_array_objs(&mut self, program: &Program, site: AllocSiteId) -> Vec<ObjId> {
        let alloc = program.alloc_site(site);
        let container = alloc.container;
        let mut result = Vec::new();
        let mut ty = alloc.ty;
        for level in 1..alloc.dimensions {
            let Some(element) = program.type_info(ty).element() else {
                break;
            };
            if !program.type_info(element).is_array() {
                break;
            }
            ty = element;
            let description = format!("<multi-array {}[{}]>", site.0, level);
            result.push(self.mock_obj(program, description, ty, Some(container)));
        }
        result
    }
}
