//! Query helpers over analysis results

use pta_engine::features::program::{AllocSiteId, Program, TypeId};
use pta_engine::{ObjId, PointerAnalysisResult, PointsToSet};

/// Abstract object created for an allocation site
pub fn obj_of_site(result: &PointerAnalysisResult<'_>, site: AllocSiteId) -> ObjId {
    result
        .heap()
        .objs()
        .find(|(_, obj)| obj.alloc_site() == Some(site))
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no object for allocation site {}", site))
}

/// Sorted objects of several allocation sites
pub fn objs_of_sites(result: &PointerAnalysisResult<'_>, sites: &[AllocSiteId]) -> Vec<ObjId> {
    let mut objs: Vec<ObjId> = sites.iter().map(|&s| obj_of_site(result, s)).collect();
    objs.sort_unstable();
    objs
}

/// Runtime type names of a context-erased object list
pub fn type_names(result: &PointerAnalysisResult<'_>, objs: &[ObjId]) -> Vec<String> {
    let program = result.program();
    let mut names: Vec<String> = objs
        .iter()
        .map(|&o| program.type_name(result.obj(o).ty).to_string())
        .collect();
    names.sort();
    names
}

/// Every object of `pts` (by runtime type) is assignable to `ty`
pub fn all_assignable(
    result: &PointerAnalysisResult<'_>,
    program: &Program,
    pts: &PointsToSet,
    ty: TypeId,
) -> bool {
    pts.iter()
        .all(|o| program.is_subtype(result.obj(result.cs_obj(o).obj).ty, ty))
}

/// `a ⊆ b`
pub fn is_subset(a: &PointsToSet, b: &PointsToSet) -> bool {
    a.iter().all(|o| b.contains(o))
}
