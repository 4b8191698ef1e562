//! Type Hierarchy Model
//!
//! Reference types of the analyzed program:
//! - **Class**: single superclass link, implemented interfaces, optional
//!   static initializer
//! - **Interface**: super-interfaces only
//! - **Array**: covariant in its element type
//! - **Null**: the type of the null literal, assignable to every reference type

use super::members::MethodId;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Reference type identifier
    TypeId
}

/// Shape of a reference type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// Concrete or abstract class
    Class {
        /// Direct superclass (`None` only for the hierarchy root)
        superclass: Option<TypeId>,

        /// Directly implemented interfaces
        interfaces: Vec<TypeId>,

        /// Static initializer, if the class declares one
        initializer: Option<MethodId>,
    },

    /// Interface type
    Interface {
        /// Directly extended interfaces
        superinterfaces: Vec<TypeId>,
    },

    /// Array type `element[]`
    Array {
        /// Element type
        element: TypeId,
    },

    /// Type of the null literal
    Null,
}

/// A reference type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Fully-qualified name, e.g. `java.lang.String` or `Foo[]`
    pub name: String,

    /// Type shape
    pub kind: TypeKind,
}

impl TypeInfo {
    /// Superclass link of a class type
    #[inline]
    pub fn superclass(&self) -> Option<TypeId> {
        match &self.kind {
            TypeKind::Class { superclass, .. } => *superclass,
            _ => None,
        }
    }

    /// Static initializer of a class type
    #[inline]
    pub fn initializer(&self) -> Option<MethodId> {
        match &self.kind {
            TypeKind::Class { initializer, .. } => *initializer,
            _ => None,
        }
    }

    /// Element type of an array type
    #[inline]
    pub fn element(&self) -> Option<TypeId> {
        match &self.kind {
            TypeKind::Array { element } => Some(*element),
            _ => None,
        }
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class { .. })
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface { .. })
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }

    /// Directly declared supertypes (superclass first, then interfaces)
    pub fn direct_supertypes(&self) -> Vec<TypeId> {
        match &self.kind {
            TypeKind::Class {
                superclass,
                interfaces,
                ..
            } => superclass.iter().chain(interfaces.iter()).copied().collect(),
            TypeKind::Interface { superinterfaces } => superinterfaces.clone(),
            TypeKind::Array { .. } | TypeKind::Null => Vec::new(),
        }
    }
}
