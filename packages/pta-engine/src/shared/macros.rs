//! Shared macros for the codebase
//!
//! Provides `define_id!`, which declares a typed `u32` index into an arena.
//! Every program entity and every context-sensitive element is addressed by
//! one of these ids, so identity comparisons are plain integer comparisons.

/// Declare a typed arena index.
///
/// ```ignore
/// define_id! {
///     /// Raw method identifier
///     MethodId
/// }
/// let m = MethodId::new(3);
/// assert_eq!(m.index(), 3);
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from an arena index
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize);
                Self(index as u32)
            }

            /// Arena index of this id
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    define_id! {
        /// Test id
        SampleId
    }

    #[test]
    fn test_id_roundtrip_index() {
        let id = SampleId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id, SampleId(42));
        assert_eq!(id.to_string(), "SampleId(42)");
    }

    #[test]
    fn test_id_ordering() {
        assert!(SampleId::new(1) < SampleId::new(2));
    }
}
