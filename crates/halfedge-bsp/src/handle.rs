//! Stable integer handles into the mesh store.
//!
//! Handles are plain `u32` indices. The store only ever appends, so a handle
//! keeps referring to the same record for the lifetime of the store.
//! `u32::MAX` is reserved as the "no reference" sentinel.

use core::fmt;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
        pub struct $name(u32);

        impl $name {
            /// Sentinel meaning "no reference".
            pub const INVALID: Self = Self(u32::MAX);

            #[inline]
            pub(crate) fn new(index: usize) -> Self {
                debug_assert!(index < u32::MAX as usize, "handle space exhausted");
                Self(index as u32)
            }

            /// Raw value of the handle.
            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }

            /// Position of the record in the store's storage.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Returns `false` for the [`INVALID`](Self::INVALID) sentinel.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }

            /// Converts the sentinel into `None`.
            #[inline]
            pub fn valid(self) -> Option<Self> {
                self.is_valid().then_some(self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($prefix, "{}"), self.0)
                } else {
                    f.write_str(concat!($prefix, "-"))
                }
            }
        }
    };
}

define_handle!(
    /// Handle of a [`Vertex`](crate::Vertex).
    VertexId,
    "v"
);

define_handle!(
    /// Handle of a [`HalfEdge`](crate::HalfEdge).
    HalfEdgeId,
    "e"
);

define_handle!(
    /// Handle of a [`Polygon`](crate::Polygon).
    PolygonId,
    "p"
);
