//! Strongly typed, zero-cost identifier wrappers.
//!
//! Two families of ids coexist:
//!
//! - **Dense ids** (`NodeId`, `StreetId`) are assigned by the graph builder in
//!   order of first appearance and index directly into the graph's `Vec`s.
//! - **Source ids** (`OsmId`) are the stable 64-bit identifiers carried by the
//!   map extract.  They appear at the edges of the system: configuration
//!   (start node), output labels, and error messages.

use std::fmt;

/// Generate a typed dense-index wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        /// Checked conversion from a `Vec` position.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Dense index of a street-graph node.  Max ~4.3 billion nodes.
    pub struct NodeId(u32);
}

typed_id! {
    /// Dense index of a street (one name, one or more segments).
    pub struct StreetId(u32);
}

/// Identifier of a node as it appears in the source extract (OSM node id).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OsmId(pub i64);

impl fmt::Display for OsmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OsmId {
    #[inline]
    fn from(raw: i64) -> Self {
        OsmId(raw)
    }
}
