//! Dense graph indices.
//!
//! Nodes arrive from tabular input with string keys (`"3"`, `"F9"`).  The
//! graph assigns each one a `NodeId` once at construction so every
//! algorithm can index plain `Vec`s instead of hashing keys.  Roads get a
//! `RoadId` the same way.

use std::fmt;

macro_rules! graph_index {
    ($(#[$attr:meta])* $name:ident, $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for "no predecessor" slots in search arrays.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " #{}"), self.0)
            }
        }
    };
}

graph_index! {
    /// Position of a settlement or facility in the graph's node table.
    NodeId, "node"
}

graph_index! {
    /// Position of an undirected road in the graph's road table.
    RoadId, "road"
}
