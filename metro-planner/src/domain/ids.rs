//! Dense identifiers for stations and lines.
//!
//! Ids are indices into the topology's arenas. They are only handed out by
//! [`Topology`](crate::topology::Topology), so any id in hand refers to an
//! entry that exists.

use std::fmt;

/// Index of a station within a topology.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(u32);

/// Index of a line within a topology.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(u32);

macro_rules! dense_id {
    ($ty:ident, $tag:literal) => {
        impl $ty {
            pub(crate) const fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position in the owning arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.0)
            }
        }
    };
}

dense_id!(StationId, "Station");
dense_id!(LineId, "Line");
