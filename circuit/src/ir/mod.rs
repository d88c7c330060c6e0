mod circuit;
mod edge;
mod elements;
mod graph;

pub use self::{circuit::*, edge::*, graph::*};

/// Node ids below this limit are real circuit nodes; ids at or above it are
/// virtual nodes handed out by [Circuit::fresh_node] and remapped to dense ids
/// by [Circuit::normalize].
pub const LIMIT: usize = 1024;

/// Initial capacity of the edge store.
pub const STDDIM: usize = 32;

/// A circuit node identifier.
///
/// Dense in `[0, nnum)` once the circuit has been normalized.
pub type NodeId = usize;
