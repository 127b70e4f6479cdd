//! Structural and validation errors raised while building graphs

use thiserror::Error;

use crate::data_structures::flow::Capacity;

/// Graph construction errors
///
/// Every variant is raised at the call that introduced the bad input; nothing
/// is dropped or repaired on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("Vertex {0} already present")]
    DuplicateVertex(String),

    #[error("Negative capacity {capacity} on arc {from} -> {to}")]
    NegativeCapacity {
        from: String,
        to: String,
        capacity: Capacity,
    },

    #[error("Arc {from} -> {to} of capacity {capacity} overflows the network's total capacity")]
    CapacityOverflow {
        from: String,
        to: String,
        capacity: Capacity,
    },

    #[error("Vertex index {index} out of range for graph of size {size}")]
    UnknownIndex { index: usize, size: usize },
}
