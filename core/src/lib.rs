//! Classic graph algorithms for study and exploration
//!
//! Two graph representations carry the algorithmic core:
//!
//! - [`DiGraph`] - adjacency-list directed graph with Kosaraju strongly
//!   connected components
//! - [`Network`] - capacitated flow network with Edmonds-Karp maximum flow and
//!   the matching minimum cut
//!
//! An adjacency-matrix [`UndiGraph`] with breadth-first traversal sits beside
//! them as an independent collaborator.
//!
//! ```
//! use graph_theory::{DiGraph, Network};
//!
//! let graph = DiGraph::from_parts(
//!     ["JFK", "LGA", "BOS"],
//!     [("JFK", "LGA"), ("LGA", "BOS"), ("BOS", "JFK")],
//! )?;
//! assert_eq!(graph.kosaraju_scc().len(), 1);
//!
//! let mut network = Network::from_parts(
//!     ["s", "a", "b", "t"],
//!     [("s", "a", 10), ("s", "b", 5), ("a", "b", 15), ("a", "t", 10), ("b", "t", 10)],
//! )?;
//! assert_eq!(network.max_flow("s", "t")?, 15);
//! assert_eq!(network.min_cut("s", "t")?.capacity(), 15);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;

pub use crate::algorithm::{
    Algorithm, AlgorithmComplexity, AlgorithmError, Direction, FlowError, MaxFlowResult,
    MaxFlowSolver, MinCut, NodeId, SCCError, SCCResult, StronglyConnectedComponents,
};
pub use crate::data_structures::{
    Arc, Capacity, ComponentMap, DiGraph, Edge, Flow, FlowNode, GraphError, Network, Node,
    UndiGraph, Vertex,
};
