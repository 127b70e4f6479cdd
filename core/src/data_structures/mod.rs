//! Graph representations: directed, capacitated and undirected

pub mod directed;
pub mod error;
pub mod flow;
pub mod undirected;

pub use self::directed::{ComponentMap, DiGraph, Node, Reachability};
pub use self::error::GraphError;
pub use self::flow::{Arc, ArcId, Capacity, Flow, FlowNode, Network};
pub use self::undirected::{Edge, UndiGraph, Vertex, Weight};
