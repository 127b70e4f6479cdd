//! Directed graph data structures
//!
//! A [`DiGraph`] owns its [`Node`]s in a contiguous vector and resolves string
//! identifiers to [`NodeId`] indices through a single lookup table. Neighbor
//! references stored on a node are indices into that vector, never references,
//! so the graph has no cyclic ownership and can be cloned freely.
//!
//! # Invariants
//!
//! 1. **Symmetric adjacency**: `v ∈ out(u)` if and only if `u ∈ in(v)`
//! 2. **Set semantics**: a repeated `(u, v)` edge never produces a second
//!    adjacency entry; neighbor lists keep first-insertion order
//! 3. **Closed edge set**: every edge endpoint names a vertex of the graph;
//!    edges that reference unknown vertices are rejected, never dropped
//!
//! Vertex and edge insertion order fully determines every traversal order,
//! which in turn makes the Kosaraju representatives reproducible.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::scc;
use crate::algorithm::traits::NodeId;
use crate::algorithm::traversal::{self, Direction};
use crate::data_structures::error::GraphError;

/// Root identifier mapped to the identifiers of its strongly connected component
pub type ComponentMap = BTreeMap<String, BTreeSet<String>>;

/// Vertex in a directed graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    name: String,
    incoming: Vec<NodeId>,
    outgoing: Vec<NodeId>,
}

impl Node {
    fn new(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertices with an edge into this one
    pub fn in_neighbors(&self) -> &[NodeId] {
        &self.incoming
    }

    /// Vertices this one has an edge to
    pub fn out_neighbors(&self) -> &[NodeId] {
        &self.outgoing
    }

    /// Union of in- and out-neighbors, each listed once
    pub fn io_neighbors(&self) -> Vec<NodeId> {
        let mut neighbors = self.incoming.clone();
        for &v in &self.outgoing {
            if !neighbors.contains(&v) {
                neighbors.push(v);
            }
        }
        neighbors
    }

    /// Whether there is an edge `self -> other`
    pub fn is_adjacent(&self, other: &Node) -> bool {
        self.outgoing.contains(&other.id)
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    fn add_out(&mut self, v: NodeId) -> bool {
        if self.outgoing.contains(&v) {
            return false;
        }
        self.outgoing.push(v);
        true
    }

    fn add_in(&mut self, u: NodeId) {
        if !self.incoming.contains(&u) {
            self.incoming.push(u);
        }
    }
}

/// Vertices connected to a given vertex by directed paths of length one or more
///
/// The vertex itself appears in `access_to` (and `accessible_from`) only when
/// it lies on a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reachability {
    pub vertex: String,
    /// Every vertex reachable from `vertex` along forward edges
    pub access_to: Vec<String>,
    /// Every vertex that reaches `vertex` along forward edges
    pub accessible_from: Vec<String>,
}

/// Adjacency-list directed graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiGraph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    edge_count: usize,
}

impl DiGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a vertex list and a `(from, to)` edge list
    pub fn from_parts<V, S, E, A, B>(vertices: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut graph = Self::new();
        graph.add_vertices(vertices)?;
        graph.add_edges(edges)?;
        Ok(graph)
    }

    /// Adds a vertex, rejecting identifiers that are already present
    pub fn add_vertex(&mut self, name: impl Into<String>) -> Result<NodeId, GraphError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(GraphError::DuplicateVertex(name));
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(name.clone(), id);
        self.nodes.push(Node::new(id, name));
        Ok(id)
    }

    pub fn add_vertices<V, S>(&mut self, vertices: V) -> Result<(), GraphError>
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for v in vertices {
            self.add_vertex(v)?;
        }
        Ok(())
    }

    /// Adds the edge `from -> to`
    ///
    /// Both endpoints must already exist. Adding an edge that is already
    /// present leaves the adjacency unchanged.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let u = self.id_of(from)?;
        let v = self.id_of(to)?;
        if !self.connect(u, v) {
            warn!("Edge {} -> {} already present - adjacency unchanged", from, to);
        }
        Ok(())
    }

    pub fn add_edges<E, A, B>(&mut self, edges: E) -> Result<(), GraphError>
    where
        E: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        for (from, to) in edges {
            self.add_edge(from.as_ref(), to.as_ref())?;
        }
        Ok(())
    }

    /// Links two resolved vertices, returning whether a new adjacency entry was created
    pub(crate) fn connect(&mut self, u: NodeId, v: NodeId) -> bool {
        if !self.nodes[u.0].add_out(v) {
            return false;
        }
        self.nodes[v.0].add_in(u);
        self.edge_count += 1;
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Resolves an identifier to its index
    pub fn id_of(&self, name: &str) -> Result<NodeId, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(name.to_string()))
    }

    pub fn node(&self, name: &str) -> Result<&Node, GraphError> {
        self.id_of(name).map(|id| &self.nodes[id.0])
    }

    pub fn node_at(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Identifier of a vertex index produced by this graph
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this graph.
    pub fn name_of(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    /// Vertices in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct `(from, to)` pairs
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Neighbors of `id` following `direction`
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this graph.
    pub fn neighbors(&self, id: NodeId, direction: Direction) -> &[NodeId] {
        let node = &self.nodes[id.0];
        match direction {
            Direction::Forward => &node.outgoing,
            Direction::Reverse => &node.incoming,
        }
    }

    fn names(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| self.name_of(id).to_string()).collect()
    }

    /// Depth-first pre-order of the vertices reachable from `start`
    pub fn dfs(&self, start: &str) -> Result<Vec<String>, GraphError> {
        let start = self.id_of(start)?;
        Ok(self.names(&traversal::dfs_preorder(self, start, Direction::Forward)))
    }

    /// Breadth-first order of the vertices reachable from `start`
    pub fn bfs(&self, start: &str) -> Result<Vec<String>, GraphError> {
        let start = self.id_of(start)?;
        Ok(self.names(&traversal::bfs(self, start, Direction::Forward, |_| true)))
    }

    /// Forward and backward path expansion from a single vertex
    pub fn reachability(&self, name: &str) -> Result<Reachability, GraphError> {
        let id = self.id_of(name)?;
        Ok(self.expand(id))
    }

    /// Path expansion for every vertex, in insertion order
    pub fn expand_nodes(&self) -> Vec<Reachability> {
        self.nodes.iter().map(|node| self.expand(node.id)).collect()
    }

    fn expand(&self, id: NodeId) -> Reachability {
        let access_to = traversal::reachable(self, id, Direction::Forward);
        let accessible_from = traversal::reachable(self, id, Direction::Reverse);
        trace!(
            "Expanded {}: {} forward, {} backward",
            self.name_of(id),
            access_to.len(),
            accessible_from.len()
        );
        Reachability {
            vertex: self.name_of(id).to_string(),
            access_to: self.names(&access_to),
            accessible_from: self.names(&accessible_from),
        }
    }

    /// Kosaraju decomposition into strongly connected components
    ///
    /// Returns each component keyed by its representative root. The member sets
    /// partition the vertex set.
    pub fn kosaraju_scc(&self) -> ComponentMap {
        scc::kosaraju(self).into_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiGraph {
        DiGraph::from_parts(["A", "B", "C", "D"], [("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")])
            .unwrap()
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = sample();
        for node in graph.nodes() {
            for &v in node.out_neighbors() {
                assert!(graph.node_at(v).unwrap().in_neighbors().contains(&node.id()));
            }
            for &u in node.in_neighbors() {
                assert!(graph.node_at(u).unwrap().out_neighbors().contains(&node.id()));
            }
        }
    }

    #[test]
    fn test_is_adjacent() {
        let graph = DiGraph::from_parts(["A", "B"], [("A", "B")]).unwrap();
        let a = graph.node("A").unwrap();
        let b = graph.node("B").unwrap();
        assert!(a.is_adjacent(b));
        assert!(!b.is_adjacent(a));
    }

    #[test]
    fn test_unknown_endpoint_is_rejected() {
        let err = DiGraph::from_parts(["A", "B"], [("A", "Z")]).unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex("Z".to_string()));
    }

    #[test]
    fn test_duplicate_vertex_is_rejected() {
        let mut graph = DiGraph::new();
        graph.add_vertex("A").unwrap();
        assert_eq!(
            graph.add_vertex("A").unwrap_err(),
            GraphError::DuplicateVertex("A".to_string())
        );
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_repeated_edge_keeps_single_entry() {
        let graph = DiGraph::from_parts(["A", "B"], [("A", "B"), ("A", "B")]).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node("A").unwrap().out_degree(), 1);
        assert_eq!(graph.node("B").unwrap().in_degree(), 1);
    }

    #[test]
    fn test_io_neighbors_are_deduplicated() {
        let graph =
            DiGraph::from_parts(["A", "B", "C"], [("A", "B"), ("B", "A"), ("C", "A")]).unwrap();
        let a = graph.node("A").unwrap();
        let io: Vec<&str> = a.io_neighbors().into_iter().map(|id| graph.name_of(id)).collect();
        assert_eq!(io, vec!["B", "C"]);
    }

    #[test]
    fn test_traversal_orders() {
        let graph = sample();
        assert_eq!(graph.dfs("A").unwrap(), vec!["A", "B", "C", "D"]);
        assert_eq!(graph.bfs("C").unwrap(), vec!["C", "A", "D", "B"]);
        assert!(graph.dfs("Z").is_err());
    }

    #[test]
    fn test_reachability() {
        let graph = sample();

        let a = graph.reachability("A").unwrap();
        assert_eq!(a.access_to, vec!["B", "C", "A", "D"]);
        assert_eq!(a.accessible_from, vec!["C", "B", "A"]);

        let d = graph.reachability("D").unwrap();
        assert!(d.access_to.is_empty());
        assert_eq!(d.accessible_from, vec!["C", "B", "A"]);

        assert_eq!(graph.expand_nodes().len(), 4);
    }

    #[test]
    fn test_self_loop_reaches_itself() {
        let graph = DiGraph::from_parts(["A"], [("A", "A")]).unwrap();
        let a = graph.reachability("A").unwrap();
        assert_eq!(a.access_to, vec!["A"]);
        assert_eq!(a.accessible_from, vec!["A"]);
    }
}
