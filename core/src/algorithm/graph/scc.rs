//! Strongly Connected Components Algorithm Implementation
//!
//! This module implements Kosaraju's algorithm for finding strongly connected
//! components in directed graphs. The algorithm achieves O(V+E) time through
//! two depth-first passes: one over the graph to obtain a finish order, and one
//! over the transposed graph in decreasing finish order.
//!
//! # Theoretical Foundation
//!
//! A strongly connected component (SCC) is a maximal set of vertices such that
//! there is a directed path from each vertex to every other vertex in the
//! component. The vertex finishing last in the first pass belongs to a source
//! component of the condensation DAG; in the transposed graph that component
//! becomes a sink, so a search started there cannot leak into any other
//! component.
//!
//! ## Invariants
//!
//! 1. **Finish Order Property**: the finish sequence grows monotonically across
//!    all first-pass launch points
//! 2. **Root Property**: the root of a component is the first of its vertices
//!    taken from the decreasing finish order
//! 3. **Partition Property**: every vertex is assigned to exactly one component
//!    and is never revisited once assigned
//!
//! # Algorithmic Complexity
//!
//! - **Time Complexity**: O(V + E) - every adjacency entry is scanned once per pass
//! - **Space Complexity**: O(V) - finish order, visited flags and the DFS stack
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::{
    parse_bool_parameter, Algorithm, AlgorithmComplexity, AlgorithmError, NodeId,
};
use crate::algorithm::traversal::{self, Direction};
use crate::data_structures::directed::{ComponentMap, DiGraph};

/// Strongly Connected Component representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StronglyConnectedComponent {
    /// Position of this component in discovery order
    pub id: usize,
    /// Representative vertex (first vertex of the reverse-pass tree)
    pub root: NodeId,
    /// Vertices in this component, in reverse-pass discovery order
    pub vertices: Vec<NodeId>,
}

impl StronglyConnectedComponent {
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Check if this component contains a specific vertex
    pub fn contains(&self, vertex: NodeId) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Check if this is a trivial component (single vertex with no self-loop)
    pub fn is_trivial(&self, graph: &DiGraph) -> bool {
        self.size() == 1 && !graph.neighbors(self.root, Direction::Forward).contains(&self.root)
    }
}

/// SCC computation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SCCResult {
    /// All strongly connected components, in the order they were discovered
    pub components: Vec<StronglyConnectedComponent>,
    /// Component index for every vertex, indexed by `NodeId`
    membership: Vec<usize>,
    /// Vertex identifiers, indexed by `NodeId`
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    /// Performance statistics
    pub statistics: SCCStatistics,
}

impl SCCResult {
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Get component containing the named vertex
    pub fn component_of(&self, vertex: &str) -> Option<&StronglyConnectedComponent> {
        let id = self.index.get(vertex)?;
        self.components.get(self.membership[id.0])
    }

    /// Identifier of the representative root of the named vertex's component
    pub fn representative_of(&self, vertex: &str) -> Option<&str> {
        self.component_of(vertex).map(|c| self.labels[c.root.0].as_str())
    }

    /// Check if two vertices are in the same strongly connected component
    pub fn are_strongly_connected(&self, u: &str, v: &str) -> bool {
        match (self.index.get(u), self.index.get(v)) {
            (Some(u), Some(v)) => self.membership[u.0] == self.membership[v.0],
            _ => false,
        }
    }

    /// Whether the whole graph forms a single component
    pub fn is_strongly_connected(&self) -> bool {
        self.components.len() == 1
    }

    pub fn largest(&self) -> Option<&StronglyConnectedComponent> {
        self.components.iter().max_by_key(|c| c.size())
    }

    /// Number of trivial components (single vertex without a self-loop)
    pub fn trivial_components(&self, graph: &DiGraph) -> usize {
        self.components.iter().filter(|c| c.is_trivial(graph)).count()
    }

    /// Edges of the condensation DAG, as pairs of component ids
    pub fn condensation_edges(&self, graph: &DiGraph) -> BTreeSet<(usize, usize)> {
        let mut edges = BTreeSet::new();
        for node in graph.nodes() {
            let from = self.membership[node.id().0];
            for &next in node.out_neighbors() {
                let to = self.membership[next.0];
                if from != to {
                    edges.insert((from, to));
                }
            }
        }
        edges
    }

    /// Topological order of the condensation graph (Kahn's algorithm)
    ///
    /// Returns `None` if the condensation contains a cycle, which would mean two
    /// reported components are not maximal.
    pub fn topological_order(&self, graph: &DiGraph) -> Option<Vec<usize>> {
        let n = self.components.len();
        let mut in_degree = vec![0usize; n];
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (from, to) in self.condensation_edges(graph) {
            adjacency[from].push(to);
            in_degree[to] += 1;
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&c| in_degree[c] == 0).collect();
        let mut result = Vec::with_capacity(n);

        while let Some(component) = queue.pop_front() {
            result.push(component);
            for &next in &adjacency[component] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        (result.len() == n).then_some(result)
    }

    /// Root identifier mapped to member identifiers
    pub fn into_map(self) -> ComponentMap {
        let labels = self.labels;
        self.components
            .into_iter()
            .map(|c| {
                let members = c.vertices.iter().map(|v| labels[v.0].clone()).collect();
                (labels[c.root.0].clone(), members)
            })
            .collect()
    }
}

/// Performance and behavior statistics for SCC computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SCCStatistics {
    pub vertices_visited: usize,
    pub edges_examined: usize,
    pub max_stack_depth: usize,
    /// Depth-first trees grown by the forward pass
    pub forward_trees: usize,
}

/// SCC-specific errors
#[derive(Debug, Error)]
pub enum SCCError {
    #[error("Invalid vertex: {0}")]
    InvalidVertex(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}

/// Runs both Kosaraju passes over `graph`
pub(crate) fn kosaraju(graph: &DiGraph) -> SCCResult {
    let n = graph.node_count();
    let mut statistics = SCCStatistics::default();

    // Forward pass: finish order over every launch point
    let mut visited = vec![false; n];
    let mut finished: Vec<NodeId> = Vec::with_capacity(n);
    for node in graph.nodes() {
        if visited[node.id().0] {
            continue;
        }
        statistics.forward_trees += 1;
        let depth = traversal::explore(
            graph,
            node.id(),
            Direction::Forward,
            &mut visited,
            |_| {},
            |v| {
                trace!("Finished {}", graph.name_of(v));
                finished.push(v);
            },
        );
        statistics.max_stack_depth = statistics.max_stack_depth.max(depth);
    }

    // Reverse pass: each tree over the transpose is one component
    let mut assigned = vec![false; n];
    let mut membership = vec![0usize; n];
    let mut components = Vec::new();
    for &root in finished.iter().rev() {
        if assigned[root.0] {
            continue;
        }
        let id = components.len();
        let mut vertices = Vec::new();
        let depth = traversal::explore(
            graph,
            root,
            Direction::Reverse,
            &mut assigned,
            |v| {
                trace!("Assigning {} to {}", graph.name_of(v), graph.name_of(root));
                membership[v.0] = id;
                vertices.push(v);
            },
            |_| {},
        );
        statistics.max_stack_depth = statistics.max_stack_depth.max(depth);
        components.push(StronglyConnectedComponent { id, root, vertices });
    }

    statistics.vertices_visited = 2 * n;
    statistics.edges_examined = 2 * graph.edge_count();

    debug!(
        "Kosaraju over {} vertices / {} edges produced {} components",
        n,
        graph.edge_count(),
        components.len()
    );

    let labels: Vec<String> = graph.nodes().map(|node| node.name().to_string()).collect();
    let index = labels
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), NodeId(i)))
        .collect();

    SCCResult {
        components,
        membership,
        labels,
        index,
        statistics,
    }
}

/// Strongly Connected Components Algorithm Implementation
///
/// This implementation uses Kosaraju's two-pass algorithm to find all strongly
/// connected components in a directed graph in O(V+E) time.
#[derive(Debug, Clone)]
pub struct StronglyConnectedComponents {
    /// Algorithm parameters
    parameters: HashMap<String, String>,

    /// Statistics of the most recent run
    statistics: SCCStatistics,
}

impl StronglyConnectedComponents {
    /// Create a new SCC algorithm instance
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("track_statistics".to_string(), "true".to_string());
        parameters.insert("verify_result".to_string(), "true".to_string());

        Self {
            parameters,
            statistics: SCCStatistics::default(),
        }
    }

    fn flag(&self, name: &str) -> bool {
        self.parameters.get(name).map(|v| v == "true").unwrap_or(true)
    }

    /// Compute strongly connected components using Kosaraju's algorithm
    pub fn compute_scc(&mut self, graph: &DiGraph) -> Result<SCCResult, SCCError> {
        let mut result = kosaraju(graph);

        if self.flag("track_statistics") {
            self.statistics = result.statistics.clone();
        } else {
            result.statistics = SCCStatistics::default();
        }

        if self.flag("verify_result") {
            self.verify_scc_result(graph, &result)?;
        }

        Ok(result)
    }

    /// Verify the correctness of the SCC result
    ///
    /// This verification function ensures:
    /// 1. All vertices are covered exactly once
    /// 2. Each component is actually strongly connected
    /// 3. The condensation is acyclic, so no two components should have merged
    fn verify_scc_result(&self, graph: &DiGraph, result: &SCCResult) -> Result<(), SCCError> {
        let total_vertices = graph.node_count();
        let mut covered_vertices = HashSet::new();

        for component in &result.components {
            for &vertex in &component.vertices {
                if !covered_vertices.insert(vertex) {
                    return Err(SCCError::VerificationFailed(format!(
                        "Vertex {} appears in multiple components",
                        graph.name_of(vertex)
                    )));
                }
            }
        }

        if covered_vertices.len() != total_vertices {
            return Err(SCCError::VerificationFailed(format!(
                "Vertex coverage mismatch: expected {}, found {}",
                total_vertices,
                covered_vertices.len()
            )));
        }

        for component in &result.components {
            if component.size() > 1 {
                self.verify_component_connectivity(graph, result, component)?;
            }
        }

        if result.topological_order(graph).is_none() {
            return Err(SCCError::VerificationFailed(
                "Condensation graph contains a cycle".to_string(),
            ));
        }

        Ok(())
    }

    /// Verify that a component is strongly connected using in-component BFS
    fn verify_component_connectivity(
        &self,
        graph: &DiGraph,
        result: &SCCResult,
        component: &StronglyConnectedComponent,
    ) -> Result<(), SCCError> {
        let inside = |v: NodeId| result.membership[v.0] == component.id;

        for direction in [Direction::Forward, Direction::Reverse] {
            let reached = traversal::bfs(graph, component.root, direction, inside);
            if reached.len() != component.size() {
                return Err(SCCError::VerificationFailed(format!(
                    "Component rooted at {} is not strongly connected",
                    graph.name_of(component.root)
                )));
            }
        }

        Ok(())
    }

    /// Get statistics of the most recent run
    pub fn get_statistics(&self) -> &SCCStatistics {
        &self.statistics
    }

    /// Reset algorithm statistics
    pub fn reset_statistics(&mut self) {
        self.statistics = SCCStatistics::default();
    }

    /// Check if the graph is strongly connected (single SCC)
    pub fn is_strongly_connected(&mut self, graph: &DiGraph) -> Result<bool, SCCError> {
        Ok(self.compute_scc(graph)?.is_strongly_connected())
    }

    /// Find the largest strongly connected component
    pub fn largest_scc(
        &mut self,
        graph: &DiGraph,
    ) -> Result<Option<StronglyConnectedComponent>, SCCError> {
        let result = self.compute_scc(graph)?;
        Ok(result.largest().cloned())
    }

    /// Whether two named vertices are mutually reachable
    pub fn are_strongly_connected(
        &mut self,
        graph: &DiGraph,
        u: &str,
        v: &str,
    ) -> Result<bool, SCCError> {
        for name in [u, v] {
            if !graph.contains(name) {
                return Err(SCCError::InvalidVertex(name.to_string()));
            }
        }
        Ok(self.compute_scc(graph)?.are_strongly_connected(u, v))
    }
}

impl Default for StronglyConnectedComponents {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for StronglyConnectedComponents {
    fn name(&self) -> &'static str {
        "Strongly Connected Components (Kosaraju)"
    }

    fn category(&self) -> &'static str {
        "connectivity"
    }

    fn description(&self) -> &'static str {
        "Kosaraju's algorithm for finding strongly connected components in directed graphs. \
         A first depth-first pass records finish order; a second pass over the transposed graph, \
         taken in decreasing finish order, grows exactly one component per tree in O(V+E) time."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(V + E)", "O(V)")
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "track_statistics" | "verify_result" => {
                parse_bool_parameter(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::invalid_parameter(
                name,
                "Unknown parameter. Valid parameters: track_statistics, verify_result",
            )),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|s| s.as_str())
    }

    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }
}
