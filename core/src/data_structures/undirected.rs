//! Light-weight undirected graph over a fixed-size adjacency matrix
//!
//! Vertices are labels mapped to matrix indices at construction. Edges are
//! symmetric weighted cells; a weight of zero means "no edge". Nothing in the
//! directed or flow modules depends on this representation.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::data_structures::error::GraphError;

/// Edge weight stored in the adjacency matrix
pub type Weight = i64;

/// Graph vertex identified by a unique label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub id: String,
}

impl Vertex {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Weighted undirected connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub start: String,
    pub end: String,
    pub weight: Weight,
}

impl Edge {
    pub fn new(start: impl Into<String>, end: impl Into<String>, weight: Weight) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            weight,
        }
    }
}

/// Adjacency-matrix undirected graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndiGraph {
    labels: Vec<String>,
    key: HashMap<String, usize>,
    matrix: Vec<Vec<Weight>>,
}

impl UndiGraph {
    pub fn new<V, E>(vertices: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator<Item = Vertex>,
        E: IntoIterator<Item = Edge>,
    {
        let mut labels = Vec::new();
        let mut key = HashMap::new();
        for vertex in vertices {
            if key.contains_key(&vertex.id) {
                return Err(GraphError::DuplicateVertex(vertex.id));
            }
            key.insert(vertex.id.clone(), labels.len());
            labels.push(vertex.id);
        }

        let size = labels.len();
        let mut graph = Self {
            labels,
            key,
            matrix: vec![vec![0; size]; size],
        };
        graph.add_edges(edges)?;
        Ok(graph)
    }

    fn index(&self, label: &str) -> Result<usize, GraphError> {
        self.key
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(label.to_string()))
    }

    fn check(&self, index: usize) -> Result<usize, GraphError> {
        if index < self.size() {
            Ok(index)
        } else {
            Err(GraphError::UnknownIndex {
                index,
                size: self.size(),
            })
        }
    }

    /// Sets both matrix cells of an edge; a later edge overwrites an earlier one
    pub fn add_edge(&mut self, edge: &Edge) -> Result<(), GraphError> {
        let i = self.index(&edge.start)?;
        let j = self.index(&edge.end)?;
        self.matrix[i][j] = edge.weight;
        self.matrix[j][i] = edge.weight;
        Ok(())
    }

    pub fn add_edges<E>(&mut self, edges: E) -> Result<(), GraphError>
    where
        E: IntoIterator<Item = Edge>,
    {
        for edge in edges {
            self.add_edge(&edge)?;
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn is_vertex(&self, label: &str) -> bool {
        self.key.contains_key(label)
    }

    /// Label of the vertex at matrix position `index`
    pub fn label(&self, index: usize) -> Result<&str, GraphError> {
        self.check(index).map(|i| self.labels[i].as_str())
    }

    /// Weight between two labelled vertices, 0 if unconnected
    pub fn edge(&self, a: &str, b: &str) -> Result<Weight, GraphError> {
        Ok(self.matrix[self.index(a)?][self.index(b)?])
    }

    /// Weight between two matrix positions, 0 if unconnected
    pub fn edge_at(&self, i: usize, j: usize) -> Result<Weight, GraphError> {
        Ok(self.matrix[self.check(i)?][self.check(j)?])
    }

    /// Breadth-first visit order from `source`
    ///
    /// Neighbors are enqueued in matrix column order.
    pub fn bfs(&self, source: &str) -> Result<Vec<String>, GraphError> {
        let root = self.index(source)?;
        Ok(self.bfs_from(root))
    }

    fn bfs_from(&self, root: usize) -> Vec<String> {
        let mut visited = vec![false; self.size()];
        let mut queue = VecDeque::new();
        let mut order = Vec::new();

        visited[root] = true;
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            trace!("Current vertex: {}", self.labels[current]);
            order.push(self.labels[current].clone());
            for (i, &weight) in self.matrix[current].iter().enumerate() {
                if weight != 0 && !visited[i] {
                    visited[i] = true;
                    queue.push_back(i);
                }
            }
        }

        order
    }

    /// Breadth-first order from every vertex, in matrix order
    pub fn bfs_all(&self) -> Vec<Vec<String>> {
        (0..self.size()).map(|root| self.bfs_from(root)).collect()
    }

    /// Present edges found by scanning the upper triangle of the matrix
    ///
    /// Each undirected edge is reported once; self-loops are skipped.
    pub fn traverse(&self) -> Vec<(String, String, Weight)> {
        let mut found = Vec::new();
        for i in 0..self.size() {
            for j in (i + 1)..self.size() {
                let weight = self.matrix[i][j];
                if weight != 0 {
                    found.push((self.labels[i].clone(), self.labels[j].clone(), weight));
                }
            }
        }
        found
    }
}

impl fmt::Display for UndiGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.labels {
            write!(f, "\t{}", label)?;
        }
        for (label, row) in self.labels.iter().zip(&self.matrix) {
            write!(f, "\n{}", label)?;
            for weight in row {
                write!(f, "\t{}", weight)?;
            }
        }
        Ok(())
    }
}
