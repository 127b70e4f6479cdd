//! Capacitated flow network data structures
//!
//! A [`Network`] is a [`DiGraph`] by composition: the graph records plain
//! connectivity (so every directed-graph algorithm runs on a network
//! unchanged), while the network owns one [`FlowNode`] accumulator per vertex
//! and an [`Arc`] per inserted `(from, to, capacity)` triple.
//!
//! Parallel arcs between the same pair of vertices are kept as distinct
//! [`Arc`]s with their own flow; they collapse to a single adjacency entry in
//! the underlying graph. Arcs in opposite directions are independent as well:
//! an arc's reverse residual only ever cancels that arc's own flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::{FlowError, MaxFlowResult, MaxFlowSolver, MinCut};
use crate::algorithm::traits::NodeId;
use crate::data_structures::directed::{DiGraph, Node};
use crate::data_structures::error::GraphError;

/// Arc capacity; exact integers keep repeated augmentation drift-free
pub type Capacity = i64;

/// Flow value carried by an arc or through a vertex
pub type Flow = i64;

/// Index of an arc in insertion order
pub type ArcId = usize;

/// Directed-graph vertex with inflow / outflow accounting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    node: NodeId,
    inflow: Flow,
    outflow: Flow,
}

impl FlowNode {
    fn new(node: NodeId) -> Self {
        Self {
            node,
            inflow: 0,
            outflow: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.node
    }

    /// Total flow on arcs entering this vertex
    pub fn inflow(&self) -> Flow {
        self.inflow
    }

    /// Total flow on arcs leaving this vertex
    pub fn outflow(&self) -> Flow {
        self.outflow
    }

    /// Emits flow without receiving any
    pub fn is_source(&self) -> bool {
        self.inflow == 0 && self.outflow > 0
    }

    /// Receives flow without emitting any
    pub fn is_sink(&self) -> bool {
        self.inflow > 0 && self.outflow == 0
    }

    /// Whether inflow equals outflow
    pub fn is_balanced(&self) -> bool {
        self.inflow == self.outflow
    }
}

/// Capacity-constrained directed edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arc {
    id: ArcId,
    from: NodeId,
    to: NodeId,
    capacity: Capacity,
    flow: Flow,
}

impl Arc {
    fn new(id: ArcId, from: NodeId, to: NodeId, capacity: Capacity) -> Self {
        Self {
            id,
            from,
            to,
            capacity,
            flow: 0,
        }
    }

    pub fn id(&self) -> ArcId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Remaining capacity to push more flow forward
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }

    /// Residual capacity on the reverse edge (i.e. retractable flow)
    pub fn reverse_residual_capacity(&self) -> Capacity {
        self.flow
    }

    /// Push flow through the arc within its residual capacity
    pub fn push_flow(&mut self, delta: Flow) -> Result<(), FlowError> {
        if delta < 0 || delta > self.residual_capacity() {
            return Err(FlowError::CapacityExceeded {
                arc: self.id,
                requested: delta,
                available: self.residual_capacity(),
            });
        }
        self.flow += delta;
        Ok(())
    }

    /// Retract flow previously pushed through the arc
    pub fn cancel_flow(&mut self, delta: Flow) -> Result<(), FlowError> {
        if delta < 0 || delta > self.reverse_residual_capacity() {
            return Err(FlowError::CapacityExceeded {
                arc: self.id,
                requested: delta,
                available: self.reverse_residual_capacity(),
            });
        }
        self.flow -= delta;
        Ok(())
    }

    pub(crate) fn clear_flow(&mut self) {
        self.flow = 0;
    }
}

/// Flow network over [`FlowNode`]s and [`Arc`]s
///
/// Source and sink are chosen per query, so the same network can be solved for
/// several terminal pairs. Every solve starts from zero flow.
///
/// The capacities of all arcs together must fit in a [`Capacity`]. Every flow
/// value, vertex accumulator and cut capacity is bounded by that total, so no
/// sum computed during a solve can overflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    graph: DiGraph,
    flow_nodes: Vec<FlowNode>,
    arcs: Vec<Arc>,
    /// Arc ids leaving each vertex, indexed by `NodeId`
    outgoing: Vec<Vec<ArcId>>,
    /// Arc ids entering each vertex, indexed by `NodeId`
    incoming: Vec<Vec<ArcId>>,
    total_capacity: Capacity,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a network from a vertex list and `(from, to, capacity)` triples
    pub fn from_parts<V, S, E, A, B>(vertices: V, arcs: E) -> Result<Self, GraphError>
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = (A, B, Capacity)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut network = Self::new();
        for v in vertices {
            network.add_vertex(v)?;
        }
        for (from, to, capacity) in arcs {
            network.add_arc(from.as_ref(), to.as_ref(), capacity)?;
        }
        Ok(network)
    }

    pub fn add_vertex(&mut self, name: impl Into<String>) -> Result<NodeId, GraphError> {
        let id = self.graph.add_vertex(name)?;
        self.flow_nodes.push(FlowNode::new(id));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        Ok(id)
    }

    /// Adds a capacity-constrained arc `from -> to`
    pub fn add_arc(
        &mut self,
        from: &str,
        to: &str,
        capacity: Capacity,
    ) -> Result<ArcId, GraphError> {
        let u = self.graph.id_of(from)?;
        let v = self.graph.id_of(to)?;
        if capacity < 0 {
            return Err(GraphError::NegativeCapacity {
                from: from.to_string(),
                to: to.to_string(),
                capacity,
            });
        }
        self.total_capacity = self.total_capacity.checked_add(capacity).ok_or_else(|| {
            GraphError::CapacityOverflow {
                from: from.to_string(),
                to: to.to_string(),
                capacity,
            }
        })?;

        self.graph.connect(u, v);

        let id = self.arcs.len();
        self.arcs.push(Arc::new(id, u, v, capacity));
        self.outgoing[u.0].push(id);
        self.incoming[v.0].push(id);
        Ok(id)
    }

    /// Connectivity view of the network
    pub fn as_digraph(&self) -> &DiGraph {
        &self.graph
    }

    pub fn contains(&self, name: &str) -> bool {
        self.graph.contains(name)
    }

    pub fn node(&self, name: &str) -> Result<&Node, GraphError> {
        self.graph.node(name)
    }

    pub fn flow_node(&self, name: &str) -> Result<&FlowNode, GraphError> {
        self.graph.id_of(name).map(|id| &self.flow_nodes[id.0])
    }

    pub fn flow_nodes(&self) -> &[FlowNode] {
        &self.flow_nodes
    }

    pub fn name_of(&self, id: NodeId) -> &str {
        self.graph.name_of(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Sum of every arc capacity, an upper bound on any flow value
    pub fn total_capacity(&self) -> Capacity {
        self.total_capacity
    }

    /// Arcs in insertion order
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn arc(&self, id: ArcId) -> Option<&Arc> {
        self.arcs.get(id)
    }

    /// Every arc from `from` to `to`, parallel arcs included
    pub fn arcs_between(&self, from: &str, to: &str) -> Result<Vec<&Arc>, GraphError> {
        let u = self.graph.id_of(from)?;
        let v = self.graph.id_of(to)?;
        Ok(self.outgoing[u.0]
            .iter()
            .map(|&id| &self.arcs[id])
            .filter(|arc| arc.to == v)
            .collect())
    }

    pub(crate) fn outgoing_arcs(&self, id: NodeId) -> &[ArcId] {
        &self.outgoing[id.0]
    }

    pub(crate) fn incoming_arcs(&self, id: NodeId) -> &[ArcId] {
        &self.incoming[id.0]
    }

    /// Resolves a source/sink pair for a solve
    pub(crate) fn terminals(
        &self,
        source: &str,
        sink: &str,
    ) -> Result<(NodeId, NodeId), FlowError> {
        let s = self
            .graph
            .id_of(source)
            .map_err(|_| FlowError::UnknownTerminal(source.to_string()))?;
        let t = self
            .graph
            .id_of(sink)
            .map_err(|_| FlowError::UnknownTerminal(sink.to_string()))?;
        if s == t {
            return Err(FlowError::SourceEqualsSink(source.to_string()));
        }
        Ok((s, t))
    }

    /// Zero every arc flow and vertex accumulator
    pub fn reset_flows(&mut self) {
        for arc in &mut self.arcs {
            arc.clear_flow();
        }
        for node in &mut self.flow_nodes {
            node.inflow = 0;
            node.outflow = 0;
        }
    }

    /// Installs a solved flow assignment and recomputes vertex accumulators
    pub(crate) fn apply_flows(&mut self, flows: &[Flow]) {
        self.reset_flows();
        for (arc, &flow) in self.arcs.iter_mut().zip(flows) {
            arc.flow = flow;
            self.flow_nodes[arc.from.0].outflow += flow;
            self.flow_nodes[arc.to.0].inflow += flow;
        }
    }

    /// Maximum flow value from `source` to `sink` (Edmonds-Karp)
    ///
    /// Leaves every arc's flow set to one maximizing assignment.
    pub fn max_flow(&mut self, source: &str, sink: &str) -> Result<Flow, FlowError> {
        Ok(self.max_flow_result(source, sink)?.value)
    }

    /// Minimum cut separating `source` from `sink`
    ///
    /// Re-solves from zero flow and reads the cut off the converged residual
    /// graph; its capacity equals the maximum flow value.
    pub fn min_cut(&mut self, source: &str, sink: &str) -> Result<MinCut, FlowError> {
        Ok(self.max_flow_result(source, sink)?.min_cut)
    }

    /// Maximum flow value, minimum cut and solver metrics in one solve
    pub fn max_flow_result(
        &mut self,
        source: &str,
        sink: &str,
    ) -> Result<MaxFlowResult, FlowError> {
        MaxFlowSolver::new().solve(self, source, sink)
    }
}
