//! Maximum Flow / Minimum Cut Algorithm Implementation
//!
//! This module implements the Edmonds-Karp specialization of Ford-Fulkerson:
//! repeatedly find a shortest (fewest-arc) augmenting path in the residual
//! graph by breadth-first search, push the path's bottleneck along it, and stop
//! when the sink is no longer reachable. The set of vertices still reachable
//! from the source at that point defines a minimum cut.
//!
//! # Residual Graph
//!
//! Each arc contributes up to two residual edges:
//! - a forward edge `from -> to` with capacity `capacity - flow`
//! - a backward edge `to -> from` with capacity `flow` (flow cancellation)
//!
//! Both are read from a [`ResidualTable`] indexed by arc id. The table persists
//! across every augmentation of one solve and is rebuilt from zero for the
//! next, so solves never build on each other.
//!
//! # Algorithmic Complexity
//!
//! - **Augmentations**: O(V·E) - shortest-path distances never decrease
//! - **Time Complexity**: O(V·E²) - one O(E) search per augmentation
//! - **Space Complexity**: O(V + E)
//!
//! Choosing the breadth-first rule is what bounds the augmentation count; an
//! arbitrary (e.g. depth-first) path choice loses that bound.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeSet, HashMap, VecDeque};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    parse_bool_parameter, Algorithm, AlgorithmComplexity, AlgorithmError, NodeId,
};
use crate::algorithm::traversal::Direction;
use crate::data_structures::error::GraphError;
use crate::data_structures::flow::{Arc, ArcId, Capacity, Flow, Network};

/// Flow algorithm errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Source and sink are both {0}")]
    SourceEqualsSink(String),

    #[error("Invalid source or sink vertex: {0}")]
    UnknownTerminal(String),

    #[error("Arc {arc} cannot take {requested} units, residual is {available}")]
    CapacityExceeded {
        arc: ArcId,
        requested: Flow,
        available: Capacity,
    },

    #[error("Augmentation limit of {0} reached before convergence")]
    FlowLimitExceeded(usize),

    #[error("Invalid flow assignment: {0}")]
    InvalidAssignment(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// One residual edge of an augmenting path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathStep {
    arc: ArcId,
    /// `Forward` pushes along the arc, `Reverse` cancels its flow
    direction: Direction,
}

/// Per-arc flow table for one solve
///
/// Holds a working copy of every arc; flow only changes through the arcs'
/// checked `push_flow` / `cancel_flow`, so `0 <= flow <= capacity` holds after
/// every augmentation.
#[derive(Debug, Clone)]
pub struct ResidualTable {
    arcs: Vec<Arc>,
}

impl ResidualTable {
    /// Zero-flow table over the network's arcs
    pub fn new(network: &Network) -> Self {
        let mut arcs = network.arcs().to_vec();
        for arc in &mut arcs {
            arc.clear_flow();
        }
        Self { arcs }
    }

    /// Capacity left on the forward residual edge of `arc`
    pub fn forward(&self, arc: ArcId) -> Capacity {
        self.arcs[arc].residual_capacity()
    }

    /// Capacity on the backward residual edge of `arc`
    pub fn backward(&self, arc: ArcId) -> Capacity {
        self.arcs[arc].reverse_residual_capacity()
    }

    fn residual(&self, step: PathStep) -> Capacity {
        match step.direction {
            Direction::Forward => self.forward(step.arc),
            Direction::Reverse => self.backward(step.arc),
        }
    }

    fn augment(&mut self, path: &[PathStep], amount: Flow) -> Result<(), FlowError> {
        for step in path {
            let arc = &mut self.arcs[step.arc];
            match step.direction {
                Direction::Forward => arc.push_flow(amount)?,
                Direction::Reverse => arc.cancel_flow(amount)?,
            }
        }
        Ok(())
    }

    /// Current flow of every arc, in arc id order
    pub fn flows(&self) -> Vec<Flow> {
        self.arcs.iter().map(|arc| arc.flow()).collect()
    }
}

/// Arc belonging to a minimum cut
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutArc {
    pub arc: ArcId,
    pub from: String,
    pub to: String,
    pub capacity: Capacity,
}

/// Minimum-capacity arc set separating source from sink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Cut arcs in arc insertion order
    pub arcs: Vec<CutArc>,
    /// Vertices reachable from the source in the final residual graph
    pub source_side: Vec<String>,
}

impl MinCut {
    /// Total capacity of the cut arcs
    pub fn capacity(&self) -> Capacity {
        self.arcs.iter().map(|arc| arc.capacity).sum()
    }

    /// Cut arcs as `(from, to)` identifier pairs
    pub fn edges(&self) -> BTreeSet<(String, String)> {
        self.arcs
            .iter()
            .map(|arc| (arc.from.clone(), arc.to.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// Number of residual breadth-first searches, including the final failing one
    pub bfs_runs: usize,
    /// Residual edges inspected across all searches
    pub arcs_examined: usize,
    /// Length of the longest augmenting path
    pub longest_path: usize,
}

/// Maximum flow result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Maximum flow value
    pub value: Flow,
    /// Minimum cut read off the converged residual graph
    pub min_cut: MinCut,
    /// Algorithm performance metrics
    pub metrics: FlowMetrics,
}

/// Edmonds-Karp maximum flow solver
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    /// Algorithm parameters
    parameters: HashMap<String, String>,
    /// Cap on augmentations per solve, `None` when unlimited
    max_augmentations: Option<usize>,
    verify_result: bool,
    /// Metrics of the most recent solve
    metrics: FlowMetrics,
}

impl MaxFlowSolver {
    /// Create new maximum flow solver with default parameters
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("max_augmentations".to_string(), "unlimited".to_string());
        parameters.insert("verify_result".to_string(), "true".to_string());

        Self {
            parameters,
            max_augmentations: None,
            verify_result: true,
            metrics: FlowMetrics::default(),
        }
    }

    /// Get metrics of the most recent solve
    pub fn get_metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    /// Solve maximum flow from `source` to `sink` and write the flow into `network`
    pub fn solve(
        &mut self,
        network: &mut Network,
        source: &str,
        sink: &str,
    ) -> Result<MaxFlowResult, FlowError> {
        let (s, t) = network.terminals(source, sink)?;
        network.reset_flows();

        let mut table = ResidualTable::new(network);
        let mut metrics = FlowMetrics::default();
        let mut value: Flow = 0;

        debug!(
            "Edmonds-Karp {} -> {} over {} vertices / {} arcs",
            source,
            sink,
            network.node_count(),
            network.arc_count()
        );

        loop {
            metrics.bfs_runs += 1;
            let Some(path) = augmenting_path(network, &table, s, t, &mut metrics) else {
                break;
            };

            if let Some(limit) = self.max_augmentations {
                if metrics.augmentations >= limit {
                    self.metrics = metrics;
                    return Err(FlowError::FlowLimitExceeded(limit));
                }
            }

            let bottleneck = path
                .iter()
                .map(|&step| table.residual(step))
                .min()
                .unwrap_or(0);
            table.augment(&path, bottleneck)?;

            // Bounded by the network's total capacity
            value += bottleneck;
            metrics.augmentations += 1;
            metrics.longest_path = metrics.longest_path.max(path.len());
            trace!(
                "Augmentation {}: {} arcs, bottleneck {}, total {}",
                metrics.augmentations,
                path.len(),
                bottleneck,
                value
            );
        }

        network.apply_flows(&table.flows());
        let min_cut = cut_from_residual(network, &table, s, &mut metrics);

        debug!(
            "Max flow {} -> {} = {} after {} augmentations",
            source, sink, value, metrics.augmentations
        );

        let result = MaxFlowResult {
            value,
            min_cut,
            metrics: metrics.clone(),
        };
        self.metrics = metrics;

        if self.verify_result {
            verify_flow(network, s, t, &result)?;
        }

        Ok(result)
    }
}

impl Default for MaxFlowSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest augmenting path from `s` to `t` in the residual graph
///
/// Forward residual edges of a vertex are explored before its backward ones,
/// each in arc insertion order.
fn augmenting_path(
    network: &Network,
    table: &ResidualTable,
    s: NodeId,
    t: NodeId,
    metrics: &mut FlowMetrics,
) -> Option<Vec<PathStep>> {
    let mut parent: Vec<Option<PathStep>> = vec![None; network.node_count()];
    let mut visited = vec![false; network.node_count()];
    let mut queue = VecDeque::new();

    visited[s.0] = true;
    queue.push_back(s);

    'search: while let Some(u) = queue.pop_front() {
        let forward = network
            .outgoing_arcs(u)
            .iter()
            .map(|&arc| (arc, Direction::Forward));
        let backward = network
            .incoming_arcs(u)
            .iter()
            .map(|&arc| (arc, Direction::Reverse));

        for (arc, direction) in forward.chain(backward) {
            metrics.arcs_examined += 1;
            let step = PathStep { arc, direction };
            if table.residual(step) <= 0 {
                continue;
            }
            let edge = &network.arcs()[arc];
            let next = match direction {
                Direction::Forward => edge.to(),
                Direction::Reverse => edge.from(),
            };
            if visited[next.0] {
                continue;
            }
            visited[next.0] = true;
            parent[next.0] = Some(step);
            if next == t {
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !visited[t.0] {
        return None;
    }

    let mut path = Vec::new();
    let mut v = t;
    while v != s {
        let step = parent[v.0]?;
        let edge = &network.arcs()[step.arc];
        v = match step.direction {
            Direction::Forward => edge.from(),
            Direction::Reverse => edge.to(),
        };
        path.push(step);
    }
    path.reverse();
    Some(path)
}

/// Vertices reachable from `s` over positive residual edges
fn residual_reach(
    network: &Network,
    table: &ResidualTable,
    s: NodeId,
    metrics: &mut FlowMetrics,
) -> Vec<bool> {
    let mut visited = vec![false; network.node_count()];
    let mut queue = VecDeque::new();
    visited[s.0] = true;
    queue.push_back(s);

    while let Some(u) = queue.pop_front() {
        for &arc in network.outgoing_arcs(u) {
            metrics.arcs_examined += 1;
            let next = network.arcs()[arc].to();
            if table.forward(arc) > 0 && !visited[next.0] {
                visited[next.0] = true;
                queue.push_back(next);
            }
        }
        for &arc in network.incoming_arcs(u) {
            metrics.arcs_examined += 1;
            let next = network.arcs()[arc].from();
            if table.backward(arc) > 0 && !visited[next.0] {
                visited[next.0] = true;
                queue.push_back(next);
            }
        }
    }

    visited
}

/// Arcs leaving the source side of the converged residual graph
///
/// Zero-capacity arcs carry nothing and are left out of the cut.
fn cut_from_residual(
    network: &Network,
    table: &ResidualTable,
    s: NodeId,
    metrics: &mut FlowMetrics,
) -> MinCut {
    let reach = residual_reach(network, table, s, metrics);

    let arcs = network
        .arcs()
        .iter()
        .filter(|arc| reach[arc.from().0] && !reach[arc.to().0] && arc.capacity() > 0)
        .map(|arc| CutArc {
            arc: arc.id(),
            from: network.name_of(arc.from()).to_string(),
            to: network.name_of(arc.to()).to_string(),
            capacity: arc.capacity(),
        })
        .collect();

    let source_side = network
        .flow_nodes()
        .iter()
        .filter(|node| reach[node.id().0])
        .map(|node| network.name_of(node.id()).to_string())
        .collect();

    MinCut { arcs, source_side }
}

/// Checks capacity bounds, conservation and max-flow / min-cut duality
fn verify_flow(
    network: &Network,
    s: NodeId,
    t: NodeId,
    result: &MaxFlowResult,
) -> Result<(), FlowError> {
    for arc in network.arcs() {
        if arc.flow() < 0 || arc.flow() > arc.capacity() {
            return Err(FlowError::InvalidAssignment(format!(
                "arc {} -> {} carries {} of {}",
                network.name_of(arc.from()),
                network.name_of(arc.to()),
                arc.flow(),
                arc.capacity()
            )));
        }
    }

    for node in network.flow_nodes() {
        if node.id() != s && node.id() != t && !node.is_balanced() {
            return Err(FlowError::InvalidAssignment(format!(
                "conservation violated at {}: in {} / out {}",
                network.name_of(node.id()),
                node.inflow(),
                node.outflow()
            )));
        }
    }

    let source = &network.flow_nodes()[s.0];
    let net_out = source.outflow() - source.inflow();
    if net_out != result.value {
        return Err(FlowError::InvalidAssignment(format!(
            "net source outflow {} differs from flow value {}",
            net_out, result.value
        )));
    }

    if result.min_cut.capacity() != result.value {
        return Err(FlowError::InvalidAssignment(format!(
            "cut capacity {} differs from flow value {}",
            result.min_cut.capacity(),
            result.value
        )));
    }

    Ok(())
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> &'static str {
        "Edmonds-Karp maximum flow: Ford-Fulkerson with breadth-first shortest augmenting paths, \
         bounding the number of augmentations by O(V·E). The converged residual graph yields a \
         minimum cut whose capacity equals the maximum flow."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(V·E²)", "O(V + E)")
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "max_augmentations" => {
                self.max_augmentations = match value {
                    "unlimited" => None,
                    _ => {
                        let limit = value.parse::<usize>().map_err(|_| {
                            AlgorithmError::invalid_parameter(
                                name,
                                "max_augmentations must be a positive integer or 'unlimited'",
                            )
                        })?;
                        if limit == 0 {
                            return Err(AlgorithmError::invalid_parameter(
                                name,
                                "max_augmentations must be > 0",
                            ));
                        }
                        Some(limit)
                    }
                };
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            "verify_result" => {
                self.verify_result = parse_bool_parameter(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::invalid_parameter(
                name,
                "Unknown parameter. Valid parameters: max_augmentations, verify_result",
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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn classic() -> Network {
        Network::from_parts(
            ["s", "a", "b", "t"],
            [
                ("s", "a", 10),
                ("s", "b", 5),
                ("a", "b", 15),
                ("a", "t", 10),
                ("b", "t", 10),
            ],
        )
        .unwrap()
    }

    fn pair(from: &str, to: &str) -> (String, String) {
        (from.to_string(), to.to_string())
    }

    #[test]
    fn test_max_flow_solver_creation() {
        let solver = MaxFlowSolver::new();
        assert_eq!(solver.name(), "Edmonds-Karp");
        assert_eq!(solver.category(), "max_flow");
        assert_eq!(solver.complexity().time_complexity, "O(V·E²)");
    }

    #[test]
    fn test_parameter_setting() {
        let mut solver = MaxFlowSolver::new();

        assert!(solver.set_parameter("max_augmentations", "50").is_ok());
        assert_eq!(solver.get_parameter("max_augmentations"), Some("50"));
        assert!(solver.set_parameter("max_augmentations", "unlimited").is_ok());
        assert!(solver.set_parameter("verify_result", "false").is_ok());
        assert_eq!(solver.get_parameters().len(), 2);

        assert!(solver.set_parameter("invalid_param", "value").is_err());
        assert!(solver.set_parameter("max_augmentations", "0").is_err());
        assert!(solver.set_parameter("max_augmentations", "many").is_err());
        assert!(solver.set_parameter("verify_result", "yes").is_err());
    }

    #[test]
    fn test_classic_network() {
        init_logging();
        let mut network = classic();
        assert_eq!(network.max_flow("s", "t").unwrap(), 15);

        let cut = network.min_cut("s", "t").unwrap();
        assert_eq!(cut.capacity(), 15);
        assert_eq!(cut.edges(), BTreeSet::from([pair("s", "a"), pair("s", "b")]));
        assert_eq!(cut.source_side, vec!["s"]);
    }

    #[test]
    fn test_no_path() {
        let mut network =
            Network::from_parts(["s", "t"], Vec::<(&str, &str, Capacity)>::new()).unwrap();
        assert_eq!(network.max_flow("s", "t").unwrap(), 0);

        let cut = network.min_cut("s", "t").unwrap();
        assert!(cut.is_empty());
        assert_eq!(cut.capacity(), 0);
    }

    #[test]
    fn test_simple_direct_and_bottleneck() {
        let mut direct = Network::from_parts(["s", "t"], [("s", "t", 5)]).unwrap();
        assert_eq!(direct.max_flow("s", "t").unwrap(), 5);

        let mut chain =
            Network::from_parts(["s", "a", "t"], [("s", "a", 10), ("a", "t", 3)]).unwrap();
        assert_eq!(chain.max_flow("s", "t").unwrap(), 3);
        assert_eq!(chain.min_cut("s", "t").unwrap().edges(), BTreeSet::from([pair("a", "t")]));
    }

    #[test]
    fn test_flow_values_and_residuals() {
        let mut network = Network::from_parts(["s", "t"], [("s", "t", 7)]).unwrap();
        network.max_flow("s", "t").unwrap();

        let arc = network.arcs_between("s", "t").unwrap()[0];
        assert_eq!(arc.flow(), 7);
        assert_eq!(arc.residual_capacity(), 0);
        assert_eq!(arc.reverse_residual_capacity(), 7);
    }

    #[test]
    fn test_flow_cancellation() {
        // The first shortest path s-a-b-t must be partly undone through the
        // backward residual of a->b to reach the optimum of 2.
        let mut network = Network::from_parts(
            ["s", "a", "b", "c", "d", "t"],
            [
                ("s", "a", 1),
                ("a", "b", 1),
                ("b", "t", 1),
                ("s", "c", 1),
                ("c", "b", 1),
                ("a", "d", 1),
                ("d", "t", 1),
            ],
        )
        .unwrap();

        let mut solver = MaxFlowSolver::new();
        let result = solver.solve(&mut network, "s", "t").unwrap();
        assert_eq!(result.value, 2);
        assert_eq!(result.min_cut.capacity(), 2);
        assert!(result.metrics.augmentations >= 2);
    }

    #[test]
    fn test_parallel_and_opposite_arcs() {
        let mut network = Network::from_parts(
            ["s", "a", "t"],
            [("s", "a", 3), ("s", "a", 4), ("a", "s", 9), ("a", "t", 10)],
        )
        .unwrap();
        assert_eq!(network.max_flow("s", "t").unwrap(), 7);

        let flows: Vec<Flow> = network.arcs().iter().map(|arc| arc.flow()).collect();
        assert_eq!(flows, vec![3, 4, 0, 7]);
        assert_eq!(network.min_cut("s", "t").unwrap().arcs.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_not_usable() {
        let mut network = Network::from_parts(["s", "t"], [("s", "t", 0)]).unwrap();
        assert_eq!(network.max_flow("s", "t").unwrap(), 0);
        assert!(network.min_cut("s", "t").unwrap().is_empty());
    }

    #[test]
    fn test_capacities_at_the_integer_limit() {
        let mut network =
            Network::from_parts(["s", "t"], [("s", "t", i64::MAX - 5), ("s", "t", 5)]).unwrap();
        assert_eq!(network.max_flow("s", "t").unwrap(), i64::MAX);
        assert_eq!(network.min_cut("s", "t").unwrap().capacity(), i64::MAX);
        assert_eq!(network.flow_node("t").unwrap().inflow(), i64::MAX);

        let err = Network::from_parts(["s", "t"], [("s", "t", i64::MAX), ("s", "t", i64::MAX)])
            .unwrap_err();
        assert!(matches!(err, GraphError::CapacityOverflow { .. }));
    }

    #[test]
    fn test_residual_table_rejects_infeasible_augmentation() {
        let network = classic();
        let mut table = ResidualTable::new(&network);
        let forward = [PathStep {
            arc: 0,
            direction: Direction::Forward,
        }];

        assert_eq!(
            table.augment(&forward, 11).unwrap_err(),
            FlowError::CapacityExceeded {
                arc: 0,
                requested: 11,
                available: 10
            }
        );

        let backward = [PathStep {
            arc: 1,
            direction: Direction::Reverse,
        }];
        assert!(table.augment(&backward, 1).is_err());

        table.augment(&forward, 4).unwrap();
        assert_eq!(table.forward(0), 6);
        assert_eq!(table.backward(0), 4);
        assert_eq!(table.flows(), vec![4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_residual_table_starts_from_zero_flow() {
        let mut network = classic();
        network.max_flow("s", "t").unwrap();
        let table = ResidualTable::new(&network);
        assert!(table.flows().iter().all(|&flow| flow == 0));
        assert_eq!(table.forward(0), 10);
    }

    #[test]
    fn test_conservation_and_node_accounting() {
        let mut network = classic();
        network.max_flow("s", "t").unwrap();

        for name in ["a", "b"] {
            assert!(network.flow_node(name).unwrap().is_balanced());
        }
        assert!(network.flow_node("s").unwrap().is_source());
        assert!(network.flow_node("t").unwrap().is_sink());
        assert_eq!(network.flow_node("t").unwrap().inflow(), 15);
    }

    #[test]
    fn test_terminal_errors() {
        let mut network = classic();
        assert_eq!(
            network.max_flow("s", "s").unwrap_err(),
            FlowError::SourceEqualsSink("s".to_string())
        );
        assert_eq!(
            network.max_flow("s", "z").unwrap_err(),
            FlowError::UnknownTerminal("z".to_string())
        );
        assert!(network.min_cut("q", "t").is_err());
    }

    #[test]
    fn test_source_without_outgoing_arcs() {
        let mut network =
            Network::from_parts(["s", "a", "t"], [("a", "s", 4), ("a", "t", 4)]).unwrap();
        assert_eq!(network.max_flow("s", "t").unwrap(), 0);
    }

    #[test]
    fn test_repeated_solves_start_fresh() {
        let mut network = classic();
        let first = network.max_flow_result("s", "t").unwrap();
        let second = network.max_flow_result("s", "t").unwrap();
        assert_eq!(first, second);

        // Different terminals on the same network
        assert_eq!(network.max_flow("a", "t").unwrap(), 20);
        assert_eq!(network.max_flow("s", "b").unwrap(), 15);
    }

    #[test]
    fn test_augmentation_limit() {
        let mut network = classic();
        let mut solver = MaxFlowSolver::new();
        solver.set_parameter("max_augmentations", "1").unwrap();

        let err = solver.solve(&mut network, "s", "t").unwrap_err();
        assert_eq!(err, FlowError::FlowLimitExceeded(1));
        assert_eq!(solver.get_metrics().augmentations, 1);
    }

    #[test]
    fn test_metrics_are_recorded() {
        let mut network = classic();
        let mut solver = MaxFlowSolver::new();
        let result = solver.solve(&mut network, "s", "t").unwrap();

        assert_eq!(result.metrics.augmentations, 2);
        assert_eq!(result.metrics.bfs_runs, 3);
        assert_eq!(result.metrics.longest_path, 2);
        assert_eq!(solver.get_metrics(), &result.metrics);

        let json = serde_json::to_string(&result).unwrap();
        let back: MaxFlowResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_scc_runs_on_network_connectivity() {
        let network = classic();
        let sccs = network.as_digraph().kosaraju_scc();
        assert_eq!(sccs.len(), 4);
    }

    fn arbitrary_network() -> impl Strategy<Value = (usize, Vec<(usize, usize, Capacity)>)> {
        (2usize..10).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n, 0i64..20), 0..40),
            )
        })
    }

    fn build(n: usize, arcs: &[(usize, usize, Capacity)]) -> Network {
        let names: Vec<String> = (0..n).map(|i| format!("v{}", i)).collect();
        let named: Vec<(&str, &str, Capacity)> = arcs
            .iter()
            .map(|&(u, v, c)| (names[u].as_str(), names[v].as_str(), c))
            .collect();
        Network::from_parts(names.clone(), named).unwrap()
    }

    proptest! {
        #[test]
        fn prop_flow_is_feasible_and_matches_cut((n, arcs) in arbitrary_network()) {
            let mut network = build(n, &arcs);
            let sink = format!("v{}", n - 1);

            let mut solver = MaxFlowSolver::new();
            solver.set_parameter("verify_result", "false").unwrap();
            let result = solver.solve(&mut network, "v0", &sink).unwrap();

            for arc in network.arcs() {
                prop_assert!(arc.flow() >= 0);
                prop_assert!(arc.flow() <= arc.capacity());
            }
            for node in network.flow_nodes() {
                let name = network.name_of(node.id());
                if name != "v0" && name != sink {
                    prop_assert_eq!(node.inflow(), node.outflow());
                }
            }
            prop_assert_eq!(result.value, result.min_cut.capacity());
            prop_assert!(result.min_cut.source_side.contains(&"v0".to_string()));
            prop_assert!(!result.min_cut.source_side.contains(&sink));
        }

        #[test]
        fn prop_identical_networks_agree((n, arcs) in arbitrary_network()) {
            let sink = format!("v{}", n - 1);
            let first = build(n, &arcs).max_flow("v0", &sink).unwrap();
            let second = build(n, &arcs).max_flow("v0", &sink).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
