//! Graph traversal utilities shared by the directed-graph algorithms
//!
//! Every traversal is iterative with an explicit stack or queue, so graphs with
//! tens of thousands of vertices cannot overflow the call stack. Each one can
//! run over the forward graph or its transpose without building a second
//! adjacency structure, which is what the two Kosaraju passes rely on.
//!
//! # Algorithms
//!
//! - [`explore`] - depth-first search with enter / finish callbacks
//! - [`dfs_preorder`] - vertices in the order they are first entered
//! - [`finish_order`] - post-order over the whole graph
//! - [`reachable`] - vertices reachable by paths of length one or more
//! - [`bfs`] - breadth-first order, optionally restricted by a predicate

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::NodeId;
use crate::data_structures::directed::DiGraph;

/// Edge orientation followed by a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow edges `u -> v` from `u` to `v`
    Forward,
    /// Follow edges `u -> v` from `v` to `u` (the transposed graph)
    Reverse,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Depth-first search from `start`, skipping vertices already marked in `visited`
///
/// `enter` fires when a vertex is first discovered, `finish` once all of its
/// neighbors have been explored. Neighbors are explored in adjacency order, so
/// the callback sequence matches the recursive formulation exactly.
///
/// Returns the deepest stack size reached.
///
/// # Panics
///
/// Panics if `start` or `visited` do not belong to `graph`.
pub fn explore<E, F>(
    graph: &DiGraph,
    start: NodeId,
    direction: Direction,
    visited: &mut [bool],
    mut enter: E,
    mut finish: F,
) -> usize
where
    E: FnMut(NodeId),
    F: FnMut(NodeId),
{
    if visited[start.0] {
        return 0;
    }
    visited[start.0] = true;
    enter(start);

    let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
    let mut max_depth = 1;

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        let neighbors = graph.neighbors(node, direction);

        if cursor < neighbors.len() {
            frame.1 += 1;
            let next = neighbors[cursor];
            if !visited[next.0] {
                visited[next.0] = true;
                enter(next);
                stack.push((next, 0));
                max_depth = max_depth.max(stack.len());
            }
        } else {
            stack.pop();
            finish(node);
        }
    }

    max_depth
}

/// Vertices reachable from `start` (inclusive) in depth-first pre-order
pub fn dfs_preorder(graph: &DiGraph, start: NodeId, direction: Direction) -> Vec<NodeId> {
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    explore(graph, start, direction, &mut visited, |v| order.push(v), |_| {});
    order
}

/// Post-order of a depth-first search launched from every unvisited vertex
///
/// Launch points are taken in insertion order, and the sequence grows across
/// launches: the last vertex finished is the last element.
pub fn finish_order(graph: &DiGraph, direction: Direction) -> Vec<NodeId> {
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::with_capacity(graph.node_count());
    for node in graph.nodes() {
        explore(graph, node.id(), direction, &mut visited, |_| {}, |v| order.push(v));
    }
    order
}

/// Vertices reachable from `start` by a path with at least one edge
///
/// `start` itself is included only when it lies on a cycle.
pub fn reachable(graph: &DiGraph, start: NodeId, direction: Direction) -> Vec<NodeId> {
    let mut visited = vec![false; graph.node_count()];
    let mut found = Vec::new();
    for &next in graph.neighbors(start, direction) {
        explore(graph, next, direction, &mut visited, |v| found.push(v), |_| {});
    }
    found
}

/// Breadth-first order from `start`, entering only vertices accepted by `admit`
///
/// `start` is always visited.
pub fn bfs<P>(graph: &DiGraph, start: NodeId, direction: Direction, admit: P) -> Vec<NodeId>
where
    P: Fn(NodeId) -> bool,
{
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    visited[start.0] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for &next in graph.neighbors(current, direction) {
            if !visited[next.0] && admit(next) {
                visited[next.0] = true;
                queue.push_back(next);
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> DiGraph {
        // A -> B -> C, A -> C, D isolated
        DiGraph::from_parts(["A", "B", "C", "D"], [("A", "B"), ("B", "C"), ("A", "C")]).unwrap()
    }

    #[test]
    fn test_finish_order_is_postorder() {
        let graph = chain();
        let order: Vec<&str> = finish_order(&graph, Direction::Forward)
            .into_iter()
            .map(|id| graph.name_of(id))
            .collect();
        assert_eq!(order, vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn test_reverse_direction_follows_transpose() {
        let graph = chain();
        let c = graph.id_of("C").unwrap();
        let order: Vec<&str> = dfs_preorder(&graph, c, Direction::Reverse)
            .into_iter()
            .map(|id| graph.name_of(id))
            .collect();
        assert_eq!(order, vec!["C", "B", "A"]);
        assert_eq!(Direction::Reverse.reversed(), Direction::Forward);
    }

    #[test]
    fn test_bfs_respects_admission() {
        let graph = chain();
        let a = graph.id_of("A").unwrap();
        let b = graph.id_of("B").unwrap();
        let order = bfs(&graph, a, Direction::Forward, |v| v != b);
        let names: Vec<&str> = order.into_iter().map(|id| graph.name_of(id)).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_explore_reports_depth() {
        let graph = chain();
        let mut visited = vec![false; graph.node_count()];
        let a = graph.id_of("A").unwrap();
        let depth = explore(&graph, a, Direction::Forward, &mut visited, |_| {}, |_| {});
        assert_eq!(depth, 3);
        assert!(!visited[graph.id_of("D").unwrap().0]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let names: Vec<String> = (0..50_000).map(|i| format!("v{}", i)).collect();
        let edges: Vec<(String, String)> =
            names.windows(2).map(|w| (w[0].clone(), w[1].clone())).collect();
        let graph = DiGraph::from_parts(names.clone(), edges).unwrap();
        let order = finish_order(&graph, Direction::Forward);
        assert_eq!(order.len(), 50_000);
        assert_eq!(graph.name_of(order[0]), "v49999");
    }
}
