//! Connectivity and flow algorithms over directed graphs
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod scc;

pub use self::max_flow::{
    CutArc, FlowError, FlowMetrics, MaxFlowResult, MaxFlowSolver, MinCut, ResidualTable,
};
pub use self::scc::{
    SCCError, SCCResult, SCCStatistics, StronglyConnectedComponent, StronglyConnectedComponents,
};
