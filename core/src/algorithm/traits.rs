//! Core algorithm trait definitions for the graph theory library
//!
//! This module establishes the shared vocabulary every solver speaks: a
//! strongly typed vertex index, a uniform error type for the trait surface,
//! and the `Algorithm` trait through which solvers expose their identity,
//! complexity and string-typed configuration parameters.
//!
//! # Key Design Principles
//! - Vertex identity is an index into the owning graph, never a live reference
//! - Parameters are validated when set, not when read
//! - Every solver reports its asymptotic cost alongside its name
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::FlowError;
use crate::algorithm::graph::scc::SCCError;
use crate::data_structures::error::GraphError;

/// Node identifier ensuring type safety and preventing mixing with other numeric types
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Comprehensive error types for algorithm operations
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Scc(#[from] SCCError),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

impl AlgorithmError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

impl AlgorithmComplexity {
    pub fn new(time: &str, space: &str) -> Self {
        Self {
            time_complexity: time.to_string(),
            space_complexity: space.to_string(),
        }
    }
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs: nothing computed by one run leaks into the next
/// - Deterministic behavior for a fixed vertex and edge insertion order
pub trait Algorithm: fmt::Debug {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., connectivity, flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> &'static str;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Sets algorithm parameter with validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<&str>;

    /// Returns every configured parameter
    fn get_parameters(&self) -> HashMap<String, String>;
}

/// Parses a boolean parameter value, accepting only `true` and `false`
pub(crate) fn parse_bool_parameter(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AlgorithmError::invalid_parameter(
            name,
            format!("Invalid boolean value: {}. Use 'true' or 'false'", value),
        )),
    }
}
