//! Runtime graph configuration

use serde::{Deserialize, Serialize};

/// Construction-time settings of a [`Graph`](super::Graph)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Accept several edges between the same source and destination
    pub allow_parallel_edges: bool,
    /// Maximum number of nodes
    pub max_nodes: Option<usize>,
    /// Maximum number of edges
    pub max_edges: Option<usize>,
    /// Maximum number of groups
    pub max_groups: Option<usize>,
    /// Node slots reserved up front
    pub node_capacity: usize,
    /// Edge slots reserved up front
    pub edge_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            allow_parallel_edges: true,
            max_nodes: None,
            max_edges: None,
            max_groups: None,
            node_capacity: 64,
            edge_capacity: 256,
        }
    }
}

impl GraphConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_parallel_edges(mut self, allow: bool) -> Self {
        self.allow_parallel_edges = allow;
        self
    }

    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(max);
        self
    }

    pub fn with_max_edges(mut self, max: usize) -> Self {
        self.max_edges = Some(max);
        self
    }

    pub fn with_max_groups(mut self, max: usize) -> Self {
        self.max_groups = Some(max);
        self
    }
}
