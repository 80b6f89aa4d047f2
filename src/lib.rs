//! Topograph
//!
//! An in-memory directed graph topology engine: nodes, edges, restricted
//! hyperedges (edges pointing at edges) and node groups, with observers
//! notified of every structural change.
//!
//! # Features
//!
//! - Nodes, edges and groups owned by the graph in generational arenas;
//!   stale handles never resolve
//! - Parallel edges, self loops and edge-to-edge hyperedges
//! - A maintained root node cache (nodes with no incoming edge)
//! - Control nodes that survive [`Graph::clear`]
//! - Behaviours called back after each mutation, individually switchable
//! - Kind registries building payloads from a string tag
//! - Compile-time policies selecting payload types and the containers
//!   backing the graph's lists and indices
//!
//! ## Example Usage
//!
//! ```rust
//! use topograph::graph::{EventRecorder, Graph, TopologyEvent};
//!
//! let mut graph: Graph = Graph::new();
//! let (recorder, log) = EventRecorder::new();
//! graph.add_behaviour(recorder);
//!
//! let a = graph.create_node().unwrap();
//! let b = graph.create_node().unwrap();
//! let edge = graph.create_edge(a, b).unwrap();
//!
//! // Hyperedge from a node to an edge
//! let c = graph.create_node().unwrap();
//! graph.create_edge(c, edge).unwrap();
//!
//! assert_eq!(graph.edge_count(), 2);
//! assert!(graph.is_root_node(a).unwrap());
//! assert!(!graph.is_root_node(b).unwrap());
//!
//! graph.remove_edge(edge).unwrap();
//! assert_eq!(graph.edge_count(), 0);
//! assert_eq!(log.count(|e| matches!(e, TopologyEvent::EdgeRemoved { .. })), 2);
//! ```

#![warn(clippy::all)]

pub mod graph;

// Re-export main types for convenience
pub use graph::{
    BehaviourId, DefaultPolicy, Edge, EdgeId, Endpoint, Graph, GraphBehaviour, GraphConfig,
    Group, GroupId, Node, NodeId, TopologyError, TopologyEvent, TopologyPolicy, TopologyResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
