//! Core graph topology implementation
//!
//! This module implements the topology model with:
//! - Nodes owned by the graph and addressed through generational handles
//! - Directed edges between nodes, with parallel edges allowed
//! - Restricted hyperedges whose destination is another edge
//! - Groups of nodes, a root node cache and control nodes
//! - Behaviours observing every structural mutation
//! - Compile-time policies choosing payloads and containers

mod arena;
pub mod behaviour;
pub mod config;
mod consistency;
pub mod containers;
pub mod edge;
pub mod event;
pub mod factory;
pub mod group;
pub mod node;
pub mod policy;
pub mod store;
pub mod types;

// Re-export main types
pub use behaviour::{BehaviourId, EventLog, EventRecorder, GraphBehaviour, TracingBehaviour};
pub use config::GraphConfig;
pub use containers::{
    ContainerPolicy, Element, FxContainers, IndexedContainers, MembershipIndex, OrderedContainers,
    OrderedList, StdContainers,
};
pub use edge::Edge;
pub use event::TopologyEvent;
pub use factory::{KindRegistry, EDGE_KIND, GROUP_KIND, NODE_KIND};
pub use group::Group;
pub use node::Node;
pub use policy::{DefaultPolicy, TopologyPolicy};
pub use store::{Graph, TopologyError, TopologyResult, TopologyStatistics};
pub use types::{EdgeId, Endpoint, GroupId, NodeId};
