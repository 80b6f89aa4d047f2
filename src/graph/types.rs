//! Core handle types for the topology engine
//!
//! Handles are small `Copy` values made of an arena slot index and a
//! generation. A handle outlives the entity it names: once the entity is
//! removed the slot generation moves on and the handle stops resolving.
//!
//! Handles do not record which graph minted them. A handle from another
//! graph is rejected when its slot and generation are not live here, but
//! one that happens to match a live slot names that slot's entity. Keep
//! handles with the graph they came from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node within the graph that created it
///
/// Only meaningful for that graph; see the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn new(index: u32, generation: u32) -> Self {
        NodeId { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}:{})", self.index, self.generation)
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId {
    index: u32,
    generation: u32,
}

impl EdgeId {
    pub fn new(index: u32, generation: u32) -> Self {
        EdgeId { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({}:{})", self.index, self.generation)
    }
}

/// Unique identifier for a node group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct GroupId {
    index: u32,
    generation: u32,
}

impl GroupId {
    pub fn new(index: u32, generation: u32) -> Self {
        GroupId { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({}:{})", self.index, self.generation)
    }
}

/// Destination of an edge
///
/// An edge whose destination is another edge is a restricted hyperedge:
/// its source is always a node, only the destination may be an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Node(NodeId),
    Edge(EdgeId),
}

impl Endpoint {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Endpoint::Node(id) => Some(*id),
            Endpoint::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            Endpoint::Edge(id) => Some(*id),
            Endpoint::Node(_) => None,
        }
    }

    /// True when this endpoint makes the edge a hyperedge
    pub fn is_edge(&self) -> bool {
        matches!(self, Endpoint::Edge(_))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Node(id) => write!(f, "{}", id),
            Endpoint::Edge(id) => write!(f, "{}", id),
        }
    }
}

impl From<NodeId> for Endpoint {
    fn from(id: NodeId) -> Self {
        Endpoint::Node(id)
    }
}

impl From<EdgeId> for Endpoint {
    fn from(id: EdgeId) -> Self {
        Endpoint::Edge(id)
    }
}
