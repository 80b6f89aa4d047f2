//! Topology events
//!
//! Every structural mutation of a graph is described by one event, which
//! is delivered to the registered behaviours.

use super::types::{EdgeId, Endpoint, GroupId, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyEvent {
    NodeInserted {
        node: NodeId,
    },
    NodeRemoved {
        node: NodeId,
    },
    EdgeInserted {
        edge: EdgeId,
        source: NodeId,
        destination: Endpoint,
    },
    EdgeRemoved {
        edge: EdgeId,
        source: NodeId,
        destination: Endpoint,
    },
    GroupInserted {
        group: GroupId,
    },
    GroupRemoved {
        group: GroupId,
    },
    NodeGrouped {
        node: NodeId,
        group: GroupId,
    },
    NodeUngrouped {
        node: NodeId,
        group: GroupId,
    },
    Cleared,
}

impl TopologyEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            TopologyEvent::NodeInserted { .. } => "node_inserted",
            TopologyEvent::NodeRemoved { .. } => "node_removed",
            TopologyEvent::EdgeInserted { .. } => "edge_inserted",
            TopologyEvent::EdgeRemoved { .. } => "edge_removed",
            TopologyEvent::GroupInserted { .. } => "group_inserted",
            TopologyEvent::GroupRemoved { .. } => "group_removed",
            TopologyEvent::NodeGrouped { .. } => "node_grouped",
            TopologyEvent::NodeUngrouped { .. } => "node_ungrouped",
            TopologyEvent::Cleared => "cleared",
        }
    }
}
