//! Edge record
//!
//! Edges are directed. The source is always a node; the destination is an
//! [`Endpoint`], so an edge may point at another edge (restricted
//! hyperedge). An edge keeps the ids of the hyperedges pointing at it so
//! removal can cascade to them.

use super::factory::EDGE_KIND;
use super::node::remove_edge_id;
use super::types::{EdgeId, Endpoint, NodeId};

/// A directed edge in the graph
#[derive(Debug, Clone)]
pub struct Edge<E> {
    /// Source node (edge goes FROM this node)
    source: NodeId,

    /// Destination node or edge (edge goes TO this endpoint)
    destination: Endpoint,

    /// Hyperedges whose destination is this edge
    in_hyper_edges: Vec<EdgeId>,

    kind: String,

    /// User payload
    pub data: E,
}

impl<E> Edge<E> {
    /// Create an edge of the base kind between `source` and `destination`
    pub fn new(source: NodeId, destination: impl Into<Endpoint>, data: E) -> Self {
        Self::with_kind(EDGE_KIND, source, destination, data)
    }

    pub fn with_kind(
        kind: impl Into<String>,
        source: NodeId,
        destination: impl Into<Endpoint>,
        data: E,
    ) -> Self {
        Edge {
            source,
            destination: destination.into(),
            in_hyper_edges: Vec::new(),
            kind: kind.into(),
            data,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> Endpoint {
        self.destination
    }

    /// True when the destination is an edge
    pub fn is_hyper_edge(&self) -> bool {
        self.destination.is_edge()
    }

    /// Check if this edge goes FROM `source` TO `destination`
    pub fn connects(&self, source: NodeId, destination: Endpoint) -> bool {
        self.source == source && self.destination == destination
    }

    pub fn in_hyper_edges(&self) -> &[EdgeId] {
        &self.in_hyper_edges
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> &E {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut E {
        &mut self.data
    }

    pub fn into_data(self) -> E {
        self.data
    }

    pub(crate) fn add_in_hyper_edge(&mut self, edge: EdgeId) {
        self.in_hyper_edges.push(edge);
    }

    pub(crate) fn remove_in_hyper_edge(&mut self, edge: EdgeId) -> bool {
        remove_edge_id(&mut self.in_hyper_edges, edge)
    }

    pub(crate) fn detach(&mut self) {
        self.in_hyper_edges.clear();
    }
}
