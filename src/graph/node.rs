//! Node record
//!
//! A node carries a user payload plus the topology the graph maintains for
//! it: incident edges, group membership and the control flag. Topology
//! fields are only written by [`Graph`](super::Graph), so a record handed
//! out through `node_mut` can have its payload edited but never its
//! adjacency.

use super::factory::NODE_KIND;
use super::types::{EdgeId, GroupId};

/// A node in the graph
#[derive(Debug, Clone)]
pub struct Node<N> {
    /// Edges whose destination is this node
    in_edges: Vec<EdgeId>,

    /// Edges whose source is this node, hyperedges included
    out_edges: Vec<EdgeId>,

    group: Option<GroupId>,

    control: bool,

    /// Tag of the kind this node was built as
    kind: String,

    /// User payload
    pub data: N,
}

impl<N> Node<N> {
    /// Create a detached node of the base kind
    pub fn new(data: N) -> Self {
        Self::with_kind(NODE_KIND, data)
    }

    /// Create a detached node remembering the kind tag it was built from
    pub fn with_kind(kind: impl Into<String>, data: N) -> Self {
        Node {
            in_edges: Vec::new(),
            out_edges: Vec::new(),
            group: None,
            control: false,
            kind: kind.into(),
            data,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> &N {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut N {
        &mut self.data
    }

    pub fn into_data(self) -> N {
        self.data
    }

    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    pub fn in_degree(&self) -> usize {
        self.in_edges.len()
    }

    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }

    pub fn is_control(&self) -> bool {
        self.control
    }

    pub(crate) fn add_in_edge(&mut self, edge: EdgeId) {
        self.in_edges.push(edge);
    }

    pub(crate) fn add_out_edge(&mut self, edge: EdgeId) {
        self.out_edges.push(edge);
    }

    pub(crate) fn remove_in_edge(&mut self, edge: EdgeId) -> bool {
        remove_edge_id(&mut self.in_edges, edge)
    }

    pub(crate) fn remove_out_edge(&mut self, edge: EdgeId) -> bool {
        remove_edge_id(&mut self.out_edges, edge)
    }

    pub(crate) fn set_group(&mut self, group: Option<GroupId>) {
        self.group = group;
    }

    pub(crate) fn set_control(&mut self, control: bool) {
        self.control = control;
    }

    /// Drop all topology so the record can be handed back to its caller
    pub(crate) fn detach(&mut self) {
        self.in_edges.clear();
        self.out_edges.clear();
        self.group = None;
        self.control = false;
    }
}

impl<N: Default> Default for Node<N> {
    fn default() -> Self {
        Node::new(N::default())
    }
}

/// Remove `edge` from an adjacency list, searching from the most recent
/// entry. An edge appears at most once in each list.
pub(crate) fn remove_edge_id(edges: &mut Vec<EdgeId>, edge: EdgeId) -> bool {
    match edges.iter().rposition(|&candidate| candidate == edge) {
        Some(position) => {
            edges.remove(position);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_detached() {
        let node = Node::new("payload");
        assert_eq!(node.in_degree(), 0);
        assert_eq!(node.out_degree(), 0);
        assert_eq!(node.group(), None);
        assert!(!node.is_control());
        assert_eq!(node.kind(), NODE_KIND);
        assert_eq!(*node.data(), "payload");
    }

    #[test]
    fn test_with_kind() {
        let node = Node::with_kind("Port", 1u8);
        assert_eq!(node.kind(), "Port");
        assert_eq!(node.into_data(), 1);
    }

    #[test]
    fn test_incident_edge_bookkeeping() {
        let mut node = Node::new(());
        let e1 = EdgeId::new(1, 0);
        let e2 = EdgeId::new(2, 0);

        node.add_in_edge(e1);
        node.add_in_edge(e1);
        node.add_out_edge(e2);
        assert_eq!(node.in_degree(), 2);
        assert_eq!(node.out_degree(), 1);

        // Parallel references are removed one at a time
        assert!(node.remove_in_edge(e1));
        assert_eq!(node.in_degree(), 1);
        assert!(!node.remove_out_edge(e1));

        node.set_group(Some(GroupId::new(0, 0)));
        node.set_control(true);
        node.detach();
        assert_eq!(node.in_degree(), 0);
        assert_eq!(node.out_degree(), 0);
        assert!(!node.is_grouped());
        assert!(!node.is_control());
    }

    #[test]
    fn test_payload_mutation() {
        let mut node = Node::new(vec![1]);
        node.data_mut().push(2);
        assert_eq!(node.data, vec![1, 2]);
    }
}
