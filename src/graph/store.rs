//! In-memory graph topology store
//!
//! [`Graph`] owns every node, edge and group through generational arenas
//! and keeps the following derived structures in step with them:
//! - ordered id lists for nodes, edges, groups and control nodes
//! - fast membership indices for nodes and edges
//! - the root node cache (nodes with a zero in-degree)
//!
//! Every mutation updates the arenas first, then the derived structures,
//! then notifies the registered behaviours, and only then returns.

use super::arena::Arena;
use super::behaviour::{BehaviourId, Behaviours, GraphBehaviour};
use super::config::GraphConfig;
use super::containers::{MembershipIndex, OrderedList};
use super::edge::Edge;
use super::event::TopologyEvent;
use super::factory::{KindRegistry, EDGE_KIND, GROUP_KIND, NODE_KIND};
use super::group::Group;
use super::node::Node;
use super::policy::{DefaultPolicy, ListOf, SearchOf, TopologyPolicy};
use super::types::{EdgeId, Endpoint, GroupId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors that can occur during topology operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Group {0} not found")]
    GroupNotFound(GroupId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: destination {0} does not exist")]
    InvalidEdgeDestination(Endpoint),

    #[error("No edge from {from} to {to}")]
    NoSuchEdge { from: NodeId, to: Endpoint },

    #[error("Parallel edge from {from} to {to} rejected")]
    ParallelEdge { from: NodeId, to: Endpoint },

    #[error("Capacity exceeded: at most {limit} {entity}s")]
    CapacityExceeded { entity: &'static str, limit: usize },

    #[error("Unknown {entity} kind: {tag}")]
    UnknownKind { entity: &'static str, tag: String },

    #[error("Node {node} already belongs to group {group}")]
    AlreadyGrouped { node: NodeId, group: GroupId },

    #[error("Node {node} is not a member of group {group}")]
    NotGroupMember { node: NodeId, group: GroupId },

    #[error("Node {node} has in-degree {in_degree} and cannot be a root node")]
    NotARootNode { node: NodeId, in_degree: usize },

    #[error("Root node cache inconsistent for {node}: cached={cached}, in-degree={in_degree}")]
    InconsistentRootCache {
        node: NodeId,
        cached: bool,
        in_degree: usize,
    },

    #[error("Topology inconsistent: {0}")]
    Inconsistent(String),

    #[error("Behaviour {0} not registered")]
    BehaviourNotFound(BehaviourId),

    #[error("Graph mutated while behaviours were being notified")]
    Reentrant,
}

pub type TopologyResult<T> = Result<T, TopologyError>;

/// Counts describing the current topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopologyStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub hyper_edge_count: usize,
    pub group_count: usize,
    pub grouped_node_count: usize,
    pub root_node_count: usize,
    pub control_node_count: usize,
}

/// Directed graph of nodes, edges, restricted hyperedges and groups
pub struct Graph<P: TopologyPolicy = DefaultPolicy> {
    pub(super) config: GraphConfig,

    /// Record storage; the arenas are the only owners
    pub(super) nodes: Arena<NodeId, Node<P::Node>>,
    pub(super) edges: Arena<EdgeId, Edge<P::Edge>>,
    pub(super) groups: Arena<GroupId, Group<P::Group>>,

    /// Authoritative insertion order
    pub(super) node_list: ListOf<P, NodeId>,
    pub(super) edge_list: ListOf<P, EdgeId>,
    pub(super) group_list: ListOf<P, GroupId>,

    pub(super) node_search: SearchOf<P, NodeId>,
    pub(super) edge_search: SearchOf<P, EdgeId>,

    /// Nodes with a zero in-degree
    pub(super) root_nodes: ListOf<P, NodeId>,

    /// Nodes kept by `clear()`
    pub(super) control_nodes: ListOf<P, NodeId>,

    node_kinds: KindRegistry<P::Node>,
    edge_kinds: KindRegistry<P::Edge>,
    group_kinds: KindRegistry<P::Group>,

    behaviours: Behaviours<P>,

    /// Set while behaviours run. Stays set if a callback unwinds.
    notifying: bool,
}

fn check_limit(current: usize, limit: Option<usize>, entity: &'static str) -> TopologyResult<()> {
    match limit {
        Some(limit) if current >= limit => Err(TopologyError::CapacityExceeded { entity, limit }),
        _ => Ok(()),
    }
}

fn arena_full(entity: &'static str) -> TopologyError {
    TopologyError::CapacityExceeded {
        entity,
        limit: u32::MAX as usize,
    }
}

fn unknown_kind(entity: &'static str, tag: &str) -> TopologyError {
    TopologyError::UnknownKind {
        entity,
        tag: tag.to_string(),
    }
}

impl<P: TopologyPolicy> Graph<P> {
    /// Create an empty graph with the default configuration
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            nodes: Arena::with_capacity(config.node_capacity),
            edges: Arena::with_capacity(config.edge_capacity),
            groups: Arena::with_capacity(0),
            node_list: Default::default(),
            edge_list: Default::default(),
            group_list: Default::default(),
            node_search: Default::default(),
            edge_search: Default::default(),
            root_nodes: Default::default(),
            control_nodes: Default::default(),
            node_kinds: KindRegistry::new(NODE_KIND),
            edge_kinds: KindRegistry::new(EDGE_KIND),
            group_kinds: KindRegistry::new(GROUP_KIND),
            behaviours: Behaviours::default(),
            notifying: false,
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// True while behaviours are being notified, or after a behaviour
    /// callback unwound and left the graph unusable.
    pub fn is_notifying(&self) -> bool {
        self.notifying
    }

    fn ensure_mutable(&self) -> TopologyResult<()> {
        if self.notifying {
            return Err(TopologyError::Reentrant);
        }
        Ok(())
    }

    fn notify(&mut self, event: TopologyEvent) {
        if self.behaviours.is_empty() {
            return;
        }
        let mut behaviours = std::mem::take(&mut self.behaviours);
        self.notifying = true;
        behaviours.notify(self, &event);
        self.notifying = false;
        self.behaviours = behaviours;
    }

    // ============================================================
    // Nodes
    // ============================================================

    /// Create a node with a default payload
    pub fn create_node(&mut self) -> TopologyResult<NodeId> {
        self.insert_node(Node::new(P::Node::default()))
    }

    /// Create a node whose payload is built by the constructor registered
    /// for `kind`
    pub fn create_node_of_kind(&mut self, kind: &str) -> TopologyResult<NodeId> {
        let data = self
            .node_kinds
            .create(kind)
            .ok_or_else(|| unknown_kind("node", kind))?;
        self.insert_node(Node::with_kind(kind, data))
    }

    /// Insert a node built outside the graph
    ///
    /// Any topology carried by the record (for example a clone of a live
    /// node) is discarded. The new node has no edges, so it is a root node.
    pub fn insert_node(&mut self, mut node: Node<P::Node>) -> TopologyResult<NodeId> {
        self.ensure_mutable()?;
        check_limit(self.node_count(), self.config.max_nodes, "node")?;

        node.detach();
        let id = self.nodes.try_insert(node).map_err(|_| arena_full("node"))?;

        self.node_list.push(id);
        self.node_search.insert(id);
        self.root_nodes.push(id);

        trace!("Inserted node {}", id);
        self.notify(TopologyEvent::NodeInserted { node: id });
        Ok(id)
    }

    /// Remove a node with all its incident edges and its group membership
    ///
    /// Incident edges go through the ordinary edge removal, so behaviours see
    /// one `EdgeRemoved` per edge before the `NodeRemoved` event.
    pub fn remove_node(&mut self, id: NodeId) -> TopologyResult<Node<P::Node>> {
        self.ensure_mutable()?;
        let node = self.live_node(id)?;
        let incident: Vec<EdgeId> = node
            .out_edges()
            .iter()
            .chain(node.in_edges())
            .copied()
            .collect();
        let group = node.group();

        for edge in incident {
            // Self loops are listed twice and hyperedges may already be gone
            if self.contains_edge(edge) {
                self.remove_edge(edge)?;
            }
        }
        if let Some(group) = group {
            self.detach_from_group(group, id);
        }

        self.control_nodes.remove_item(&id);
        self.root_nodes.remove_item(&id);
        self.node_list.remove_item(&id);
        self.node_search.remove(&id);
        let mut node = self.nodes.remove(id).ok_or(TopologyError::NodeNotFound(id))?;
        node.detach();

        trace!("Removed node {}", id);
        self.notify(TopologyEvent::NodeRemoved { node: id });
        Ok(node)
    }

    pub fn node_count(&self) -> usize {
        self.node_list.len()
    }

    /// Membership test through the fast index
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_search.contains(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<P::Node>> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<P::Node>> {
        self.nodes.get_mut(id)
    }

    /// Node ids in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_list.iter().copied()
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &Node<P::Node>)> + '_ {
        self.node_list
            .iter()
            .filter_map(move |&id| self.nodes.get(id).map(|node| (id, node)))
    }

    fn live_node(&self, id: NodeId) -> TopologyResult<&Node<P::Node>> {
        self.nodes
            .get(id)
            .filter(|_| self.contains_node(id))
            .ok_or(TopologyError::NodeNotFound(id))
    }

    // ============================================================
    // Control nodes
    // ============================================================

    /// Protect a node from destruction by `clear()`
    pub fn add_control_node(&mut self, id: NodeId) -> TopologyResult<()> {
        self.ensure_mutable()?;
        self.live_node(id)?;
        let node = self.nodes.get_mut(id).ok_or(TopologyError::NodeNotFound(id))?;
        if !node.is_control() {
            node.set_control(true);
            self.control_nodes.push(id);
        }
        Ok(())
    }

    /// Make a control node ordinary again. Returns false if it was not a
    /// control node.
    pub fn remove_control_node(&mut self, id: NodeId) -> TopologyResult<bool> {
        self.ensure_mutable()?;
        self.live_node(id)?;
        let node = self.nodes.get_mut(id).ok_or(TopologyError::NodeNotFound(id))?;
        if !node.is_control() {
            return Ok(false);
        }
        node.set_control(false);
        self.control_nodes.remove_item(&id);
        Ok(true)
    }

    pub fn is_control_node(&self, id: NodeId) -> bool {
        self.nodes.get(id).map_or(false, |node| node.is_control())
    }

    pub fn control_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.control_nodes.iter().copied()
    }

    pub fn control_node_count(&self) -> usize {
        self.control_nodes.len()
    }

    // ============================================================
    // Root node cache
    // ============================================================

    pub fn root_node_count(&self) -> usize {
        self.root_nodes.len()
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root_nodes.iter().copied()
    }

    /// Put a node with a zero in-degree back into the root node cache
    ///
    /// Only needed after the cache was bypassed; regular mutations keep it
    /// up to date.
    pub fn install_root_node(&mut self, id: NodeId) -> TopologyResult<()> {
        self.ensure_mutable()?;
        let in_degree = self.live_node(id)?.in_degree();
        if in_degree != 0 {
            return Err(TopologyError::NotARootNode { node: id, in_degree });
        }
        if !self.root_nodes.contains_item(&id) {
            warn!("Root node cache was missing {}, reinstalled", id);
            self.root_nodes.push(id);
        }
        Ok(())
    }

    /// Test whether `id` is a root node, cross-checking the cache against
    /// the node's in-degree
    pub fn is_root_node(&self, id: NodeId) -> TopologyResult<bool> {
        let in_degree = self.live_node(id)?.in_degree();
        let cached = self.root_nodes.contains_item(&id);
        if cached != (in_degree == 0) {
            return Err(TopologyError::InconsistentRootCache {
                node: id,
                cached,
                in_degree,
            });
        }
        Ok(cached)
    }

    // ============================================================
    // Edges
    // ============================================================

    /// Create an edge from `source` to a node, or a hyperedge to an edge
    pub fn create_edge(
        &mut self,
        source: NodeId,
        destination: impl Into<Endpoint>,
    ) -> TopologyResult<EdgeId> {
        self.insert_edge(Edge::new(source, destination, P::Edge::default()))
    }

    pub fn create_edge_of_kind(
        &mut self,
        kind: &str,
        source: NodeId,
        destination: impl Into<Endpoint>,
    ) -> TopologyResult<EdgeId> {
        let data = self
            .edge_kinds
            .create(kind)
            .ok_or_else(|| unknown_kind("edge", kind))?;
        self.insert_edge(Edge::with_kind(kind, source, destination, data))
    }

    /// Insert an edge built outside the graph; its endpoints must already be
    /// in the graph
    pub fn insert_edge(&mut self, mut edge: Edge<P::Edge>) -> TopologyResult<EdgeId> {
        self.ensure_mutable()?;
        let source = edge.source();
        let destination = edge.destination();

        if !self.contains_node(source) {
            return Err(TopologyError::InvalidEdgeSource(source));
        }
        if !self.contains_endpoint(destination) {
            return Err(TopologyError::InvalidEdgeDestination(destination));
        }
        check_limit(self.edge_count(), self.config.max_edges, "edge")?;
        if !self.config.allow_parallel_edges && self.has_edge(source, destination) {
            return Err(TopologyError::ParallelEdge {
                from: source,
                to: destination,
            });
        }

        edge.detach();
        let id = self.edges.try_insert(edge).map_err(|_| arena_full("edge"))?;

        if let Some(node) = self.nodes.get_mut(source) {
            node.add_out_edge(id);
        }
        match destination {
            Endpoint::Node(target) => {
                if let Some(node) = self.nodes.get_mut(target) {
                    node.add_in_edge(id);
                    if node.in_degree() == 1 {
                        self.root_nodes.remove_item(&target);
                    }
                }
            }
            Endpoint::Edge(target) => {
                if let Some(target_edge) = self.edges.get_mut(target) {
                    target_edge.add_in_hyper_edge(id);
                }
            }
        }

        self.edge_list.push(id);
        self.edge_search.insert(id);

        trace!("Inserted edge {} from {} to {}", id, source, destination);
        self.notify(TopologyEvent::EdgeInserted {
            edge: id,
            source,
            destination,
        });
        Ok(id)
    }

    /// Remove an edge
    ///
    /// Hyperedges pointing at the edge, directly or through other
    /// hyperedges, are removed first, deepest first. A destination node
    /// whose in-degree drops to zero re-enters the root node cache.
    pub fn remove_edge(&mut self, id: EdgeId) -> TopologyResult<Edge<P::Edge>> {
        self.ensure_mutable()?;
        if !self.contains_edge(id) {
            return Err(TopologyError::EdgeNotFound(id));
        }

        // Every edge precedes the hyperedges targeting it
        let mut dependents = Vec::new();
        let mut pending: Vec<EdgeId> = self
            .edges
            .get(id)
            .map(|edge| edge.in_hyper_edges().to_vec())
            .unwrap_or_default();
        while let Some(edge) = pending.pop() {
            if let Some(record) = self.edges.get(edge) {
                pending.extend_from_slice(record.in_hyper_edges());
            }
            dependents.push(edge);
        }
        if !dependents.is_empty() {
            debug!("Removing {} hyperedges depending on {}", dependents.len(), id);
        }
        for edge in dependents.into_iter().rev() {
            if self.contains_edge(edge) {
                self.unlink_edge(edge)?;
            }
        }

        self.unlink_edge(id)
    }

    /// Remove a single edge; nothing may target it any more
    fn unlink_edge(&mut self, id: EdgeId) -> TopologyResult<Edge<P::Edge>> {
        let mut edge = self.edges.remove(id).ok_or(TopologyError::EdgeNotFound(id))?;
        let source = edge.source();
        let destination = edge.destination();

        if let Some(node) = self.nodes.get_mut(source) {
            node.remove_out_edge(id);
        }
        match destination {
            Endpoint::Node(target) => {
                if let Some(node) = self.nodes.get_mut(target) {
                    node.remove_in_edge(id);
                    if node.in_degree() == 0 {
                        self.root_nodes.push(target);
                    }
                }
            }
            Endpoint::Edge(target) => {
                if let Some(target_edge) = self.edges.get_mut(target) {
                    target_edge.remove_in_hyper_edge(id);
                }
            }
        }

        self.edge_list.remove_item(&id);
        self.edge_search.remove(&id);
        edge.detach();

        trace!("Removed edge {} from {} to {}", id, source, destination);
        self.notify(TopologyEvent::EdgeRemoved {
            edge: id,
            source,
            destination,
        });
        Ok(edge)
    }

    /// Remove the first edge found from `source` to `destination`
    ///
    /// With parallel edges only one of them goes. Complexity is the
    /// out-degree of `source`.
    pub fn remove_edge_between(
        &mut self,
        source: NodeId,
        destination: impl Into<Endpoint>,
    ) -> TopologyResult<Edge<P::Edge>> {
        let destination = destination.into();
        self.ensure_endpoints(source, destination)?;
        let edge = self
            .find_edge(source, destination)
            .ok_or(TopologyError::NoSuchEdge {
                from: source,
                to: destination,
            })?;
        self.remove_edge(edge)
    }

    /// Remove every edge from `source` to `destination`, returning how many
    /// were removed
    pub fn remove_all_edges(
        &mut self,
        source: NodeId,
        destination: impl Into<Endpoint>,
    ) -> TopologyResult<usize> {
        let destination = destination.into();
        self.ensure_endpoints(source, destination)?;
        let matching: Vec<EdgeId> = self.edges_between(source, destination).collect();

        let mut removed = 0;
        for edge in matching {
            if self.contains_edge(edge) {
                self.remove_edge(edge)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Edges from `source` to `destination`, in insertion order
    pub fn edges_between(
        &self,
        source: NodeId,
        destination: impl Into<Endpoint>,
    ) -> impl Iterator<Item = EdgeId> + '_ {
        let destination = destination.into();
        self.nodes
            .get(source)
            .into_iter()
            .flat_map(|node| node.out_edges().iter().copied())
            .filter(move |&id| {
                self.edges
                    .get(id)
                    .map_or(false, |edge| edge.destination() == destination)
            })
    }

    /// First edge from `source` to `destination`, if any
    pub fn find_edge(&self, source: NodeId, destination: impl Into<Endpoint>) -> Option<EdgeId> {
        self.edges_between(source, destination).next()
    }

    /// Test for a direct edge (one degree relationship)
    pub fn has_edge(&self, source: NodeId, destination: impl Into<Endpoint>) -> bool {
        self.find_edge(source, destination).is_some()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_list.len()
    }

    /// Number of parallel edges from `source` to `destination`
    pub fn edge_count_between(
        &self,
        source: NodeId,
        destination: impl Into<Endpoint>,
    ) -> TopologyResult<usize> {
        let destination = destination.into();
        self.ensure_endpoints(source, destination)?;
        Ok(self.edges_between(source, destination).count())
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_search.contains(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge<P::Edge>> {
        self.edges.get(id)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge<P::Edge>> {
        self.edges.get_mut(id)
    }

    /// Edge ids in insertion order
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_list.iter().copied()
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<P::Edge>)> + '_ {
        self.edge_list
            .iter()
            .filter_map(move |&id| self.edges.get(id).map(|edge| (id, edge)))
    }

    pub fn contains_endpoint(&self, endpoint: Endpoint) -> bool {
        match endpoint {
            Endpoint::Node(id) => self.contains_node(id),
            Endpoint::Edge(id) => self.contains_edge(id),
        }
    }

    fn ensure_endpoints(&self, source: NodeId, destination: Endpoint) -> TopologyResult<()> {
        if !self.contains_node(source) {
            return Err(TopologyError::NodeNotFound(source));
        }
        match destination {
            Endpoint::Node(id) if !self.contains_node(id) => Err(TopologyError::NodeNotFound(id)),
            Endpoint::Edge(id) if !self.contains_edge(id) => Err(TopologyError::EdgeNotFound(id)),
            _ => Ok(()),
        }
    }

    // ============================================================
    // Groups
    // ============================================================

    pub fn create_group(&mut self) -> TopologyResult<GroupId> {
        self.insert_group(Group::new(P::Group::default()))
    }

    pub fn create_group_of_kind(&mut self, kind: &str) -> TopologyResult<GroupId> {
        let data = self
            .group_kinds
            .create(kind)
            .ok_or_else(|| unknown_kind("group", kind))?;
        self.insert_group(Group::with_kind(kind, data))
    }

    /// Insert a group built outside the graph. Members carried by the record
    /// are dropped; use `add_node_to_group` once the group is inserted.
    pub fn insert_group(&mut self, mut group: Group<P::Group>) -> TopologyResult<GroupId> {
        self.ensure_mutable()?;
        check_limit(self.group_count(), self.config.max_groups, "group")?;

        group.take_members();
        let id = self.groups.try_insert(group).map_err(|_| arena_full("group"))?;
        self.group_list.push(id);

        trace!("Inserted group {}", id);
        self.notify(TopologyEvent::GroupInserted { group: id });
        Ok(id)
    }

    /// Remove a group; its members are ungrouped, not removed
    pub fn remove_group(&mut self, id: GroupId) -> TopologyResult<Group<P::Group>> {
        self.ensure_mutable()?;
        let members = self
            .groups
            .get(id)
            .map(|group| group.members().to_vec())
            .ok_or(TopologyError::GroupNotFound(id))?;

        for node in &members {
            self.detach_from_group(id, *node);
        }

        self.group_list.remove_item(&id);
        let group = self.groups.remove(id).ok_or(TopologyError::GroupNotFound(id))?;

        debug!("Removed group {} ({} nodes ungrouped)", id, members.len());
        self.notify(TopologyEvent::GroupRemoved { group: id });
        Ok(group)
    }

    /// Add `node` to `group`. A node belongs to at most one group.
    pub fn add_node_to_group(&mut self, group: GroupId, node: NodeId) -> TopologyResult<()> {
        self.ensure_mutable()?;
        if !self.has_group(group) {
            return Err(TopologyError::GroupNotFound(group));
        }
        if let Some(current) = self.live_node(node)?.group() {
            return Err(TopologyError::AlreadyGrouped {
                node,
                group: current,
            });
        }

        if let Some(record) = self.groups.get_mut(group) {
            record.add_member(node);
        }
        if let Some(record) = self.nodes.get_mut(node) {
            record.set_group(Some(group));
        }

        trace!("Grouped node {} into {}", node, group);
        self.notify(TopologyEvent::NodeGrouped { node, group });
        Ok(())
    }

    pub fn remove_node_from_group(&mut self, group: GroupId, node: NodeId) -> TopologyResult<()> {
        self.ensure_mutable()?;
        if !self.has_group(group) {
            return Err(TopologyError::GroupNotFound(group));
        }
        if self.live_node(node)?.group() != Some(group) {
            return Err(TopologyError::NotGroupMember { node, group });
        }
        self.detach_from_group(group, node);
        Ok(())
    }

    fn detach_from_group(&mut self, group: GroupId, node: NodeId) {
        if let Some(record) = self.groups.get_mut(group) {
            record.remove_member(node);
        }
        if let Some(record) = self.nodes.get_mut(node) {
            record.set_group(None);
        }

        trace!("Ungrouped node {} from {}", node, group);
        self.notify(TopologyEvent::NodeUngrouped { node, group });
    }

    pub fn has_group(&self, id: GroupId) -> bool {
        self.groups.contains(id)
    }

    pub fn group_count(&self) -> usize {
        self.group_list.len()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group<P::Group>> {
        self.groups.get(id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group<P::Group>> {
        self.groups.get_mut(id)
    }

    /// Group ids in insertion order
    pub fn groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.group_list.iter().copied()
    }

    pub fn iter_groups(&self) -> impl Iterator<Item = (GroupId, &Group<P::Group>)> + '_ {
        self.group_list
            .iter()
            .filter_map(move |&id| self.groups.get(id).map(|group| (id, group)))
    }

    // ============================================================
    // Clearing
    // ============================================================

    /// Remove every edge, every group and every node except control nodes
    ///
    /// Removals go through the ordinary protocol, so enabled behaviours see
    /// each of them; a single `Cleared` event follows once the topology is
    /// gone. Disable a behaviour beforehand to only observe the end result.
    pub fn clear(&mut self) -> TopologyResult<()> {
        self.ensure_mutable()?;
        let edges: Vec<EdgeId> = self.edges().collect();
        let groups: Vec<GroupId> = self.groups().collect();

        for edge in edges {
            if self.contains_edge(edge) {
                self.remove_edge(edge)?;
            }
        }
        for group in groups {
            self.remove_group(group)?;
        }

        let nodes: Vec<NodeId> = self
            .nodes()
            .filter(|&id| !self.is_control_node(id))
            .collect();
        for node in nodes {
            self.remove_node(node)?;
        }

        debug!(
            "Cleared graph, kept {} control nodes",
            self.control_node_count()
        );
        self.notify(TopologyEvent::Cleared);
        Ok(())
    }

    // ============================================================
    // Behaviours
    // ============================================================

    pub fn add_behaviour(&mut self, behaviour: impl GraphBehaviour<P> + 'static) -> BehaviourId {
        self.behaviours.add(Box::new(behaviour))
    }

    pub fn remove_behaviour(&mut self, id: BehaviourId) -> Option<Box<dyn GraphBehaviour<P>>> {
        self.behaviours.remove(id)
    }

    pub fn enable_behaviour(&mut self, id: BehaviourId) -> TopologyResult<()> {
        if self.behaviours.set_enabled(id, true) {
            Ok(())
        } else {
            Err(TopologyError::BehaviourNotFound(id))
        }
    }

    pub fn disable_behaviour(&mut self, id: BehaviourId) -> TopologyResult<()> {
        if self.behaviours.set_enabled(id, false) {
            Ok(())
        } else {
            Err(TopologyError::BehaviourNotFound(id))
        }
    }

    pub fn is_behaviour_enabled(&self, id: BehaviourId) -> Option<bool> {
        self.behaviours.is_enabled(id)
    }

    pub fn behaviour_count(&self) -> usize {
        self.behaviours.len()
    }

    pub fn clear_behaviours(&mut self) {
        debug!("Dropping {} behaviours", self.behaviours.len());
        self.behaviours.clear();
    }

    // ============================================================
    // Kinds
    // ============================================================

    pub fn register_node_kind<F>(&mut self, kind: impl Into<String>, constructor: F) -> bool
    where
        F: Fn() -> P::Node + 'static,
    {
        self.node_kinds.register(kind, constructor)
    }

    pub fn register_edge_kind<F>(&mut self, kind: impl Into<String>, constructor: F) -> bool
    where
        F: Fn() -> P::Edge + 'static,
    {
        self.edge_kinds.register(kind, constructor)
    }

    pub fn register_group_kind<F>(&mut self, kind: impl Into<String>, constructor: F) -> bool
    where
        F: Fn() -> P::Group + 'static,
    {
        self.group_kinds.register(kind, constructor)
    }

    /// Forget a node kind. The base kind stays registered.
    pub fn unregister_node_kind(&mut self, kind: &str) -> bool {
        self.node_kinds.unregister(kind)
    }

    pub fn unregister_edge_kind(&mut self, kind: &str) -> bool {
        self.edge_kinds.unregister(kind)
    }

    pub fn unregister_group_kind(&mut self, kind: &str) -> bool {
        self.group_kinds.unregister(kind)
    }

    pub fn node_kinds(&self) -> &KindRegistry<P::Node> {
        &self.node_kinds
    }

    pub fn edge_kinds(&self) -> &KindRegistry<P::Edge> {
        &self.edge_kinds
    }

    pub fn group_kinds(&self) -> &KindRegistry<P::Group> {
        &self.group_kinds
    }

    // ============================================================
    // Statistics
    // ============================================================

    pub fn statistics(&self) -> TopologyStatistics {
        TopologyStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            hyper_edge_count: self
                .iter_edges()
                .filter(|(_, edge)| edge.is_hyper_edge())
                .count(),
            group_count: self.group_count(),
            grouped_node_count: self.iter_nodes().filter(|(_, node)| node.is_grouped()).count(),
            root_node_count: self.root_node_count(),
            control_node_count: self.control_node_count(),
        }
    }
}

impl<P: TopologyPolicy> Default for Graph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TopologyPolicy> fmt::Debug for Graph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("config", &self.config)
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .field("groups", &self.group_count())
            .field("root_nodes", &self.root_node_count())
            .field("control_nodes", &self.control_node_count())
            .field("behaviours", &self.behaviours.names())
            .finish()
    }
}
