//! Graph behaviours (topology observers)
//!
//! A behaviour is registered on a graph and called back synchronously for
//! every structural mutation, after the graph state is fully updated and
//! before the mutating call returns. Behaviours run in registration order;
//! disabled behaviours are skipped.
//!
//! Callbacks receive a shared reference to the graph, so they may query it
//! but cannot mutate it.

use super::event::TopologyEvent;
use super::policy::{DefaultPolicy, TopologyPolicy};
use super::store::Graph;
use super::types::{EdgeId, Endpoint, GroupId, NodeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Observer of topology mutations
///
/// Every callback has an empty default body; implement the ones you care
/// about, or override [`on_event`](GraphBehaviour::on_event) to receive all
/// events through a single entry point.
pub trait GraphBehaviour<P: TopologyPolicy = DefaultPolicy> {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Entry point called by the graph; dispatches to the typed callbacks
    fn on_event(&mut self, graph: &Graph<P>, event: &TopologyEvent) {
        match *event {
            TopologyEvent::NodeInserted { node } => self.node_inserted(graph, node),
            TopologyEvent::NodeRemoved { node } => self.node_removed(graph, node),
            TopologyEvent::EdgeInserted {
                edge,
                source,
                destination,
            } => self.edge_inserted(graph, edge, source, destination),
            TopologyEvent::EdgeRemoved {
                edge,
                source,
                destination,
            } => self.edge_removed(graph, edge, source, destination),
            TopologyEvent::GroupInserted { group } => self.group_inserted(graph, group),
            TopologyEvent::GroupRemoved { group } => self.group_removed(graph, group),
            TopologyEvent::NodeGrouped { node, group } => {
                self.node_added_to_group(graph, node, group)
            }
            TopologyEvent::NodeUngrouped { node, group } => {
                self.node_removed_from_group(graph, node, group)
            }
            TopologyEvent::Cleared => self.graph_cleared(graph),
        }
    }

    fn node_inserted(&mut self, _graph: &Graph<P>, _node: NodeId) {}

    /// Called once the node is gone; `_node` no longer resolves
    fn node_removed(&mut self, _graph: &Graph<P>, _node: NodeId) {}

    fn edge_inserted(
        &mut self,
        _graph: &Graph<P>,
        _edge: EdgeId,
        _source: NodeId,
        _destination: Endpoint,
    ) {
    }

    fn edge_removed(
        &mut self,
        _graph: &Graph<P>,
        _edge: EdgeId,
        _source: NodeId,
        _destination: Endpoint,
    ) {
    }

    fn group_inserted(&mut self, _graph: &Graph<P>, _group: GroupId) {}

    fn group_removed(&mut self, _graph: &Graph<P>, _group: GroupId) {}

    fn node_added_to_group(&mut self, _graph: &Graph<P>, _node: NodeId, _group: GroupId) {}

    fn node_removed_from_group(&mut self, _graph: &Graph<P>, _node: NodeId, _group: GroupId) {}

    /// Called after `clear()` removed the topology
    fn graph_cleared(&mut self, _graph: &Graph<P>) {}

    fn enabled_changed(&mut self, _enabled: bool) {}
}

/// Handle of a registered behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BehaviourId(u64);

impl BehaviourId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BehaviourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BehaviourId({})", self.0)
    }
}

struct Registered<P: TopologyPolicy> {
    id: BehaviourId,
    enabled: bool,
    behaviour: Box<dyn GraphBehaviour<P>>,
}

/// Behaviour registry owned by a graph
pub(crate) struct Behaviours<P: TopologyPolicy> {
    entries: Vec<Registered<P>>,
    next_id: u64,
}

impl<P: TopologyPolicy> Default for Behaviours<P> {
    fn default() -> Self {
        Behaviours {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<P: TopologyPolicy> Behaviours<P> {
    pub fn add(&mut self, behaviour: Box<dyn GraphBehaviour<P>>) -> BehaviourId {
        let id = BehaviourId(self.next_id);
        self.next_id += 1;
        debug!("Registered behaviour {} as {}", behaviour.name(), id);
        self.entries.push(Registered {
            id,
            enabled: true,
            behaviour,
        });
        id
    }

    pub fn remove(&mut self, id: BehaviourId) -> Option<Box<dyn GraphBehaviour<P>>> {
        let position = self.entries.iter().position(|entry| entry.id == id)?;
        let entry = self.entries.remove(position);
        debug!("Unregistered behaviour {} ({})", entry.behaviour.name(), id);
        Some(entry.behaviour)
    }

    /// Returns false when `id` is not registered
    pub fn set_enabled(&mut self, id: BehaviourId, enabled: bool) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                if entry.enabled != enabled {
                    entry.enabled = enabled;
                    entry.behaviour.enabled_changed(enabled);
                }
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self, id: BehaviourId) -> Option<bool> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.enabled)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.behaviour.name()).collect()
    }

    /// Deliver `event` to every enabled behaviour in registration order
    pub fn notify(&mut self, graph: &Graph<P>, event: &TopologyEvent) {
        for entry in self.entries.iter_mut().filter(|entry| entry.enabled) {
            entry.behaviour.on_event(graph, event);
        }
    }
}

/// Shared, growable record of the events seen by an [`EventRecorder`]
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<TopologyEvent>>>);

impl EventLog {
    pub fn events(&self) -> Vec<TopologyEvent> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Count the recorded events matching `predicate`
    pub fn count(&self, predicate: impl Fn(&TopologyEvent) -> bool) -> usize {
        self.0.borrow().iter().filter(|event| predicate(event)).count()
    }

    /// Drain the log
    pub fn take(&self) -> Vec<TopologyEvent> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    fn push(&self, event: TopologyEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// Behaviour appending every event to an [`EventLog`]
#[derive(Debug)]
pub struct EventRecorder {
    log: EventLog,
}

impl EventRecorder {
    /// Create a recorder and the log it writes to
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        (EventRecorder { log: log.clone() }, log)
    }
}

impl<P: TopologyPolicy> GraphBehaviour<P> for EventRecorder {
    fn name(&self) -> &str {
        "event_recorder"
    }

    fn on_event(&mut self, _graph: &Graph<P>, event: &TopologyEvent) {
        self.log.push(*event);
    }
}

/// Behaviour logging every event through `tracing`
#[derive(Debug, Default)]
pub struct TracingBehaviour;

impl<P: TopologyPolicy> GraphBehaviour<P> for TracingBehaviour {
    fn name(&self) -> &str {
        "tracing"
    }

    fn on_event(&mut self, graph: &Graph<P>, event: &TopologyEvent) {
        debug!(
            "Topology {}: {:?} (nodes={}, edges={}, groups={})",
            event.name(),
            event,
            graph.node_count(),
            graph.edge_count(),
            graph.group_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        nodes: usize,
        toggles: Vec<bool>,
    }

    impl GraphBehaviour for Counter {
        fn node_inserted(&mut self, _graph: &Graph, _node: NodeId) {
            self.nodes += 1;
        }

        fn enabled_changed(&mut self, enabled: bool) {
            self.toggles.push(enabled);
        }
    }

    #[test]
    fn test_registry_add_remove() {
        let mut behaviours: Behaviours<DefaultPolicy> = Behaviours::default();
        let (recorder, _log) = EventRecorder::new();

        let a = behaviours.add(Box::new(recorder));
        let b = behaviours.add(Box::new(TracingBehaviour));
        assert_ne!(a, b);
        assert_eq!(behaviours.len(), 2);
        assert_eq!(behaviours.names(), vec!["event_recorder", "tracing"]);

        assert!(behaviours.remove(a).is_some());
        assert!(behaviours.remove(a).is_none());
        assert_eq!(behaviours.len(), 1);
    }

    #[test]
    fn test_enable_disable_notifies_behaviour() {
        let mut behaviours: Behaviours<DefaultPolicy> = Behaviours::default();
        let id = behaviours.add(Box::new(Counter::default()));

        assert_eq!(behaviours.is_enabled(id), Some(true));
        assert!(behaviours.set_enabled(id, false));
        // Setting the same state twice is not a change
        assert!(behaviours.set_enabled(id, false));
        assert_eq!(behaviours.is_enabled(id), Some(false));

        let removed = behaviours.remove(id).unwrap();
        assert_eq!(removed.name(), std::any::type_name::<Counter>());
        assert!(!behaviours.set_enabled(id, true));
        assert_eq!(behaviours.is_enabled(id), None);
    }

    #[test]
    fn test_notify_skips_disabled() {
        let graph: Graph = Graph::new();
        let mut behaviours: Behaviours<DefaultPolicy> = Behaviours::default();
        let (first, first_log) = EventRecorder::new();
        let (second, second_log) = EventRecorder::new();
        behaviours.add(Box::new(first));
        let muted = behaviours.add(Box::new(second));
        behaviours.set_enabled(muted, false);

        behaviours.notify(&graph, &TopologyEvent::Cleared);

        assert_eq!(first_log.events(), vec![TopologyEvent::Cleared]);
        assert!(second_log.is_empty());
    }

    #[test]
    fn test_typed_callbacks_dispatch() {
        let graph: Graph = Graph::new();
        let mut counter = Counter::default();
        let node = NodeId::new(0, 0);

        counter.on_event(&graph, &TopologyEvent::NodeInserted { node });
        counter.on_event(&graph, &TopologyEvent::NodeRemoved { node });
        assert_eq!(counter.nodes, 1);

        GraphBehaviour::<DefaultPolicy>::enabled_changed(&mut counter, false);
        assert_eq!(counter.toggles, vec![false]);
    }

    #[test]
    fn test_event_log_take() {
        let log = EventLog::default();
        log.push(TopologyEvent::Cleared);
        log.push(TopologyEvent::Cleared);

        assert_eq!(log.count(|event| *event == TopologyEvent::Cleared), 2);
        assert_eq!(log.take().len(), 2);
        assert!(log.is_empty());
    }
}
