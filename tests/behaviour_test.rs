//! Behaviour notification tests

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use topograph::graph::{
    EventRecorder, Graph, GraphBehaviour, TopologyError, TopologyEvent, TracingBehaviour,
};
use topograph::{EdgeId, Endpoint, GroupId, NodeId};

/// Records what the graph looked like when each callback ran
#[derive(Default)]
struct Inspector {
    seen: Rc<RefCell<Vec<String>>>,
}

impl GraphBehaviour for Inspector {
    fn name(&self) -> &str {
        "inspector"
    }

    fn node_inserted(&mut self, graph: &Graph, node: NodeId) {
        let root = graph.is_root_node(node).unwrap();
        self.seen
            .borrow_mut()
            .push(format!("node+ nodes={} root={}", graph.node_count(), root));
    }

    fn node_removed(&mut self, graph: &Graph, node: NodeId) {
        assert!(graph.node(node).is_none());
        self.seen
            .borrow_mut()
            .push(format!("node- nodes={}", graph.node_count()));
    }

    fn edge_inserted(&mut self, graph: &Graph, edge: EdgeId, source: NodeId, destination: Endpoint) {
        assert!(graph.contains_edge(edge));
        assert_eq!(graph.find_edge(source, destination), Some(edge));
        self.seen
            .borrow_mut()
            .push(format!("edge+ edges={}", graph.edge_count()));
    }

    fn edge_removed(&mut self, graph: &Graph, edge: EdgeId, source: NodeId, _destination: Endpoint) {
        assert!(!graph.contains_edge(edge));
        assert!(!graph.node(source).unwrap().out_edges().contains(&edge));
        self.seen
            .borrow_mut()
            .push(format!("edge- edges={}", graph.edge_count()));
    }

    fn node_added_to_group(&mut self, graph: &Graph, node: NodeId, group: GroupId) {
        assert!(graph.group(group).unwrap().has_member(node));
        self.seen.borrow_mut().push("grouped".to_string());
    }

    fn node_removed_from_group(&mut self, graph: &Graph, node: NodeId, _group: GroupId) {
        assert_eq!(graph.node(node).unwrap().group(), None);
        self.seen.borrow_mut().push("ungrouped".to_string());
    }

    fn graph_cleared(&mut self, graph: &Graph) {
        self.seen
            .borrow_mut()
            .push(format!("cleared nodes={}", graph.node_count()));
    }
}

struct Panicker;

impl GraphBehaviour for Panicker {
    fn node_inserted(&mut self, _graph: &Graph, _node: NodeId) {
        panic!("behaviour failure");
    }
}

#[test]
fn test_callbacks_observe_updated_graph() {
    let mut graph: Graph = Graph::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    graph.add_behaviour(Inspector { seen: seen.clone() });

    let a = graph.create_node().unwrap();
    let b = graph.create_node().unwrap();
    graph.create_edge(a, b).unwrap();
    let group = graph.create_group().unwrap();
    graph.add_node_to_group(group, a).unwrap();
    graph.remove_node(a).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            "node+ nodes=1 root=true",
            "node+ nodes=2 root=true",
            "edge+ edges=1",
            "grouped",
            "edge- edges=0",
            "ungrouped",
            "node- nodes=1",
        ]
    );
}

#[test]
fn test_registration_order() {
    let mut graph: Graph = Graph::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    struct Tagged(&'static str, Rc<RefCell<Vec<&'static str>>>);

    impl GraphBehaviour for Tagged {
        fn on_event(&mut self, _graph: &Graph, _event: &TopologyEvent) {
            self.1.borrow_mut().push(self.0);
        }
    }

    graph.add_behaviour(Tagged("first", order.clone()));
    graph.add_behaviour(Tagged("second", order.clone()));
    graph.add_behaviour(Tagged("third", order.clone()));
    graph.create_node().unwrap();

    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn test_disabled_behaviour_misses_clear_details() {
    let mut graph: Graph = Graph::new();
    let (recorder, log) = EventRecorder::new();
    let id = graph.add_behaviour(recorder);
    graph.add_behaviour(TracingBehaviour);

    let a = graph.create_node().unwrap();
    let b = graph.create_node().unwrap();
    graph.create_edge(a, b).unwrap();
    log.take();

    graph.disable_behaviour(id).unwrap();
    assert_eq!(graph.is_behaviour_enabled(id), Some(false));
    graph.clear().unwrap();
    assert!(log.is_empty());

    graph.enable_behaviour(id).unwrap();
    graph.create_node().unwrap();
    assert_eq!(log.len(), 1);
}

#[test]
fn test_clear_event_sequence() {
    let mut graph: Graph = Graph::new();
    let (recorder, log) = EventRecorder::new();
    graph.add_behaviour(recorder);

    let a = graph.create_node().unwrap();
    let b = graph.create_node().unwrap();
    let edge = graph.create_edge(a, b).unwrap();
    let group = graph.create_group().unwrap();
    graph.add_node_to_group(group, b).unwrap();
    log.take();

    graph.clear().unwrap();
    assert_eq!(
        log.take(),
        vec![
            TopologyEvent::EdgeRemoved {
                edge,
                source: a,
                destination: Endpoint::Node(b)
            },
            TopologyEvent::NodeUngrouped { node: b, group },
            TopologyEvent::GroupRemoved { group },
            TopologyEvent::NodeRemoved { node: a },
            TopologyEvent::NodeRemoved { node: b },
            TopologyEvent::Cleared,
        ]
    );
}

#[test]
fn test_clear_behaviours() {
    let mut graph: Graph = Graph::new();
    let (recorder, log) = EventRecorder::new();
    graph.add_behaviour(recorder);
    graph.add_behaviour(TracingBehaviour);
    assert_eq!(graph.behaviour_count(), 2);

    graph.clear_behaviours();
    assert_eq!(graph.behaviour_count(), 0);
    graph.create_node().unwrap();
    assert!(log.is_empty());
}

#[test]
fn test_panicking_behaviour_poisons_graph() {
    let mut graph: Graph = Graph::new();
    graph.add_behaviour(Panicker);

    let result = catch_unwind(AssertUnwindSafe(|| graph.create_node()));
    assert!(result.is_err());

    // The node was stored before notification started
    assert_eq!(graph.node_count(), 1);
    assert!(graph.is_notifying());
    assert_eq!(graph.create_node(), Err(TopologyError::Reentrant));
    graph.verify_consistency().unwrap();
}
