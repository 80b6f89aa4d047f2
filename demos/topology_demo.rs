use topograph::graph::{
    EventRecorder, FxContainers, Graph, GraphBehaviour, GraphConfig, Node, TopologyEvent,
    TopologyPolicy, TracingBehaviour,
};
use topograph::{EdgeId, Endpoint, NodeId};

#[derive(Debug, Default)]
struct Task {
    name: String,
}

struct Workflow;

impl TopologyPolicy for Workflow {
    type Node = Task;
    type Edge = ();
    type Group = String;
    type Containers = FxContainers;
}

/// Prints a line whenever a task becomes ready (loses its last dependency)
struct ReadyWatcher;

impl GraphBehaviour<Workflow> for ReadyWatcher {
    fn name(&self) -> &str {
        "ready_watcher"
    }

    fn edge_removed(
        &mut self,
        graph: &Graph<Workflow>,
        _edge: EdgeId,
        _source: NodeId,
        destination: Endpoint,
    ) {
        if let Some(node) = destination.as_node().and_then(|id| graph.node(id)) {
            if node.in_degree() == 0 {
                println!("  ready: {}", node.data.name);
            }
        }
    }
}

fn task(name: &str) -> Node<Task> {
    Node::new(Task {
        name: name.to_string(),
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("--- Topograph Workflow Demo ---");

    let config = GraphConfig::from_json(r#"{ "allow_parallel_edges": false }"#)?;
    let mut graph: Graph<Workflow> = Graph::with_config(config);
    graph.add_behaviour(TracingBehaviour);
    graph.add_behaviour(ReadyWatcher);
    let (recorder, log) = EventRecorder::new();
    graph.add_behaviour(recorder);

    // 1. Tasks and dependencies (edge = "must finish before")
    let fetch = graph.insert_node(task("fetch sources"))?;
    let build = graph.insert_node(task("build"))?;
    let test = graph.insert_node(task("test"))?;
    let docs = graph.insert_node(task("docs"))?;
    let release = graph.insert_node(task("release"))?;

    graph.create_edge(fetch, build)?;
    let gate = graph.create_edge(build, test)?;
    graph.create_edge(fetch, docs)?;
    graph.create_edge(test, release)?;
    graph.create_edge(docs, release)?;

    // A reviewer approves the build -> test transition
    let reviewer = graph.insert_node(task("review"))?;
    graph.add_control_node(reviewer)?;
    graph.create_edge(reviewer, gate)?;

    let pipeline = graph.create_group()?;
    if let Some(group) = graph.group_mut(pipeline) {
        group.data = "ci".to_string();
    }
    for id in [build, test] {
        graph.add_node_to_group(pipeline, id)?;
    }

    let roots: Vec<&str> = graph
        .root_nodes()
        .filter_map(|id| graph.node(id))
        .map(|node| node.data.name.as_str())
        .collect();
    println!("\nRoot tasks: {:?}", roots);
    println!("Statistics: {}", serde_json::to_string_pretty(&graph.statistics())?);

    // 2. Completing a task removes it with its outgoing dependencies
    println!("\nCompleting tasks:");
    for done in [fetch, build, test, docs] {
        let node = graph.remove_node(done)?;
        println!("  done: {}", node.data.name);
    }

    // 3. Reset, keeping the reviewer
    graph.clear()?;
    graph.verify_consistency()?;
    println!(
        "\nAfter clear: {} node(s), {} event(s) recorded, {} edge removals",
        graph.node_count(),
        log.len(),
        log.count(|e| matches!(e, TopologyEvent::EdgeRemoved { .. }))
    );

    Ok(())
}
