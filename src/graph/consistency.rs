//! Whole-graph consistency verification
//!
//! Walks every record and every derived collection and checks that they
//! describe the same topology. Intended for tests and debugging; the cost
//! is linear in the size of the graph.

use super::containers::{MembershipIndex, OrderedList};
use super::policy::TopologyPolicy;
use super::store::{Graph, TopologyError, TopologyResult};
use super::types::Endpoint;
use std::collections::HashSet;

fn fail<T>(message: String) -> TopologyResult<T> {
    Err(TopologyError::Inconsistent(message))
}

impl<P: TopologyPolicy> Graph<P> {
    /// Check every structural invariant of the graph
    pub fn verify_consistency(&self) -> TopologyResult<()> {
        self.verify_nodes()?;
        self.verify_edges()?;
        self.verify_groups()?;
        Ok(())
    }

    fn verify_nodes(&self) -> TopologyResult<()> {
        if self.node_list.len() != self.nodes.len() {
            return fail(format!(
                "node list holds {} ids for {} nodes",
                self.node_list.len(),
                self.nodes.len()
            ));
        }
        if self.node_search.len() != self.nodes.len() {
            return fail(format!(
                "node index holds {} ids for {} nodes",
                self.node_search.len(),
                self.nodes.len()
            ));
        }

        let mut seen = HashSet::new();
        for &id in self.node_list.iter() {
            if !seen.insert(id) {
                return fail(format!("{} listed twice", id));
            }
            let node = match self.nodes.get(id) {
                Some(node) => node,
                None => return fail(format!("listed node {} does not resolve", id)),
            };
            if !self.node_search.contains(&id) {
                return fail(format!("{} missing from the node index", id));
            }

            let cached = self.root_nodes.contains_item(&id);
            if cached != (node.in_degree() == 0) {
                return Err(TopologyError::InconsistentRootCache {
                    node: id,
                    cached,
                    in_degree: node.in_degree(),
                });
            }
            if node.is_control() != self.control_nodes.contains_item(&id) {
                return fail(format!("control flag of {} disagrees with the control list", id));
            }

            for &edge in node.out_edges() {
                match self.edges.get(edge) {
                    Some(record) if record.source() == id => {}
                    _ => return fail(format!("{} lists out-edge {} it is not the source of", id, edge)),
                }
            }
            for &edge in node.in_edges() {
                match self.edges.get(edge) {
                    Some(record) if record.destination() == Endpoint::Node(id) => {}
                    _ => return fail(format!("{} lists in-edge {} that does not point at it", id, edge)),
                }
            }
            if let Some(group) = node.group() {
                if !self.groups.get(group).map_or(false, |g| g.has_member(id)) {
                    return fail(format!("{} claims group {} which does not list it", id, group));
                }
            }
        }

        for (id, _) in self.nodes.iter() {
            if !self.node_search.contains(&id) {
                return fail(format!("stored node {} is not indexed", id));
            }
        }
        for &id in self.root_nodes.iter() {
            if !self.nodes.contains(id) {
                return fail(format!("root cache holds dead node {}", id));
            }
        }
        for &id in self.control_nodes.iter() {
            if !self.nodes.contains(id) {
                return fail(format!("control list holds dead node {}", id));
            }
        }
        Ok(())
    }

    fn verify_edges(&self) -> TopologyResult<()> {
        if self.edge_list.len() != self.edges.len() || self.edge_search.len() != self.edges.len() {
            return fail(format!(
                "edge list/index hold {}/{} ids for {} edges",
                self.edge_list.len(),
                self.edge_search.len(),
                self.edges.len()
            ));
        }

        for &id in self.edge_list.iter() {
            let edge = match self.edges.get(id) {
                Some(edge) => edge,
                None => return fail(format!("listed edge {} does not resolve", id)),
            };
            if !self.edge_search.contains(&id) {
                return fail(format!("{} missing from the edge index", id));
            }

            let source = edge.source();
            if !self
                .nodes
                .get(source)
                .map_or(false, |node| node.out_edges().contains(&id))
            {
                return fail(format!("source {} does not list {}", source, id));
            }

            match edge.destination() {
                Endpoint::Node(target) => {
                    if !self
                        .nodes
                        .get(target)
                        .map_or(false, |node| node.in_edges().contains(&id))
                    {
                        return fail(format!("destination {} does not list {}", target, id));
                    }
                }
                Endpoint::Edge(target) => {
                    if !self
                        .edges
                        .get(target)
                        .map_or(false, |e| e.in_hyper_edges().contains(&id))
                    {
                        return fail(format!("target edge {} does not list hyperedge {}", target, id));
                    }
                }
            }

            for &hyper in edge.in_hyper_edges() {
                match self.edges.get(hyper) {
                    Some(record) if record.destination() == Endpoint::Edge(id) => {}
                    _ => return fail(format!("{} lists hyperedge {} that does not point at it", id, hyper)),
                }
            }
        }
        for (id, _) in self.edges.iter() {
            if !self.edge_search.contains(&id) {
                return fail(format!("stored edge {} is not indexed", id));
            }
        }
        Ok(())
    }

    fn verify_groups(&self) -> TopologyResult<()> {
        if self.group_list.len() != self.groups.len() {
            return fail(format!(
                "group list holds {} ids for {} groups",
                self.group_list.len(),
                self.groups.len()
            ));
        }
        for &id in self.group_list.iter() {
            let group = match self.groups.get(id) {
                Some(group) => group,
                None => return fail(format!("listed group {} does not resolve", id)),
            };
            for &member in group.members() {
                if self.nodes.get(member).and_then(|node| node.group()) != Some(id) {
                    return fail(format!("{} lists member {} that is not grouped in it", id, member));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, TopologyError};

    #[test]
    fn test_empty_graph_is_consistent() {
        let graph: Graph = Graph::new();
        assert!(graph.verify_consistency().is_ok());
    }

    #[test]
    fn test_mixed_topology_is_consistent() {
        let mut graph: Graph = Graph::new();
        let a = graph.create_node().unwrap();
        let b = graph.create_node().unwrap();
        let c = graph.create_node().unwrap();
        let ab = graph.create_edge(a, b).unwrap();
        graph.create_edge(c, ab).unwrap();
        graph.create_edge(b, b).unwrap();
        let group = graph.create_group().unwrap();
        graph.add_node_to_group(group, c).unwrap();
        graph.add_control_node(a).unwrap();

        graph.verify_consistency().unwrap();
        graph.remove_node(b).unwrap();
        graph.verify_consistency().unwrap();
        graph.clear().unwrap();
        graph.verify_consistency().unwrap();
    }

    #[test]
    fn test_detects_stale_root_cache() {
        let mut graph: Graph = Graph::new();
        let a = graph.create_node().unwrap();
        graph.root_nodes.clear();

        assert!(matches!(
            graph.verify_consistency(),
            Err(TopologyError::InconsistentRootCache { node, cached: false, .. }) if node == a
        ));
    }

    #[test]
    fn test_detects_index_drift() {
        let mut graph: Graph = Graph::new();
        graph.create_node().unwrap();
        graph.node_search.clear();

        assert!(matches!(
            graph.verify_consistency(),
            Err(TopologyError::Inconsistent(_))
        ));
    }
}
