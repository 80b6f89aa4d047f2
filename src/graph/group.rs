//! Node group record

use super::factory::GROUP_KIND;
use super::types::NodeId;

/// A group of nodes
///
/// Groups only reference their members. Removing a group from the graph
/// ungroups the members, it never removes them.
#[derive(Debug, Clone)]
pub struct Group<G> {
    members: Vec<NodeId>,

    kind: String,

    /// User payload
    pub data: G,
}

impl<G> Group<G> {
    pub fn new(data: G) -> Self {
        Self::with_kind(GROUP_KIND, data)
    }

    pub fn with_kind(kind: impl Into<String>, data: G) -> Self {
        Group {
            members: Vec::new(),
            kind: kind.into(),
            data,
        }
    }

    /// Member nodes in the order they were added
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn has_member(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> &G {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut G {
        &mut self.data
    }

    pub fn into_data(self) -> G {
        self.data
    }

    pub(crate) fn add_member(&mut self, node: NodeId) {
        self.members.push(node);
    }

    pub(crate) fn remove_member(&mut self, node: NodeId) -> bool {
        match self.members.iter().position(|&member| member == node) {
            Some(position) => {
                self.members.remove(position);
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_members(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.members)
    }
}

impl<G: Default> Default for Group<G> {
    fn default() -> Self {
        Group::new(G::default())
    }
}
