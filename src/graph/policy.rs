//! Compile-time graph policy
//!
//! A policy bundles the payload types carried by nodes, edges and groups
//! with the container policy used for the graph's lists and indices.

use super::containers::{ContainerPolicy, StdContainers};

pub trait TopologyPolicy: 'static {
    /// Payload stored in every node
    type Node: Default + 'static;

    /// Payload stored in every edge
    type Edge: Default + 'static;

    /// Payload stored in every group
    type Group: Default + 'static;

    type Containers: ContainerPolicy;
}

/// Unit payloads over std containers
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl TopologyPolicy for DefaultPolicy {
    type Node = ();
    type Edge = ();
    type Group = ();
    type Containers = StdContainers;
}

/// Ordered list type selected by a policy
pub type ListOf<P, T> = <<P as TopologyPolicy>::Containers as ContainerPolicy>::List<T>;

/// Membership index type selected by a policy
pub type SearchOf<P, T> = <<P as TopologyPolicy>::Containers as ContainerPolicy>::Search<T>;
