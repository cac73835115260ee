//! Topology store for the overlay
//!
//! Holds the undirected peer graph and the resource set of every peer.
//! The store records whatever it is given, including self-edges and
//! resource-less peers; rejecting those is the validator's job.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{PeerId, ResourceId};

/// An undirected peer graph with per-peer resource sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    /// Resources hosted by each peer
    resources: BTreeMap<PeerId, BTreeSet<ResourceId>>,
    /// Adjacency list representation for quick lookups
    adjacency: BTreeMap<PeerId, BTreeSet<PeerId>>,
    /// Edges keyed by their normalized (lower, higher) endpoint pair
    edges: BTreeSet<(PeerId, PeerId)>,
}

impl Topology {
    /// Create an empty topology
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer to the topology
    ///
    /// Adding a peer that already exists is a no-op.
    pub fn add_peer(&mut self, id: PeerId) {
        if !self.resources.contains_key(&id) {
            self.adjacency.insert(id.clone(), BTreeSet::new());
            self.resources.insert(id, BTreeSet::new());
        }
    }

    /// Add a resource to a peer, creating the peer if needed
    pub fn add_resource(&mut self, peer: PeerId, resource: ResourceId) {
        self.add_peer(peer.clone());
        if let Some(set) = self.resources.get_mut(&peer) {
            set.insert(resource);
        }
    }

    /// Add an undirected edge between two peers, creating either if needed
    ///
    /// Duplicate edges collapse into one. A self-edge is stored as given.
    pub fn connect(&mut self, a: PeerId, b: PeerId) {
        self.add_peer(a.clone());
        self.add_peer(b.clone());

        if let Some(neighbors) = self.adjacency.get_mut(&a) {
            neighbors.insert(b.clone());
        }
        if let Some(neighbors) = self.adjacency.get_mut(&b) {
            neighbors.insert(a.clone());
        }

        let key = if a <= b { (a, b) } else { (b, a) };
        self.edges.insert(key);
    }

    /// Check whether a peer exists
    pub fn contains(&self, peer: &PeerId) -> bool {
        self.resources.contains_key(peer)
    }

    /// Get all neighbors of a peer
    pub fn neighbors(&self, peer: &PeerId) -> Option<&BTreeSet<PeerId>> {
        self.adjacency.get(peer)
    }

    /// Get the resources hosted by a peer
    pub fn resources(&self, peer: &PeerId) -> Option<&BTreeSet<ResourceId>> {
        self.resources.get(peer)
    }

    /// Check whether a peer hosts a resource
    pub fn hosts(&self, peer: &PeerId, resource: &ResourceId) -> bool {
        self.resources
            .get(peer)
            .map(|set| set.contains(resource))
            .unwrap_or(false)
    }

    /// Number of distinct neighbors of a peer (a self-edge counts once)
    pub fn degree(&self, peer: &PeerId) -> usize {
        self.adjacency.get(peer).map(BTreeSet::len).unwrap_or(0)
    }

    /// Check if two peers are directly connected
    pub fn are_connected(&self, a: &PeerId, b: &PeerId) -> bool {
        self.adjacency
            .get(a)
            .map(|neighbors| neighbors.contains(b))
            .unwrap_or(false)
    }

    /// Iterate over all peer ids in order
    pub fn peers(&self) -> impl Iterator<Item = &PeerId> {
        self.resources.keys()
    }

    /// Iterate over all edges as normalized endpoint pairs
    pub fn edges(&self) -> impl Iterator<Item = (&PeerId, &PeerId)> {
        self.edges.iter().map(|(a, b)| (a, b))
    }

    /// Get number of peers
    pub fn peer_count(&self) -> usize {
        self.resources.len()
    }

    /// Get number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Peers reachable from `start`, including `start` itself
    pub fn reachable_from(&self, start: &PeerId) -> BTreeSet<PeerId> {
        let mut seen = BTreeSet::new();
        if !self.contains(start) {
            return seen;
        }

        let mut stack = vec![start.clone()];
        while let Some(peer) = stack.pop() {
            if !seen.insert(peer.clone()) {
                continue;
            }
            if let Some(neighbors) = self.adjacency.get(&peer) {
                stack.extend(neighbors.iter().filter(|n| !seen.contains(*n)).cloned());
            }
        }
        seen
    }

    /// Peers within `hops` edges of `start`, including `start` itself
    pub fn within_hops(&self, start: &PeerId, hops: u32) -> BTreeSet<PeerId> {
        let mut seen = BTreeSet::new();
        if !self.contains(start) {
            return seen;
        }

        seen.insert(start.clone());
        let mut frontier = vec![start.clone()];
        for _ in 0..hops {
            let mut next = Vec::new();
            for peer in &frontier {
                for neighbor in self.adjacency.get(peer).into_iter().flatten() {
                    if seen.insert(neighbor.clone()) {
                        next.push(neighbor.clone());
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        seen
    }
}

/// Builder for creating topologies from string tokens
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    topology: Topology,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer hosting the given resources
    pub fn peer<'a>(mut self, id: &str, resources: impl IntoIterator<Item = &'a str>) -> Self {
        let peer = PeerId::from(id);
        self.topology.add_peer(peer.clone());
        for resource in resources {
            self.topology.add_resource(peer.clone(), ResourceId::from(resource));
        }
        self
    }

    /// Add an undirected edge
    pub fn edge(mut self, a: &str, b: &str) -> Self {
        self.topology.connect(PeerId::from(a), PeerId::from(b));
        self
    }

    /// Add a chain of edges: `path(&["a", "b", "c"])` links a-b and b-c
    pub fn path(mut self, peers: &[&str]) -> Self {
        for pair in peers.windows(2) {
            self.topology.connect(PeerId::from(pair[0]), PeerId::from(pair[1]));
        }
        self
    }

    pub fn build(self) -> Topology {
        self.topology
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PeerId {
        PeerId::from(s)
    }

    #[test]
    fn test_connect_is_undirected_and_deduplicated() {
        let mut topology = Topology::new();
        topology.connect(id("a"), id("b"));
        topology.connect(id("b"), id("a"));

        assert_eq!(topology.peer_count(), 2);
        assert_eq!(topology.edge_count(), 1);
        assert!(topology.are_connected(&id("a"), &id("b")));
        assert!(topology.are_connected(&id("b"), &id("a")));
    }

    #[test]
    fn test_self_edge_is_recorded() {
        let mut topology = Topology::new();
        topology.connect(id("a"), id("a"));

        assert_eq!(topology.edge_count(), 1);
        assert_eq!(topology.degree(&id("a")), 1);
        assert!(topology.are_connected(&id("a"), &id("a")));
    }

    #[test]
    fn test_builder_resources() {
        let topology = TopologyBuilder::new()
            .peer("n1", ["r1"])
            .peer("n2", ["r3", "r4"])
            .edge("n1", "n2")
            .build();

        assert!(topology.hosts(&id("n2"), &ResourceId::from("r4")));
        assert!(!topology.hosts(&id("n1"), &ResourceId::from("r4")));
        assert!(!topology.hosts(&id("zz"), &ResourceId::from("r1")));
    }

    #[test]
    fn test_reachability() {
        let topology = TopologyBuilder::new()
            .path(&["a", "b", "c"])
            .edge("x", "y")
            .build();

        let reach = topology.reachable_from(&id("a"));
        assert_eq!(reach.len(), 3);
        assert!(!reach.contains(&id("x")));
        assert!(topology.reachable_from(&id("missing")).is_empty());
    }

    #[test]
    fn test_within_hops() {
        let topology = TopologyBuilder::new().path(&["a", "b", "c", "d"]).build();

        assert_eq!(topology.within_hops(&id("a"), 0).len(), 1);
        assert_eq!(topology.within_hops(&id("a"), 2).len(), 3);
        assert_eq!(topology.within_hops(&id("a"), 10).len(), 4);
    }
}
