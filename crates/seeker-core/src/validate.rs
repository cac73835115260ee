//! Topology validation
//!
//! Checks run in a fixed order and the first violation wins:
//!
//! 1. The graph is connected
//! 2. Every peer's degree lies in `[min_neighbors, max_neighbors]`
//! 3. Every peer hosts at least one resource
//! 4. No edge connects a peer to itself

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TopologyError, TopologyResult};
use crate::topology::Topology;

/// Degree bounds every peer must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborBounds {
    pub min_neighbors: usize,
    pub max_neighbors: usize,
}

impl NeighborBounds {
    pub fn new(min_neighbors: usize, max_neighbors: usize) -> Self {
        Self {
            min_neighbors,
            max_neighbors,
        }
    }

    pub fn contains(&self, degree: usize) -> bool {
        degree >= self.min_neighbors && degree <= self.max_neighbors
    }
}

/// Validate a topology against the structural invariants
pub fn validate(
    topology: &Topology,
    min_neighbors: usize,
    max_neighbors: usize,
) -> TopologyResult<()> {
    validate_with(topology, NeighborBounds::new(min_neighbors, max_neighbors))
}

/// Validate a topology against the given bounds
pub fn validate_with(topology: &Topology, bounds: NeighborBounds) -> TopologyResult<()> {
    check_connected(topology)?;
    check_degrees(topology, bounds)?;
    check_resources(topology)?;
    check_self_loops(topology)?;

    debug!(
        peers = topology.peer_count(),
        edges = topology.edge_count(),
        "Topology passed validation"
    );
    Ok(())
}

fn check_connected(topology: &Topology) -> TopologyResult<()> {
    let Some(first) = topology.peers().next() else {
        return Err(TopologyError::Empty);
    };

    let total = topology.peer_count();
    let reached = topology.reachable_from(first).len();
    if reached < total {
        return Err(TopologyError::Partitioned {
            unreachable: total - reached,
            total,
        });
    }
    Ok(())
}

fn check_degrees(topology: &Topology, bounds: NeighborBounds) -> TopologyResult<()> {
    for peer in topology.peers() {
        let degree = topology.degree(peer);
        if !bounds.contains(degree) {
            return Err(TopologyError::DegreeOutOfRange {
                peer: peer.clone(),
                degree,
                min: bounds.min_neighbors,
                max: bounds.max_neighbors,
            });
        }
    }
    Ok(())
}

fn check_resources(topology: &Topology) -> TopologyResult<()> {
    for peer in topology.peers() {
        if topology.resources(peer).map(|r| r.is_empty()).unwrap_or(true) {
            return Err(TopologyError::NoResources { peer: peer.clone() });
        }
    }
    Ok(())
}

fn check_self_loops(topology: &Topology) -> TopologyResult<()> {
    match topology.edges().find(|(a, b)| a == b) {
        Some((peer, _)) => Err(TopologyError::SelfLoop { peer: peer.clone() }),
        None => Ok(()),
    }
}
