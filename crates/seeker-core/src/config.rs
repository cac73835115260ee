//! Topology configuration
//!
//! Parses the structured network description:
//!
//! ```json
//! {
//!     "num_nodes": 3,
//!     "min_neighbors": 1,
//!     "max_neighbors": 2,
//!     "resources": ["n1: r1", "n2: r2, r3", "n3: r4"],
//!     "edges": ["n1, n2", "n2, n3"]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::topology::Topology;
use crate::types::{PeerId, ResourceId};
use crate::validate::NeighborBounds;

/// Structured description of a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Declared number of peers (informational)
    pub num_nodes: usize,
    pub min_neighbors: usize,
    pub max_neighbors: usize,
    /// `"peer_id: resource_id[, resource_id...]"` entries
    #[serde(default)]
    pub resources: Vec<String>,
    /// `"peer_id, peer_id"` undirected edges
    #[serde(default)]
    pub edges: Vec<String>,
}

impl TopologyConfig {
    /// Parse a description from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a description from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn bounds(&self) -> NeighborBounds {
        NeighborBounds::new(self.min_neighbors, self.max_neighbors)
    }

    /// Build the topology described by this config
    ///
    /// The result is not validated.
    pub fn to_topology(&self) -> Result<Topology, ConfigError> {
        let mut topology = Topology::new();

        for entry in &self.resources {
            let (peer, resources) = parse_resource_entry(entry)?;
            topology.add_peer(peer.clone());
            for resource in resources {
                topology.add_resource(peer.clone(), resource);
            }
        }

        for entry in &self.edges {
            let (a, b) = parse_edge_entry(entry)?;
            topology.connect(a, b);
        }

        if topology.peer_count() != self.num_nodes {
            warn!(
                declared = self.num_nodes,
                actual = topology.peer_count(),
                "num_nodes does not match the peers in the description"
            );
        }

        Ok(topology)
    }

    /// Build the topology and return it with its neighbor bounds
    pub fn into_topology(self) -> Result<(Topology, NeighborBounds), ConfigError> {
        let topology = self.to_topology()?;
        Ok((topology, self.bounds()))
    }
}

fn parse_resource_entry(entry: &str) -> Result<(PeerId, Vec<ResourceId>), ConfigError> {
    let malformed = |reason| ConfigError::ResourceEntry {
        entry: entry.to_string(),
        reason,
    };

    let (peer, resources) = entry.split_once(':').ok_or_else(|| malformed("missing ':'"))?;
    let peer = PeerId::new(peer).ok_or_else(|| malformed("empty peer id"))?;

    // An empty list is allowed here; the validator reports it
    let resources = resources
        .split(',')
        .filter_map(ResourceId::new)
        .collect();

    Ok((peer, resources))
}

fn parse_edge_entry(entry: &str) -> Result<(PeerId, PeerId), ConfigError> {
    let malformed = |reason| ConfigError::EdgeEntry {
        entry: entry.to_string(),
        reason,
    };

    let (a, b) = entry.split_once(',').ok_or_else(|| malformed("missing ','"))?;
    if b.contains(',') {
        return Err(malformed("more than two endpoints"));
    }
    let a = PeerId::new(a).ok_or_else(|| malformed("empty peer id"))?;
    let b = PeerId::new(b).ok_or_else(|| malformed("empty peer id"))?;
    Ok((a, b))
}
