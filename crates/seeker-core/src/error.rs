//! Error types for seeker-core

use std::path::PathBuf;

use thiserror::Error;

use crate::types::PeerId;

/// A violated topology invariant
///
/// Connectivity failures name no single peer; every other variant names
/// the offending peer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// The topology has no peers at all
    #[error("the network has no peers")]
    Empty,

    /// Some peers cannot be reached from the others
    #[error("the network is partitioned: {unreachable} of {total} peers are unreachable")]
    Partitioned { unreachable: usize, total: usize },

    /// A peer's degree falls outside the configured bounds
    #[error("peer {peer} has {degree} neighbors, expected between {min} and {max}")]
    DegreeOutOfRange {
        peer: PeerId,
        degree: usize,
        min: usize,
        max: usize,
    },

    /// A peer hosts no resources
    #[error("peer {peer} hosts no resources")]
    NoResources { peer: PeerId },

    /// An edge connects a peer to itself
    #[error("edge {peer} -- {peer} connects a peer to itself")]
    SelfLoop { peer: PeerId },
}

/// Errors raised while reading a topology description
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed topology description: {0}")]
    Json(#[from] serde_json::Error),

    /// A `"peer: r1, r2"` entry that cannot be split
    #[error("malformed resource entry {entry:?}: {reason}")]
    ResourceEntry { entry: String, reason: &'static str },

    /// A `"a, b"` entry that cannot be split
    #[error("malformed edge entry {entry:?}: {reason}")]
    EdgeEntry { entry: String, reason: &'static str },
}

/// Result type for topology validation
pub type TopologyResult<T> = Result<T, TopologyError>;
