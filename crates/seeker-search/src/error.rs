//! Search error types
//!
//! Not finding a resource is a normal [`SearchResult`](crate::SearchResult),
//! never an error.

use seeker_cache::CacheError;
use seeker_core::PeerId;
use thiserror::Error;

/// An unrecognized strategy name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid search strategy {name:?}, expected one of: flooding, informed_flooding, random_walk, informed_random_walk")]
pub struct InvalidStrategyError {
    pub name: String,
}

/// Errors that abort a single search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    InvalidStrategy(#[from] InvalidStrategyError),

    /// The start peer is not part of the topology
    #[error("start peer {0} is not in the topology")]
    UnknownPeer(PeerId),

    /// The lookup cache could not be read or written
    #[error("lookup cache failure: {0}")]
    Cache(#[from] CacheError),
}
