//! # Seeker
//!
//! A simulation of resource discovery in an unstructured peer-to-peer
//! overlay.
//!
//! ## Overview
//!
//! Every peer in the overlay hosts a set of named resources. A search
//! starts at one peer and looks for a peer hosting a target resource
//! within a hop budget (TTL), using one of four strategies:
//!
//! - **Flooding**: ask every unvisited neighbor, hop by hop
//! - **Random walk**: pass a single token to one random unvisited neighbor
//! - **Informed** variants: consult the lookup cache first, remember the answer
//!
//! ## Architecture
//!
//! - **seeker-core**: topology store, validation, network description parsing
//! - **seeker-cache**: persisted and in-memory resource lookup caches
//! - **seeker-search**: the search engine
//! - **Render** (`render.rs`): text views of the topology
//! - **Frames** (`frames.rs`): per-visit snapshots and animation export
//! - **Scenarios** (`scenarios.rs`): the reference network and canned runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use seeker_simulation::*;
//!
//! let (topology, _) = scenarios::reference_topology()?;
//! let cache = InMemoryLookupCache::new();
//! let mut engine = SearchEngine::seeded(&topology, &cache, 42);
//! let mut recorder = FrameRecorder::new(&topology);
//!
//! let result = engine.search_observed(
//!     &"n1".into(), &"r7".into(), 8, Strategy::Flooding, &mut recorder,
//! )?;
//! recorder.write_animation("search.txt")?;
//! ```

pub mod frames;
pub mod render;
pub mod scenarios;

pub use frames::{Frame, FrameRecorder};

// Re-export the engine surface for callers of the simulation
pub use seeker_cache::{InMemoryLookupCache, JsonFileCache, LookupCache};
pub use seeker_core::{NeighborBounds, PeerId, ResourceId, Topology, TopologyConfig};
pub use seeker_search::{SearchEngine, SearchResult, Strategy};
