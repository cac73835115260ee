//! # Seeker Search
//!
//! Resource discovery over an unstructured peer-to-peer overlay.
//!
//! Given a validated [`Topology`](seeker_core::Topology), a start peer, a
//! target resource and a hop budget (TTL), the [`SearchEngine`] locates a
//! peer hosting the resource with one of four strategies:
//!
//! 1. **flooding**: breadth-first, every unvisited neighbor per hop
//! 2. **random_walk**: a single token hopping to one random unvisited neighbor
//! 3. **informed_flooding** / **informed_random_walk**: the same traversals
//!    preceded by a lookup-cache check, with the finder written back to the
//!    cache on success
//!
//! Every search produces a [`SearchResult`]: a message counter, the set of
//! involved peers and an ordered [`TraceStep`] history. Not finding the
//! resource is a normal result, not an error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use seeker_cache::InMemoryLookupCache;
//! use seeker_search::{SearchEngine, Strategy};
//!
//! let cache = InMemoryLookupCache::new();
//! let mut engine = SearchEngine::seeded(&topology, &cache, 42);
//!
//! let result = engine.search(&"n1".into(), &"r7".into(), 8, Strategy::Flooding)?;
//! println!("{result}");
//! ```
//!
//! ## Message accounting
//!
//! Flooding counts one message per query that reaches a not-yet-visited
//! peer by default. [`MessageAccounting`] selects the alternatives: one per
//! enqueued query, or one per queue pop.

pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod result;
pub mod strategy;

pub use config::{CachePolicy, MessageAccounting, SearchConfig};
pub use engine::SearchEngine;
pub use error::{InvalidStrategyError, SearchError};
pub use observer::{NoopObserver, VisitObserver};
pub use result::{SearchResult, TraceStep};
pub use strategy::{Strategy, Traversal};
