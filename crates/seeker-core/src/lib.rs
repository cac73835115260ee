//! # Seeker Core
//!
//! Topology store, validation and configuration for resource discovery in
//! an unstructured peer-to-peer overlay.
//!
//! ## Overview
//!
//! - **Types** (`types.rs`): `PeerId` and `ResourceId` string tokens
//! - **Topology** (`topology.rs`): undirected peer graph with per-peer resource sets
//! - **Validation** (`validate.rs`): connectivity, degree bounds, resources, self-edges
//! - **Config** (`config.rs`): parsing the structured network description
//!
//! A topology must pass [`validate`] before any search runs against it.
//! Nothing in the search engine re-checks these invariants.
//!
//! ## Example
//!
//! ```rust,ignore
//! use seeker_core::{TopologyBuilder, validate};
//!
//! let topology = TopologyBuilder::new()
//!     .peer("n1", ["r1"])
//!     .peer("n2", ["r2"])
//!     .edge("n1", "n2")
//!     .build();
//!
//! validate(&topology, 1, 4)?;
//! ```

pub mod config;
pub mod error;
pub mod topology;
pub mod types;
pub mod validate;

pub use config::TopologyConfig;
pub use error::{ConfigError, TopologyError, TopologyResult};
pub use topology::{Topology, TopologyBuilder};
pub use types::{PeerId, ResourceId};
pub use validate::{NeighborBounds, validate, validate_with};
