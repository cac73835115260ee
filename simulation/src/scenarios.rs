//! Pre-defined search scenarios
//!
//! Includes the reference network: a path n1 - n2 - n3 - n4 - n5 - n6 with
//! n3 also linked to n7 and n8, every peer hosting its own resources.

use anyhow::Context;
use seeker_cache::InMemoryLookupCache;
use seeker_core::{NeighborBounds, PeerId, ResourceId, Topology, TopologyConfig, validate_with};
use seeker_search::{SearchEngine, SearchResult, Strategy};
use tracing::info;

use crate::render;

/// The reference network description
///
/// `num_nodes` under-counts the peers on purpose; the description is
/// accepted with a warning.
pub const REFERENCE_NETWORK: &str = r#"
{
    "num_nodes": 6,
    "min_neighbors": 1,
    "max_neighbors": 4,
    "resources": [
        "n1: r1",
        "n2: r3, r4",
        "n3: r5, r6",
        "n4: r7, r8",
        "n5: r9, r10",
        "n6: r11, r12",
        "n7: r13, r14",
        "n8: r15, r16"
    ],
    "edges": [
        "n1, n2",
        "n2, n3",
        "n3, n4",
        "n4, n5",
        "n5, n6",
        "n3, n7",
        "n3, n8"
    ]
}
"#;

/// Build and validate the reference network
pub fn reference_topology() -> anyhow::Result<(Topology, NeighborBounds)> {
    let (topology, bounds) = TopologyConfig::from_json(REFERENCE_NETWORK)?.into_topology()?;
    validate_with(&topology, bounds).context("reference network failed validation")?;
    Ok((topology, bounds))
}

/// Search the reference network from n1 for r7
pub fn run_reference_search(
    strategy: Strategy,
    ttl: u32,
    seed: u64,
) -> anyhow::Result<SearchResult> {
    info!("=== Running reference search ({strategy}) ===");

    let (topology, _) = reference_topology()?;
    println!("{}", render::overview(&topology));

    let cache = InMemoryLookupCache::new();
    let mut engine = SearchEngine::seeded(&topology, &cache, seed);
    let result = engine.search(
        &PeerId::from("n1"),
        &ResourceId::from("r7"),
        ttl,
        strategy,
    )?;

    println!("Search result ({strategy}):");
    println!("{result}");
    Ok(result)
}

/// Run the same informed search twice to show the cache short-circuit
pub fn run_cache_warmup(
    strategy: Strategy,
    ttl: u32,
    seed: u64,
) -> anyhow::Result<[SearchResult; 2]> {
    info!("=== Running cache warm-up ({strategy}) ===");

    let (topology, _) = reference_topology()?;
    let cache = InMemoryLookupCache::new();
    let mut engine = SearchEngine::seeded(&topology, &cache, seed);

    let start = PeerId::from("n1");
    let resource = ResourceId::from("r7");
    let cold = engine.search(&start, &resource, ttl, strategy)?;
    let warm = engine.search(&start, &resource, ttl, strategy)?;

    println!("--- Cold search ---");
    println!("{cold}");
    println!("--- Warm search ---");
    println!("{warm}");
    Ok([cold, warm])
}
