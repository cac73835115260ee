//! End-to-end searches over the reference network
//!
//! n1 - n2 - n3 - n4 - n5 - n6 with n3 also linked to n7 and n8.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use seeker_cache::{InMemoryLookupCache, JsonFileCache, LookupCache};
use seeker_core::{PeerId, ResourceId, Topology, TopologyBuilder, validate};
use seeker_search::{MessageAccounting, SearchConfig, SearchEngine, Strategy, TraceStep};

// Test helpers
fn make_id(s: &str) -> PeerId {
    PeerId::from(s)
}

fn make_resource(s: &str) -> ResourceId {
    ResourceId::from(s)
}

fn make_peers(names: &[&str]) -> BTreeSet<PeerId> {
    names.iter().map(|name| make_id(name)).collect()
}

fn reference_topology() -> Topology {
    TopologyBuilder::new()
        .peer("n1", ["r1"])
        .peer("n2", ["r3", "r4"])
        .peer("n3", ["r5", "r6"])
        .peer("n4", ["r7", "r8"])
        .peer("n5", ["r9", "r10"])
        .peer("n6", ["r11", "r12"])
        .peer("n7", ["r13", "r14"])
        .peer("n8", ["r15", "r16"])
        .path(&["n1", "n2", "n3", "n4", "n5", "n6"])
        .edge("n3", "n7")
        .edge("n3", "n8")
        .build()
}

#[test]
fn test_reference_topology_is_valid() {
    assert_eq!(validate(&reference_topology(), 1, 4), Ok(()));
}

#[test]
fn test_flooding_finds_r7_at_n4() {
    let topology = reference_topology();
    let cache = InMemoryLookupCache::new();
    let mut engine = SearchEngine::seeded(&topology, &cache, 0);

    let result = engine
        .search(&make_id("n1"), &make_resource("r7"), 8, Strategy::Flooding)
        .unwrap();

    assert_eq!(result.found_at(), Some(&make_id("n4")));
    assert_eq!(result.involved, make_peers(&["n1", "n2", "n3", "n4"]));
    // n1->n2, n2->n3, n3->n4
    assert_eq!(result.messages, 3);
    assert_eq!(result.trace.last(), Some(&TraceStep::Found { peer: make_id("n4") }));
}

#[test]
fn test_flooding_alternative_accounting_on_reference() {
    let topology = reference_topology();
    let cache = InMemoryLookupCache::new();

    let mut pushed = SearchEngine::seeded(&topology, &cache, 0)
        .with_config(SearchConfig::default().with_accounting(MessageAccounting::Pushed));
    let result = pushed
        .search(&make_id("n1"), &make_resource("r7"), 8, Strategy::Flooding)
        .unwrap();
    // n3 also queries n7 and n8 before n4 answers
    assert_eq!(result.messages, 5);

    let mut popped = SearchEngine::seeded(&topology, &cache, 0)
        .with_config(SearchConfig::default().with_accounting(MessageAccounting::Popped));
    let result = popped
        .search(&make_id("n1"), &make_resource("r7"), 8, Strategy::Flooding)
        .unwrap();
    assert_eq!(result.messages, 4);
}

#[test]
fn test_flooding_absent_resource_covers_reachable_set() {
    let topology = reference_topology();
    let cache = InMemoryLookupCache::new();
    let mut engine = SearchEngine::seeded(&topology, &cache, 0);

    let result = engine
        .search(&make_id("n1"), &make_resource("r999"), 8, Strategy::Flooding)
        .unwrap();

    assert!(!result.is_found());
    assert_eq!(result.involved, topology.within_hops(&make_id("n1"), 8));
    assert_eq!(result.involved_count(), 8);
    // Every peer is reached by exactly one delivered query except the start
    assert_eq!(result.messages, 7);
}

#[test]
fn test_flooding_absent_resource_short_ttl() {
    let topology = reference_topology();
    let cache = InMemoryLookupCache::new();
    let mut engine = SearchEngine::seeded(&topology, &cache, 0);

    let result = engine
        .search(&make_id("n1"), &make_resource("r999"), 2, Strategy::Flooding)
        .unwrap();

    assert!(!result.is_found());
    assert_eq!(result.involved, make_peers(&["n1", "n2", "n3"]));
}

#[test]
fn test_random_walk_is_reproducible() {
    let topology = reference_topology();
    let cache = InMemoryLookupCache::new();

    let run = |seed: u64| {
        let mut engine = SearchEngine::with_rng(&topology, &cache, StdRng::seed_from_u64(seed));
        engine
            .search(&make_id("n1"), &make_resource("r11"), 8, Strategy::RandomWalk)
            .unwrap()
    };

    for seed in 0..16 {
        let first = run(seed);
        let second = run(seed);
        assert_eq!(first.trace, second.trace);
        assert_eq!(first.messages, second.messages);
        assert_eq!(first.involved, second.involved);
    }
}

#[test]
fn test_random_walk_invariants() {
    let topology = reference_topology();
    let cache = InMemoryLookupCache::new();

    for seed in 0..32 {
        let mut engine = SearchEngine::seeded(&topology, &cache, seed);
        let result = engine
            .search(&make_id("n1"), &make_resource("r11"), 8, Strategy::RandomWalk)
            .unwrap();

        let hops = result
            .trace
            .iter()
            .filter(|step| matches!(step, TraceStep::RandomHop { .. }))
            .count() as u64;
        assert_eq!(result.messages, hops);
        assert!(hops <= 8);

        // Walks never return to a visited peer, so every check is a new visit
        let checks = result
            .trace
            .iter()
            .filter(|step| matches!(step, TraceStep::Checked { .. }))
            .count();
        assert_eq!(checks, result.involved_count());

        // n1 -> n2 -> n3 is forced, then the walk either heads to n6 or dead-ends
        match result.found_at() {
            Some(peer) => assert_eq!(peer, &make_id("n6")),
            None => assert!(matches!(result.trace.last(), Some(TraceStep::DeadEnd { .. }))),
        }
    }
}

#[test]
fn test_informed_flooding_with_persisted_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lookup_cache.json");
    let topology = reference_topology();

    let first = {
        let mut engine = SearchEngine::seeded(&topology, JsonFileCache::new(&path), 0);
        engine
            .search(&make_id("n1"), &make_resource("r7"), 8, Strategy::InformedFlooding)
            .unwrap()
    };
    assert!(!first.from_cache());
    assert_eq!(first.messages, 3);

    // A new engine on the same store answers from the cache
    let mut engine = SearchEngine::seeded(&topology, JsonFileCache::new(&path), 0);
    let second = engine
        .search(&make_id("n6"), &make_resource("r7"), 8, Strategy::InformedRandomWalk)
        .unwrap();
    assert!(second.from_cache());
    assert_eq!(second.found_at(), Some(&make_id("n4")));
    assert_eq!(second.messages, 0);
    assert_eq!(second.involved_count(), 0);

    let entries = JsonFileCache::new(&path).load().unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_corrupt_cache_fails_informed_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lookup_cache.json");
    std::fs::write(&path, "not json at all").unwrap();
    let topology = reference_topology();

    let mut engine = SearchEngine::seeded(&topology, JsonFileCache::new(&path), 0);
    let err = engine
        .search(&make_id("n1"), &make_resource("r7"), 8, Strategy::InformedFlooding)
        .unwrap_err();
    assert!(err.to_string().contains("lookup cache"));

    // Uninformed strategies never touch the store
    let ok = engine
        .search(&make_id("n1"), &make_resource("r7"), 8, Strategy::Flooding)
        .unwrap();
    assert!(ok.is_found());
}

#[test]
fn test_repeat_informed_search_overwrites_entry() {
    let topology = reference_topology();
    let cache = InMemoryLookupCache::with_entries([(make_resource("r7"), make_id("n2"))]);
    let mut engine = SearchEngine::seeded(&topology, &cache, 0)
        .with_config(SearchConfig::default().with_cache_policy(seeker_search::CachePolicy::Verify));

    engine
        .search(&make_id("n1"), &make_resource("r7"), 8, Strategy::InformedFlooding)
        .unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&make_resource("r7")).unwrap(), Some(make_id("n4")));
}
