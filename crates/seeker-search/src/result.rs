//! Search outcome and step-by-step history

use std::collections::BTreeSet;
use std::fmt;

use seeker_core::{PeerId, ResourceId};

use crate::strategy::Strategy;

/// One human-readable step of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceStep {
    /// A peer tested its own resource set
    Checked { peer: PeerId, resource: ResourceId },
    /// A flooding peer forwarded the query to a neighbor
    Queried {
        from: PeerId,
        to: PeerId,
        resource: ResourceId,
    },
    /// The walker moved to a randomly chosen neighbor
    RandomHop { from: PeerId, to: PeerId },
    /// The walker had no unvisited neighbor left
    DeadEnd { peer: PeerId },
    /// The resource was found at a peer
    Found { peer: PeerId },
    /// The lookup cache answered without traversal
    CacheHit { resource: ResourceId, peer: PeerId },
    /// A cached entry failed verification and was ignored
    CacheStale { resource: ResourceId, peer: PeerId },
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceStep::Checked { peer, resource } => {
                write!(f, "{peer} checked itself for resource {resource}")
            }
            TraceStep::Queried { from, to, resource } => {
                write!(f, "{from} asked {to} for resource {resource}")
            }
            TraceStep::RandomHop { from, to } => {
                write!(f, "{from} made a random hop to neighbor {to}")
            }
            TraceStep::DeadEnd { peer } => {
                write!(f, "{peer} has no unvisited neighbors, walk stuck")
            }
            TraceStep::Found { peer } => write!(f, "Found at {peer}!"),
            TraceStep::CacheHit { resource, peer } => {
                write!(f, "Cache hit: resource {resource} last found at {peer}")
            }
            TraceStep::CacheStale { resource, peer } => {
                write!(f, "Cache entry {resource} -> {peer} is stale, searching")
            }
        }
    }
}

/// Output of one search invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub strategy: Strategy,
    pub start: PeerId,
    pub resource: ResourceId,
    pub ttl: u32,
    /// Abstract count of query transmissions
    pub messages: u64,
    /// Every peer the search touched
    pub involved: BTreeSet<PeerId>,
    /// Ordered history of the search
    pub trace: Vec<TraceStep>,
}

impl SearchResult {
    pub fn involved_count(&self) -> usize {
        self.involved.len()
    }

    /// The peer that answered, from traversal or from the cache
    pub fn found_at(&self) -> Option<&PeerId> {
        self.trace.iter().rev().find_map(|step| match step {
            TraceStep::Found { peer } | TraceStep::CacheHit { peer, .. } => Some(peer),
            _ => None,
        })
    }

    pub fn is_found(&self) -> bool {
        self.found_at().is_some()
    }

    /// Whether the answer came from the lookup cache
    pub fn from_cache(&self) -> bool {
        self.trace
            .iter()
            .any(|step| matches!(step, TraceStep::CacheHit { .. }))
    }

    /// The trace rendered as lines
    pub fn history(&self) -> Vec<String> {
        self.trace.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total messages: {}", self.messages)?;
        writeln!(f, "Total nodes involved: {}", self.involved_count())?;
        writeln!(f)?;
        writeln!(f, "History:")?;
        for step in &self.trace {
            writeln!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(trace: Vec<TraceStep>) -> SearchResult {
        SearchResult {
            strategy: Strategy::Flooding,
            start: PeerId::from("n1"),
            resource: ResourceId::from("r1"),
            ttl: 2,
            messages: 0,
            involved: BTreeSet::new(),
            trace,
        }
    }

    #[test]
    fn test_found_marker() {
        let found = result(vec![
            TraceStep::Checked {
                peer: PeerId::from("n1"),
                resource: ResourceId::from("r1"),
            },
            TraceStep::Found {
                peer: PeerId::from("n1"),
            },
        ]);
        assert_eq!(found.found_at(), Some(&PeerId::from("n1")));
        assert!(!found.from_cache());

        let missed = result(vec![TraceStep::DeadEnd {
            peer: PeerId::from("n1"),
        }]);
        assert!(!missed.is_found());
    }

    #[test]
    fn test_cache_hit_counts_as_found() {
        let hit = result(vec![TraceStep::CacheHit {
            resource: ResourceId::from("r1"),
            peer: PeerId::from("n5"),
        }]);
        assert_eq!(hit.found_at(), Some(&PeerId::from("n5")));
        assert!(hit.from_cache());
    }

    #[test]
    fn test_report_lines() {
        let report = result(vec![TraceStep::Found {
            peer: PeerId::from("n1"),
        }])
        .to_string();
        assert!(report.starts_with("Total messages: 0\nTotal nodes involved: 0\n"));
        assert!(report.ends_with("History:\nFound at n1!\n"));
    }
}
