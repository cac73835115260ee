//! Search engine
//!
//! One engine runs all four strategies. A strategy is a traversal policy
//! (flood or walk) plus, for the informed variants, a lookup-cache check
//! before traversal and a cache write after a successful traversal.
//!
//! The topology is assumed to have passed validation; nothing here
//! re-checks connectivity, degree bounds or resources.

use std::collections::{BTreeSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seeker_cache::LookupCache;
use seeker_core::{PeerId, ResourceId, Topology};
use tracing::{debug, info, info_span, trace};

use crate::config::{CachePolicy, MessageAccounting, SearchConfig};
use crate::error::SearchError;
use crate::observer::{NoopObserver, VisitObserver};
use crate::result::{SearchResult, TraceStep};
use crate::strategy::{Strategy, Traversal};

/// Bookkeeping for a single invocation, never shared across calls
#[derive(Debug, Default)]
struct SearchState {
    visited: BTreeSet<PeerId>,
    messages: u64,
    trace: Vec<TraceStep>,
    found: Option<PeerId>,
}

/// A queued flooding query
#[derive(Debug)]
struct Pending {
    peer: PeerId,
    remaining_ttl: u32,
    /// Peer that forwarded the query; `None` for the start peer
    via: Option<PeerId>,
}

/// Runs searches over a validated topology
pub struct SearchEngine<'t, C, R = StdRng> {
    topology: &'t Topology,
    cache: C,
    rng: R,
    config: SearchConfig,
}

impl<'t, C: LookupCache> SearchEngine<'t, C, StdRng> {
    /// Create an engine whose random walks are seeded from the OS
    pub fn new(topology: &'t Topology, cache: C) -> Self {
        Self::with_rng(topology, cache, StdRng::from_os_rng())
    }

    /// Create an engine with reproducible random walks
    pub fn seeded(topology: &'t Topology, cache: C, seed: u64) -> Self {
        Self::with_rng(topology, cache, StdRng::seed_from_u64(seed))
    }
}

impl<'t, C: LookupCache, R: Rng> SearchEngine<'t, C, R> {
    /// Create an engine drawing random-walk choices from `rng`
    pub fn with_rng(topology: &'t Topology, cache: C, rng: R) -> Self {
        Self {
            topology,
            cache,
            rng,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn topology(&self) -> &Topology {
        self.topology
    }

    /// Run a search selected by strategy name
    pub fn search_named(
        &mut self,
        start: &PeerId,
        resource: &ResourceId,
        ttl: u32,
        strategy: &str,
    ) -> Result<SearchResult, SearchError> {
        let strategy = strategy.parse::<Strategy>()?;
        self.search(start, resource, ttl, strategy)
    }

    /// Run a search without a visualization hook
    pub fn search(
        &mut self,
        start: &PeerId,
        resource: &ResourceId,
        ttl: u32,
        strategy: Strategy,
    ) -> Result<SearchResult, SearchError> {
        self.search_observed(start, resource, ttl, strategy, &mut NoopObserver)
    }

    /// Run a search, calling `observer` on every newly visited peer
    pub fn search_observed(
        &mut self,
        start: &PeerId,
        resource: &ResourceId,
        ttl: u32,
        strategy: Strategy,
        observer: &mut dyn VisitObserver,
    ) -> Result<SearchResult, SearchError> {
        let span = info_span!("search", %strategy, %start, %resource, ttl);
        let _enter = span.enter();

        if !self.topology.contains(start) {
            return Err(SearchError::UnknownPeer(start.clone()));
        }

        let mut state = SearchState::default();

        if strategy.is_informed()
            && let Some(peer) = self.cache.get(resource)?
        {
            if self.trust_cached(&peer, resource) {
                info!(peer = %peer, "Answered from lookup cache");
                state.trace.push(TraceStep::CacheHit {
                    resource: resource.clone(),
                    peer,
                });
                return Ok(Self::finish(state, strategy, start, resource, ttl));
            }
            debug!(peer = %peer, "Cached peer no longer hosts the resource");
            state.trace.push(TraceStep::CacheStale {
                resource: resource.clone(),
                peer,
            });
        }

        match strategy.traversal() {
            Traversal::Flood => self.flood(&mut state, start, resource, ttl, observer),
            Traversal::Walk => self.walk(&mut state, start, resource, ttl, observer),
        }

        if strategy.is_informed()
            && let Some(peer) = &state.found
        {
            self.cache.put(resource, peer)?;
        }

        match &state.found {
            Some(peer) => info!(
                peer = %peer,
                messages = state.messages,
                involved = state.visited.len(),
                "Resource found"
            ),
            None => info!(
                messages = state.messages,
                involved = state.visited.len(),
                "Resource not found"
            ),
        }

        Ok(Self::finish(state, strategy, start, resource, ttl))
    }

    fn trust_cached(&self, peer: &PeerId, resource: &ResourceId) -> bool {
        match self.config.cache_policy {
            CachePolicy::TrustBlindly => true,
            CachePolicy::Verify => self.topology.hosts(peer, resource),
        }
    }

    /// Breadth-first expansion bounded by the remaining TTL of each query
    fn flood(
        &self,
        state: &mut SearchState,
        start: &PeerId,
        resource: &ResourceId,
        ttl: u32,
        observer: &mut dyn VisitObserver,
    ) {
        let accounting = self.config.message_accounting;
        let mut queue = VecDeque::from([Pending {
            peer: start.clone(),
            remaining_ttl: ttl,
            via: None,
        }]);

        while let Some(Pending {
            peer,
            remaining_ttl,
            via,
        }) = queue.pop_front()
        {
            if accounting == MessageAccounting::Popped {
                state.messages += 1;
            }
            state.trace.push(TraceStep::Checked {
                peer: peer.clone(),
                resource: resource.clone(),
            });

            if state.visited.contains(&peer) {
                trace!(peer = %peer, "Already visited, not expanding");
                continue;
            }

            if accounting == MessageAccounting::Delivered && via.is_some() {
                state.messages += 1;
            }
            if self.visit(state, &peer, resource, observer) {
                return;
            }

            if remaining_ttl == 0 {
                continue;
            }

            let Some(neighbors) = self.topology.neighbors(&peer) else {
                continue;
            };
            for neighbor in neighbors.iter().filter(|n| !state.visited.contains(*n)) {
                if accounting == MessageAccounting::Pushed {
                    state.messages += 1;
                }
                trace!(from = %peer, to = %neighbor, remaining_ttl = remaining_ttl - 1, "Forwarding query");
                state.trace.push(TraceStep::Queried {
                    from: peer.clone(),
                    to: neighbor.clone(),
                    resource: resource.clone(),
                });
                queue.push_back(Pending {
                    peer: neighbor.clone(),
                    remaining_ttl: remaining_ttl - 1,
                    via: Some(peer.clone()),
                });
            }
        }
    }

    /// Single-token walk with a hop budget of `ttl`
    fn walk(
        &mut self,
        state: &mut SearchState,
        start: &PeerId,
        resource: &ResourceId,
        ttl: u32,
        observer: &mut dyn VisitObserver,
    ) {
        let mut current = start.clone();
        let mut hops_left = ttl;

        while hops_left > 0 {
            state.trace.push(TraceStep::Checked {
                peer: current.clone(),
                resource: resource.clone(),
            });

            if !state.visited.contains(&current) && self.visit(state, &current, resource, observer)
            {
                return;
            }

            let candidates: Vec<&PeerId> = self
                .topology
                .neighbors(&current)
                .into_iter()
                .flatten()
                .filter(|n| !state.visited.contains(*n))
                .collect();

            if candidates.is_empty() {
                debug!(peer = %current, "Random walk reached a dead end");
                state.trace.push(TraceStep::DeadEnd { peer: current });
                return;
            }

            let next = candidates[self.rng.random_range(0..candidates.len())].clone();
            state.messages += 1;
            trace!(from = %current, to = %next, hops_left, "Random hop");
            state.trace.push(TraceStep::RandomHop {
                from: current,
                to: next.clone(),
            });
            current = next;
            hops_left -= 1;
        }
    }

    /// Mark a peer visited, notify the observer, then test its resources
    ///
    /// Returns true when the peer hosts the resource.
    fn visit(
        &self,
        state: &mut SearchState,
        peer: &PeerId,
        resource: &ResourceId,
        observer: &mut dyn VisitObserver,
    ) -> bool {
        state.visited.insert(peer.clone());
        observer.on_visit(&state.visited, peer);

        if self.topology.hosts(peer, resource) {
            debug!(peer = %peer, "Peer hosts the resource");
            state.trace.push(TraceStep::Found { peer: peer.clone() });
            state.found = Some(peer.clone());
            return true;
        }
        false
    }

    fn finish(
        state: SearchState,
        strategy: Strategy,
        start: &PeerId,
        resource: &ResourceId,
        ttl: u32,
    ) -> SearchResult {
        SearchResult {
            strategy,
            start: start.clone(),
            resource: resource.clone(),
            ttl,
            messages: state.messages,
            involved: state.visited,
            trace: state.trace,
        }
    }
}
