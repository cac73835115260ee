//! Search strategies and their names

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidStrategyError;

/// How a strategy moves through the topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Breadth-first expansion to every unvisited neighbor per hop
    Flood,
    /// A single token hopping to one random unvisited neighbor per hop
    Walk,
}

/// The four discovery strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Flooding,
    InformedFlooding,
    RandomWalk,
    InformedRandomWalk,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Flooding,
        Strategy::InformedFlooding,
        Strategy::RandomWalk,
        Strategy::InformedRandomWalk,
    ];

    pub fn traversal(self) -> Traversal {
        match self {
            Strategy::Flooding | Strategy::InformedFlooding => Traversal::Flood,
            Strategy::RandomWalk | Strategy::InformedRandomWalk => Traversal::Walk,
        }
    }

    /// Whether the strategy consults the lookup cache first
    pub fn is_informed(self) -> bool {
        matches!(self, Strategy::InformedFlooding | Strategy::InformedRandomWalk)
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Flooding => "flooding",
            Strategy::InformedFlooding => "informed_flooding",
            Strategy::RandomWalk => "random_walk",
            Strategy::InformedRandomWalk => "informed_random_walk",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = InvalidStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| InvalidStrategyError {
                name: s.to_string(),
            })
    }
}
