//! Engine options

use std::fmt;
use std::str::FromStr;

/// How flooding counts messages
///
/// Random walks always count one message per hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageAccounting {
    /// One message per query that reaches a not-yet-visited peer
    #[default]
    Delivered,
    /// One message per query enqueued to an unvisited neighbor, delivered or not
    Pushed,
    /// One message per queue pop, including the start peer and repeat arrivals
    Popped,
}

impl MessageAccounting {
    pub fn name(self) -> &'static str {
        match self {
            MessageAccounting::Delivered => "delivered",
            MessageAccounting::Pushed => "pushed",
            MessageAccounting::Popped => "popped",
        }
    }
}

impl fmt::Display for MessageAccounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MessageAccounting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivered" => Ok(MessageAccounting::Delivered),
            "pushed" => Ok(MessageAccounting::Pushed),
            "popped" => Ok(MessageAccounting::Popped),
            other => Err(format!(
                "unknown message accounting {other:?}, expected delivered, pushed or popped"
            )),
        }
    }
}

/// What informed strategies do with a cache hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Report the cached peer without looking at the topology
    #[default]
    TrustBlindly,
    /// Use the cached peer only if it is still in the topology and hosts
    /// the resource; otherwise search as on a miss
    Verify,
}

/// Configuration for the search engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    pub message_accounting: MessageAccounting,
    pub cache_policy: CachePolicy,
}

impl SearchConfig {
    pub fn with_accounting(mut self, accounting: MessageAccounting) -> Self {
        self.message_accounting = accounting;
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}
