//! Identifier types for the overlay
//!
//! Peers and resources are both named by opaque string tokens. They are
//! kept as distinct newtypes so a resource can never be passed where a
//! peer is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a peer in the overlay (e.g. `n1`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(String);

impl PeerId {
    /// Create a peer id from a non-empty token
    ///
    /// Surrounding whitespace is trimmed. Returns `None` when nothing is left.
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier for a resource hosted by peers (e.g. `r7`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a resource id from a non-empty token
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_rejects_empty() {
        assert_eq!(PeerId::new("  n1 ").unwrap().as_str(), "n1");
        assert!(PeerId::new("   ").is_none());
        assert!(ResourceId::new("").is_none());
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&ResourceId::from("r7")).unwrap();
        assert_eq!(json, "\"r7\"");
        let peer: PeerId = serde_json::from_str("\"n4\"").unwrap();
        assert_eq!(peer, PeerId::from("n4"));
    }
}
