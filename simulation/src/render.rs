//! Text rendering of a topology
//!
//! Raster output is left to external tools; these renderings are what the
//! CLI prints and what frame snapshots contain.

use std::collections::BTreeSet;
use std::fmt::Write;

use seeker_core::{PeerId, Topology};

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// List every peer with its resources, then every edge
pub fn overview(topology: &Topology) -> String {
    let mut output = String::new();
    output.push_str("Graph:\n");
    for peer in topology.peers() {
        let resources = topology.resources(peer).map(join).unwrap_or_default();
        let _ = writeln!(output, "Node {peer}: Resources [{resources}]");
    }

    output.push_str("\nEdges:\n");
    for (a, b) in topology.edges() {
        let _ = writeln!(output, "{a} -- {b}");
    }
    output
}

/// Render the topology mid-search
///
/// `>` marks the current peer and `*` marks visited peers.
pub fn snapshot(topology: &Topology, visited: &BTreeSet<PeerId>, current: &PeerId) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Visiting {current} ({} of {} peers visited)",
        visited.len(),
        topology.peer_count()
    );

    for peer in topology.peers() {
        let cursor = if peer == current { '>' } else { ' ' };
        let seen = if visited.contains(peer) { '*' } else { ' ' };
        let resources = topology.resources(peer).map(join).unwrap_or_default();
        let neighbors = topology.neighbors(peer).map(join).unwrap_or_default();
        let _ = writeln!(output, "{cursor}{seen} {peer} [{resources}] -> [{neighbors}]");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use seeker_core::TopologyBuilder;

    fn pair() -> Topology {
        TopologyBuilder::new()
            .peer("n1", ["r1"])
            .peer("n2", ["r3", "r4"])
            .edge("n1", "n2")
            .build()
    }

    #[test]
    fn test_overview() {
        let text = overview(&pair());
        assert_eq!(
            text,
            "Graph:\nNode n1: Resources [r1]\nNode n2: Resources [r3, r4]\n\nEdges:\nn1 -- n2\n"
        );
    }

    #[test]
    fn test_snapshot_markers() {
        let visited = BTreeSet::from([PeerId::from("n1"), PeerId::from("n2")]);
        let text = snapshot(&pair(), &visited, &PeerId::from("n2"));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Visiting n2 (2 of 2 peers visited)");
        assert_eq!(lines[1], " * n1 [r1] -> [n2]");
        assert_eq!(lines[2], ">* n2 [r3, r4] -> [n1]");
    }
}
