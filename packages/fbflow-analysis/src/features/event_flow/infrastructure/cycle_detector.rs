//! Tight event loop detection
//!
//! Bounded-depth DFS per node: any path of at most `max_depth` hops that
//! returns to its origin is a tight loop. The runtime cannot drain a loop
//! this short faster than it refills, so every hit is CRITICAL.

use serde::{Deserialize, Serialize};

use crate::features::event_flow::domain::EventGraph;

/// One FB whose events loop back to it within the depth bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleHit {
    pub fb: String,
    pub cycle_depth: String,
    pub severity: String,
}

/// Find all FBs with a cycle of hop-depth <= `max_depth` back to themselves
pub fn detect_cycles(graph: &EventGraph, max_depth: usize) -> Vec<CycleHit> {
    let mut hits = Vec::new();

    for origin in graph.nodes() {
        if has_short_cycle(graph, origin, origin, &mut vec![origin.to_string()], 0, max_depth) {
            hits.push(CycleHit {
                fb: origin.to_string(),
                cycle_depth: format!("<={} hops", max_depth),
                severity: "CRITICAL".to_string(),
            });
        }
    }

    hits
}

fn has_short_cycle(
    graph: &EventGraph,
    current: &str,
    origin: &str,
    path: &mut Vec<String>,
    depth: usize,
    max_depth: usize,
) -> bool {
    if depth > max_depth {
        return false;
    }
    if current == origin && depth > 0 {
        return true;
    }

    for neighbor in graph.successors(current) {
        // Revisiting intermediate nodes is pointless, but the origin must
        // stay reachable to close the loop
        if path.iter().any(|p| p == neighbor) && neighbor != origin {
            continue;
        }
        path.push(neighbor.to_string());
        let found = has_short_cycle(graph, neighbor, origin, path, depth + 1, max_depth);
        path.pop();
        if found {
            return true;
        }
    }

    false
}
