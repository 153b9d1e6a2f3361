//! Domain model for event propagation
//!
//! The graph is an adjacency structure over FB identifiers: instance names
//! inside FBNetworks, or the declaring type name for connections sourced
//! from a type's own interface events.

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::EventFlowConfig;
use crate::shared::models::{FbId, FbType};

/// One traced cascade from a source FB to a leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadePath {
    pub source: FbId,
    pub path: Vec<FbId>,
    pub events_generated: usize,
}

/// Multiplication risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Safe,
    Caution,
    Warning,
    Critical,
}

impl RiskBand {
    /// Classify a multiplication factor against configured bands
    pub fn classify(factor: f64, config: &EventFlowConfig) -> Self {
        if factor > config.critical_factor {
            Self::Critical
        } else if factor >= config.high_factor {
            Self::Warning
        } else if factor >= config.caution_factor {
            Self::Caution
        } else {
            Self::Safe
        }
    }

    /// Graphviz fill color for DOT export
    pub fn dot_color(&self) -> &'static str {
        match self {
            Self::Safe => "green",
            Self::Caution => "yellow",
            Self::Warning => "orange",
            Self::Critical => "red",
        }
    }
}

/// Directed event propagation graph
///
/// Nodes are FB identifiers; an edge A → B means some event output of A is
/// wired to an event input of B. Parallel wires between the same pair are
/// collapsed; fan-out counting happens at the connection level in
/// `storm_patterns`.
pub struct EventGraph {
    graph: DiGraph<FbId, ()>,
    node_ids: FxHashMap<FbId, NodeIndex>,
}

impl EventGraph {
    /// Build the graph from every FBNetwork in the application
    pub fn build(fb_types: &[FbType]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_ids: FxHashMap<FbId, NodeIndex> = FxHashMap::default();

        let mut intern = |graph: &mut DiGraph<FbId, ()>, name: &str| -> NodeIndex {
            if let Some(&idx) = node_ids.get(name) {
                return idx;
            }
            let idx = graph.add_node(name.to_string());
            node_ids.insert(name.to_string(), idx);
            idx
        };

        for fb in fb_types {
            for conn in &fb.event_connections {
                // Source may be `instance.EVENT` or a bare interface event of
                // the declaring type
                let source_fb = match conn.source.split_once('.') {
                    Some((inst, _)) => inst,
                    None => fb.name.as_str(),
                };
                // Destinations without an instance part target the composite's
                // own interface; those do not propagate further here
                let Some((dest_fb, _)) = conn.destination.split_once('.') else {
                    continue;
                };
                if source_fb.is_empty() || dest_fb.is_empty() {
                    continue;
                }

                let from = intern(&mut graph, source_fb);
                let to = intern(&mut graph, dest_fb);
                if !graph.contains_edge(from, to) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        Self { graph, node_ids }
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, fb: &str) -> bool {
        self.node_ids.contains_key(fb)
    }

    /// All FB identifiers, sorted for deterministic iteration
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self.graph.node_weights().map(String::as_str).collect();
        nodes.sort_unstable();
        nodes
    }

    /// Downstream FBs of `fb`, sorted for deterministic traversal order
    pub fn successors(&self, fb: &str) -> Vec<&str> {
        let Some(&idx) = self.node_ids.get(fb) else {
            return Vec::new();
        };
        let mut targets: Vec<&str> = self
            .graph
            .neighbors(idx)
            .map(|n| self.graph[n].as_str())
            .collect();
        targets.sort_unstable();
        targets
    }
}
