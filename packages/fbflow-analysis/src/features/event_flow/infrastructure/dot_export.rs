//! Graphviz DOT export
//!
//! Nodes are colored by multiplication band; edges come from the traced
//! cascade paths so the rendered diagram matches what the analyzer counted.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::config::EventFlowConfig;
use crate::features::event_flow::domain::{CascadePath, RiskBand};

/// Render an event-flow diagram as DOT text
pub fn render_dot(
    factors: &BTreeMap<String, f64>,
    paths: &[CascadePath],
    config: &EventFlowConfig,
) -> String {
    let mut lines = vec![
        "digraph EventFlow {".to_string(),
        "  rankdir=LR;".to_string(),
        "  node [shape=box];".to_string(),
    ];

    for (fb, factor) in factors {
        let color = RiskBand::classify(*factor, config).dot_color();
        lines.push(format!(
            "  \"{}\" [color={}, style=filled, label=\"{}\\n{}x\"];",
            fb, color, fb, factor
        ));
    }

    let mut edges: BTreeSet<(String, String)> = BTreeSet::new();
    for path in paths {
        for pair in path.path.windows(2) {
            edges.insert((pair[0].clone(), pair[1].clone()));
        }
    }
    for (from, to) in edges {
        lines.push(format!("  \"{}\" -> \"{}\";", from, to));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_structure() {
        let mut factors = BTreeMap::new();
        factors.insert("a".to_string(), 3.0);
        factors.insert("hot".to_string(), 60.0);
        let paths = vec![CascadePath {
            source: "a".to_string(),
            path: vec!["a".to_string(), "b".to_string()],
            events_generated: 2,
        }];

        let dot = render_dot(&factors, &paths, &EventFlowConfig::default());
        assert!(dot.starts_with("digraph EventFlow {"));
        assert!(dot.contains("\"a\" [color=green"));
        assert!(dot.contains("\"hot\" [color=red"));
        assert!(dot.contains("\"a\" -> \"b\";"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn test_duplicate_edges_deduplicated() {
        let factors = BTreeMap::new();
        let path = CascadePath {
            source: "a".to_string(),
            path: vec!["a".to_string(), "b".to_string()],
            events_generated: 2,
        };
        let dot = render_dot(&factors, &[path.clone(), path], &EventFlowConfig::default());
        assert_eq!(dot.matches("\"a\" -> \"b\";").count(), 1);
    }
}
