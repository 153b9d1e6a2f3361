//! Cascade tracing
//!
//! BFS from a source FB over the event graph. Every traversed edge counts
//! as one generated event; traversal ends at leaves. A visited set keeps
//! cyclic wiring from expanding forever, so factors stay finite even on
//! graphs the loop detector will flag separately.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::features::event_flow::domain::{CascadePath, EventGraph};

/// Trace all cascade paths reachable from `source_fb`
pub fn trace_cascade(graph: &EventGraph, source_fb: &str) -> Vec<CascadePath> {
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut paths = Vec::new();

    // (current FB, path so far, events generated along this path)
    let mut queue: VecDeque<(String, Vec<String>, usize)> = VecDeque::new();
    queue.push_back((source_fb.to_string(), vec![source_fb.to_string()], 1));

    while let Some((current, path, events)) = queue.pop_front() {
        let targets = graph.successors(&current);

        if targets.is_empty() {
            // Leaf: cascade ends here
            paths.push(CascadePath {
                source: source_fb.to_string(),
                path,
                events_generated: events,
            });
            continue;
        }

        for target in targets {
            if visited.contains(target) {
                continue;
            }
            visited.insert(target.to_string());

            let mut new_path = path.clone();
            new_path.push(target.to_string());
            queue.push_back((target.to_string(), new_path, events + 1));
        }
    }

    paths
}

/// Total events across all cascade paths, relative to one source event
pub fn multiplication_factor(paths: &[CascadePath]) -> f64 {
    paths.iter().map(|p| p.events_generated).sum::<usize>() as f64
}
