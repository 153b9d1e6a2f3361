//! Event cascade analysis
//!
//! Builds the declared event-connection graph and measures how one source
//! event multiplies downstream:
//! - BFS cascade tracing with per-path event counts
//! - multiplication factor per source FB (total events / 1 source event)
//! - bounded-depth DFS for tight event loops
//! - Graphviz DOT export for visual review
//!
//! Risk bands (configurable): <10x safe, 10-20x caution, 20-50x warning,
//! >50x critical.

pub mod domain;
pub mod infrastructure;

pub use domain::{CascadePath, EventGraph, RiskBand};
pub use infrastructure::{
    compute_factors, detect_cycles, render_dot, trace_cascade, CycleHit, EventFlowAnalyzer,
};
