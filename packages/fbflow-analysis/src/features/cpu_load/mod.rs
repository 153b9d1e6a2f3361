//! CPU load estimation
//!
//! Heuristic execution-time model over ST algorithm bodies: cyclomatic
//! complexity plus operator and identifier counts, scaled by a target
//! platform factor and an assumed event frequency. Estimates carry roughly
//! +/-50% uncertainty; thresholds classify aggregate load as safe (<70%),
//! warning (70-90%) or critical (>=90%).

pub mod domain;
pub mod infrastructure;

pub use domain::{AlgorithmCost, LoadStatus, Platform};
pub use infrastructure::{estimate_costs, CpuLoadEstimator};
