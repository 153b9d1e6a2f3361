mod estimator;

pub use estimator::{estimate_costs, CpuLoadEstimator};
