//! Analysis passes, one vertical slice per concern

pub mod cpu_load;
pub mod event_flow;
pub mod naming;
pub mod network_check;
pub mod parsing;
pub mod queue_sim;
pub mod storm_patterns;
