//! Queue depth simulation
//!
//! Discrete-time model of the runtime's two event queues: external I/O
//! events arrive on the input queue; each serviced I/O event fans out into
//! the internal queue according to the application's measured event
//! multiplication factor. The simulator walks a 10 s window at 10 ms ticks
//! (both configurable) under named load scenarios and reports peak depths,
//! saturation and overflow. Fully deterministic: no RNG, burst phases are a
//! fixed schedule.

pub mod domain;
pub mod infrastructure;

pub use domain::{Scenario, SimulationOutcome};
pub use infrastructure::{QueueSimAnalyzer, QueueSimulator};
