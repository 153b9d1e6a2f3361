mod analyzer;
mod cycle_detector;
mod dot_export;
mod tracer;

pub use analyzer::{compute_factors, EventFlowAnalyzer};
pub use cycle_detector::{detect_cycles, CycleHit};
pub use dot_export::render_dot;
pub use tracer::{multiplication_factor, trace_cascade};
