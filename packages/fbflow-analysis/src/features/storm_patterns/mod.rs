//! Event storm anti-pattern detection
//!
//! Rule-based checks over the event graph and the declared networks:
//! - tight event loops (cycles of <= 2 hops)
//! - uncontrolled fan-out from I/O-facing blocks
//! - aggregate timer pressure from E_CYCLE instances
//! - single outputs wired to bursty destination counts

pub mod domain;
pub mod infrastructure;

pub use domain::{parse_iec_duration_ms, DetectedPattern, PatternKind};
pub use infrastructure::StormPatternAnalyzer;
