mod analyzer;
mod simulator;

pub use analyzer::QueueSimAnalyzer;
pub use simulator::QueueSimulator;
