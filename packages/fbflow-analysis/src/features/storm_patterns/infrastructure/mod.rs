mod detector;

pub use detector::StormPatternAnalyzer;
