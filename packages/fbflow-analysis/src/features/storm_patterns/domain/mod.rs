//! Anti-pattern model and IEC duration parsing

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::shared::models::Severity;

/// Known event storm anti-patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    TightEventLoop,
    UncontrolledIoMultiplication,
    CascadingTimers,
    FanOutBurst,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TightEventLoop => "TIGHT_EVENT_LOOP",
            Self::UncontrolledIoMultiplication => "UNCONTROLLED_IO_MULTIPLICATION",
            Self::CascadingTimers => "CASCADING_TIMERS",
            Self::FanOutBurst => "FAN_OUT_BURST",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::TightEventLoop => Severity::Critical,
            Self::UncontrolledIoMultiplication | Self::CascadingTimers => Severity::Warning,
            Self::FanOutBurst => Severity::Info,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::TightEventLoop => {
                "Break the loop with an E_DELAY or gate it behind an E_PERMIT"
            }
            Self::UncontrolledIoMultiplication => {
                "Debounce or batch the I/O source before it enters the cascade"
            }
            Self::CascadingTimers => {
                "Consolidate timers or lengthen cycle periods to reduce aggregate frequency"
            }
            Self::FanOutBurst => {
                "Consider an E_SPLIT chain or sequencing if downstream order matters"
            }
        }
    }
}

/// One detected anti-pattern instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub pattern: String,
    pub severity: Severity,
    pub description: String,
    pub locations: Vec<String>,
    pub recommendation: String,
}

impl DetectedPattern {
    pub fn new(kind: PatternKind, description: impl Into<String>, locations: Vec<String>) -> Self {
        Self {
            pattern: kind.as_str().to_string(),
            severity: kind.severity(),
            description: description.into(),
            locations,
            recommendation: kind.recommendation().to_string(),
        }
    }
}

static IEC_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^T#(\d+(?:\.\d+)?)(us|ms|s|m|h)$").expect("valid regex"));

/// Parse an IEC 61131-3 time literal (`T#10ms`, `t#1.5s`) to milliseconds
pub fn parse_iec_duration_ms(literal: &str) -> Option<f64> {
    let caps = IEC_DURATION.captures(literal.trim())?;
    let value: f64 = caps[1].parse().ok()?;
    let ms = match caps[2].to_ascii_lowercase().as_str() {
        "us" => value / 1000.0,
        "ms" => value,
        "s" => value * 1000.0,
        "m" => value * 60_000.0,
        "h" => value * 3_600_000.0,
        _ => return None,
    };
    Some(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_units() {
        assert_eq!(parse_iec_duration_ms("T#10ms"), Some(10.0));
        assert_eq!(parse_iec_duration_ms("t#1s"), Some(1000.0));
        assert_eq!(parse_iec_duration_ms("T#500us"), Some(0.5));
        assert_eq!(parse_iec_duration_ms("T#1.5s"), Some(1500.0));
        assert_eq!(parse_iec_duration_ms("T#2m"), Some(120_000.0));
    }

    #[test]
    fn test_duration_rejects_garbage() {
        assert_eq!(parse_iec_duration_ms("10ms"), None);
        assert_eq!(parse_iec_duration_ms("T#"), None);
        assert_eq!(parse_iec_duration_ms("T#fastish"), None);
    }

    #[test]
    fn test_pattern_severities() {
        assert_eq!(PatternKind::TightEventLoop.severity(), Severity::Critical);
        assert_eq!(PatternKind::CascadingTimers.severity(), Severity::Warning);
        assert_eq!(PatternKind::FanOutBurst.severity(), Severity::Info);
    }
}
