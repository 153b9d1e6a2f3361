//! Severity-tagged findings
//!
//! Every analysis pass reports through these write-once records.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Finding severity, ordered ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Blocking severities map to exit code 11
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Error | Self::Critical)
    }

    fn order_index(&self) -> u8 {
        match self {
            Self::Info => 0,
            Self::Warning => 1,
            Self::Error => 2,
            Self::Critical => 3,
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_index().cmp(&other.order_index())
    }
}

/// A single advisory finding produced by a validation or analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Artifact or FB the finding is about
    pub artifact: String,
    /// Short rule identifier (e.g. "TIGHT_EVENT_LOOP", "Event naming")
    pub rule: String,
    /// File the artifact was declared in, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub severity: Severity,
    pub description: String,
    /// Suggested fix, when one can be derived mechanically
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(
        artifact: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            artifact: artifact.into(),
            rule: rule.into(),
            file: None,
            severity,
            description: description.into(),
            suggestion: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Worst severity in a slice of findings
pub fn worst_severity(findings: &[Finding]) -> Option<Severity> {
    findings.iter().map(|f| f.severity).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn test_blocking() {
        assert!(!Severity::Info.is_blocking());
        assert!(!Severity::Warning.is_blocking());
        assert!(Severity::Error.is_blocking());
        assert!(Severity::Critical.is_blocking());
    }

    #[test]
    fn test_worst_severity() {
        let findings = vec![
            Finding::new("a", "r", Severity::Info, "d"),
            Finding::new("b", "r", Severity::Critical, "d"),
            Finding::new("c", "r", Severity::Warning, "d"),
        ];
        assert_eq!(worst_severity(&findings), Some(Severity::Critical));
        assert_eq!(worst_severity(&[]), None);
    }
}
