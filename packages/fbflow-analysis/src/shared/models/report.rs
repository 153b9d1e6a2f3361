//! Analysis report with the fixed JSON key set
//!
//! Every pass serializes to `{ success, errors, warnings, details }` and maps
//! to the shared exit-code contract:
//!
//! - 0: success / safe
//! - 1: parse or I/O failure
//! - 10: warning-level findings / moderate risk
//! - 11: error/critical findings / high risk
//!
//! Reports contain no timestamps so repeated runs over unchanged input are
//! byte-identical.

use serde::Serialize;
use serde_json::Value;

use super::finding::{Finding, Severity};

/// Exit classification for one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Safe,
    ParseFailure,
    Moderate,
    Critical,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            Self::Safe => 0,
            Self::ParseFailure => 1,
            Self::Moderate => 10,
            Self::Critical => 11,
        }
    }

    /// Severity of a set of findings mapped to an exit status
    pub fn from_findings(findings: &[Finding]) -> Self {
        match findings.iter().map(|f| f.severity).max() {
            Some(Severity::Critical) | Some(Severity::Error) => Self::Critical,
            Some(Severity::Warning) => Self::Moderate,
            _ => Self::Safe,
        }
    }

    /// Worst of two statuses; parse failure dominates everything
    pub fn worst(self, other: Self) -> Self {
        fn rank(s: ExitStatus) -> u8 {
            match s {
                ExitStatus::Safe => 0,
                ExitStatus::Moderate => 1,
                ExitStatus::Critical => 2,
                ExitStatus::ParseFailure => 3,
            }
        }
        if rank(other) > rank(self) {
            other
        } else {
            self
        }
    }
}

/// Structured result for one analysis pass
///
/// `errors` and `warnings` hold either plain message strings or serialized
/// findings; pass-specific data goes in `details`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub errors: Vec<Value>,
    pub warnings: Vec<Value>,
    pub details: Value,

    #[serde(skip)]
    status: ExitStatus,
}

impl AnalysisReport {
    /// Successful run with a precomputed exit classification
    pub fn new(status: ExitStatus, errors: Vec<Value>, warnings: Vec<Value>, details: Value) -> Self {
        Self {
            success: true,
            errors,
            warnings,
            details,
            status,
        }
    }

    /// Safe run (exit 0) with only details
    pub fn safe(details: Value) -> Self {
        Self::new(ExitStatus::Safe, Vec::new(), Vec::new(), details)
    }

    /// Parse/I-O failure (exit 1)
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors: errors.into_iter().map(Value::String).collect(),
            warnings: Vec::new(),
            details: Value::Object(Default::default()),
            status: ExitStatus::ParseFailure,
        }
    }

    /// Build a report from findings: blocking findings land in `errors`,
    /// warnings in `warnings`, and the status is severity-derived.
    pub fn from_findings(findings: Vec<Finding>, details: Value) -> Self {
        Self::from_findings_with_floor(findings, details, ExitStatus::Safe)
    }

    /// Like [`from_findings`](Self::from_findings) but never classifies below
    /// `floor` — used by passes whose risk also depends on non-finding
    /// metrics (multiplication factors, load percentages, queue overflow).
    pub fn from_findings_with_floor(findings: Vec<Finding>, details: Value, floor: ExitStatus) -> Self {
        let status = ExitStatus::from_findings(&findings).worst(floor);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for finding in findings {
            let value = serde_json::to_value(&finding).unwrap_or(Value::Null);
            if finding.severity.is_blocking() {
                errors.push(value);
            } else if finding.severity == Severity::Warning {
                warnings.push(value);
            }
            // INFO findings stay in details only
        }
        Self {
            success: true,
            errors,
            warnings,
            details,
            status,
        }
    }

    pub fn with_warning_messages(mut self, messages: Vec<String>) -> Self {
        self.warnings
            .extend(messages.into_iter().map(Value::String));
        self
    }

    pub fn status(&self) -> ExitStatus {
        self.status
    }

    pub fn exit_code(&self) -> i32 {
        if !self.success {
            return ExitStatus::ParseFailure.code();
        }
        self.status.code()
    }

    /// Pretty JSON for files/stdout
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AnalysisReport::safe(json!({})).exit_code(), 0);
        assert_eq!(AnalysisReport::failure(vec!["bad".into()]).exit_code(), 1);

        let warn = AnalysisReport::from_findings(
            vec![Finding::new("a", "r", Severity::Warning, "d")],
            json!({}),
        );
        assert_eq!(warn.exit_code(), 10);

        let err = AnalysisReport::from_findings(
            vec![Finding::new("a", "r", Severity::Error, "d")],
            json!({}),
        );
        assert_eq!(err.exit_code(), 11);

        let crit = AnalysisReport::from_findings(
            vec![Finding::new("a", "r", Severity::Critical, "d")],
            json!({}),
        );
        assert_eq!(crit.exit_code(), 11);
    }

    #[test]
    fn test_fixed_key_set() {
        let report = AnalysisReport::safe(json!({"n": 1}));
        let value: Value = serde_json::from_str(&report.to_json()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["details", "errors", "success", "warnings"]);
    }

    #[test]
    fn test_findings_partition() {
        let report = AnalysisReport::from_findings(
            vec![
                Finding::new("a", "r", Severity::Error, "blocking"),
                Finding::new("b", "r", Severity::Warning, "advisory"),
                Finding::new("c", "r", Severity::Info, "note"),
            ],
            json!({}),
        );
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_worst_status() {
        use ExitStatus::*;
        assert_eq!(Safe.worst(Moderate), Moderate);
        assert_eq!(Moderate.worst(Critical), Critical);
        assert_eq!(Critical.worst(ParseFailure), ParseFailure);
        assert_eq!(Critical.worst(Safe), Critical);
    }
}
