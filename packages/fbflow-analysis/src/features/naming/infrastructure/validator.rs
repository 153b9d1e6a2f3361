//! Naming validation over a parsed application

use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

use crate::features::naming::domain::{is_valid, rule_for, suggest, NameClass};
use crate::features::parsing::ParsedApplication;
use crate::shared::models::{AnalysisReport, ArtifactKind, FbType, Finding, Severity};

/// Reporting options, all off by default
#[derive(Debug, Clone, Default)]
pub struct NamingOptions {
    /// Drop findings below this severity
    pub min_severity: Option<Severity>,
    /// Only check artifacts of this kind
    pub artifact_filter: Option<ArtifactKind>,
    /// Promote every finding to ERROR
    pub strict: bool,
}

pub struct NamingValidator {
    options: NamingOptions,
}

impl NamingValidator {
    pub fn new(options: NamingOptions) -> Self {
        Self { options }
    }

    pub fn analyze(&self, app: &ParsedApplication) -> AnalysisReport {
        if app.files_scanned == 0 {
            return AnalysisReport::failure(vec![
                "No artifact files found in application directory".to_string(),
            ]);
        }
        if app.nothing_parsed() {
            return AnalysisReport::failure(vec!["Failed to parse any artifact files".to_string()]);
        }

        let mut checked = 0_usize;
        let mut violations: Vec<Finding> = Vec::new();

        for fb in &app.fb_types {
            if let Some(filter) = self.options.artifact_filter {
                if fb.kind != filter {
                    continue;
                }
            }
            self.check_artifact(fb, &mut checked, &mut violations);
        }
        if self.options.artifact_filter.is_none() {
            self.check_folders(app, &mut checked, &mut violations);
        }

        tracing::info!("checked {} names, {} violation(s)", checked, violations.len());

        if self.options.strict {
            for finding in &mut violations {
                finding.severity = Severity::Error;
            }
        }

        let total_violations = violations.len();
        let mut by_severity: BTreeMap<&str, usize> = BTreeMap::new();
        for finding in &violations {
            *by_severity.entry(finding.severity.as_str()).or_insert(0) += 1;
        }

        let findings: Vec<Finding> = match self.options.min_severity {
            Some(min) => violations
                .iter()
                .filter(|f| f.severity >= min)
                .cloned()
                .collect(),
            None => violations.clone(),
        };

        let compliance_pct = if checked == 0 {
            100.0
        } else {
            ((checked - total_violations) as f64 / checked as f64 * 1000.0).round() / 10.0
        };

        let details = json!({
            "violations": violations,
            "summary": {
                "names_checked": checked,
                "violations": total_violations,
                "by_severity": by_severity,
                "compliance_pct": compliance_pct,
            },
        });

        AnalysisReport::from_findings(findings, details)
            .with_warning_messages(app.parse_warnings.clone())
    }

    fn check_artifact(&self, fb: &FbType, checked: &mut usize, violations: &mut Vec<Finding>) {
        let file = fb.file_path.display().to_string();
        self.check_name(&fb.name, NameClass::for_artifact(fb.kind), &file, checked, violations);

        for event in fb.event_inputs.iter().chain(&fb.event_outputs) {
            let qualified = format!("{}.{}", fb.name, event);
            self.check_member(event, &qualified, NameClass::Event, &file, checked, violations);
        }
        for var in fb.input_vars.iter().chain(&fb.output_vars) {
            let qualified = format!("{}.{}", fb.name, var.name);
            self.check_member(&var.name, &qualified, NameClass::InterfaceVar, &file, checked, violations);
        }
        for var in &fb.internal_vars {
            let qualified = format!("{}.{}", fb.name, var.name);
            self.check_member(&var.name, &qualified, NameClass::InternalVar, &file, checked, violations);
        }
    }

    /// Folder names along each artifact's path, each checked once
    fn check_folders(&self, app: &ParsedApplication, checked: &mut usize, violations: &mut Vec<Finding>) {
        let mut folders: BTreeSet<String> = BTreeSet::new();
        for fb in &app.fb_types {
            let relative = fb
                .file_path
                .strip_prefix(&app.app_dir)
                .unwrap_or(&fb.file_path);
            let Some(parent) = relative.parent() else {
                continue;
            };
            for component in parent.components() {
                if let std::path::Component::Normal(name) = component {
                    folders.insert(name.to_string_lossy().into_owned());
                }
            }
        }
        for folder in folders {
            self.check_name(&folder, NameClass::Folder, &folder, checked, violations);
        }
    }

    fn check_name(
        &self,
        name: &str,
        class: NameClass,
        file: &str,
        checked: &mut usize,
        violations: &mut Vec<Finding>,
    ) {
        self.check_member(name, name, class, file, checked, violations);
    }

    fn check_member(
        &self,
        name: &str,
        qualified: &str,
        class: NameClass,
        file: &str,
        checked: &mut usize,
        violations: &mut Vec<Finding>,
    ) {
        *checked += 1;
        if is_valid(name, class) {
            return;
        }
        let rule = rule_for(class);
        let mut finding = Finding::new(
            qualified,
            class.as_str(),
            rule.severity,
            format!(
                "'{}' does not follow {} (e.g. '{}')",
                name, rule.convention, rule.example
            ),
        )
        .with_file(file);
        if let Some(candidate) = suggest(name, class) {
            finding = finding.with_suggestion(candidate);
        }
        violations.push(finding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::VarDeclaration;
    use std::path::PathBuf;

    fn app(fb_types: Vec<FbType>) -> ParsedApplication {
        let files_scanned = fb_types.len();
        ParsedApplication {
            app_dir: PathBuf::from("/app"),
            fb_types,
            parse_warnings: Vec::new(),
            files_scanned,
        }
    }

    fn cat(name: &str) -> FbType {
        FbType::new(
            name,
            ArtifactKind::Cat,
            PathBuf::from(format!("/app/{}.cat", name)),
        )
    }

    #[test]
    fn test_valid_cat_passes() {
        let report = NamingValidator::new(NamingOptions::default())
            .analyze(&app(vec![cat("AnalogInput")]));
        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            report.details["summary"]["compliance_pct"].as_f64().unwrap(),
            100.0
        );
    }

    #[test]
    fn test_bad_cat_fails_with_suggestion() {
        let report = NamingValidator::new(NamingOptions::default())
            .analyze(&app(vec![cat("analogInput")]));
        assert_eq!(report.exit_code(), 11);
        let violation = &report.details["violations"][0];
        assert_eq!(violation["suggestion"], "AnalogInput");
    }

    #[test]
    fn test_reserved_events_pass() {
        let mut fb = cat("MotorGroup");
        fb.event_inputs.push("INIT".to_string());
        fb.event_outputs.push("INITO".to_string());
        let report = NamingValidator::new(NamingOptions::default()).analyze(&app(vec![fb]));
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_event_violation_suggests_snake_case() {
        let mut fb = cat("MotorGroup");
        fb.event_inputs.push("StartMotor".to_string());
        let report = NamingValidator::new(NamingOptions::default()).analyze(&app(vec![fb]));
        assert_eq!(report.exit_code(), 11);
        let violation = &report.details["violations"][0];
        assert_eq!(violation["suggestion"], "START_MOTOR");
        assert_eq!(violation["artifact"], "MotorGroup.StartMotor");
    }

    #[test]
    fn test_internal_var_is_warning() {
        let mut fb = FbType::new(
            "motorControl",
            ArtifactKind::BasicFb,
            PathBuf::from("/app/motorControl.fbt"),
        );
        fb.internal_vars.push(VarDeclaration {
            name: "LastValue".to_string(),
            type_name: "REAL".to_string(),
        });
        let report = NamingValidator::new(NamingOptions::default()).analyze(&app(vec![fb]));
        assert_eq!(report.exit_code(), 10);
    }

    #[test]
    fn test_strict_promotes_warnings() {
        let mut fb = FbType::new(
            "motorControl",
            ArtifactKind::BasicFb,
            PathBuf::from("/app/motorControl.fbt"),
        );
        fb.internal_vars.push(VarDeclaration {
            name: "LastValue".to_string(),
            type_name: "REAL".to_string(),
        });
        let options = NamingOptions {
            strict: true,
            ..Default::default()
        };
        let report = NamingValidator::new(options).analyze(&app(vec![fb]));
        assert_eq!(report.exit_code(), 11);
    }

    #[test]
    fn test_min_severity_filters_reported_findings() {
        let mut fb = FbType::new(
            "motorControl",
            ArtifactKind::BasicFb,
            PathBuf::from("/app/motorControl.fbt"),
        );
        fb.internal_vars.push(VarDeclaration {
            name: "LastValue".to_string(),
            type_name: "REAL".to_string(),
        });
        let options = NamingOptions {
            min_severity: Some(Severity::Error),
            ..Default::default()
        };
        let report = NamingValidator::new(options).analyze(&app(vec![fb]));
        // The warning still appears in details but no longer gates the exit
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.details["summary"]["violations"], 1);
    }

    #[test]
    fn test_artifact_filter() {
        let mut bad_fb = FbType::new(
            "MotorControl",
            ArtifactKind::BasicFb,
            PathBuf::from("/app/MotorControl.fbt"),
        );
        bad_fb.internal_vars.push(VarDeclaration {
            name: "x1".to_string(),
            type_name: "REAL".to_string(),
        });
        let options = NamingOptions {
            artifact_filter: Some(ArtifactKind::Cat),
            ..Default::default()
        };
        let report = NamingValidator::new(options).analyze(&app(vec![bad_fb]));
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.details["summary"]["names_checked"], 0);
    }

    #[test]
    fn test_folder_names_checked() {
        let mut fb = cat("AnalogInput");
        fb.file_path = PathBuf::from("/app/io_blocks/AnalogInput.cat");
        let report = NamingValidator::new(NamingOptions::default()).analyze(&app(vec![fb]));
        assert_eq!(report.exit_code(), 10);
        let violation = &report.details["violations"][0];
        assert_eq!(violation["rule"], "Folder");
        assert_eq!(violation["suggestion"], "IoBlocks");
    }
}
