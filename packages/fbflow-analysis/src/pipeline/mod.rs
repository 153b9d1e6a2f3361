//! Full-application analysis pipeline
//!
//! Runs every pass over one parsed application and folds the results into a
//! single report: findings aggregated across passes, a composite quality
//! score, and the worst pass verdict as the exit code.

mod quality;

use serde_json::json;

use crate::config::AnalysisConfig;
use crate::features::cpu_load::{CpuLoadEstimator, Platform};
use crate::features::event_flow::EventFlowAnalyzer;
use crate::features::naming::{NamingOptions, NamingValidator};
use crate::features::network_check::NetworkChecker;
use crate::features::parsing::ParsedApplication;
use crate::features::queue_sim::QueueSimAnalyzer;
use crate::features::storm_patterns::StormPatternAnalyzer;
use crate::shared::models::AnalysisReport;

pub use quality::grade;

pub struct AnalysisPipeline<'a> {
    config: &'a AnalysisConfig,
    platform: Platform,
    naming_options: NamingOptions,
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(config: &'a AnalysisConfig, platform: Platform) -> Self {
        Self {
            config,
            platform,
            naming_options: NamingOptions::default(),
        }
    }

    pub fn with_naming_options(mut self, options: NamingOptions) -> Self {
        self.naming_options = options;
        self
    }

    pub fn run(&self, app: &ParsedApplication) -> AnalysisReport {
        if app.files_scanned == 0 {
            return AnalysisReport::failure(vec![
                "No artifact files found in application directory".to_string(),
            ]);
        }
        if app.nothing_parsed() {
            return AnalysisReport::failure(vec!["Failed to parse any artifact files".to_string()]);
        }

        tracing::info!("running full pipeline over {}", app.app_dir.display());

        let event_flow = EventFlowAnalyzer::new(self.config).analyze(app);
        let cpu_load = CpuLoadEstimator::new(self.config, self.platform).analyze(app);
        let queue_sim = QueueSimAnalyzer::new(self.config).analyze(app, None);
        let patterns = StormPatternAnalyzer::new(self.config).analyze(app);
        let naming = NamingValidator::new(self.naming_options.clone()).analyze(app);
        let network = NetworkChecker::new(app).analyze();

        let quality = quality::score(&naming, &event_flow, &cpu_load, &network);

        let passes = [
            ("event_flow", event_flow),
            ("cpu_load", cpu_load),
            ("queue_sim", queue_sim),
            ("storm_patterns", patterns),
            ("naming", naming),
            ("network_check", network),
        ];

        let mut status = crate::shared::models::ExitStatus::Safe;
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut pass_details = serde_json::Map::new();
        let mut pass_verdicts = serde_json::Map::new();
        for (name, report) in passes {
            status = status.worst(report.status());
            pass_verdicts.insert(name.to_string(), json!(report.exit_code()));
            errors.extend(report.errors);
            warnings.extend(report.warnings);
            pass_details.insert(name.to_string(), report.details);
        }

        let details = json!({
            "passes": pass_details,
            "pass_exit_codes": pass_verdicts,
            "quality": quality,
        });

        AnalysisReport::new(status, errors, warnings, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{ArtifactKind, EventConnection, FbType};
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

    fn healthy_app() -> ParsedApplication {
        let mut net = FbType::new("MotorGroup", ArtifactKind::Cat, PathBuf::from("/app/MotorGroup.cat"));
        net.event_connections.push(EventConnection {
            source: "a.EO".to_string(),
            destination: "b.REQ".to_string(),
        });
        app(vec![net])
    }

    #[test]
    fn test_pipeline_aggregates_all_passes() {
        let config = AnalysisConfig::default();
        let report = AnalysisPipeline::new(&config, Platform::Unknown).run(&healthy_app());
        let passes = report.details["passes"].as_object().unwrap();
        for name in [
            "event_flow",
            "cpu_load",
            "queue_sim",
            "storm_patterns",
            "naming",
            "network_check",
        ] {
            assert!(passes.contains_key(name), "missing pass {}", name);
        }
        assert!(report.details["quality"]["score"].as_f64().is_some());
    }

    #[test]
    fn test_worst_pass_wins() {
        let config = AnalysisConfig::default();
        // Tight loop in the network forces the pattern pass critical
        let mut net = FbType::new("MotorGroup", ArtifactKind::Cat, PathBuf::from("/app/MotorGroup.cat"));
        net.event_connections = vec![
            EventConnection {
                source: "a.EO".to_string(),
                destination: "b.REQ".to_string(),
            },
            EventConnection {
                source: "b.CNF".to_string(),
                destination: "a.REQ".to_string(),
            },
        ];
        let report = AnalysisPipeline::new(&config, Platform::Unknown).run(&app(vec![net]));
        assert_eq!(report.exit_code(), 11);
    }

    #[test]
    fn test_empty_directory_fails() {
        let config = AnalysisConfig::default();
        let report = AnalysisPipeline::new(&config, Platform::Unknown).run(&app(Vec::new()));
        assert_eq!(report.exit_code(), 1);
    }
}
