//! Event flow analyzer
//!
//! Ties graph construction, cascade tracing and loop detection into one
//! report with the shared `{success, errors, warnings, details}` shape.

use serde_json::json;
use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::features::event_flow::domain::{CascadePath, EventGraph, RiskBand};
use crate::features::parsing::ParsedApplication;
use crate::shared::models::{AnalysisReport, ExitStatus, Finding, Severity};

use super::cycle_detector::detect_cycles;
use super::dot_export::render_dot;
use super::tracer::{multiplication_factor, trace_cascade};

pub struct EventFlowAnalyzer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> EventFlowAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Run the full cascade analysis over a parsed application
    pub fn analyze(&self, app: &ParsedApplication) -> AnalysisReport {
        if app.files_scanned == 0 {
            return AnalysisReport::failure(vec![
                "No artifact files found in application directory".to_string(),
            ]);
        }
        if app.nothing_parsed() {
            return AnalysisReport::failure(vec!["Failed to parse any artifact files".to_string()]);
        }

        let graph = EventGraph::build(&app.fb_types);
        if graph.is_empty() {
            let details = json!({
                "multiplication_factors": {},
                "cascade_paths": [],
                "explosive_patterns": [],
                "cycles_detected": [],
            });
            return AnalysisReport::safe(details)
                .with_warning_messages(self.warnings_with_parse(app, "No event connections found in application"));
        }

        tracing::info!(
            "event graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let (factors, all_paths) = compute_factors(&graph);
        let ef = &self.config.event_flow;

        let max_multiplication = factors.values().cloned().fold(0.0_f64, f64::max);

        // Findings for explosive sources
        let mut findings = Vec::new();
        let mut explosive = Vec::new();
        for (fb, &factor) in &factors {
            if factor > ef.high_factor {
                let severity = if factor > ef.critical_factor {
                    Severity::Critical
                } else {
                    Severity::Warning
                };
                explosive.push(json!({
                    "source": fb,
                    "multiplication": factor,
                    "severity": severity.as_str(),
                    "recommendation": "Use an event chain head or adapter consolidation to reduce fan-out",
                }));
                findings.push(
                    Finding::new(
                        fb.clone(),
                        "EVENT_MULTIPLICATION",
                        severity,
                        format!("source event multiplies into {} downstream events", factor),
                    )
                    .with_suggestion("consolidate event chains behind a single sequencer"),
                );
            }
        }

        // Tight loops are always critical
        let cycles = detect_cycles(&graph, ef.cycle_depth);
        for cycle in &cycles {
            findings.push(Finding::new(
                cycle.fb.clone(),
                "TIGHT_EVENT_LOOP",
                Severity::Critical,
                format!(
                    "event loops back to {} within {} hops",
                    cycle.fb, ef.cycle_depth
                ),
            ));
        }

        // Multiplication alone also raises the exit classification, even
        // below the explosive-finding threshold
        let floor = match RiskBand::classify(max_multiplication, ef) {
            RiskBand::Critical | RiskBand::Warning => ExitStatus::Critical,
            RiskBand::Caution => ExitStatus::Moderate,
            RiskBand::Safe => ExitStatus::Safe,
        };

        let capped_paths: Vec<&CascadePath> =
            all_paths.iter().take(ef.cascade_path_cap).collect();
        let explosive_count = explosive.len();
        let cycle_count = cycles.len();

        let details = json!({
            "multiplication_factors": factors,
            "cascade_paths": capped_paths,
            "explosive_patterns": explosive,
            "cycles_detected": cycles,
            "summary": {
                "total_fbs_analyzed": app.fb_types.len(),
                "event_graph_nodes": graph.node_count(),
                "max_multiplication": round1(max_multiplication),
                "explosive_patterns_found": explosive_count,
                "cycles_found": cycle_count,
            },
        });

        AnalysisReport::from_findings_with_floor(findings, details, floor)
            .with_warning_messages(app.parse_warnings.clone())
    }

    /// DOT rendering of the same analysis, for `--dot`
    pub fn dot(&self, app: &ParsedApplication) -> Option<String> {
        let graph = EventGraph::build(&app.fb_types);
        if graph.is_empty() {
            return None;
        }
        let (factors, paths) = compute_factors(&graph);
        Some(render_dot(&factors, &paths, &self.config.event_flow))
    }

    fn warnings_with_parse(&self, app: &ParsedApplication, extra: &str) -> Vec<String> {
        let mut warnings = app.parse_warnings.clone();
        warnings.push(extra.to_string());
        warnings
    }
}

/// Multiplication factor per source FB plus every traced cascade path
///
/// Factors are rounded to one decimal; map order is deterministic.
pub fn compute_factors(graph: &EventGraph) -> (BTreeMap<String, f64>, Vec<CascadePath>) {
    let mut factors = BTreeMap::new();
    let mut all_paths = Vec::new();

    for source in graph.nodes() {
        let paths = trace_cascade(graph, source);
        let factor = multiplication_factor(&paths);
        if factor > 0.0 {
            factors.insert(source.to_string(), round1(factor));
            all_paths.extend(paths);
        }
    }

    (factors, all_paths)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{ArtifactKind, EventConnection, FbType};
    use std::path::PathBuf;

    fn app_with(connections: &[(&str, &str)]) -> ParsedApplication {
        let mut fb = FbType::new("net", ArtifactKind::CompositeFb, PathBuf::from("net.fbt"));
        fb.event_connections = connections
            .iter()
            .map(|(s, d)| EventConnection {
                source: format!("{}.EO", s),
                destination: format!("{}.REQ", d),
            })
            .collect();
        ParsedApplication {
            app_dir: PathBuf::from("."),
            fb_types: vec![fb],
            parse_warnings: Vec::new(),
            files_scanned: 1,
        }
    }

    #[test]
    fn test_small_chain_is_safe() {
        let config = AnalysisConfig::default();
        let report = EventFlowAnalyzer::new(&config).analyze(&app_with(&[("a", "b"), ("b", "c")]));
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_tight_loop_is_critical() {
        let config = AnalysisConfig::default();
        let report = EventFlowAnalyzer::new(&config).analyze(&app_with(&[("a", "b"), ("b", "a")]));
        assert_eq!(report.exit_code(), 11);
        let cycles = &report.details["cycles_detected"];
        assert_eq!(cycles.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_long_chain_crosses_caution_band() {
        // Chain of 12 FBs: factor 12, inside the 10-20x caution band
        let edges: Vec<(String, String)> = (0..11)
            .map(|i| (format!("fb{:02}", i), format!("fb{:02}", i + 1)))
            .collect();
        let refs: Vec<(&str, &str)> = edges
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let config = AnalysisConfig::default();
        let report = EventFlowAnalyzer::new(&config).analyze(&app_with(&refs));
        assert_eq!(report.exit_code(), 10);
        assert_eq!(report.details["summary"]["max_multiplication"], 12.0);
    }

    #[test]
    fn test_empty_app_fails() {
        let config = AnalysisConfig::default();
        let app = ParsedApplication {
            app_dir: PathBuf::from("."),
            fb_types: Vec::new(),
            parse_warnings: Vec::new(),
            files_scanned: 0,
        };
        let report = EventFlowAnalyzer::new(&config).analyze(&app);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_report_is_idempotent() {
        let config = AnalysisConfig::default();
        let app = app_with(&[("a", "b"), ("a", "c"), ("c", "d")]);
        let analyzer = EventFlowAnalyzer::new(&config);
        assert_eq!(analyzer.analyze(&app).to_json(), analyzer.analyze(&app).to_json());
    }
}
