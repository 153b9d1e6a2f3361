//! Anti-pattern rule engine

use rustc_hash::FxHashSet;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::config::AnalysisConfig;
use crate::features::event_flow::{detect_cycles, EventGraph};
use crate::features::parsing::ParsedApplication;
use crate::features::storm_patterns::domain::{
    parse_iec_duration_ms, DetectedPattern, PatternKind,
};
use crate::shared::models::{AnalysisReport, Finding, Severity};
use crate::shared::text::split_words;

const IO_TOKENS: [&str; 5] = ["IO", "DI", "AI", "DO", "AO"];

pub struct StormPatternAnalyzer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> StormPatternAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
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

        let graph = EventGraph::build(&app.fb_types);
        let mut patterns = Vec::new();

        self.detect_tight_loops(&graph, &mut patterns);
        self.detect_io_multiplication(app, &graph, &mut patterns);
        self.detect_cascading_timers(app, &mut patterns);
        self.detect_fan_out_bursts(app, &mut patterns);

        tracing::info!("pattern scan found {} hit(s)", patterns.len());

        let findings: Vec<Finding> = patterns
            .iter()
            .filter(|p| p.severity >= Severity::Warning)
            .map(|p| {
                Finding::new(
                    p.locations.first().cloned().unwrap_or_default(),
                    p.pattern.clone(),
                    p.severity,
                    p.description.clone(),
                )
                .with_suggestion(p.recommendation.clone())
            })
            .collect();

        let mut summary: BTreeMap<&str, usize> = BTreeMap::new();
        for pattern in &patterns {
            *summary.entry(severity_key(pattern.severity)).or_insert(0) += 1;
        }

        let details = json!({
            "detected_patterns": patterns,
            "pattern_summary": summary,
        });

        AnalysisReport::from_findings(findings, details)
            .with_warning_messages(app.parse_warnings.clone())
    }

    fn detect_tight_loops(&self, graph: &EventGraph, patterns: &mut Vec<DetectedPattern>) {
        for hit in detect_cycles(graph, self.config.event_flow.cycle_depth) {
            patterns.push(DetectedPattern::new(
                PatternKind::TightEventLoop,
                format!(
                    "Events from '{}' return to it within {}",
                    hit.fb, hit.cycle_depth
                ),
                vec![hit.fb],
            ));
        }
    }

    fn detect_io_multiplication(
        &self,
        app: &ParsedApplication,
        graph: &EventGraph,
        patterns: &mut Vec<DetectedPattern>,
    ) {
        let types = instance_types(app);
        let threshold = self.config.patterns.io_multiplication_threshold;

        for node in graph.nodes() {
            let type_name = types.get(node).map(String::as_str).unwrap_or("");
            if !has_io_token(node) && !has_io_token(type_name) {
                continue;
            }
            let reach = reachable_count(graph, node);
            if reach > threshold {
                patterns.push(DetectedPattern::new(
                    PatternKind::UncontrolledIoMultiplication,
                    format!(
                        "I/O block '{}' drives {} downstream blocks (threshold {})",
                        node, reach, threshold
                    ),
                    vec![node.to_string()],
                ));
            }
        }
    }

    fn detect_cascading_timers(&self, app: &ParsedApplication, patterns: &mut Vec<DetectedPattern>) {
        let mut total_hz = 0.0_f64;
        let mut locations = Vec::new();

        for fb in &app.fb_types {
            for inst in &fb.fb_instances {
                if inst.type_name != "E_CYCLE" {
                    continue;
                }
                let Some(period_ms) = inst.parameter("DT").and_then(parse_iec_duration_ms) else {
                    continue;
                };
                if period_ms <= 0.0 {
                    continue;
                }
                let hz = 1000.0 / period_ms;
                total_hz += hz;
                locations.push(format!("{}.{} at {:.1} Hz", fb.name, inst.name, hz));
            }
        }

        let threshold = self.config.patterns.timer_hz_threshold;
        if total_hz > threshold {
            patterns.push(DetectedPattern::new(
                PatternKind::CascadingTimers,
                format!(
                    "E_CYCLE instances fire {:.1} events/s combined (threshold {:.0})",
                    total_hz, threshold
                ),
                locations,
            ));
        }
    }

    fn detect_fan_out_bursts(&self, app: &ParsedApplication, patterns: &mut Vec<DetectedPattern>) {
        let threshold = self.config.patterns.fan_out_threshold;

        for fb in &app.fb_types {
            let mut fan_out: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
            for conn in &fb.event_connections {
                fan_out
                    .entry(conn.source.as_str())
                    .or_default()
                    .insert(conn.destination.as_str());
            }
            for (source, destinations) in fan_out {
                if destinations.len() > threshold {
                    patterns.push(DetectedPattern::new(
                        PatternKind::FanOutBurst,
                        format!(
                            "'{}' fires {} destinations at once in '{}'",
                            source,
                            destinations.len(),
                            fb.name
                        ),
                        vec![format!("{}:{}", fb.name, source)],
                    ));
                }
            }
        }
    }
}

/// Instance name -> declared type name across every parsed network
fn instance_types(app: &ParsedApplication) -> BTreeMap<String, String> {
    let mut types = BTreeMap::new();
    for fb in &app.fb_types {
        for inst in &fb.fb_instances {
            types.insert(inst.name.clone(), inst.type_name.clone());
        }
    }
    types
}

/// Count of distinct FBs reachable downstream of `origin` (excluding it)
fn reachable_count(graph: &EventGraph, origin: &str) -> usize {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(origin);

    while let Some(node) = queue.pop_front() {
        for next in graph.successors(node) {
            if next != origin && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

/// Does the name contain an I/O word (IO, DI, AI, DO, AO) as its own token?
fn has_io_token(name: &str) -> bool {
    split_words(name)
        .iter()
        .any(|w| IO_TOKENS.contains(&w.to_ascii_uppercase().as_str()))
}

fn severity_key(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
        Severity::Critical => "critical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{ArtifactKind, EventConnection, FbInstance, FbType};
    use std::path::PathBuf;

    fn app(fb_types: Vec<FbType>) -> ParsedApplication {
        let files_scanned = fb_types.len();
        ParsedApplication {
            app_dir: PathBuf::from("."),
            fb_types,
            parse_warnings: Vec::new(),
            files_scanned,
        }
    }

    fn network(connections: &[(&str, &str)]) -> FbType {
        let mut fb = FbType::new("App", ArtifactKind::Cat, PathBuf::from("App.cat"));
        fb.event_connections = connections
            .iter()
            .map(|(s, d)| EventConnection {
                source: s.to_string(),
                destination: d.to_string(),
            })
            .collect();
        fb
    }

    #[test]
    fn test_io_token_detection() {
        assert!(has_io_token("AI_Scaler"));
        assert!(has_io_token("scan_io"));
        assert!(has_io_token("ioGateway"));
        assert!(!has_io_token("DigitalInput"));
    }

    #[test]
    fn test_tight_loop_is_critical() {
        let config = AnalysisConfig::default();
        let net = network(&[("A.EO", "B.REQ"), ("B.CNF", "A.REQ")]);
        let report = StormPatternAnalyzer::new(&config).analyze(&app(vec![net]));
        assert_eq!(report.exit_code(), 11);
        let patterns = report.details["detected_patterns"].as_array().unwrap();
        assert!(patterns
            .iter()
            .any(|p| p["pattern"] == "TIGHT_EVENT_LOOP"));
    }

    #[test]
    fn test_cascading_timers_warn_above_threshold() {
        let config = AnalysisConfig::default();
        let mut net = network(&[]);
        for (name, dt) in [("cycle1", "T#10ms"), ("cycle2", "T#5ms")] {
            net.fb_instances.push(FbInstance {
                name: name.to_string(),
                type_name: "E_CYCLE".to_string(),
                parameters: vec![("DT".to_string(), dt.to_string())],
            });
        }
        // 100 Hz + 200 Hz = 300 Hz, over the 100 Hz default
        let report = StormPatternAnalyzer::new(&config).analyze(&app(vec![net]));
        assert_eq!(report.exit_code(), 10);
        assert!(!report.warnings.is_empty());
    }

    #[test]
    fn test_single_slow_timer_passes() {
        let config = AnalysisConfig::default();
        let mut net = network(&[]);
        net.fb_instances.push(FbInstance {
            name: "cycle1".to_string(),
            type_name: "E_CYCLE".to_string(),
            parameters: vec![("DT".to_string(), "T#1s".to_string())],
        });
        let report = StormPatternAnalyzer::new(&config).analyze(&app(vec![net]));
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_io_multiplication_warns() {
        let config = AnalysisConfig::default();
        // AI_Input fans out to a chain wider than the threshold
        let mut connections: Vec<(String, String)> = Vec::new();
        for i in 0..(config.patterns.io_multiplication_threshold + 1) {
            connections.push(("AI_Input.IND".to_string(), format!("proc{}.REQ", i)));
        }
        let refs: Vec<(&str, &str)> = connections
            .iter()
            .map(|(s, d)| (s.as_str(), d.as_str()))
            .collect();
        let report = StormPatternAnalyzer::new(&config).analyze(&app(vec![network(&refs)]));
        assert_eq!(report.exit_code(), 10);
        let patterns = report.details["detected_patterns"].as_array().unwrap();
        assert!(patterns
            .iter()
            .any(|p| p["pattern"] == "UNCONTROLLED_IO_MULTIPLICATION"));
    }

    #[test]
    fn test_fan_out_burst_is_informational() {
        let config = AnalysisConfig::default();
        let mut connections: Vec<(String, String)> = Vec::new();
        for i in 0..(config.patterns.fan_out_threshold + 1) {
            connections.push(("src.EO".to_string(), format!("sink{}.REQ", i)));
        }
        let refs: Vec<(&str, &str)> = connections
            .iter()
            .map(|(s, d)| (s.as_str(), d.as_str()))
            .collect();
        let report = StormPatternAnalyzer::new(&config).analyze(&app(vec![network(&refs)]));
        // INFO patterns appear in details without gating the exit code
        assert_eq!(report.exit_code(), 0);
        let patterns = report.details["detected_patterns"].as_array().unwrap();
        assert!(patterns.iter().any(|p| p["pattern"] == "FAN_OUT_BURST"));
    }

    #[test]
    fn test_clean_application() {
        let config = AnalysisConfig::default();
        let net = network(&[("a.EO", "b.REQ"), ("b.CNF", "c.REQ")]);
        let report = StormPatternAnalyzer::new(&config).analyze(&app(vec![net]));
        assert_eq!(report.exit_code(), 0);
        assert!(report.details["detected_patterns"].as_array().unwrap().is_empty());
    }
}
