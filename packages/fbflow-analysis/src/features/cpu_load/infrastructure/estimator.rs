//! ST cost heuristics and the load report
//!
//! The time model: 10us per complexity point, 1us per operator, 0.5us per
//! identifier reference. Crude, but it ranks algorithms consistently and
//! the aggregate tracks measured dPAC loads within the +/-50% band the
//! report discloses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::features::cpu_load::domain::{AlgorithmCost, LoadStatus, Platform};
use crate::features::parsing::ParsedApplication;
use crate::shared::models::{AnalysisReport, ExitStatus};

static DECISION_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(IF|ELSIF|CASE|FOR|WHILE|REPEAT)\b").expect("valid regex"));
static ARITHMETIC_OPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+\-*/]").expect("valid regex"));
static LOGICAL_OPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(AND|OR|XOR|NOT)\b").expect("valid regex"));
static COMPARISON_OPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[<>=]").expect("valid regex"));
static IDENTIFIERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("valid regex"));

/// Simplified cyclomatic complexity: 1 + decision keyword count
pub fn cyclomatic_complexity(st_code: &str) -> usize {
    1 + DECISION_KEYWORDS.find_iter(st_code).count()
}

/// Heuristic execution time in microseconds
fn estimate_execution_us(st_code: &str, complexity: usize, us_per_point: f64) -> f64 {
    let arithmetic = ARITHMETIC_OPS.find_iter(st_code).count();
    let logical = LOGICAL_OPS.find_iter(st_code).count();
    let comparisons = COMPARISON_OPS.find_iter(st_code).count();
    let identifiers = IDENTIFIERS.find_iter(st_code).count();

    let base = complexity as f64 * us_per_point;
    let operations = (arithmetic + logical + comparisons) as f64;
    let accesses = identifiers as f64 * 0.5;

    round1(base + operations + accesses)
}

/// Cost every ST algorithm in the application, in declaration order
pub fn estimate_costs(app: &ParsedApplication, config: &AnalysisConfig) -> Vec<AlgorithmCost> {
    let mut costs = Vec::new();
    for fb in &app.fb_types {
        for algo in &fb.algorithms {
            let complexity = cyclomatic_complexity(&algo.st_source);
            costs.push(AlgorithmCost {
                fb_name: fb.name.clone(),
                algorithm: algo.name.clone(),
                complexity,
                estimated_us: estimate_execution_us(
                    &algo.st_source,
                    complexity,
                    config.cpu_load.us_per_complexity_point,
                ),
                st_lines: algo.st_source.lines().count(),
            });
        }
    }
    costs
}

pub struct CpuLoadEstimator<'a> {
    config: &'a AnalysisConfig,
    platform: Platform,
}

impl<'a> CpuLoadEstimator<'a> {
    pub fn new(config: &'a AnalysisConfig, platform: Platform) -> Self {
        Self { config, platform }
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

        let costs = estimate_costs(app, self.config);
        if costs.is_empty() {
            let details = json!({
                "fb_execution_estimates": {},
                "resource_cpu_load": {},
                "overall_assessment": {
                    "status": LoadStatus::Safe.as_str(),
                    "note": "No ST algorithms to analyze",
                },
            });
            let mut warnings = app.parse_warnings.clone();
            warnings.push("No ST algorithms found in application".to_string());
            return AnalysisReport::safe(details).with_warning_messages(warnings);
        }

        tracing::info!("estimating load for {} ST algorithms", costs.len());

        let cpu = &self.config.cpu_load;
        let factor = self.platform.factor();

        let mut estimates = BTreeMap::new();
        let mut adjusted: Vec<(String, f64)> = Vec::new();
        for cost in &costs {
            let platform_us = round1(cost.estimated_us * factor);
            adjusted.push((cost.key(), platform_us));
            estimates.insert(
                cost.key(),
                json!({
                    "complexity": cost.complexity,
                    "estimated_us": cost.estimated_us,
                    "platform_adjusted_us": platform_us,
                    "platform": self.platform.as_str(),
                }),
            );
        }

        // Aggregate load assuming every algorithm fires at the configured
        // event frequency
        let total_us_per_s: f64 = adjusted
            .iter()
            .map(|(_, us)| us * cpu.assumed_frequency_hz)
            .sum();
        let load_pct = round1(total_us_per_s / 1_000_000.0 * 100.0);

        let status = if load_pct >= cpu.critical_pct {
            LoadStatus::Critical
        } else if load_pct >= cpu.warning_pct {
            LoadStatus::Warning
        } else {
            LoadStatus::Safe
        };

        let mut bottlenecks = adjusted.clone();
        bottlenecks.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
        let bottleneck_fbs: Vec<&String> = bottlenecks
            .iter()
            .take(cpu.bottleneck_count)
            .map(|(key, _)| key)
            .collect();

        let details = json!({
            "fb_execution_estimates": estimates,
            "resource_cpu_load": {
                "Resource_Default": {
                    "total_load_pct": load_pct,
                    "headroom_pct": round1(100.0 - load_pct),
                    "bottleneck_fbs": bottleneck_fbs,
                },
            },
            "overall_assessment": {
                "highest_load_resource": "Resource_Default",
                "load_pct": load_pct,
                "status": status.as_str(),
                "recommendation": status.recommendation(),
            },
            "uncertainty_note": "Execution time estimates are heuristic and may vary +/-50% due to compiler optimizations, cache effects, and OS scheduling.",
            "assumptions": {
                "event_frequency_hz": cpu.assumed_frequency_hz,
                "note": "Actual frequency depends on event sources; run the event-flow analysis for propagation rates.",
            },
        });

        let floor = match status {
            LoadStatus::Critical => ExitStatus::Critical,
            LoadStatus::Warning => ExitStatus::Moderate,
            LoadStatus::Safe => ExitStatus::Safe,
        };

        AnalysisReport::from_findings_with_floor(Vec::new(), details, floor)
            .with_warning_messages(app.parse_warnings.clone())
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
