//! Quality scoring over the combined pass results
//!
//! Weighted dimensions: naming compliance 30, event health 30, CPU headroom
//! 20, network integrity 20. Letter grades at the usual 90/80/70/60 cuts.

use serde_json::{json, Value};

use crate::shared::models::{AnalysisReport, ExitStatus};

pub const NAMING_WEIGHT: f64 = 30.0;
pub const EVENT_WEIGHT: f64 = 30.0;
pub const CPU_WEIGHT: f64 = 20.0;
pub const NETWORK_WEIGHT: f64 = 20.0;

/// Composite 0-100 quality score with its dimension breakdown
pub fn score(
    naming: &AnalysisReport,
    event_flow: &AnalysisReport,
    cpu_load: &AnalysisReport,
    network: &AnalysisReport,
) -> Value {
    let naming_pts = naming_points(naming);
    let event_pts = status_points(event_flow, EVENT_WEIGHT);
    let cpu_pts = cpu_points(cpu_load);
    let network_pts = network_points(network);

    let total = round1(naming_pts + event_pts + cpu_pts + network_pts);
    json!({
        "score": total,
        "grade": grade(total),
        "dimensions": {
            "naming_compliance": { "points": round1(naming_pts), "max": NAMING_WEIGHT },
            "event_health": { "points": round1(event_pts), "max": EVENT_WEIGHT },
            "cpu_headroom": { "points": round1(cpu_pts), "max": CPU_WEIGHT },
            "network_integrity": { "points": round1(network_pts), "max": NETWORK_WEIGHT },
        },
    })
}

pub fn grade(score: f64) -> &'static str {
    if score >= 90.0 {
        "A"
    } else if score >= 80.0 {
        "B"
    } else if score >= 70.0 {
        "C"
    } else if score >= 60.0 {
        "D"
    } else {
        "F"
    }
}

fn naming_points(report: &AnalysisReport) -> f64 {
    report.details["summary"]["compliance_pct"]
        .as_f64()
        .map(|pct| pct / 100.0 * NAMING_WEIGHT)
        .unwrap_or(0.0)
}

/// Dimensions without a percentage metric scale on the pass verdict
fn status_points(report: &AnalysisReport, weight: f64) -> f64 {
    match report.status() {
        ExitStatus::Safe => weight,
        ExitStatus::Moderate => weight / 2.0,
        ExitStatus::Critical | ExitStatus::ParseFailure => 0.0,
    }
}

fn cpu_points(report: &AnalysisReport) -> f64 {
    report.details["resource_cpu_load"]["Resource_Default"]["headroom_pct"]
        .as_f64()
        .map(|headroom| headroom.clamp(0.0, 100.0) / 100.0 * CPU_WEIGHT)
        .unwrap_or_else(|| status_points(report, CPU_WEIGHT))
}

fn network_points(report: &AnalysisReport) -> f64 {
    let penalty = report.errors.len() as f64 * 5.0 + report.warnings.len() as f64 * 2.0;
    (NETWORK_WEIGHT - penalty).max(0.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
