//! Queue simulation report assembly

use serde_json::json;
use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::features::cpu_load::estimate_costs;
use crate::features::event_flow::{compute_factors, EventGraph};
use crate::features::parsing::ParsedApplication;
use crate::features::queue_sim::domain::Scenario;
use crate::features::queue_sim::infrastructure::QueueSimulator;
use crate::shared::models::{AnalysisReport, ExitStatus};

pub struct QueueSimAnalyzer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> QueueSimAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Simulate `scenario`, or all scenarios when `None`
    ///
    /// The multiplication factor and mean event cost come from the parsed
    /// application itself (worst-case cascade fan-out, mean ST algorithm
    /// cost); applications without ST fall back to the configured default
    /// cost.
    pub fn analyze(&self, app: &ParsedApplication, scenario: Option<Scenario>) -> AnalysisReport {
        if app.files_scanned == 0 {
            return AnalysisReport::failure(vec![
                "No artifact files found in application directory".to_string(),
            ]);
        }
        if app.nothing_parsed() {
            return AnalysisReport::failure(vec!["Failed to parse any artifact files".to_string()]);
        }

        let graph = EventGraph::build(&app.fb_types);
        let (factors, _) = compute_factors(&graph);
        let multiplication_factor = factors
            .values()
            .fold(1.0_f64, |worst, &factor| worst.max(factor));

        let costs = estimate_costs(app, self.config);
        let event_cost_us = if costs.is_empty() {
            self.config.queue_sim.default_event_cost_us
        } else {
            let total: f64 = costs.iter().map(|c| c.estimated_us).sum();
            round1(total / costs.len() as f64)
        };

        let scenarios: Vec<Scenario> = match scenario {
            Some(one) => vec![one],
            None => Scenario::ALL.to_vec(),
        };

        tracing::info!(
            multiplication_factor,
            event_cost_us,
            "simulating {} scenario(s)",
            scenarios.len()
        );

        let simulator = QueueSimulator::new(&self.config.queue_sim);
        let mut worst = ExitStatus::Safe;
        let mut scenario_details = BTreeMap::new();
        for scenario in scenarios {
            let outcome = simulator.simulate(scenario, multiplication_factor, event_cost_us);
            let status = self.classify(&outcome);
            worst = worst.worst(status);
            scenario_details.insert(
                scenario.as_str(),
                json!({
                    "events_arrived": outcome.events_arrived,
                    "events_processed": outcome.events_processed,
                    "peak_io_depth": outcome.peak_io_depth,
                    "peak_internal_depth": outcome.peak_internal_depth,
                    "mean_internal_depth": outcome.mean_internal_depth,
                    "saturated_ticks": outcome.saturated_ticks,
                    "dropped_events": outcome.dropped_events,
                    "verdict": verdict(status),
                }),
            );
        }

        let details = json!({
            "scenarios": scenario_details,
            "assumptions": {
                "multiplication_factor": multiplication_factor,
                "event_cost_us": event_cost_us,
                "window_ms": self.config.queue_sim.window_ms,
                "tick_ms": self.config.queue_sim.tick_ms,
                "queue_capacity": self.config.queue_sim.capacity,
            },
        });

        AnalysisReport::from_findings_with_floor(Vec::new(), details, worst)
            .with_warning_messages(app.parse_warnings.clone())
    }

    fn classify(&self, outcome: &crate::features::queue_sim::SimulationOutcome) -> ExitStatus {
        if outcome.overflowed() {
            ExitStatus::Critical
        } else if outcome.peak_depth() > self.config.queue_sim.capacity / 2 {
            ExitStatus::Moderate
        } else {
            ExitStatus::Safe
        }
    }
}

fn verdict(status: ExitStatus) -> &'static str {
    match status {
        ExitStatus::Critical => "OVERFLOW",
        ExitStatus::Moderate => "DEEP_QUEUE",
        _ => "OK",
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
