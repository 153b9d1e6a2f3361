//! Analysis configuration
//!
//! Every threshold used by the analysis passes lives here. The defaults come
//! from the SE application design guideline tables (10x/20x/50x multiplication
//! bands, 2-hop loop depth, 70/90% CPU bands, 10 s / 10 ms simulation window)
//! but are empirically asserted rather than derived, so all of them are
//! configurable via `--config <file.json>`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{FbflowError, Result};

/// Event cascade thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFlowConfig {
    /// Multiplication factor above which a source is moderate risk (exit 10)
    pub caution_factor: f64,
    /// Factor at or above which a source is high risk (exit 11)
    pub high_factor: f64,
    /// Factor above which an explosive pattern is CRITICAL
    pub critical_factor: f64,
    /// Maximum hop depth for tight-loop detection
    pub cycle_depth: usize,
    /// Cap on cascade paths embedded in the report
    pub cascade_path_cap: usize,
}

impl Default for EventFlowConfig {
    fn default() -> Self {
        Self {
            caution_factor: 10.0,
            high_factor: 20.0,
            critical_factor: 50.0,
            cycle_depth: 2,
            cascade_path_cap: 50,
        }
    }
}

/// CPU load estimation thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuLoadConfig {
    /// Load percentage at which the assessment becomes WARNING
    pub warning_pct: f64,
    /// Load percentage at which the assessment becomes CRITICAL
    pub critical_pct: f64,
    /// Assumed event frequency per algorithm when no rate data exists
    pub assumed_frequency_hz: f64,
    /// Heuristic cost per cyclomatic complexity point, in microseconds
    pub us_per_complexity_point: f64,
    /// Number of bottleneck FBs listed per resource
    pub bottleneck_count: usize,
}

impl Default for CpuLoadConfig {
    fn default() -> Self {
        Self {
            warning_pct: 70.0,
            critical_pct: 90.0,
            assumed_frequency_hz: 10.0,
            us_per_complexity_point: 10.0,
            bottleneck_count: 5,
        }
    }
}

/// Queue simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueSimConfig {
    /// Simulated wall-clock window in milliseconds
    pub window_ms: u64,
    /// Tick resolution in milliseconds
    pub tick_ms: u64,
    /// Queue capacity; events beyond this are dropped and counted
    pub capacity: usize,
    /// Mean service cost per event in microseconds, used when no CPU
    /// estimate is available
    pub default_event_cost_us: f64,
}

impl Default for QueueSimConfig {
    fn default() -> Self {
        Self {
            window_ms: 10_000,
            tick_ms: 10,
            capacity: 1000,
            default_event_cost_us: 50.0,
        }
    }
}

/// Anti-pattern rule thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Downstream event count above which an I/O source is flagged
    pub io_multiplication_threshold: usize,
    /// Aggregate E_CYCLE frequency (Hz) above which timers are flagged
    pub timer_hz_threshold: f64,
    /// Destinations per single event output above which fan-out is noted
    pub fan_out_threshold: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            io_multiplication_threshold: 30,
            timer_hz_threshold: 100.0,
            fan_out_threshold: 8,
        }
    }
}

/// Top-level analysis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub event_flow: EventFlowConfig,
    pub cpu_load: CpuLoadConfig,
    pub queue_sim: QueueSimConfig,
    pub patterns: PatternConfig,
}

impl AnalysisConfig {
    /// Load and validate a configuration overlay from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&raw)
            .map_err(|e| FbflowError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Range checks across all sections
    pub fn validate(&self) -> Result<()> {
        if self.event_flow.caution_factor <= 0.0
            || self.event_flow.high_factor < self.event_flow.caution_factor
            || self.event_flow.critical_factor < self.event_flow.high_factor
        {
            return Err(FbflowError::config(
                "event_flow factors must satisfy 0 < caution <= high <= critical",
            ));
        }
        if self.event_flow.cycle_depth == 0 {
            return Err(FbflowError::config("event_flow.cycle_depth must be >= 1"));
        }
        if self.cpu_load.warning_pct <= 0.0 || self.cpu_load.critical_pct < self.cpu_load.warning_pct {
            return Err(FbflowError::config(
                "cpu_load percentages must satisfy 0 < warning <= critical",
            ));
        }
        if self.queue_sim.tick_ms == 0 || self.queue_sim.window_ms < self.queue_sim.tick_ms {
            return Err(FbflowError::config(
                "queue_sim requires tick_ms >= 1 and window_ms >= tick_ms",
            ));
        }
        if self.queue_sim.capacity == 0 {
            return Err(FbflowError::config("queue_sim.capacity must be >= 1"));
        }
        if self.queue_sim.default_event_cost_us <= 0.0 {
            return Err(FbflowError::config(
                "queue_sim.default_event_cost_us must be positive",
            ));
        }
        Ok(())
    }
}
