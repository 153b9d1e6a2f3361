//! Domain models for queue simulation

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named arrival scenario
///
/// Rates are fixed per scenario so two runs over the same application are
/// byte-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Constant 50 Hz I/O arrival rate
    Steady,
    /// 10 Hz baseline with a 500 Hz burst for 100 ms out of every second
    Burst,
    /// Linear ramp from 0 Hz to 200 Hz across the window
    Ramp,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Steady, Scenario::Burst, Scenario::Ramp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::Burst => "burst",
            Self::Ramp => "ramp",
        }
    }

    /// Arrival rate in Hz at tick `tick` of `total_ticks`, given the tick
    /// length in milliseconds
    pub fn rate_hz(&self, tick: u64, total_ticks: u64, tick_ms: u64) -> f64 {
        match self {
            Self::Steady => 50.0,
            Self::Burst => {
                let ms_into_second = (tick * tick_ms) % 1000;
                if ms_into_second < 100 {
                    500.0
                } else {
                    10.0
                }
            }
            Self::Ramp => {
                if total_ticks <= 1 {
                    return 0.0;
                }
                200.0 * tick as f64 / (total_ticks - 1) as f64
            }
        }
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steady" => Ok(Self::Steady),
            "burst" => Ok(Self::Burst),
            "ramp" => Ok(Self::Ramp),
            other => Err(format!(
                "unknown scenario '{}' (expected steady, burst or ramp)",
                other
            )),
        }
    }
}

/// Result of one simulated window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub scenario: Scenario,
    pub ticks: u64,
    pub events_arrived: u64,
    pub events_processed: u64,
    pub peak_io_depth: usize,
    pub peak_internal_depth: usize,
    pub mean_internal_depth: f64,
    /// Ticks where the service budget ran out with events still queued
    pub saturated_ticks: u64,
    /// Events dropped because a queue hit capacity
    pub dropped_events: u64,
}

impl SimulationOutcome {
    /// Worst depth across both queues
    pub fn peak_depth(&self) -> usize {
        self.peak_io_depth.max(self.peak_internal_depth)
    }

    pub fn overflowed(&self) -> bool {
        self.dropped_events > 0
    }
}
