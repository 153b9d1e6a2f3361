//! Two-queue discrete-time simulator
//!
//! Per tick:
//! 1. scenario arrivals join the I/O queue (drops counted at capacity)
//! 2. the service budget (tick length / per-event cost) drains the internal
//!    queue first — the runtime finishes cascades before accepting new I/O
//! 3. remaining budget drains the I/O queue; each serviced I/O event spawns
//!    `multiplication_factor - 1` internal events (fractional parts carry
//!    across ticks so long-run totals are exact)

use crate::config::QueueSimConfig;
use crate::features::queue_sim::domain::{Scenario, SimulationOutcome};

pub struct QueueSimulator<'a> {
    config: &'a QueueSimConfig,
}

impl<'a> QueueSimulator<'a> {
    pub fn new(config: &'a QueueSimConfig) -> Self {
        Self { config }
    }

    /// Run one scenario to completion
    ///
    /// `multiplication_factor` is the application's downstream event count
    /// per I/O event (>= 1); `event_cost_us` the mean service time.
    pub fn simulate(
        &self,
        scenario: Scenario,
        multiplication_factor: f64,
        event_cost_us: f64,
    ) -> SimulationOutcome {
        let cfg = self.config;
        let ticks = cfg.window_ms / cfg.tick_ms;
        let tick_us = cfg.tick_ms as f64 * 1000.0;
        let budget_per_tick = (tick_us / event_cost_us).floor() as u64;
        let spawn_per_io = (multiplication_factor - 1.0).max(0.0);

        let mut io_depth: usize = 0;
        let mut internal_depth: usize = 0;
        let mut arrival_carry = 0.0_f64;
        let mut spawn_carry = 0.0_f64;

        let mut outcome = SimulationOutcome {
            scenario,
            ticks,
            events_arrived: 0,
            events_processed: 0,
            peak_io_depth: 0,
            peak_internal_depth: 0,
            mean_internal_depth: 0.0,
            saturated_ticks: 0,
            dropped_events: 0,
        };
        let mut internal_depth_sum: u64 = 0;

        for tick in 0..ticks {
            // 1. Arrivals
            arrival_carry += scenario.rate_hz(tick, ticks, cfg.tick_ms) * cfg.tick_ms as f64 / 1000.0;
            let arrivals = arrival_carry.floor() as u64;
            arrival_carry -= arrivals as f64;
            outcome.events_arrived += arrivals;

            let io_room = cfg.capacity.saturating_sub(io_depth) as u64;
            if arrivals > io_room {
                outcome.dropped_events += arrivals - io_room;
            }
            io_depth += arrivals.min(io_room) as usize;

            outcome.peak_io_depth = outcome.peak_io_depth.max(io_depth);

            // 2. Service events one at a time, cascades before new I/O
            let mut budget = budget_per_tick;
            while budget > 0 {
                if internal_depth > 0 {
                    internal_depth -= 1;
                } else if io_depth > 0 {
                    io_depth -= 1;
                    // Fan-out: fractional spawn parts carry across events
                    spawn_carry += spawn_per_io;
                    let spawned = spawn_carry.floor() as u64;
                    spawn_carry -= spawned as f64;

                    let internal_room = cfg.capacity.saturating_sub(internal_depth) as u64;
                    if spawned > internal_room {
                        outcome.dropped_events += spawned - internal_room;
                    }
                    internal_depth += spawned.min(internal_room) as usize;
                    outcome.peak_internal_depth =
                        outcome.peak_internal_depth.max(internal_depth);
                } else {
                    break;
                }
                budget -= 1;
                outcome.events_processed += 1;
            }

            if budget == 0 && (io_depth > 0 || internal_depth > 0) {
                outcome.saturated_ticks += 1;
            }

            outcome.peak_internal_depth = outcome.peak_internal_depth.max(internal_depth);
            internal_depth_sum += internal_depth as u64;
        }

        if ticks > 0 {
            outcome.mean_internal_depth =
                (internal_depth_sum as f64 / ticks as f64 * 10.0).round() / 10.0;
        }
        outcome
    }
}
