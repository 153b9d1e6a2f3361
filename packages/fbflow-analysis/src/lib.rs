/*
 * fbflow-analysis - IEC 61499 Application Static Analysis
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (artifacts, findings, reports)
 * - features/    : Vertical slices (parsing → event_flow / cpu_load /
 *                  queue_sim / storm_patterns / naming / network_check)
 * - pipeline/    : Orchestration and quality scoring
 * - config/      : Threshold configuration
 *
 * Every pass reads one immutable ParsedApplication and emits an
 * AnalysisReport with the fixed { success, errors, warnings, details } key
 * set and the shared 0/1/10/11 exit-code contract.
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Checker helpers thread several accumulators
#![allow(clippy::module_inception)] // domain/ and infrastructure/ per feature
#![allow(clippy::new_without_default)] // Analyzers are built from config refs

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;
pub mod shared;

pub use config::AnalysisConfig;
pub use errors::{FbflowError, Result};
pub use features::parsing::{parse_application, ParsedApplication};
pub use pipeline::AnalysisPipeline;
pub use shared::models::{AnalysisReport, ExitStatus, Finding, Severity};
