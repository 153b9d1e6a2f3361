/*
 * fbflow - IEC 61499 application analysis CLI
 *
 * Usage:
 *   fbflow events --app-dir ./MyApp --dot cascade.dot
 *   fbflow load --app-dir ./MyApp --platform hard-dpac-m251
 *   fbflow queues --app-dir ./MyApp --scenario burst
 *   fbflow names --app-dir ./MyApp --strict
 *   fbflow report --app-dir ./MyApp --json --output report.json
 *
 * Default output is a text summary; --json (or --ci, or --output) switches
 * to the full JSON report. Exit codes: 0 safe, 1 parse failure, 10 moderate
 * findings, 11 blocking findings.
 */

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fbflow_analysis::config::AnalysisConfig;
use fbflow_analysis::errors::FbflowError;
use fbflow_analysis::features::cpu_load::{CpuLoadEstimator, Platform};
use fbflow_analysis::features::event_flow::EventFlowAnalyzer;
use fbflow_analysis::features::naming::{NamingOptions, NamingValidator};
use fbflow_analysis::features::network_check::NetworkChecker;
use fbflow_analysis::features::parsing::parse_application;
use fbflow_analysis::features::queue_sim::{QueueSimAnalyzer, Scenario};
use fbflow_analysis::features::storm_patterns::StormPatternAnalyzer;
use fbflow_analysis::pipeline::AnalysisPipeline;
use fbflow_analysis::shared::models::{AnalysisReport, ArtifactKind, Severity};

#[derive(Parser)]
#[command(name = "fbflow", version, about = "Static analysis for IEC 61499 applications")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Threshold configuration overlay (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Emit the full JSON report on stdout (default prints a text summary)
    #[arg(long, global = true)]
    json: bool,

    /// CI mode: JSON output, no stderr summary
    #[arg(long, global = true)]
    ci: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Event cascade multiplication analysis
    Events {
        #[arg(long)]
        app_dir: PathBuf,
        /// Also write a Graphviz DOT rendering of the event graph
        #[arg(long)]
        dot: Option<PathBuf>,
    },
    /// Heuristic CPU load estimation
    Load {
        #[arg(long)]
        app_dir: PathBuf,
        /// Target platform (soft-dpac-windows, soft-dpac-linux,
        /// hard-dpac-m262, hard-dpac-m251, unknown)
        #[arg(long, default_value = "unknown")]
        platform: String,
    },
    /// Event queue depth simulation
    Queues {
        #[arg(long)]
        app_dir: PathBuf,
        /// Run one scenario (steady, burst, ramp) instead of all
        #[arg(long)]
        scenario: Option<String>,
    },
    /// Event storm anti-pattern detection
    Patterns {
        #[arg(long)]
        app_dir: PathBuf,
    },
    /// Naming convention validation
    Names {
        #[arg(long)]
        app_dir: PathBuf,
        /// Promote every finding to ERROR
        #[arg(long)]
        strict: bool,
        /// Drop findings below this severity (INFO, WARNING, ERROR, CRITICAL)
        #[arg(long)]
        min_severity: Option<String>,
        /// Only check artifacts of this kind (CAT, BasicFB, Adapter, ...)
        #[arg(long)]
        artifact_type: Option<String>,
    },
    /// FBNetwork connection checking
    Network {
        #[arg(long)]
        app_dir: PathBuf,
    },
    /// All passes plus a composite quality score
    Report {
        #[arg(long)]
        app_dir: PathBuf,
        #[arg(long, default_value = "unknown")]
        platform: String,
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => AnalysisReport::failure(vec![e.to_string()]),
    };

    if let Some(path) = &cli.output {
        if let Err(e) = std::fs::write(path, report.to_json()) {
            eprintln!("failed to write {}: {}", path.display(), e);
            std::process::exit(1);
        }
    } else if cli.json || cli.ci {
        println!("{}", report.to_json());
    } else {
        println!("{}", render_text(&report));
    }
    if !cli.ci {
        summarize(&report);
    }

    std::process::exit(report.exit_code());
}

fn run(cli: &Cli) -> fbflow_analysis::Result<AnalysisReport> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    match &cli.command {
        Command::Events { app_dir, dot } => {
            let app = parse_application(app_dir)?;
            let analyzer = EventFlowAnalyzer::new(&config);
            let report = analyzer.analyze(&app);
            if let Some(path) = dot {
                match analyzer.dot(&app) {
                    Some(graph) => {
                        std::fs::write(path, graph)?;
                        eprintln!("event graph written to {}", path.display());
                    }
                    None => eprintln!("no event connections to render"),
                }
            }
            Ok(report)
        }
        Command::Load { app_dir, platform } => {
            let platform = parse_platform(platform)?;
            let app = parse_application(app_dir)?;
            Ok(CpuLoadEstimator::new(&config, platform).analyze(&app))
        }
        Command::Queues { app_dir, scenario } => {
            let scenario = scenario
                .as_deref()
                .map(parse_scenario)
                .transpose()?;
            let app = parse_application(app_dir)?;
            Ok(QueueSimAnalyzer::new(&config).analyze(&app, scenario))
        }
        Command::Patterns { app_dir } => {
            let app = parse_application(app_dir)?;
            Ok(StormPatternAnalyzer::new(&config).analyze(&app))
        }
        Command::Names {
            app_dir,
            strict,
            min_severity,
            artifact_type,
        } => {
            let options = NamingOptions {
                min_severity: min_severity.as_deref().map(parse_severity).transpose()?,
                artifact_filter: artifact_type.as_deref().map(parse_artifact_kind).transpose()?,
                strict: *strict,
            };
            let app = parse_application(app_dir)?;
            Ok(NamingValidator::new(options).analyze(&app))
        }
        Command::Network { app_dir } => {
            let app = parse_application(app_dir)?;
            Ok(NetworkChecker::new(&app).analyze())
        }
        Command::Report {
            app_dir,
            platform,
            strict,
        } => {
            let platform = parse_platform(platform)?;
            let app = parse_application(app_dir)?;
            let options = NamingOptions {
                strict: *strict,
                ..Default::default()
            };
            Ok(AnalysisPipeline::new(&config, platform)
                .with_naming_options(options)
                .run(&app))
        }
    }
}

fn parse_platform(value: &str) -> fbflow_analysis::Result<Platform> {
    value.parse().map_err(FbflowError::config)
}

fn parse_scenario(value: &str) -> fbflow_analysis::Result<Scenario> {
    value.parse().map_err(FbflowError::config)
}

fn parse_severity(value: &str) -> fbflow_analysis::Result<Severity> {
    match value.to_ascii_uppercase().as_str() {
        "INFO" => Ok(Severity::Info),
        "WARNING" => Ok(Severity::Warning),
        "ERROR" => Ok(Severity::Error),
        "CRITICAL" => Ok(Severity::Critical),
        other => Err(FbflowError::config(format!(
            "unknown severity '{}' (expected INFO, WARNING, ERROR or CRITICAL)",
            other
        ))),
    }
}

fn parse_artifact_kind(value: &str) -> fbflow_analysis::Result<ArtifactKind> {
    value.parse().map_err(FbflowError::config)
}

/// Human-readable rendering for interactive use
fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let verdict = match report.exit_code() {
        0 => "SAFE",
        1 => "PARSE FAILURE",
        10 => "MODERATE RISK",
        _ => "HIGH RISK",
    };
    out.push_str(&format!("verdict: {}\n", verdict));

    for (label, entries) in [("error", &report.errors), ("warning", &report.warnings)] {
        for entry in entries {
            match entry {
                serde_json::Value::String(message) => {
                    out.push_str(&format!("  {}: {}\n", label, message));
                }
                finding => {
                    let artifact = finding["artifact"].as_str().unwrap_or("?");
                    let description = finding["description"].as_str().unwrap_or("?");
                    out.push_str(&format!("  {}: {}: {}\n", label, artifact, description));
                    if let Some(suggestion) = finding["suggestion"].as_str() {
                        out.push_str(&format!("    suggestion: {}\n", suggestion));
                    }
                }
            }
        }
    }
    if report.errors.is_empty() && report.warnings.is_empty() {
        out.push_str("  no findings\n");
    }
    out.push_str("(run with --json for the full report)");
    out
}

/// One-line verdict on stderr so CI logs stay readable next to the JSON
fn summarize(report: &AnalysisReport) {
    let verdict = match report.exit_code() {
        0 => "SAFE",
        1 => "PARSE FAILURE",
        10 => "MODERATE RISK",
        _ => "HIGH RISK",
    };
    eprintln!(
        "{} ({} error(s), {} warning(s))",
        verdict,
        report.errors.len(),
        report.warnings.len()
    );
}
