//! End-to-end pass tests over on-disk application fixtures

use std::path::Path;

use fbflow_analysis::config::AnalysisConfig;
use fbflow_analysis::features::cpu_load::{CpuLoadEstimator, Platform};
use fbflow_analysis::features::event_flow::EventFlowAnalyzer;
use fbflow_analysis::features::naming::{NamingOptions, NamingValidator};
use fbflow_analysis::features::network_check::NetworkChecker;
use fbflow_analysis::features::parsing::parse_application;
use fbflow_analysis::features::queue_sim::QueueSimAnalyzer;
use fbflow_analysis::features::storm_patterns::StormPatternAnalyzer;

const SCALE_LOGIC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<FBType Name="scaleLogic">
  <InterfaceList>
    <EventInputs>
      <Event Name="INIT"/>
      <Event Name="REQ"/>
    </EventInputs>
    <EventOutputs>
      <Event Name="INITO"/>
      <Event Name="CNF"/>
    </EventOutputs>
    <InputVars>
      <VarDeclaration Name="RawValue" Type="INT"/>
    </InputVars>
    <OutputVars>
      <VarDeclaration Name="ScaledValue" Type="REAL"/>
    </OutputVars>
  </InterfaceList>
  <BasicFB>
    <ECC><ECState Name="START"/></ECC>
    <Algorithm Name="scale">
      <ST><![CDATA[IF RawValue > 0 THEN ScaledValue := RawValue * 0.1; END_IF;]]></ST>
    </Algorithm>
  </BasicFB>
</FBType>"#;

fn chain_cat(name: &str, connections: &[(&str, &str)]) -> String {
    let mut instances = String::new();
    let mut seen = Vec::new();
    for (source, destination) in connections {
        for endpoint in [source, destination] {
            if let Some((inst, _)) = endpoint.split_once('.') {
                if !seen.contains(&inst) {
                    seen.push(inst);
                    instances.push_str(&format!(
                        "    <FB Name=\"{}\" Type=\"scaleLogic\"/>\n",
                        inst
                    ));
                }
            }
        }
    }
    let mut wires = String::new();
    for (source, destination) in connections {
        wires.push_str(&format!(
            "      <Connection Source=\"{}\" Destination=\"{}\"/>\n",
            source, destination
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<CompositeFBType Name="{}">
  <InterfaceList/>
  <FBNetwork>
{}    <EventConnections>
{}    </EventConnections>
  </FBNetwork>
</CompositeFBType>"#,
        name, instances, wires
    )
}

fn write_app(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        std::fs::write(dir.join(name), content).unwrap();
    }
}

#[test]
fn chain_multiplication_is_linear() {
    let dir = tempfile::tempdir().unwrap();
    let cat = chain_cat(
        "Chain",
        &[("s.CNF", "a.REQ"), ("a.CNF", "b.REQ"), ("b.CNF", "c.REQ")],
    );
    write_app(dir.path(), &[("Chain.cat", &cat), ("scaleLogic.fbt", SCALE_LOGIC)]);

    let app = parse_application(dir.path()).unwrap();
    let config = AnalysisConfig::default();
    let report = EventFlowAnalyzer::new(&config).analyze(&app);
    assert_eq!(report.exit_code(), 0);
    // One event entering at s becomes 4 along the 3-edge chain
    assert_eq!(report.details["multiplication_factors"]["s"], 4.0);
}

#[test]
fn tight_loop_exits_critical() {
    let dir = tempfile::tempdir().unwrap();
    let cat = chain_cat("Loop", &[("a.CNF", "b.REQ"), ("b.CNF", "a.REQ")]);
    write_app(dir.path(), &[("Loop.cat", &cat), ("scaleLogic.fbt", SCALE_LOGIC)]);

    let app = parse_application(dir.path()).unwrap();
    let config = AnalysisConfig::default();

    let events = EventFlowAnalyzer::new(&config).analyze(&app);
    assert_eq!(events.exit_code(), 11);

    let patterns = StormPatternAnalyzer::new(&config).analyze(&app);
    assert_eq!(patterns.exit_code(), 11);
    let detected = patterns.details["detected_patterns"].as_array().unwrap();
    assert!(detected.iter().any(|p| p["pattern"] == "TIGHT_EVENT_LOOP"));
}

#[test]
fn empty_directory_is_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let app = parse_application(dir.path()).unwrap();
    let config = AnalysisConfig::default();
    let report = EventFlowAnalyzer::new(&config).analyze(&app);
    assert_eq!(report.exit_code(), 1);
    assert!(!report.success);
}

#[test]
fn malformed_xml_only_is_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_app(dir.path(), &[("broken.fbt", "<FBType Name='x'")]);
    let app = parse_application(dir.path()).unwrap();
    assert!(app.nothing_parsed());
    let config = AnalysisConfig::default();
    let report = QueueSimAnalyzer::new(&config).analyze(&app, None);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn cpu_load_reports_algorithm_estimates() {
    let dir = tempfile::tempdir().unwrap();
    write_app(dir.path(), &[("scaleLogic.fbt", SCALE_LOGIC)]);
    let app = parse_application(dir.path()).unwrap();
    let config = AnalysisConfig::default();
    let report = CpuLoadEstimator::new(&config, Platform::SoftDpacLinux).analyze(&app);
    assert_eq!(report.exit_code(), 0);
    let estimate = &report.details["fb_execution_estimates"]["scaleLogic.scale"];
    assert_eq!(estimate["complexity"], 2);
    assert!(estimate["platform_adjusted_us"].as_f64().unwrap() > 0.0);
}

#[test]
fn naming_flags_bad_cat_with_suggestion() {
    let dir = tempfile::tempdir().unwrap();
    let cat = chain_cat("analogInput", &[("a.CNF", "b.REQ")]);
    write_app(dir.path(), &[("analogInput.cat", &cat), ("scaleLogic.fbt", SCALE_LOGIC)]);

    let app = parse_application(dir.path()).unwrap();
    let report = NamingValidator::new(NamingOptions::default()).analyze(&app);
    assert_eq!(report.exit_code(), 11);
    let violations = report.details["violations"].as_array().unwrap();
    let cat_violation = violations
        .iter()
        .find(|v| v["artifact"] == "analogInput")
        .unwrap();
    assert_eq!(cat_violation["suggestion"], "AnalogInput");
}

#[test]
fn naming_accepts_conformant_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let cat = chain_cat("AnalogInput", &[]);
    write_app(dir.path(), &[("AnalogInput.cat", &cat), ("scaleLogic.fbt", SCALE_LOGIC)]);

    let app = parse_application(dir.path()).unwrap();
    let report = NamingValidator::new(NamingOptions::default()).analyze(&app);
    assert_eq!(report.exit_code(), 0, "errors: {:?}", report.errors);
}

#[test]
fn network_check_finds_dangling_reference() {
    let dir = tempfile::tempdir().unwrap();
    // ghost.CNF never declared as an instance
    let cat = r#"<?xml version="1.0" encoding="utf-8"?>
<CompositeFBType Name="Broken">
  <InterfaceList/>
  <FBNetwork>
    <FB Name="a" Type="scaleLogic"/>
    <EventConnections>
      <Connection Source="ghost.CNF" Destination="a.REQ"/>
    </EventConnections>
  </FBNetwork>
</CompositeFBType>"#;
    write_app(dir.path(), &[("Broken.cat", cat), ("scaleLogic.fbt", SCALE_LOGIC)]);

    let app = parse_application(dir.path()).unwrap();
    let report = NetworkChecker::new(&app).analyze();
    assert_eq!(report.exit_code(), 11);
    let issues = report.details["issues"].as_array().unwrap();
    assert!(issues.iter().any(|i| i["rule"] == "DANGLING_REFERENCE"));
}

#[test]
fn queue_sim_covers_all_scenarios() {
    let dir = tempfile::tempdir().unwrap();
    let cat = chain_cat("Chain", &[("a.CNF", "b.REQ")]);
    write_app(dir.path(), &[("Chain.cat", &cat), ("scaleLogic.fbt", SCALE_LOGIC)]);

    let app = parse_application(dir.path()).unwrap();
    let config = AnalysisConfig::default();
    let report = QueueSimAnalyzer::new(&config).analyze(&app, None);
    assert_eq!(report.exit_code(), 0);
    let scenarios = report.details["scenarios"].as_object().unwrap();
    assert_eq!(scenarios.len(), 3);
    for name in ["steady", "burst", "ramp"] {
        assert_eq!(scenarios[name]["verdict"], "OK");
    }
}
