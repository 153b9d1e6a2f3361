//! Network structural checks

use serde_json::json;
use std::collections::BTreeMap;

use crate::features::network_check::domain::{compatibility, Endpoint, TypeCompat};
use crate::features::parsing::ParsedApplication;
use crate::shared::models::{AnalysisReport, FbType, Finding, Severity, VarDeclaration};

pub struct NetworkChecker<'a> {
    app: &'a ParsedApplication,
}

impl<'a> NetworkChecker<'a> {
    pub fn new(app: &'a ParsedApplication) -> Self {
        Self { app }
    }

    pub fn analyze(&self) -> AnalysisReport {
        let app = self.app;
        if app.files_scanned == 0 {
            return AnalysisReport::failure(vec![
                "No artifact files found in application directory".to_string(),
            ]);
        }
        if app.nothing_parsed() {
            return AnalysisReport::failure(vec!["Failed to parse any artifact files".to_string()]);
        }

        let mut findings = Vec::new();
        let mut event_checked = 0_usize;
        let mut data_checked = 0_usize;

        for fb in app.fb_types.iter().filter(|fb| fb.has_network()) {
            self.check_network(fb, &mut findings, &mut event_checked, &mut data_checked);
        }

        tracing::info!(
            "checked {} event and {} data connection(s)",
            event_checked,
            data_checked
        );

        let details = json!({
            "event_connections_checked": event_checked,
            "data_connections_checked": data_checked,
            "issues": findings,
        });

        AnalysisReport::from_findings(findings.clone(), details)
            .with_warning_messages(app.parse_warnings.clone())
    }

    fn check_network(
        &self,
        fb: &FbType,
        findings: &mut Vec<Finding>,
        event_checked: &mut usize,
        data_checked: &mut usize,
    ) {
        let file = fb.file_path.display().to_string();

        for conn in &fb.event_connections {
            *event_checked += 1;
            self.check_event_endpoint(fb, &conn.source, &file, findings);
            self.check_event_endpoint(fb, &conn.destination, &file, findings);
        }

        for conn in &fb.data_connections {
            *data_checked += 1;
            let source_type = self.resolve_var(fb, &conn.source, &file, findings);
            let dest_type = self.resolve_var(fb, &conn.destination, &file, findings);
            if let (Some(source_type), Some(dest_type)) = (source_type, dest_type) {
                self.check_data_types(fb, conn, &source_type, &dest_type, &file, findings);
            }
        }

        self.check_duplicate_event_targets(fb, &file, findings);
        self.check_init_chains(fb, &file, findings);
    }

    fn check_event_endpoint(
        &self,
        fb: &FbType,
        reference: &str,
        file: &str,
        findings: &mut Vec<Finding>,
    ) {
        match Endpoint::parse(reference) {
            Endpoint::Interface { port } => {
                if fb.declares_event(port) {
                    return;
                }
                if interface_var(fb, port).is_some() {
                    findings.push(mix_error(fb, reference, file));
                } else {
                    findings.push(dangling(fb, reference, "own interface", file));
                }
            }
            Endpoint::Instance { instance, port } => {
                let Some(inst) = fb.instance(instance) else {
                    findings.push(dangling(fb, reference, "declared instances", file));
                    return;
                };
                // Unparsed library types cannot be port-checked
                let Some(inst_type) = self.app.fb_type(&inst.type_name) else {
                    findings.push(unknown_type(fb, reference, &inst.type_name, file));
                    return;
                };
                if inst_type.declares_event(port) {
                    return;
                }
                if interface_var(inst_type, port).is_some() {
                    findings.push(mix_error(fb, reference, file));
                } else {
                    findings.push(dangling(
                        fb,
                        reference,
                        &format!("type '{}'", inst.type_name),
                        file,
                    ));
                }
            }
        }
    }

    /// Resolve a data endpoint to its declared variable type, reporting
    /// dangling references and event/data mixes along the way
    fn resolve_var(
        &self,
        fb: &FbType,
        reference: &str,
        file: &str,
        findings: &mut Vec<Finding>,
    ) -> Option<String> {
        match Endpoint::parse(reference) {
            Endpoint::Interface { port } => {
                if let Some(var) = interface_var(fb, port) {
                    return Some(var.type_name.clone());
                }
                if fb.declares_event(port) {
                    findings.push(mix_error(fb, reference, file));
                } else {
                    findings.push(dangling(fb, reference, "own interface", file));
                }
                None
            }
            Endpoint::Instance { instance, port } => {
                let Some(inst) = fb.instance(instance) else {
                    findings.push(dangling(fb, reference, "declared instances", file));
                    return None;
                };
                let Some(inst_type) = self.app.fb_type(&inst.type_name) else {
                    findings.push(unknown_type(fb, reference, &inst.type_name, file));
                    return None;
                };
                if let Some(var) = interface_var(inst_type, port) {
                    return Some(var.type_name.clone());
                }
                if inst_type.declares_event(port) {
                    findings.push(mix_error(fb, reference, file));
                } else {
                    findings.push(dangling(
                        fb,
                        reference,
                        &format!("type '{}'", inst.type_name),
                        file,
                    ));
                }
                None
            }
        }
    }

    fn check_data_types(
        &self,
        fb: &FbType,
        conn: &crate::shared::models::DataConnection,
        source_type: &str,
        dest_type: &str,
        file: &str,
        findings: &mut Vec<Finding>,
    ) {
        let wire = format!("{} -> {}", conn.source, conn.destination);
        match compatibility(source_type, dest_type) {
            TypeCompat::Exact | TypeCompat::Widening => {}
            TypeCompat::Narrowing => findings.push(
                Finding::new(
                    fb.name.clone(),
                    "DATA_NARROWING",
                    Severity::Warning,
                    format!("{}: {} narrows to {}", wire, source_type, dest_type),
                )
                .with_file(file),
            ),
            TypeCompat::Unknown => findings.push(
                Finding::new(
                    fb.name.clone(),
                    "DATA_TYPE_UNKNOWN",
                    Severity::Info,
                    format!(
                        "{}: cannot verify {} against {}",
                        wire, source_type, dest_type
                    ),
                )
                .with_file(file),
            ),
            TypeCompat::Incompatible => findings.push(
                Finding::new(
                    fb.name.clone(),
                    "DATA_TYPE_MISMATCH",
                    Severity::Error,
                    format!("{}: {} is incompatible with {}", wire, source_type, dest_type),
                )
                .with_file(file),
            ),
        }
    }

    /// An event input wired from two sources fires twice per trigger
    fn check_duplicate_event_targets(
        &self,
        fb: &FbType,
        file: &str,
        findings: &mut Vec<Finding>,
    ) {
        let mut target_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for conn in &fb.event_connections {
            *target_counts.entry(conn.destination.as_str()).or_insert(0) += 1;
        }
        for (target, count) in target_counts {
            if count > 1 {
                findings.push(
                    Finding::new(
                        fb.name.clone(),
                        "DUPLICATE_EVENT_TARGET",
                        Severity::Warning,
                        format!("'{}' is wired from {} sources", target, count),
                    )
                    .with_file(file),
                );
            }
        }
    }

    /// Instances whose type expects INIT but nothing triggers it
    fn check_init_chains(&self, fb: &FbType, file: &str, findings: &mut Vec<Finding>) {
        for inst in &fb.fb_instances {
            let Some(inst_type) = self.app.fb_type(&inst.type_name) else {
                continue;
            };
            if !inst_type.event_inputs.iter().any(|e| e == "INIT") {
                continue;
            }
            let target = format!("{}.INIT", inst.name);
            let wired = fb.event_connections.iter().any(|c| c.destination == target);
            if !wired {
                findings.push(
                    Finding::new(
                        fb.name.clone(),
                        "UNCONNECTED_INIT",
                        Severity::Warning,
                        format!("'{}' declares INIT but nothing connects to it", inst.name),
                    )
                    .with_file(file),
                );
            }
        }
    }
}

fn interface_var<'a>(fb: &'a FbType, name: &str) -> Option<&'a VarDeclaration> {
    fb.input_vars
        .iter()
        .chain(&fb.output_vars)
        .find(|v| v.name == name)
}

fn dangling(fb: &FbType, reference: &str, scope: &str, file: &str) -> Finding {
    Finding::new(
        fb.name.clone(),
        "DANGLING_REFERENCE",
        Severity::Error,
        format!("'{}' does not resolve against {}", reference, scope),
    )
    .with_file(file)
}

fn mix_error(fb: &FbType, reference: &str, file: &str) -> Finding {
    Finding::new(
        fb.name.clone(),
        "EVENT_DATA_MIX",
        Severity::Error,
        format!("'{}' connects an event port to a data port", reference),
    )
    .with_file(file)
}

fn unknown_type(fb: &FbType, reference: &str, type_name: &str, file: &str) -> Finding {
    Finding::new(
        fb.name.clone(),
        "TYPE_NOT_AVAILABLE",
        Severity::Info,
        format!(
            "'{}' uses type '{}' which is not in the scanned set",
            reference, type_name
        ),
    )
    .with_file(file)
}
