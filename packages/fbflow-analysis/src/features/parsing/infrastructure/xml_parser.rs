//! Single-artifact XML parser
//!
//! Maps the vendor's LibraryElement/DataType dialects onto [`FbType`].
//! Unknown root elements are skipped (returned as `None`) rather than
//! treated as errors; the application directories also contain project
//! metadata files we do not analyze.

use roxmltree::{Document, Node};
use std::path::Path;

use crate::errors::{FbflowError, Result};
use crate::shared::models::{
    Algorithm, ArtifactKind, DataConnection, EventConnection, FbInstance, FbType, VarDeclaration,
};

/// Parse one artifact file into the shared model
///
/// Returns `Ok(None)` for files whose root element is not an analyzable
/// artifact kind.
pub fn parse_artifact(path: &Path) -> Result<Option<FbType>> {
    let text = std::fs::read_to_string(path)?;
    let doc = Document::parse(&text).map_err(|e| {
        FbflowError::parse(format!(
            "XML parsing error in {}: {}",
            path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
            e
        ))
    })?;

    let root = doc.root_element();
    let Some(kind) = detect_kind(&root) else {
        tracing::debug!("skipping non-artifact root <{}> in {}", root.tag_name().name(), path.display());
        return Ok(None);
    };

    let name = root.attribute("Name").unwrap_or("Unknown").to_string();
    let mut fb = FbType::new(name, kind, path.to_path_buf());

    if let Some(interface) = first_named(&root, "InterfaceList") {
        extract_interface(&interface, &mut fb);
    }

    if let Some(basic) = first_named(&root, "BasicFB") {
        extract_basic(&basic, &mut fb);
    }

    if let Some(network) = first_named(&root, "FBNetwork") {
        extract_network(&network, &mut fb);
    }

    Ok(Some(fb))
}

/// Detect the artifact kind from the XML root element
fn detect_kind(root: &Node) -> Option<ArtifactKind> {
    match root.tag_name().name() {
        "FBType" => {
            if descendant_exists(root, "ECC") || descendant_exists(root, "BasicFB") {
                Some(ArtifactKind::BasicFb)
            } else if descendant_exists(root, "FBNetwork") {
                Some(ArtifactKind::CompositeFb)
            } else {
                Some(ArtifactKind::Function)
            }
        }
        "CompositeFBType" => Some(ArtifactKind::Cat),
        "SubAppType" => Some(ArtifactKind::SubApp),
        "AdapterType" => Some(ArtifactKind::Adapter),
        "StructuredType" => Some(ArtifactKind::Structure),
        "EnumeratedType" => Some(ArtifactKind::Enum),
        "ArrayType" => Some(ArtifactKind::Array),
        "DataType" => {
            let comment = root.attribute("Comment").unwrap_or_default();
            if comment.to_uppercase().contains("ALIAS") {
                Some(ArtifactKind::Alias)
            } else if descendant_exists(root, "StructuredType") {
                Some(ArtifactKind::Structure)
            } else if descendant_exists(root, "EnumeratedType") {
                Some(ArtifactKind::Enum)
            } else if descendant_exists(root, "ArrayType") {
                Some(ArtifactKind::Array)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn extract_interface(interface: &Node, fb: &mut FbType) {
    if let Some(inputs) = first_named(interface, "EventInputs") {
        fb.event_inputs = named_children(&inputs, "Event");
    }
    if let Some(outputs) = first_named(interface, "EventOutputs") {
        fb.event_outputs = named_children(&outputs, "Event");
    }
    if let Some(vars) = first_named(interface, "InputVars") {
        fb.input_vars = var_declarations(&vars);
    }
    if let Some(vars) = first_named(interface, "OutputVars") {
        fb.output_vars = var_declarations(&vars);
    }
}

fn extract_basic(basic: &Node, fb: &mut FbType) {
    if let Some(internal) = first_named(basic, "InternalVars") {
        fb.internal_vars = var_declarations(&internal);
    }

    for algo in basic.descendants().filter(|n| n.has_tag_name("Algorithm")) {
        let name = algo.attribute("Name").unwrap_or("Unknown").to_string();
        // ST body lives as CDATA text or a Text attribute depending on tool
        // version
        let st_source = first_named(&algo, "ST")
            .and_then(|st| {
                st.text()
                    .map(str::to_string)
                    .or_else(|| st.attribute("Text").map(str::to_string))
            })
            .unwrap_or_default();
        if !st_source.trim().is_empty() {
            fb.algorithms.push(Algorithm { name, st_source });
        }
    }
}

fn extract_network(network: &Node, fb: &mut FbType) {
    for inst in network.children().filter(|n| n.has_tag_name("FB")) {
        let parameters = inst
            .children()
            .filter(|n| n.has_tag_name("Parameter"))
            .filter_map(|p| {
                Some((p.attribute("Name")?.to_string(), p.attribute("Value")?.to_string()))
            })
            .collect();
        fb.fb_instances.push(FbInstance {
            name: inst.attribute("Name").unwrap_or_default().to_string(),
            type_name: inst.attribute("Type").unwrap_or_default().to_string(),
            parameters,
        });
    }

    if let Some(events) = first_named(network, "EventConnections") {
        for conn in events.descendants().filter(|n| n.has_tag_name("Connection")) {
            fb.event_connections.push(EventConnection {
                source: conn.attribute("Source").unwrap_or_default().to_string(),
                destination: conn.attribute("Destination").unwrap_or_default().to_string(),
            });
        }
    }

    if let Some(data) = first_named(network, "DataConnections") {
        for conn in data.descendants().filter(|n| n.has_tag_name("Connection")) {
            fb.data_connections.push(DataConnection {
                source: conn.attribute("Source").unwrap_or_default().to_string(),
                destination: conn.attribute("Destination").unwrap_or_default().to_string(),
            });
        }
    }
}

fn first_named<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| n.has_tag_name(name))
}

fn descendant_exists(node: &Node, name: &str) -> bool {
    node.descendants().any(|n| n.has_tag_name(name))
}

fn named_children(node: &Node, name: &str) -> Vec<String> {
    node.children()
        .filter(|n| n.has_tag_name(name))
        .filter_map(|n| n.attribute("Name").map(str::to_string))
        .collect()
}

fn var_declarations(node: &Node) -> Vec<VarDeclaration> {
    node.children()
        .filter(|n| n.has_tag_name("VarDeclaration"))
        .filter_map(|n| {
            Some(VarDeclaration {
                name: n.attribute("Name")?.to_string(),
                type_name: n.attribute("Type").unwrap_or_default().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".fbt").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const BASIC_FB: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<FBType Name="scaleLogic" Comment="Scaling">
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
    <InternalVars>
      <VarDeclaration Name="lastValue" Type="REAL"/>
    </InternalVars>
    <ECC>
      <ECState Name="START"/>
    </ECC>
    <Algorithm Name="scale">
      <ST><![CDATA[IF RawValue > 0 THEN ScaledValue := RawValue * 0.1; END_IF;]]></ST>
    </Algorithm>
  </BasicFB>
</FBType>"#;

    const COMPOSITE_FB: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<FBType Name="motorControl">
  <InterfaceList>
    <EventInputs><Event Name="REQ"/></EventInputs>
    <EventOutputs><Event Name="CNF"/></EventOutputs>
  </InterfaceList>
  <FBNetwork>
    <FB Name="timer" Type="E_CYCLE">
      <Parameter Name="DT" Value="T#100ms"/>
    </FB>
    <FB Name="logic" Type="scaleLogic"/>
    <EventConnections>
      <Connection Source="timer.EO" Destination="logic.REQ"/>
    </EventConnections>
    <DataConnections>
      <Connection Source="logic.ScaledValue" Destination="ScaledOut"/>
    </DataConnections>
  </FBNetwork>
</FBType>"#;

    #[test]
    fn test_parse_basic_fb() {
        let file = write_temp(BASIC_FB);
        let fb = parse_artifact(file.path()).unwrap().unwrap();
        assert_eq!(fb.name, "scaleLogic");
        assert_eq!(fb.kind, ArtifactKind::BasicFb);
        assert_eq!(fb.event_inputs, vec!["INIT", "REQ"]);
        assert_eq!(fb.event_outputs, vec!["INITO", "CNF"]);
        assert_eq!(fb.input_vars[0].type_name, "INT");
        assert_eq!(fb.internal_vars[0].name, "lastValue");
        assert_eq!(fb.algorithms.len(), 1);
        assert!(fb.algorithms[0].st_source.contains("ScaledValue"));
    }

    #[test]
    fn test_parse_composite_fb() {
        let file = write_temp(COMPOSITE_FB);
        let fb = parse_artifact(file.path()).unwrap().unwrap();
        assert_eq!(fb.kind, ArtifactKind::CompositeFb);
        assert_eq!(fb.fb_instances.len(), 2);
        assert_eq!(fb.fb_instances[0].parameter("DT"), Some("T#100ms"));
        assert_eq!(fb.event_connections.len(), 1);
        assert_eq!(fb.event_connections[0].source, "timer.EO");
        assert_eq!(fb.data_connections.len(), 1);
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let file = write_temp("<FBType Name='x'");
        let err = parse_artifact(file.path()).unwrap_err();
        assert!(matches!(err, FbflowError::Parse(_)));
    }

    #[test]
    fn test_unknown_root_is_skipped() {
        let file = write_temp("<Project Name='x'/>");
        assert!(parse_artifact(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_adapter_type() {
        let file = write_temp(r#"<AdapterType Name="IMotorControl"><InterfaceList/></AdapterType>"#);
        let fb = parse_artifact(file.path()).unwrap().unwrap();
        assert_eq!(fb.kind, ArtifactKind::Adapter);
    }
}
