//! Parsed IEC 61499 artifact model
//!
//! Immutable view of a single `.fbt`/`.adp`/`.dtp` declaration as read from
//! disk. Parsing lives in `features::parsing`; everything downstream consumes
//! these types read-only.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of declared artifact, detected from the XML root element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Composite automation type (CompositeFBType root)
    Cat,
    /// Sub-application (CompositeFBType flagged as SubApp)
    SubApp,
    /// Basic function block (FBType with ECC)
    BasicFb,
    /// Composite function block (FBType with FBNetwork)
    CompositeFb,
    /// Stateless function (FBType with neither ECC nor FBNetwork)
    Function,
    /// Adapter interface (AdapterType)
    Adapter,
    /// Structured data type
    Structure,
    /// Enumerated data type
    Enum,
    /// Array data type
    Array,
    /// Alias data type
    Alias,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cat => "CAT",
            Self::SubApp => "SubApp",
            Self::BasicFb => "BasicFB",
            Self::CompositeFb => "CompositeFB",
            Self::Function => "Function",
            Self::Adapter => "Adapter",
            Self::Structure => "Structure",
            Self::Enum => "Enum",
            Self::Array => "Array",
            Self::Alias => "Alias",
        }
    }

    const ALL: [ArtifactKind; 10] = [
        Self::Cat,
        Self::SubApp,
        Self::BasicFb,
        Self::CompositeFb,
        Self::Function,
        Self::Adapter,
        Self::Structure,
        Self::Enum,
        Self::Array,
        Self::Alias,
    ];

    /// Does this artifact kind declare an event interface?
    pub fn has_event_interface(&self) -> bool {
        matches!(
            self,
            Self::Cat | Self::SubApp | Self::BasicFb | Self::CompositeFb | Self::Function | Self::Adapter
        )
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown artifact type '{}'", s))
    }
}

/// Variable declaration (interface or internal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDeclaration {
    pub name: String,
    /// IEC 61131-3 elementary type name (BOOL, INT, REAL, ...) or user type
    pub type_name: String,
}

/// FB instance declared inside an FBNetwork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FbInstance {
    pub name: String,
    pub type_name: String,
    /// Parameter assignments (e.g. DT = "T#10ms" on E_CYCLE)
    pub parameters: Vec<(String, String)>,
}

impl FbInstance {
    /// Look up a parameter value by name
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Directed event edge: `source` and `destination` are endpoint refs of the
/// form `instance.EVENT` or a bare interface event name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConnection {
    pub source: String,
    pub destination: String,
}

/// Data edge, same endpoint encoding as [`EventConnection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConnection {
    pub source: String,
    pub destination: String,
}

/// ST algorithm body declared in a BasicFB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Algorithm {
    pub name: String,
    pub st_source: String,
}

/// A parsed function block / adapter / data type declaration
///
/// One instance per successfully parsed artifact file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FbType {
    pub name: String,
    pub kind: ArtifactKind,
    pub file_path: PathBuf,

    pub event_inputs: Vec<String>,
    pub event_outputs: Vec<String>,
    pub input_vars: Vec<VarDeclaration>,
    pub output_vars: Vec<VarDeclaration>,
    pub internal_vars: Vec<VarDeclaration>,

    pub fb_instances: Vec<FbInstance>,
    pub event_connections: Vec<EventConnection>,
    pub data_connections: Vec<DataConnection>,

    pub algorithms: Vec<Algorithm>,
}

impl FbType {
    /// Empty declaration of the given kind, used by the parser as it fills
    /// fields in
    pub fn new(name: impl Into<String>, kind: ArtifactKind, file_path: PathBuf) -> Self {
        Self {
            name: name.into(),
            kind,
            file_path,
            event_inputs: Vec::new(),
            event_outputs: Vec::new(),
            input_vars: Vec::new(),
            output_vars: Vec::new(),
            internal_vars: Vec::new(),
            fb_instances: Vec::new(),
            event_connections: Vec::new(),
            data_connections: Vec::new(),
            algorithms: Vec::new(),
        }
    }

    /// Does this declaration contain a network of child instances?
    pub fn has_network(&self) -> bool {
        !self.fb_instances.is_empty()
            || !self.event_connections.is_empty()
            || !self.data_connections.is_empty()
    }

    /// Find a declared instance by name
    pub fn instance(&self, name: &str) -> Option<&FbInstance> {
        self.fb_instances.iter().find(|i| i.name == name)
    }

    /// Is `name` an event declared on this type's own interface?
    pub fn declares_event(&self, name: &str) -> bool {
        self.event_inputs.iter().any(|e| e == name) || self.event_outputs.iter().any(|e| e == name)
    }
}
