//! Shared models

mod artifact;
mod finding;
mod report;

pub use artifact::{
    Algorithm, ArtifactKind, DataConnection, EventConnection, FbInstance, FbType, VarDeclaration,
};
pub use finding::{worst_severity, Finding, Severity};
pub use report::{AnalysisReport, ExitStatus};

/// FB identifier (instance or type name) as it appears in connection refs
pub type FbId = String;
