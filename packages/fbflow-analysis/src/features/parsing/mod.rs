//! Artifact parsing
//!
//! Discovers IEC 61499 XML artifacts (`.fbt`, `.adp`, `.dtp`, `.cat`,
//! `.cfg`) under an application directory and parses them into the shared
//! [`FbType`](crate::shared::models::FbType) model. Files are consumed
//! read-only; malformed XML becomes a per-file warning, never a crash.

pub mod domain;
pub mod infrastructure;

pub use domain::ParsedApplication;
pub use infrastructure::{find_artifact_files, parse_application, parse_artifact};
