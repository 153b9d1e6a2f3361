//! Domain model for a parsed application directory

use std::path::PathBuf;

use crate::shared::models::{ArtifactKind, FbType};

/// Everything the analysis passes need from one application directory
///
/// Built once per invocation; all passes read it immutably.
#[derive(Debug, Clone)]
pub struct ParsedApplication {
    pub app_dir: PathBuf,
    pub fb_types: Vec<FbType>,
    /// Per-file parse problems (malformed XML, unreadable files)
    pub parse_warnings: Vec<String>,
    /// Artifact files discovered, parseable or not
    pub files_scanned: usize,
}

impl ParsedApplication {
    /// Look up a declaration by type name
    pub fn fb_type(&self, name: &str) -> Option<&FbType> {
        self.fb_types.iter().find(|fb| fb.name == name)
    }

    /// Declarations that carry an event interface (FBs, CATs, adapters)
    pub fn event_types(&self) -> impl Iterator<Item = &FbType> {
        self.fb_types
            .iter()
            .filter(|fb| fb.kind.has_event_interface())
    }

    /// Declarations of a given kind
    pub fn of_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &FbType> {
        self.fb_types.iter().filter(move |fb| fb.kind == kind)
    }

    /// True when discovery found artifact files but none parsed
    pub fn nothing_parsed(&self) -> bool {
        self.files_scanned > 0 && self.fb_types.is_empty()
    }
}
