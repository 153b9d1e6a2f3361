//! Application directory discovery
//!
//! Recursive scan for artifact files plus parallel parse fan-out.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::xml_parser::parse_artifact;
use crate::errors::Result;
use crate::features::parsing::domain::ParsedApplication;
use crate::shared::models::FbType;

const ARTIFACT_EXTENSIONS: &[&str] = &["fbt", "adp", "dtp", "cat", "cfg"];

/// Find all artifact files under `app_dir`, sorted for deterministic output
pub fn find_artifact_files(app_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(app_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ARTIFACT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Parse every artifact under `app_dir`
///
/// Per-file failures are collected as warnings; the caller decides whether
/// an empty result set is fatal.
pub fn parse_application(app_dir: &Path) -> Result<ParsedApplication> {
    let files = find_artifact_files(app_dir);
    tracing::info!("found {} artifact files in {}", files.len(), app_dir.display());

    let results: Vec<std::result::Result<Option<FbType>, String>> = files
        .par_iter()
        .map(|path| parse_artifact(path).map_err(|e| e.to_string()))
        .collect();

    let mut fb_types = Vec::new();
    let mut parse_warnings = Vec::new();
    for result in results {
        match result {
            Ok(Some(fb)) => fb_types.push(fb),
            Ok(None) => {}
            Err(message) => parse_warnings.push(message),
        }
    }

    tracing::info!(
        "parsed {} artifact declarations ({} warnings)",
        fb_types.len(),
        parse_warnings.len()
    );

    Ok(ParsedApplication {
        app_dir: app_dir.to_path_buf(),
        fb_types,
        parse_warnings,
        files_scanned: files.len(),
    })
}
