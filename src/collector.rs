//! Fragment discovery over the source directory.
//!
//! Enumerates candidate `*.json` files (skipping `_`-prefixed authoring
//! notes), sorts them by filename so results never depend on filesystem
//! iteration order, and funnels each through the loader. Failures stay
//! per-file; only a missing source directory empties the whole collection.

use crate::catalog::model::Fragment;
use crate::diagnostics::Report;
use crate::loader::load_fragment;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Files whose name starts with this marker are reserved for private
/// authoring notes and are never read, validated, or merged.
const PRIVATE_MARKER: char = '_';

const FRAGMENT_EXTENSION: &str = "json";

/// Collect every valid fragment under `source_dir`, in filename order.
///
/// A missing or unreadable directory records an ERROR and returns an empty
/// list; the caller treats an empty result as the fatal condition for the
/// run.
pub fn collect_fragments(source_dir: &Path, report: &mut Report) -> Vec<Fragment> {
    if !source_dir.is_dir() {
        report.error(
            source_dir.display().to_string(),
            "Template source directory not found",
        );
        return Vec::new();
    }

    let candidates = match candidate_files(source_dir) {
        Ok(candidates) => candidates,
        Err(err) => {
            report.error(
                source_dir.display().to_string(),
                format!("Error - {err}"),
            );
            return Vec::new();
        }
    };

    if report.echoes() {
        println!("[DIR] Scanning {}", source_dir.display());
        println!("   Found {} fragment files\n", candidates.len());
    }

    let mut fragments = Vec::new();
    let mut first_file_by_id: BTreeMap<String, String> = BTreeMap::new();
    for path in &candidates {
        let Some(fragment) = load_fragment(path, report) else {
            continue;
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        // Duplicate ids are surfaced, never silently collapsed; both
        // fragments stay in the result and the sorter passes them through.
        if let Some(first) = first_file_by_id.get(&fragment.id.0).cloned() {
            report.warn(
                file_name.clone(),
                format!("duplicate id '{}' already used by {first}", fragment.id.0),
            );
        } else {
            first_file_by_id.insert(fragment.id.0.clone(), file_name.clone());
        }

        report.ok(file_name, fragment.name.clone());
        fragments.push(fragment);
    }

    if report.echoes() {
        println!("\n[SUMMARY] {} valid fragments", fragments.len());
    }

    fragments
}

fn candidate_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(FRAGMENT_EXTENSION) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.starts_with(PRIVATE_MARKER) {
            continue;
        }
        files.push(path);
    }
    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    Ok(files)
}
