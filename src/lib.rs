//! Shared library for the profile catalog generator.
//!
//! The crate exposes the fragment and catalog types plus the
//! validate→sort→merge pipeline used by the `profilegen` binary: per-file
//! loading and validation, directory collection, deterministic ordering,
//! envelope assembly, and the run modes that decide whether the merged
//! catalog is written to disk, previewed, or only validated. Diagnostics are
//! recorded as structured data and rendered separately so tests can assert
//! on records instead of console text.

use std::env;
use std::path::{Path, PathBuf};

pub mod catalog;
pub mod collector;
pub mod diagnostics;
pub mod loader;
pub mod run_support;

pub use catalog::{
    CATEGORY_PRECEDENCE, Fragment, FragmentId, ProfileCatalog, TemplateCategory, build_catalog,
    render_catalog, sort_fragments,
};
pub use collector::collect_fragments;
pub use diagnostics::{Diagnostic, Report, Severity};
pub use loader::load_fragment;
pub use run_support::{RunMode, RunOutcome, run_pipeline};

/// Fragment source directory, relative to the project root.
pub const DEFAULT_SOURCE_DIR: &str = "template-source";

/// Catalog output path, relative to the project root.
pub const DEFAULT_OUTPUT_PATH: &str = "templates/profile.json";

#[derive(Debug, Clone)]
/// Explicit paths for one pipeline run.
///
/// The pipeline never consults the process location on its own; callers
/// resolve a root (or individual overrides) up front so the same logic runs
/// against arbitrary directories in tests.
pub struct PipelineConfig {
    pub source_dir: PathBuf,
    pub output_path: PathBuf,
}

impl PipelineConfig {
    /// Default source and output locations under `root`.
    pub fn from_root(root: &Path) -> Self {
        Self {
            source_dir: root.join(DEFAULT_SOURCE_DIR),
            output_path: root.join(DEFAULT_OUTPUT_PATH),
        }
    }
}

/// Locate the project root for default path resolution.
///
/// Honors `PROFILEGEN_ROOT` when it points at an existing directory, then
/// falls back to the current directory. `--source`/`--output` overrides take
/// precedence over both.
pub fn resolve_project_root() -> PathBuf {
    if let Some(hint) = env::var_os("PROFILEGEN_ROOT") {
        let path = PathBuf::from(hint);
        if path.is_dir() {
            return path;
        }
    }
    PathBuf::from(".")
}
