//! Pipeline orchestration behind the `profilegen` binary.
//!
//! Wires collection, ordering, envelope assembly, and the output self-check
//! into the three run modes. The zero-valid-fragments condition is the only
//! fatal error a well-formed environment can produce; it is raised here and
//! rendered by the binary.

use crate::PipelineConfig;
use crate::catalog::model::{ProfileCatalog, build_catalog, render_catalog};
use crate::catalog::order::sort_fragments;
use crate::collector::collect_fragments;
use crate::diagnostics::Report;
use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const PREVIEW_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a single invocation does with the validated fragment set.
pub enum RunMode {
    /// Validate, sort, merge, and write the catalog file.
    Generate,
    /// Stop after discovery and validation; write nothing.
    ValidateOnly,
    /// Compute the full document in memory and preview it; write nothing.
    DryRun,
}

#[derive(Debug)]
/// What a completed run produced.
pub struct RunOutcome {
    pub valid_fragments: usize,
    pub written: Option<PathBuf>,
}

/// Execute one run end-to-end.
///
/// Per-file failures have already been absorbed into the report by the time
/// the fragment set is known; an empty set is fatal and leaves the output
/// location untouched in every mode.
pub fn run_pipeline(
    config: &PipelineConfig,
    mode: RunMode,
    report: &mut Report,
) -> Result<RunOutcome> {
    let fragments = collect_fragments(&config.source_dir, report);
    if fragments.is_empty() {
        bail!("No valid fragments found");
    }
    let valid_fragments = fragments.len();

    if mode == RunMode::ValidateOnly {
        if report.echoes() {
            println!("\n[OK] Validation complete");
        }
        return Ok(RunOutcome {
            valid_fragments,
            written: None,
        });
    }

    let catalog = build_catalog(sort_fragments(fragments), Local::now().date_naive());
    let rendered = render_catalog(&catalog)?;
    validate_catalog_document(&catalog)?;

    if mode == RunMode::DryRun {
        if report.echoes() {
            println!("\n[DRY-RUN] Would generate:\n");
            println!("   Output: {}", config.output_path.display());
            println!("   Templates: {}", catalog.templates.len());
            println!("   Size: {} bytes", rendered.len());
            println!("\n--- Preview (first {PREVIEW_MAX_CHARS} chars) ---");
            println!("{}", preview(&rendered));
        }
        return Ok(RunOutcome {
            valid_fragments,
            written: None,
        });
    }

    write_catalog(&config.output_path, &rendered)?;
    if report.echoes() {
        println!("\n[OK] Generated: {}", config.output_path.display());
        println!("   Templates: {}", catalog.templates.len());
        println!("   Size: {} bytes", rendered.len());
    }
    Ok(RunOutcome {
        valid_fragments,
        written: Some(config.output_path.clone()),
    })
}

/// Self-check the assembled document against the shipped catalog schema.
///
/// A violation here is a bug in assembly, not bad input, so it fails the run
/// instead of becoming a per-file diagnostic.
fn validate_catalog_document(catalog: &ProfileCatalog) -> Result<()> {
    let schema_path = canonical_profile_schema_path();
    let schema_data = fs::read_to_string(&schema_path)
        .with_context(|| format!("reading catalog schema {}", schema_path.display()))?;
    let schema_value: Value = serde_json::from_str(&schema_data)
        .with_context(|| format!("parsing catalog schema {}", schema_path.display()))?;
    let compiled = JSONSchema::compile(&schema_value)
        .map_err(|err| anyhow!("compiling catalog schema {}: {err}", schema_path.display()))?;

    let document = serde_json::to_value(catalog).context("serializing profile catalog")?;
    if let Err(errors) = compiled.validate(&document) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("generated catalog failed schema validation:\n{details}");
    }
    Ok(())
}

/// Canonical location of the catalog schema shipped with the crate.
pub fn canonical_profile_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/profile.schema.json")
}

fn write_catalog(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, format!("{rendered}\n"))
        .with_context(|| format!("writing {}", path.display()))
}

fn preview(rendered: &str) -> String {
    let mut acc = String::new();
    for (idx, ch) in rendered.chars().enumerate() {
        if idx >= PREVIEW_MAX_CHARS {
            acc.push_str("...");
            return acc;
        }
        acc.push(ch);
    }
    acc
}
