//! Serializable shapes for fragments and the merged catalog.
//!
//! `Fragment` types the five required attributes and carries every other
//! field through untouched; `ProfileCatalog` is the output envelope written
//! to `templates/profile.json`. Building the envelope is a pure function of
//! the fragment list and a calendar date so tests can pin the date and
//! compare rendered output byte for byte.

use crate::catalog::identity::{FragmentId, TemplateCategory};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Semantic version stamped into every generated catalog.
pub const CATALOG_VERSION: &str = "1.0.0";

const CATALOG_AUTHOR: &str = "TCM Community";
const CATALOG_DESCRIPTION: &str =
    "Terminal Context Manager - Profile Templates & Environment Variables Dictionary";
const CATALOG_REPOSITORY: &str = "https://github.com/ZhiZeYi/terminal-context-template";

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One validated profile template fragment.
///
/// `variables` is opaque here: it must be present in the source file but is
/// never inspected. Fields beyond the required five land in `extra` and are
/// re-serialized verbatim after them.
pub struct Fragment {
    pub id: FragmentId,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub variables: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Output envelope wrapping the sorted fragment list.
pub struct ProfileCatalog {
    pub version: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub author: String,
    pub description: String,
    pub repository: String,
    pub templates: Vec<Fragment>,
}

/// Wrap sorted fragments in the catalog envelope.
///
/// The fragment list is taken verbatim; callers sort first. The date becomes
/// `lastUpdated`, so two runs on the same calendar day produce identical
/// envelopes for identical input.
pub fn build_catalog(templates: Vec<Fragment>, generated_on: NaiveDate) -> ProfileCatalog {
    ProfileCatalog {
        version: CATALOG_VERSION.to_string(),
        last_updated: generated_on.format("%Y-%m-%d").to_string(),
        author: CATALOG_AUTHOR.to_string(),
        description: CATALOG_DESCRIPTION.to_string(),
        repository: CATALOG_REPOSITORY.to_string(),
        templates,
    }
}

/// Render the catalog as the exact document body written to disk.
///
/// Two-space-indented pretty print, UTF-8, non-ASCII left unescaped. The
/// trailing newline is appended by the writer, not here, so previews match
/// the document body.
pub fn render_catalog(catalog: &ProfileCatalog) -> Result<String> {
    serde_json::to_string_pretty(catalog).context("serializing profile catalog")
}
