//! Deterministic ordering of validated fragments.
//!
//! The merged catalog must be reproducible regardless of filesystem
//! enumeration order, so fragments are ordered by a fixed category
//! precedence and then by id. The sort is stable and total; fragments that
//! share (category, id) keep their input order, and duplicate ids pass
//! through untouched.

use crate::catalog::model::Fragment;

/// Category precedence for the merged catalog, highest first. Categories not
/// listed here sort after every listed one.
pub const CATEGORY_PRECEDENCE: &[&str] = &[
    "Development",
    "AI",
    "Cloud",
    "DevOps",
    "Database",
    "Network",
    "CI/CD",
];

/// Order fragments by (category rank, id).
pub fn sort_fragments(mut fragments: Vec<Fragment>) -> Vec<Fragment> {
    fragments.sort_by(|a, b| {
        (a.category.rank(), &a.id).cmp(&(b.category.rank(), &b.id))
    });
    fragments
}
