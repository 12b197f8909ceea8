//! Per-file fragment loading and validation.
//!
//! Given one candidate path, produce either a validated `Fragment` or
//! diagnostics, never a partial fragment. Every failure is caught at the
//! granularity of the file and recorded on the report so a malformed
//! fragment cannot abort the rest of the run.

use crate::catalog::model::Fragment;
use crate::diagnostics::Report;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Required fragment attributes, in the order they are reported when absent.
pub const REQUIRED_FIELDS: &[&str] = &["id", "name", "description", "category", "variables"];

/// Load and validate a single fragment file.
///
/// An id/filename mismatch is surfaced as a WARN but the fragment is kept
/// as-is; all other failures record an ERROR and yield `None`.
pub fn load_fragment(path: &Path, report: &mut Report) -> Option<Fragment> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            report.error(file_name, format!("Error - {err}"));
            return None;
        }
    };

    let value: Value = match serde_json::from_str(&data) {
        Ok(value) => value,
        Err(err) => {
            report.error(file_name, format!("Invalid JSON - {err}"));
            return None;
        }
    };

    let Some(object) = value.as_object() else {
        report.error(file_name, "Fragment must be a JSON object");
        return None;
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        report.error(file_name, format!("Missing required fields: {missing:?}"));
        return None;
    }

    // Required keys are present but may still carry the wrong shape (e.g. a
    // numeric id); that surfaces here as a per-file error.
    let fragment: Fragment = match serde_json::from_value(value) {
        Ok(fragment) => fragment,
        Err(err) => {
            report.error(file_name, format!("Error - {err}"));
            return None;
        }
    };

    if let Some(stem) = path.file_stem().map(|stem| stem.to_string_lossy()) {
        if fragment.id.0 != stem {
            report.warn(
                file_name,
                format!("id '{}' doesn't match filename", fragment.id.0),
            );
        }
    }

    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_fragment(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn valid_fragment_loads_with_no_diagnostics() {
        let dir = TempDir::new().unwrap();
        let path = write_fragment(
            &dir,
            "docker.json",
            &json!({
                "id": "docker",
                "name": "Docker Environment",
                "description": "Container workflow",
                "category": "DevOps",
                "variables": {"DOCKER_HOST": "tcp://localhost:2375"},
            }),
        );

        let mut report = Report::silent();
        let fragment = load_fragment(&path, &mut report).expect("fragment accepted");
        assert_eq!(fragment.id.0, "docker");
        assert!(report.entries().is_empty());
    }

    #[test]
    fn missing_variables_is_reported_by_exact_name() {
        let dir = TempDir::new().unwrap();
        let path = write_fragment(
            &dir,
            "docker.json",
            &json!({
                "id": "docker",
                "name": "Docker Environment",
                "description": "Container workflow",
                "category": "DevOps",
            }),
        );

        let mut report = Report::silent();
        assert!(load_fragment(&path, &mut report).is_none());
        let errors: Vec<_> = report.with_severity(Severity::Error).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Missing required fields: [\"variables\"]");
    }

    #[test]
    fn all_missing_fields_are_listed_in_schema_order() {
        let dir = TempDir::new().unwrap();
        let path = write_fragment(&dir, "empty.json", &json!({"category": "AI"}));

        let mut report = Report::silent();
        assert!(load_fragment(&path, &mut report).is_none());
        assert_eq!(
            report.entries()[0].message,
            "Missing required fields: [\"id\", \"name\", \"description\", \"variables\"]"
        );
    }

    #[test]
    fn invalid_json_is_a_per_file_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let mut report = Report::silent();
        assert!(load_fragment(&path, &mut report).is_none());
        let diag = &report.entries()[0];
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.subject, "broken.json");
        assert!(diag.message.starts_with("Invalid JSON - "));
    }

    #[test]
    fn non_object_document_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_fragment(&dir, "list.json", &json!(["not", "a", "fragment"]));

        let mut report = Report::silent();
        assert!(load_fragment(&path, &mut report).is_none());
        assert_eq!(report.entries()[0].message, "Fragment must be a JSON object");
    }

    #[test]
    fn id_filename_mismatch_warns_but_keeps_the_fragment() {
        let dir = TempDir::new().unwrap();
        let path = write_fragment(
            &dir,
            "foo.json",
            &json!({
                "id": "bar",
                "name": "Mismatch",
                "description": "id differs from filename stem",
                "category": "AI",
                "variables": {},
            }),
        );

        let mut report = Report::silent();
        let fragment = load_fragment(&path, &mut report).expect("fragment retained");
        assert_eq!(fragment.id.0, "bar");
        let warns: Vec<_> = report.with_severity(Severity::Warn).collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].message, "id 'bar' doesn't match filename");
        assert!(!report.has_errors());
    }

    #[test]
    fn wrongly_typed_required_field_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_fragment(
            &dir,
            "num.json",
            &json!({
                "id": 7,
                "name": "Bad id",
                "description": "id is not a string",
                "category": "AI",
                "variables": {},
            }),
        );

        let mut report = Report::silent();
        assert!(load_fragment(&path, &mut report).is_none());
        assert!(report.has_errors());
    }
}
