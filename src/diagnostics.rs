//! Structured diagnostics for the fragment pipeline.
//!
//! Loader and collector failures are recorded as `Diagnostic` values rather
//! than printed directly; the `Report` owns the records and optionally echoes
//! each one to stdout as it arrives. Tests run with a silent report and
//! assert on the data.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How serious a recorded condition is.
///
/// `Error` drops the fragment, `Warn` surfaces a condition on a retained
/// fragment, `Ok` confirms a fragment was accepted.
pub enum Severity {
    Error,
    Warn,
    Ok,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Ok => "OK",
        }
    }
}

#[derive(Debug, Clone)]
/// One recorded condition: what happened, and to which file or path.
pub struct Diagnostic {
    pub severity: Severity,
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The WARN label carries one trailing space so messages line up with
        // the wider ERROR prefix.
        match self.severity {
            Severity::Error => write!(f, "  [ERROR] {}: {}", self.subject, self.message),
            Severity::Warn => write!(f, "  [WARN]  {}: {}", self.subject, self.message),
            Severity::Ok => write!(f, "  [OK] {}: {}", self.subject, self.message),
        }
    }
}

#[derive(Debug, Default)]
/// Accumulates diagnostics for one run.
pub struct Report {
    entries: Vec<Diagnostic>,
    echo: bool,
}

impl Report {
    /// A report that prints each diagnostic to stdout as it is recorded.
    pub fn console() -> Self {
        Self {
            entries: Vec::new(),
            echo: true,
        }
    }

    /// A report that only records; used by tests.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn error(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, subject, message);
    }

    pub fn warn(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warn, subject, message);
    }

    pub fn ok(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Ok, subject, message);
    }

    fn push(&mut self, severity: Severity, subject: impl Into<String>, message: impl Into<String>) {
        let diag = Diagnostic {
            severity,
            subject: subject.into(),
            message: message.into(),
        };
        if self.echo {
            println!("{diag}");
        }
        self.entries.push(diag);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Whether this report renders to the console; progress lines that are
    /// not diagnostics key off the same switch.
    pub fn echoes(&self) -> bool {
        self.echo
    }

    /// Diagnostics recorded at the given severity, in arrival order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(move |diag| diag.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.with_severity(Severity::Error).next().is_some()
    }
}
