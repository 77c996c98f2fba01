use serde::Serialize;

use crate::ContentKind;

/// Outcome of one validation call.
///
/// Errors and warnings keep the order in which checks ran. Warnings never
/// affect `is_valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True when `errors` is empty.
    pub is_valid: bool,
    /// Problems that make the document unusable.
    pub errors: Vec<String>,
    /// Best-practice findings.
    pub warnings: Vec<String>,
    /// Kind the document was checked as, when one was determined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentKind>,
}

impl ValidationResult {
    /// Result carrying a single error and nothing else.
    pub fn single_error(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
            kind: None,
        }
    }

    /// True when there are neither errors nor warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Accumulates findings while a document is walked.
#[derive(Debug, Default)]
pub(crate) struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    pub(crate) fn error(&mut self, path: &str, message: impl AsRef<str>) {
        self.errors.push(located(path, message.as_ref()));
    }

    pub(crate) fn warn(&mut self, path: &str, message: impl AsRef<str>) {
        self.warnings.push(located(path, message.as_ref()));
    }

    pub(crate) fn missing(&mut self, path: &str, field: &str) {
        self.error(path, format!("missing required field '{field}'"));
    }

    pub(crate) fn finish(self, kind: Option<ContentKind>) -> ValidationResult {
        ValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
            kind,
        }
    }
}

fn located(path: &str, message: &str) -> String {
    if path.is_empty() {
        message.to_string()
    } else {
        format!("{path}: {message}")
    }
}

/// `parent.child`, or just `child` at the root.
pub(crate) fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

/// `parent[index]`.
pub(crate) fn index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
