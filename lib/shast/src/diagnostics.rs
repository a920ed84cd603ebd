//! Structured diagnostics collected during a compilation run.
//!
//! The transformation never writes to a global logger: the driver is handed a
//! [`Diagnostics`] sink and records every non-fatal event (skipped shapes, abandoned
//! compound compositions) as a [`Diagnostic`], so callers and tests can inspect them.

use crate::model::ShapeId;

/// Severity level of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// An error that caused a shape to be dropped from the output.
    #[default]
    Error,
    /// A shape was skipped but compilation continued.
    Warning,
    /// Informational commentary, e.g. a heuristic that did not fire.
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
            Self::Info => write!(f, "Info"),
        }
    }
}

/// A single diagnostic record.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity of the record.
    pub severity: Severity,
    /// The shape the record is about, when one is in focus.
    pub shape: Option<ShapeId>,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.shape {
            Some(shape) => write!(f, "{}: {}: {}", self.severity, shape, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Collection of diagnostics produced by one compilation run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new empty diagnostics sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn push(&mut self, record: Diagnostic) {
        self.records.push(record);
    }

    /// Records an error about a shape.
    pub fn error(&mut self, shape: Option<ShapeId>, message: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Error,
            shape,
            message: message.into(),
        });
    }

    /// Records a warning about a shape.
    pub fn warning(&mut self, shape: Option<ShapeId>, message: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Warning,
            shape,
            message: message.into(),
        });
    }

    /// Records an informational message about a shape.
    pub fn info(&mut self, shape: Option<ShapeId>, message: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Info,
            shape,
            message: message.into(),
        });
    }

    /// Returns an iterator over all records.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    /// Returns the number of records with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.records
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    /// Returns the total number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no diagnostics were recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
