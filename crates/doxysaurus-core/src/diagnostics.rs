//! Non-fatal findings collected while loading and rendering.

use std::fmt;
use std::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Note,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A prose or code reference with no known target.
    UnresolvedReference,
    /// A presentation value (highlight class, section kind, …) with no rendering.
    UnsupportedValue,
    /// A compound kind that is parsed but not collected.
    SkippedCompound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Note => "note",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}", self.message)
    }
}

/// Shared diagnostic sink. Safe to use from rayon workers.
#[derive(Debug, Default)]
pub struct Diagnostics {
    verbose: bool,
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    /// With `verbose`, notes are logged at warn level instead of debug.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn warn(&self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            message,
        });
    }

    pub fn note(&self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        if self.verbose {
            warn!("{message}");
        } else {
            debug!("{message}");
        }
        self.push(Diagnostic {
            severity: Severity::Note,
            kind,
            message,
        });
    }

    fn push(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }

    /// Snapshot of everything recorded so far, in recording order.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries().iter().filter(|d| d.kind == kind).count()
    }

    pub fn warning_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}
