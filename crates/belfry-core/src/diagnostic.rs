//! Diagnostic messages produced after a resolution finishes.

use derive_more::Display;
use serde::Serialize;

/// A diagnostic message (error, warning, or info) attached to a call site.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Display)]
#[display("{severity}: {message}")]
pub struct Diagnostic {
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: DiagnosticSeverity::Error,
            kind,
        }
    }
}

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    #[display("ERROR")]
    Error,
}

/// What went wrong with a reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    #[display("unresolved reference")]
    UnresolvedReference,
    #[display("ambiguous reference")]
    Ambiguity,
    #[display("inapplicable candidate")]
    InapplicableCandidate,
    #[display("unsafe call")]
    UnsafeCall,
    #[display("invisible reference")]
    Invisible,
}
