//! Diagnostics reported while processing syntax trees.

use std::path::Path;

/// A diagnostic message (error or warning) about one source tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[salsa::accumulator]
pub struct Diagnostic {
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub phase: DiagnosticPhase,
}

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Stage that emitted a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticPhase {
    /// Turning serialized text into a tree, including structural checks.
    Decoding,
    /// Checks on a decoded tree.
    Validation,
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "ERROR"),
            DiagnosticSeverity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Format a diagnostic for terminal output.
pub fn format_diagnostic(diag: &Diagnostic, file_path: &Path) -> String {
    format!(
        "{}: [{:?}] {}: {}",
        diag.severity,
        diag.phase,
        file_path.display(),
        diag.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_diagnostic() {
        let diag = Diagnostic {
            message: "no package declaration".to_string(),
            severity: DiagnosticSeverity::Warning,
            phase: DiagnosticPhase::Validation,
        };
        assert_eq!(
            format_diagnostic(&diag, Path::new("main.json")),
            "WARNING: [Validation] main.json: no package declaration"
        );
    }
}
