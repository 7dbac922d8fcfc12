//! Tracked queries over serialized syntax trees.
//!
//! ```text
//! SourceTree
//!     │
//!     ▼
//! decode_tree ─► SourceUnit (structural checks applied)
//!     │
//!     ├─► render_tree ─► canonical text
//!     │
//!     └─► kind_census ─► node counts by kind
//! ```
//!
//! Problems are reported through the `Diagnostic` accumulator; a tree that
//! fails to decode yields `None` from every query.

use rulang_ast::{KindCensus, SourceUnit, census_all};
use salsa::Accumulator;

use crate::SourceTree;
use crate::diagnostics::{Diagnostic, DiagnosticPhase, DiagnosticSeverity};

/// Decode the serialized tree of a source file.
///
/// Validated shapes (if/else chains, type and enum definitions) are built
/// through their constructors, so a structurally invalid tree is rejected
/// here with an error diagnostic.
#[salsa::tracked]
pub fn decode_tree(db: &dyn salsa::Database, source: SourceTree) -> Option<SourceUnit> {
    let unit = match serde_json::from_str::<SourceUnit>(source.text(db)) {
        Ok(unit) => unit,
        Err(err) => {
            tracing::debug!(path = %source.path(db).display(), %err, "Failed to decode syntax tree");
            Diagnostic {
                message: format!("invalid syntax tree: {err}"),
                severity: DiagnosticSeverity::Error,
                phase: DiagnosticPhase::Decoding,
            }
            .accumulate(db);
            return None;
        }
    };

    if !unit.nodes.is_empty() && unit.package().is_none() {
        Diagnostic {
            message: "source unit has no package declaration".to_string(),
            severity: DiagnosticSeverity::Warning,
            phase: DiagnosticPhase::Validation,
        }
        .accumulate(db);
    }

    tracing::debug!(
        path = %source.path(db).display(),
        nodes = unit.nodes.len(),
        "Decoded syntax tree"
    );
    Some(unit)
}

/// Canonical rendering of a source file, one top-level node per line.
#[salsa::tracked]
pub fn render_tree(db: &dyn salsa::Database, source: SourceTree) -> Option<String> {
    decode_tree(db, source).map(|unit| unit.to_string())
}

/// Count every node of a source file by kind.
#[salsa::tracked]
pub fn kind_census(db: &dyn salsa::Database, source: SourceTree) -> Option<KindCensus> {
    decode_tree(db, source).map(|unit| census_all(&unit.nodes))
}

/// Result of decoding a source tree together with its diagnostics.
pub struct ProcessResult {
    pub unit: Option<SourceUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProcessResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == DiagnosticSeverity::Error)
    }
}

/// Decode a source tree and collect every diagnostic it produced.
pub fn process_with_diagnostics(db: &dyn salsa::Database, source: SourceTree) -> ProcessResult {
    let unit = decode_tree(db, source);
    let diagnostics = decode_tree::accumulated::<Diagnostic>(db, source)
        .into_iter()
        .cloned()
        .collect();
    ProcessResult { unit, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulang_ast::NodeKind;
    use salsa::Setter;

    const HELLO: &str = r#"{"nodes": [
        {"Package": {"name": "main"}},
        {"FunctionDefinition": {
            "signature": {"name": "main", "generics": [], "arguments": [], "return_type": {"types": []}},
            "body": [
                {"FunctionCall": {
                    "callee": {"Qualified": {"package": "fmt", "function": "Println"}},
                    "arguments": [{"StringLiteral": {"value": "hello"}}],
                    "generics": []
                }}
            ]
        }}
    ]}"#;

    #[test]
    fn test_render_and_census() {
        let db = salsa::DatabaseImpl::default();
        let source = SourceTree::new(&db, "hello.json".into(), HELLO.to_string());

        let rendered = render_tree(&db, source).expect("tree should decode");
        assert_eq!(
            rendered,
            "package main\nfunc main() { fmt::Println(\"hello\") }"
        );

        let census = kind_census(&db, source).expect("tree should decode");
        assert_eq!(census.count(NodeKind::FunctionCall), 1);
        assert_eq!(census.total(), 4);

        let result = process_with_diagnostics(&db, source);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_json_reports_error() {
        let db = salsa::DatabaseImpl::default();
        let source = SourceTree::new(&db, "broken.json".into(), "{\"nodes\": [".to_string());

        let result = process_with_diagnostics(&db, source);
        assert!(result.unit.is_none());
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].phase, DiagnosticPhase::Decoding);
    }

    #[test]
    fn test_missing_package_warns() {
        let db = salsa::DatabaseImpl::default();
        let source = SourceTree::new(
            &db,
            "nopkg.json".into(),
            r#"{"nodes": [{"IntegerLiteral": {"value": "1"}}]}"#.to_string(),
        );

        let result = process_with_diagnostics(&db, source);
        assert!(result.unit.is_some());
        assert!(!result.has_errors());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, DiagnosticSeverity::Warning);
    }

    #[test]
    fn test_text_change_recomputes() {
        let mut db = salsa::DatabaseImpl::default();
        let source = SourceTree::new(&db, "hello.json".into(), HELLO.to_string());
        assert!(render_tree(&db, source).is_some());

        source
            .set_text(&mut db)
            .to(r#"{"nodes": [{"Package": {"name": "other"}}]}"#.to_string());
        assert_eq!(render_tree(&db, source).as_deref(), Some("package other"));
    }
}
