//! End-to-end checks of the tracked queries on serialized trees.

use insta::assert_snapshot;
use rulang::ast::{NodeKind, SourceUnit};
use rulang::pipeline::{decode_tree, kind_census, process_with_diagnostics, render_tree};
use rulang::{DiagnosticPhase, DiagnosticSeverity, SourceTree};

const HELLO: &str = include_str!("../demos/hello.json");

fn load(db: &salsa::DatabaseImpl, name: &str, text: &str) -> SourceTree {
    SourceTree::new(db, name.into(), text.to_string())
}

#[test]
fn test_render_demo() {
    let db = salsa::DatabaseImpl::default();
    let source = load(&db, "hello.json", HELLO);

    let rendered = render_tree(&db, source).expect("demo should decode");
    assert_snapshot!(rendered, @r#"
    package main
    import "fmt"
    func main() { name := "world"; fmt::Println("hello", name) }
    "#);
}

#[test]
fn test_census_demo() {
    let db = salsa::DatabaseImpl::default();
    let source = load(&db, "hello.json", HELLO);

    let census = kind_census(&db, source).expect("demo should decode");
    assert_eq!(census.count(NodeKind::StringLiteral), 2);
    assert_eq!(census.count(NodeKind::VariableLiteral), 1);
    assert_eq!(census.total(), 8);
    assert_snapshot!(census, @r"
    Package: 1
    Import: 1
    FunctionDefinition: 1
    StringLiteral: 2
    VariableLiteral: 1
    FunctionCall: 1
    InferredVariableAssignment: 1
    ");
}

#[test]
fn test_rendering_survives_reencoding() {
    let db = salsa::DatabaseImpl::default();
    let source = load(&db, "hello.json", HELLO);
    let unit = decode_tree(&db, source).expect("demo should decode");

    let encoded = serde_json::to_string(&unit).expect("tree should encode");
    let decoded: SourceUnit = serde_json::from_str(&encoded).expect("tree should decode");
    assert_eq!(decoded, unit);
    assert_eq!(decoded.to_string(), unit.to_string());
}

#[test]
fn test_structural_error_becomes_diagnostic() {
    let db = salsa::DatabaseImpl::default();
    let text = r#"{"nodes": [
        {"Package": {"name": "main"}},
        {"IfElseStatement": {"blocks": [
            {"condition": null, "body": []},
            {"condition": {"VariableLiteral": {"value": "ok"}}, "body": []}
        ]}}
    ]}"#;
    let source = load(&db, "bad_chain.json", text);

    let result = process_with_diagnostics(&db, source);
    assert!(result.unit.is_none());
    assert_eq!(result.diagnostics.len(), 1);

    let diag = &result.diagnostics[0];
    assert_eq!(diag.severity, DiagnosticSeverity::Error);
    assert_eq!(diag.phase, DiagnosticPhase::Decoding);
    assert!(diag.message.contains("must be the last"), "{}", diag.message);
    assert!(render_tree(&db, source).is_none());
}
