//! Serialized trees go through the same structural checks as constructors.

use rulang_ast::{
    ConditionalBlock, EnumDefinition, FieldDeclaration, IfElseStatement, Node, NodeKind,
    SourceUnit, TypeDeclaration, VariableLiteral,
};

#[test]
fn test_json_round_trip_preserves_tree() {
    let chain: Node = IfElseStatement::new(vec![
        ConditionalBlock::conditional(VariableLiteral::new("a").into(), vec![]),
        ConditionalBlock::otherwise(vec![]),
    ])
    .unwrap()
    .into();
    let unit = SourceUnit::new(vec![
        EnumDefinition::new("Color", vec!["Red".into(), "Green".into()])
            .unwrap()
            .into(),
        chain,
    ]);

    let json = serde_json::to_string(&unit).unwrap();
    let decoded: SourceUnit = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, unit);
    assert_eq!(decoded.to_string(), unit.to_string());
}

#[test]
fn test_decoding_rejects_misplaced_else() {
    let json = r#"{"IfElseStatement": {"blocks": [
        {"condition": null, "body": []},
        {"condition": {"VariableLiteral": {"value": "a"}}, "body": []}
    ]}}"#;
    let err = serde_json::from_str::<Node>(json).unwrap_err();
    assert!(
        err.to_string().contains("must be the last"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_decoding_rejects_duplicate_enum_labels() {
    let json = r#"{"EnumDefinition": {"name": "E", "enumerations": ["A", "A"]}}"#;
    let err = serde_json::from_str::<Node>(json).unwrap_err();
    assert!(err.to_string().contains("duplicate label `A`"), "unexpected error: {err}");
}

#[test]
fn test_decoding_rejects_duplicate_fields() {
    let json = r#"{"TypeDefinition": {"name": "Person", "fields": [
        {"name": "Name", "type": {"is_array": false, "name": "string", "generics": [], "is_func": false, "arguments": []}},
        {"name": "Name", "type": {"is_array": false, "name": "int", "generics": [], "is_func": false, "arguments": []}}
    ]}}"#;
    let err = serde_json::from_str::<Node>(json).unwrap_err();
    assert!(
        err.to_string().contains("duplicate field `Name` in type `Person`"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_decoding_derives_field_visibility() {
    let json = r#"[
        {"name": "age", "is_public": true, "type": {"is_array": false, "name": "uint8", "generics": [], "is_func": false, "arguments": []}},
        {"name": "Name", "is_public": false, "type": {"is_array": false, "name": "string", "generics": [], "is_func": false, "arguments": []}}
    ]"#;
    let fields: Vec<FieldDeclaration> = serde_json::from_str(json).unwrap();
    assert!(!fields[0].is_public);
    assert!(fields[1].is_public);
    assert_eq!(
        fields[0],
        FieldDeclaration::new("age", TypeDeclaration::named("uint8"))
    );
}

#[test]
fn test_decoding_literal_kinds() {
    let json = r#"[
        {"StringLiteral": {"value": "hi"}},
        {"IntegerLiteral": {"value": "0x10"}},
        {"CharacterLiteral": {"value": "z"}}
    ]"#;
    let nodes: Vec<Node> = serde_json::from_str(json).unwrap();
    let kinds: Vec<NodeKind> = nodes.iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        [NodeKind::StringLiteral, NodeKind::IntegerLiteral, NodeKind::CharacterLiteral]
    );
    assert_eq!(nodes[1].render(), "0x10");
}
