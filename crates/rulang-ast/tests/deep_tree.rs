//! Tree walking over nested control flow.
//!
//! Builds a function whose body holds a while loop, whose body holds an
//! if/else chain whose blocks make calls, and checks that the census sees
//! exactly the nodes that were constructed.

use insta::assert_snapshot;
use rulang_ast::{
    ArgumentDeclaration, ConditionalBlock, FunctionCall, FunctionDefinition, FunctionSignature,
    IfElseStatement, IntegerLiteral, Node, NodeKind, ReturnType, StringLiteral, TypeDeclaration,
    VariableLiteral, WhileStatement, census, node_paths,
};

fn var(name: &str) -> Node {
    VariableLiteral::new(name).into()
}

fn deep_function() -> Node {
    let chain = IfElseStatement::new(vec![
        ConditionalBlock::conditional(
            var("done"),
            vec![FunctionCall::free("stop", vec![], vec![]).into()],
        ),
        ConditionalBlock::conditional(
            var("retry"),
            vec![
                FunctionCall::method("log", "Print", vec![StringLiteral::new("again").into()], vec![])
                    .into(),
                FunctionCall::qualified("time", "Sleep", vec![IntegerLiteral::new("10").into()], vec![])
                    .into(),
            ],
        ),
        ConditionalBlock::otherwise(vec![
            FunctionCall::free("step", vec![var("n")], vec![]).into(),
        ]),
    ])
    .expect("valid chain");

    let body = vec![WhileStatement::new(var("running"), vec![chain.into()]).into()];
    let signature = FunctionSignature::new(
        "run",
        vec![],
        vec![ArgumentDeclaration::new("n", TypeDeclaration::named("int"))],
        ReturnType::none(),
    );
    FunctionDefinition::new(signature, body).into()
}

#[test]
fn test_census_matches_construction() {
    let root = deep_function();
    let census = census(&root);

    assert_eq!(census.count(NodeKind::FunctionDefinition), 1);
    assert_eq!(census.count(NodeKind::WhileStatement), 1);
    assert_eq!(census.count(NodeKind::IfElseStatement), 1);
    assert_eq!(census.count(NodeKind::FunctionCall), 4);
    // running, done, retry, n
    assert_eq!(census.count(NodeKind::VariableLiteral), 4);
    assert_eq!(census.count(NodeKind::StringLiteral), 1);
    assert_eq!(census.count(NodeKind::IntegerLiteral), 1);
    assert_eq!(census.total(), 13);
    assert_eq!(node_paths(&root).len(), census.total());
}

#[test]
fn test_deep_rendering() {
    assert_snapshot!(
        deep_function(),
        @r#"func run(n int) { while running { if done { stop() } else if retry { log.Print("again"); time::Sleep(10) } else { step(n) } } }"#
    );
}

#[test]
fn test_equal_trees_render_identically() {
    let a = deep_function();
    let b = deep_function();
    assert_eq!(a, b);
    assert_eq!(a.render(), b.render());
}
