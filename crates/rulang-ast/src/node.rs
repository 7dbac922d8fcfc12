//! The closed set of node shapes.
//!
//! Every syntactic construct is a `Node`. Consumers dispatch on the enum
//! directly (an exhaustive `match` is the downcast) or on the cheap
//! `NodeKind` tag.

use std::fmt::{self, Display, Formatter};

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::decl::{
    BinaryOperationDefinition, EnumDefinition, FunctionDefinition, Import, InterfaceDefinition,
    InterfaceImplementation, MacroDefinition, MacroImplementation, Package, TypeDefinition,
    UnaryOperationDefinition,
};
use crate::expr::{
    CharacterLiteral, FloatingPointLiteral, FunctionCall, FunctionLiteral, IntegerLiteral,
    StringInterpolationLiteral, StringLiteral, StructFieldLiteral, StructLiteral, VariableLiteral,
};
use crate::stmt::{
    ChannelDeclaration, ForRangeStatement, IfElseStatement, InferredVariableAssignment,
    VariableAssignment, WhileStatement,
};
use crate::symbol::{SymbolArgument, SymbolDefinition, SymbolEvaluation, SymbolLiteral};

/// A node of the syntax tree. Children are owned exclusively by their parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, From, Serialize, Deserialize, salsa::Update)]
pub enum Node {
    // === Declarations ===
    Package(Package),
    Import(Import),
    TypeDefinition(TypeDefinition),
    EnumDefinition(EnumDefinition),
    InterfaceDefinition(InterfaceDefinition),
    FunctionDefinition(FunctionDefinition),
    InterfaceImplementation(InterfaceImplementation),
    MacroDefinition(MacroDefinition),
    MacroImplementation(MacroImplementation),
    BinaryOperationDefinition(BinaryOperationDefinition),
    UnaryOperationDefinition(UnaryOperationDefinition),

    // === Literals and expressions ===
    StringLiteral(StringLiteral),
    IntegerLiteral(IntegerLiteral),
    FloatingPointLiteral(FloatingPointLiteral),
    CharacterLiteral(CharacterLiteral),
    StringInterpolationLiteral(StringInterpolationLiteral),
    VariableLiteral(VariableLiteral),
    StructLiteral(StructLiteral),
    StructFieldLiteral(StructFieldLiteral),
    FunctionLiteral(FunctionLiteral),
    FunctionCall(FunctionCall),

    // === Quoted code ===
    SymbolLiteral(SymbolLiteral),
    SymbolDefinition(SymbolDefinition),
    SymbolArgument(SymbolArgument),
    SymbolEvaluation(SymbolEvaluation),

    // === Statements ===
    VariableAssignment(VariableAssignment),
    InferredVariableAssignment(InferredVariableAssignment),
    IfElseStatement(IfElseStatement),
    WhileStatement(WhileStatement),
    ForRangeStatement(ForRangeStatement),
    ChannelDeclaration(ChannelDeclaration),
}

/// Tag identifying the shape of a `Node`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    Serialize,
    Deserialize,
    salsa::Update,
)]
pub enum NodeKind {
    Package,
    Import,
    TypeDefinition,
    EnumDefinition,
    InterfaceDefinition,
    FunctionDefinition,
    InterfaceImplementation,
    MacroDefinition,
    MacroImplementation,
    BinaryOperationDefinition,
    UnaryOperationDefinition,
    StringLiteral,
    IntegerLiteral,
    FloatingPointLiteral,
    CharacterLiteral,
    StringInterpolationLiteral,
    VariableLiteral,
    StructLiteral,
    StructFieldLiteral,
    FunctionLiteral,
    FunctionCall,
    SymbolLiteral,
    SymbolDefinition,
    SymbolArgument,
    SymbolEvaluation,
    VariableAssignment,
    InferredVariableAssignment,
    IfElseStatement,
    WhileStatement,
    ForRangeStatement,
    ChannelDeclaration,
}

impl NodeKind {
    pub const ALL: [NodeKind; 31] = [
        NodeKind::Package,
        NodeKind::Import,
        NodeKind::TypeDefinition,
        NodeKind::EnumDefinition,
        NodeKind::InterfaceDefinition,
        NodeKind::FunctionDefinition,
        NodeKind::InterfaceImplementation,
        NodeKind::MacroDefinition,
        NodeKind::MacroImplementation,
        NodeKind::BinaryOperationDefinition,
        NodeKind::UnaryOperationDefinition,
        NodeKind::StringLiteral,
        NodeKind::IntegerLiteral,
        NodeKind::FloatingPointLiteral,
        NodeKind::CharacterLiteral,
        NodeKind::StringInterpolationLiteral,
        NodeKind::VariableLiteral,
        NodeKind::StructLiteral,
        NodeKind::StructFieldLiteral,
        NodeKind::FunctionLiteral,
        NodeKind::FunctionCall,
        NodeKind::SymbolLiteral,
        NodeKind::SymbolDefinition,
        NodeKind::SymbolArgument,
        NodeKind::SymbolEvaluation,
        NodeKind::VariableAssignment,
        NodeKind::InferredVariableAssignment,
        NodeKind::IfElseStatement,
        NodeKind::WhileStatement,
        NodeKind::ForRangeStatement,
        NodeKind::ChannelDeclaration,
    ];

    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::Package
                | NodeKind::Import
                | NodeKind::TypeDefinition
                | NodeKind::EnumDefinition
                | NodeKind::InterfaceDefinition
                | NodeKind::FunctionDefinition
                | NodeKind::InterfaceImplementation
                | NodeKind::MacroDefinition
                | NodeKind::MacroImplementation
                | NodeKind::BinaryOperationDefinition
                | NodeKind::UnaryOperationDefinition
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            NodeKind::StringLiteral
                | NodeKind::IntegerLiteral
                | NodeKind::FloatingPointLiteral
                | NodeKind::CharacterLiteral
                | NodeKind::StringInterpolationLiteral
                | NodeKind::VariableLiteral
                | NodeKind::StructLiteral
                | NodeKind::StructFieldLiteral
                | NodeKind::FunctionLiteral
                | NodeKind::SymbolLiteral
        )
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Package(_) => NodeKind::Package,
            Node::Import(_) => NodeKind::Import,
            Node::TypeDefinition(_) => NodeKind::TypeDefinition,
            Node::EnumDefinition(_) => NodeKind::EnumDefinition,
            Node::InterfaceDefinition(_) => NodeKind::InterfaceDefinition,
            Node::FunctionDefinition(_) => NodeKind::FunctionDefinition,
            Node::InterfaceImplementation(_) => NodeKind::InterfaceImplementation,
            Node::MacroDefinition(_) => NodeKind::MacroDefinition,
            Node::MacroImplementation(_) => NodeKind::MacroImplementation,
            Node::BinaryOperationDefinition(_) => NodeKind::BinaryOperationDefinition,
            Node::UnaryOperationDefinition(_) => NodeKind::UnaryOperationDefinition,
            Node::StringLiteral(_) => NodeKind::StringLiteral,
            Node::IntegerLiteral(_) => NodeKind::IntegerLiteral,
            Node::FloatingPointLiteral(_) => NodeKind::FloatingPointLiteral,
            Node::CharacterLiteral(_) => NodeKind::CharacterLiteral,
            Node::StringInterpolationLiteral(_) => NodeKind::StringInterpolationLiteral,
            Node::VariableLiteral(_) => NodeKind::VariableLiteral,
            Node::StructLiteral(_) => NodeKind::StructLiteral,
            Node::StructFieldLiteral(_) => NodeKind::StructFieldLiteral,
            Node::FunctionLiteral(_) => NodeKind::FunctionLiteral,
            Node::FunctionCall(_) => NodeKind::FunctionCall,
            Node::SymbolLiteral(_) => NodeKind::SymbolLiteral,
            Node::SymbolDefinition(_) => NodeKind::SymbolDefinition,
            Node::SymbolArgument(_) => NodeKind::SymbolArgument,
            Node::SymbolEvaluation(_) => NodeKind::SymbolEvaluation,
            Node::VariableAssignment(_) => NodeKind::VariableAssignment,
            Node::InferredVariableAssignment(_) => NodeKind::InferredVariableAssignment,
            Node::IfElseStatement(_) => NodeKind::IfElseStatement,
            Node::WhileStatement(_) => NodeKind::WhileStatement,
            Node::ForRangeStatement(_) => NodeKind::ForRangeStatement,
            Node::ChannelDeclaration(_) => NodeKind::ChannelDeclaration,
        }
    }

    /// Canonical textual form, identical for structurally equal nodes.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Direct child nodes in source order.
    ///
    /// Conditions come before the body they guard. The functions of an
    /// interface implementation are not nodes themselves, so their bodies
    /// are flattened in declaration order.
    pub fn children(&self) -> Vec<&Node> {
        let mut children = Vec::new();
        match self {
            Node::Package(_)
            | Node::Import(_)
            | Node::TypeDefinition(_)
            | Node::EnumDefinition(_)
            | Node::InterfaceDefinition(_)
            | Node::MacroDefinition(_)
            | Node::StringLiteral(_)
            | Node::IntegerLiteral(_)
            | Node::FloatingPointLiteral(_)
            | Node::CharacterLiteral(_)
            | Node::StringInterpolationLiteral(_)
            | Node::VariableLiteral(_)
            | Node::SymbolArgument(_)
            | Node::SymbolEvaluation(_)
            | Node::ChannelDeclaration(_) => {}
            Node::FunctionDefinition(def) => children.extend(&def.body),
            Node::InterfaceImplementation(imp) => {
                for function in &imp.functions {
                    children.extend(&function.body);
                }
            }
            Node::MacroImplementation(imp) => children.extend(&imp.body),
            Node::BinaryOperationDefinition(op) => children.extend(&op.body),
            Node::UnaryOperationDefinition(op) => children.extend(&op.body),
            Node::StructLiteral(lit) => children.extend(&lit.values),
            Node::StructFieldLiteral(field) => children.push(field.value.as_ref()),
            Node::FunctionLiteral(lit) => children.extend(&lit.body),
            Node::FunctionCall(call) => children.extend(&call.arguments),
            Node::SymbolLiteral(sym) => children.extend(&sym.body),
            Node::SymbolDefinition(sym) => children.extend(&sym.body),
            Node::VariableAssignment(assign) => children.extend(assign.value.as_deref()),
            Node::InferredVariableAssignment(assign) => children.push(assign.value.as_ref()),
            Node::IfElseStatement(stmt) => {
                for block in stmt.blocks() {
                    children.extend(block.condition.as_deref());
                    children.extend(&block.body);
                }
            }
            Node::WhileStatement(stmt) => {
                children.push(stmt.condition.as_ref());
                children.extend(&stmt.body);
            }
            Node::ForRangeStatement(stmt) => {
                children.push(stmt.iterator.as_ref());
                children.extend(&stmt.body);
            }
        }
        children
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Package(n) => n.fmt(f),
            Node::Import(n) => n.fmt(f),
            Node::TypeDefinition(n) => n.fmt(f),
            Node::EnumDefinition(n) => n.fmt(f),
            Node::InterfaceDefinition(n) => n.fmt(f),
            Node::FunctionDefinition(n) => n.fmt(f),
            Node::InterfaceImplementation(n) => n.fmt(f),
            Node::MacroDefinition(n) => n.fmt(f),
            Node::MacroImplementation(n) => n.fmt(f),
            Node::BinaryOperationDefinition(n) => n.fmt(f),
            Node::UnaryOperationDefinition(n) => n.fmt(f),
            Node::StringLiteral(n) => n.fmt(f),
            Node::IntegerLiteral(n) => n.fmt(f),
            Node::FloatingPointLiteral(n) => n.fmt(f),
            Node::CharacterLiteral(n) => n.fmt(f),
            Node::StringInterpolationLiteral(n) => n.fmt(f),
            Node::VariableLiteral(n) => n.fmt(f),
            Node::StructLiteral(n) => n.fmt(f),
            Node::StructFieldLiteral(n) => n.fmt(f),
            Node::FunctionLiteral(n) => n.fmt(f),
            Node::FunctionCall(n) => n.fmt(f),
            Node::SymbolLiteral(n) => n.fmt(f),
            Node::SymbolDefinition(n) => n.fmt(f),
            Node::SymbolArgument(n) => n.fmt(f),
            Node::SymbolEvaluation(n) => n.fmt(f),
            Node::VariableAssignment(n) => n.fmt(f),
            Node::InferredVariableAssignment(n) => n.fmt(f),
            Node::IfElseStatement(n) => n.fmt(f),
            Node::WhileStatement(n) => n.fmt(f),
            Node::ForRangeStatement(n) => n.fmt(f),
            Node::ChannelDeclaration(n) => n.fmt(f),
        }
    }
}

/// Top-level nodes of one source file, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct SourceUnit {
    pub nodes: Vec<Node>,
}

impl SourceUnit {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Name declared by the first `package` node, if any.
    pub fn package(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::Package(package) => Some(package.name.as_str()),
            _ => None,
        })
    }
}

impl Display for SourceUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
