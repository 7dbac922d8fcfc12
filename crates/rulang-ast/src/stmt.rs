//! Statements and control flow.
//!
//! These nodes only describe structure. Selecting a branch or continuing a
//! loop is the interpreter's business.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{StructuralError, StructuralResult};
use crate::expr::VariableLiteral;
use crate::render::write_body;
use crate::types::TypeDeclaration;
use crate::{Identifier, Node};

/// Declaration with an explicit type: `var i int`, `var list List[int] = xs`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct VariableAssignment {
    pub variable: Identifier,
    #[serde(rename = "type")]
    pub ty: TypeDeclaration,
    pub value: Option<Box<Node>>,
}

impl VariableAssignment {
    pub fn new(variable: impl Into<Identifier>, ty: TypeDeclaration, value: Option<Node>) -> Self {
        Self {
            variable: variable.into(),
            ty,
            value: value.map(Box::new),
        }
    }
}

impl Display for VariableAssignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "var {} {}", self.variable, self.ty)?;
        match &self.value {
            Some(value) => write!(f, " = {value}"),
            None => Ok(()),
        }
    }
}

/// Declaration whose type is left for the checker to infer: `router := http.Default()`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct InferredVariableAssignment {
    pub variable: Identifier,
    pub value: Box<Node>,
}

impl InferredVariableAssignment {
    pub fn new(variable: impl Into<Identifier>, value: Node) -> Self {
        Self {
            variable: variable.into(),
            value: Box::new(value),
        }
    }
}

impl Display for InferredVariableAssignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.variable, self.value)
    }
}

/// One branch of an if/else chain. A block without a condition is the
/// trailing `else`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct ConditionalBlock {
    pub condition: Option<Box<Node>>,
    pub body: Vec<Node>,
}

impl ConditionalBlock {
    /// Build a block from the parser's `has_condition` flag and optional
    /// condition, which must agree.
    pub fn new(
        has_condition: bool,
        condition: Option<Node>,
        body: Vec<Node>,
    ) -> StructuralResult<Self> {
        match (has_condition, condition) {
            (true, Some(condition)) => Ok(Self::conditional(condition, body)),
            (false, None) => Ok(Self::otherwise(body)),
            (true, None) => StructuralError::ConditionalWithoutCondition.reject(),
            (false, Some(_)) => StructuralError::UnconditionalWithCondition.reject(),
        }
    }

    pub fn conditional(condition: Node, body: Vec<Node>) -> Self {
        Self {
            condition: Some(Box::new(condition)),
            body,
        }
    }

    pub fn otherwise(body: Vec<Node>) -> Self {
        Self {
            condition: None,
            body,
        }
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }
}

impl Display for ConditionalBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(condition) = &self.condition {
            write!(f, "if {condition} ")?;
        }
        write_body(f, &self.body)
    }
}

/// `if a { .. } else if b { .. } else { .. }`
///
/// Blocks are kept in evaluation order; the first matching condition wins.
/// At most one block is unconditional and it comes last.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
#[serde(try_from = "IfElseParts")]
pub struct IfElseStatement {
    blocks: Vec<ConditionalBlock>,
}

#[derive(Deserialize)]
struct IfElseParts {
    blocks: Vec<ConditionalBlock>,
}

impl TryFrom<IfElseParts> for IfElseStatement {
    type Error = StructuralError;

    fn try_from(parts: IfElseParts) -> StructuralResult<Self> {
        Self::new(parts.blocks)
    }
}

impl IfElseStatement {
    pub fn new(blocks: Vec<ConditionalBlock>) -> StructuralResult<Self> {
        if blocks.is_empty() {
            return StructuralError::EmptyConditionalChain.reject();
        }
        let len = blocks.len();
        if let Some(index) = blocks
            .iter()
            .position(|block| !block.has_condition())
            .filter(|&index| index != len - 1)
        {
            return StructuralError::MisplacedElse { index, len }.reject();
        }
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[ConditionalBlock] {
        &self.blocks
    }

    /// The trailing unconditional block, if any.
    pub fn else_block(&self) -> Option<&ConditionalBlock> {
        self.blocks.last().filter(|block| !block.has_condition())
    }
}

impl Display for IfElseStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 || !block.has_condition() {
                f.write_str(if i > 0 { " else " } else { "else " })?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// `while cond { .. }`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct WhileStatement {
    pub condition: Box<Node>,
    pub body: Vec<Node>,
}

impl WhileStatement {
    pub fn new(condition: Node, body: Vec<Node>) -> Self {
        Self {
            condition: Box::new(condition),
            body,
        }
    }
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "while {} ", self.condition)?;
        write_body(f, &self.body)
    }
}

/// Loop-bound names of a for-range statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub enum RangeBindings {
    /// `for v in xs`
    Value(VariableLiteral),
    /// `for i, v in xs`
    KeyValue([VariableLiteral; 2]),
}

impl RangeBindings {
    pub fn variables(&self) -> &[VariableLiteral] {
        match self {
            RangeBindings::Value(value) => std::slice::from_ref(value),
            RangeBindings::KeyValue(pair) => pair.as_slice(),
        }
    }
}

/// `for i, v in xs { .. }`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct ForRangeStatement {
    pub bindings: RangeBindings,
    pub iterator: Box<Node>,
    pub body: Vec<Node>,
}

impl ForRangeStatement {
    /// Build from the parsed variable list, which must hold 1 or 2 names.
    pub fn new(
        variables: Vec<VariableLiteral>,
        iterator: Node,
        body: Vec<Node>,
    ) -> StructuralResult<Self> {
        let found = variables.len();
        let mut variables = variables.into_iter();
        let bindings = match (variables.next(), variables.next(), variables.next()) {
            (Some(value), None, None) => RangeBindings::Value(value),
            (Some(key), Some(value), None) => RangeBindings::KeyValue([key, value]),
            _ => return StructuralError::RangeBindingCount { found }.reject(),
        };
        Ok(Self::with_bindings(bindings, iterator, body))
    }

    pub fn with_bindings(bindings: RangeBindings, iterator: Node, body: Vec<Node>) -> Self {
        Self {
            bindings,
            iterator: Box::new(iterator),
            body,
        }
    }

    pub fn variables(&self) -> &[VariableLiteral] {
        self.bindings.variables()
    }
}

impl Display for ForRangeStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("for ")?;
        crate::render::write_separated(f, self.variables(), ", ")?;
        write!(f, " in {} ", self.iterator)?;
        write_body(f, &self.body)
    }
}

/// Typed channel value: `chan int`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct ChannelDeclaration {
    #[serde(rename = "type")]
    pub ty: TypeDeclaration,
}

impl ChannelDeclaration {
    pub fn new(ty: TypeDeclaration) -> Self {
        Self { ty }
    }
}

impl Display for ChannelDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "chan {}", self.ty)
    }
}
