//! Quoted code.
//!
//! Symbols hold code fragments that are not executed where they appear.
//! A symbol is either written inline, bound to a name, received as a
//! parameter, or explicitly evaluated.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::render::write_body;
use crate::{Identifier, Node};

/// Inline quoted block: `quote { .. }`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct SymbolLiteral {
    pub body: Vec<Node>,
}

impl SymbolLiteral {
    pub fn new(body: Vec<Node>) -> Self {
        Self { body }
    }
}

impl Display for SymbolLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("quote ")?;
        write_body(f, &self.body)
    }
}

/// Named quoted block: `symbol name { .. }`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct SymbolDefinition {
    pub name: Identifier,
    pub body: Vec<Node>,
}

impl SymbolDefinition {
    pub fn new(name: impl Into<Identifier>, body: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

impl Display for SymbolDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "symbol {} ", self.name)?;
        write_body(f, &self.body)
    }
}

/// Reference to a symbol-typed parameter: `:name`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct SymbolArgument {
    pub name: Identifier,
}

impl SymbolArgument {
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self { name: name.into() }
    }
}

impl Display for SymbolArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)
    }
}

/// Forces evaluation of a bound symbol: `eval(:name)`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct SymbolEvaluation {
    pub name: Identifier,
}

impl SymbolEvaluation {
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self { name: name.into() }
    }
}

impl Display for SymbolEvaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "eval(:{})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::FunctionCall;
    use insta::assert_snapshot;

    #[test]
    fn test_symbol_rendering() {
        let log: Node = FunctionCall::free("log", vec![], vec![]).into();
        assert_snapshot!(SymbolLiteral::new(vec![log.clone()]), @"quote { log() }");
        assert_snapshot!(SymbolDefinition::new("trace", vec![log]), @"symbol trace { log() }");
        assert_snapshot!(SymbolArgument::new("block"), @":block");
        assert_snapshot!(SymbolEvaluation::new("block"), @"eval(:block)");
    }
}
