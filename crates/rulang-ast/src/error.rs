//! Structural errors raised while constructing AST nodes.
//!
//! These cover shapes that cannot be represented at all (wrong operator
//! arity, a misplaced `else`, a method call without a receiver). Semantic
//! problems such as unresolved names or type mismatches are never reported
//! here; they belong to the passes that walk the tree.

use derive_more::{Display, Error};

use crate::Identifier;

/// Result type for validating constructors.
pub type StructuralResult<T> = Result<T, StructuralError>;

/// A node was built from inputs that do not form a valid shape.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum StructuralError {
    #[display("binary operator `{operation}` takes exactly 2 arguments, got {found}")]
    BinaryOperatorArity { operation: Identifier, found: usize },

    #[display("unary operator `{operation}` takes exactly 1 argument, got {found}")]
    UnaryOperatorArity { operation: Identifier, found: usize },

    #[display("conditional block is marked unconditional but carries a condition")]
    UnconditionalWithCondition,

    #[display("conditional block is marked conditional but has no condition")]
    ConditionalWithoutCondition,

    #[display("if/else chain has no blocks")]
    EmptyConditionalChain,

    #[display("unconditional block at position {index} must be the last of {len} blocks")]
    MisplacedElse { index: usize, len: usize },

    #[display("method call `{method}` requires a receiver variable")]
    MethodWithoutReceiver { method: Identifier },

    #[display("function call names no callee")]
    MissingCallee,

    #[display(
        "function call addressing is ambiguous (package: {package:?}, variable: {variable:?}, method: {method:?})"
    )]
    AmbiguousCallee {
        package: Option<Identifier>,
        variable: Option<Identifier>,
        method: Option<Identifier>,
    },

    #[display("duplicate field `{field}` in type `{type_name}`")]
    DuplicateField {
        type_name: Identifier,
        field: Identifier,
    },

    #[display("duplicate label `{label}` in enum `{enum_name}`")]
    DuplicateEnumeration {
        enum_name: Identifier,
        label: Identifier,
    },

    #[display("for-range binds 1 or 2 variables, got {found}")]
    RangeBindingCount { found: usize },
}

impl StructuralError {
    /// Log the rejection and hand the error back for propagation.
    pub(crate) fn reject<T>(self) -> StructuralResult<T> {
        tracing::debug!(error = %self, "rejected node construction");
        Err(self)
    }
}
