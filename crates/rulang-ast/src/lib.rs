//! Abstract Syntax Tree (AST) types for Rulang.
//!
//! The AST is the contract between the parser, which builds trees, and the
//! passes that consume them (checker, interpreter, code generator). It is a
//! passive data model:
//!
//! - Every construct is a [`Node`], a closed sum type. [`Node::kind`] gives a
//!   constant-time tag and [`Node::render`] a deterministic textual form.
//! - Trees are built bottom-up and never mutated; each parent owns its
//!   children exclusively.
//! - Constructors that can receive an impossible shape return
//!   [`StructuralResult`]. Semantic validation (names, types, call arity) is
//!   left to later passes.
//! - Passes annotate nodes through [`SideTable`]s keyed by [`NodePath`]
//!   instead of mutating the tree.
//!
//! ## Example
//!
//! ```
//! use rulang_ast::{FunctionCall, Node, NodeKind, StringLiteral};
//!
//! let call: Node = FunctionCall::method(
//!     "router",
//!     "Run",
//!     vec![StringLiteral::new(":8080").into()],
//!     vec![],
//! )
//! .into();
//! assert_eq!(call.kind(), NodeKind::FunctionCall);
//! assert_eq!(call.render(), r#"router.Run(":8080")"#);
//! ```

mod decl;
mod error;
mod expr;
mod node;
mod path;
mod render;
mod stmt;
mod symbol;
mod types;
mod walk;

pub use decl::*;
pub use error::*;
pub use expr::*;
pub use node::*;
pub use path::*;
pub use stmt::*;
pub use symbol::*;
pub use types::*;
pub use walk::*;

pub type Identifier = String;
