//! Tooling around the Rulang syntax tree.
//!
//! Serialized trees are loaded into a salsa database as [`SourceTree`]
//! inputs. Decoding, rendering and the kind census are tracked queries, so
//! they are recomputed only when the underlying text changes.

pub mod database;
pub mod diagnostics;
pub mod pipeline;

pub use database::{RulangDatabaseImpl, SourceTree};
pub use diagnostics::{Diagnostic, DiagnosticPhase, DiagnosticSeverity};
pub use rulang_ast as ast;
