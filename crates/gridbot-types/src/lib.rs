//! Shared types for the GridBot interpreter.
//!
//! This crate defines the AST node types, source spans, structured
//! diagnostics, and the grid primitives (coordinates, directions, items)
//! used across the lexer, parser and evaluator.

mod diagnostic;
mod grid;
mod span;
pub mod ast;

pub use diagnostic::{DiagCode, Diagnostic, DiagCategory, Diagnostics, Severity, MAX_DIAGNOSTICS};
pub use grid::{Coord, Direction, Item, ItemKind};
pub use span::{SourceFile, Span};
