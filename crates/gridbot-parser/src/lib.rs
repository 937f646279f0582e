//! GridBot parser: converts a token stream into a [`Program`] AST.
//!
//! The parser never fails. A line it cannot understand becomes
//! [`Stmt::Skipped`] with a diagnostic attached, and parsing resumes on
//! the next line — the interpreter-side counterpart of the silent-skip
//! policy.
//!
//! [`Program`]: gridbot_types::ast::Program
//! [`Stmt::Skipped`]: gridbot_types::ast::Stmt

mod parse_expr;
mod parse_stmt;
mod parser;

pub use parser::{parse_source, ParseResult, Parser};
