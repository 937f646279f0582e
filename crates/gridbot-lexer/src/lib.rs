//! GridBot lexer: converts learner text into a token stream.
//!
//! Two entry points, two granularities:
//! - [`lines::instruction_lines`] — the line splitter: ordered, trimmed,
//!   non-blank lines with comment lines removed. This is what the
//!   solution checker and the simplest callers consume.
//! - [`Lexer`] — the character-level scanner that feeds the parser.

pub mod lexer;
pub mod lines;
pub mod token;

pub use lexer::{LexResult, Lexer};
pub use lines::{instruction_lines, InstructionLine};
pub use token::{Token, TokenKind, ALL_KEYWORDS};
