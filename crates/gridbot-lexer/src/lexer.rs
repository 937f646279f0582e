//! Character-level scanner — converts learner text to a token stream.
//!
//! Features:
//! - all learner-language tokens (5 keywords, operators, punctuation, integers)
//! - single-line comments stripped (`//`), including trailing comments
//! - newline-separated statements (no semicolons)
//! - recovery everywhere: an unexpected character records a diagnostic and
//!   is skipped, it never aborts the scan

use gridbot_types::{DiagCode, Diagnostic, Diagnostics, SourceFile, Span};

use crate::token::{Token, TokenKind};

/// The GridBot scanner.
///
/// Converts source text into a vector of [`Token`]s, collecting
/// diagnostics along the way. Scanning always runs to the end of input.
pub struct Lexer<'src> {
    /// The full source text as bytes.
    source: &'src [u8],
    /// Source file for diagnostic context.
    source_file: &'src SourceFile,
    /// File name (for diagnostics).
    file_name: &'src str,
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
    /// Collected diagnostics.
    diagnostics: Diagnostics,
}

/// Result of lexing: tokens + any diagnostics collected.
pub struct LexResult {
    /// The token stream (always ends with [`TokenKind::Eof`]).
    pub tokens: Vec<Token>,
    /// Diagnostics recorded during scanning.
    pub diagnostics: Diagnostics,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: source_file.source.as_bytes(),
            source_file,
            file_name: &source_file.name,
            pos: 0,
            line: 1,
            col: 1,
            diagnostics: Diagnostics::empty(),
        }
    }

    /// Lex the entire source into a token stream.
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();

        while !self.at_end() {
            if let Some(token) = self.scan_token() {
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof, self.current_span()));

        LexResult {
            tokens,
            diagnostics: self.diagnostics,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    fn emit_diagnostic(&mut self, code: DiagCode, message: impl Into<String>, span: Span) {
        let source_line = self
            .source_file
            .line(span.start_line)
            .unwrap_or("")
            .to_string();
        let diag = Diagnostic::new(self.file_name, code, message, span, source_line);
        self.diagnostics.push(diag);
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token. Returns `None` for skipped input (spaces,
    /// comments, stray characters).
    fn scan_token(&mut self) -> Option<Token> {
        let start_line = self.line;
        let start_col = self.col;

        let ch = self.advance()?;
        match ch {
            // Newline is a statement separator, not whitespace.
            b'\n' => Some(Token::new(
                TokenKind::Newline,
                Span::point(start_line, start_col),
            )),
            b' ' | b'\t' | b'\r' => None,

            b'/' if self.peek() == Some(b'/') => {
                // Comment — skip to end of line, keep the newline for the
                // next scan so statement separation survives.
                while let Some(c) = self.peek() {
                    if c == b'\n' {
                        break;
                    }
                    self.advance();
                }
                None
            }

            b'(' => Some(self.simple(TokenKind::LParen, start_line, start_col)),
            b')' => Some(self.simple(TokenKind::RParen, start_line, start_col)),
            b'{' => Some(self.simple(TokenKind::LBrace, start_line, start_col)),
            b'}' => Some(self.simple(TokenKind::RBrace, start_line, start_col)),
            b'+' => Some(self.simple(TokenKind::Plus, start_line, start_col)),
            b'-' => Some(self.simple(TokenKind::Minus, start_line, start_col)),
            b'*' => Some(self.simple(TokenKind::Star, start_line, start_col)),

            b'=' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    Some(self.simple(TokenKind::EqEq, start_line, start_col))
                } else {
                    Some(self.simple(TokenKind::Eq, start_line, start_col))
                }
            }
            b'!' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    Some(self.simple(TokenKind::BangEq, start_line, start_col))
                } else {
                    self.emit_diagnostic(
                        DiagCode::UNEXPECTED_TOKEN,
                        "unexpected character '!'",
                        Span::point(start_line, start_col),
                    );
                    None
                }
            }
            b'<' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    Some(self.simple(TokenKind::LessEq, start_line, start_col))
                } else {
                    Some(self.simple(TokenKind::Less, start_line, start_col))
                }
            }
            b'>' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    Some(self.simple(TokenKind::GreaterEq, start_line, start_col))
                } else {
                    Some(self.simple(TokenKind::Greater, start_line, start_col))
                }
            }

            b'0'..=b'9' => Some(self.scan_number(ch, start_line, start_col)),
            c if c.is_ascii_alphabetic() || c == b'_' => {
                Some(self.scan_identifier(c, start_line, start_col))
            }

            other => {
                self.emit_diagnostic(
                    DiagCode::UNEXPECTED_TOKEN,
                    format!("unexpected character '{}'", other as char),
                    Span::point(start_line, start_col),
                );
                None
            }
        }
    }

    fn simple(&self, kind: TokenKind, start_line: u32, start_col: u32) -> Token {
        Token::new(kind, self.span_from(start_line, start_col))
    }

    fn scan_number(&mut self, first: u8, start_line: u32, start_col: u32) -> Token {
        let mut text = String::new();
        text.push(first as char);
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c as char);
                self.advance();
            } else {
                break;
            }
        }
        let span = self.span_from(start_line, start_col);
        match text.parse::<i64>() {
            Ok(n) => Token::new(TokenKind::Number(n), span),
            Err(_) => {
                self.emit_diagnostic(
                    DiagCode::INVALID_NUMBER,
                    format!("number '{text}' is too large"),
                    span,
                );
                Token::new(TokenKind::Number(0), span)
            }
        }
    }

    fn scan_identifier(&mut self, first: u8, start_line: u32, start_col: u32) -> Token {
        let mut text = String::new();
        text.push(first as char);
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' {
                text.push(c as char);
                self.advance();
            } else {
                break;
            }
        }
        let span = self.span_from(start_line, start_col);
        match TokenKind::from_keyword(&text) {
            Some(kind) => Token::new(kind, span),
            None => Token::new(TokenKind::Identifier(text), span),
        }
    }
}
