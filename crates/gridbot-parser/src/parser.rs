//! Core parser infrastructure: token cursor, diagnostics, recovery.

use gridbot_lexer::token::{Token, TokenKind};
use gridbot_lexer::Lexer;
use gridbot_types::ast::Program;
use gridbot_types::{DiagCode, Diagnostic, Diagnostics, SourceFile, Span};

/// The GridBot parser.
///
/// Consumes a token stream produced by the lexer and builds an AST.
/// Recovery is per line: anything unparseable is recorded as a skipped
/// statement and the cursor resynchronizes at the next newline.
pub struct Parser<'src> {
    /// The token stream.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Source file for diagnostic context.
    source_file: &'src SourceFile,
    /// File name for diagnostics.
    file_name: String,
    /// Collected diagnostics.
    diagnostics: Diagnostics,
    /// Current block nesting depth (bounded to keep learner programs flat).
    pub(crate) block_depth: u32,
}

/// Maximum block nesting depth. Deeper nesting is skipped, not rejected.
pub(crate) const MAX_BLOCK_DEPTH: u32 = 8;

/// Result of parsing. A program is always produced.
pub struct ParseResult {
    pub program: Program,
    pub diagnostics: Diagnostics,
}

/// Lex and parse learner source in one call.
pub fn parse_source(source_file: &SourceFile) -> ParseResult {
    let lexed = Lexer::new(source_file).lex();
    let mut result = Parser::new(lexed.tokens, source_file).parse();
    let mut diagnostics = lexed.diagnostics;
    diagnostics.extend(result.diagnostics);
    result.diagnostics = diagnostics;
    result
}

impl<'src> Parser<'src> {
    /// Create a new parser from a token stream and source file.
    pub fn new(tokens: Vec<Token>, source_file: &'src SourceFile) -> Self {
        Self {
            tokens,
            pos: 0,
            file_name: source_file.name.clone(),
            source_file,
            diagnostics: Diagnostics::empty(),
            block_depth: 0,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream should end with Eof")
        })
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(1, 1)
        }
    }

    /// Returns the span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Look ahead by `n` tokens from current position.
    pub(crate) fn look_ahead(&self, n: usize) -> &TokenKind {
        let idx = self.pos + n;
        self.tokens
            .get(idx)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    // ── Newline Handling ──────────────────────────────────────────────────────

    /// Skip all consecutive newline tokens.
    pub(crate) fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Returns `true` if the current token ends a statement line:
    /// newline, closing brace, or end of input.
    pub(crate) fn at_line_end(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof
        )
    }

    // ── Diagnostics ───────────────────────────────────────────────────────────

    /// Record a diagnostic at a specific span.
    pub(crate) fn diag_at(&mut self, code: DiagCode, message: impl Into<String>, span: Span) {
        let source_line = self
            .source_file
            .line(span.start_line)
            .unwrap_or("")
            .to_string();
        let diag = Diagnostic::new(&self.file_name, code, message, span, source_line);
        self.diagnostics.push(diag);
    }

    /// The raw source text of a line, for `Stmt::Skipped`.
    pub(crate) fn raw_line(&self, line: u32) -> String {
        self.source_file
            .line(line)
            .map(|l| l.trim().to_string())
            .unwrap_or_default()
    }

    // ── Synchronization ───────────────────────────────────────────────────────

    /// Skip tokens until just past the next newline (or until Eof / a
    /// closing brace, which the enclosing block parser handles).
    pub(crate) fn synchronize(&mut self) {
        while !self.at_end() {
            match self.peek_kind() {
                TokenKind::Newline => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a `Program` AST.
    pub fn parse(mut self) -> ParseResult {
        self.skip_newlines();
        let start = self.current_span();
        let mut stmts = Vec::new();

        while !self.at_end() {
            // A stray closing brace at top level is junk, not a block end.
            if self.check(&TokenKind::RBrace) {
                let span = self.current_span();
                self.diag_at(
                    DiagCode::UNEXPECTED_TOKEN,
                    "unmatched '}'",
                    span,
                );
                self.advance();
                self.skip_newlines();
                continue;
            }
            stmts.push(self.parse_stmt());
            self.skip_newlines();
        }

        let span = stmts
            .iter()
            .fold(start, |acc, s| acc.merge(s.span()));

        ParseResult {
            program: Program { stmts, span },
            diagnostics: self.diagnostics,
        }
    }
}
