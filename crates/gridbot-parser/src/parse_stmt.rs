//! Statement parsing: calls, bindings, repeats, conditionals, functions.

use gridbot_lexer::token::TokenKind;
use gridbot_types::ast::{
    AssignStmt, Block, CallStmt, FnDef, Ident, IfStmt, LetStmt, RepeatStmt, SkippedStmt, Stmt,
};
use gridbot_types::{DiagCode, Span};

use crate::parser::{Parser, MAX_BLOCK_DEPTH};

impl Parser<'_> {
    /// Parse one statement. Never fails: unparseable input becomes
    /// [`Stmt::Skipped`] and the cursor resynchronizes at the next line.
    pub(crate) fn parse_stmt(&mut self) -> Stmt {
        let start = self.current_span();

        let parsed = match self.peek_kind() {
            TokenKind::Let => self.parse_let(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::If => self.parse_if(),
            TokenKind::Function => self.parse_fn_def(),
            TokenKind::Identifier(_) => self.parse_assign_or_call(),
            _ => None,
        };

        match parsed {
            Some(stmt) => self.end_line(stmt, start),
            None => self.skip_line(start),
        }
    }

    // ── Simple statements ─────────────────────────────────────────────────────

    /// `let name = expr`
    fn parse_let(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `let`
        let name = self.expect_identifier()?;
        if !self.eat(&TokenKind::Eq) {
            return None;
        }
        let value = self.parse_expr()?;
        let span = start.merge(value.span);
        Some(Stmt::Let(LetStmt { name, value, span }))
    }

    /// `name = expr`, `name()`, or bare `name`.
    fn parse_assign_or_call(&mut self) -> Option<Stmt> {
        match self.look_ahead(1) {
            TokenKind::Eq => {
                let name = self.expect_identifier()?;
                self.advance(); // `=`
                let value = self.parse_expr()?;
                let span = name.span.merge(value.span);
                Some(Stmt::Assign(AssignStmt { name, value, span }))
            }
            TokenKind::LParen => {
                let name = self.expect_identifier()?;
                self.advance(); // `(`
                if !self.eat(&TokenKind::RParen) {
                    return None;
                }
                let span = name.span.merge(self.previous_span());
                Some(Stmt::Call(CallStmt { name, span }))
            }
            // Bare call: `moveRight` on a line of its own.
            TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof => {
                let name = self.expect_identifier()?;
                let span = name.span;
                Some(Stmt::Call(CallStmt { name, span }))
            }
            _ => None,
        }
    }

    // ── Block statements ──────────────────────────────────────────────────────

    /// `repeat count { body }`
    fn parse_repeat(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `repeat`
        let count = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Stmt::Repeat(RepeatStmt { count, body, span }))
    }

    /// `if a < b { ... } [else { ... }]`
    fn parse_if(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `if`
        let condition = self.parse_condition()?;
        let then_block = self.parse_block()?;

        let else_block = if self.eat(&TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        let span = start.merge(
            else_block
                .as_ref()
                .map(|b| b.span)
                .unwrap_or(then_block.span),
        );
        Some(Stmt::If(IfStmt {
            condition,
            then_block,
            else_block,
            span,
        }))
    }

    /// `function name() { body }`
    fn parse_fn_def(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `function`
        let name = self.expect_identifier()?;
        if !self.eat(&TokenKind::LParen) || !self.eat(&TokenKind::RParen) {
            return None;
        }
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Stmt::FnDef(FnDef { name, body, span }))
    }

    /// `{ stmts... }` — the opening brace must end its line; the closing
    /// brace sits on its own line (possibly followed by `else {`).
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        if self.block_depth >= MAX_BLOCK_DEPTH {
            let span = self.current_span();
            self.diag_at(
                DiagCode::BLOCK_TOO_DEEP,
                format!("blocks nest deeper than {MAX_BLOCK_DEPTH} levels"),
                span,
            );
            return None;
        }

        let open = self.current_span();
        if !self.eat(&TokenKind::LBrace) {
            return None;
        }
        self.block_depth += 1;
        self.skip_newlines();

        let mut stmts = Vec::new();
        let close;
        loop {
            if self.eat(&TokenKind::RBrace) {
                close = self.previous_span();
                break;
            }
            if self.at_end() {
                // Tolerated: the block simply ends at Eof.
                self.diag_at(DiagCode::UNCLOSED_BLOCK, "block is never closed", open);
                close = self.current_span();
                break;
            }
            stmts.push(self.parse_stmt());
            self.skip_newlines();
        }

        self.block_depth -= 1;
        Some(Block {
            stmts,
            span: open.merge(close),
        })
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Expect an identifier token.
    pub(crate) fn expect_identifier(&mut self) -> Option<Ident> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                Some(Ident::new(name, span))
            }
            _ => None,
        }
    }

    /// A statement must consume its whole line. If trailing junk
    /// remains, the entire line degrades to a skip.
    fn end_line(&mut self, stmt: Stmt, start: Span) -> Stmt {
        if self.at_line_end() {
            stmt
        } else {
            self.skip_line(start)
        }
    }

    /// Record a skipped line and resynchronize at the next newline.
    fn skip_line(&mut self, start: Span) -> Stmt {
        let raw = self.raw_line(start.start_line);
        self.diag_at(
            DiagCode::UNRECOGNIZED_LINE,
            format!("line is not a recognized instruction: '{raw}'"),
            start,
        );
        self.synchronize();
        Stmt::Skipped(SkippedStmt { raw, span: start })
    }
}
