//! Expression and condition parsing.
//!
//! Integer expressions only: literals, variables, `+ - *` and parens.
//! Precedence is the usual two levels (`*` binds tighter than `+`/`-`).

use gridbot_lexer::token::TokenKind;
use gridbot_types::ast::{BinOp, CmpOp, Condition, Expr, ExprKind};

use crate::parser::Parser;

impl Parser<'_> {
    /// Parse an expression: `term (('+' | '-') term)*`
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            let span = left.span.merge(right.span);
            left = Expr {
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            };
        }
        Some(left)
    }

    /// Parse a term: `primary ('*' primary)*`
    fn parse_term(&mut self) -> Option<Expr> {
        let mut left = self.parse_primary()?;
        while self.check(&TokenKind::Star) {
            self.advance();
            let right = self.parse_primary()?;
            let span = left.span.merge(right.span);
            left = Expr {
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op: BinOp::Mul,
                    right: Box::new(right),
                },
                span,
            };
        }
        Some(left)
    }

    /// Parse a primary: number, variable, negated number, or parens.
    fn parse_primary(&mut self) -> Option<Expr> {
        match self.peek_kind().clone() {
            TokenKind::Number(n) => {
                let span = self.advance().span;
                Some(Expr {
                    kind: ExprKind::Number(n),
                    span,
                })
            }
            TokenKind::Minus => {
                let minus_span = self.advance().span;
                match self.peek_kind().clone() {
                    TokenKind::Number(n) => {
                        let span = minus_span.merge(self.advance().span);
                        Some(Expr {
                            kind: ExprKind::Number(-n),
                            span,
                        })
                    }
                    _ => None,
                }
            }
            TokenKind::Identifier(_) => {
                let ident = self.expect_identifier()?;
                let span = ident.span;
                Some(Expr {
                    kind: ExprKind::Var(ident),
                    span,
                })
            }
            TokenKind::LParen => {
                let open = self.advance().span;
                let inner = self.parse_expr()?;
                if !self.eat(&TokenKind::RParen) {
                    return None;
                }
                let span = open.merge(self.previous_span());
                Some(Expr {
                    kind: ExprKind::Paren(Box::new(inner)),
                    span,
                })
            }
            _ => None,
        }
    }

    /// Parse a condition: `expr cmp expr`.
    pub(crate) fn parse_condition(&mut self) -> Option<Condition> {
        let left = self.parse_expr()?;
        let op = match self.peek_kind() {
            TokenKind::EqEq => CmpOp::Eq,
            TokenKind::BangEq => CmpOp::Ne,
            TokenKind::Less => CmpOp::Lt,
            TokenKind::Greater => CmpOp::Gt,
            TokenKind::LessEq => CmpOp::Le,
            TokenKind::GreaterEq => CmpOp::Ge,
            _ => return None,
        };
        self.advance();
        let right = self.parse_expr()?;
        let span = left.span.merge(right.span);
        Some(Condition {
            left,
            op,
            right,
            span,
        })
    }
}
