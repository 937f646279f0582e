//! Token types for the GridBot lexer.
//!
//! Defines [`TokenKind`] covering every lexeme in the learner language and
//! [`Token`], which pairs a kind with a source [`Span`].

use gridbot_types::Span;
use std::fmt;

/// All reserved identifiers in the learner language.
///
/// These cannot be used as variable or function names. The lexer
/// recognises each one and emits a specific keyword token instead of
/// [`TokenKind::Identifier`]. The four move calls are deliberately NOT
/// keywords — they are plain identifiers resolved by the dispatcher, so
/// an unrecognised call degrades to a silent skip instead of a lex error.
pub const ALL_KEYWORDS: &[&str] = &["let", "repeat", "if", "else", "function"];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the GridBot lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` if this token is a reserved keyword.
    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the learner language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals & identifiers ───────────────────────────────
    /// Integer literal: `42`
    Number(i64),
    /// User identifier: `moveRight`, `steps`, `zigzag`
    Identifier(String),

    // ── Keywords ─────────────────────────────────────────────
    /// `let`
    Let,
    /// `repeat`
    Repeat,
    /// `if`
    If,
    /// `else`
    Else,
    /// `function`
    Function,

    // ── Operators ────────────────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,
    /// `=`
    Eq,

    // ── Punctuation ──────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,

    // ── Special ──────────────────────────────────────────────
    /// Newline (statement separator)
    Newline,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Look up a reserved identifier. Returns `Some(kind)` for keywords,
    /// `None` for user identifiers.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "let" => TokenKind::Let,
            "repeat" => TokenKind::Repeat,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "function" => TokenKind::Function,
            _ => return None,
        })
    }

    /// Returns `true` if this token kind is a reserved keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Repeat
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Function
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Identifier(s) => f.write_str(s),
            TokenKind::Let => f.write_str("let"),
            TokenKind::Repeat => f.write_str("repeat"),
            TokenKind::If => f.write_str("if"),
            TokenKind::Else => f.write_str("else"),
            TokenKind::Function => f.write_str("function"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::BangEq => f.write_str("!="),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::LessEq => f.write_str("<="),
            TokenKind::GreaterEq => f.write_str(">="),
            TokenKind::Eq => f.write_str("="),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keyword_recognises_all() {
        for &kw in ALL_KEYWORDS {
            assert!(
                TokenKind::from_keyword(kw).is_some(),
                "from_keyword should recognise '{kw}'"
            );
        }
    }

    #[test]
    fn test_from_keyword_returns_none_for_identifiers() {
        // Move calls are identifiers, not keywords — the dispatcher owns them.
        let non_keywords = ["moveRight", "moveLeft", "moveUp", "moveDown", "steps", "LET"];
        for &name in &non_keywords {
            assert!(
                TokenKind::from_keyword(name).is_none(),
                "from_keyword should not recognise '{name}'"
            );
        }
    }

    #[test]
    fn test_is_keyword() {
        for &kw in ALL_KEYWORDS {
            let kind = TokenKind::from_keyword(kw).unwrap();
            assert!(kind.is_keyword());
        }
        assert!(!TokenKind::Identifier("moveUp".into()).is_keyword());
        assert!(!TokenKind::Number(3).is_keyword());
        assert!(!TokenKind::Newline.is_keyword());
    }

    #[test]
    fn test_token_construction() {
        let span = Span::new(1, 1, 1, 7);
        let token = Token::new(TokenKind::Repeat, span);
        assert_eq!(token.kind, TokenKind::Repeat);
        assert_eq!(token.span, span);
        assert!(token.is_keyword());
    }

    #[test]
    fn test_display_roundtrip_keywords() {
        for &kw in ALL_KEYWORDS {
            let kind = TokenKind::from_keyword(kw).unwrap();
            assert_eq!(kind.to_string(), kw);
        }
    }

    #[test]
    fn test_display_operators() {
        assert_eq!(TokenKind::EqEq.to_string(), "==");
        assert_eq!(TokenKind::BangEq.to_string(), "!=");
        assert_eq!(TokenKind::LessEq.to_string(), "<=");
        assert_eq!(TokenKind::Eq.to_string(), "=");
    }

    #[test]
    fn test_display_literals() {
        assert_eq!(TokenKind::Number(42).to_string(), "42");
        assert_eq!(TokenKind::Identifier("zigzag".into()).to_string(), "zigzag");
    }
}
