//! AST node types for the GridBot learner language.
//!
//! Every node carries a [`Span`] so diagnostics can point back at the
//! learner's editor. The language is deliberately tiny: calls, integer
//! variables, counted repeats, conditionals and parameterless functions.
//! Lines the parser cannot make sense of become [`Stmt::Skipped`] — the
//! interpreter never rejects a program outright.

use crate::Span;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete learner program: a flat statement sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// `{ statements... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// One statement. A statement occupies a full line, except that block
/// bodies continue across lines until their closing `}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name()` or bare `name` — resolved by the command dispatcher at
    /// run time into a primitive move or a user function call.
    Call(CallStmt),
    /// `let x = expr`
    Let(LetStmt),
    /// `x = expr` (re-assignment of an existing binding)
    Assign(AssignStmt),
    /// `repeat count { body }`
    Repeat(RepeatStmt),
    /// `if a < b { ... } else { ... }`
    If(IfStmt),
    /// `function name() { body }`
    FnDef(FnDef),
    /// A line the parser could not understand — executes as a no-op.
    Skipped(SkippedStmt),
}

impl Stmt {
    /// The source span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Call(s) => s.span,
            Stmt::Let(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::Repeat(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::FnDef(s) => s.span,
            Stmt::Skipped(s) => s.span,
        }
    }
}

/// `name()` — a call statement. The callee may be one of the four
/// primitive moves or a user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub name: Ident,
    pub span: Span,
}

/// `let x = expr`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// `x = expr`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// `repeat count { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub count: Expr,
    pub body: Block,
    pub span: Span,
}

/// `if cond { then } [else { else }]`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Condition,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub span: Span,
}

/// `function name() { body }` — no parameters in this language.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub name: Ident,
    pub body: Block,
    pub span: Span,
}

/// A line preserved verbatim after the parser gave up on it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedStmt {
    pub raw: String,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An integer expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression kinds. All arithmetic is integer arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `42`
    Number(i64),
    /// `steps`
    Var(Ident),
    /// `a + b`, `a - b`, `a * b`
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// `( expr )`
    Paren(Box<Expr>),
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
}

/// A comparison between two expressions, used only in `if` headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: Expr,
    pub op: CmpOp,
    pub right: Expr,
    pub span: Span,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp() -> Span {
        Span::point(1, 1)
    }

    #[test]
    fn test_stmt_span_accessor() {
        let call = Stmt::Call(CallStmt {
            name: Ident::new("moveRight", sp()),
            span: Span::new(3, 1, 3, 11),
        });
        assert_eq!(call.span(), Span::new(3, 1, 3, 11));

        let skipped = Stmt::Skipped(SkippedStmt {
            raw: "???".into(),
            span: Span::point(7, 1),
        });
        assert_eq!(skipped.span(), Span::point(7, 1));
    }

    #[test]
    fn test_ident_new() {
        let ident = Ident::new("steps", sp());
        assert_eq!(ident.name, "steps");
    }
}
