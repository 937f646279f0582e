//! Plan expansion: walks the AST and produces the ordered move plan.
//!
//! The evaluator is the structural half of the interpreter: it executes
//! repeats, conditionals, variables and function calls with an explicit
//! environment, and emits one [`PlannedStep`] per primitive move it
//! reaches. Gas metering bounds the expansion so a runaway repeat
//! truncates the plan instead of hanging.
//!
//! Nothing here fails a run. Name errors skip the offending statement;
//! limit errors stop expansion and mark the plan truncated.

use crate::dispatch::{dispatch, Command};
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use gridbot_types::ast::{
    BinOp, Block, CmpOp, Condition, Expr, ExprKind, Program, Stmt,
};
use gridbot_types::{DiagCode, Diagnostic, Diagnostics, Direction, SourceFile, Span};
use std::collections::BTreeMap;

/// Default step budget for plan expansion.
pub const DEFAULT_GAS_LIMIT: u64 = 100_000;

/// Maximum function-call nesting depth.
pub const MAX_CALL_DEPTH: u32 = 32;

/// One primitive move the plan will apply to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedStep {
    pub direction: Direction,
    /// The call that produced this step, for animation highlighting.
    pub span: Span,
}

/// The fully expanded move plan for one run.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Primitive moves in execution order.
    pub steps: Vec<PlannedStep>,
    /// True if expansion hit the gas or call-depth limit.
    pub truncated: bool,
    /// Number of statements skipped (unrecognized or unevaluable).
    pub skipped: usize,
    /// Diagnostics recorded during expansion.
    pub diagnostics: Diagnostics,
}

/// The plan-expanding evaluator.
pub struct Evaluator<'src> {
    /// Variable environment (scoped).
    env: Environment,
    /// Function table, hoisted from the program before execution.
    functions: BTreeMap<String, Block>,
    /// Gas counter — limits total work to keep repeats finite.
    gas: u64,
    /// Gas limit.
    gas_limit: u64,
    /// Current function-call nesting depth.
    call_depth: u32,
    /// Steps emitted so far.
    steps: Vec<PlannedStep>,
    /// Statements skipped so far.
    skipped: usize,
    /// Collected diagnostics.
    diagnostics: Diagnostics,
    /// Source file for diagnostic context.
    source_file: &'src SourceFile,
}

impl<'src> Evaluator<'src> {
    /// Create a new evaluator with the default gas limit.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self::with_gas_limit(source_file, DEFAULT_GAS_LIMIT)
    }

    /// Create with a custom gas limit.
    pub fn with_gas_limit(source_file: &'src SourceFile, gas_limit: u64) -> Self {
        Self {
            env: Environment::new(),
            functions: BTreeMap::new(),
            gas: 0,
            gas_limit,
            call_depth: 0,
            steps: Vec::new(),
            skipped: 0,
            diagnostics: Diagnostics::empty(),
            source_file,
        }
    }

    /// Expand a program into its move plan.
    pub fn plan(mut self, program: &Program) -> Plan {
        // Function definitions are hoisted: a call may appear above its
        // definition. Later definitions of the same name win.
        for stmt in &program.stmts {
            self.hoist(stmt);
        }

        let mut truncated = false;
        for stmt in &program.stmts {
            match self.exec_stmt(stmt) {
                Ok(()) => {}
                Err(EvalError::StepLimit) => {
                    self.diag(DiagCode::STEP_LIMIT_REACHED, "step limit reached", stmt.span());
                    truncated = true;
                    break;
                }
                Err(EvalError::CallDepthLimit) => {
                    self.diag(
                        DiagCode::RECURSION_LIMIT_REACHED,
                        format!("function calls nest deeper than {MAX_CALL_DEPTH} levels"),
                        stmt.span(),
                    );
                    truncated = true;
                    break;
                }
                // Name errors are absorbed at statement level; reaching
                // here would be an evaluator bug, so surface it loudly
                // in debug builds and skip in release.
                Err(other) => {
                    debug_assert!(false, "unabsorbed eval error: {other}");
                    self.skipped += 1;
                }
            }
        }

        Plan {
            steps: self.steps,
            truncated,
            skipped: self.skipped,
            diagnostics: self.diagnostics,
        }
    }

    // ── Gas ───────────────────────────────────────────────────────────────────

    /// Consume one unit of gas. Returns an error if exhausted.
    fn tick(&mut self) -> EvalResult<()> {
        self.gas += 1;
        if self.gas > self.gas_limit {
            Err(EvalError::StepLimit)
        } else {
            Ok(())
        }
    }

    // ── Statements ────────────────────────────────────────────────────────────

    /// Execute one statement. Only limit errors propagate.
    fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<()> {
        self.tick()?;
        match stmt {
            Stmt::Call(call) => self.exec_call(&call.name.name, call.span),
            Stmt::Let(let_stmt) => {
                match self.eval_expr(&let_stmt.value) {
                    Ok(value) => self.env.define(&let_stmt.name.name, value),
                    Err(err) => self.skip_stmt(let_stmt.span, &err),
                }
                Ok(())
            }
            Stmt::Assign(assign) => {
                match self.eval_expr(&assign.value) {
                    Ok(value) => {
                        if !self.env.set(&assign.name.name, value) {
                            self.skip_stmt(
                                assign.span,
                                &EvalError::UndefinedVariable(assign.name.name.clone()),
                            );
                        }
                    }
                    Err(err) => self.skip_stmt(assign.span, &err),
                }
                Ok(())
            }
            Stmt::Repeat(repeat) => {
                let count = match self.eval_expr(&repeat.count) {
                    Ok(n) => n.max(0),
                    Err(err) => {
                        self.skip_stmt(repeat.span, &err);
                        return Ok(());
                    }
                };
                for _ in 0..count {
                    self.exec_block(&repeat.body)?;
                }
                Ok(())
            }
            Stmt::If(if_stmt) => {
                match self.eval_condition(&if_stmt.condition) {
                    Ok(true) => self.exec_block(&if_stmt.then_block)?,
                    Ok(false) => {
                        if let Some(else_block) = &if_stmt.else_block {
                            self.exec_block(else_block)?;
                        }
                    }
                    Err(err) => self.skip_stmt(if_stmt.span, &err),
                }
                Ok(())
            }
            // Hoisted before execution; the definition line itself is a no-op.
            Stmt::FnDef(_) => Ok(()),
            // Already diagnosed by the parser.
            Stmt::Skipped(_) => {
                self.skipped += 1;
                Ok(())
            }
        }
    }

    /// Resolve a call: primitive move first, then the function table,
    /// then silent skip.
    fn exec_call(&mut self, name: &str, span: Span) -> EvalResult<()> {
        if let Some(Command::Move(direction)) = dispatch(name) {
            self.steps.push(PlannedStep { direction, span });
            return Ok(());
        }

        match self.functions.get(name).cloned() {
            Some(body) => {
                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(EvalError::CallDepthLimit);
                }
                self.call_depth += 1;
                let result = self.exec_block(&body);
                self.call_depth -= 1;
                result
            }
            None => {
                self.skip_stmt(span, &EvalError::UndefinedFunction(name.to_string()));
                Ok(())
            }
        }
    }

    /// Execute a block in a fresh scope.
    fn exec_block(&mut self, block: &Block) -> EvalResult<()> {
        self.env.push_scope();
        let result = (|| {
            for stmt in &block.stmts {
                self.exec_stmt(stmt)?;
            }
            Ok(())
        })();
        self.env.pop_scope();
        result
    }

    /// Collect function definitions, recursively, in source order.
    fn hoist(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FnDef(def) => {
                self.functions
                    .insert(def.name.name.clone(), def.body.clone());
                for inner in &def.body.stmts {
                    self.hoist(inner);
                }
            }
            Stmt::Repeat(repeat) => {
                for inner in &repeat.body.stmts {
                    self.hoist(inner);
                }
            }
            Stmt::If(if_stmt) => {
                for inner in &if_stmt.then_block.stmts {
                    self.hoist(inner);
                }
                if let Some(else_block) = &if_stmt.else_block {
                    for inner in &else_block.stmts {
                        self.hoist(inner);
                    }
                }
            }
            _ => {}
        }
    }

    // ── Expressions ───────────────────────────────────────────────────────────

    /// Evaluate an integer expression. Arithmetic saturates instead of
    /// wrapping so plans stay deterministic on pathological input.
    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<i64> {
        match &expr.kind {
            ExprKind::Number(n) => Ok(*n),
            ExprKind::Var(ident) => self
                .env
                .get(&ident.name)
                .ok_or_else(|| EvalError::UndefinedVariable(ident.name.clone())),
            ExprKind::Binary { left, op, right } => {
                let lhs = self.eval_expr(left)?;
                let rhs = self.eval_expr(right)?;
                Ok(match op {
                    BinOp::Add => lhs.saturating_add(rhs),
                    BinOp::Sub => lhs.saturating_sub(rhs),
                    BinOp::Mul => lhs.saturating_mul(rhs),
                })
            }
            ExprKind::Paren(inner) => self.eval_expr(inner),
        }
    }

    /// Evaluate an `if` condition.
    fn eval_condition(&mut self, condition: &Condition) -> EvalResult<bool> {
        let lhs = self.eval_expr(&condition.left)?;
        let rhs = self.eval_expr(&condition.right)?;
        Ok(match condition.op {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Ge => lhs >= rhs,
        })
    }

    // ── Skips & diagnostics ───────────────────────────────────────────────────

    /// Record a skipped statement with the name error that caused it.
    fn skip_stmt(&mut self, span: Span, err: &EvalError) {
        let code = match err {
            EvalError::UndefinedVariable(_) => DiagCode::UNDEFINED_VARIABLE,
            EvalError::UndefinedFunction(_) => DiagCode::UNDEFINED_FUNCTION,
            _ => DiagCode::UNRECOGNIZED_LINE,
        };
        self.diag(code, err.to_string(), span);
        self.skipped += 1;
    }

    fn diag(&mut self, code: DiagCode, message: impl Into<String>, span: Span) {
        let source_line = self
            .source_file
            .line(span.start_line)
            .unwrap_or("")
            .to_string();
        self.diagnostics.push(Diagnostic::new(
            &self.source_file.name,
            code,
            message,
            span,
            source_line,
        ));
    }
}
