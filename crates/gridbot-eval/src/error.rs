//! Evaluator-internal error types.
//!
//! These never reach the learner as failures: name errors make the
//! evaluator skip the offending statement, and limit errors truncate the
//! plan. They exist so the planner's internals can use `?` cleanly.

use thiserror::Error;

/// Errors raised while expanding a program into a move plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable was read before any binding defined it.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// A call matched neither a primitive move nor a defined function.
    #[error("undefined function: {0}")]
    UndefinedFunction(String),

    /// The step budget ran out while expanding the program.
    #[error("step limit reached")]
    StepLimit,

    /// Function calls nested deeper than the evaluator allows.
    #[error("call depth limit reached")]
    CallDepthLimit,
}

/// Result alias for evaluator internals.
pub type EvalResult<T> = Result<T, EvalError>;
