//! GridBot evaluator: executes learner programs against a grid world.
//!
//! The pipeline: parsed [`Program`] → [`Evaluator`] expands it into a
//! [`Plan`] of primitive moves under a step budget → a [`Run`] applies
//! the plan to a [`World`] one command per tick → the goal evaluator
//! compares the final snapshot to the active [`Challenge`].
//!
//! [`Program`]: gridbot_types::ast::Program

mod challenge;
mod dispatch;
mod env;
mod error;
mod evaluator;
mod goal;
mod run;
mod session;
mod world;

pub use challenge::{builtin_catalog, catalog_from_json, CatalogError, Challenge, Difficulty};
pub use dispatch::{dispatch, Command};
pub use env::Environment;
pub use error::EvalError;
pub use evaluator::{Evaluator, Plan, PlannedStep, DEFAULT_GAS_LIMIT, MAX_CALL_DEPTH};
pub use goal::{evaluate_goal, ExecutionResult};
pub use run::{Run, RunState, Tick};
pub use session::{Session, SessionContext, SessionTick};
pub use world::{BlockReason, MoveOutcome, World, WorldSnapshot};
