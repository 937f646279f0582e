//! Session orchestration: the one type a host embeds.
//!
//! A [`Session`] owns the challenge catalog, the learner's progress and
//! the active world/run pair, and wires the pipeline together: source
//! text → parse → plan → stepwise run → goal evaluation. Hints reveal
//! monotonically and completion points are awarded once per challenge.

use crate::challenge::{builtin_catalog, Challenge};
use crate::evaluator::{Evaluator, Plan};
use crate::goal::{evaluate_goal, ExecutionResult};
use crate::run::{Run, RunState, Tick};
use crate::world::{World, WorldSnapshot};
use gridbot_lexer::instruction_lines;
use gridbot_parser::parse_source;
use gridbot_types::SourceFile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// File name attached to learner source in diagnostics.
const LESSON_FILE: &str = "lesson.gb";

/// Persistent learner progress, serializable for storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Id of the selected challenge, if any.
    pub current: Option<String>,
    /// Ids of challenges completed at least once.
    pub completed: BTreeSet<String>,
    /// Total points earned.
    pub score: u32,
    /// Hints revealed for the current challenge.
    pub hints_revealed: usize,
}

/// What one session tick produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionTick {
    /// One command was applied to the world.
    Stepped(Tick),
    /// The run just ended; the goal has been evaluated.
    Finished(ExecutionResult),
    /// No run is active.
    Idle,
}

/// A learner's session over a challenge catalog.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Vec<Challenge>,
    ctx: SessionContext,
    world: Option<World>,
    run: Option<Run>,
    last_plan: Option<Plan>,
}

impl Session {
    /// Start a session over an explicit catalog.
    pub fn new(catalog: Vec<Challenge>) -> Self {
        Self {
            catalog,
            ctx: SessionContext::default(),
            world: None,
            run: None,
            last_plan: None,
        }
    }

    /// Start a session over the built-in lesson progression.
    pub fn with_builtin_catalog() -> Self {
        Self::new(builtin_catalog())
    }

    /// Resume a session from stored progress.
    pub fn resume(catalog: Vec<Challenge>, ctx: SessionContext) -> Self {
        let mut session = Self::new(catalog);
        let current = ctx.current.clone();
        session.ctx = ctx;
        if let Some(id) = current {
            // Rebuild the world; an in-flight run is not resumable.
            if let Some(challenge) = session.catalog.iter().find(|c| c.id == id) {
                session.world = Some(World::from_challenge(challenge));
            } else {
                session.ctx.current = None;
            }
        }
        session
    }

    // ── Catalog & progress ────────────────────────────────────────────────────

    pub fn catalog(&self) -> &[Challenge] {
        &self.catalog
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// The currently selected challenge.
    pub fn current_challenge(&self) -> Option<&Challenge> {
        let id = self.ctx.current.as_deref()?;
        self.catalog.iter().find(|c| c.id == id)
    }

    /// The world as the UI should draw it.
    pub fn world_snapshot(&self) -> Option<WorldSnapshot> {
        self.world.as_ref().map(World::snapshot)
    }

    /// Diagnostics and plan stats from the most recent `start_run`.
    pub fn last_plan(&self) -> Option<&Plan> {
        self.last_plan.as_ref()
    }

    // ── Challenge selection ───────────────────────────────────────────────────

    /// Select a challenge by id. Builds a fresh world, cancels any
    /// active run and resets the hint counter. Returns `false` for an
    /// unknown id, leaving the session untouched.
    pub fn select_challenge(&mut self, id: &str) -> bool {
        let Some(challenge) = self.catalog.iter().find(|c| c.id == id) else {
            return false;
        };
        self.world = Some(World::from_challenge(challenge));
        self.ctx.current = Some(challenge.id.clone());
        self.ctx.hints_revealed = 0;
        self.run = None;
        self.last_plan = None;
        true
    }

    /// Reset the current challenge: world back to its starting state,
    /// any active run cancelled. Progress and hints are kept.
    pub fn reset(&mut self) {
        self.run = None;
        if let (Some(world), Some(challenge)) = (
            self.world.as_mut(),
            self.ctx
                .current
                .as_deref()
                .and_then(|id| self.catalog.iter().find(|c| c.id == id)),
        ) {
            world.reset(challenge);
        }
    }

    // ── Running code ──────────────────────────────────────────────────────────

    /// Parse and plan the learner's source, then start a fresh run.
    ///
    /// The world is reset first so every run starts from the challenge's
    /// initial state. Starting a new run implicitly cancels any run still
    /// in flight. Returns `false` if no challenge is selected.
    pub fn start_run(&mut self, source: &str) -> bool {
        if self.ctx.current.is_none() || self.world.is_none() {
            return false;
        }
        self.reset();

        let source_file = SourceFile::new(LESSON_FILE, source);
        let parsed = parse_source(&source_file);
        let mut plan = Evaluator::new(&source_file).plan(&parsed.program);

        let mut diagnostics = parsed.diagnostics;
        diagnostics.extend(plan.diagnostics);
        plan.diagnostics = diagnostics;

        self.run = Some(Run::new(&plan));
        self.last_plan = Some(plan);
        true
    }

    /// Advance the active run by one command.
    ///
    /// After the last command, the next call evaluates the goal and
    /// returns [`SessionTick::Finished`] exactly once.
    pub fn tick(&mut self) -> SessionTick {
        let stepped = match (self.run.as_mut(), self.world.as_mut()) {
            (Some(run), Some(world)) => run.step(world),
            _ => return SessionTick::Idle,
        };
        match stepped {
            Some(tick) => SessionTick::Stepped(tick),
            None => match self.finish_run() {
                Some(result) => SessionTick::Finished(result),
                None => SessionTick::Idle,
            },
        }
    }

    /// Cancel the active run, keeping all committed world mutations.
    pub fn cancel_run(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.cancel();
        }
        self.run = None;
    }

    /// Whether a run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.state() == RunState::Running)
    }

    /// Run the learner's source to completion in one call.
    ///
    /// Convenience for hosts without an animation loop (and for tests).
    pub fn run_to_completion(&mut self, source: &str) -> Option<ExecutionResult> {
        if !self.start_run(source) {
            return None;
        }
        loop {
            match self.tick() {
                SessionTick::Stepped(_) => continue,
                SessionTick::Finished(result) => return Some(result),
                SessionTick::Idle => return None,
            }
        }
    }

    /// Evaluate the goal and record completion. Called when the queue
    /// drains; awards points only on a challenge's first completion.
    fn finish_run(&mut self) -> Option<ExecutionResult> {
        self.run = None;
        let snapshot = self.world.as_ref()?.snapshot();
        let challenge = self.current_challenge()?;
        let mut result = evaluate_goal(&snapshot, challenge);
        let id = challenge.id.clone();
        let points = challenge.points;
        if self.last_plan.as_ref().is_some_and(|plan| plan.truncated) {
            if let Some(message) = result.message.as_mut() {
                message.push_str(" Your program hit the step limit and was cut short.");
            }
        }
        if result.success && self.ctx.completed.insert(id) {
            self.ctx.score += points;
        }
        Some(result)
    }

    // ── Hints ─────────────────────────────────────────────────────────────────

    /// Reveal the next hint for the current challenge.
    ///
    /// Reveals are monotone: each call uncovers one more hint until the
    /// list is exhausted, then returns `None`. Already-revealed hints
    /// stay available through [`Session::revealed_hints`].
    pub fn reveal_hint(&mut self) -> Option<&str> {
        let challenge = self.current_challenge()?;
        if self.ctx.hints_revealed >= challenge.hints.len() {
            return None;
        }
        let index = self.ctx.hints_revealed;
        self.ctx.hints_revealed += 1;
        self.current_challenge()
            .map(|c| c.hints[index].as_str())
    }

    /// All hints revealed so far, in order.
    pub fn revealed_hints(&self) -> &[String] {
        match self.current_challenge() {
            Some(challenge) => {
                let end = self.ctx.hints_revealed.min(challenge.hints.len());
                &challenge.hints[..end]
            }
            None => &[],
        }
    }

    // ── Solution check ────────────────────────────────────────────────────────

    /// Fuzzy comparison of learner source against the reference solution.
    ///
    /// Both sides are reduced to their instruction lines, lowercased and
    /// stripped of all whitespace. The check passes when the learner's
    /// normalized lines start with the solution's normalized lines, so
    /// trailing experiments after a correct solution do not fail it.
    pub fn check_solution(&self, source: &str) -> bool {
        let Some(challenge) = self.current_challenge() else {
            return false;
        };
        let normalize = |text: &str| -> Vec<String> {
            instruction_lines(text)
                .into_iter()
                .map(|line| {
                    line.text
                        .chars()
                        .filter(|c| !c.is_whitespace())
                        .collect::<String>()
                        .to_lowercase()
                })
                .collect()
        };
        let learner = normalize(source);
        let solution = normalize(&challenge.solution);
        if solution.is_empty() {
            return false;
        }
        learner.len() >= solution.len() && learner[..solution.len()] == solution[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridbot_types::Coord;

    fn session_on(id: &str) -> Session {
        let mut session = Session::with_builtin_catalog();
        assert!(session.select_challenge(id));
        session
    }

    #[test]
    fn test_select_unknown_challenge_rejected() {
        let mut session = Session::with_builtin_catalog();
        assert!(!session.select_challenge("no-such-lesson"));
        assert!(session.current_challenge().is_none());
    }

    #[test]
    fn test_run_awards_points_once() {
        let mut session = session_on("move-basic");
        let source = "moveRight()\nmoveRight()\nmoveDown()\nmoveDown()\n";

        let result = session.run_to_completion(source).unwrap();
        assert!(result.success);
        assert_eq!(session.context().score, 10);
        assert!(session.context().completed.contains("move-basic"));

        // Solving again does not double-award.
        let again = session.run_to_completion(source).unwrap();
        assert!(again.success);
        assert_eq!(session.context().score, 10);
    }

    #[test]
    fn test_failed_run_awards_nothing() {
        let mut session = session_on("move-basic");
        let result = session.run_to_completion("moveDown()\n").unwrap();
        assert!(!result.success);
        assert_eq!(session.context().score, 0);
        assert!(session.context().completed.is_empty());
    }

    #[test]
    fn test_new_run_starts_from_initial_world() {
        let mut session = session_on("move-basic");
        session.run_to_completion("moveDown()\nmoveDown()\n").unwrap();
        assert_eq!(session.world_snapshot().unwrap().actor, Coord::new(0, 2));

        // The next run must not inherit the previous run's position.
        let result = session
            .run_to_completion("moveRight()\nmoveRight()\nmoveDown()\nmoveDown()\n")
            .unwrap();
        assert!(result.success);
    }

    #[test]
    fn test_start_run_cancels_run_in_flight() {
        let mut session = session_on("move-basic");
        assert!(session.start_run("moveRight()\nmoveRight()\nmoveRight()\n"));
        assert!(matches!(session.tick(), SessionTick::Stepped(_)));
        assert!(session.is_running());

        assert!(session.start_run("moveDown()\n"));
        assert!(matches!(session.tick(), SessionTick::Stepped(_)));
        match session.tick() {
            SessionTick::Finished(result) => {
                assert_eq!(result.world.actor, Coord::new(0, 1));
                assert_eq!(result.world.moves, 1);
            }
            other => panic!("expected finish, got {other:?}"),
        }
    }

    #[test]
    fn test_tick_without_run_is_idle() {
        let mut session = session_on("move-basic");
        assert_eq!(session.tick(), SessionTick::Idle);
    }

    #[test]
    fn test_finished_reported_exactly_once() {
        let mut session = session_on("move-basic");
        session.start_run("moveRight()\n");
        assert!(matches!(session.tick(), SessionTick::Stepped(_)));
        assert!(matches!(session.tick(), SessionTick::Finished(_)));
        assert_eq!(session.tick(), SessionTick::Idle);
    }

    #[test]
    fn test_hints_reveal_monotonically() {
        let mut session = session_on("move-basic");
        assert!(session.revealed_hints().is_empty());

        let first = session.reveal_hint().unwrap().to_string();
        assert_eq!(session.revealed_hints(), &[first.clone()]);

        session.reveal_hint().unwrap();
        session.reveal_hint().unwrap();
        assert_eq!(session.revealed_hints().len(), 3);

        // Exhausted: no further reveal, no regression.
        assert!(session.reveal_hint().is_none());
        assert_eq!(session.revealed_hints().len(), 3);
        assert_eq!(session.revealed_hints()[0], first);
    }

    #[test]
    fn test_selecting_challenge_resets_hints() {
        let mut session = session_on("move-basic");
        session.reveal_hint();
        session.reveal_hint();
        session.select_challenge("loop-square");
        assert!(session.revealed_hints().is_empty());
        assert_eq!(session.context().hints_revealed, 0);
    }

    #[test]
    fn test_check_solution_exact() {
        let session = session_on("move-basic");
        assert!(session.check_solution(
            "moveRight()\nmoveRight()\nmoveDown()\nmoveDown()\n"
        ));
    }

    #[test]
    fn test_check_solution_ignores_case_whitespace_comments() {
        let session = session_on("move-basic");
        let source = "// my answer\n  MOVERIGHT ( )\nmoveright()\n\nMoveDown()\nmovedown()\n";
        assert!(session.check_solution(source));
    }

    #[test]
    fn test_check_solution_allows_trailing_extras() {
        let session = session_on("move-basic");
        let source = "moveRight()\nmoveRight()\nmoveDown()\nmoveDown()\nmoveUp()\n";
        assert!(session.check_solution(source));
    }

    #[test]
    fn test_check_solution_rejects_wrong_order() {
        let session = session_on("move-basic");
        assert!(!session.check_solution(
            "moveDown()\nmoveDown()\nmoveRight()\nmoveRight()\n"
        ));
    }

    #[test]
    fn test_reset_restores_world_keeps_progress() {
        let mut session = session_on("move-basic");
        session
            .run_to_completion("moveRight()\nmoveRight()\nmoveDown()\nmoveDown()\n")
            .unwrap();
        assert_eq!(session.context().score, 10);

        session.reset();
        let snap = session.world_snapshot().unwrap();
        assert_eq!(snap.actor, Coord::ORIGIN);
        assert_eq!(snap.moves, 0);
        assert_eq!(session.context().score, 10);
    }

    #[test]
    fn test_resume_rebuilds_world() {
        let mut session = session_on("move-basic");
        session
            .run_to_completion("moveRight()\nmoveRight()\nmoveDown()\nmoveDown()\n")
            .unwrap();
        let ctx = session.context().clone();

        let resumed = Session::resume(builtin_catalog(), ctx);
        assert_eq!(resumed.context().score, 10);
        assert_eq!(resumed.world_snapshot().unwrap().actor, Coord::ORIGIN);
        assert_eq!(
            resumed.current_challenge().map(|c| c.id.as_str()),
            Some("move-basic")
        );
    }

    #[test]
    fn test_context_json_roundtrip() {
        let mut session = session_on("move-basic");
        session.reveal_hint();
        let json = serde_json::to_string(session.context()).unwrap();
        let back: SessionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, session.context());
    }
}
