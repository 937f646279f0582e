//! Stepwise run execution.
//!
//! A [`Run`] holds the expanded plan as a queue and applies exactly one
//! command per [`Run::step`] call. The host owns the pacing — it calls
//! `step` on whatever cadence its animation wants. Cancelling a run
//! discards the pending queue but keeps every mutation already
//! committed to the world.

use crate::evaluator::{Plan, PlannedStep};
use crate::world::{MoveOutcome, World};
use std::collections::VecDeque;

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Commands remain in the queue.
    Running,
    /// The queue is drained or the run was cancelled.
    Finished,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// The command that was applied.
    pub step: PlannedStep,
    /// How the world responded.
    pub outcome: MoveOutcome,
}

/// An in-flight execution of one plan.
#[derive(Debug, Clone)]
pub struct Run {
    queue: VecDeque<PlannedStep>,
    cancelled: bool,
}

impl Run {
    /// Start a run over an expanded plan.
    pub fn new(plan: &Plan) -> Self {
        Self {
            queue: plan.steps.iter().copied().collect(),
            cancelled: false,
        }
    }

    pub fn state(&self) -> RunState {
        if self.cancelled || self.queue.is_empty() {
            RunState::Finished
        } else {
            RunState::Running
        }
    }

    /// Commands still waiting to be applied.
    pub fn remaining(&self) -> usize {
        if self.cancelled {
            0
        } else {
            self.queue.len()
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Apply the next command to the world. Returns `None` once the run
    /// is finished or cancelled.
    pub fn step(&mut self, world: &mut World) -> Option<Tick> {
        if self.cancelled {
            return None;
        }
        let step = self.queue.pop_front()?;
        let outcome = world.step(step.direction);
        Some(Tick { step, outcome })
    }

    /// Stop the run. Pending commands are discarded; mutations already
    /// applied to the world stay.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.queue.clear();
    }

    /// Drive the run to completion synchronously. Returns the number of
    /// ticks applied.
    pub fn run_to_end(&mut self, world: &mut World) -> usize {
        let mut ticks = 0;
        while self.step(world).is_some() {
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::builtin_catalog;
    use gridbot_types::{Coord, Diagnostics, Direction, Span};

    fn plan_of(directions: &[Direction]) -> Plan {
        Plan {
            steps: directions
                .iter()
                .enumerate()
                .map(|(i, &direction)| PlannedStep {
                    direction,
                    span: Span::point(i as u32 + 1, 1),
                })
                .collect(),
            truncated: false,
            skipped: 0,
            diagnostics: Diagnostics::empty(),
        }
    }

    fn world() -> World {
        World::from_challenge(&builtin_catalog()[0])
    }

    #[test]
    fn test_one_command_per_tick() {
        let plan = plan_of(&[Direction::Right, Direction::Down]);
        let mut run = Run::new(&plan);
        let mut w = world();

        assert_eq!(run.state(), RunState::Running);
        let tick = run.step(&mut w).unwrap();
        assert_eq!(tick.outcome, MoveOutcome::Moved(Coord::new(1, 0)));
        assert_eq!(run.remaining(), 1);

        run.step(&mut w).unwrap();
        assert_eq!(run.state(), RunState::Finished);
        assert!(run.step(&mut w).is_none());
        assert_eq!(w.actor(), Coord::new(1, 1));
    }

    #[test]
    fn test_cancel_keeps_committed_moves() {
        let plan = plan_of(&[Direction::Right, Direction::Right, Direction::Right]);
        let mut run = Run::new(&plan);
        let mut w = world();

        run.step(&mut w);
        run.cancel();

        assert_eq!(run.state(), RunState::Finished);
        assert_eq!(run.remaining(), 0);
        assert!(run.is_cancelled());
        assert!(run.step(&mut w).is_none());
        // The one applied move survives.
        assert_eq!(w.actor(), Coord::new(1, 0));
        assert_eq!(w.moves(), 1);
    }

    #[test]
    fn test_run_to_end() {
        let plan = plan_of(&[
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
        ]);
        let mut run = Run::new(&plan);
        let mut w = world();
        assert_eq!(run.run_to_end(&mut w), 4);
        assert_eq!(w.actor(), Coord::new(2, 2));
        assert_eq!(run.state(), RunState::Finished);
    }

    #[test]
    fn test_blocked_tick_still_consumes_queue() {
        let plan = plan_of(&[Direction::Left, Direction::Down]);
        let mut run = Run::new(&plan);
        let mut w = world();

        let tick = run.step(&mut w).unwrap();
        assert!(matches!(tick.outcome, MoveOutcome::Blocked(_)));
        assert_eq!(run.remaining(), 1);
        assert_eq!(w.moves(), 0);
    }

    #[test]
    fn test_empty_plan_finishes_immediately() {
        let plan = plan_of(&[]);
        let mut run = Run::new(&plan);
        assert_eq!(run.state(), RunState::Finished);
    }
}
