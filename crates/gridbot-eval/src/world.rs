//! The grid world state machine.
//!
//! Holds the actor position, grid bounds, item set and move counter, and
//! exposes guarded mutation: a move either commits (in bounds, under
//! budget) or is absorbed as a no-op. Out-of-bounds and over-budget
//! attempts are not errors.

use crate::challenge::Challenge;
use gridbot_types::{Coord, Direction, Item};
use serde::{Deserialize, Serialize};

/// Why a move did not commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The candidate cell lies outside the grid.
    OutOfBounds,
    /// The move budget for this run is exhausted.
    BudgetExhausted,
}

/// Outcome of a single move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The actor moved to the candidate cell.
    Moved(Coord),
    /// The attempt was absorbed; the actor did not move.
    Blocked(BlockReason),
}

/// A read-only copy of the world for rendering and goal evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub width: i32,
    pub height: i32,
    pub actor: Coord,
    pub items: Vec<Item>,
    pub moves: u32,
    pub move_budget: u32,
}

/// The mutable grid world.
///
/// Invariant: `0 <= actor.x < width` and `0 <= actor.y < height` at all
/// times. The move counter only grows during a run and resets with
/// [`World::reset`].
#[derive(Debug, Clone)]
pub struct World {
    width: i32,
    height: i32,
    actor: Coord,
    items: Vec<Item>,
    moves: u32,
    move_budget: u32,
}

impl World {
    /// Build a fresh world from a challenge's configuration.
    pub fn from_challenge(challenge: &Challenge) -> Self {
        Self {
            width: challenge.grid_width,
            height: challenge.grid_height,
            actor: Coord::ORIGIN,
            items: challenge.items.clone(),
            moves: 0,
            move_budget: challenge.move_budget,
        }
    }

    /// Attempt one move. Commits and counts the move iff the candidate
    /// cell is in bounds and the budget is not exhausted; otherwise the
    /// attempt is silently absorbed.
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        if self.moves >= self.move_budget {
            return MoveOutcome::Blocked(BlockReason::BudgetExhausted);
        }
        let candidate = self.actor.offset(direction);
        if !self.contains(candidate) {
            return MoveOutcome::Blocked(BlockReason::OutOfBounds);
        }
        self.actor = candidate;
        self.moves += 1;
        MoveOutcome::Moved(candidate)
    }

    /// Reinitialize from a challenge: actor at the origin, items and
    /// counter per the challenge. Deterministic.
    pub fn reset(&mut self, challenge: &Challenge) {
        *self = World::from_challenge(challenge);
    }

    /// Is a coordinate inside the grid?
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Current actor position.
    pub fn actor(&self) -> Coord {
        self.actor
    }

    /// Accepted moves so far in this run.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// A read-only snapshot for rendering and goal evaluation.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            width: self.width,
            height: self.height,
            actor: self.actor,
            items: self.items.clone(),
            moves: self.moves,
            move_budget: self.move_budget,
        }
    }
}
