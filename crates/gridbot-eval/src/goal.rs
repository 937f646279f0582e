//! Goal evaluation: did the run solve the challenge?
//!
//! Pure read-only check over the final world snapshot. Success is
//! position-based: the actor stands on the challenge's primary target.
//! How it got there — detours, absorbed moves, skipped lines — does not
//! matter.

use crate::challenge::Challenge;
use crate::world::WorldSnapshot;
use serde::{Deserialize, Serialize};

/// The outcome of a finished run, as handed to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Whether the run solved the challenge.
    pub success: bool,
    /// The world as the run left it.
    pub world: WorldSnapshot,
    /// Learner-facing summary line, when there is something to say.
    pub message: Option<String>,
}

/// Compare a final snapshot against the challenge goal.
pub fn evaluate_goal(snapshot: &WorldSnapshot, challenge: &Challenge) -> ExecutionResult {
    let target = challenge.primary_target();
    let success = snapshot.actor == target;
    let message = if success {
        format!("You solved {} in {} moves!", challenge.title, snapshot.moves)
    } else {
        format!(
            "The robot stopped at {} but the goal is at {}. Try again!",
            snapshot.actor, target
        )
    };
    ExecutionResult {
        success,
        world: snapshot.clone(),
        message: Some(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::builtin_catalog;
    use crate::world::World;
    use gridbot_types::Direction;

    #[test]
    fn test_actor_on_target_succeeds() {
        let challenge = &builtin_catalog()[0];
        let mut world = World::from_challenge(challenge);
        world.step(Direction::Right);
        world.step(Direction::Right);
        world.step(Direction::Down);
        world.step(Direction::Down);
        let result = evaluate_goal(&world.snapshot(), challenge);
        assert!(result.success);
        assert!(result.message.unwrap().contains("4 moves"));
    }

    #[test]
    fn test_actor_off_target_fails() {
        let challenge = &builtin_catalog()[0];
        let world = World::from_challenge(challenge);
        let result = evaluate_goal(&world.snapshot(), challenge);
        assert!(!result.success);
        assert!(result.message.unwrap().contains("(2, 2)"));
    }

    #[test]
    fn test_result_carries_final_world() {
        let challenge = &builtin_catalog()[0];
        let mut world = World::from_challenge(challenge);
        world.step(Direction::Down);
        let result = evaluate_goal(&world.snapshot(), challenge);
        assert_eq!(result.world.moves, 1);
        assert_eq!(result.world, world.snapshot());
    }
}
