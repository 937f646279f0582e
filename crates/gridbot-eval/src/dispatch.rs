//! The command dispatcher: the fixed vocabulary of recognized calls.
//!
//! Exactly four call names map to world mutations. Everything else
//! returns `None` and the caller decides what to do — the evaluator
//! tries the function table next, then skips silently.

use gridbot_types::Direction;

/// A world mutation request produced by a recognized call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the actor one cell.
    Move(Direction),
}

/// Match a call name against the fixed move vocabulary.
///
/// Matching is exact and case-sensitive, the same way the original
/// activity matched its block identifiers.
pub fn dispatch(name: &str) -> Option<Command> {
    let direction = match name {
        "moveUp" => Direction::Up,
        "moveDown" => Direction::Down,
        "moveLeft" => Direction::Left,
        "moveRight" => Direction::Right,
        _ => return None,
    };
    Some(Command::Move(direction))
}
