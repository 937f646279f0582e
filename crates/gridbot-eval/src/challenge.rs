//! Challenge definitions and the built-in catalog.
//!
//! A challenge bundles everything one lesson needs: the grid layout,
//! the goal cells, starter code, the reference solution and the ordered
//! hint list. Challenges are plain data and round-trip through JSON so
//! catalogs can also be loaded from files.

use gridbot_types::{Coord, Item, ItemKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Challenge difficulty tier, used for ordering and point scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// One lesson in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Stable identifier, unique within a catalog.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short learner-facing description of the goal.
    pub description: String,
    pub difficulty: Difficulty,
    /// Concepts the lesson introduces ("loops", "functions", ...).
    pub concepts: Vec<String>,
    /// Points awarded on first completion.
    pub points: u32,
    /// Code preloaded into the editor.
    pub starting_code: String,
    /// Reference solution, used by the fuzzy solution check.
    pub solution: String,
    /// Ordered hints, revealed one at a time.
    pub hints: Vec<String>,
    pub grid_width: i32,
    pub grid_height: i32,
    /// Goal cells. The first target is the one the goal evaluator checks.
    pub targets: Vec<Coord>,
    /// Decorative and goal items on the grid.
    pub items: Vec<Item>,
    /// Maximum accepted moves per run.
    pub move_budget: u32,
}

impl Challenge {
    /// The cell the actor must reach. Falls back to the origin for a
    /// challenge with no targets, which trivially succeeds.
    pub fn primary_target(&self) -> Coord {
        self.targets.first().copied().unwrap_or(Coord::ORIGIN)
    }
}

/// Errors loading a challenge catalog from JSON.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog contains duplicate challenge id: {0}")]
    DuplicateId(String),
}

/// Parse a catalog from a JSON array of challenges.
pub fn catalog_from_json(json: &str) -> Result<Vec<Challenge>, CatalogError> {
    let catalog: Vec<Challenge> = serde_json::from_str(json)?;
    for (i, challenge) in catalog.iter().enumerate() {
        if catalog[..i].iter().any(|c| c.id == challenge.id) {
            return Err(CatalogError::DuplicateId(challenge.id.clone()));
        }
    }
    Ok(catalog)
}

/// The built-in lesson progression.
pub fn builtin_catalog() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "move-basic".to_string(),
            title: "First Steps".to_string(),
            description: "Guide the robot to the star.".to_string(),
            difficulty: Difficulty::Beginner,
            concepts: vec!["sequencing".to_string()],
            points: 10,
            starting_code: "// Move the robot to the star!\n// Try: moveRight() and moveDown()\n"
                .to_string(),
            solution: "moveRight()\nmoveRight()\nmoveDown()\nmoveDown()\n".to_string(),
            hints: vec![
                "The star is 2 cells to the right and 2 cells down.".to_string(),
                "Each moveRight() moves the robot one cell.".to_string(),
                "You need two moveRight() and two moveDown() calls.".to_string(),
            ],
            grid_width: 5,
            grid_height: 5,
            targets: vec![Coord::new(2, 2)],
            items: vec![Item::new(Coord::new(2, 2), ItemKind::Star)],
            move_budget: 20,
        },
        Challenge {
            id: "loop-square".to_string(),
            title: "Going in Circles".to_string(),
            description: "Reach the far corner with a repeat loop.".to_string(),
            difficulty: Difficulty::Intermediate,
            concepts: vec!["loops".to_string()],
            points: 20,
            starting_code: "// Use repeat to avoid writing the same line 4 times\nrepeat 4 {\n\n}\n"
                .to_string(),
            solution: "repeat 4 {\nmoveRight()\nmoveDown()\n}\n".to_string(),
            hints: vec![
                "The star is at the opposite corner of the grid.".to_string(),
                "One right plus one down, four times over, gets you there.".to_string(),
                "Put moveRight() and moveDown() inside the repeat block.".to_string(),
            ],
            grid_width: 5,
            grid_height: 5,
            targets: vec![Coord::new(4, 4)],
            items: vec![Item::new(Coord::new(4, 4), ItemKind::Star)],
            move_budget: 20,
        },
        Challenge {
            id: "treasure-hunt".to_string(),
            title: "Treasure Hunt".to_string(),
            description: "Navigate past the rocks to the buried gem.".to_string(),
            difficulty: Difficulty::Intermediate,
            concepts: vec!["sequencing".to_string(), "loops".to_string()],
            points: 25,
            starting_code: "// The gem is hidden at the bottom of the map\n".to_string(),
            solution: "repeat 3 {\nmoveDown()\n}\nmoveRight()\nmoveRight()\nmoveRight()\n"
                .to_string(),
            hints: vec![
                "Head down first, then across.".to_string(),
                "Three moves down puts you level with the gem.".to_string(),
                "A repeat works for the downward leg; the rest can be plain calls.".to_string(),
            ],
            grid_width: 6,
            grid_height: 5,
            targets: vec![Coord::new(3, 3)],
            items: vec![
                Item::new(Coord::new(3, 3), ItemKind::Gem),
                Item::new(Coord::new(1, 1), ItemKind::Obstacle),
                Item::new(Coord::new(2, 2), ItemKind::Obstacle),
            ],
            move_budget: 25,
        },
        Challenge {
            id: "function-dance".to_string(),
            title: "Teach the Robot a Dance".to_string(),
            description: "Define a function and call it to reach the star.".to_string(),
            difficulty: Difficulty::Advanced,
            concepts: vec!["functions".to_string(), "loops".to_string()],
            points: 40,
            starting_code: "// Define a step() function, then call it\nfunction step() {\n\n}\n"
                .to_string(),
            solution: "function step() {\nmoveRight()\nmoveDown()\n}\nrepeat 3 {\nstep()\n}\n"
                .to_string(),
            hints: vec![
                "A function groups moves under a name you choose.".to_string(),
                "Put one moveRight() and one moveDown() inside step().".to_string(),
                "Calling step() three times lands on the star.".to_string(),
            ],
            grid_width: 5,
            grid_height: 5,
            targets: vec![Coord::new(3, 3)],
            items: vec![Item::new(Coord::new(3, 3), ItemKind::Star)],
            move_budget: 20,
        },
    ]
}
