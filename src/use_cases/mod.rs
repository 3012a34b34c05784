// Use cases layer: application workflows for the arena match.

pub mod game;
pub mod types;

pub use game::world_task;
pub use types::{GameEvent, MatchState, WorldSettings, WorldUpdate};
