// Gameplay tuning, kept apart from runtime configuration.

pub mod ai;
pub mod arena;
pub mod player;
pub mod projectile;

pub use ai::AiTuning;
pub use arena::ArenaTuning;
pub use player::PlayerTuning;
pub use projectile::ProjectileTuning;

/// Every tuning table a match needs, bundled so systems take one argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchTuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub ai: AiTuning,
}
