/// Gameplay tuning for arena participants, human or computer.
///
/// Keep this separate from runtime configuration (tick rates, buffer sizes, etc.).

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Step size in units per tick, for both held-key moves and the pursuit clamp.
    pub speed: f32,

    /// Bounding box width in units.
    pub width: f32,

    /// Bounding box height in units.
    pub height: f32,

    /// Starting and maximum health.
    pub max_health: i32,

    /// Starting and maximum shield.
    pub max_shield: i32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 5.0,
            width: 40.0,
            height: 40.0,
            max_health: 100,
            max_shield: 100,
        }
    }
}
