use std::time::Duration;

/// Fixed parameters of the computer-controlled pursuer.

#[derive(Debug, Clone, Copy)]
pub struct AiTuning {
    /// Fraction of the remaining center offset covered per tick, before clamping.
    pub pursuit_gain: f32,

    /// Center distance below which the pursuer opens fire.
    pub engage_range: f32,

    /// Wall-clock delay between two computer shots.
    pub fire_cooldown: Duration,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            pursuit_gain: 0.3,
            engage_range: 300.0,
            fire_cooldown: Duration::from_millis(50),
        }
    }
}
