// Use-case level inputs/outputs for the game loop.

use crate::domain::{EntitySnapshot, Intent, MatchMode, PlayerSlot, ProjectileSnapshot, SimEvent};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Held-state change of one participant's intent.
    Input {
        slot: PlayerSlot,
        intent: Intent,
        pressed: bool,
    },
    TogglePause,
    /// Start the next round once the current one has ended.
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchState {
    Starting { in_seconds: u32 },
    Running,
    Paused,
    Ended {
        winners: Vec<PlayerSlot>,
        scores: [u32; 3],
    },
}

#[derive(Debug, Clone)]
pub struct WorldUpdate {
    pub tick: u64,
    pub mode: MatchMode,
    pub entities: Vec<EntitySnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Discrete events raised during this tick, for the audio layer.
    pub events: Vec<SimEvent>,
}

/// Settings for one world task.
#[derive(Debug, Clone)]
pub struct WorldSettings {
    /// Fixed tick interval for the game loop.
    pub tick_interval: Duration,
    /// Countdown before the first round starts.
    pub countdown_seconds: u32,
}
