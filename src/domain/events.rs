// Discrete simulation events, consumed by the audio layer and logs.

use crate::domain::state::PlayerSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    ShotFired {
        shooter: PlayerSlot,
        projectile_id: u64,
    },
    HitLanded {
        shooter: PlayerSlot,
        victim: PlayerSlot,
        health: i32,
        shield: i32,
    },
    ShieldBroken {
        slot: PlayerSlot,
    },
    MatchEnded {
        winners: Vec<PlayerSlot>,
    },
}
