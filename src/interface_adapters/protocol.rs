// Line protocol DTOs: control messages read from the input stream and frames
// written for the presentation and audio layers.

use crate::domain::{
    Controller, EntitySnapshot, Facing, PlayerSlot, ProjectileSnapshot, SimEvent,
};
use crate::use_cases::{MatchState, WorldUpdate};
use serde::{Deserialize, Serialize};

/// Frames written to the output stream, one JSON object per line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum FrameMessage {
    // Snapshot of the arena for a given tick.
    WorldUpdate(WorldUpdateDto),
    // High-level match state transitions (countdown, pause, end).
    MatchState(MatchStateDto),
}

/// Control messages read from the input stream, one JSON object per line.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ControlMessage {
    // Raw key transition; mapped to an intent by the key bindings.
    Key(KeyPayload),
    // Start the next round after a match has ended.
    Restart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeyPayload {
    pub key: String,
    #[serde(default = "default_pressed")]
    pub pressed: bool,
}

fn default_pressed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdateDto {
    pub tick: u64,
    pub mode: &'static str,
    pub entities: Vec<EntityStateDto>,
    pub projectiles: Vec<ProjectileStateDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cues: Vec<AudioCueDto>,
}

impl From<WorldUpdate> for WorldUpdateDto {
    fn from(update: WorldUpdate) -> Self {
        Self {
            tick: update.tick,
            mode: update.mode.as_str(),
            entities: update.entities.iter().map(EntityStateDto::from).collect(),
            projectiles: update
                .projectiles
                .iter()
                .map(ProjectileStateDto::from)
                .collect(),
            cues: update.events.iter().map(AudioCueDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityStateDto {
    pub slot: u8,
    pub name: String,
    pub computer: bool,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub shield: i32,
    pub shield_active: bool,
    pub shield_broken: bool,
    pub facing: &'static str,
}

impl From<&EntitySnapshot> for EntityStateDto {
    fn from(e: &EntitySnapshot) -> Self {
        Self {
            slot: slot_number(e.slot),
            name: e.name.to_string(),
            computer: e.controller == Controller::Computer,
            x: e.x,
            y: e.y,
            health: e.health,
            shield: e.shield,
            shield_active: e.shield_active,
            shield_broken: e.shield_broken,
            facing: facing_name(e.facing),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileStateDto {
    pub id: u64,
    pub owner: u8,
    pub x: f32,
    pub y: f32,
    pub dir_x: f32,
    pub dir_y: f32,
}

impl From<&ProjectileSnapshot> for ProjectileStateDto {
    fn from(p: &ProjectileSnapshot) -> Self {
        Self {
            id: p.id,
            owner: slot_number(p.owner),
            x: p.x,
            y: p.y,
            dir_x: p.dir_x,
            dir_y: p.dir_y,
        }
    }
}

/// Sound-worthy moments; the audio layer decides what to play.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum AudioCueDto {
    ShotFired { shooter: u8 },
    HitLanded { shooter: u8, victim: u8 },
    ShieldBroken { slot: u8 },
    MatchEnded { winners: Vec<u8> },
}

impl From<&SimEvent> for AudioCueDto {
    fn from(event: &SimEvent) -> Self {
        match event {
            SimEvent::ShotFired { shooter, .. } => AudioCueDto::ShotFired {
                shooter: slot_number(*shooter),
            },
            SimEvent::HitLanded {
                shooter, victim, ..
            } => AudioCueDto::HitLanded {
                shooter: slot_number(*shooter),
                victim: slot_number(*victim),
            },
            SimEvent::ShieldBroken { slot } => AudioCueDto::ShieldBroken {
                slot: slot_number(*slot),
            },
            SimEvent::MatchEnded { winners } => AudioCueDto::MatchEnded {
                winners: winners.iter().copied().map(slot_number).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MatchStateDto {
    Starting { in_seconds: u32 },
    Running,
    Paused,
    Ended { winners: Vec<u8>, scores: [u32; 3] },
}

impl From<MatchState> for MatchStateDto {
    fn from(state: MatchState) -> Self {
        match state {
            MatchState::Starting { in_seconds } => MatchStateDto::Starting { in_seconds },
            MatchState::Running => MatchStateDto::Running,
            MatchState::Paused => MatchStateDto::Paused,
            MatchState::Ended { winners, scores } => MatchStateDto::Ended {
                winners: winners.into_iter().map(slot_number).collect(),
                scores,
            },
        }
    }
}

// Slots are 1-based on the wire, matching the on-screen player numbers.
fn slot_number(slot: PlayerSlot) -> u8 {
    slot.index() as u8 + 1
}

fn facing_name(facing: Facing) -> &'static str {
    match facing {
        Facing::Up => "up",
        Facing::Down => "down",
        Facing::Left => "left",
        Facing::Right => "right",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_message_parses_with_default_pressed() {
        let msg: ControlMessage =
            serde_json::from_str(r#"{"type":"Key","data":{"key":"w"}}"#).expect("valid json");
        match msg {
            ControlMessage::Key(k) => {
                assert_eq!(k.key, "w");
                assert!(k.pressed);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn restart_message_has_no_payload() {
        let msg: ControlMessage =
            serde_json::from_str(r#"{"type":"Restart"}"#).expect("valid json");
        assert!(matches!(msg, ControlMessage::Restart));
    }

    #[test]
    fn match_state_frame_shape() {
        let frame = FrameMessage::MatchState(MatchStateDto::from(MatchState::Ended {
            winners: vec![PlayerSlot::One, PlayerSlot::Two],
            scores: [2, 1, 0],
        }));
        let value = serde_json::to_value(&frame).expect("serializable");
        assert_eq!(
            value,
            serde_json::json!({
                "type": "MatchState",
                "data": { "state": "ended", "winners": [1, 2], "scores": [2, 1, 0] }
            })
        );
    }

    #[test]
    fn audio_cues_are_tagged() {
        let cue = AudioCueDto::from(&SimEvent::ShieldBroken {
            slot: PlayerSlot::Three,
        });
        let value = serde_json::to_value(&cue).expect("serializable");
        assert_eq!(value, serde_json::json!({ "cue": "shield_broken", "slot": 3 }));
    }
}
