use crate::domain::{MatchMode, SetupError};
use std::{env, time::Duration};

// Runtime constants and environment lookups (not gameplay tuning).

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const WORLD_BROADCAST_CAPACITY: usize = 128;

pub const DEFAULT_TICK_MILLIS: u64 = 16;
pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;

/// Match mode from `ARENA_MODE`; duo when unset.
pub fn match_mode() -> Result<MatchMode, SetupError> {
    match env::var("ARENA_MODE") {
        Ok(value) => value.parse(),
        Err(_) => Ok(MatchMode::Duo),
    }
}

/// Custom display name for the second participant, if any.
pub fn player_two_name() -> Option<String> {
    env::var("ARENA_PLAYER_TWO_NAME")
        .ok()
        .filter(|name| !name.is_empty())
}

pub fn tick_interval() -> Duration {
    let millis = env::var("ARENA_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .unwrap_or(DEFAULT_TICK_MILLIS);
    Duration::from_millis(millis)
}

pub fn countdown_seconds() -> u32 {
    env::var("ARENA_COUNTDOWN_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_COUNTDOWN_SECS)
}
