use crate::domain::events::SimEvent;
use crate::domain::geometry::{distance, overlaps};
use crate::domain::state::{Facing, MatchPhase, SimEntity};
use crate::domain::systems::projectiles::{self, ProjectileSet};
use crate::domain::tuning::MatchTuning;
use std::time::Duration;

/// Restore a computer entity's `fire_ready` once its cooldown deadline has passed.
pub fn refresh_fire_ready(e: &mut SimEntity, now: Duration) {
    if e.fire_ready {
        return;
    }
    if let Some(ready_at) = e.ready_at
        && now >= ready_at
    {
        e.fire_ready = true;
        e.ready_at = None;
    }
}

/// Nearest live human to the entity at `ai_index`, by center distance.
///
/// Ties go to the lowest slot: a later candidate must be strictly nearer to win.
pub fn select_target(entities: &[SimEntity], ai_index: usize) -> Option<usize> {
    let origin = entities.get(ai_index)?.center();

    let mut best = None;
    let mut best_dist = f32::MAX;
    for (i, e) in entities.iter().enumerate() {
        if i == ai_index || !e.is_human() || e.is_defeated() {
            continue;
        }
        let dist = distance(origin, e.center());
        if dist < best_dist {
            best_dist = dist;
            best = Some(i);
        }
    }
    best
}

/// One tick of pursuit and engagement for the computer entity at `ai_index`.
///
/// Moves toward the chosen target by `clamp(offset * gain, -speed, speed)` per
/// axis, backs off again if that move would touch the target, then fires when
/// the pre-move center distance is inside the engage range. A shot arms a
/// wall-clock cooldown through `ready_at`.
///
/// No live target means no-op.
pub fn update_ai(
    entities: &mut [SimEntity],
    ai_index: usize,
    projectiles: &mut ProjectileSet,
    phase: MatchPhase,
    now: Duration,
    tuning: &MatchTuning,
) -> Option<SimEvent> {
    let ai = entities.get(ai_index)?;
    if ai.is_human() || ai.is_defeated() {
        return None;
    }

    let target_index = select_target(entities, ai_index)?;
    let target = entities[target_index].rect();
    let (target_x, target_y) = target.center();

    let ai = &mut entities[ai_index];
    let (cx, cy) = ai.center();
    let diff_x = target_x - cx;
    let diff_y = target_y - cy;

    let speed = tuning.player.speed;
    let gain = tuning.ai.pursuit_gain;
    let before = ai.position();
    ai.x += (diff_x * gain).clamp(-speed, speed);
    ai.y += (diff_y * gain).clamp(-speed, speed);
    ai.clamp_to(&tuning.arena);

    // The pursuer never pushes its target around.
    if overlaps(&ai.rect(), &target, tuning.arena.collision_margin) {
        ai.set_position(before);
    }

    if let Some(facing) = Facing::toward(diff_x, diff_y) {
        ai.facing = facing;
    }

    let range = (diff_x * diff_x + diff_y * diff_y).sqrt();
    if range >= tuning.ai.engage_range {
        return None;
    }

    let event = projectiles::spawn_bullet(ai, projectiles, phase, tuning)?;
    ai.ready_at = Some(now + tuning.ai.fire_cooldown);
    Some(event)
}
