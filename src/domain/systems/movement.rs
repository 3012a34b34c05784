use crate::domain::geometry::overlaps;
use crate::domain::intent::{Controls, TickInput};
use crate::domain::state::SimEntity;
use crate::domain::tuning::MatchTuning;

/// Positions of every entity before this tick's moves, indexed like the entity slice.
pub type PreTickPositions = Vec<(f32, f32)>;

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Move the human entities one step from their held intents.
///
/// Both axes are resolved separately, horizontal first: every human applies its
/// horizontal step, then any colliding pair that moved on that axis is put back
/// to its pre-tick coordinate on that axis (both entities, not just the mover).
/// The vertical axis follows the same way, which lets a blocked entity slide.
///
/// Also latches facing and shield state from held intents. Returns the
/// pre-tick positions for the later computer contact pass.
pub fn resolve_movement(
    entities: &mut [SimEntity],
    input: &TickInput,
    tuning: &MatchTuning,
) -> PreTickPositions {
    let before: PreTickPositions = entities.iter().map(SimEntity::position).collect();

    let mut steps = vec![(0.0_f32, 0.0_f32); entities.len()];
    for (e, step) in entities.iter_mut().zip(steps.iter_mut()) {
        if !e.is_human() || e.is_defeated() {
            continue;
        }
        let controls = input.controls(e.slot);
        *step = held_step(e, controls, tuning);
    }

    apply_axis(entities, &steps, &before, Axis::Horizontal, tuning.arena.collision_margin);
    apply_axis(entities, &steps, &before, Axis::Vertical, tuning.arena.collision_margin);

    for e in entities.iter_mut() {
        if !e.is_human() || e.is_defeated() {
            continue;
        }
        let controls = input.controls(e.slot);
        e.shield_active = controls.shield;
        if let Some(facing) = controls.facing() {
            e.facing = facing;
        }
        e.clamp_to(&tuning.arena);
    }

    before
}

// Right overrides left and down overrides up when both are held.
fn held_step(e: &SimEntity, controls: &Controls, tuning: &MatchTuning) -> (f32, f32) {
    let speed = tuning.player.speed;
    let arena = &tuning.arena;
    let mut dx = 0.0;
    let mut dy = 0.0;

    if controls.left && e.x - speed >= 0.0 {
        dx = -speed;
    }
    if controls.right && e.x + speed <= e.max_x(arena) {
        dx = speed;
    }
    if controls.up && e.y - speed >= 0.0 {
        dy = -speed;
    }
    if controls.down && e.y + speed <= e.max_y(arena) {
        dy = speed;
    }
    (dx, dy)
}

fn apply_axis(
    entities: &mut [SimEntity],
    steps: &[(f32, f32)],
    before: &PreTickPositions,
    axis: Axis,
    margin: f32,
) {
    let delta = |i: usize| match axis {
        Axis::Horizontal => steps[i].0,
        Axis::Vertical => steps[i].1,
    };

    for (i, e) in entities.iter_mut().enumerate() {
        match axis {
            Axis::Horizontal => e.x += delta(i),
            Axis::Vertical => e.y += delta(i),
        }
    }

    // Collect first so every pair sees the same post-step positions.
    let mut rollback = vec![false; entities.len()];
    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            if !entities[i].is_human() || !entities[j].is_human() {
                continue;
            }
            if entities[i].is_defeated() || entities[j].is_defeated() {
                continue;
            }
            if delta(i) == 0.0 && delta(j) == 0.0 {
                continue;
            }
            if overlaps(&entities[i].rect(), &entities[j].rect(), margin) {
                rollback[i] = true;
                rollback[j] = true;
            }
        }
    }

    for (i, e) in entities.iter_mut().enumerate() {
        if !rollback[i] {
            continue;
        }
        match axis {
            Axis::Horizontal => e.x = before[i].0,
            Axis::Vertical => e.y = before[i].1,
        }
    }
}

/// Trio contact pass, run after the computer has moved.
///
/// Each live human that now touches a live computer entity is put back to its
/// pre-tick position together with that computer entity. Pairs are checked one
/// after another, so a later pair sees the earlier rollback.
pub fn resolve_computer_contacts(
    entities: &mut [SimEntity],
    before: &PreTickPositions,
    tuning: &MatchTuning,
) {
    let margin = tuning.arena.collision_margin;
    for h in 0..entities.len() {
        for c in 0..entities.len() {
            if !entities[h].is_human() || entities[c].is_human() {
                continue;
            }
            if entities[h].is_defeated() || entities[c].is_defeated() {
                continue;
            }
            if overlaps(&entities[h].rect(), &entities[c].rect(), margin) {
                entities[h].set_position(before[h]);
                entities[c].set_position(before[c]);
            }
        }
    }
}
