use crate::domain::events::SimEvent;
use crate::domain::geometry::contains_point;
use crate::domain::state::{MatchPhase, SimEntity, SimProjectile};
use crate::domain::systems::damage;
use crate::domain::tuning::MatchTuning;
use tracing::{debug, info};

/// Live projectiles in spawn order, plus the id counter.
pub struct ProjectileSet {
    pub live: Vec<SimProjectile>,
    next_id: u64,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self {
            live: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}

impl Default for ProjectileSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Fire one projectile from `firer` along its facing.
///
/// Refused (no side effects) unless the firer is ready, alive, and the match is
/// live. On success the firer's `fire_ready` flag is cleared.
pub fn spawn_bullet(
    firer: &mut SimEntity,
    projectiles: &mut ProjectileSet,
    phase: MatchPhase,
    tuning: &MatchTuning,
) -> Option<SimEvent> {
    if !firer.fire_ready || firer.is_defeated() || !phase.allows_fire() {
        return None;
    }

    let (x, y) = firer.center();
    let (dir_x, dir_y) = firer.facing.unit();
    let id = projectiles.next_id;
    projectiles.next_id += 1;

    projectiles.live.push(SimProjectile {
        id,
        owner: firer.slot,
        x,
        y,
        dir_x,
        dir_y,
        speed: tuning.projectile.speed,
    });
    firer.fire_ready = false;

    debug!(shooter = ?firer.slot, projectile_id = id, facing = ?firer.facing, "shot fired");
    Some(SimEvent::ShotFired {
        shooter: firer.slot,
        projectile_id: id,
    })
}

/// Move every projectile one tick, drop the ones that left the arena, and resolve hits.
///
/// Hits are resolved in spawn order; each projectile strikes at most one
/// entity (lowest slot first) and is consumed by it.
pub fn advance_bullets(
    entities: &mut [SimEntity],
    projectiles: &mut ProjectileSet,
    tuning: &MatchTuning,
) -> Vec<SimEvent> {
    let arena = &tuning.arena;
    let mut events = Vec::new();
    let mut survivors = Vec::with_capacity(projectiles.live.len());

    for mut p in projectiles.live.drain(..) {
        p.x += p.dir_x * p.speed;
        p.y += p.dir_y * p.speed;

        if p.x < 0.0 || p.x > arena.width || p.y < 0.0 || p.y > arena.height {
            continue;
        }

        let victim = entities.iter_mut().find(|e| {
            e.slot != p.owner
                && !e.is_defeated()
                && contains_point(&e.rect(), p.x, p.y, arena.collision_margin)
        });

        let Some(victim) = victim else {
            survivors.push(p);
            continue;
        };

        let outcome =
            damage::apply_damage(victim, tuning.projectile.damage, tuning.player.max_health);
        info!(
            victim = ?victim.slot,
            shooter = ?p.owner,
            projectile_id = p.id,
            victim_health = victim.health,
            victim_shield = victim.shield,
            "player hit"
        );
        events.push(SimEvent::HitLanded {
            shooter: p.owner,
            victim: victim.slot,
            health: victim.health,
            shield: victim.shield,
        });
        if outcome.shield_broken {
            info!(slot = ?victim.slot, "shield broken");
            events.push(SimEvent::ShieldBroken { slot: victim.slot });
        }
    }

    projectiles.live = survivors;
    events
}
