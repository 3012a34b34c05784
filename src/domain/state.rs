// Domain-level simulation entities and snapshot types.

use crate::domain::errors::SetupError;
use crate::domain::geometry::Rect;
use crate::domain::tuning::{ArenaTuning, PlayerTuning};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Fixed participant slot. Entities are always stored in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerSlot {
    One,
    Two,
    Three,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 3] = [PlayerSlot::One, PlayerSlot::Two, PlayerSlot::Three];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
            PlayerSlot::Three => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Human,
    Computer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Unit vector in screen coordinates (+y points down).
    pub fn unit(self) -> (f32, f32) {
        match self {
            Facing::Up => (0.0, -1.0),
            Facing::Down => (0.0, 1.0),
            Facing::Left => (-1.0, 0.0),
            Facing::Right => (1.0, 0.0),
        }
    }

    /// Dominant axis of `(dx, dy)`; horizontal wins ties. `None` for a zero vector.
    pub fn toward(dx: f32, dy: f32) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(if dx < 0.0 { Facing::Left } else { Facing::Right })
        } else {
            Some(if dy < 0.0 { Facing::Up } else { Facing::Down })
        }
    }
}

/// Participation mode, chosen once before the match starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Two humans.
    Duo,
    /// One human against the computer.
    Solo,
    /// Two humans against the computer.
    Trio,
}

impl MatchMode {
    /// Slots in play and who drives them.
    pub fn roster(self) -> &'static [(PlayerSlot, Controller)] {
        match self {
            MatchMode::Duo => &[
                (PlayerSlot::One, Controller::Human),
                (PlayerSlot::Two, Controller::Human),
            ],
            MatchMode::Solo => &[
                (PlayerSlot::One, Controller::Human),
                (PlayerSlot::Two, Controller::Computer),
            ],
            MatchMode::Trio => &[
                (PlayerSlot::One, Controller::Human),
                (PlayerSlot::Two, Controller::Human),
                (PlayerSlot::Three, Controller::Computer),
            ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Duo => "duo",
            MatchMode::Solo => "solo",
            MatchMode::Trio => "trio",
        }
    }
}

impl FromStr for MatchMode {
    type Err = SetupError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "duo" => Ok(MatchMode::Duo),
            "solo" => Ok(MatchMode::Solo),
            "trio" => Ok(MatchMode::Trio),
            _ => Err(SetupError::UnknownMode(value.to_string())),
        }
    }
}

/// Coarse match phase as seen by the systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Running,
    Paused,
    Ended,
}

impl MatchPhase {
    /// Shots may only be spawned while the match is running and not paused.
    pub fn allows_fire(self) -> bool {
        matches!(self, MatchPhase::Running)
    }
}

pub struct SimEntity {
    pub slot: PlayerSlot,
    pub controller: Controller,
    pub name: Arc<str>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    // Combat state.
    pub health: i32,
    pub shield: i32,
    pub shield_active: bool,
    pub shield_broken: bool,

    pub facing: Facing,
    pub fire_ready: bool,
    // Computer only: clock reading at which `fire_ready` may be restored.
    pub ready_at: Option<Duration>,
}

impl SimEntity {
    pub fn spawn(
        slot: PlayerSlot,
        controller: Controller,
        name: Arc<str>,
        tuning: &PlayerTuning,
    ) -> Self {
        let (x, y, facing) = start_position(slot);
        Self {
            slot,
            controller,
            name,
            x,
            y,
            width: tuning.width,
            height: tuning.height,
            health: tuning.max_health,
            shield: tuning.max_shield,
            shield_active: false,
            shield_broken: false,
            facing,
            fire_ready: true,
            ready_at: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, (x, y): (f32, f32)) {
        self.x = x;
        self.y = y;
    }

    pub fn is_human(&self) -> bool {
        self.controller == Controller::Human
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    pub fn max_x(&self, arena: &ArenaTuning) -> f32 {
        (arena.width - self.width).max(0.0)
    }

    pub fn max_y(&self, arena: &ArenaTuning) -> f32 {
        (arena.height - self.height).max(0.0)
    }

    /// Pull the entity back inside the playfield.
    pub fn clamp_to(&mut self, arena: &ArenaTuning) {
        self.x = self.x.clamp(0.0, self.max_x(arena));
        self.y = self.y.clamp(0.0, self.max_y(arena));
    }
}

fn start_position(slot: PlayerSlot) -> (f32, f32, Facing) {
    match slot {
        PlayerSlot::One => (100.0, 0.0, Facing::Right),
        PlayerSlot::Two => (600.0, 0.0, Facing::Left),
        PlayerSlot::Three => (1100.0, 0.0, Facing::Left),
    }
}

pub struct SimProjectile {
    pub id: u64,
    pub owner: PlayerSlot,
    pub x: f32,
    pub y: f32,
    pub dir_x: f32,
    pub dir_y: f32,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct EntitySnapshot {
    pub slot: PlayerSlot,
    pub controller: Controller,
    pub name: Arc<str>,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub shield: i32,
    pub shield_active: bool,
    pub shield_broken: bool,
    pub facing: Facing,
}

#[derive(Debug, Clone)]
pub struct ProjectileSnapshot {
    pub id: u64,
    pub owner: PlayerSlot,
    pub x: f32,
    pub y: f32,
    pub dir_x: f32,
    pub dir_y: f32,
}

impl From<&SimEntity> for EntitySnapshot {
    fn from(e: &SimEntity) -> Self {
        Self {
            slot: e.slot,
            controller: e.controller,
            name: e.name.clone(),
            x: e.x,
            y: e.y,
            health: e.health,
            shield: e.shield,
            shield_active: e.shield_active,
            shield_broken: e.shield_broken,
            facing: e.facing,
        }
    }
}

impl From<&SimProjectile> for ProjectileSnapshot {
    fn from(p: &SimProjectile) -> Self {
        Self {
            id: p.id,
            owner: p.owner,
            x: p.x,
            y: p.y,
            dir_x: p.dir_x,
            dir_y: p.dir_y,
        }
    }
}
