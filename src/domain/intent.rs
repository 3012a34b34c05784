// Abstract player intents and the per-tick control snapshot the simulation consumes.

use crate::domain::state::{Facing, PlayerSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    ShieldHold,
    Pause,
}

/// Held state of one participant's intents plus the fire edge seen since the last tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub shield: bool,
    // Set when fire went from released to held; cleared after each tick.
    pub fire_pressed: bool,
}

impl Controls {
    pub fn apply(&mut self, intent: Intent, pressed: bool) {
        match intent {
            Intent::MoveUp => self.up = pressed,
            Intent::MoveDown => self.down = pressed,
            Intent::MoveLeft => self.left = pressed,
            Intent::MoveRight => self.right = pressed,
            Intent::Fire => {
                // Key repeat re-sends "pressed" while held; only the first one counts.
                if pressed && !self.fire {
                    self.fire_pressed = true;
                }
                self.fire = pressed;
            }
            Intent::ShieldHold => self.shield = pressed,
            // Pause is a match-level toggle, handled before intents reach here.
            Intent::Pause => {}
        }
    }

    /// Facing implied by held movement intents: up, then down, then left, then right.
    pub fn facing(&self) -> Option<Facing> {
        if self.up {
            Some(Facing::Up)
        } else if self.down {
            Some(Facing::Down)
        } else if self.left {
            Some(Facing::Left)
        } else if self.right {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

/// Controls for every slot, indexed by [`PlayerSlot::index`].
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    controls: [Controls; 3],
}

impl TickInput {
    pub fn controls(&self, slot: PlayerSlot) -> &Controls {
        &self.controls[slot.index()]
    }

    pub fn apply(&mut self, slot: PlayerSlot, intent: Intent, pressed: bool) {
        self.controls[slot.index()].apply(intent, pressed);
    }

    /// Drop one-shot edges, keeping held state.
    pub fn clear_edges(&mut self) {
        for c in &mut self.controls {
            c.fire_pressed = false;
        }
    }
}
