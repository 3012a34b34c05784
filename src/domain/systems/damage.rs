use crate::domain::state::{Controller, PlayerSlot, SimEntity};

/// What a single hit did beyond lowering numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    pub shield_broken: bool,
    pub defeated: bool,
}

/// Apply `amount` to `e`, spending an active shield first.
///
/// When the shield runs out mid-hit it latches `shield_broken` and the
/// remainder (amount minus the shield it had) carries over to health.
pub fn apply_damage(e: &mut SimEntity, amount: i32, max_health: i32) -> DamageOutcome {
    let mut outcome = DamageOutcome::default();
    let amount = amount.max(0);

    if e.shield_active && e.shield > 0 {
        let shield_before = e.shield;
        e.shield -= amount;
        if e.shield <= 0 {
            e.shield = 0;
            e.shield_broken = true;
            outcome.shield_broken = true;
            e.health -= amount - shield_before;
        }
    } else {
        e.health -= amount;
    }

    e.health = e.health.clamp(0, max_health);
    outcome.defeated = e.is_defeated();
    outcome
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Slots still standing; empty on a draw.
    pub winners: Vec<PlayerSlot>,
}

/// Decide whether the match is over.
///
/// A defeated human always ends it. A defeated computer ends it too: in trio
/// that is the humans' win, in solo the lone human's.
pub fn match_outcome(entities: &[SimEntity]) -> Option<MatchOutcome> {
    let defeated = |controller: Controller| {
        entities
            .iter()
            .any(|e| e.controller == controller && e.is_defeated())
    };

    if !defeated(Controller::Human) && !defeated(Controller::Computer) {
        return None;
    }

    let winners: Vec<PlayerSlot> = entities
        .iter()
        .filter(|e| !e.is_defeated())
        .map(|e| e.slot)
        .collect();
    Some(MatchOutcome { winners })
}
