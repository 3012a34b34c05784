// Simulation context: owns every entity and projectile and runs one tick at a time.

use crate::domain::errors::SetupError;
use crate::domain::events::SimEvent;
use crate::domain::intent::TickInput;
use crate::domain::state::{
    Controller, EntitySnapshot, MatchMode, MatchPhase, PlayerSlot, ProjectileSnapshot, SimEntity,
};
use crate::domain::systems::projectiles::ProjectileSet;
use crate::domain::systems::{ai, damage, movement, projectiles};
use crate::domain::tuning::MatchTuning;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const PLAYER_ONE_NAME: &str = "Player 1";
const PLAYER_TWO_NAME: &str = "Player 2";
const COMPUTER_NAME: &str = "Computer";

/// Choices made before the match starts; fixed for its lifetime.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub mode: MatchMode,
    player_two_name: Option<String>,
}

impl MatchSetup {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            player_two_name: None,
        }
    }

    /// Display name for the second human. Ignored in solo, where slot two is the computer.
    pub fn with_player_two_name(mut self, name: &str) -> Result<Self, SetupError> {
        self.player_two_name = Some(validate_display_name(name)?);
        Ok(self)
    }

    fn name_for(&self, slot: PlayerSlot, controller: Controller) -> Arc<str> {
        match (slot, controller) {
            (_, Controller::Computer) => Arc::from(COMPUTER_NAME),
            (PlayerSlot::One, _) => Arc::from(PLAYER_ONE_NAME),
            _ => Arc::from(self.player_two_name.as_deref().unwrap_or(PLAYER_TWO_NAME)),
        }
    }
}

fn validate_display_name(value: &str) -> Result<String, SetupError> {
    // Names have to fit the HUD name box.
    const MAX_LEN: usize = 24;

    let len = value.chars().count();
    if len == 0 || len > MAX_LEN {
        return Err(SetupError::InvalidDisplayName);
    }
    if value.trim() != value {
        return Err(SetupError::InvalidDisplayName);
    }
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
    {
        return Err(SetupError::InvalidDisplayName);
    }

    Ok(value.to_string())
}

pub struct Simulation {
    setup: MatchSetup,
    tuning: MatchTuning,
    phase: MatchPhase,
    entities: Vec<SimEntity>,
    projectiles: ProjectileSet,
    // Rounds won per slot, kept across restarts.
    scores: [u32; 3],
    round: u32,
}

impl Simulation {
    pub fn new(setup: MatchSetup, tuning: MatchTuning) -> Self {
        let mut sim = Self {
            setup,
            tuning,
            phase: MatchPhase::Running,
            entities: Vec::new(),
            projectiles: ProjectileSet::new(),
            scores: [0; 3],
            round: 0,
        };
        sim.start_round();
        sim
    }

    /// Reset entities and projectiles to the opening layout; scores are kept.
    pub fn start_round(&mut self) {
        let setup = &self.setup;
        let player = &self.tuning.player;
        self.entities = setup
            .mode
            .roster()
            .iter()
            .map(|&(slot, controller)| {
                SimEntity::spawn(slot, controller, setup.name_for(slot, controller), player)
            })
            .collect();
        self.projectiles.clear();
        self.phase = MatchPhase::Running;
        self.round += 1;
        info!(mode = setup.mode.as_str(), round = self.round, "round started");
    }

    pub fn mode(&self) -> MatchMode {
        self.setup.mode
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn scores(&self) -> [u32; 3] {
        self.scores
    }

    pub fn tuning(&self) -> &MatchTuning {
        &self.tuning
    }

    pub fn entities(&self) -> &[SimEntity] {
        &self.entities
    }

    pub fn live_projectiles(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_human(&self, slot: PlayerSlot) -> bool {
        self.entities
            .iter()
            .any(|e| e.slot == slot && e.controller == Controller::Human)
    }

    /// Pause or resume. Returns false when nothing changed (already in that state, or ended).
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let next = match (self.phase, paused) {
            (MatchPhase::Running, true) => MatchPhase::Paused,
            (MatchPhase::Paused, false) => MatchPhase::Running,
            _ => return false,
        };
        self.phase = next;
        info!(paused, "pause toggled");
        true
    }

    /// Advance the match by one tick.
    ///
    /// Order: computer cooldowns, human fire edges, human movement, computer
    /// pursuit and fire, trio contact pass, projectiles, match end check.
    /// Does nothing unless the match is running.
    pub fn tick(&mut self, input: &TickInput, now: Duration) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::Running {
            return events;
        }

        for e in self.entities.iter_mut().filter(|e| !e.is_human()) {
            ai::refresh_fire_ready(e, now);
        }

        for e in self.entities.iter_mut() {
            if !e.is_human() || e.is_defeated() {
                continue;
            }
            let controls = input.controls(e.slot);
            if controls.fire_pressed
                && let Some(event) =
                    projectiles::spawn_bullet(e, &mut self.projectiles, self.phase, &self.tuning)
            {
                events.push(event);
            }
            // Fire-ready comes back once the trigger is let go.
            if !controls.fire {
                e.fire_ready = true;
            }
        }

        let before = movement::resolve_movement(&mut self.entities, input, &self.tuning);

        let computers: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_human())
            .map(|(i, _)| i)
            .collect();
        for i in computers {
            if let Some(event) = ai::update_ai(
                &mut self.entities,
                i,
                &mut self.projectiles,
                self.phase,
                now,
                &self.tuning,
            ) {
                events.push(event);
            }
        }

        if self.setup.mode == MatchMode::Trio {
            movement::resolve_computer_contacts(&mut self.entities, &before, &self.tuning);
        }

        events.extend(projectiles::advance_bullets(
            &mut self.entities,
            &mut self.projectiles,
            &self.tuning,
        ));

        if let Some(outcome) = damage::match_outcome(&self.entities) {
            for slot in &outcome.winners {
                self.scores[slot.index()] += 1;
            }
            self.phase = MatchPhase::Ended;
            info!(
                round = self.round,
                winners = ?outcome.winners,
                scores = ?self.scores,
                "match ended"
            );
            events.push(SimEvent::MatchEnded {
                winners: outcome.winners,
            });
        }

        events
    }

    pub fn entity_snapshots(&self) -> Vec<EntitySnapshot> {
        self.entities.iter().map(EntitySnapshot::from).collect()
    }

    pub fn projectile_snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.projectiles
            .live
            .iter()
            .map(ProjectileSnapshot::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::Intent;

    const TICK: Duration = Duration::from_millis(16);

    fn at(tick: u64) -> Duration {
        TICK * tick as u32
    }

    fn press(input: &mut TickInput, slot: PlayerSlot, intent: Intent) {
        input.apply(slot, intent, true);
    }

    #[test]
    fn opening_layout_follows_the_mode() {
        let sim = Simulation::new(MatchSetup::new(MatchMode::Trio), MatchTuning::default());
        let e = sim.entities();

        assert_eq!(e.len(), 3);
        assert_eq!(e[0].position(), (100.0, 0.0));
        assert_eq!(e[1].position(), (600.0, 0.0));
        assert_eq!(e[2].position(), (1100.0, 0.0));
        assert_eq!(&*e[2].name, "Computer");
        assert!(e.iter().all(|e| e.health == 100 && e.shield == 100));
        assert!(sim.is_human(PlayerSlot::Two));
        assert!(!sim.is_human(PlayerSlot::Three));
    }

    #[test]
    fn player_two_name_is_validated_and_applied() {
        let setup = MatchSetup::new(MatchMode::Duo)
            .with_player_two_name("Red_Baron")
            .expect("valid name");
        let sim = Simulation::new(setup, MatchTuning::default());
        assert_eq!(&*sim.entities()[1].name, "Red_Baron");

        for bad in ["", " padded", "semi;colon", "a-name-that-is-far-too-long-to-fit"] {
            assert!(matches!(
                MatchSetup::new(MatchMode::Duo).with_player_two_name(bad),
                Err(SetupError::InvalidDisplayName)
            ));
        }

        let solo = MatchSetup::new(MatchMode::Solo)
            .with_player_two_name("Red_Baron")
            .expect("valid name");
        let sim = Simulation::new(solo, MatchTuning::default());
        assert_eq!(&*sim.entities()[1].name, "Computer");
    }

    #[test]
    fn duo_shot_travels_and_lands() {
        let mut sim = Simulation::new(MatchSetup::new(MatchMode::Duo), MatchTuning::default());
        let mut input = TickInput::default();
        press(&mut input, PlayerSlot::One, Intent::Fire);

        let events = sim.tick(&input, at(1));
        assert!(matches!(
            events.as_slice(),
            [SimEvent::ShotFired {
                shooter: PlayerSlot::One,
                ..
            }]
        ));
        input.clear_edges();
        assert_eq!(sim.live_projectiles(), 1);

        // Spawned at x=120 and already advanced once; the margin box starts past 595.
        let mut hit_tick = None;
        for tick in 2..=60 {
            let events = sim.tick(&input, at(tick));
            if events
                .iter()
                .any(|e| matches!(e, SimEvent::HitLanded { victim: PlayerSlot::Two, .. }))
            {
                hit_tick = Some(tick);
                break;
            }
        }

        assert_eq!(hit_tick, Some(48));
        assert_eq!(sim.entities()[1].health, 90);
        assert_eq!(sim.entities()[1].shield, 100);
        assert_eq!(sim.live_projectiles(), 0);
        assert_eq!(sim.phase(), MatchPhase::Running);
    }

    #[test]
    fn held_fire_does_not_repeat_until_released() {
        let mut sim = Simulation::new(MatchSetup::new(MatchMode::Duo), MatchTuning::default());
        let mut input = TickInput::default();
        press(&mut input, PlayerSlot::One, Intent::Fire);

        sim.tick(&input, at(1));
        input.clear_edges();
        // Key repeat while held is not an edge.
        press(&mut input, PlayerSlot::One, Intent::Fire);
        sim.tick(&input, at(2));
        assert!(!sim.entities()[0].fire_ready);
        assert_eq!(sim.live_projectiles(), 1);

        input.apply(PlayerSlot::One, Intent::Fire, false);
        sim.tick(&input, at(3));
        assert!(sim.entities()[0].fire_ready);

        press(&mut input, PlayerSlot::One, Intent::Fire);
        sim.tick(&input, at(4));
        assert_eq!(sim.live_projectiles(), 2);
    }

    #[test]
    fn final_hit_ends_the_match_and_scores_the_survivor() {
        let mut sim = Simulation::new(MatchSetup::new(MatchMode::Duo), MatchTuning::default());
        sim.entities[1].health = 10;
        let mut input = TickInput::default();
        press(&mut input, PlayerSlot::One, Intent::Fire);

        let mut ended = None;
        for tick in 1..=60 {
            let events = sim.tick(&input, at(tick));
            input.clear_edges();
            if let Some(SimEvent::MatchEnded { winners }) = events.last() {
                ended = Some(winners.clone());
                break;
            }
        }

        assert_eq!(ended, Some(vec![PlayerSlot::One]));
        assert_eq!(sim.phase(), MatchPhase::Ended);
        assert_eq!(sim.scores(), [1, 0, 0]);
        assert_eq!(sim.entities()[1].health, 0);

        // Ended matches are frozen.
        let mut move_input = TickInput::default();
        press(&mut move_input, PlayerSlot::One, Intent::MoveDown);
        assert!(sim.tick(&move_input, at(100)).is_empty());
        assert_eq!(sim.entities()[0].position(), (100.0, 0.0));

        sim.start_round();
        assert_eq!(sim.round(), 2);
        assert_eq!(sim.phase(), MatchPhase::Running);
        assert_eq!(sim.entities()[1].health, 100);
        assert_eq!(sim.scores(), [1, 0, 0]);
    }

    #[test]
    fn paused_ticks_change_nothing() {
        let mut sim = Simulation::new(MatchSetup::new(MatchMode::Duo), MatchTuning::default());
        let mut input = TickInput::default();
        press(&mut input, PlayerSlot::One, Intent::Fire);
        sim.tick(&input, at(1));
        input.clear_edges();
        let x_before = sim.projectile_snapshots()[0].x;

        assert!(sim.set_paused(true));
        assert!(!sim.set_paused(true));
        press(&mut input, PlayerSlot::Two, Intent::MoveDown);
        for tick in 2..10 {
            assert!(sim.tick(&input, at(tick)).is_empty());
        }
        assert_eq!(sim.projectile_snapshots()[0].x, x_before);
        assert_eq!(sim.entities()[1].position(), (600.0, 0.0));

        assert!(sim.set_paused(false));
        sim.tick(&input, at(10));
        assert_eq!(sim.projectile_snapshots()[0].x, x_before + 10.0);
        assert_eq!(sim.entities()[1].position(), (600.0, 5.0));
    }

    #[test]
    fn solo_computer_hunts_down_the_human() {
        let mut sim = Simulation::new(MatchSetup::new(MatchMode::Solo), MatchTuning::default());
        let input = TickInput::default();

        let mut winners = None;
        let mut hits = 0;
        for tick in 1..=600 {
            for event in sim.tick(&input, at(tick)) {
                match event {
                    SimEvent::HitLanded { victim, .. } => {
                        assert_eq!(victim, PlayerSlot::One);
                        hits += 1;
                    }
                    SimEvent::MatchEnded { winners: w } => winners = Some(w),
                    _ => {}
                }
            }
            if winners.is_some() {
                break;
            }
        }

        assert_eq!(hits, 10);
        assert_eq!(winners, Some(vec![PlayerSlot::Two]));
        assert_eq!(sim.scores(), [0, 1, 0]);
    }

    #[test]
    fn state_stays_in_range_through_a_busy_trio_match() {
        let mut sim = Simulation::new(MatchSetup::new(MatchMode::Trio), MatchTuning::default());
        let pattern = [
            Intent::MoveRight,
            Intent::MoveDown,
            Intent::MoveLeft,
            Intent::MoveUp,
        ];

        for tick in 1..=2000_u64 {
            let mut input = TickInput::default();
            let one = pattern[(tick / 90) as usize % 4];
            let two = pattern[(tick / 70 + 2) as usize % 4];
            input.apply(PlayerSlot::One, one, true);
            input.apply(PlayerSlot::Two, two, true);
            input.apply(PlayerSlot::Two, Intent::ShieldHold, tick % 3 == 0);
            if tick % 5 == 0 {
                input.apply(PlayerSlot::One, Intent::Fire, true);
            }
            sim.tick(&input, at(tick));

            let arena = sim.tuning().arena;
            for e in sim.entities() {
                assert!((0..=100).contains(&e.health));
                assert!((0..=100).contains(&e.shield));
                assert!(e.x >= 0.0 && e.x <= arena.width - e.width);
                assert!(e.y >= 0.0 && e.y <= arena.height - e.height);
            }
            if sim.phase() == MatchPhase::Ended {
                break;
            }
        }
    }
}
