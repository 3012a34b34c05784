use super::types::{GameEvent, MatchState, WorldSettings, WorldUpdate};
use crate::domain::{Clock, Intent, MatchPhase, SimEvent, Simulation, TickInput};
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Authoritative game loop for one match.
///
/// Owns the [`Simulation`] and the held input state. Each tick drains pending
/// events, runs one simulation step unless paused or ended, and broadcasts the
/// resulting snapshot. Exits when every input sender has been dropped.
pub async fn world_task<C: Clock>(
    mut input_rx: mpsc::Receiver<GameEvent>,
    world_tx: broadcast::Sender<WorldUpdate>,
    match_state_tx: watch::Sender<MatchState>,
    mut sim: Simulation,
    settings: WorldSettings,
    clock: C,
) {
    let mut tick: u64 = 0;
    let mut input = TickInput::default();

    for in_seconds in (1..=settings.countdown_seconds).rev() {
        let _ = match_state_tx.send(MatchState::Starting { in_seconds });
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    // Held keys carry into the first tick; presses made before it do not.
    if !drain_input(&mut input_rx, &mut sim, &mut input, &match_state_tx) {
        info!("input closed during countdown; world task exiting");
        return;
    }
    input.clear_edges();
    if sim.phase() == MatchPhase::Running {
        let _ = match_state_tx.send(MatchState::Running);
    }
    info!(mode = sim.mode().as_str(), "match running");

    // Drive the fixed-step game loop at the configured tick rate.
    let mut interval = tokio::time::interval(settings.tick_interval);
    // A stalled loop resumes where it was; no burst of catch-up ticks.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if !drain_input(&mut input_rx, &mut sim, &mut input, &match_state_tx) {
            info!(tick, "input closed; world task exiting");
            return;
        }

        if sim.phase() != MatchPhase::Running {
            continue;
        }

        let events = sim.tick(&input, clock.now());
        input.clear_edges();
        tick += 1;

        if let Some(SimEvent::MatchEnded { winners }) = events
            .iter()
            .find(|e| matches!(e, SimEvent::MatchEnded { .. }))
        {
            let _ = match_state_tx.send(MatchState::Ended {
                winners: winners.clone(),
                scores: sim.scores(),
            });
        }

        let _ = world_tx.send(WorldUpdate {
            tick,
            mode: sim.mode(),
            entities: sim.entity_snapshots(),
            projectiles: sim.projectile_snapshots(),
            events,
        });
    }
}

// Apply every queued event. Returns false once all senders are gone.
fn drain_input(
    input_rx: &mut mpsc::Receiver<GameEvent>,
    sim: &mut Simulation,
    input: &mut TickInput,
    match_state_tx: &watch::Sender<MatchState>,
) -> bool {
    loop {
        match input_rx.try_recv() {
            Ok(ev) => apply_event(ev, sim, input, match_state_tx),
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}

fn apply_event(
    ev: GameEvent,
    sim: &mut Simulation,
    input: &mut TickInput,
    match_state_tx: &watch::Sender<MatchState>,
) {
    match ev {
        GameEvent::Input {
            intent: Intent::Pause,
            pressed: true,
            ..
        }
        | GameEvent::TogglePause => {
            let pause = sim.phase() == MatchPhase::Running;
            if sim.set_paused(pause) {
                if pause {
                    let _ = match_state_tx.send(MatchState::Paused);
                } else {
                    // Presses made while paused must not fire on resume.
                    input.clear_edges();
                    let _ = match_state_tx.send(MatchState::Running);
                }
            }
        }
        GameEvent::Input { slot, intent, pressed } => {
            if sim.is_human(slot) {
                input.apply(slot, intent, pressed);
            } else {
                debug!(?slot, ?intent, "input for a computer-controlled slot ignored");
            }
        }
        GameEvent::Restart => {
            if sim.phase() != MatchPhase::Ended {
                debug!("restart ignored; round still in progress");
                return;
            }
            sim.start_round();
            input.clear_edges();
            let _ = match_state_tx.send(MatchState::Running);
        }
    }
}
