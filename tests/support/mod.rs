// Shared helpers for driving one world task through its channels.
#![allow(dead_code)]

use arena_sim::domain::{Intent, MatchMode, MatchSetup, MatchTuning, PlayerSlot, Simulation};
use arena_sim::interface_adapters::utils::clock::MonotonicClock;
use arena_sim::use_cases::{GameEvent, MatchState, WorldSettings, WorldUpdate, world_task};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

// Tick rate used by every integration test (matches the default).
pub const TICK: Duration = Duration::from_millis(16);
// Upper bound for any wait; generous because tests run on paused time.
pub const WAIT: Duration = Duration::from_secs(120);

pub struct Harness {
    pub input_tx: mpsc::Sender<GameEvent>,
    pub world_rx: broadcast::Receiver<WorldUpdate>,
    pub state_rx: watch::Receiver<MatchState>,
    pub task: JoinHandle<()>,
}

// Spawn a world task for `mode` with no countdown.
pub fn spawn_world(mode: MatchMode) -> Harness {
    spawn_world_with_countdown(mode, 0)
}

pub fn spawn_world_with_countdown(mode: MatchMode, countdown_seconds: u32) -> Harness {
    let (input_tx, input_rx) = mpsc::channel(1024);
    let (world_tx, world_rx) = broadcast::channel(128);
    let (state_tx, state_rx) = watch::channel(MatchState::Starting {
        in_seconds: countdown_seconds,
    });

    let sim = Simulation::new(MatchSetup::new(mode), MatchTuning::default());
    let settings = WorldSettings {
        tick_interval: TICK,
        countdown_seconds,
    };
    let task = tokio::spawn(world_task(
        input_rx,
        world_tx,
        state_tx,
        sim,
        settings,
        MonotonicClock::start(),
    ));

    Harness {
        input_tx,
        world_rx,
        state_rx,
        task,
    }
}

pub fn key(slot: PlayerSlot, intent: Intent, pressed: bool) -> GameEvent {
    GameEvent::Input {
        slot,
        intent,
        pressed,
    }
}

impl Harness {
    pub async fn send(&self, event: GameEvent) {
        self.input_tx.send(event).await.expect("world task alive");
    }

    // Wait until the published match state satisfies `pred` and return it.
    pub async fn wait_for_state(&mut self, pred: impl FnMut(&MatchState) -> bool) -> MatchState {
        tokio::time::timeout(WAIT, self.state_rx.wait_for(pred))
            .await
            .expect("state reached before timeout")
            .expect("world task alive")
            .clone()
    }

    // Next world update, skipping over any lag.
    pub async fn next_update(&mut self) -> WorldUpdate {
        let recv = async {
            loop {
                match self.world_rx.recv().await {
                    Ok(update) => return update,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => panic!("world updates closed"),
                }
            }
        };
        tokio::time::timeout(WAIT, recv)
            .await
            .expect("update before timeout")
    }

    // Drop anything buffered so the next update is a fresh one.
    pub fn skip_buffered(&mut self) {
        self.world_rx = self.world_rx.resubscribe();
    }
}
