// Framework bootstrap: logging, channels and the task graph for one arena session.

use crate::domain::{MatchSetup, MatchTuning, Simulation};
use crate::frameworks::config;
use crate::interface_adapters::input::{KeyBindings, read_controls};
use crate::interface_adapters::render::frame_writer;
use crate::interface_adapters::utils::clock::MonotonicClock;
use crate::use_cases::{GameEvent, MatchState, WorldSettings, WorldUpdate, world_task};

use std::io::{self, Result};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::sync::{broadcast, mpsc, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout carries frames; logs go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Run one arena session: controls are read from `reader` until EOF and
/// frames are written to `writer` until the world task stops.
pub async fn run<R, W>(
    reader: R,
    writer: W,
    setup: MatchSetup,
    settings: WorldSettings,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    // input_tx/rx: every control event goes to the single world task.
    let (input_tx, input_rx) = mpsc::channel::<GameEvent>(config::INPUT_CHANNEL_CAPACITY);
    // world_tx/rx: per-tick snapshots for the frame writer.
    let (world_tx, world_rx) = broadcast::channel::<WorldUpdate>(config::WORLD_BROADCAST_CAPACITY);
    // match_state_tx: countdown, pause and end-of-match transitions.
    let (match_state_tx, match_state_rx) = watch::channel(MatchState::Starting {
        in_seconds: settings.countdown_seconds,
    });

    tracing::info!(
        mode = setup.mode.as_str(),
        tick_ms = settings.tick_interval.as_millis(),
        countdown = settings.countdown_seconds,
        "arena session starting"
    );

    let sim = Simulation::new(setup, MatchTuning::default());

    // Subscribe the writer before the world task can publish anything.
    let writer_task = tokio::spawn(frame_writer(world_rx, match_state_rx, writer));
    let world = tokio::spawn(world_task(
        input_rx,
        world_tx,
        match_state_tx,
        sim,
        settings,
        MonotonicClock::start(),
    ));

    // Dropping the sender on EOF is what stops the world task.
    let read_result = read_controls(reader, KeyBindings::default(), input_tx)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "failed to read controls");
        });

    world.await.map_err(io::Error::other)?;
    writer_task
        .await
        .map_err(io::Error::other)?
        .inspect_err(|e| {
            tracing::error!(error = %e, "failed to write frames");
        })?;

    read_result
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let mode = config::match_mode()
        .inspect_err(|e| {
            tracing::error!(error = %e, "invalid ARENA_MODE");
        })
        .map_err(io::Error::other)?;

    let mut setup = MatchSetup::new(mode);
    if let Some(name) = config::player_two_name() {
        match setup.clone().with_player_two_name(&name) {
            Ok(named) => setup = named,
            Err(e) => {
                tracing::warn!(%name, error = %e, "ignoring ARENA_PLAYER_TWO_NAME; using default");
            }
        }
    }

    let settings = WorldSettings {
        tick_interval: config::tick_interval(),
        countdown_seconds: config::countdown_seconds(),
    };

    run(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        setup,
        settings,
    )
    .await
}
