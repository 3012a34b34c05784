// Frame output adapter: serializes world updates and match state changes as
// JSON lines for the presentation and audio layers.

use crate::interface_adapters::protocol::{FrameMessage, MatchStateDto, WorldUpdateDto};
use crate::use_cases::{MatchState, WorldUpdate};

use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

/// Serialize a frame into one newline-terminated JSON line.
pub fn encode_frame(frame: &FrameMessage) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(frame)?;
    line.push('\n');
    Ok(line)
}

/// Write every world update and match state change to `writer` until the
/// world updates channel closes.
///
/// The current match state is written first so a late reader starts from a
/// known state. A lagging writer skips ahead instead of blocking the loop.
pub async fn frame_writer<W>(
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    mut state_rx: watch::Receiver<MatchState>,
    mut writer: W,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let initial = state_rx.borrow_and_update().clone();
    write_frame(&mut writer, FrameMessage::MatchState(MatchStateDto::from(initial))).await?;

    let mut state_open = true;
    loop {
        tokio::select! {
            // Prefer state changes so an end-of-match frame precedes the
            // snapshot of the tick that ended it.
            biased;

            changed = state_rx.changed(), if state_open => {
                if changed.is_err() {
                    state_open = false;
                    continue;
                }
                let state = state_rx.borrow_and_update().clone();
                let frame = FrameMessage::MatchState(MatchStateDto::from(state));
                write_frame(&mut writer, frame).await?;
            }
            update = world_rx.recv() => match update {
                Ok(update) => {
                    let frame = FrameMessage::WorldUpdate(WorldUpdateDto::from(update));
                    write_frame(&mut writer, frame).await?;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "frame writer lagged; skipping to latest update");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("world updates channel closed; frame writer exiting");
                    break;
                }
            },
        }
    }

    writer.flush().await
}

async fn write_frame<W>(writer: &mut W, frame: FrameMessage) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = match encode_frame(&frame) {
        Ok(line) => line,
        Err(e) => {
            error!(error = ?e, "failed to serialize frame");
            return Ok(());
        }
    };
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}
