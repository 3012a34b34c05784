// Keyboard input adapter: maps key transitions read from a line stream to
// game events for the world task.

use crate::domain::{Intent, PlayerSlot};
use crate::interface_adapters::protocol::ControlMessage;
use crate::use_cases::GameEvent;

use std::collections::HashMap;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Key name to (participant, intent) table.
///
/// Global keys such as pause carry no slot.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    table: HashMap<String, (Option<PlayerSlot>, Intent)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            table: HashMap::new(),
        };

        let one = Some(PlayerSlot::One);
        bindings.bind("w", one, Intent::MoveUp);
        bindings.bind("a", one, Intent::MoveLeft);
        bindings.bind("s", one, Intent::MoveDown);
        bindings.bind("d", one, Intent::MoveRight);
        bindings.bind(" ", one, Intent::Fire);
        bindings.bind("q", one, Intent::ShieldHold);

        let two = Some(PlayerSlot::Two);
        bindings.bind("ArrowUp", two, Intent::MoveUp);
        bindings.bind("ArrowLeft", two, Intent::MoveLeft);
        bindings.bind("ArrowDown", two, Intent::MoveDown);
        bindings.bind("ArrowRight", two, Intent::MoveRight);
        bindings.bind("Enter", two, Intent::Fire);
        bindings.bind("m", two, Intent::ShieldHold);

        bindings.bind("p", None, Intent::Pause);
        bindings
    }
}

impl KeyBindings {
    pub fn bind(&mut self, key: &str, slot: Option<PlayerSlot>, intent: Intent) {
        self.table.insert(key.to_string(), (slot, intent));
    }

    pub fn lookup(&self, key: &str) -> Option<(Option<PlayerSlot>, Intent)> {
        self.table.get(key).copied()
    }

    /// Translate one key transition into a game event.
    ///
    /// Unbound keys yield `None`. Pause acts on the press edge only.
    pub fn to_event(&self, key: &str, pressed: bool) -> Option<GameEvent> {
        match self.lookup(key)? {
            (_, Intent::Pause) => pressed.then_some(GameEvent::TogglePause),
            (Some(slot), intent) => Some(GameEvent::Input {
                slot,
                intent,
                pressed,
            }),
            (None, intent) => {
                debug!(key, ?intent, "binding without a slot ignored");
                None
            }
        }
    }
}

/// Parse one line of the control stream.
///
/// Blank lines and unbound keys produce `Ok(None)`.
pub fn parse_control_line(
    line: &str,
    bindings: &KeyBindings,
) -> Result<Option<GameEvent>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let msg: ControlMessage = serde_json::from_str(line)?;
    Ok(match msg {
        ControlMessage::Key(k) => bindings.to_event(&k.key, k.pressed),
        ControlMessage::Restart => Some(GameEvent::Restart),
    })
}

/// Read control lines until EOF and forward them as game events.
///
/// Malformed lines are logged and skipped. Returns early without error if the
/// world task is gone.
pub async fn read_controls<R>(
    reader: R,
    bindings: KeyBindings,
    input_tx: mpsc::Sender<GameEvent>,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let event = match parse_control_line(&line, &bindings) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "malformed control line; skipping");
                continue;
            }
        };
        if input_tx.send(event).await.is_err() {
            info!("world task closed; input reader exiting");
            return Ok(());
        }
    }
    info!("control stream reached EOF");
    Ok(())
}
