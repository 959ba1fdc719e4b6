/*!
 * Keyboard handling: puts terminal into raw mode and watches key presses
 * on a blocking task; quit key raises the cancellation signal.
 */

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::{error, trace, warn};
use tokio::task::JoinHandle;

use crate::sampling::CancellationSignal;

/// How long one `poll()` waits before watcher re-checks whether it should finish.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Keeps terminal in raw mode for as long as it lives.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("Unable to switch terminal into raw mode")?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Unable to restore terminal mode: {}", e);
        }
    }
}

/// Quit key can only be read when stdin is a terminal; raw mode is used exactly then.
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Line terminator for output written while terminal may be in raw mode,
/// where `\n` alone does not return carriage.
pub fn line_ending(raw_terminal: bool) -> &'static str {
    if raw_terminal { "\r\n" } else { "\n" }
}

/// Whether key event should stop the program.
/// Ctrl-C is included since in raw mode it is delivered as a plain key instead of a signal.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char(c) => c == crate::QUIT_KEY,
        _ => false,
    }
}

/// Attached keyboard: raw terminal plus running watcher task.
pub struct Keyboard {
    signal: CancellationSignal,
    watcher: JoinHandle<Result<()>>,
    _raw: RawModeGuard,
}

impl Keyboard {
    /// Returns `None` when stdin is not a terminal, there is nothing to read quit key from then.
    pub fn attach(signal: CancellationSignal) -> Result<Option<Self>> {
        if !stdin_is_terminal() {
            warn!("stdin is not a terminal, '{}' key will not stop the program", crate::QUIT_KEY);
            return Ok(None);
        }
        let raw = RawModeGuard::enable()?;
        let watched = signal.clone();
        let watcher = tokio::task::spawn_blocking(move || watch_keys(&watched));
        Ok(Some(Keyboard { signal, watcher, _raw: raw }))
    }

    /// Stops watcher (if still running) and restores terminal.
    pub async fn detach(self) -> Result<()> {
        let Keyboard { signal, watcher, _raw } = self;
        signal.set();
        watcher.await.context("Keyboard watcher task failed")?
    }
}

fn watch_keys(signal: &CancellationSignal) -> Result<()> {
    watch_events(signal, || {
        if event::poll(POLL_INTERVAL)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    })
}

/// Feeds events from `next_event` until quit key shows up or signal is set elsewhere.
/// `next_event` returns `None` when nothing arrived within one poll interval.
/// On read failure the signal is raised as well, otherwise nothing could stop the loop any more;
/// error is returned to whoever joins the watcher.
fn watch_events<F>(signal: &CancellationSignal, mut next_event: F) -> Result<()>
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    while !signal.is_set() {
        let event = match next_event() {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                error!("Unable to read keyboard, stopping: {}", e);
                signal.set();
                return Err(e).context("Reading keyboard events failed");
            }
        };
        if let Event::Key(key) = event {
            trace!("Key event: {:?}", key);
            if is_quit_key(&key) {
                signal.set();
            }
        }
    }
    Ok(())
}

///////////////////////////////////////////////////////////////////////////////////////////////////
/// Tests
///
