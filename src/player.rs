//! Real-time driver: maps tokio time onto a [`Sequencer`]'s virtual clock.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::foundation::core::Millis;
use crate::foundation::error::{ShowreelError, ShowreelResult};
use crate::playback::sequencer::{PlaybackView, Sequencer};

/// Transport commands accepted by a running player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    /// Toggle between play and pause.
    Toggle,
    Next,
    Previous,
    JumpTo(usize),
    SkipToEnd,
    Restart,
    Shutdown,
}

impl Command {
    /// Parse a terminal command line (`next`, `jump 3`, ...).
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let head = parts.next()?.to_ascii_lowercase();
        let cmd = match head.as_str() {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "toggle" | "space" => Self::Toggle,
            "next" | "n" => Self::Next,
            "prev" | "previous" | "p" => Self::Previous,
            "jump" | "j" => Self::JumpTo(parts.next()?.parse().ok()?),
            "end" | "skip" => Self::SkipToEnd,
            "restart" | "r" => Self::Restart,
            "quit" | "q" | "exit" => Self::Shutdown,
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(cmd)
    }
}

/// Handle to a spawned player task.
///
/// Dropping the handle closes the command channel; the task then stops the sequencer and exits.
pub struct PlayerHandle {
    commands: mpsc::Sender<Command>,
    views: watch::Receiver<PlaybackView>,
    task: JoinHandle<Sequencer>,
}

pub struct Player;

impl Player {
    /// Spawn the driver on the current tokio runtime.
    pub fn spawn(seq: Sequencer) -> PlayerHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (view_tx, view_rx) = watch::channel(seq.view());
        let task = tokio::spawn(run(seq, cmd_rx, view_tx));
        PlayerHandle {
            commands: cmd_tx,
            views: view_rx,
            task,
        }
    }
}

impl PlayerHandle {
    pub async fn send(&self, cmd: Command) -> ShowreelResult<()> {
        self.commands
            .send(cmd)
            .await
            .map_err(|_| ShowreelError::io("player task is no longer running"))
    }

    /// Latest published view.
    pub fn view(&self) -> PlaybackView {
        self.views.borrow().clone()
    }

    /// New receiver for view updates.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackView> {
        self.views.clone()
    }

    /// Wait until a published view satisfies `pred`.
    pub async fn wait_for(
        &mut self,
        pred: impl FnMut(&PlaybackView) -> bool,
    ) -> ShowreelResult<PlaybackView> {
        self.views
            .wait_for(pred)
            .await
            .map(|v| v.clone())
            .map_err(|_| ShowreelError::io("player task exited before the condition held"))
    }

    /// Stop the player and return the (stopped) sequencer.
    pub async fn shutdown(self) -> ShowreelResult<Sequencer> {
        // The task may already be gone if it observed a closed channel.
        let _ = self.commands.send(Command::Shutdown).await;
        drop(self.commands);
        self.task
            .await
            .map_err(|e| ShowreelError::Other(anyhow::Error::new(e)))
    }
}

async fn run(
    mut seq: Sequencer,
    mut commands: mpsc::Receiver<Command>,
    views: watch::Sender<PlaybackView>,
) -> Sequencer {
    let mut interval = tokio::time::interval(seq.opts().tick.to_duration());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut clock = WallClock::new(Instant::now());
    let mut published = seq.revision();
    info!(
        scenes = seq.timeline().len(),
        total_ms = seq.timeline().total_ms().0,
        "player started"
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                seq.advance(clock.take(Instant::now()));
            }
            cmd = commands.recv() => {
                // Bring the virtual clock up to date so the command lands at the right time.
                seq.advance(clock.take(Instant::now()));
                match cmd {
                    None | Some(Command::Shutdown) => break,
                    Some(cmd) => apply(&mut seq, cmd),
                }
            }
        }

        if seq.revision() != published {
            published = seq.revision();
            views.send_replace(seq.view());
        }
    }

    seq.stop();
    views.send_replace(seq.view());
    info!(now_ms = seq.now().0, "player stopped");
    seq
}

fn apply(seq: &mut Sequencer, cmd: Command) {
    let changed = match cmd {
        Command::Play => seq.play(),
        Command::Pause => seq.pause(),
        Command::Toggle => {
            if seq.state().is_playing {
                seq.pause()
            } else {
                seq.play()
            }
        }
        Command::Next => seq.next(),
        Command::Previous => seq.previous(),
        Command::JumpTo(i) => seq.jump_to(i),
        Command::SkipToEnd => seq.skip_to_end(),
        Command::Restart => seq.restart(),
        Command::Shutdown => false,
    };
    debug!(?cmd, changed, "command applied");
}

/// Converts wall-clock instants into whole-millisecond steps without losing the remainder.
struct WallClock {
    last: Instant,
}

impl WallClock {
    fn new(start: Instant) -> Self {
        Self { last: start }
    }

    fn take(&mut self, now: Instant) -> Millis {
        let dt = Millis::from_duration(now.saturating_duration_since(self.last));
        self.last += dt.to_duration();
        dt
    }
}

#[cfg(test)]
#[path = "../tests/unit/player.rs"]
mod tests;
