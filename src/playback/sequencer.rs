use tracing::{debug, trace};

use crate::foundation::core::{Epoch, Millis, SceneIndex};
use crate::foundation::error::{ShowreelError, ShowreelResult};
use crate::playback::progress::overall_progress;
use crate::playback::state::{Bounds, PlaybackEvent, PlaybackState};
use crate::playback::timer::{TimerId, TimerKind, TimerQueue};
use crate::timeline::model::{Scene, Timeline};

pub use crate::playback::state::PlaybackMode;

/// Runtime options for a [`Sequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerOpts {
    /// Period of the progress tick.
    pub tick: Millis,
    pub mode: PlaybackMode,
    /// Start playing once at construction (autoplay mode only).
    pub autostart: bool,
}

impl SequencerOpts {
    pub const DEFAULT_TICK: Millis = Millis(100);

    pub fn validate(&self) -> ShowreelResult<()> {
        if self.tick.0 == 0 {
            return Err(ShowreelError::validation("tick period must be > 0 ms"));
        }
        Ok(())
    }

    pub fn manual() -> Self {
        Self {
            mode: PlaybackMode::Manual,
            autostart: false,
            ..Self::default()
        }
    }
}

impl Default for SequencerOpts {
    fn default() -> Self {
        Self {
            tick: Self::DEFAULT_TICK,
            mode: PlaybackMode::Autoplay,
            autostart: true,
        }
    }
}

/// Read-only snapshot for renderers and hosts.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackView {
    pub current_index: SceneIndex,
    pub scene_id: String,
    pub is_playing: bool,
    pub scene_progress_pct: f64,
    pub overall_progress_pct: f64,
    pub has_completed: bool,
    /// Bumped on every mutation; hosts re-render when it changes.
    pub revision: u64,
}

/// Active time accounting for the current scene.
#[derive(Clone, Copy, Debug, Default)]
struct SceneClock {
    banked: Millis,
    running_since: Option<Millis>,
}

impl SceneClock {
    fn elapsed(self, now: Millis) -> Millis {
        match self.running_since {
            Some(since) => self.banked.saturating_add(now.saturating_sub(since)),
            None => self.banked,
        }
    }

    fn bank(&mut self, now: Millis) {
        if let Some(since) = self.running_since.take() {
            self.banked = self.banked.saturating_add(now.saturating_sub(since));
        }
    }

    fn resume(&mut self, now: Millis) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Pending {
    scene_end: Option<TimerId>,
    tick: Option<TimerId>,
}

/// Timed scene state machine.
///
/// Owns the [`PlaybackState`], a virtual millisecond clock and the only timers that may mutate
/// the state. Time moves exclusively through [`Sequencer::advance`]; the host maps its own clock
/// (an animation frame loop, a tokio interval, a test) onto it.
///
/// Every index change, pause and resume bumps the epoch and cancels outstanding timers. A timer
/// that still fires under an older epoch is discarded.
#[derive(Debug)]
pub struct Sequencer {
    timeline: Timeline,
    opts: SequencerOpts,
    state: PlaybackState,
    timers: TimerQueue,
    pending: Pending,
    epoch: Epoch,
    now: Millis,
    clock: SceneClock,
    autostarted: bool,
    stopped: bool,
    revision: u64,
}

impl Sequencer {
    /// Build a sequencer; autostarts when `opts.autostart` is set and the mode is autoplay.
    pub fn new(timeline: Timeline, opts: SequencerOpts) -> ShowreelResult<Self> {
        opts.validate()?;
        let mut seq = Self {
            timeline,
            opts,
            state: PlaybackState::initial(),
            timers: TimerQueue::new(),
            pending: Pending::default(),
            epoch: Epoch::default(),
            now: Millis::ZERO,
            clock: SceneClock::default(),
            autostarted: false,
            stopped: false,
            revision: 0,
        };
        if opts.autostart {
            seq.request_autostart();
        }
        Ok(seq)
    }

    /// One-shot autostart guard; only the first call can start playback.
    ///
    /// Hosts may call this from every render pass (e.g. when a `?autostart=1` query flag is
    /// present) without re-triggering playback after a user pause.
    pub fn request_autostart(&mut self) -> bool {
        if self.autostarted || self.stopped {
            return false;
        }
        self.autostarted = true;
        self.play()
    }

    pub fn play(&mut self) -> bool {
        self.dispatch(PlaybackEvent::Play)
    }

    pub fn pause(&mut self) -> bool {
        self.dispatch(PlaybackEvent::Pause)
    }

    pub fn next(&mut self) -> bool {
        self.dispatch(PlaybackEvent::Next)
    }

    pub fn previous(&mut self) -> bool {
        self.dispatch(PlaybackEvent::Previous)
    }

    /// Jump to `idx`; out-of-range indices are ignored and return `false`.
    pub fn jump_to(&mut self, idx: usize) -> bool {
        if !self.timeline.contains(SceneIndex(idx)) {
            debug!(idx, len = self.timeline.len(), "ignoring out-of-range jump");
            return false;
        }
        self.dispatch(PlaybackEvent::JumpTo(SceneIndex(idx)))
    }

    pub fn skip_to_end(&mut self) -> bool {
        self.dispatch(PlaybackEvent::SkipToEnd)
    }

    pub fn restart(&mut self) -> bool {
        self.dispatch(PlaybackEvent::Restart)
    }

    /// Teardown: cancel every timer and freeze the sequencer.
    ///
    /// After `stop` no call mutates state and [`Sequencer::revision`] never changes again.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        let cancelled = self.timers.clear();
        self.pending = Pending::default();
        self.epoch.bump();
        self.clock.bank(self.now);
        if self.state.is_playing {
            self.state.is_playing = false;
            self.revision += 1;
        }
        self.stopped = true;
        debug!(cancelled, now = self.now.0, "sequencer stopped");
    }

    /// Move the virtual clock forward by `dt`, firing due timers in deadline order.
    ///
    /// Returns the number of timer callbacks that were applied (stale ones excluded).
    pub fn advance(&mut self, dt: Millis) -> usize {
        if self.stopped {
            return 0;
        }
        let target = self.now.saturating_add(dt);
        let mut applied = 0;
        while let Some(timer) = self.timers.pop_due(target) {
            self.now = self.now.max(timer.deadline);
            if timer.epoch != self.epoch {
                trace!(
                    kind = ?timer.kind,
                    stale = timer.epoch.0,
                    current = self.epoch.0,
                    "discarding stale timer"
                );
                continue;
            }
            applied += 1;
            match timer.kind {
                TimerKind::Tick => self.on_tick(),
                TimerKind::SceneEnd => self.on_scene_end(),
            }
        }
        self.now = target;
        applied
    }

    fn on_tick(&mut self) {
        self.pending.tick = None;
        let elapsed = self.clock.elapsed(self.now);
        let dur = self.current_scene().duration_ms;
        let pct = 100.0 * elapsed.as_f64() / dur.as_f64();
        self.dispatch(PlaybackEvent::Progress(pct));
        if self.state.is_playing {
            let at = self.now.saturating_add(self.opts.tick);
            self.pending.tick = Some(self.timers.schedule(at, TimerKind::Tick, self.epoch));
        }
    }

    fn on_scene_end(&mut self) {
        self.pending.scene_end = None;
        debug!(
            scene = %self.current_scene().id,
            now = self.now.0,
            "scene duration elapsed"
        );
        self.dispatch(PlaybackEvent::Next);
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            scene_count: self.timeline.len(),
            mode: self.opts.mode,
        }
    }

    fn dispatch(&mut self, event: PlaybackEvent) -> bool {
        if self.stopped {
            return false;
        }
        let before = self.state;
        let after = before.reduce(event, self.bounds());

        // Re-entering the current scene (jump to self, restart at index 0) still resets its clock.
        let reenter = match event {
            PlaybackEvent::JumpTo(idx) => self.timeline.contains(idx),
            PlaybackEvent::Restart => true,
            _ => after.current_index != before.current_index,
        };
        if after == before && !reenter {
            return false;
        }

        self.state = after;
        self.revision += 1;

        if !matches!(event, PlaybackEvent::Progress(_)) {
            debug!(
                ?event,
                from = before.current_index.0,
                to = after.current_index.0,
                playing = after.is_playing,
                completed = after.has_completed,
                "playback transition"
            );
        }

        if reenter || after.is_playing != before.is_playing {
            self.resync(reenter);
        }
        true
    }

    /// Invalidate outstanding timers and schedule fresh ones for the current scene.
    fn resync(&mut self, reenter: bool) {
        for id in [self.pending.scene_end.take(), self.pending.tick.take()]
            .into_iter()
            .flatten()
        {
            self.timers.cancel(id);
        }
        let epoch = self.epoch.bump();

        if reenter {
            self.clock = SceneClock::default();
        } else {
            self.clock.bank(self.now);
        }

        if !self.state.is_playing || self.opts.mode == PlaybackMode::Manual {
            return;
        }

        self.clock.resume(self.now);
        let dur = self.current_scene().duration_ms;
        let remaining = dur.saturating_sub(self.clock.elapsed(self.now));
        let end_at = self.now.saturating_add(remaining);
        let tick_at = self.now.saturating_add(self.opts.tick);
        self.pending.scene_end = Some(self.timers.schedule(end_at, TimerKind::SceneEnd, epoch));
        self.pending.tick = Some(self.timers.schedule(tick_at, TimerKind::Tick, epoch));
        trace!(?epoch, end_at = end_at.0, remaining = remaining.0, "timers scheduled");
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn opts(&self) -> SequencerOpts {
        self.opts
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_scene(&self) -> &Scene {
        self.timeline.scene(self.state.current_index)
    }

    pub fn overall_progress_pct(&self) -> f64 {
        overall_progress(
            &self.timeline,
            self.state.current_index,
            self.state.scene_progress_pct,
        )
    }

    pub fn view(&self) -> PlaybackView {
        PlaybackView {
            current_index: self.state.current_index,
            scene_id: self.current_scene().id.clone(),
            is_playing: self.state.is_playing,
            scene_progress_pct: self.state.scene_progress_pct,
            overall_progress_pct: self.overall_progress_pct(),
            has_completed: self.state.has_completed,
            revision: self.revision,
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Active (playing) time spent in the current scene.
    pub fn elapsed_in_scene(&self) -> Millis {
        self.clock.elapsed(self.now)
    }

    /// Virtual time at which the next timer fires, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/sequencer.rs"]
mod tests;
