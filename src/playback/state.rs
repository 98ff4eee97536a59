use crate::foundation::core::{SceneIndex, clamp_pct};

/// How scenes advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Timers advance scenes automatically.
    #[default]
    Autoplay,
    /// No timers run; only explicit transport moves the index.
    Manual,
}

/// Mutable playback position owned by exactly one sequencer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackState {
    pub current_index: SceneIndex,
    pub is_playing: bool,
    /// Progress through the current scene, `[0, 100]`.
    pub scene_progress_pct: f64,
    /// Latched once the last scene finished or playback was skipped to the end.
    pub has_completed: bool,
}

/// Inputs to [`PlaybackState::reduce`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackEvent {
    Play,
    Pause,
    Next,
    Previous,
    JumpTo(SceneIndex),
    SkipToEnd,
    Restart,
    /// Timer tick carrying the freshly measured scene progress.
    Progress(f64),
}

/// Shape of the timeline the reducer needs to know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub scene_count: usize,
    pub mode: PlaybackMode,
}

impl Bounds {
    fn last(self) -> usize {
        self.scene_count.saturating_sub(1)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::initial()
    }
}

impl PlaybackState {
    /// State at mount, before any autostart.
    pub fn initial() -> Self {
        Self {
            current_index: SceneIndex(0),
            is_playing: false,
            scene_progress_pct: 0.0,
            has_completed: false,
        }
    }

    /// Pure transition function.
    ///
    /// Invalid requests (out-of-range jumps, `previous` at the first scene, `play` in manual mode
    /// or after completion) return the state unchanged.
    pub fn reduce(self, event: PlaybackEvent, bounds: Bounds) -> Self {
        let last = bounds.last();
        match event {
            PlaybackEvent::Play => {
                if self.is_playing
                    || self.has_completed
                    || bounds.mode == PlaybackMode::Manual
                {
                    return self;
                }
                Self {
                    is_playing: true,
                    ..self
                }
            }
            PlaybackEvent::Pause => Self {
                is_playing: false,
                ..self
            },
            PlaybackEvent::Next => {
                if self.current_index.0 < last {
                    self.enter(SceneIndex(self.current_index.0 + 1))
                } else {
                    Self {
                        current_index: SceneIndex(last),
                        is_playing: false,
                        scene_progress_pct: 100.0,
                        has_completed: true,
                    }
                }
            }
            PlaybackEvent::Previous => {
                if self.current_index.0 == 0 {
                    return self;
                }
                self.enter(SceneIndex(self.current_index.0 - 1))
            }
            PlaybackEvent::JumpTo(idx) => {
                if idx.0 >= bounds.scene_count {
                    return self;
                }
                self.enter(idx)
            }
            PlaybackEvent::SkipToEnd => Self {
                current_index: SceneIndex(last),
                is_playing: false,
                scene_progress_pct: 100.0,
                has_completed: true,
            },
            PlaybackEvent::Restart => Self {
                current_index: SceneIndex(0),
                is_playing: bounds.mode == PlaybackMode::Autoplay,
                scene_progress_pct: 0.0,
                has_completed: false,
            },
            PlaybackEvent::Progress(pct) => Self {
                scene_progress_pct: clamp_pct(pct),
                ..self
            },
        }
    }

    fn enter(self, idx: SceneIndex) -> Self {
        Self {
            current_index: idx,
            is_playing: self.is_playing,
            scene_progress_pct: 0.0,
            has_completed: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/state.rs"]
mod tests;
