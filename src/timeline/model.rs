use std::collections::BTreeSet;

use crate::foundation::core::{Millis, SceneIndex};
use crate::foundation::error::{ShowreelError, ShowreelResult};

/// Render branch selector for a scene.
///
/// Unknown tags in JSON deserialize to [`VisualKey::Generic`] so a newer document never fails to
/// load on an older renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualKey {
    Intro,
    Problem,
    Solution,
    PhaseA,
    PhaseB,
    Metrics,
    Cta,
    #[default]
    #[serde(other)]
    Generic,
}

impl VisualKey {
    /// Every branch, in declaration order.
    pub const ALL: [VisualKey; 8] = [
        Self::Intro,
        Self::Problem,
        Self::Solution,
        Self::PhaseA,
        Self::PhaseB,
        Self::Metrics,
        Self::Cta,
        Self::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Problem => "problem",
            Self::Solution => "solution",
            Self::PhaseA => "phase_a",
            Self::PhaseB => "phase_b",
            Self::Metrics => "metrics",
            Self::Cta => "cta",
            Self::Generic => "generic",
        }
    }
}

/// One timed unit of a presentation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub id: String,
    pub duration_ms: Millis,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub narration: String,
    #[serde(default)]
    pub visual: VisualKey,
    /// Lines revealed one after another while the scene plays.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

impl Scene {
    pub fn new(id: impl Into<String>, duration_ms: u64, visual: VisualKey) -> Self {
        Self {
            id: id.into(),
            duration_ms: Millis(duration_ms),
            title: String::new(),
            subtitle: String::new(),
            narration: String::new(),
            visual,
            highlights: Vec::new(),
        }
    }

    pub fn validate(&self) -> ShowreelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ShowreelError::validation("scene id must be non-empty"));
        }
        if self.duration_ms.0 == 0 {
            return Err(ShowreelError::validation(format!(
                "scene '{}' duration_ms must be > 0",
                self.id
            )));
        }
        if self.highlights.iter().any(|h| h.trim().is_empty()) {
            return Err(ShowreelError::validation(format!(
                "scene '{}' has an empty highlight line",
                self.id
            )));
        }
        Ok(())
    }
}

/// Validated, immutable ordered list of scenes.
///
/// Construction is the only place configuration errors surface; every accessor afterwards can
/// rely on the timeline being non-empty with strictly positive durations.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    scenes: Vec<Scene>,
    /// `starts[i]` is the sum of durations of scenes before `i`.
    #[serde(skip)]
    starts: Vec<u64>,
    #[serde(skip)]
    total: u64,
}

impl Timeline {
    pub fn new(scenes: Vec<Scene>) -> ShowreelResult<Self> {
        if scenes.is_empty() {
            return Err(ShowreelError::validation(
                "timeline must contain at least one scene",
            ));
        }

        let mut seen = BTreeSet::new();
        let mut starts = Vec::with_capacity(scenes.len());
        let mut total = 0u64;
        for scene in &scenes {
            scene.validate()?;
            if !seen.insert(scene.id.as_str()) {
                return Err(ShowreelError::validation(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
            starts.push(total);
            total = total.checked_add(scene.duration_ms.0).ok_or_else(|| {
                ShowreelError::validation("total timeline duration overflows u64 milliseconds")
            })?;
        }

        Ok(Self {
            scenes,
            starts,
            total,
        })
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn get(&self, idx: SceneIndex) -> Option<&Scene> {
        self.scenes.get(idx.0)
    }

    /// Scene at `idx`, clamped into range.
    pub fn scene(&self, idx: SceneIndex) -> &Scene {
        &self.scenes[idx.0.min(self.last_index().0)]
    }

    pub fn last_index(&self) -> SceneIndex {
        SceneIndex(self.scenes.len() - 1)
    }

    pub fn contains(&self, idx: SceneIndex) -> bool {
        idx.0 < self.scenes.len()
    }

    pub fn total_ms(&self) -> Millis {
        Millis(self.total)
    }

    /// Offset of the scene's start from the beginning of the timeline.
    pub fn start_of(&self, idx: SceneIndex) -> Millis {
        match self.starts.get(idx.0) {
            Some(&s) => Millis(s),
            None => Millis(self.total),
        }
    }

    pub fn position_of(&self, id: &str) -> Option<SceneIndex> {
        self.scenes.iter().position(|s| s.id == id).map(SceneIndex)
    }

    /// Scene that is active `at` milliseconds into uninterrupted playback.
    ///
    /// Times at or beyond the total duration map to the last scene.
    pub fn index_at(&self, at: Millis) -> SceneIndex {
        // `starts` is sorted ascending and starts at 0.
        let i = self.starts.partition_point(|&s| s <= at.0);
        SceneIndex(i.saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
