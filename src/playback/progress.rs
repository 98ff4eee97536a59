use crate::foundation::core::{Millis, SceneIndex, clamp_pct};
use crate::timeline::model::Timeline;

/// Overall percent-complete for a global progress bar.
///
/// `(sum of durations before idx + pct/100 * duration(idx)) / total * 100`, clamped to
/// `[0, 100]`. Indices past the end are clamped to the last scene.
pub fn overall_progress(timeline: &Timeline, idx: SceneIndex, scene_pct: f64) -> f64 {
    let idx = SceneIndex(idx.0.min(timeline.last_index().0));
    let total = timeline.total_ms().as_f64();
    if total <= 0.0 {
        return 0.0;
    }
    let done = timeline.start_of(idx).as_f64();
    let current = timeline.scene(idx).duration_ms.as_f64() * clamp_pct(scene_pct) / 100.0;
    clamp_pct((done + current) / total * 100.0)
}

/// Time spent in the current scene implied by its progress percentage.
pub fn scene_elapsed(timeline: &Timeline, idx: SceneIndex, scene_pct: f64) -> Millis {
    let dur = timeline.scene(idx).duration_ms.as_f64();
    Millis((dur * clamp_pct(scene_pct) / 100.0).round() as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/progress.rs"]
mod tests;
