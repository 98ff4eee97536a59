use super::*;
use crate::foundation::core::SceneIndex;
use crate::timeline::model::{Scene, VisualKey};

fn timeline() -> Timeline {
    Timeline::new(vec![
        Scene::new("a", 1000, VisualKey::Intro),
        Scene::new("b", 500, VisualKey::Cta),
    ])
    .unwrap()
}

#[test]
fn render_at_ignores_manual_mode() {
    let f = render_at(
        &timeline(),
        SequencerOpts::manual(),
        &RenderOpts::default(),
        Millis(1200),
    )
    .unwrap();
    assert_eq!(f.scene_index, SceneIndex(1));
    assert_eq!(f.scene_id, "b");
}

#[test]
fn storyboard_covers_start_and_end() {
    let frames = render_storyboard(
        &timeline(),
        SequencerOpts::default(),
        &RenderOpts::default(),
        Millis(400),
    )
    .unwrap();
    let times: Vec<u64> = frames.iter().map(|(t, _)| t.0).collect();
    assert_eq!(times, vec![0, 400, 800, 1200, 1500]);
    assert_eq!(frames[0].1.progress_fraction(), Some(0.0));
    assert_eq!(frames.last().unwrap().1.progress_fraction(), Some(1.0));
    assert_eq!(frames[3].1.scene_id, "b");
}

#[test]
fn storyboard_rejects_zero_step() {
    assert!(
        render_storyboard(
            &timeline(),
            SequencerOpts::default(),
            &RenderOpts::default(),
            Millis(0),
        )
        .is_err()
    );
}
