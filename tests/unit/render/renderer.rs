use super::*;
use crate::playback::progress::overall_progress;

fn timeline() -> Timeline {
    let mut metrics = Scene::new("metrics", 4000, VisualKey::Metrics);
    metrics.title = "Results".to_owned();
    metrics.highlights = vec!["a".into(), "b".into(), "c".into(), "d".into()];

    let mut cta = Scene::new("cta", 2000, VisualKey::Cta);
    cta.title = "Book a demo".to_owned();
    cta.narration = "Thanks for watching".to_owned();

    let mut intro = Scene::new("intro", 1000, VisualKey::Intro);
    intro.title = "Welcome".to_owned();

    Timeline::new(vec![intro, metrics, cta]).unwrap()
}

fn view(t: &Timeline, idx: usize, pct: f64, playing: bool, completed: bool) -> PlaybackView {
    PlaybackView {
        current_index: SceneIndex(idx),
        scene_id: t.scene(SceneIndex(idx)).id.clone(),
        is_playing: playing,
        scene_progress_pct: pct,
        overall_progress_pct: overall_progress(t, SceneIndex(idx), pct),
        has_completed: completed,
        revision: 0,
    }
}

fn title_opacity(frame: &Frame) -> f64 {
    frame
        .nodes
        .iter()
        .find_map(|n| match n {
            VisualNode::Text {
                role: TextRole::Title,
                opacity,
                ..
            } => Some(*opacity),
            _ => None,
        })
        .unwrap()
}

fn revealed_tiles(frame: &Frame) -> usize {
    frame
        .nodes
        .iter()
        .filter(|n| matches!(n, VisualNode::Tile { revealed: true, .. }))
        .count()
}

#[test]
fn every_visual_key_renders_with_chrome() {
    let opts = RenderOpts::default();
    for key in VisualKey::ALL {
        let mut s = Scene::new("only", 1000, key);
        s.title = "T".to_owned();
        let t = Timeline::new(vec![s]).unwrap();
        let f = Renderer::render(&t, &view(&t, 0, 50.0, true, false), &opts);

        assert_eq!(f.visual, key);
        assert!(matches!(f.nodes.first(), Some(VisualNode::Panel { .. })));
        assert!(matches!(f.nodes.last(), Some(VisualNode::ProgressBar { .. })));
        assert_eq!(f.texts(TextRole::Title).collect::<Vec<_>>(), vec!["T"]);
    }
}

#[test]
fn rendering_is_idempotent() {
    let t = timeline();
    let v = view(&t, 1, 37.0, true, false);
    let opts = RenderOpts::default();
    let a = Renderer::render(&t, &v, &opts);
    let b = Renderer::render(&t, &v, &opts);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn highlights_are_revealed_with_progress() {
    let t = timeline();
    let opts = RenderOpts::default();
    let f = Renderer::render(&t, &view(&t, 1, 0.0, true, false), &opts);
    assert_eq!(revealed_tiles(&f), 0);
    let f = Renderer::render(&t, &view(&t, 1, 30.0, true, false), &opts);
    assert_eq!(revealed_tiles(&f), 2);
    let f = Renderer::render(&t, &view(&t, 1, 100.0, true, false), &opts);
    assert_eq!(revealed_tiles(&f), 4);
}

#[test]
fn paused_at_scene_start_shows_everything() {
    let t = timeline();
    let f = Renderer::render(&t, &view(&t, 1, 0.0, false, false), &RenderOpts::default());
    assert_eq!(revealed_tiles(&f), 4);
    assert_eq!(title_opacity(&f), 1.0);
}

#[test]
fn paused_mid_scene_keeps_the_staged_reveal() {
    let t = timeline();
    let opts = RenderOpts::default();
    let f = Renderer::render(&t, &view(&t, 1, 30.0, false, false), &opts);
    assert_eq!(revealed_tiles(&f), 2);
    let f = Renderer::render(&t, &view(&t, 1, 1.0, false, false), &opts);
    assert_eq!(revealed_tiles(&f), 1);
}

#[test]
fn title_fades_in_over_enter_window() {
    let t = timeline();
    let opts = RenderOpts {
        enter: Millis(400),
        enter_ease: Ease::Linear,
        ..RenderOpts::default()
    };
    // Scene "intro" lasts 1000 ms: 20% == 200 ms == half of the entrance window.
    let f = Renderer::render(&t, &view(&t, 0, 0.0, true, false), &opts);
    assert_eq!(title_opacity(&f), 0.0);
    let f = Renderer::render(&t, &view(&t, 0, 20.0, true, false), &opts);
    assert!((title_opacity(&f) - 0.5).abs() < 1e-9);
    let f = Renderer::render(&t, &view(&t, 0, 80.0, true, false), &opts);
    assert_eq!(title_opacity(&f), 1.0);
}

#[test]
fn scene_dots_track_position() {
    let t = timeline();
    let f = Renderer::render(&t, &view(&t, 1, 10.0, true, false), &RenderOpts::default());
    let dots = f
        .nodes
        .iter()
        .find_map(|n| match n {
            VisualNode::SceneDots { dots, .. } => Some(dots.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        dots,
        vec![DotState::Done, DotState::Current, DotState::Upcoming]
    );

    let f = Renderer::render(&t, &view(&t, 2, 100.0, false, true), &RenderOpts::default());
    assert!(f.nodes.iter().any(|n| matches!(
        n,
        VisualNode::SceneDots { dots, .. } if dots.iter().all(|d| *d == DotState::Done)
    )));
}

#[test]
fn progress_bar_mirrors_overall_progress() {
    let t = timeline();
    let f = Renderer::render(&t, &view(&t, 1, 50.0, true, false), &RenderOpts::default());
    // (1000 + 2000) / 7000
    let expected = 3000.0 / 7000.0;
    assert!((f.progress_fraction().unwrap() - expected).abs() < 1e-9);
}

#[test]
fn cta_button_defaults_label_and_pulses_when_waiting() {
    let t = timeline();
    let f = Renderer::render(&t, &view(&t, 2, 100.0, false, true), &RenderOpts::default());
    let button = f
        .nodes
        .iter()
        .find_map(|n| match n {
            VisualNode::Button { label, pulsing, .. } => Some((label.clone(), *pulsing)),
            _ => None,
        })
        .unwrap();
    assert_eq!(button, ("Get started".to_owned(), true));
    assert_eq!(
        f.texts(TextRole::Caption).collect::<Vec<_>>(),
        vec!["Thanks for watching"]
    );
}

#[test]
fn layout_stays_inside_canvas() {
    let t = timeline();
    let opts = RenderOpts {
        canvas: Canvas::new(640, 360).unwrap(),
        ..RenderOpts::default()
    };
    let bounds = opts.canvas.bounds();
    for idx in 0..t.len() {
        let f = Renderer::render(&t, &view(&t, idx, 60.0, true, false), &opts);
        for node in &f.nodes {
            let rect = match node {
                VisualNode::Panel { rect, .. }
                | VisualNode::Text { rect, .. }
                | VisualNode::Tile { rect, .. }
                | VisualNode::Button { rect, .. }
                | VisualNode::ProgressBar { rect, .. }
                | VisualNode::SceneDots { rect, .. } => *rect,
            };
            assert!(rect.x0 >= bounds.x0 && rect.x1 <= bounds.x1, "{node:?}");
            assert!(rect.y0 >= bounds.y0 && rect.y1 <= bounds.y1, "{node:?}");
        }
    }
}
