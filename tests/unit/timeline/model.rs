use super::*;

fn three() -> Timeline {
    Timeline::new(vec![
        Scene::new("a", 5000, VisualKey::Problem),
        Scene::new("b", 8000, VisualKey::Solution),
        Scene::new("c", 6000, VisualKey::Cta),
    ])
    .unwrap()
}

#[test]
fn offsets_and_total() {
    let t = three();
    assert_eq!(t.len(), 3);
    assert_eq!(t.total_ms(), Millis(19_000));
    assert_eq!(t.start_of(SceneIndex(0)), Millis(0));
    assert_eq!(t.start_of(SceneIndex(1)), Millis(5000));
    assert_eq!(t.start_of(SceneIndex(2)), Millis(13_000));
    assert_eq!(t.start_of(SceneIndex(9)), Millis(19_000));
    assert_eq!(t.last_index(), SceneIndex(2));
}

#[test]
fn index_at_boundaries() {
    let t = three();
    assert_eq!(t.index_at(Millis(0)), SceneIndex(0));
    assert_eq!(t.index_at(Millis(4999)), SceneIndex(0));
    assert_eq!(t.index_at(Millis(5000)), SceneIndex(1));
    assert_eq!(t.index_at(Millis(13_000)), SceneIndex(2));
    assert_eq!(t.index_at(Millis(99_000)), SceneIndex(2));
}

#[test]
fn rejects_empty_timeline() {
    let err = Timeline::new(vec![]).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn rejects_zero_duration() {
    let err = Timeline::new(vec![Scene::new("a", 0, VisualKey::Intro)]).unwrap_err();
    assert!(err.to_string().contains("duration_ms"));
}

#[test]
fn rejects_duplicate_and_blank_ids() {
    assert!(
        Timeline::new(vec![
            Scene::new("a", 10, VisualKey::Intro),
            Scene::new("a", 10, VisualKey::Cta),
        ])
        .is_err()
    );
    assert!(Timeline::new(vec![Scene::new("  ", 10, VisualKey::Intro)]).is_err());
}

#[test]
fn rejects_blank_highlight_lines() {
    let mut s = Scene::new("metrics", 10, VisualKey::Metrics);
    s.highlights = vec!["4x faster".into(), "   ".into()];
    let err = Timeline::new(vec![s]).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("empty highlight"));
}

#[test]
fn lookup_by_id_and_clamped_scene() {
    let t = three();
    assert_eq!(t.position_of("b"), Some(SceneIndex(1)));
    assert_eq!(t.position_of("zz"), None);
    assert_eq!(t.scene(SceneIndex(42)).id, "c");
    assert!(t.get(SceneIndex(3)).is_none());
    assert!(t.contains(SceneIndex(2)));
    assert!(!t.contains(SceneIndex(3)));
}

#[test]
fn unknown_visual_key_falls_back_to_generic() {
    let s: Scene =
        serde_json::from_str(r#"{"id":"x","duration_ms":100,"visual":"hologram"}"#).unwrap();
    assert_eq!(s.visual, VisualKey::Generic);
    let s: Scene =
        serde_json::from_str(r#"{"id":"x","duration_ms":100,"visual":"phase_b"}"#).unwrap();
    assert_eq!(s.visual, VisualKey::PhaseB);
}

#[test]
fn visual_key_names_match_serde() {
    for key in VisualKey::ALL {
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", key.as_str()));
    }
}
