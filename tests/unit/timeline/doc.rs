use super::*;

const MINIMAL: &str = r#"{
    "scenes": [
        { "id": "a", "duration_ms": 1000, "title": "Hello" },
        { "id": "b", "duration_ms": 2000, "visual": "cta" }
    ]
}"#;

#[test]
fn defaults_fill_missing_sections() {
    let doc = TimelineDoc::from_reader(MINIMAL.as_bytes()).unwrap();
    assert_eq!(doc.version, DOC_VERSION);
    assert_eq!(doc.canvas, Canvas::default());
    assert!(doc.playback.autostart);
    assert_eq!(doc.playback.mode, PlaybackMode::Autoplay);

    let opts = doc.sequencer_opts();
    assert_eq!(opts.tick, SequencerOpts::DEFAULT_TICK);

    let t = doc.timeline().unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t.total_ms(), Millis(3000));
}

#[test]
fn manual_mode_and_tick_are_read() {
    let json = r#"{
        "playback": { "mode": "manual", "autostart": false, "tick_ms": 50 },
        "scenes": [ { "id": "a", "duration_ms": 10 } ]
    }"#;
    let doc = TimelineDoc::from_reader(json.as_bytes()).unwrap();
    let opts = doc.sequencer_opts();
    assert_eq!(opts.mode, PlaybackMode::Manual);
    assert!(!opts.autostart);
    assert_eq!(opts.tick, Millis(50));
}

#[test]
fn rejects_unknown_version_and_zero_tick() {
    let json = r#"{ "version": "9", "scenes": [ { "id": "a", "duration_ms": 10 } ] }"#;
    let doc = TimelineDoc::from_reader(json.as_bytes()).unwrap();
    assert!(doc.timeline().is_err());

    let json = r#"{ "playback": { "tick_ms": 0 }, "scenes": [ { "id": "a", "duration_ms": 10 } ] }"#;
    let doc = TimelineDoc::from_reader(json.as_bytes()).unwrap();
    assert!(doc.validate().unwrap_err().is_validation());
}

#[test]
fn empty_scene_list_is_a_configuration_error() {
    let doc = TimelineDoc::from_reader(r#"{ "scenes": [] }"#.as_bytes()).unwrap();
    assert!(doc.timeline().unwrap_err().is_validation());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = TimelineDoc::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = TimelineDoc::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("io error:"));
}
