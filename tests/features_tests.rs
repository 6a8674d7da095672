// Host-side tests for feature-track parsing, onset replay on the piano floor,
// and the other offline inputs (analysis frames, config overrides).

use starburst_core::config::PianoLayout;
use starburst_core::constants::*;
use starburst_core::features::StemTrack;
use starburst_core::{
    BandEnergy, EngineConfig, FeatureTrack, FireworkEngine, FrameInput, OnsetCursor,
    PreAnalyzedSignal, SignalSource, StarburstError, VisualMode,
};

fn playing(t: f32) -> FrameInput<'static> {
    FrameInput {
        playback_sec: t,
        playing: true,
        spectrum: None,
    }
}

#[test]
fn energy_interpolates_between_samples() {
    let track = FeatureTrack::from_json(
        r#"{ "step": 0.5, "tracks": { "bass": { "energy": [0.0, 1.0, 0.5] } } }"#,
    )
    .unwrap();
    assert_eq!(track.step, 0.5);
    let at = |t| track.energy_at("bass", t).unwrap();
    assert_eq!(at(0.0), 0.0);
    assert!((at(0.25) - 0.5).abs() < 1e-6);
    assert!((at(0.75) - 0.75).abs() < 1e-6);
    assert_eq!(at(5.0), 0.5, "clamps past the end");
    assert_eq!(at(-1.0), 0.0, "clamps before the start");
    assert_eq!(track.energy_at("vocals", 0.3), None);
}

#[test]
fn byte_scaled_energy_is_normalized() {
    let track = FeatureTrack::from_json(
        r#"{ "tracks": { "drums": { "energy": [0, 255, 51] } } }"#,
    )
    .unwrap();
    assert_eq!(track.step, FEATURE_DEFAULT_STEP_SEC);
    let e = track.stem("drums").unwrap().energy.as_ref().unwrap();
    assert_eq!(e[1], 1.0);
    assert!((e[2] - 0.2).abs() < 1e-6);
}

#[test]
fn malformed_stems_are_skipped() {
    let track = FeatureTrack::from_json(
        r#"{
            "tracks": {
                "bass": { "energy": "loud" },
                "drums": { "events": [2.0, 1.0] },
                "other": 42,
                "vocals": { "energy": [0.2, 0.4], "events": ["x"] }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(track.stem_count(), 2);
    assert!(track.stem("bass").is_none());
    assert_eq!(track.stem("drums").unwrap().onsets, vec![1.0, 2.0]);
    let vocals = track.stem("vocals").unwrap();
    assert!(vocals.onsets.is_empty());
    assert!(vocals.energy.is_some());
}

#[test]
fn unusable_documents_are_errors() {
    assert!(matches!(
        FeatureTrack::from_json("{ not json"),
        Err(StarburstError::Json(_))
    ));
    assert!(matches!(
        FeatureTrack::from_json(r#"{ "tracks": {} }"#),
        Err(StarburstError::EmptyFeatureTrack)
    ));
    assert!(matches!(
        FeatureTrack::from_json(r#"{ "step": 0.1 }"#),
        Err(StarburstError::EmptyFeatureTrack)
    ));
    assert!(matches!(
        FeatureTrack::from_json(r#"{ "tracks": { "bass": { "energy": [] } } }"#),
        Err(StarburstError::EmptyFeatureTrack)
    ));
    assert!(matches!(
        FeatureTrack::from_json(r#"{ "step": 0, "tracks": { "bass": { "energy": [1] } } }"#),
        Err(StarburstError::InvalidStep(_))
    ));
}

#[test]
fn onsets_between_is_half_open() {
    let stem = StemTrack {
        energy: None,
        onsets: vec![1.0, 2.0, 3.0],
    };
    assert_eq!(stem.onsets_between(0.0, 1.0), &[1.0]);
    assert_eq!(stem.onsets_between(1.0, 2.5), &[2.0]);
    assert!(stem.onsets_between(3.0, 10.0).is_empty());
    assert!(stem.onsets_between(2.5, 1.0).is_empty());
}

#[test]
fn onset_cursor_only_reports_forward_motion() {
    let mut cursor = OnsetCursor::default();
    assert_eq!(cursor.advance(1.0), None);
    assert_eq!(cursor.advance(1.5), Some((1.0, 1.5)));
    assert_eq!(cursor.advance(1.5), None);
    assert_eq!(cursor.advance(0.2), None, "seek back re-anchors");
    assert_eq!(cursor.advance(0.4), Some((0.2, 0.4)));
    cursor.reset();
    assert_eq!(cursor.advance(9.0), None);
}

#[test]
fn firework_replays_each_onset_once() {
    let track = FeatureTrack::from_json(
        r#"{ "tracks": { "drums": { "events": [1.0, 2.0] } } }"#,
    )
    .unwrap();
    let mut engine = FireworkEngine::new(EngineConfig::default(), 1280.0, 720.0, 3);
    engine.set_overlay(Some(track));

    engine.update(&playing(0.9));
    assert_eq!(engine.stats().onset_batches, 0);
    engine.update(&playing(1.1));
    assert_eq!(engine.stats().onset_batches, 1);
    assert!(!engine.sim.particles.is_empty());

    // Drums own the second quarter of the keyboard.
    let region = engine.stem_region(1);
    let cw = engine.column_width();
    let x_range = region.start as f32 * cw..=region.end as f32 * cw;
    assert!(engine
        .sim
        .particles
        .iter()
        .filter(|p| !p.is_note())
        .all(|p| (x_range.start() - 40.0..=x_range.end() + 40.0).contains(&p.pos.x)));

    engine.update(&playing(1.5));
    assert_eq!(engine.stats().onset_batches, 1);
    engine.update(&playing(2.5));
    assert_eq!(engine.stats().onset_batches, 2);
    assert_eq!(engine.stats().column_batches, 0);
}

#[test]
fn overlay_energy_lights_stem_regions() {
    let track = FeatureTrack::from_json(
        r#"{ "step": 1.0, "tracks": { "vocals": { "energy": [0.5, 0.5] } } }"#,
    )
    .unwrap();
    let mut engine = FireworkEngine::new(EngineConfig::default(), 880.0, 600.0, 4);
    engine.set_overlay(Some(track));
    engine.update(&FrameInput {
        playback_sec: 0.5,
        playing: false,
        spectrum: None,
    });
    let vocals = engine.stem_region(3);
    assert_eq!(vocals, 66..88);
    for (i, &c) in engine.columns().iter().enumerate() {
        let want = if vocals.contains(&i) { 0.5 } else { 0.0 };
        assert_eq!(c, want, "column {i}");
    }
}

#[test]
fn spectrum_drives_columns_without_overlay() {
    let mut engine = FireworkEngine::new(EngineConfig::default(), 880.0, 600.0, 5);
    let spectrum = vec![255u8; 512];
    engine.update(&FrameInput {
        playback_sec: 1.0,
        playing: false,
        spectrum: Some(&spectrum),
    });
    assert!(engine.columns().iter().all(|&c| c == 1.0));
    // Paused: nothing launches.
    assert!(engine.sim.particles.is_empty());

    engine.update(&FrameInput {
        playback_sec: 1.0,
        playing: false,
        spectrum: None,
    });
    assert!(engine.columns().iter().all(|&c| c == 0.0));
}

#[test]
fn piano_columns_map_to_ascending_bins() {
    let piano = PianoLayout::default();
    assert!((piano.column_hz(0) - PIANO_MIN_HZ).abs() < 1e-3);
    let bins: Vec<usize> = (0..PIANO_COLUMNS).map(|c| piano.bin_for_column(c, 512)).collect();
    assert!(bins.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(bins[0], 0);
    assert!(bins[PIANO_COLUMNS - 1] < 512);
    assert_eq!(piano.bin_for_column(87, 8), 7);
}

#[test]
fn analysis_frames_come_in_fours() {
    let signal = PreAnalyzedSignal::from_flat(&[1.0, 2.0, 3.0, 4.0, 300.0, -5.0, 0.0, 0.0]).unwrap();
    assert_eq!(signal.len(), 2);
    assert_eq!(signal.energy_at(0.0), Some(BandEnergy::new(1.0, 2.0, 3.0, 4.0)));
    let second = signal.energy_at(1.0 / 30.0 + 1e-4).unwrap();
    assert_eq!(second.sub_bass, 255.0);
    assert_eq!(second.kick, 0.0);
    assert_eq!(signal.energy_at(1.0), None);
    assert_eq!(signal.energy_at(-0.1), None);

    assert!(matches!(
        PreAnalyzedSignal::from_flat(&[1.0, 2.0, 3.0]),
        Err(StarburstError::RaggedFrames(3))
    ));
}

#[test]
fn config_overrides_are_partial_and_validated() {
    let cfg = EngineConfig::from_json(r#"{ "particle_cap": 500, "piano": { "columns": 61 } }"#).unwrap();
    assert_eq!(cfg.particle_cap, 500);
    assert_eq!(cfg.piano.columns, 61);
    assert_eq!(cfg.piano.max_hz, PIANO_MAX_HZ);
    assert_eq!(cfg.realtime, EngineConfig::default().realtime);

    assert!(matches!(
        EngineConfig::from_json(r#"{ "piano": { "columns": 0 } }"#),
        Err(StarburstError::InvalidConfig(_))
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{ "realtime": { "bass_range": [4, 4] } }"#),
        Err(StarburstError::InvalidConfig(_))
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{ "particle_cap": "many" }"#),
        Err(StarburstError::Json(_))
    ));
}

#[test]
fn visual_modes_parse_by_name() {
    assert_eq!("universe".parse::<VisualMode>().unwrap(), VisualMode::Universe);
    assert_eq!(" Piano-Floor ".parse::<VisualMode>().unwrap(), VisualMode::Firework);
    assert!(matches!(
        "disco".parse::<VisualMode>(),
        Err(StarburstError::UnknownMode(m)) if m == "disco"
    ));
    assert_eq!(VisualMode::Universe.next().next(), VisualMode::Universe);
    assert_eq!(VisualMode::Firework.to_string(), "firework");
}
