// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use starburst_core::constants as engine;
use starburst_core::RealtimeBandLayout;

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_matches_default_band_layout() {
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert_eq!(ANALYSER_FFT_SIZE as usize, engine::PIANO_FFT_SIZE);

    let bins = ANALYSER_FFT_SIZE as usize / 2;
    let layout = RealtimeBandLayout::default();
    assert!(layout.probe_bins.iter().all(|&b| b < bins));
    for (lo, hi) in [layout.bass_range, layout.mid_range, layout.high_range] {
        assert!(lo < hi && hi <= bins);
    }
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn front_end_constants_are_sane() {
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(FPS_LOG_INTERVAL_SEC > 0.0);
    let ids = [CANVAS_ID, AUDIO_ID, OVERLAY_ID, OVERLAY_OK_ID, OVERLAY_CLOSE_ID, HINT_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(ids[i + 1..].iter().all(|b| b != a), "duplicate id {a}");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn thresholds_are_ordered() {
    // Realtime tiers get progressively easier to trigger toward the highs.
    assert!(engine::REALTIME_BASS_GATE > engine::REALTIME_MID_GATE);
    assert!(engine::REALTIME_MID_GATE > engine::REALTIME_HIGH_GATE);
    assert!(engine::PHONETIC_HIGH_PLOSIVE > engine::PHONETIC_HIGH_GATE);
    assert!(engine::KEY_GLOW_INTENSITY > engine::KEY_LIT_INTENSITY);
    assert!(engine::COLUMN_FIRE_INTENSITY > engine::KEY_GLOW_INTENSITY);
    assert!(engine::ONSET_MIN_INTENSITY > 0.0 && engine::ONSET_MIN_INTENSITY <= 1.0);

    assert!(engine::BATTLE_COOLDOWN_SEC > 0.0);
    for t in engine::CLIMAX_THRESHOLDS {
        assert!(t > 0.0 && t <= 255.0);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn star_counts_are_consistent() {
    assert!(engine::STAR_COUNT_MIN <= engine::STAR_COUNT_REFERENCE);
    assert!(engine::STAR_COUNT_REFERENCE <= engine::STAR_COUNT_MAX);
    assert!(engine::STAR_SETTLE_RATE > 0.0 && engine::STAR_SETTLE_RATE < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn visibility_tables_are_well_formed() {
    assert!(engine::VIS_RAMP_DOWN.iter().all(|&r| r > 0.0));
    assert!(engine::VIS_ENTRY_SPAN_SEC.iter().all(|&s| s > 0.0));
    let mut exits = engine::VIS_EXIT_DELAYS_SEC;
    exits.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(exits[0], 0.0);
}

#[test]
fn tick_matches_sixty_hertz() {
    assert!((engine::TICK_SEC * 60.0 - 1.0).abs() < 1e-6);
    assert!((engine::ANALYSIS_FRAME_RATE - 30.0).abs() < f32::EPSILON);
}
