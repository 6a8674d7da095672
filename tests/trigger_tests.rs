// Host-side tests for cooldowns and the trigger policies.

use rand::rngs::StdRng;
use rand::SeedableRng;
use starburst_core::constants::*;
use starburst_core::cooldown::{Cooldowns, EffectCategory};
use starburst_core::signal::{BandEnergy, RealtimeLevels};
use starburst_core::simulation::BurstKind;
use starburst_core::triggers::{self, Effect, Effects, TriggerFrame};
use starburst_core::Color;
use std::f32::consts::PI;

fn frame(bands: BandEnergy, playback_sec: f32, now: f64) -> TriggerFrame {
    TriggerFrame {
        bands,
        playback_sec,
        now,
        width: 1000.0,
        height: 800.0,
        battle_active: false,
        shift_active: false,
    }
}

fn bursts(effects: &Effects) -> Vec<(BurstKind, &Effect)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Burst { kind, .. } => Some((*kind, e)),
            _ => None,
        })
        .collect()
}

#[test]
fn cooldowns_start_ready_and_block_until_deadline() {
    let mut cd = Cooldowns::new();
    assert!(cd.ready(EffectCategory::Meteor, 0.0));
    assert_eq!(cd.next_allowed(EffectCategory::Meteor), None);

    assert!(cd.try_fire(EffectCategory::Meteor, 1.0, 0.25));
    assert!(!cd.try_fire(EffectCategory::Meteor, 1.2, 0.25));
    assert_eq!(cd.next_allowed(EffectCategory::Meteor), Some(1.25));
    assert!(cd.ready(EffectCategory::Meteor, 1.25));

    // Categories are independent.
    assert!(cd.ready(EffectCategory::Supernova, 1.1));
}

#[test]
fn realtime_bass_respects_its_cooldown() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut cd = Cooldowns::new();
    let levels = RealtimeLevels {
        bass: 230.0,
        mid: 0.0,
        high: 0.0,
    };

    let mut out = Effects::new();
    triggers::realtime(&mut rng, &mut cd, &levels, &frame(BandEnergy::SILENT, 1.0, 0.0), &mut out);
    assert_eq!(out.len(), 1);

    out.clear();
    triggers::realtime(&mut rng, &mut cd, &levels, &frame(BandEnergy::SILENT, 1.0, 0.5), &mut out);
    assert!(out.is_empty());

    triggers::realtime(&mut rng, &mut cd, &levels, &frame(BandEnergy::SILENT, 1.0, 0.6), &mut out);
    assert_eq!(out.len(), 1);
}

#[test]
fn realtime_tiers_land_in_their_screen_bands() {
    let mut rng = StdRng::seed_from_u64(2);
    let levels = RealtimeLevels {
        bass: 255.0,
        mid: 255.0,
        high: 255.0,
    };
    for _ in 0..50 {
        let mut cd = Cooldowns::new();
        let mut out = Effects::new();
        triggers::realtime(&mut rng, &mut cd, &levels, &frame(BandEnergy::SILENT, 1.0, 0.0), &mut out);
        assert_eq!(out.len(), 3);
        for (kind, effect) in bursts(&out) {
            let Effect::Burst { at, .. } = effect else { unreachable!() };
            let y_frac = match kind {
                BurstKind::Bass => 0.8,
                BurstKind::Mid => 0.5,
                BurstKind::High => 0.2,
            };
            assert!(at.y >= 800.0 * y_frac && at.y <= 800.0 * (y_frac + 0.1));
            assert!(at.x >= 0.0 && at.x <= 1000.0);
        }
    }
}

#[test]
fn realtime_levels_at_the_gate_do_not_fire() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut cd = Cooldowns::new();
    let levels = RealtimeLevels {
        bass: REALTIME_BASS_GATE,
        mid: REALTIME_MID_GATE,
        high: REALTIME_HIGH_GATE,
    };
    let mut out = Effects::new();
    triggers::realtime(&mut rng, &mut cd, &levels, &frame(BandEnergy::SILENT, 1.0, 0.0), &mut out);
    assert!(out.is_empty());
}

#[test]
fn phonetic_high_needles_point_upward() {
    let mut rng = StdRng::seed_from_u64(4);
    for i in 0..200 {
        let mut cd = Cooldowns::new();
        let mut out = Effects::new();
        let highs = if i % 2 == 0 { 150.0 } else { 230.0 };
        let bands = BandEnergy::new(0.0, 0.0, 0.0, highs);
        triggers::phonetic(&mut rng, &mut cd, &frame(bands, 1.0, 0.0), &mut out);
        let found = bursts(&out);
        let [(kind, Effect::Burst { color, opts, .. })] = found[..] else {
            panic!("expected one burst, got {:?}", out);
        };
        assert_eq!(kind, BurstKind::High);
        let dir = opts.direction.unwrap();
        assert!((-PI..=0.0).contains(&dir), "direction {dir}");
        assert_eq!(opts.spread, Some(0.1));
        if highs > PHONETIC_HIGH_PLOSIVE {
            assert_eq!(*color, Color::WHITE);
            assert_eq!(opts.count, Some(30));
        } else {
            assert_eq!(opts.count, Some(15));
        }
    }
}

#[test]
fn phonetic_mid_bloom_tracks_richness() {
    let mut rng = StdRng::seed_from_u64(5);

    // Vowel-heavy: vocals far above highs.
    let mut out = Effects::new();
    let bands = BandEnergy::new(0.0, 0.0, 200.0, 0.0);
    triggers::phonetic(&mut rng, &mut Cooldowns::new(), &frame(bands, 1.0, 0.0), &mut out);
    let found = bursts(&out);
    let [(BurstKind::Mid, Effect::Burst { color, opts, .. })] = found[..] else {
        panic!("expected a mid bloom, got {:?}", out);
    };
    assert_eq!(*color, Color::hsl(280.0, 80.0, 65.0));
    assert_eq!(opts.size_scale, 2.5);

    // Balanced: richness below the split.
    let mut out = Effects::new();
    let bands = BandEnergy::new(0.0, 0.0, 200.0, 130.0);
    triggers::phonetic(&mut rng, &mut Cooldowns::new(), &frame(bands, 1.0, 0.0), &mut out);
    let found = bursts(&out);
    let [(BurstKind::Mid, Effect::Burst { color, opts, .. })] = found[..] else {
        panic!("expected a mid bloom, got {:?}", out);
    };
    assert_eq!(*color, Color::hsl(200.0, 80.0, 65.0));
    assert_eq!(opts.size_scale, 1.2);
}

#[test]
fn phonetic_bass_lands_low_and_respects_cooldown() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut cd = Cooldowns::new();
    let bands = BandEnergy::new(220.0, 0.0, 0.0, 0.0);

    let mut out = Effects::new();
    triggers::phonetic(&mut rng, &mut cd, &frame(bands, 1.0, 0.0), &mut out);
    let found = bursts(&out);
    let [(BurstKind::Bass, Effect::Burst { at, .. })] = found[..] else {
        panic!("expected a bass burst, got {:?}", out);
    };
    assert_eq!(at.y, 800.0 * 0.8);

    out.clear();
    triggers::phonetic(&mut rng, &mut cd, &frame(bands, 1.0, 0.3), &mut out);
    assert!(out.is_empty());
    triggers::phonetic(&mut rng, &mut cd, &frame(bands, 1.0, 0.4), &mut out);
    assert_eq!(out.len(), 1);
}

#[test]
fn battles_wait_for_playback_and_energy() {
    let mut rng = StdRng::seed_from_u64(7);
    let loud = BandEnergy::new(200.0, 0.0, 0.0, 0.0);
    let count = |rng: &mut StdRng, bands: BandEnergy, playback: f32, active: bool| {
        let mut cd = Cooldowns::new();
        let mut n = 0;
        for i in 0..20_000 {
            let mut f = frame(bands, playback, i as f64 * 10.0);
            f.battle_active = active;
            let mut out = Effects::new();
            triggers::universe_policies(rng, &mut cd, &f, &mut out);
            n += out.iter().filter(|e| **e == Effect::ShipBattle).count();
        }
        n
    };

    assert_eq!(count(&mut rng, loud, 5.0, false), 0);
    assert_eq!(count(&mut rng, BandEnergy::new(100.0, 0.0, 0.0, 0.0), 20.0, false), 0);
    assert_eq!(count(&mut rng, loud, 20.0, true), 0);
    // 20k draws at 0.0005: expected 10.
    let fired = count(&mut rng, loud, 20.0, false);
    assert!((1..=30).contains(&fired), "fired {fired}");
}

#[test]
fn meteors_need_bright_vocals_or_highs() {
    let mut rng = StdRng::seed_from_u64(8);
    let meteors = |rng: &mut StdRng, bands: BandEnergy| {
        let mut cd = Cooldowns::new();
        let mut n = 0;
        for i in 0..2000 {
            let mut out = Effects::new();
            triggers::universe_policies(rng, &mut cd, &frame(bands, 1.0, i as f64), &mut out);
            n += out.iter().filter(|e| **e == Effect::Meteor).count();
        }
        n
    };
    assert_eq!(meteors(&mut rng, BandEnergy::new(0.0, 0.0, 200.0, 170.0)), 0);
    assert!(meteors(&mut rng, BandEnergy::new(0.0, 0.0, 230.0, 0.0)) > 0);
    assert!(meteors(&mut rng, BandEnergy::new(0.0, 0.0, 0.0, 190.0)) > 0);
}

#[test]
fn climax_camera_shift_waits_for_idle_field() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut cd = Cooldowns::new();
    let climax = BandEnergy::new(250.0, 0.0, 0.0, 0.0);

    let mut f = frame(climax, 1.0, 0.0);
    f.shift_active = true;
    let mut out = Effects::new();
    triggers::universe_policies(&mut rng, &mut cd, &f, &mut out);
    assert!(!out.iter().any(|e| matches!(e, Effect::CameraShift(_))));

    f.shift_active = false;
    triggers::universe_policies(&mut rng, &mut cd, &f, &mut out);
    assert!(out.iter().any(|e| matches!(e, Effect::CameraShift(_))));
    let next = cd.next_allowed(EffectCategory::CameraShift).unwrap();
    assert!((SHIFT_GAP_MIN_SEC..=SHIFT_GAP_MIN_SEC + SHIFT_GAP_SPAN_SEC).contains(&next));
}

#[test]
fn hot_columns_need_intensity_above_threshold() {
    let mut rng = StdRng::seed_from_u64(10);
    let cool = [0.5f32; 1000];
    assert!(triggers::hot_columns(&mut rng, &cool).is_empty());
    let edge = [COLUMN_FIRE_INTENSITY; 1000];
    assert!(triggers::hot_columns(&mut rng, &edge).is_empty());

    let hot = [0.9f32; 1000];
    let fired = triggers::hot_columns(&mut rng, &hot);
    // Expected 60 at a 6% chance.
    assert!((25..=110).contains(&fired.len()), "fired {}", fired.len());
    assert!(fired.windows(2).all(|w| w[0] < w[1]));
}
