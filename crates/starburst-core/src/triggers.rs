//! Effect trigger layer.
//!
//! Every policy here inspects the current readings, consults the cooldowns
//! and the RNG, and appends `Effect` commands. Engines apply the commands to
//! their simulation afterwards, so policies never touch entity state.

use crate::color::Color;
use crate::constants::*;
use crate::cooldown::{Cooldowns, EffectCategory};
use crate::signal::{BandEnergy, RealtimeLevels};
use crate::simulation::{BurstKind, BurstOptions};
use crate::starfield::ShiftMode;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::PI;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Burst {
        at: Vec2,
        kind: BurstKind,
        color: Color,
        opts: BurstOptions,
    },
    Supernova {
        at: Vec2,
    },
    Meteor,
    ShipBattle,
    CameraShift(ShiftMode),
}

pub type Effects = SmallVec<[Effect; 8]>;

/// Per-frame inputs shared by the universe policies.
#[derive(Clone, Copy, Debug)]
pub struct TriggerFrame {
    pub bands: BandEnergy,
    pub playback_sec: f32,
    /// Engine time in seconds.
    pub now: f64,
    pub width: f32,
    pub height: f32,
    pub battle_active: bool,
    pub shift_active: bool,
}

impl TriggerFrame {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(rng.gen::<f32>() * self.width, rng.gen::<f32>() * self.height)
    }
}

/// Climax-driven and energy-gated universe effects.
pub fn universe_policies<R: Rng + ?Sized>(
    rng: &mut R,
    cooldowns: &mut Cooldowns,
    frame: &TriggerFrame,
    out: &mut Effects,
) {
    let bands = frame.bands;
    let now = frame.now;
    let climax = bands.is_climax();

    if frame.playback_sec > BATTLE_MIN_PLAYBACK_SEC
        && !frame.battle_active
        && bands.peak() > BATTLE_MIN_ENERGY
        && cooldowns.ready(EffectCategory::ShipBattle, now)
        && rng.gen::<f32>() < BATTLE_CHANCE
    {
        cooldowns.arm(EffectCategory::ShipBattle, now + BATTLE_COOLDOWN_SEC);
        out.push(Effect::ShipBattle);
    }

    if climax
        && cooldowns.ready(EffectCategory::Supernova, now)
        && rng.gen::<f32>() < SUPERNOVA_CHANCE
    {
        cooldowns.arm(EffectCategory::Supernova, now + SUPERNOVA_COOLDOWN_SEC);
        out.push(Effect::Supernova {
            at: frame.random_point(rng),
        });
    }

    if (bands.vocals > METEOR_VOCAL_GATE || bands.highs > METEOR_HIGH_GATE)
        && cooldowns.ready(EffectCategory::Meteor, now)
        && rng.gen::<f32>() < METEOR_CHANCE
    {
        cooldowns.arm(EffectCategory::Meteor, now + METEOR_COOLDOWN_SEC);
        out.push(Effect::Meteor);
    }

    if climax && !frame.shift_active && cooldowns.ready(EffectCategory::CameraShift, now) {
        let gap = SHIFT_GAP_MIN_SEC + rng.gen::<f64>() * SHIFT_GAP_SPAN_SEC;
        cooldowns.arm(EffectCategory::CameraShift, now + gap);
        out.push(Effect::CameraShift(ShiftMode::random(rng)));
    }
}

/// Phonetic heuristics over pre-analyzed frames: heavy beats low on the
/// canvas, sharp upward needles for sibilants, blooms for sustained vowels.
pub fn phonetic<R: Rng + ?Sized>(
    rng: &mut R,
    cooldowns: &mut Cooldowns,
    frame: &TriggerFrame,
    out: &mut Effects,
) {
    let bands = frame.bands;
    let (w, h) = (frame.width, frame.height);

    if bands.sub_bass > PHONETIC_BASS_GATE
        && cooldowns.try_fire(EffectCategory::BassBurst, frame.now, PHONETIC_BASS_COOLDOWN_SEC)
    {
        out.push(Effect::Burst {
            at: Vec2::new(rng.gen::<f32>() * w, h * 0.8),
            kind: BurstKind::Bass,
            color: Color::hsl(340.0, 90.0, 55.0),
            opts: BurstOptions::sized(70, 12.0).scale(1.5),
        });
    }

    if bands.highs > PHONETIC_HIGH_GATE
        && cooldowns.try_fire(EffectCategory::HighBurst, frame.now, PHONETIC_HIGH_COOLDOWN_SEC)
    {
        let plosive = bands.highs > PHONETIC_HIGH_PLOSIVE;
        let direction = -PI / 2.0 + (rng.gen::<f32>() - 0.5) * PI;
        let (count, speed, scale, color) = if plosive {
            (30, 25.0, 1.2, Color::WHITE)
        } else {
            (15, 20.0, 0.8, Color::hsl(180.0, 100.0, 75.0))
        };
        out.push(Effect::Burst {
            at: Vec2::new(rng.gen::<f32>() * w, h * 0.2 + rng.gen::<f32>() * h * 0.2),
            kind: BurstKind::High,
            color,
            opts: BurstOptions::sized(count, speed)
                .scale(scale)
                .aimed(direction, 0.1),
        });
    }

    if bands.vocals > PHONETIC_MID_GATE
        && cooldowns.try_fire(EffectCategory::MidBurst, frame.now, PHONETIC_MID_COOLDOWN_SEC)
    {
        let richness = bands.vocals / (bands.highs + 1.0);
        let rich = richness > RICHNESS_SPLIT;
        out.push(Effect::Burst {
            at: Vec2::new(rng.gen::<f32>() * w, h * 0.4 + rng.gen::<f32>() * h * 0.2),
            kind: BurstKind::Mid,
            color: Color::hsl(if rich { 280.0 } else { 200.0 }, 80.0, 65.0),
            opts: BurstOptions::sized((40.0 + richness * 10.0) as usize, 6.0 + richness)
                .scale(if rich { 2.5 } else { 1.2 }),
        });
    }
}

/// Single-tier triggers over averaged live-spectrum ranges.
pub fn realtime<R: Rng + ?Sized>(
    rng: &mut R,
    cooldowns: &mut Cooldowns,
    levels: &RealtimeLevels,
    frame: &TriggerFrame,
    out: &mut Effects,
) {
    let tiers = [
        (
            levels.bass,
            REALTIME_BASS_GATE,
            EffectCategory::BassBurst,
            REALTIME_BASS_COOLDOWN_SEC,
            BurstKind::Bass,
            Color::hsl(340.0, 90.0, 55.0),
            0.8,
        ),
        (
            levels.mid,
            REALTIME_MID_GATE,
            EffectCategory::MidBurst,
            REALTIME_MID_COOLDOWN_SEC,
            BurstKind::Mid,
            Color::hsl(210.0, 85.0, 60.0),
            0.5,
        ),
        (
            levels.high,
            REALTIME_HIGH_GATE,
            EffectCategory::HighBurst,
            REALTIME_HIGH_COOLDOWN_SEC,
            BurstKind::High,
            Color::hsl(50.0, 100.0, 75.0),
            0.2,
        ),
    ];
    for (level, gate, category, cooldown, kind, color, y_frac) in tiers {
        if level > gate && cooldowns.try_fire(category, frame.now, cooldown) {
            let at = Vec2::new(
                rng.gen::<f32>() * frame.width,
                frame.height * y_frac + rng.gen::<f32>() * frame.height * 0.1,
            );
            out.push(Effect::Burst {
                at,
                kind,
                color,
                opts: BurstOptions::default(),
            });
        }
    }
}

/// Columns hot enough to fire a firework this tick.
pub fn hot_columns<R: Rng + ?Sized>(rng: &mut R, intensities: &[f32]) -> SmallVec<[usize; 8]> {
    intensities
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v > COLUMN_FIRE_INTENSITY)
        .filter(|_| rng.gen::<f32>() < COLUMN_FIRE_CHANCE)
        .map(|(i, _)| i)
        .collect()
}
