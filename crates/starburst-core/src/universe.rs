//! The "universe" visual mode: star field, galaxy core, orbiting bodies,
//! comet, ship battles and music-driven bursts.

use crate::color::Color;
use crate::config::EngineConfig;
use crate::constants::*;
use crate::cooldown::Cooldowns;
use crate::orbits::{Comet, OrbitSystem};
use crate::signal::{Drive, EnergyReading, ReadingSource};
use crate::simulation::{BurstKind, BurstOptions, Simulation};
use crate::starfield::{ShiftMode, StarField};
use crate::triggers::{self, Effect, Effects, TriggerFrame};
use crate::visibility::{Stage, VisibilitySequencer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What the render loop hands the engine every display frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput<'a> {
    /// Playback position of the audio in seconds.
    pub playback_sec: f32,
    pub playing: bool,
    /// Live analyser bins, if an analyser is attached.
    pub spectrum: Option<&'a [u8]>,
}

/// Counters of effects fired by the trigger layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerStats {
    pub bass_bursts: u64,
    pub mid_bursts: u64,
    pub high_bursts: u64,
    pub supernovas: u64,
    pub meteors: u64,
    pub battles: u64,
    pub shifts: u64,
}

#[derive(Clone, Debug)]
pub struct UniverseEngine {
    config: EngineConfig,
    rng: StdRng,
    /// Engine time in seconds; advances one tick per update.
    clock: f64,
    width: f32,
    height: f32,

    pub sim: Simulation,
    pub stars: StarField,
    pub orbits: OrbitSystem,
    pub comet: Comet,
    pub visibility: VisibilitySequencer,

    cooldowns: Cooldowns,
    drive: Drive,
    reading: EnergyReading,
    stats: TriggerStats,
}

impl UniverseEngine {
    pub fn new(config: EngineConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = StarField::new(&mut rng, width, height, config.star_density);
        let orbits = OrbitSystem::new(&mut rng);
        let sim = Simulation::new(
            width,
            height,
            config.universe_physics.clone(),
            config.particle_cap,
        );
        Self {
            config,
            rng,
            clock: 0.0,
            width,
            height,
            sim,
            stars,
            orbits,
            comet: Comet::default(),
            visibility: VisibilitySequencer::default(),
            cooldowns: Cooldowns::new(),
            drive: Drive::default(),
            reading: EnergyReading::SILENT,
            stats: TriggerStats::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Engine time in milliseconds, for breathing and the comet path.
    #[inline]
    pub fn clock_ms(&self) -> f64 {
        self.clock * 1000.0
    }

    /// Energy reading of the latest update.
    #[inline]
    pub fn reading(&self) -> &EnergyReading {
        &self.reading
    }

    #[inline]
    pub fn stats(&self) -> TriggerStats {
        self.stats
    }

    pub fn drive(&self) -> &Drive {
        &self.drive
    }

    pub fn set_drive(&mut self, drive: Drive) {
        self.drive = drive;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.sim.resize(width, height);
        self.stars.resize(&mut self.rng, width, height);
    }

    pub fn randomize_orbits(&mut self) {
        self.orbits.randomize(&mut self.rng);
    }

    /// Start a camera shift now; false while one is already running.
    pub fn trigger_star_shift(&mut self, mode: ShiftMode) -> bool {
        let started = self.stars.trigger_shift(&mut self.rng, mode, self.clock);
        if started {
            self.stats.shifts += 1;
        }
        started
    }

    pub fn update(&mut self, input: &FrameInput<'_>) {
        self.reading = self
            .drive
            .read(&self.config.realtime, input.playback_sec, input.spectrum);
        let bands = self.reading.bands;
        let climax = bands.is_climax();

        if input.playing {
            let frame = TriggerFrame {
                bands,
                playback_sec: input.playback_sec,
                now: self.clock,
                width: self.width,
                height: self.height,
                battle_active: self.sim.battle_in_progress(),
                shift_active: self.stars.is_shifting(),
            };
            let mut effects = Effects::new();
            triggers::universe_policies(&mut self.rng, &mut self.cooldowns, &frame, &mut effects);
            match self.reading.source {
                ReadingSource::PreAnalyzed => {
                    triggers::phonetic(&mut self.rng, &mut self.cooldowns, &frame, &mut effects)
                }
                ReadingSource::Realtime(levels) => triggers::realtime(
                    &mut self.rng,
                    &mut self.cooldowns,
                    &levels,
                    &frame,
                    &mut effects,
                ),
                ReadingSource::Silent => {}
            }
            for effect in effects {
                self.apply(effect);
            }
        }

        self.visibility
            .update(&mut self.rng, input.playing, input.playback_sec, self.clock);
        self.stars.step(self.clock);
        self.orbits
            .advance(bands.as_array(), self.visibility.level(Stage::Solar));
        self.step_comet();
        self.sim.step(&mut self.rng, self.clock, climax);

        self.clock += TICK_SEC as f64;
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Burst {
                at,
                kind,
                color,
                opts,
            } => {
                self.sim.burst(&mut self.rng, at, kind, color, opts);
                match kind {
                    BurstKind::Bass => self.stats.bass_bursts += 1,
                    BurstKind::Mid => self.stats.mid_bursts += 1,
                    BurstKind::High => self.stats.high_bursts += 1,
                }
            }
            Effect::Supernova { at } => {
                self.sim.supernova(&mut self.rng, at);
                self.stats.supernovas += 1;
            }
            Effect::Meteor => {
                self.sim.meteor(&mut self.rng);
                self.stats.meteors += 1;
            }
            Effect::ShipBattle => {
                if self.sim.start_battle(&mut self.rng) {
                    self.stats.battles += 1;
                }
            }
            Effect::CameraShift(mode) => {
                self.trigger_star_shift(mode);
            }
        }
    }

    /// Refresh the tail jitter and shed vocal-driven sparkles along the tail.
    fn step_comet(&mut self) {
        self.comet.step(&mut self.rng);
        if self.visibility.level(Stage::Comet) <= 0.0 {
            return;
        }
        let head = Comet::head(self.clock_ms(), self.width, self.height);
        if !Comet::is_on_screen(head, self.width, self.height) {
            return;
        }
        let chance = Comet::sparkle_chance(self.reading.bands.vocals);
        if chance <= 0.0 {
            return;
        }
        let dir = Comet::tail_direction(head, self.width, self.height);
        let heading = dir.y.atan2(dir.x);
        for i in 0..COMET_TAIL_POINTS {
            if self.rng.gen::<f32>() >= chance {
                continue;
            }
            let at = self.comet.tail_point(head, dir, i);
            let speed = 1.0 + self.rng.gen::<f32>() * 2.0;
            self.sim.burst(
                &mut self.rng,
                at,
                BurstKind::High,
                Color::WHITE,
                BurstOptions::sized(1, speed).scale(0.4).aimed(heading, 0.3),
            );
        }
    }
}
