//! The "piano floor" visual mode: a row of key columns over a strip of
//! grass, each column lit by its frequency band and launching upward
//! fireworks with floating note glyphs when hot.

use crate::color::Color;
use crate::config::EngineConfig;
use crate::constants::*;
use crate::features::{FeatureTrack, OnsetCursor, STEMS};
use crate::simulation::Simulation;
use crate::triggers;
use crate::universe::FrameInput;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FireworkStats {
    /// Batches launched by hot columns.
    pub column_batches: u64,
    /// Batches launched by feature-track onsets.
    pub onset_batches: u64,
}

#[derive(Clone, Debug)]
pub struct FireworkEngine {
    config: EngineConfig,
    rng: StdRng,
    width: f32,
    height: f32,

    pub sim: Simulation,
    columns: Vec<f32>,
    overlay: Option<FeatureTrack>,
    cursor: OnsetCursor,
    stats: FireworkStats,
}

impl FireworkEngine {
    pub fn new(config: EngineConfig, width: f32, height: f32, seed: u64) -> Self {
        let sim = Simulation::new(
            width,
            height,
            config.firework_physics.clone(),
            config.particle_cap,
        );
        Self {
            rng: StdRng::seed_from_u64(seed),
            width,
            height,
            sim,
            columns: vec![0.0; config.piano.columns],
            overlay: None,
            cursor: OnsetCursor::default(),
            stats: FireworkStats::default(),
            config,
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

    /// Current per-column intensities in 0..=1, low to high.
    #[inline]
    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    #[inline]
    pub fn stats(&self) -> FireworkStats {
        self.stats
    }

    #[inline]
    pub fn overlay(&self) -> Option<&FeatureTrack> {
        self.overlay.as_ref()
    }

    /// Install (or clear) the offline feature-track overlay.
    pub fn set_overlay(&mut self, track: Option<FeatureTrack>) {
        self.overlay = track;
        self.cursor.reset();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.sim.resize(width, height);
    }

    #[inline]
    pub fn column_width(&self) -> f32 {
        self.width / self.columns.len().max(1) as f32
    }

    /// Top edge of the grass strip, where fireworks launch from.
    #[inline]
    pub fn grass_top(&self) -> f32 {
        self.height * (1.0 - GRASS_FRACTION)
    }

    /// Columns owned by stem `k` of `STEMS`.
    pub fn stem_region(&self, k: usize) -> Range<usize> {
        let n = self.columns.len();
        let per = STEMS.len();
        (k * n / per)..((k + 1) * n / per)
    }

    pub fn column_color(&self, column: usize) -> Color {
        let hue = column as f32 / self.columns.len().max(1) as f32 * 220.0 + 40.0;
        Color::hsl(hue, 100.0, 75.0)
    }

    pub fn update(&mut self, input: &FrameInput<'_>) {
        self.refresh_columns(input);
        let window = self.cursor.advance(input.playback_sec);

        if input.playing {
            for column in triggers::hot_columns(&mut self.rng, &self.columns) {
                self.launch(column, self.columns[column]);
                self.stats.column_batches += 1;
            }
            if let Some((from, to)) = window {
                self.fire_onsets(from, to);
            }
        }

        self.sim.step(&mut self.rng, 0.0, false);
    }

    fn refresh_columns(&mut self, input: &FrameInput<'_>) {
        if let Some(track) = &self.overlay {
            for (k, stem) in STEMS.iter().enumerate() {
                let level = track
                    .energy_at(stem, input.playback_sec)
                    .unwrap_or(0.0)
                    .clamp(0.0, 1.0);
                let region = self.stem_region(k);
                self.columns[region].fill(level);
            }
            return;
        }

        match input.spectrum {
            Some(bins) if !bins.is_empty() => {
                let piano = &self.config.piano;
                for (i, c) in self.columns.iter_mut().enumerate() {
                    *c = bins[piano.bin_for_column(i, bins.len())] as f32 / 255.0;
                }
            }
            _ => self.columns.fill(0.0),
        }
    }

    /// One batch per onset crossing `(from, to]`, in a random column of the
    /// onset's stem region.
    fn fire_onsets(&mut self, from: f32, to: f32) {
        let Some(track) = &self.overlay else {
            return;
        };
        let mut launches = Vec::new();
        for (k, stem) in STEMS.iter().enumerate() {
            let Some(stem_track) = track.stem(stem) else {
                continue;
            };
            let region = self.stem_region(k);
            if region.is_empty() {
                continue;
            }
            for _ in stem_track.onsets_between(from, to) {
                launches.push(self.rng.gen_range(region.clone()));
            }
        }
        for column in launches {
            let intensity = self.columns[column].max(ONSET_MIN_INTENSITY);
            self.launch(column, intensity);
            self.stats.onset_batches += 1;
        }
    }

    fn launch(&mut self, column: usize, intensity: f32) {
        let at = Vec2::new(
            (column as f32 + 0.5) * self.column_width(),
            self.grass_top(),
        );
        let color = self.column_color(column);
        self.sim.firework_batch(&mut self.rng, at, color, intensity);
    }
}
