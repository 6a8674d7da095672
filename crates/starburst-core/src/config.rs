//! Deployment-tunable engine configuration.
//!
//! Everything here has a `Default` that reproduces the constants in
//! `constants.rs`; a JSON document can override any subset of fields.

use crate::constants::*;
use crate::error::{Result, StarburstError};
use serde::{Deserialize, Serialize};

/// Frequency-bin layout used to turn a raw spectrum into band readings.
///
/// The defaults assume a 1024-point transform (512 bins); other analyser
/// sizes need their own layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeBandLayout {
    /// Single bins sampled for the displayed sub/kick/vocal/high readings.
    pub probe_bins: [usize; 4],
    /// Half-open bin ranges averaged for the realtime triggers.
    pub bass_range: (usize, usize),
    pub mid_range: (usize, usize),
    pub high_range: (usize, usize),
}

impl Default for RealtimeBandLayout {
    fn default() -> Self {
        Self {
            probe_bins: [2, 10, 40, 100],
            bass_range: (0, 4),
            mid_range: (15, 40),
            high_range: (80, 120),
        }
    }
}

/// Column layout for the piano-floor mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PianoLayout {
    pub columns: usize,
    pub min_hz: f32,
    pub max_hz: f32,
    pub sample_rate: f32,
    pub fft_size: usize,
}

impl Default for PianoLayout {
    fn default() -> Self {
        Self {
            columns: PIANO_COLUMNS,
            min_hz: PIANO_MIN_HZ,
            max_hz: PIANO_MAX_HZ,
            sample_rate: PIANO_SAMPLE_RATE,
            fft_size: PIANO_FFT_SIZE,
        }
    }
}

impl PianoLayout {
    /// Width of one analyser bin in Hertz.
    #[inline]
    pub fn bin_width_hz(&self) -> f32 {
        self.sample_rate / self.fft_size.max(1) as f32
    }

    /// Center frequency of a column on a log scale between `min_hz` and `max_hz`.
    pub fn column_hz(&self, column: usize) -> f32 {
        let log_min = self.min_hz.log10();
        let log_max = self.max_hz.log10();
        let t = column as f32 / self.columns.max(1) as f32;
        10f32.powf(log_min + t * (log_max - log_min))
    }

    /// Spectrum bin read for a column, clamped to the available bins.
    pub fn bin_for_column(&self, column: usize, bins: usize) -> usize {
        let idx = (self.column_hz(column) / self.bin_width_hz()).floor() as usize;
        idx.min(bins.saturating_sub(1))
    }
}

/// Particle physics tuning shared by every burst of one visual mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsPreset {
    pub friction: f32,
    /// Gravity for heavy (bass) sparks.
    pub heavy_gravity: f32,
    /// Gravity for every other spark.
    pub light_gravity: f32,
    pub life_min: f32,
    pub life_span: f32,
}

impl PhysicsPreset {
    pub fn universe() -> Self {
        Self {
            friction: BURST_FRICTION,
            heavy_gravity: BASS_GRAVITY,
            light_gravity: LIGHT_GRAVITY,
            life_min: BURST_LIFE_MIN,
            life_span: BURST_LIFE_SPAN,
        }
    }

    pub fn firework() -> Self {
        Self {
            friction: BURST_FRICTION,
            heavy_gravity: SPARK_GRAVITY,
            light_gravity: SPARK_GRAVITY,
            life_min: 0.4,
            life_span: 0.6,
        }
    }
}

impl Default for PhysicsPreset {
    fn default() -> Self {
        Self::universe()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub particle_cap: usize,
    /// Multiplier on the area-scaled star count.
    pub star_density: f32,
    pub realtime: RealtimeBandLayout,
    pub piano: PianoLayout,
    pub universe_physics: PhysicsPreset,
    pub firework_physics: PhysicsPreset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_cap: PARTICLE_CAP,
            star_density: 1.0,
            realtime: RealtimeBandLayout::default(),
            piano: PianoLayout::default(),
            universe_physics: PhysicsPreset::universe(),
            firework_physics: PhysicsPreset::firework(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON override document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let bad = |msg: &str| Err(StarburstError::InvalidConfig(msg.to_string()));
        if self.piano.columns == 0 {
            return bad("piano.columns must be positive");
        }
        if !(self.piano.min_hz > 0.0 && self.piano.min_hz < self.piano.max_hz) {
            return bad("piano frequency range must satisfy 0 < min_hz < max_hz");
        }
        if self.piano.fft_size == 0 || self.piano.sample_rate <= 0.0 {
            return bad("piano.fft_size and piano.sample_rate must be positive");
        }
        for (name, (lo, hi)) in [
            ("bass_range", self.realtime.bass_range),
            ("mid_range", self.realtime.mid_range),
            ("high_range", self.realtime.high_range),
        ] {
            if lo >= hi {
                return Err(StarburstError::InvalidConfig(format!(
                    "realtime.{name} is empty ({lo}..{hi})"
                )));
            }
        }
        if self.star_density < 0.0 {
            return bad("star_density must not be negative");
        }
        Ok(())
    }
}
