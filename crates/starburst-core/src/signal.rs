//! Signal consumption: turning a live spectrum or a pre-analyzed frame array
//! into the four band energies the trigger layer and renderer read.

use crate::config::RealtimeBandLayout;
use crate::constants::{ANALYSIS_FRAME_RATE, CLIMAX_THRESHOLDS};
use crate::error::{Result, StarburstError};
use serde::{Deserialize, Serialize};

/// Four band energies, each in 0..=255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandEnergy {
    pub sub_bass: f32,
    pub kick: f32,
    pub vocals: f32,
    pub highs: f32,
}

impl BandEnergy {
    pub const SILENT: BandEnergy = BandEnergy {
        sub_bass: 0.0,
        kick: 0.0,
        vocals: 0.0,
        highs: 0.0,
    };

    /// Build a reading, clamping every band into 0..=255 (NaN reads as 0).
    pub fn new(sub_bass: f32, kick: f32, vocals: f32, highs: f32) -> Self {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 255.0) };
        Self {
            sub_bass: c(sub_bass),
            kick: c(kick),
            vocals: c(vocals),
            highs: c(highs),
        }
    }

    #[inline]
    pub fn as_array(&self) -> [f32; 4] {
        [self.sub_bass, self.kick, self.vocals, self.highs]
    }

    #[inline]
    pub fn peak(&self) -> f32 {
        self.as_array().into_iter().fold(0.0, f32::max)
    }

    /// True when any band is above its climax threshold.
    pub fn is_climax(&self) -> bool {
        self.as_array()
            .iter()
            .zip(CLIMAX_THRESHOLDS.iter())
            .any(|(v, t)| v > t)
    }
}

/// Anything that can report band energies for a playback time.
pub trait SignalSource {
    /// `None` when the source has nothing for this time.
    fn energy_at(&self, time_sec: f32) -> Option<BandEnergy>;
}

/// Band energies computed offline at a fixed frame rate.
#[derive(Clone, Debug, Default)]
pub struct PreAnalyzedSignal {
    frames: Vec<BandEnergy>,
    frame_rate: f32,
}

impl PreAnalyzedSignal {
    pub fn new(frames: Vec<BandEnergy>) -> Self {
        Self {
            frames,
            frame_rate: ANALYSIS_FRAME_RATE,
        }
    }

    /// Build from a flat `[sub, kick, vocals, highs, sub, ...]` array.
    pub fn from_flat(values: &[f32]) -> Result<Self> {
        if values.len() % 4 != 0 {
            return Err(StarburstError::RaggedFrames(values.len()));
        }
        let frames = values
            .chunks_exact(4)
            .map(|c| BandEnergy::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self::new(frames))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// `floor(time * rate)`, or `None` for negative or non-finite times.
    pub fn frame_index(&self, time_sec: f32) -> Option<usize> {
        if !time_sec.is_finite() || time_sec < 0.0 {
            return None;
        }
        Some((time_sec * self.frame_rate).floor() as usize)
    }
}

impl SignalSource for PreAnalyzedSignal {
    fn energy_at(&self, time_sec: f32) -> Option<BandEnergy> {
        self.frame_index(time_sec)
            .and_then(|i| self.frames.get(i).copied())
    }
}

/// Mean of a half-open bin range, clipped to the spectrum; 0 when empty.
pub fn average_bins(spectrum: &[u8], range: (usize, usize)) -> f32 {
    let end = range.1.min(spectrum.len());
    let start = range.0.min(end);
    let slice = &spectrum[start..end];
    if slice.is_empty() {
        return 0.0;
    }
    slice.iter().map(|&v| v as f32).sum::<f32>() / slice.len() as f32
}

/// Averaged trigger levels of the realtime strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RealtimeLevels {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
}

impl RealtimeLevels {
    pub fn from_spectrum(layout: &RealtimeBandLayout, spectrum: &[u8]) -> Self {
        Self {
            bass: average_bins(spectrum, layout.bass_range),
            mid: average_bins(spectrum, layout.mid_range),
            high: average_bins(spectrum, layout.high_range),
        }
    }
}

/// Band readings from single probe bins; missing bins read as 0.
pub fn probe_bands(layout: &RealtimeBandLayout, spectrum: &[u8]) -> BandEnergy {
    let at = |i: usize| spectrum.get(i).copied().unwrap_or(0) as f32;
    let [a, b, c, d] = layout.probe_bins;
    BandEnergy::new(at(a), at(b), at(c), at(d))
}

/// Where this frame's energy came from, with any strategy-specific extras.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReadingSource {
    /// No data: idle scene.
    Silent,
    PreAnalyzed,
    Realtime(RealtimeLevels),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyReading {
    pub bands: BandEnergy,
    pub source: ReadingSource,
}

impl EnergyReading {
    pub const SILENT: EnergyReading = EnergyReading {
        bands: BandEnergy::SILENT,
        source: ReadingSource::Silent,
    };
}

/// How the engine consumes its signal.
#[derive(Clone, Debug, Default)]
pub enum Drive {
    /// Live analyser spectrum every frame.
    #[default]
    Realtime,
    /// Offline 30 Hz frames; out-of-range times read as silence.
    PreAnalyzed(PreAnalyzedSignal),
}

impl Drive {
    pub fn read(
        &self,
        layout: &RealtimeBandLayout,
        time_sec: f32,
        spectrum: Option<&[u8]>,
    ) -> EnergyReading {
        match self {
            Drive::PreAnalyzed(signal) => match signal.energy_at(time_sec) {
                Some(bands) => EnergyReading {
                    bands,
                    source: ReadingSource::PreAnalyzed,
                },
                None => EnergyReading::SILENT,
            },
            Drive::Realtime => match spectrum {
                Some(bins) if !bins.is_empty() => EnergyReading {
                    bands: probe_bands(layout, bins),
                    source: ReadingSource::Realtime(RealtimeLevels::from_spectrum(layout, bins)),
                },
                _ => EnergyReading::SILENT,
            },
        }
    }
}
