//! Offline feature tracks: per-stem energy curves and onset timestamps
//! produced by an external analysis service.
//!
//! Parsing is tolerant. A stem with a missing or malformed field
//! loses only that field; a stem with nothing usable is skipped. Only a
//! document with no usable stem at all is an error.

use crate::constants::FEATURE_DEFAULT_STEP_SEC;
use crate::error::{Result, StarburstError};
use fnv::FnvHashMap;
use serde_json::Value;

/// Stems understood by the piano-floor overlay, ordered low to high.
pub const STEMS: [&str; 4] = ["bass", "drums", "other", "vocals"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StemTrack {
    /// Normalized 0..=1 samples at the track step, if present.
    pub energy: Option<Vec<f32>>,
    /// Sorted onset times in seconds.
    pub onsets: Vec<f32>,
}

impl StemTrack {
    /// Linear interpolation between fixed-step samples; clamps at both ends.
    pub fn energy_at(&self, step: f32, time_sec: f32) -> Option<f32> {
        let samples = self.energy.as_deref()?;
        let last = samples.len().checked_sub(1)?;
        if !time_sec.is_finite() || time_sec <= 0.0 {
            return samples.first().copied();
        }
        let pos = time_sec / step;
        let i0 = pos.floor() as usize;
        if i0 >= last {
            return Some(samples[last]);
        }
        let frac = pos - i0 as f32;
        Some(samples[i0] + (samples[i0 + 1] - samples[i0]) * frac)
    }

    /// Onsets in the half-open window `(from, to]`.
    pub fn onsets_between(&self, from: f32, to: f32) -> &[f32] {
        let lo = self.onsets.partition_point(|&t| t <= from);
        let hi = self.onsets.partition_point(|&t| t <= to);
        &self.onsets[lo..hi.max(lo)]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTrack {
    pub step: f32,
    stems: FnvHashMap<String, StemTrack>,
}

impl FeatureTrack {
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(json)?;
        Self::from_value(&doc)
    }

    pub fn from_value(doc: &Value) -> Result<Self> {
        let step = match doc.get("step") {
            None | Some(Value::Null) => FEATURE_DEFAULT_STEP_SEC,
            Some(v) => {
                let s = v.as_f64().map(|s| s as f32).unwrap_or(f32::NAN);
                if !(s.is_finite() && s > 0.0) {
                    return Err(StarburstError::InvalidStep(s));
                }
                s
            }
        };
        let tracks = doc
            .get("tracks")
            .and_then(Value::as_object)
            .ok_or(StarburstError::EmptyFeatureTrack)?;

        let mut stems = FnvHashMap::default();
        for (name, body) in tracks {
            match parse_stem(body) {
                Some(stem) => {
                    stems.insert(name.clone(), stem);
                }
                None => log::warn!("[features] skipping malformed stem '{}'", name),
            }
        }
        if stems.is_empty() {
            return Err(StarburstError::EmptyFeatureTrack);
        }
        log::debug!(
            "[features] loaded {} stems (step {:.3}s)",
            stems.len(),
            step
        );
        Ok(Self { step, stems })
    }

    #[inline]
    pub fn stem(&self, name: &str) -> Option<&StemTrack> {
        self.stems.get(name)
    }

    pub fn energy_at(&self, stem: &str, time_sec: f32) -> Option<f32> {
        self.stem(stem)?.energy_at(self.step, time_sec)
    }

    pub fn stem_count(&self) -> usize {
        self.stems.len()
    }
}

fn number_array(v: &Value) -> Option<Vec<f32>> {
    v.as_array()?
        .iter()
        .map(|x| x.as_f64().map(|f| f as f32).filter(|f| f.is_finite()))
        .collect()
}

fn parse_stem(body: &Value) -> Option<StemTrack> {
    let obj = body.as_object()?;
    let energy = obj.get("energy").and_then(number_array).filter(|e| !e.is_empty());
    let energy = energy.map(|mut e| {
        // Byte-scaled analysers emit 0..255; normalize those.
        if e.iter().any(|&v| v > 1.0) {
            e.iter_mut().for_each(|v| *v /= 255.0);
        }
        e.iter_mut().for_each(|v| *v = v.clamp(0.0, 1.0));
        e
    });
    let mut onsets = obj
        .get("events")
        .or_else(|| obj.get("onsets"))
        .and_then(number_array)
        .unwrap_or_default();
    onsets.sort_by(f32::total_cmp);

    if energy.is_none() && onsets.is_empty() {
        return None;
    }
    Some(StemTrack { energy, onsets })
}

/// Edge detector for onset timestamps crossing the playback position.
///
/// Each `advance` yields the window `(previous, now]` when playback moved
/// forward; the first call and any backward seek only re-anchor.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnsetCursor {
    last: Option<f32>,
}

impl OnsetCursor {
    pub fn advance(&mut self, now: f32) -> Option<(f32, f32)> {
        let prev = self.last.replace(now)?;
        (now > prev).then_some((prev, now))
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
