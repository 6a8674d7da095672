//! Entry and exit fades of the major universe layers.

use crate::constants::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Scene layers with their own fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Stars = 0,
    Core = 1,
    Solar = 2,
    Comet = 3,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Stars, Stage::Core, Stage::Solar, Stage::Comet];
}

/// Staggered fade-out deadlines, created once when playback pauses and
/// discarded when it resumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitSchedule {
    pub deadlines: [f64; 4],
}

impl ExitSchedule {
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R, now: f64) -> Self {
        let mut delays = VIS_EXIT_DELAYS_SEC;
        delays.shuffle(rng);
        Self {
            deadlines: delays.map(|d| now + d),
        }
    }

    #[inline]
    pub fn started(&self, stage: Stage, now: f64) -> bool {
        now > self.deadlines[stage as usize]
    }
}

#[derive(Clone, Debug, Default)]
pub struct VisibilitySequencer {
    levels: [f32; 4],
    exit: Option<ExitSchedule>,
}

impl VisibilitySequencer {
    #[inline]
    pub fn level(&self, stage: Stage) -> f32 {
        self.levels[stage as usize]
    }

    #[inline]
    pub fn exit_schedule(&self) -> Option<&ExitSchedule> {
        self.exit.as_ref()
    }

    /// Ceiling a stage may reach at a playback position. A non-finite
    /// position reads as the start of playback.
    pub fn ceiling(stage: Stage, playback_sec: f32) -> f32 {
        let i = stage as usize;
        let playback_sec = if playback_sec.is_finite() { playback_sec } else { 0.0 };
        ((playback_sec - VIS_ENTRY_DELAY_SEC[i]) / VIS_ENTRY_SPAN_SEC[i]).clamp(0.0, 1.0)
    }

    /// One tick. `now` is engine time and drives exit deadlines; entry
    /// ceilings follow playback time.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, playing: bool, playback_sec: f32, now: f64) {
        if playing {
            self.exit = None;
            for stage in Stage::ALL {
                let v = &mut self.levels[stage as usize];
                *v = (*v + VIS_RAMP_UP).min(Self::ceiling(stage, playback_sec)).max(0.0);
            }
            return;
        }

        let schedule = *self.exit.get_or_insert_with(|| ExitSchedule::shuffled(rng, now));
        for stage in Stage::ALL {
            if schedule.started(stage, now) {
                let i = stage as usize;
                self.levels[i] = (self.levels[i] - VIS_RAMP_DOWN[i]).max(0.0);
            }
        }
    }
}
