//! Background star field, nebulae and the camera-shift effect.

use crate::color::Color;
use crate::constants::*;
use crate::entities::{Nebula, Star};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftMode {
    Rotate,
    Drift,
    Zoom,
}

impl ShiftMode {
    pub const ALL: [ShiftMode; 3] = [ShiftMode::Rotate, ShiftMode::Drift, ShiftMode::Zoom];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// An active camera shift. Exists only between trigger and completion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraShift {
    pub mode: ShiftMode,
    pub started: f64,
    pub duration: f64,
    /// +1 or -1.
    pub direction: f32,
    pub speed: f32,
    /// Heading of a drift shift.
    pub heading: f32,
    /// Rotation accumulated so far by a rotate shift, in radians. Star
    /// layout angles are never changed.
    pub rotation: f32,
}

impl CameraShift {
    /// Smooth in/out envelope in 0..=1 over the shift's duration.
    pub fn progress(&self, now: f64) -> f32 {
        let t = ((now - self.started) / self.duration).clamp(0.0, 1.0) as f32;
        (t * PI).sin()
    }

    #[inline]
    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started > self.duration
    }
}

const NEBULA_COLORS: [Color; 4] = [
    Color::Hsla(260.0, 80.0, 30.0, 0.15),
    Color::Hsla(200.0, 90.0, 25.0, 0.12),
    Color::Hsla(320.0, 70.0, 35.0, 0.10),
    Color::Hsla(180.0, 80.0, 20.0, 0.08),
];

#[derive(Clone, Debug)]
pub struct StarField {
    width: f32,
    height: f32,
    density: f32,
    pub stars: Vec<Star>,
    pub nebulae: Vec<Nebula>,
    shift: Option<CameraShift>,
}

impl StarField {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, density: f32) -> Self {
        let mut field = Self {
            width,
            height,
            density,
            stars: Vec::new(),
            nebulae: Vec::new(),
            shift: None,
        };
        field.reseed(rng);
        field
    }

    /// Star count for a canvas: scales with area around the 1080p reference.
    pub fn count_for(width: f32, height: f32, density: f32) -> usize {
        let area = (width.max(0.0) * height.max(0.0)) / STAR_REFERENCE_AREA;
        let n = (STAR_COUNT_REFERENCE as f32 * area * density.max(0.0)).round() as usize;
        n.clamp(STAR_COUNT_MIN, STAR_COUNT_MAX)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Reseed stars and nebulae for new canvas dimensions.
    pub fn resize<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.reseed(rng);
        log::debug!(
            "[stars] reseeded {} stars for {}x{}",
            self.stars.len(),
            width,
            height
        );
    }

    fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let center = self.center();
        let count = Self::count_for(self.width, self.height, self.density);
        self.stars = (0..count)
            .map(|_| {
                let pos = Vec2::new(rng.gen::<f32>() * self.width, rng.gen::<f32>() * self.height);
                let rel = pos - center;
                Star {
                    pos,
                    prev: pos,
                    angle: rel.y.atan2(rel.x),
                    dist: rel.length(),
                    size: rng.gen::<f32>() * STAR_SIZE_MAX,
                    opacity: rng.gen(),
                    breathe_speed: STAR_BREATHE_MIN + rng.gen::<f32>() * STAR_BREATHE_SPAN,
                    offset: rng.gen::<f32>() * TAU,
                }
            })
            .collect();

        self.nebulae = (0..NEBULA_COUNT)
            .map(|i| Nebula {
                pos: Vec2::new(rng.gen::<f32>() * self.width, rng.gen::<f32>() * self.height),
                radius: self.width * (NEBULA_RADIUS_MIN + rng.gen::<f32>() * NEBULA_RADIUS_SPAN),
                color: NEBULA_COLORS[i % NEBULA_COLORS.len()],
            })
            .collect();
    }

    #[inline]
    pub fn shift(&self) -> Option<&CameraShift> {
        self.shift.as_ref()
    }

    #[inline]
    pub fn is_shifting(&self) -> bool {
        self.shift.is_some()
    }

    /// Start a camera shift. Returns false (and changes nothing) while
    /// another shift is still running.
    pub fn trigger_shift<R: Rng + ?Sized>(&mut self, rng: &mut R, mode: ShiftMode, now: f64) -> bool {
        if self.shift.is_some() {
            return false;
        }
        let (duration, speed) = match mode {
            ShiftMode::Zoom => (
                SHIFT_ZOOM_DURATION_SEC,
                SHIFT_ZOOM_SPEED_MIN + rng.gen::<f32>() * SHIFT_ZOOM_SPEED_SPAN,
            ),
            ShiftMode::Rotate | ShiftMode::Drift => (
                SHIFT_DURATION_SEC,
                SHIFT_SPEED_MIN + rng.gen::<f32>() * SHIFT_SPEED_SPAN,
            ),
        };
        self.shift = Some(CameraShift {
            mode,
            started: now,
            duration,
            direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            speed,
            heading: rng.gen::<f32>() * TAU,
            rotation: 0.0,
        });
        log::debug!("[stars] camera shift {:?} for {:.1}s", mode, duration);
        true
    }

    pub fn step(&mut self, now: f64) {
        let center = self.center();
        if let Some(ended) = self.shift.filter(|s| s.is_finished(now)) {
            self.shift = None;
            log::debug!("[stars] camera shift {:?} ended", ended.mode);
        }
        let Some(shift) = self.shift.as_mut() else {
            self.settle(center);
            return;
        };

        let speed = shift.speed * shift.progress(now);
        if shift.mode == ShiftMode::Rotate {
            shift.rotation += SHIFT_ROTATE_STEP * shift.direction * speed;
        }
        let shift = *shift;
        let (w, h) = (self.width, self.height);
        for star in &mut self.stars {
            star.prev = star.pos;
            match shift.mode {
                ShiftMode::Rotate => {
                    let angle = star.angle + shift.rotation;
                    star.pos = center + Vec2::new(angle.cos(), angle.sin()) * star.dist;
                }
                ShiftMode::Drift => {
                    star.pos += Vec2::new(shift.heading.cos(), shift.heading.sin())
                        * SHIFT_DRIFT_STEP
                        * speed;
                    star.pos.x = wrap(star.pos.x, w);
                    star.pos.y = wrap(star.pos.y, h);
                }
                ShiftMode::Zoom => {
                    let dist = star.dist * (1.0 + shift.direction * SHIFT_ZOOM_FACTOR * speed);
                    let angle = star.angle + SHIFT_ZOOM_SPIRAL * shift.direction * speed;
                    star.pos = center + Vec2::new(angle.cos(), angle.sin()) * dist;
                }
            }
        }
    }

    /// Ease every star back toward its layout position.
    fn settle(&mut self, center: Vec2) {
        for star in &mut self.stars {
            star.prev = star.pos;
            let target = star.layout_position(center);
            let gap = target - star.pos;
            if gap.length() < STAR_SETTLE_SNAP {
                star.pos = target;
            } else {
                star.pos += gap * STAR_SETTLE_RATE;
            }
        }
    }
}

/// Wrap a drifting coordinate through a margin around the canvas.
fn wrap(v: f32, extent: f32) -> f32 {
    if v < -SHIFT_DRIFT_WRAP {
        v + extent + 2.0 * SHIFT_DRIFT_WRAP
    } else if v > extent + SHIFT_DRIFT_WRAP {
        v - (extent + 2.0 * SHIFT_DRIFT_WRAP)
    } else {
        v
    }
}
