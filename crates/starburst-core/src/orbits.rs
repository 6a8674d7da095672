//! Orbiting bodies around the galaxy core and the long-period comet.

use crate::color::Color;
use crate::constants::*;
use crate::entities::OrbitConfig;
use glam::Vec2;
use rand::Rng;

/// Hue hints per slot, inner to outer.
const ORBIT_HUES: [f32; ORBIT_SLOTS] = [30.0, 50.0, 200.0, 10.0, 40.0, 60.0, 190.0, 220.0];

#[derive(Clone, Debug)]
pub struct OrbitSystem {
    pub slots: Vec<OrbitConfig>,
}

impl OrbitSystem {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut system = Self { slots: Vec::with_capacity(ORBIT_SLOTS) };
        system.randomize(rng);
        system
    }

    /// Draw fresh shapes, colors and speeds for every slot. Running angles
    /// carry over so bodies never jump backwards.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angles: Vec<f32> = self.slots.iter().map(|o| o.angle).collect();
        self.slots = (0..ORBIT_SLOTS)
            .map(|i| OrbitConfig {
                radius: 0.12 + i as f32 * 0.08 + rng.gen::<f32>() * 0.04,
                eccentricity: 0.3 + rng.gen::<f32>() * 0.5,
                tilt: (rng.gen::<f32>() - 0.5) * 1.2,
                color: Color::hsl(
                    ORBIT_HUES[i],
                    70.0 + rng.gen::<f32>() * 20.0,
                    60.0 + rng.gen::<f32>() * 20.0,
                ),
                base_speed: 0.002 + 0.02 / (i as f32 + 1.0) + rng.gen::<f32>() * 0.005,
                angle: angles.get(i).copied().unwrap_or(0.0),
            })
            .collect();
        log::debug!("[orbits] randomized {} slots", self.slots.len());
    }

    /// Reveal factor of slot `i` at a given solar visibility: slots appear
    /// one after another as visibility climbs.
    #[inline]
    pub fn reveal(i: usize, visibility: f32) -> f32 {
        ((visibility - i as f32 / ORBIT_SLOTS as f32) * ORBIT_SLOTS as f32).clamp(0.0, 1.0)
    }

    /// Band energy driving slot `i`: `[sub, kick, vocal, high]` repeated.
    #[inline]
    pub fn slot_energy(i: usize, bands: [f32; 4]) -> f32 {
        bands[i % 4]
    }

    /// Advance every revealed slot's angle.
    pub fn advance(&mut self, bands: [f32; 4], visibility: f32) {
        for (i, orbit) in self.slots.iter_mut().enumerate() {
            if Self::reveal(i, visibility) <= 0.0 {
                continue;
            }
            orbit.angle += orbit.base_speed + Self::slot_energy(i, bands) / 255.0 * ORBIT_ENERGY_BOOST;
        }
    }
}

/// Long-period comet on a closed-form eccentric orbit whose focus is the
/// canvas center.
#[derive(Clone, Debug, Default)]
pub struct Comet {
    /// Per-point tail jitter, refreshed every tick.
    pub jitter: [f32; COMET_TAIL_POINTS],
}

impl Comet {
    pub fn head(time_ms: f64, width: f32, height: f32) -> Vec2 {
        let center = Vec2::new(width / 2.0, height / 2.0);
        let a = width * COMET_SEMI_MAJOR;
        let e = COMET_ECCENTRICITY;
        let b = a * (1.0 - e * e).sqrt();
        let angle = (time_ms * COMET_RATE_PER_MS) as f32;

        let ex = angle.cos() * a - a * e;
        let ey = angle.sin() * b;
        let (s, c) = COMET_TILT.sin_cos();
        center + Vec2::new(ex * c - ey * s, ex * s + ey * c)
    }

    pub fn is_on_screen(head: Vec2, width: f32, height: f32) -> bool {
        head.x > -COMET_MARGIN
            && head.x < width + COMET_MARGIN
            && head.y > -COMET_MARGIN
            && head.y < height + COMET_MARGIN
    }

    /// Unit vector pointing away from the canvas center.
    pub fn tail_direction(head: Vec2, width: f32, height: f32) -> Vec2 {
        (head - Vec2::new(width / 2.0, height / 2.0)).normalize_or_zero()
    }

    pub fn tail_point(&self, head: Vec2, dir: Vec2, i: usize) -> Vec2 {
        let age = i as f32 * COMET_TAIL_SPACING + self.jitter.get(i).copied().unwrap_or(0.0);
        head + dir * age
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for j in &mut self.jitter {
            *j = rng.gen::<f32>() * COMET_TAIL_JITTER;
        }
    }

    /// Per-point sparkle probability for a vocal level.
    #[inline]
    pub fn sparkle_chance(vocals: f32) -> f32 {
        COMET_SPARKLE_CHANCE * (vocals / COMET_SPARKLE_VOCAL_REF).clamp(0.0, 1.0)
    }
}
