//! Plain value records for every simulated entity.
//!
//! Collections of these are owned exclusively by the engines; nothing holds a
//! reference to an individual entity across ticks.

use crate::color::Color;
use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleKind {
    Spark,
    /// Floating music glyph that spins and sheds smoke.
    Note {
        glyph: &'static str,
        rotation: f32,
        spin: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub gravity: f32,
    pub friction: f32,
    pub alpha: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// One fixed tick: damp, fall, integrate, age.
    #[inline]
    pub fn step(&mut self) {
        self.vel *= self.friction;
        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.life -= TICK_SEC;
        self.alpha = if self.max_life > 0.0 {
            (self.life / self.max_life).max(0.0)
        } else {
            0.0
        };
        if let ParticleKind::Note { rotation, spin, .. } = &mut self.kind {
            *rotation += *spin;
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    #[inline]
    pub fn is_note(&self) -> bool {
        matches!(self.kind, ParticleKind::Note { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Smoke {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub alpha: f32,
}

impl Smoke {
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.size += SMOKE_GROWTH;
        self.life -= TICK_SEC;
        self.alpha = if self.max_life > 0.0 {
            (self.life / self.max_life * SMOKE_ALPHA).max(0.0)
        } else {
            0.0
        };
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Meteor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
}

impl Meteor {
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Meteors expire by leaving the canvas, never by age.
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x < -METEOR_MARGIN
            || self.pos.x > width + METEOR_MARGIN
            || self.pos.y > height + METEOR_MARGIN
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipKind {
    /// Fires kinetic lasers.
    Cigar,
    /// Fires instantaneous waves.
    Ufo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    /// Base horizontal speed per tick.
    pub vel_x: f32,
    pub base_y: f32,
    pub kind: ShipKind,
    pub side: Side,
    pub health: f32,
    pub last_shot: Option<f64>,
    /// Primary oscillation phase.
    pub angle: f32,
    pub speed_phase: f32,
    pub osc_speed: f32,
    pub vert_amp: f32,
    pub drift_y: f32,
    pub path_offset: f32,
}

impl Ship {
    /// Advance the flight path: slow vertical migration plus two superposed
    /// sinusoids, and a sinusoidally modulated horizontal speed.
    pub fn fly(&mut self) {
        self.angle += self.osc_speed;
        self.speed_phase += SHIP_SPEED_PHASE_STEP;
        self.base_y += self.drift_y;

        let main = self.angle.sin() * self.vert_amp;
        let micro = (self.angle * SHIP_MICRO_FREQ + self.path_offset).sin()
            * (self.vert_amp * SHIP_MICRO_AMP);
        let speed_mod = self.speed_phase.sin() * SHIP_SPEED_MOD;

        self.pos.y = self.base_y + main + micro;
        self.pos.x += self.vel_x + speed_mod;
    }

    #[inline]
    pub fn can_fire(&self, now: f64) -> bool {
        self.last_shot
            .map_or(true, |t| now - t > SHIP_FIRE_INTERVAL_SEC)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_disengaged(&self, width: f32) -> bool {
        self.pos.x < -SHIP_DISENGAGE_MARGIN || self.pos.x > width + SHIP_DISENGAGE_MARGIN
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Projectile {
    /// Kinetic shot integrated every tick.
    Laser {
        pos: Vec2,
        vel: Vec2,
        color: Color,
        owner: Side,
    },
    /// Instantaneous beam; lives for exactly one render pass.
    Wave { from: Vec2, to: Vec2, color: Color },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Supernova {
    pub pos: Vec2,
    pub size: f32,
    pub max_size: f32,
    pub alpha: f32,
    pub color: Color,
    pub life: f32,
}

impl Supernova {
    #[inline]
    pub fn step(&mut self) {
        self.size += (self.max_size - self.size) * SUPERNOVA_EASE;
        self.life -= SUPERNOVA_LIFE_STEP;
        self.alpha = self.life.max(0.0);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// Position before the latest update; used for shift trails.
    pub prev: Vec2,
    /// Polar layout around the canvas center.
    pub angle: f32,
    pub dist: f32,
    pub size: f32,
    pub opacity: f32,
    pub breathe_speed: f32,
    pub offset: f32,
}

impl Star {
    #[inline]
    pub fn layout_position(&self, center: Vec2) -> Vec2 {
        center + Vec2::new(self.angle.cos(), self.angle.sin()) * self.dist
    }

    /// Breathing opacity multiplier in 0.2..=1.0 at a given engine time.
    #[inline]
    pub fn breath(&self, time_ms: f64) -> f32 {
        ((time_ms * self.breathe_speed as f64) as f32 + self.offset).sin() * 0.4 + 0.6
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitConfig {
    /// Semi-major axis as a fraction of canvas width.
    pub radius: f32,
    /// Minor/major axis ratio.
    pub eccentricity: f32,
    pub tilt: f32,
    pub color: Color,
    pub base_speed: f32,
    /// Running angle; only ever increases.
    pub angle: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Nebula {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}
