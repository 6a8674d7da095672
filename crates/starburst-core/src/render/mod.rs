//! Renderer: a pure function of engine state onto a `Painter`.
//!
//! The core never talks to a browser; the front end implements `Painter`
//! over a 2D canvas context and tests implement it as a recorder.

pub mod firework;
pub mod universe;

use crate::color::Color;
use crate::entities::{Particle, ParticleKind, Smoke};
use glam::Vec2;
use smallvec::SmallVec;

/// Compositing mode for subsequent fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    SourceOver,
    /// Additive.
    Lighter,
}

/// Gradient color stops as `(offset, color)` with offsets in 0..=1.
pub type Stops = SmallVec<[(f32, Color); 4]>;

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear { from: Vec2, to: Vec2, stops: Stops },
    Radial { center: Vec2, radius: f32, stops: Stops },
}

impl Paint {
    pub fn radial(center: Vec2, radius: f32, stops: &[(f32, Color)]) -> Self {
        Paint::Radial {
            center,
            radius: radius.max(0.0),
            stops: stops.iter().copied().collect(),
        }
    }

    pub fn linear(from: Vec2, to: Vec2, stops: &[(f32, Color)]) -> Self {
        Paint::Linear {
            from,
            to,
            stops: stops.iter().copied().collect(),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

/// Draw-order markers, emitted once per layer in back-to-front order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Nebulae,
    Stars,
    Core,
    Orbits,
    Comet,
    Supernovas,
    Ships,
    Meteors,
    Particles,
    Smoke,
    Floor,
}

/// Immediate-mode drawing surface in canvas pixel coordinates.
pub trait Painter {
    fn save(&mut self);
    fn restore(&mut self);
    fn set_alpha(&mut self, alpha: f32);
    fn set_blend(&mut self, blend: Blend);
    /// Glow around subsequent fills; a blur of 0 disables it.
    fn set_shadow(&mut self, blur: f32, color: Color);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint);
    fn fill_rounded_rect(&mut self, origin: Vec2, size: Vec2, radius: f32, paint: &Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, paint: &Paint);
    /// Arc from `start` to `end` radians (clockwise), filled and closed by
    /// its chord.
    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, paint: &Paint);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, dash: Option<[f32; 2]>);
    /// Text centered on `at`.
    fn fill_text(&mut self, text: &str, at: Vec2, size_px: f32, color: Color);

    /// Marks the start of a layer. Surfaces that don't care ignore it.
    fn layer(&mut self, _layer: Layer) {}
}

/// Sparks additive; notes as rotated glyphs with a glow in their own color.
pub(crate) fn draw_particles<P: Painter + ?Sized>(p: &mut P, particles: &[Particle]) {
    p.save();
    for part in particles {
        match part.kind {
            ParticleKind::Spark => {
                p.set_blend(Blend::Lighter);
                p.fill_circle(part.pos, part.size, &part.color.with_alpha(part.alpha).into());
            }
            ParticleKind::Note {
                glyph, rotation, ..
            } => {
                p.save();
                p.set_blend(Blend::SourceOver);
                p.set_alpha(part.alpha);
                p.translate(part.pos);
                p.rotate(rotation);
                p.set_shadow(15.0, part.color);
                p.fill_text(glyph, Vec2::ZERO, part.size, part.color);
                p.restore();
            }
        }
    }
    p.restore();
}

pub(crate) fn draw_smoke<P: Painter + ?Sized>(p: &mut P, smoke: &[Smoke]) {
    p.save();
    for s in smoke {
        let paint = Paint::radial(
            s.pos,
            s.size,
            &[
                (0.0, Color::Rgba(200, 200, 220, s.alpha)),
                (1.0, Color::TRANSPARENT),
            ],
        );
        p.fill_circle(s.pos, s.size, &paint);
    }
    p.restore();
}
