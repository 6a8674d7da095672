use super::{draw_particles, draw_smoke, Blend, Layer, Paint, Painter};
use crate::color::Color;
use crate::constants::*;
use crate::entities::{Projectile, ShipKind};
use crate::orbits::{Comet, OrbitSystem};
use crate::universe::UniverseEngine;
use crate::visibility::Stage;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

const BACKDROP_ALPHA: f32 = 0.2; // translucent so motion leaves trails
const SILVER: Color = Color::rgb(220, 220, 220);

/// Draw one universe frame, back to front.
pub fn draw<P: Painter + ?Sized>(engine: &UniverseEngine, p: &mut P) {
    let (w, h) = (engine.width(), engine.height());
    let center = Vec2::new(w / 2.0, h / 2.0);
    let bands = engine.reading().bands;
    let vis = &engine.visibility;

    p.layer(Layer::Background);
    let backdrop = Paint::linear(
        Vec2::ZERO,
        Vec2::new(0.0, h),
        &[
            (0.0, Color::Rgba(0, 0, 8, BACKDROP_ALPHA)),
            (1.0, Color::Rgba(6, 2, 20, BACKDROP_ALPHA)),
        ],
    );
    p.fill_rect(Vec2::ZERO, Vec2::new(w, h), &backdrop);

    p.layer(Layer::Nebulae);
    for n in &engine.stars.nebulae {
        let glow = Paint::radial(n.pos, n.radius, &[(0.0, n.color), (1.0, Color::TRANSPARENT)]);
        p.fill_rect(Vec2::ZERO, Vec2::new(w, h), &glow);
    }

    p.layer(Layer::Stars);
    draw_stars(engine, p, vis.level(Stage::Stars));

    p.layer(Layer::Core);
    draw_core(p, center, bands.vocals, vis.level(Stage::Core));

    p.layer(Layer::Orbits);
    draw_orbits(engine, p, center, bands.as_array(), vis.level(Stage::Solar));

    p.layer(Layer::Comet);
    draw_comet(engine, p, bands.vocals, vis.level(Stage::Comet));

    p.layer(Layer::Supernovas);
    for s in &engine.sim.supernovas {
        p.save();
        p.set_alpha(s.alpha);
        let paint = Paint::radial(
            s.pos,
            s.size,
            &[(0.0, Color::WHITE), (0.2, s.color), (1.0, Color::TRANSPARENT)],
        );
        p.fill_circle(s.pos, s.size, &paint);
        p.restore();
    }

    p.layer(Layer::Ships);
    draw_ships(engine, p);

    p.layer(Layer::Meteors);
    for m in &engine.sim.meteors {
        p.stroke_line(m.pos, m.pos - m.vel * METEOR_STREAK, 2.0, m.color, None);
        p.fill_circle(m.pos, m.size, &m.color.into());
    }

    p.layer(Layer::Particles);
    draw_particles(p, &engine.sim.particles);

    p.layer(Layer::Smoke);
    draw_smoke(p, &engine.sim.smoke);
}

fn draw_stars<P: Painter + ?Sized>(engine: &UniverseEngine, p: &mut P, visibility: f32) {
    if visibility <= 0.0 {
        return;
    }
    let ms = engine.clock_ms();
    let trails = engine.stars.is_shifting();
    for star in &engine.stars.stars {
        let color = Color::WHITE.with_alpha(visibility * star.opacity * star.breath(ms));
        if trails {
            p.stroke_line(star.prev, star.pos, star.size, color, None);
        } else {
            p.fill_rect(star.pos, Vec2::splat(star.size), &color.into());
        }
    }
}

fn draw_core<P: Painter + ?Sized>(p: &mut P, center: Vec2, vocals: f32, visibility: f32) {
    if visibility <= 0.0 {
        return;
    }
    let pulse = vocals / 255.0 * 40.0;
    p.save();
    p.set_alpha(visibility);
    let glow = Paint::radial(
        center,
        (40.0 + pulse) * visibility,
        &[
            (0.0, Color::WHITE),
            (0.3, Color::rgb(255, 204, 0)),
            (0.6, Color::Rgba(255, 100, 0, 0.4)),
            (1.0, Color::TRANSPARENT),
        ],
    );
    p.fill_circle(center, (80.0 + pulse) * visibility, &glow);
    p.restore();
}

fn draw_orbits<P: Painter + ?Sized>(
    engine: &UniverseEngine,
    p: &mut P,
    center: Vec2,
    bands: [f32; 4],
    visibility: f32,
) {
    if visibility <= 0.0 {
        return;
    }
    let w = engine.width();
    p.save();
    p.set_blend(Blend::Lighter);
    for (i, orbit) in engine.orbits.slots.iter().enumerate() {
        let reveal = OrbitSystem::reveal(i, visibility);
        if reveal <= 0.0 {
            continue;
        }
        let energy = OrbitSystem::slot_energy(i, bands);
        let rx = w * orbit.radius + energy * 0.1;
        let ry = rx * orbit.eccentricity;
        let on_ellipse = |a: f32| Vec2::new(a.cos() * rx, a.sin() * ry);

        p.save();
        p.translate(center);
        p.rotate(orbit.tilt);
        p.set_alpha(reveal);

        let n = ORBIT_TRAIL_SEGMENTS as f32;
        for j in 0..ORBIT_TRAIL_SEGMENTS {
            let j = j as f32;
            let alpha = (1.0 - j / n) * ORBIT_TRAIL_ALPHA;
            let a0 = orbit.angle - j / n * ORBIT_TRAIL_LENGTH;
            let a1 = orbit.angle - (j + 1.0) / n * ORBIT_TRAIL_LENGTH;
            p.stroke_line(on_ellipse(a0), on_ellipse(a1), 2.0, orbit.color.with_alpha(alpha), None);
        }

        let size = (4.0 + energy / 255.0 * 8.0) * reveal;
        p.fill_circle(on_ellipse(orbit.angle), size, &orbit.color.into());
        p.restore();
    }
    p.restore();
}

fn draw_comet<P: Painter + ?Sized>(engine: &UniverseEngine, p: &mut P, vocals: f32, visibility: f32) {
    if visibility <= 0.0 {
        return;
    }
    let (w, h) = (engine.width(), engine.height());
    let head = Comet::head(engine.clock_ms(), w, h);
    if !Comet::is_on_screen(head, w, h) {
        return;
    }
    let dir = Comet::tail_direction(head, w, h);

    p.save();
    p.set_alpha(visibility);
    p.set_blend(Blend::Lighter);
    for i in 0..COMET_TAIL_POINTS {
        let at = engine.comet.tail_point(head, dir, i);
        let size = (3.5 - i as f32 * 0.18).max(0.2);
        let opacity = (1.0 - i as f32 / COMET_TAIL_POINTS as f32).max(0.0);
        p.fill_circle(at, size, &Color::Rgba(220, 240, 255, opacity).into());
    }
    p.fill_circle(head, 6.0 + vocals / 255.0 * 8.0, &Color::WHITE.into());
    p.restore();
}

fn draw_ships<P: Painter + ?Sized>(engine: &UniverseEngine, p: &mut P) {
    for ship in engine.sim.ships() {
        p.save();
        p.translate(ship.pos);
        match ship.kind {
            ShipKind::Cigar => {
                let hull = Paint::linear(
                    Vec2::new(-45.0, 0.0),
                    Vec2::new(45.0, 0.0),
                    &[(0.0, SILVER), (0.5, Color::WHITE), (1.0, SILVER)],
                );
                p.fill_rounded_rect(Vec2::new(-50.0, -10.0), Vec2::new(100.0, 20.0), 10.0, &hull);
                p.fill_circle(Vec2::new(35.0, 0.0), 3.0, &Color::rgb(255, 51, 51).into());
            }
            ShipKind::Ufo => {
                p.fill_ellipse(Vec2::ZERO, Vec2::new(45.0, 14.0), &SILVER.into());
                p.fill_arc(
                    Vec2::new(0.0, -6.0),
                    22.0,
                    PI,
                    TAU,
                    &Color::Rgba(180, 250, 255, 0.75).into(),
                );
            }
        }
        p.restore();
    }

    for pr in &engine.sim.projectiles {
        match pr {
            Projectile::Laser { pos, color, .. } => {
                p.fill_circle(*pos, 4.0, &(*color).into());
            }
            Projectile::Wave { from, to, color } => {
                p.stroke_line(*from, *to, 3.0, *color, Some([8.0, 4.0]));
            }
        }
    }
}
