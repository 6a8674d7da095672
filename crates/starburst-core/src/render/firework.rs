use super::{draw_particles, draw_smoke, Layer, Paint, Painter};
use crate::color::Color;
use crate::constants::*;
use crate::firework::FireworkEngine;
use glam::Vec2;

const GRASS_HUE: f32 = 150.0;

/// Draw one piano-floor frame: backdrop, floor, smoke, particles.
pub fn draw<P: Painter + ?Sized>(engine: &FireworkEngine, p: &mut P) {
    let (w, h) = (engine.width(), engine.height());

    p.layer(Layer::Background);
    let sky = Paint::linear(
        Vec2::ZERO,
        Vec2::new(0.0, h),
        &[
            (0.0, Color::rgb(0, 8, 20)),
            (0.7, Color::rgb(0, 29, 61)),
            (1.0, Color::rgb(0, 53, 102)),
        ],
    );
    p.fill_rect(Vec2::ZERO, Vec2::new(w, h), &sky);

    p.layer(Layer::Floor);
    draw_floor(engine, p);

    p.layer(Layer::Smoke);
    draw_smoke(p, &engine.sim.smoke);

    p.layer(Layer::Particles);
    draw_particles(p, &engine.sim.particles);
}

/// Grass segment and key cap per column, both lit by column intensity.
fn draw_floor<P: Painter + ?Sized>(engine: &FireworkEngine, p: &mut P) {
    let kw = engine.column_width();
    let top = engine.grass_top();
    let grass_h = engine.height() - top;
    let dim_key = Color::Rgba(255, 255, 255, 0.15);

    for (i, &intensity) in engine.columns().iter().enumerate() {
        let x = i as f32 * kw;
        let l = 8.0 + intensity * 25.0;
        let grass = Paint::linear(
            Vec2::new(x, top),
            Vec2::new(x, engine.height()),
            &[
                (0.0, Color::hsl(GRASS_HUE, 40.0, l + 8.0)),
                (1.0, Color::hsl(GRASS_HUE, 50.0, l)),
            ],
        );
        p.fill_rect(Vec2::new(x, top), Vec2::new(kw, grass_h), &grass);

        let key = if intensity > KEY_LIT_INTENSITY {
            Color::WHITE
        } else {
            dim_key
        };
        let glow = intensity > KEY_GLOW_INTENSITY;
        if glow {
            p.set_shadow(10.0, Color::WHITE);
        }
        p.fill_rect(
            Vec2::new(x, top - KEY_HEIGHT / 2.0),
            Vec2::new((kw - 1.0).max(0.0), KEY_HEIGHT),
            &key.into(),
        );
        if glow {
            p.set_shadow(0.0, Color::TRANSPARENT);
        }
    }
}
