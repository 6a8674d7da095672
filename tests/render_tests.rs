// Host-side tests for the renderer, driven through a recording `Painter`.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use starburst_core::constants::*;
use starburst_core::{
    BandEnergy, Blend, Color, Drive, EngineConfig, FireworkEngine, FrameInput, Layer, Paint,
    Painter, PreAnalyzedSignal, Scene, UniverseEngine, VisualMode,
};

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Save,
    Restore,
    Alpha(f32),
    Blend(Blend),
    Shadow(f32),
    Translate(Vec2),
    Rotate(f32),
    Rect(Paint),
    RoundedRect,
    Circle(Vec2, f32),
    Ellipse,
    Arc,
    Line(Option<[f32; 2]>),
    Text(String),
}

#[derive(Default)]
struct Recorder {
    layers: Vec<Layer>,
    ops: Vec<(Option<Layer>, Op)>,
}

impl Recorder {
    fn push(&mut self, op: Op) {
        self.ops.push((self.layers.last().copied(), op));
    }

    fn in_layer(&self, layer: Layer) -> impl Iterator<Item = &Op> {
        self.ops
            .iter()
            .filter(move |(l, _)| *l == Some(layer))
            .map(|(_, op)| op)
    }

    fn fills_in(&self, layer: Layer) -> usize {
        self.in_layer(layer)
            .filter(|op| {
                matches!(
                    op,
                    Op::Rect(_)
                        | Op::RoundedRect
                        | Op::Circle(..)
                        | Op::Ellipse
                        | Op::Arc
                        | Op::Line(_)
                        | Op::Text(_)
                )
            })
            .count()
    }
}

impl Painter for Recorder {
    fn save(&mut self) {
        self.push(Op::Save);
    }
    fn restore(&mut self) {
        self.push(Op::Restore);
    }
    fn set_alpha(&mut self, alpha: f32) {
        self.push(Op::Alpha(alpha));
    }
    fn set_blend(&mut self, blend: Blend) {
        self.push(Op::Blend(blend));
    }
    fn set_shadow(&mut self, blur: f32, _color: Color) {
        self.push(Op::Shadow(blur));
    }
    fn translate(&mut self, offset: Vec2) {
        self.push(Op::Translate(offset));
    }
    fn rotate(&mut self, radians: f32) {
        self.push(Op::Rotate(radians));
    }
    fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, paint: &Paint) {
        self.push(Op::Rect(paint.clone()));
    }
    fn fill_rounded_rect(&mut self, _origin: Vec2, _size: Vec2, _radius: f32, _paint: &Paint) {
        self.push(Op::RoundedRect);
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, _paint: &Paint) {
        self.push(Op::Circle(center, radius));
    }
    fn fill_ellipse(&mut self, _center: Vec2, _radii: Vec2, _paint: &Paint) {
        self.push(Op::Ellipse);
    }
    fn fill_arc(&mut self, _c: Vec2, _r: f32, _start: f32, _end: f32, _paint: &Paint) {
        self.push(Op::Arc);
    }
    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Color, dash: Option<[f32; 2]>) {
        self.push(Op::Line(dash));
    }
    fn fill_text(&mut self, text: &str, _at: Vec2, _size_px: f32, _color: Color) {
        self.push(Op::Text(text.to_string()));
    }
    fn layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }
}

fn draw_scene(scene: &Scene) -> Recorder {
    let mut rec = Recorder::default();
    scene.draw(&mut rec);
    rec
}

fn assert_balanced(rec: &Recorder) {
    let mut depth = 0i32;
    for (_, op) in &rec.ops {
        match op {
            Op::Save => depth += 1,
            Op::Restore => {
                depth -= 1;
                assert!(depth >= 0, "restore without save");
            }
            _ => {}
        }
    }
    assert_eq!(depth, 0, "unbalanced save/restore");
}

/// Universe engine with a few seconds of loud pre-analyzed playback behind it.
fn busy_universe() -> UniverseEngine {
    let mut e = UniverseEngine::new(EngineConfig::default(), 1280.0, 720.0, 21);
    let frames = vec![BandEnergy::new(230.0, 200.0, 200.0, 200.0); 30 * 30];
    e.set_drive(Drive::PreAnalyzed(PreAnalyzedSignal::new(frames)));
    for i in 0..(12 * 60) {
        e.update(&FrameInput {
            playback_sec: i as f32 * TICK_SEC,
            playing: true,
            spectrum: None,
        });
    }
    e
}

#[test]
fn universe_layers_draw_back_to_front() {
    let scene = Scene::Universe(busy_universe());
    let rec = draw_scene(&scene);
    assert_eq!(
        rec.layers,
        vec![
            Layer::Background,
            Layer::Nebulae,
            Layer::Stars,
            Layer::Core,
            Layer::Orbits,
            Layer::Comet,
            Layer::Supernovas,
            Layer::Ships,
            Layer::Meteors,
            Layer::Particles,
            Layer::Smoke,
        ]
    );
    assert_balanced(&rec);
    assert_eq!(rec.fills_in(Layer::Nebulae), NEBULA_COUNT);
    assert!(rec.fills_in(Layer::Stars) > 0);
    assert!(rec.fills_in(Layer::Core) > 0);
    assert!(rec.fills_in(Layer::Orbits) > 0);
}

#[test]
fn universe_draw_is_pure() {
    let engine = busy_universe();
    let before = engine.clone();
    let scene = Scene::Universe(engine);
    let first = draw_scene(&scene);
    let second = draw_scene(&scene);
    assert_eq!(first.ops, second.ops);

    let Scene::Universe(after) = &scene else { unreachable!() };
    assert_eq!(after.clock(), before.clock());
    assert_eq!(after.sim.particles, before.sim.particles);
    assert_eq!(after.comet.jitter, before.comet.jitter);
}

#[test]
fn hidden_stages_draw_nothing() {
    let scene = Scene::new(VisualMode::Universe, EngineConfig::default(), 800.0, 600.0, 1);
    let rec = draw_scene(&scene);
    for layer in [Layer::Stars, Layer::Core, Layer::Orbits, Layer::Comet] {
        assert_eq!(rec.fills_in(layer), 0, "{layer:?}");
    }
    // The backdrop is still painted.
    assert_eq!(rec.fills_in(Layer::Background), 1);
}

#[test]
fn sparks_draw_additively() {
    let mut e = UniverseEngine::new(EngineConfig::default(), 800.0, 600.0, 2);
    e.sim.burst(
        &mut StdRng::seed_from_u64(2),
        Vec2::new(400.0, 300.0),
        starburst_core::BurstKind::Mid,
        Color::WHITE,
        Default::default(),
    );
    let rec = draw_scene(&Scene::Universe(e));
    let ops: Vec<&Op> = rec.in_layer(Layer::Particles).collect();
    assert!(ops.contains(&&Op::Blend(Blend::Lighter)));
    assert_eq!(ops.iter().filter(|op| matches!(op, Op::Circle(..))).count(), MID_BURST.0);
}

#[test]
fn ships_and_projectiles_are_drawn() {
    let mut e = UniverseEngine::new(EngineConfig::default(), 1280.0, 720.0, 3);
    assert!(e.sim.start_battle(&mut StdRng::seed_from_u64(3)));
    let rec = draw_scene(&Scene::Universe(e));
    let ships: Vec<&Op> = rec.in_layer(Layer::Ships).collect();
    assert!(ships.contains(&&Op::RoundedRect), "cigar hull");
    assert!(ships.contains(&&Op::Ellipse), "saucer body");
    assert!(ships.contains(&&Op::Arc), "saucer dome");
}

#[test]
fn firework_layers_and_floor() {
    let scene = Scene::new(VisualMode::Firework, EngineConfig::default(), 880.0, 600.0, 4);
    let rec = draw_scene(&scene);
    assert_eq!(
        rec.layers,
        vec![Layer::Background, Layer::Floor, Layer::Smoke, Layer::Particles]
    );
    assert_balanced(&rec);
    let rects = rec
        .in_layer(Layer::Floor)
        .filter(|op| matches!(op, Op::Rect(_)))
        .count();
    assert_eq!(rects, PIANO_COLUMNS * 2);
    // Silent floor: no key glows.
    assert!(!rec.in_layer(Layer::Floor).any(|op| matches!(op, Op::Shadow(b) if *b > 0.0)));
}

#[test]
fn loud_columns_glow_and_launch_notes() {
    let mut engine = FireworkEngine::new(EngineConfig::default(), 880.0, 600.0, 5);
    let spectrum = vec![255u8; 512];
    for i in 0..120 {
        engine.update(&FrameInput {
            playback_sec: i as f32 * TICK_SEC,
            playing: true,
            spectrum: Some(&spectrum),
        });
    }
    assert!(engine.stats().column_batches > 0);
    let rec = draw_scene(&Scene::Firework(engine));
    let glows = rec
        .in_layer(Layer::Floor)
        .filter(|op| matches!(op, Op::Shadow(b) if *b > 0.0))
        .count();
    assert_eq!(glows, PIANO_COLUMNS);
    assert!(rec
        .in_layer(Layer::Particles)
        .any(|op| matches!(op, Op::Text(t) if NOTE_GLYPHS.contains(&t.as_str()))));
    assert_balanced(&rec);
}
