//! Transient entity simulation shared by both visual modes.
//!
//! `Simulation` owns every short-lived collection (particles, smoke, meteors,
//! the ship battle, projectiles, supernovas), exposes the spawn calls the
//! trigger layer uses, and advances everything by one fixed tick per `step`.

use crate::color::Color;
use crate::config::PhysicsPreset;
use crate::constants::*;
use crate::entities::*;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

/// Category of a radial burst; selects default count, speed, size and gravity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BurstKind {
    Bass,
    Mid,
    High,
}

/// Optional overrides for a burst.
///
/// Supplying `count` switches to the generic 1..3 px size range and a speed
/// of `speed` (default 1), mirroring hand-tuned effect calls; otherwise the
/// kind's defaults apply and `speed` overrides only the speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstOptions {
    pub count: Option<usize>,
    pub speed: Option<f32>,
    /// Center direction in radians; `None` radiates in all directions.
    pub direction: Option<f32>,
    /// Angular spread around `direction`.
    pub spread: Option<f32>,
    pub size_scale: f32,
}

impl Default for BurstOptions {
    fn default() -> Self {
        Self {
            count: None,
            speed: None,
            direction: None,
            spread: None,
            size_scale: 1.0,
        }
    }
}

impl BurstOptions {
    pub fn sized(count: usize, speed: f32) -> Self {
        Self {
            count: Some(count),
            speed: Some(speed),
            ..Self::default()
        }
    }

    pub fn scale(mut self, size_scale: f32) -> Self {
        self.size_scale = size_scale;
        self
    }

    pub fn aimed(mut self, direction: f32, spread: f32) -> Self {
        self.direction = Some(direction);
        self.spread = Some(spread);
        self
    }
}

/// The paired ships of one battle. A battle always holds exactly two.
#[derive(Clone, Debug, PartialEq)]
pub struct Battle {
    pub ships: [Ship; 2],
}

impl Battle {
    fn pair_mut(&mut self, i: usize) -> (&mut Ship, &mut Ship) {
        let (a, b) = self.ships.split_at_mut(1);
        if i == 0 {
            (&mut a[0], &mut b[0])
        } else {
            (&mut b[0], &mut a[0])
        }
    }
}

/// Running spawn counters, for diagnostics and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub bursts: u64,
    pub dropped_bursts: u64,
    pub battles: u64,
    pub ships_destroyed: u64,
}

#[derive(Clone, Debug)]
pub struct Simulation {
    pub width: f32,
    pub height: f32,
    pub physics: PhysicsPreset,
    pub particle_cap: usize,

    pub particles: Vec<Particle>,
    pub smoke: Vec<Smoke>,
    pub meteors: Vec<Meteor>,
    pub battle: Option<Battle>,
    pub projectiles: Vec<Projectile>,
    pub supernovas: Vec<Supernova>,

    pub stats: SimStats,
}

const LASER_COLOR: Color = Color::rgb(255, 51, 51);
const WAVE_COLOR: Color = Color::rgb(50, 255, 255);
const WAVE_HIT_COLOR: Color = Color::rgb(0, 255, 255);
const DEBRIS_COLOR: Color = Color::rgb(255, 255, 0);

impl Simulation {
    pub fn new(width: f32, height: f32, physics: PhysicsPreset, particle_cap: usize) -> Self {
        Self {
            width,
            height,
            physics,
            particle_cap,
            particles: Vec::new(),
            smoke: Vec::new(),
            meteors: Vec::new(),
            battle: None,
            projectiles: Vec::new(),
            supernovas: Vec::new(),
            stats: SimStats::default(),
        }
    }

    /// Transient entities survive a resize; only the bounds change.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Ships currently alive: always zero or two.
    pub fn ships(&self) -> &[Ship] {
        match &self.battle {
            Some(b) => &b.ships,
            None => &[],
        }
    }

    #[inline]
    pub fn battle_in_progress(&self) -> bool {
        self.battle.is_some()
    }

    /// Room left under the particle cap.
    #[inline]
    fn particle_room(&self) -> usize {
        self.particle_cap.saturating_sub(self.particles.len())
    }

    // ---------------- spawning ----------------

    /// Radial burst of sparks. Returns how many particles were created; zero
    /// when the cap is already reached.
    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        at: Vec2,
        kind: BurstKind,
        color: Color,
        opts: BurstOptions,
    ) -> usize {
        let (count, speed, size_min, size_max) = match opts.count {
            Some(c) => (c, opts.speed.unwrap_or(1.0), 1.0, 3.0),
            None => {
                let (c, s, lo, hi) = match kind {
                    BurstKind::Bass => BASS_BURST,
                    BurstKind::Mid => MID_BURST,
                    BurstKind::High => HIGH_BURST,
                };
                (c, opts.speed.unwrap_or(s), lo, hi)
            }
        };

        let room = self.particle_room();
        if room == 0 {
            self.stats.dropped_bursts += 1;
            return 0;
        }
        let count = count.min(room);
        let gravity = match kind {
            BurstKind::Bass => self.physics.heavy_gravity,
            _ => self.physics.light_gravity,
        };
        let spread = opts.spread.unwrap_or(TAU);

        self.particles.reserve(count);
        for _ in 0..count {
            let angle = match opts.direction {
                Some(dir) => dir + (rng.gen::<f32>() - 0.5) * spread,
                None => rng.gen::<f32>() * TAU,
            };
            let v = rng.gen::<f32>() * speed;
            let life = self.physics.life_min + rng.gen::<f32>() * self.physics.life_span;
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * v,
                color,
                size: (size_min + rng.gen::<f32>() * (size_max - size_min)) * opts.size_scale,
                life,
                max_life: life,
                gravity,
                friction: self.physics.friction,
                alpha: 1.0,
                kind: ParticleKind::Spark,
            });
        }
        self.stats.bursts += 1;
        count
    }

    /// Upward spark fountain plus one note glyph (piano-floor firework).
    pub fn firework_batch<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        at: Vec2,
        color: Color,
        intensity: f32,
    ) -> usize {
        let room = self.particle_room();
        if room == 0 {
            self.stats.dropped_bursts += 1;
            return 0;
        }
        let wanted = (SPARK_BASE_COUNT + intensity * SPARK_INTENSITY_COUNT).floor() as usize;
        let sparks = wanted.min(room.saturating_sub(1));
        for _ in 0..sparks {
            let angle = -PI / 2.0 + (rng.gen::<f32>() - 0.5) * SPARK_CONE;
            let speed = 2.0 + rng.gen::<f32>() * 8.0 * intensity;
            let life = self.physics.life_min + rng.gen::<f32>() * self.physics.life_span;
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                size: 1.0 + rng.gen::<f32>() * 2.0,
                life,
                max_life: life,
                gravity: self.physics.heavy_gravity,
                friction: self.physics.friction,
                alpha: 1.0,
                kind: ParticleKind::Spark,
            });
        }
        self.note(rng, at, color, intensity);
        self.stats.bursts += 1;
        sparks + 1
    }

    /// A single floating note glyph.
    pub fn note<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Vec2, color: Color, intensity: f32) {
        if self.particle_room() == 0 {
            return;
        }
        let glyph = NOTE_GLYPHS[rng.gen_range(0..NOTE_GLYPHS.len())];
        let life = 1.0 + rng.gen::<f32>() * 1.5;
        self.particles.push(Particle {
            pos: at,
            vel: Vec2::new(
                (rng.gen::<f32>() - 0.5) * 2.0,
                -2.0 - rng.gen::<f32>() * 4.0 * intensity,
            ),
            color,
            size: 16.0 + intensity * 24.0,
            life,
            max_life: life,
            gravity: NOTE_GRAVITY,
            friction: NOTE_FRICTION,
            alpha: 1.0,
            kind: ParticleKind::Note {
                glyph,
                rotation: rng.gen::<f32>() * TAU,
                spin: (rng.gen::<f32>() - 0.5) * 2.0 * NOTE_SPIN_MAX,
            },
        });
    }

    pub fn smoke_puff<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Vec2) {
        let life = 1.0 + rng.gen::<f32>();
        self.smoke.push(Smoke {
            pos: at,
            vel: Vec2::new(
                (rng.gen::<f32>() - 0.5) * 0.5,
                -0.5 - rng.gen::<f32>() * 0.5,
            ),
            size: 10.0 + rng.gen::<f32>() * 20.0,
            life,
            max_life: life,
            alpha: SMOKE_ALPHA,
        });
    }

    pub fn supernova<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Vec2) {
        self.supernovas.push(Supernova {
            pos: at,
            size: 0.0,
            max_size: SUPERNOVA_MAX_SIZE_MIN + rng.gen::<f32>() * SUPERNOVA_MAX_SIZE_SPAN,
            alpha: 1.0,
            color: Color::hsl(rng.gen::<f32>() * 360.0, 80.0, 90.0),
            life: 1.0,
        });
    }

    /// Meteor entering from a random side edge, heading across and down.
    pub fn meteor<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let from_left = rng.gen_bool(0.5);
        let x = if from_left {
            -METEOR_EDGE_INSET
        } else {
            self.width + METEOR_EDGE_INSET
        };
        let y = rng.gen::<f32>() * self.height * METEOR_SPAWN_BAND;
        let speed_x = METEOR_SPEED_X_MIN + rng.gen::<f32>() * METEOR_SPEED_X_SPAN;
        self.meteors.push(Meteor {
            pos: Vec2::new(x, y),
            vel: Vec2::new(
                if from_left { speed_x } else { -speed_x },
                METEOR_SPEED_Y_MIN + rng.gen::<f32>() * METEOR_SPEED_Y_SPAN,
            ),
            size: 2.0 + rng.gen::<f32>() * 2.0,
            color: Color::hsl(180.0 + rng.gen::<f32>() * 60.0, 100.0, 80.0),
        });
    }

    /// Launch a cigar (from the left) against a ufo (from the right).
    /// No-op while a battle is already in progress.
    pub fn start_battle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.battle.is_some() {
            return false;
        }
        let h = self.height;
        let left_y = rng.gen::<f32>() * h * 0.6 + h * 0.2;
        let right_y = rng.gen::<f32>() * h * 0.6 + h * 0.2;

        let cigar = Ship {
            pos: Vec2::new(-SHIP_ENTRY_OFFSET, left_y),
            vel_x: 1.8 + rng.gen::<f32>() * 1.5,
            base_y: left_y,
            kind: ShipKind::Cigar,
            side: Side::Left,
            health: CIGAR_HEALTH,
            last_shot: None,
            angle: 0.0,
            speed_phase: 0.0,
            osc_speed: 0.0015 + rng.gen::<f32>() * 0.003,
            vert_amp: 50.0 + rng.gen::<f32>() * 150.0,
            drift_y: (rng.gen::<f32>() - 0.5) * 0.8,
            path_offset: rng.gen::<f32>() * TAU,
        };
        let ufo = Ship {
            pos: Vec2::new(self.width + SHIP_ENTRY_OFFSET, right_y),
            vel_x: -(2.0 + rng.gen::<f32>() * 1.5),
            base_y: right_y,
            kind: ShipKind::Ufo,
            side: Side::Right,
            health: UFO_HEALTH,
            last_shot: None,
            angle: 0.0,
            speed_phase: 0.0,
            osc_speed: 0.02 + rng.gen::<f32>() * 0.05,
            vert_amp: 80.0 + rng.gen::<f32>() * 180.0,
            drift_y: (rng.gen::<f32>() - 0.5) * 1.0,
            path_offset: rng.gen::<f32>() * TAU,
        };
        self.battle = Some(Battle {
            ships: [cigar, ufo],
        });
        self.stats.battles += 1;
        log::debug!("[sim] ship battle started");
        true
    }

    // ---------------- update ----------------

    /// Advance everything by one fixed tick. `now` is engine time in seconds,
    /// `climax` lets ships fire regardless of range.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f64, climax: bool) {
        for s in &mut self.supernovas {
            s.step();
        }
        self.supernovas.retain(Supernova::is_alive);

        let mut puffs: SmallVec<[Vec2; 16]> = SmallVec::new();
        for p in &mut self.particles {
            p.step();
            if p.is_note() && rng.gen::<f32>() < SMOKE_CHANCE {
                puffs.push(p.pos);
            }
        }
        self.particles.retain(Particle::is_alive);
        for at in puffs {
            self.smoke_puff(rng, at);
        }

        for s in &mut self.smoke {
            s.step();
        }
        self.smoke.retain(Smoke::is_alive);

        let (w, h) = (self.width, self.height);
        for m in &mut self.meteors {
            m.step();
        }
        self.meteors.retain(|m| !m.is_out_of_bounds(w, h));

        self.step_projectiles(rng);
        self.step_ships(rng, now, climax);
        self.resolve_battle(rng);
    }

    /// Waves from the previous tick vanish; lasers move and collide.
    fn step_projectiles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut impacts: SmallVec<[(Vec2, Color); 4]> = SmallVec::new();
        let width = self.width;
        let battle = &mut self.battle;
        self.projectiles.retain_mut(|pr| match pr {
            Projectile::Wave { .. } => false,
            Projectile::Laser {
                pos,
                vel,
                color,
                owner,
            } => {
                *pos += *vel;
                if let Some(b) = battle.as_mut() {
                    let hit = b
                        .ships
                        .iter_mut()
                        .find(|s| s.side != *owner && s.pos.distance(*pos) < LASER_HIT_RADIUS);
                    if let Some(target) = hit {
                        target.health -= LASER_DAMAGE;
                        impacts.push((*pos, *color));
                        return false;
                    }
                }
                pos.x >= -LASER_MARGIN && pos.x <= width + LASER_MARGIN
            }
        });
        for (at, color) in impacts {
            self.burst(rng, at, BurstKind::High, color, BurstOptions::sized(20, 8.0));
        }
    }

    fn step_ships<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f64, climax: bool) {
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        let mut wave_hits: SmallVec<[Vec2; 2]> = SmallVec::new();
        for i in 0..2 {
            let (me, other) = battle.pair_mut(i);
            me.fly();

            let near = (me.pos.x - other.pos.x).abs() < SHIP_ENGAGE_DISTANCE;
            if !(near || climax) || !me.can_fire(now) {
                continue;
            }
            match me.kind {
                ShipKind::Ufo => {
                    self.projectiles.push(Projectile::Wave {
                        from: me.pos,
                        to: other.pos,
                        color: WAVE_COLOR,
                    });
                    other.health -= WAVE_DAMAGE;
                    wave_hits.push(other.pos);
                }
                ShipKind::Cigar => {
                    let dir = (other.pos - me.pos).normalize_or_zero();
                    self.projectiles.push(Projectile::Laser {
                        pos: me.pos,
                        vel: dir * LASER_SPEED,
                        color: LASER_COLOR,
                        owner: me.side,
                    });
                }
            }
            me.last_shot = Some(now);
        }
        for at in wave_hits {
            self.burst(rng, at, BurstKind::High, WAVE_HIT_COLOR, BurstOptions::sized(12, 5.0));
        }
    }

    /// End the battle when a ship dies or the pair disengages.
    fn resolve_battle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let width = self.width;
        let over = self.battle.as_ref().is_some_and(|b| {
            b.ships
                .iter()
                .any(|s| s.is_dead() || s.is_disengaged(width))
        });
        if !over {
            return;
        }
        let Some(battle) = self.battle.take() else {
            return;
        };
        for ship in battle.ships.iter().filter(|s| s.is_dead()) {
            self.explode(rng, ship.pos);
            self.stats.ships_destroyed += 1;
            log::debug!("[sim] {:?} ship destroyed", ship.kind);
        }
        // Lasers in flight have no one left to hit.
        self.projectiles
            .retain(|p| matches!(p, Projectile::Wave { .. }));
    }

    /// Multi-stage death explosion.
    fn explode<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Vec2) {
        self.burst(
            rng,
            at,
            BurstKind::Bass,
            Color::WHITE,
            BurstOptions::sized(180, 22.0).scale(3.0),
        );
        self.burst(rng, at, BurstKind::Mid, DEBRIS_COLOR, BurstOptions::sized(100, 14.0));
        self.supernova(rng, at);
    }
}
