//! The active visual mode behind one update/draw/resize surface.

use crate::config::EngineConfig;
use crate::error::StarburstError;
use crate::features::FeatureTrack;
use crate::firework::FireworkEngine;
use crate::render::{self, Painter};
use crate::signal::Drive;
use crate::starfield::ShiftMode;
use crate::universe::{FrameInput, UniverseEngine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualMode {
    #[default]
    Universe,
    Firework,
}

impl VisualMode {
    pub fn next(self) -> Self {
        match self {
            VisualMode::Universe => VisualMode::Firework,
            VisualMode::Firework => VisualMode::Universe,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisualMode::Universe => "universe",
            VisualMode::Firework => "firework",
        }
    }
}

impl fmt::Display for VisualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualMode {
    type Err = StarburstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "universe" => Ok(VisualMode::Universe),
            "firework" | "piano" | "piano-floor" => Ok(VisualMode::Firework),
            other => Err(StarburstError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Scene {
    Universe(UniverseEngine),
    Firework(FireworkEngine),
}

impl Scene {
    pub fn new(mode: VisualMode, config: EngineConfig, width: f32, height: f32, seed: u64) -> Self {
        match mode {
            VisualMode::Universe => Scene::Universe(UniverseEngine::new(config, width, height, seed)),
            VisualMode::Firework => Scene::Firework(FireworkEngine::new(config, width, height, seed)),
        }
    }

    pub fn mode(&self) -> VisualMode {
        match self {
            Scene::Universe(_) => VisualMode::Universe,
            Scene::Firework(_) => VisualMode::Firework,
        }
    }

    pub fn update(&mut self, input: &FrameInput<'_>) {
        match self {
            Scene::Universe(e) => e.update(input),
            Scene::Firework(e) => e.update(input),
        }
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        match self {
            Scene::Universe(e) => render::universe::draw(e, painter),
            Scene::Firework(e) => render::firework::draw(e, painter),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        match self {
            Scene::Universe(e) => e.resize(width, height),
            Scene::Firework(e) => e.resize(width, height),
        }
    }

    /// Signal drive for the universe; the piano floor always reads the live
    /// spectrum.
    pub fn set_drive(&mut self, drive: Drive) {
        if let Scene::Universe(e) = self {
            e.set_drive(drive);
        }
    }

    /// Feature-track overlay for the piano floor.
    pub fn set_overlay(&mut self, track: Option<FeatureTrack>) {
        if let Scene::Firework(e) = self {
            e.set_overlay(track);
        }
    }

    pub fn randomize_orbits(&mut self) {
        if let Scene::Universe(e) = self {
            e.randomize_orbits();
        }
    }

    /// Camera shift on the universe star field; false in other modes or
    /// while a shift is running.
    pub fn trigger_star_shift(&mut self, mode: ShiftMode) -> bool {
        match self {
            Scene::Universe(e) => e.trigger_star_shift(mode),
            Scene::Firework(_) => false,
        }
    }

    /// Live particle count, for diagnostics.
    pub fn particle_count(&self) -> usize {
        match self {
            Scene::Universe(e) => e.sim.particles.len(),
            Scene::Firework(e) => e.sim.particles.len(),
        }
    }
}
