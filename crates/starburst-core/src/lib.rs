//! Audio-reactive particle engine: simulation, effect triggers and a
//! canvas-agnostic renderer for the universe and piano-floor modes.

pub mod color;
pub mod config;
pub mod constants;
pub mod cooldown;
pub mod entities;
pub mod error;
pub mod features;
pub mod firework;
pub mod orbits;
pub mod render;
pub mod scene;
pub mod signal;
pub mod simulation;
pub mod starfield;
pub mod triggers;
pub mod universe;
pub mod visibility;

pub use color::Color;
pub use config::{EngineConfig, PhysicsPreset, PianoLayout, RealtimeBandLayout};
pub use error::{Result, StarburstError};
pub use features::{FeatureTrack, OnsetCursor};
pub use firework::FireworkEngine;
pub use render::{Blend, Layer, Paint, Painter};
pub use scene::{Scene, VisualMode};
pub use signal::{BandEnergy, Drive, PreAnalyzedSignal, SignalSource};
pub use simulation::{BurstKind, BurstOptions, Simulation};
pub use universe::{FrameInput, UniverseEngine};
