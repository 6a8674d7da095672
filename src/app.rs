// Host-independent application state: the active scene plus everything that
// must survive a visual-mode switch (config, loaded signal, feature track).
use starburst_core::features::FeatureTrack;
use starburst_core::signal::{Drive, PreAnalyzedSignal};
use starburst_core::starfield::ShiftMode;
use starburst_core::{EngineConfig, FrameInput, Scene, VisualMode};

pub struct App {
    pub scene: Scene,
    config: EngineConfig,
    drive: Drive,
    track: Option<FeatureTrack>,
    width: f32,
    height: f32,
}

impl App {
    pub fn new(config: EngineConfig, mode: VisualMode, width: f32, height: f32, seed: u64) -> Self {
        let scene = Scene::new(mode, config.clone(), width, height, seed);
        log::info!("[app] {} scene {}x{}", mode, width, height);
        Self {
            scene,
            config,
            drive: Drive::Realtime,
            track: None,
            width,
            height,
        }
    }

    #[inline]
    pub fn mode(&self) -> VisualMode {
        self.scene.mode()
    }

    #[inline]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn drive_label(&self) -> &'static str {
        match (&self.drive, self.track.is_some()) {
            (Drive::PreAnalyzed(_), _) => "pre-analyzed",
            (Drive::Realtime, true) => "live + feature track",
            (Drive::Realtime, false) => "live",
        }
    }

    /// Rebuild the scene for `mode`, carrying over the loaded inputs.
    /// Selecting the current mode is a no-op.
    pub fn switch_mode(&mut self, mode: VisualMode, seed: u64) {
        if mode == self.scene.mode() {
            return;
        }
        self.scene = Scene::new(mode, self.config.clone(), self.width, self.height, seed);
        self.scene.set_drive(self.drive.clone());
        self.scene.set_overlay(self.track.clone());
        log::info!("[app] switched to {}", mode);
    }

    pub fn cycle_mode(&mut self, seed: u64) {
        let next = self.scene.mode().next();
        self.switch_mode(next, seed);
    }

    pub fn load_frames(&mut self, signal: PreAnalyzedSignal) {
        log::info!("[app] loaded {} analysis frames", signal.len());
        self.drive = if signal.is_empty() {
            Drive::Realtime
        } else {
            Drive::PreAnalyzed(signal)
        };
        self.scene.set_drive(self.drive.clone());
    }

    pub fn load_feature_track(&mut self, track: FeatureTrack) {
        log::info!("[app] loaded feature track with {} stems", track.stem_count());
        self.track = Some(track);
        self.scene.set_overlay(self.track.clone());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.scene.resize(width, height);
    }

    pub fn randomize_orbits(&mut self) {
        self.scene.randomize_orbits();
    }

    /// `pick` in 0..1 selects the shift mode.
    pub fn shift_stars(&mut self, pick: f64) -> bool {
        let i = ((pick.clamp(0.0, 0.999) * ShiftMode::ALL.len() as f64) as usize)
            .min(ShiftMode::ALL.len() - 1);
        self.scene.trigger_star_shift(ShiftMode::ALL[i])
    }

    pub fn update(&mut self, input: &FrameInput<'_>) {
        self.scene.update(input);
    }
}
