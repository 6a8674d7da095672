// Front-end tuning: DOM wiring, analyser setup and frame bookkeeping.
// Engine tuning lives in `starburst_core::constants`.

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const AUDIO_ID: &str = "app-audio";
pub const OVERLAY_ID: &str = "start-overlay";
pub const OVERLAY_OK_ID: &str = "overlay-ok";
pub const OVERLAY_CLOSE_ID: &str = "overlay-close";
pub const HINT_ID: &str = "hint-overlay";

// Analyser node
pub const ANALYSER_FFT_SIZE: u32 = 1024; // 512 bins, matches the default band layout
pub const ANALYSER_SMOOTHING: f64 = 0.8; // 0..1, higher = steadier bins

// Canvas backing store
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0; // cap for dense screens

// Diagnostics
pub const FPS_LOG_INTERVAL_SEC: f32 = 10.0; // debug-level frame-rate summary cadence
