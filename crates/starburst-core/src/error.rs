use thiserror::Error;

/// Errors produced while loading external inputs (analysis frames, feature
/// tracks, config overrides). Per-frame simulation never fails.
#[derive(Debug, Error)]
pub enum StarburstError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature track has no usable stems")]
    EmptyFeatureTrack,

    #[error("feature track step must be positive, got {0}")]
    InvalidStep(f32),

    #[error("analysis frames must be a multiple of 4 values, got {0}")]
    RaggedFrames(usize),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown visual mode '{0}'")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, StarburstError>;
