use serde::{Deserialize, Serialize};
use std::fmt;

/// A CSS-compatible color value.
///
/// Effects are authored in whichever space reads best (HSL for hue sweeps,
/// RGB for fixed accents); the canvas front end formats both with `Display`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// Red, green, blue in 0..=255 and alpha in 0..=1.
    Rgba(u8, u8, u8, f32),
    /// Hue in degrees, saturation and lightness in percent, alpha in 0..=1.
    Hsla(f32, f32, f32, f32),
}

impl Color {
    pub const WHITE: Color = Color::Rgba(255, 255, 255, 1.0);
    pub const TRANSPARENT: Color = Color::Rgba(0, 0, 0, 0.0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba(r, g, b, 1.0)
    }

    #[inline]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Color::Hsla(h, s, l, 1.0)
    }

    /// Same color with its alpha replaced (clamped to 0..=1).
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = alpha.clamp(0.0, 1.0);
        match self {
            Color::Rgba(r, g, b, _) => Color::Rgba(r, g, b, a),
            Color::Hsla(h, s, l, _) => Color::Hsla(h, s, l, a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba(r, g, b, a) => write!(f, "rgba({}, {}, {}, {:.3})", r, g, b, a),
            Color::Hsla(h, s, l, a) => {
                write!(f, "hsla({:.1}, {:.1}%, {:.1}%, {:.3})", h, s, l, a)
            }
        }
    }
}
