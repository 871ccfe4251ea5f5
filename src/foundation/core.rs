use std::fmt;

use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Rect};

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The 9:16 reel canvas every render targets.
    pub const REEL: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Creates a surface; both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Factor mapping reel-canvas pixels onto this surface, per axis.
    pub fn scale_from_reel(self) -> (f64, f64) {
        (
            self.width_f64() / Self::REEL.width_f64(),
            self.height_f64() / Self::REEL.height_f64(),
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::REEL
    }
}

/// Opaque sRGB color, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// `#000000`.
    pub const BLACK: Rgb8 = Rgb8::new(0x00, 0x00, 0x00);
    /// `#ffffff`.
    pub const WHITE: Rgb8 = Rgb8::new(0xff, 0xff, 0xff);

    /// Color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (either case). Shorthand and alpha forms are rejected.
    pub fn from_hex(s: &str) -> ReelResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ReelError::validation(format!("color '{s}' must start with '#'")))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ReelError::validation(format!(
                "color '{s}' must have exactly 6 hex digits"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ReelError::validation(format!("color '{s}' has invalid hex digits")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = ReelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
