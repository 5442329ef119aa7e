use std::{fmt, str::FromStr};

use crate::foundation::error::{AdError, AdResult};

pub use kurbo::{Point, Rect, Vec2};

/// Fixed raster surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Width and height used when nothing else is configured.
    pub const DEFAULT: Self = Self {
        width: 400,
        height: 400,
    };

    /// Build a canvas, rejecting sizes the CPU raster cannot address.
    pub fn new(width: u32, height: u32) -> AdResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Check both sides are in `1..=u16::MAX`.
    pub fn validate(self) -> AdResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AdError::validation("canvas width and height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(AdError::validation(format!(
                "canvas {}x{} exceeds {} px per side",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Full canvas rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Opaque 24-bit RGB color.
///
/// Parses from `#RRGGBB`, `RRGGBB` and the `#RGB` shorthand (case-insensitive) and always
/// formats as upper-case `#RRGGBB`. Equality is by channel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);
    /// Pure black.
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex triplet.
    pub fn from_hex(s: &str) -> AdResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        fn nibble(c: u8) -> Option<u8> {
            (c as char).to_digit(16).map(|d| d as u8)
        }

        let bytes = digits.as_bytes();
        let parse = || -> Option<[u8; 3]> {
            let mut out = [0u8; 3];
            match bytes.len() {
                6 => {
                    for (i, pair) in bytes.chunks_exact(2).enumerate() {
                        out[i] = nibble(pair[0])? * 16 + nibble(pair[1])?;
                    }
                }
                3 => {
                    for (i, &c) in bytes.iter().enumerate() {
                        out[i] = nibble(c)? * 17;
                    }
                }
                _ => return None,
            }
            Some(out)
        };

        parse()
            .map(|[r, g, b]| Self::new(r, g, b))
            .ok_or_else(|| {
                AdError::validation(format!("invalid hex color \"{s}\"; expected #RRGGBB"))
            })
    }

    /// Upper-case `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Opaque RGBA8 bytes (straight and premultiplied are identical at full alpha).
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = AdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
