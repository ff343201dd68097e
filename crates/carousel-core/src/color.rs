use crate::error::{CarouselError, Result};
use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque 8-bit sRGB color, written as `#rrggbb` in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `1 - factor`, truncating toward zero.
    ///
    /// `factor` is clamped to \[0, 1\]. Truncation (not rounding) is part of
    /// the contract: `#FF3366` darkened by 0.2 is `#cc2851`.
    pub fn darken(self, factor: f64) -> Self {
        let keep = 1.0 - factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * keep).floor() as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }

    #[inline]
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Same color with a stroke opacity in \[0, 1\].
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Rgba<u8> {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([self.r, self.g, self.b, a])
    }

    /// Linear-space components for a GPU clear color.
    pub fn to_linear_f64(self) -> [f64; 3] {
        let lin = |c: u8| {
            let s = c as f64 / 255.0;
            if s <= 0.04045 {
                s / 12.92
            } else {
                ((s + 0.055) / 1.055).powf(2.4)
            }
        };
        [lin(self.r), lin(self.g), lin(self.b)]
    }
}

impl FromStr for Color {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CarouselError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: &str| u8::from_str_radix(range, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #rgb shorthand doubles each nibble
            3 => {
                let nibble = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
