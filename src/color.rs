//! RGBA color used for quote stripes and background highlights.
//!
//! Colors are rendering metadata only: the engine stores them on spans and
//! writes them into markup, it never blends or draws them.
//!
//! # Examples
//!
//! ```
//! use richnote::Rgba;
//!
//! let stripe = Rgba::from_hex("#0000FF").unwrap();
//! assert_eq!(stripe, Rgba::BLUE);
//! assert_eq!(stripe.to_hex(), "#0000FF");
//! ```

use std::fmt;

/// RGBA color with f32 components in range [0.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Opaque blue, the default quote stripe color.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Opaque yellow, the default highlight color.
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);

    /// Create a new RGBA color from f32 components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from f32 RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from u8 RGBA components.
    #[must_use]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Parse a hex color string (`#RGB`, `#RRGGBB` or `#RRGGBBAA`, `#` optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        match hex.len() {
            3 => {
                let r = byte(0..1)?;
                let g = byte(1..2)?;
                let b = byte(2..3)?;
                Some(Self::from_rgba_u8(r * 17, g * 17, b * 17, 255))
            }
            6 => Some(Self::from_rgba_u8(byte(0..2)?, byte(2..4)?, byte(4..6)?, 255)),
            8 => Some(Self::from_rgba_u8(
                byte(0..2)?,
                byte(2..4)?,
                byte(4..6)?,
                byte(6..8)?,
            )),
            _ => None,
        }
    }

    /// Convert to u8 RGBA tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgba_u8(self) -> (u8, u8, u8, u8) {
        let to_u8 = |value: f32| (value * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a))
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b, a) = self.to_rgba_u8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_formats() {
        assert_eq!(Rgba::from_hex("#00F"), Some(Rgba::BLUE));
        assert_eq!(Rgba::from_hex("FFFF00"), Some(Rgba::YELLOW));
        let translucent = Rgba::from_hex("#FFFFFF80").unwrap();
        assert_eq!(translucent.to_rgba_u8(), (255, 255, 255, 128));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert_eq!(Rgba::from_hex(""), None);
        assert_eq!(Rgba::from_hex("#12"), None);
        assert_eq!(Rgba::from_hex("#GGGGGG"), None);
        assert_eq!(Rgba::from_hex("#ééé"), None);
    }

    #[test]
    fn test_hex_roundtrip() {
        let color = Rgba::from_rgba_u8(18, 52, 86, 255);
        assert_eq!(color.to_hex(), "#123456");
        assert_eq!(Rgba::from_hex(&color.to_hex()), Some(color));

        let translucent = Rgba::from_rgba_u8(1, 2, 3, 4);
        assert_eq!(translucent.to_string(), "#01020304");
    }
}
