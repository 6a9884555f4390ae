//! Color type shared by every drawing backend.
//!
//! Colors are stored as 8-bit sRGB channels plus a floating-point alpha, the
//! same model a 2D canvas `fillStyle`/`strokeStyle` string expresses. They
//! serialize as CSS color strings so recorded draw commands stay readable.

use serde::{Serialize, Serializer};

/// sRGB color with 8-bit channels and alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Opaque color from channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color with explicit alpha. Alpha outside [0, 1] is clamped.
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Formats the color as a hex string `"#rrggbb"`, dropping alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Formats the color as a CSS color string.
    ///
    /// Opaque colors use the hex form; translucent colors use `rgba(r, g, b, a)`.
    pub fn to_css(self) -> String {
        if self.a >= 1.0 {
            self.to_hex()
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}
