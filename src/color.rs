//! Color types and conversions.
//!
//! `Rgba8` is the straight-alpha, 8-bit-per-channel color used at every API
//! boundary. Pixels inside the surface are stored premultiplied (see
//! `pixfmt_rgba`), so this module also provides the premultiply/demultiply
//! helpers and the fixed-point `multiply` the blenders are built on.
//!
//! Colors arriving from controls are CSS-style: `#rrggbb` hex strings and
//! `hsl(h, s%, l%)` triples. Both conversions live here.

use std::fmt;
use std::str::FromStr;

use crate::basics::uround;
use crate::error::CanvasError;

// ============================================================================
// Rgba8
// ============================================================================

/// Straight-alpha RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Components above 255 are truncated to their low byte.
    pub fn new(r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            r: r as u8,
            g: g as u8,
            b: b as u8,
            a: a as u8,
        }
    }

    pub fn new_opaque(r: u32, g: u32, b: u32) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn transparent() -> Self {
        Self::default()
    }

    pub fn black() -> Self {
        Self::new_opaque(0, 0, 0)
    }

    /// Copy of `self` with alpha set from an opacity in [0, 1].
    pub fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            a: uround(opacity.clamp(0.0, 1.0) * 255.0) as u8,
            ..*self
        }
    }

    /// Fixed-point `a * b / 255` with rounding.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t = a as u32 * b as u32 + 128;
        (((t >> 8) + t) >> 8) as u8
    }

    /// Premultiplied components `[r*a, g*a, b*a, a]`.
    #[inline]
    pub fn premultiplied(&self) -> [u8; 4] {
        match self.a {
            255 => [self.r, self.g, self.b, 255],
            0 => [0, 0, 0, 0],
            a => [
                Self::multiply(self.r, a),
                Self::multiply(self.g, a),
                Self::multiply(self.b, a),
                a,
            ],
        }
    }

    /// Rebuild a straight-alpha color from premultiplied components.
    #[inline]
    pub fn from_premultiplied(p: [u8; 4]) -> Self {
        match p[3] {
            255 => Self::new_opaque(p[0] as u32, p[1] as u32, p[2] as u32),
            0 => Self::transparent(),
            a => {
                let demul = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255);
                Self::new(demul(p[0]), demul(p[1]), demul(p[2]), a as u32)
            }
        }
    }

    /// Linear interpolation toward `c` by `k` in [0, 1], all four channels.
    pub fn gradient(&self, c: &Rgba8, k: f64) -> Rgba8 {
        let mix = |a: u8, b: u8| uround(a as f64 + (b as f64 - a as f64) * k) as u32;
        Rgba8::new(
            mix(self.r, c.r),
            mix(self.g, c.g),
            mix(self.b, c.b),
            mix(self.a, c.a),
        )
    }

    // ------------------------------------------------------------------------
    // HSL
    // ------------------------------------------------------------------------

    /// Opaque color from CSS `hsl()` terms: hue in degrees (any value, wrapped
    /// into [0, 360)), saturation and lightness in percent.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        let m2 = if l <= 0.5 { l * (s + 1.0) } else { l + s - l * s };
        let m1 = l * 2.0 - m2;

        let to_u8 = |v: f64| uround(v.clamp(0.0, 1.0) * 255.0);
        Self::new_opaque(
            to_u8(hue_to_channel(m1, m2, h + 1.0 / 3.0)),
            to_u8(hue_to_channel(m1, m2, h)),
            to_u8(hue_to_channel(m1, m2, h - 1.0 / 3.0)),
        )
    }

    /// `from_hsl` with an alpha in [0, 1].
    pub fn from_hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self::from_hsl(hue, saturation, lightness).with_opacity(alpha)
    }

    // ------------------------------------------------------------------------
    // Hex
    // ------------------------------------------------------------------------

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, CanvasError> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || CanvasError::InvalidColor(s.to_string());

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match hex.len() {
            6 => {
                let v = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                Ok(Self::new_opaque((v >> 16) & 0xFF, (v >> 8) & 0xFF, v & 0xFF))
            }
            3 => {
                let v = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                let expand = |n: u32| n * 17;
                Ok(Self::new_opaque(
                    expand((v >> 8) & 0xF),
                    expand((v >> 4) & 0xF),
                    expand(v & 0xF),
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb`, alpha dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One channel of the CSS HSL-to-RGB conversion.
fn hue_to_channel(m1: f64, m2: f64, h: f64) -> f64 {
    let h = h.rem_euclid(1.0);
    if h * 6.0 < 1.0 {
        m1 + (m2 - m1) * h * 6.0
    } else if h * 2.0 < 1.0 {
        m2
    } else if h * 3.0 < 2.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
    } else {
        m1
    }
}

impl FromStr for Rgba8 {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// ============================================================================
// Tests
// ============================================================================
