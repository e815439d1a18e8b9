//! Control values consumed by the brushes and pattern generators.
//!
//! These arrive from outside the core (UI controls, config files) as plain
//! data. The drawing code trusts them; `ArtParams::clamped` and
//! `BrushConfig::clamped` are for the control boundary to call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::CanvasError;

// ============================================================================
// ArtParams
// ============================================================================

/// Pattern generator parameters. Documented ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtParams {
    /// 1..=10
    pub complexity: u32,
    /// 2..=12
    pub symmetry: u32,
    /// 0..=100
    pub colorfulness: u32,
    /// 1..=5
    pub layers: u32,
    /// 1..=10
    pub curvature: u32,
    /// 10..=100
    pub density: u32,
}

impl Default for ArtParams {
    fn default() -> Self {
        Self {
            complexity: 5,
            symmetry: 6,
            colorfulness: 50,
            layers: 3,
            curvature: 5,
            density: 50,
        }
    }
}

impl ArtParams {
    /// Copy with every field forced into its documented range.
    pub fn clamped(&self) -> Self {
        Self {
            complexity: self.complexity.clamp(1, 10),
            symmetry: self.symmetry.clamp(2, 12),
            colorfulness: self.colorfulness.min(100),
            layers: self.layers.clamp(1, 5),
            curvature: self.curvature.clamp(1, 10),
            density: self.density.clamp(10, 100),
        }
    }

    /// Saturation percentage for generated colors.
    pub fn saturation(&self) -> f64 {
        self.colorfulness as f64
    }
}

// ============================================================================
// Brush
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushMode {
    #[default]
    Normal,
    Speed,
    Eraser,
}

impl BrushMode {
    pub const ALL: [BrushMode; 3] = [BrushMode::Normal, BrushMode::Speed, BrushMode::Eraser];

    pub fn name(&self) -> &'static str {
        match self {
            BrushMode::Normal => "normal",
            BrushMode::Speed => "speed",
            BrushMode::Eraser => "eraser",
        }
    }
}

impl fmt::Display for BrushMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrushMode {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CanvasError::UnknownMode(s.to_string()))
    }
}

/// Brush settings read by the stroke renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// 1..=50
    #[serde(alias = "size")]
    pub brush_size: u32,
    /// 1..=50
    pub eraser_size: u32,
    #[serde(with = "hex_color")]
    pub color: Rgba8,
    pub mode: BrushMode,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            brush_size: 5,
            eraser_size: 20,
            color: Rgba8::black(),
            mode: BrushMode::Normal,
        }
    }
}

impl BrushConfig {
    pub fn clamped(&self) -> Self {
        Self {
            brush_size: self.brush_size.clamp(1, 50),
            eraser_size: self.eraser_size.clamp(1, 50),
            ..*self
        }
    }
}

/// `#rrggbb` strings for `Rgba8` fields.
mod hex_color {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::color::Rgba8;

    pub fn serialize<S: Serializer>(c: &Rgba8, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&c.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgba8, D::Error> {
        let s = String::deserialize(d)?;
        Rgba8::from_hex(&s).map_err(de::Error::custom)
    }
}

// ============================================================================
// PatternKind
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Fractal,
    Mandala,
    Abstract,
    Tessellation,
    Spirograph,
    Landscape,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Fractal,
        PatternKind::Mandala,
        PatternKind::Abstract,
        PatternKind::Tessellation,
        PatternKind::Spirograph,
        PatternKind::Landscape,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Fractal => "fractal",
            PatternKind::Mandala => "mandala",
            PatternKind::Abstract => "abstract",
            PatternKind::Tessellation => "tessellation",
            PatternKind::Spirograph => "spirograph",
            PatternKind::Landscape => "landscape",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CanvasError::UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = ArtParams::default();
        assert_eq!(p.complexity, 5);
        assert_eq!(p.symmetry, 6);
        assert_eq!(p.density, 50);
        let b = BrushConfig::default();
        assert_eq!((b.brush_size, b.eraser_size), (5, 20));
        assert_eq!(b.color, Rgba8::black());
        assert_eq!(b.mode, BrushMode::Normal);
    }

    #[test]
    fn test_clamped() {
        let p = ArtParams {
            complexity: 0,
            symmetry: 40,
            colorfulness: 300,
            layers: 9,
            curvature: 0,
            density: 1,
        }
        .clamped();
        assert_eq!(
            p,
            ArtParams {
                complexity: 1,
                symmetry: 12,
                colorfulness: 100,
                layers: 5,
                curvature: 1,
                density: 10,
            }
        );
        assert_eq!(ArtParams::default().clamped(), ArtParams::default());
        let b = BrushConfig {
            brush_size: 0,
            eraser_size: 99,
            ..BrushConfig::default()
        }
        .clamped();
        assert_eq!((b.brush_size, b.eraser_size), (1, 50));
    }

    #[test]
    fn test_pattern_names_round_trip() {
        for kind in PatternKind::ALL {
            assert_eq!(kind.to_string().parse::<PatternKind>().unwrap(), kind);
        }
        assert_eq!("Mandala".parse::<PatternKind>().unwrap(), PatternKind::Mandala);
        assert!(matches!(
            "spiral".parse::<PatternKind>(),
            Err(CanvasError::UnknownPattern(_))
        ));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let p: ArtParams = toml::from_str("symmetry = 8\nlayers = 2").unwrap();
        assert_eq!(p.symmetry, 8);
        assert_eq!(p.layers, 2);
        assert_eq!(p.complexity, 5);

        let b: BrushConfig = toml::from_str("color = \"#6d28d9\"\nmode = \"speed\"").unwrap();
        assert_eq!(b.color, Rgba8::new_opaque(0x6d, 0x28, 0xd9));
        assert_eq!(b.mode, BrushMode::Speed);
        assert_eq!(b.brush_size, 5);
    }

    #[test]
    fn test_bad_hex_rejected_on_load() {
        assert!(toml::from_str::<BrushConfig>("color = \"purple\"").is_err());
    }

    #[test]
    fn test_brush_mode_parse() {
        assert_eq!("eraser".parse::<BrushMode>().unwrap(), BrushMode::Eraser);
        assert_eq!(" speed ".parse::<BrushMode>().unwrap(), BrushMode::Speed);
        assert!(matches!(
            "airbrush".parse::<BrushMode>(),
            Err(CanvasError::UnknownMode(_))
        ));
    }
}
