//! Gradient color lookup table.
//!
//! Builds a fixed-size table from color stops so span generators can map a
//! gradient position to a color with one index operation.

use crate::basics::uround;
use crate::color::Rgba8;

/// Indexed access to a color palette of known size.
pub trait ColorFunction {
    fn size(&self) -> usize;
    fn get(&self, index: usize) -> Rgba8;

    /// Color at position `t` in [0, 1]; values outside are clamped.
    fn color_at(&self, t: f64) -> Rgba8 {
        let last = self.size().saturating_sub(1);
        let i = uround(t.clamp(0.0, 1.0) * last as f64) as usize;
        self.get(i.min(last))
    }
}

#[derive(Debug, Clone, Copy)]
struct ColorStop {
    offset: f64,
    color: Rgba8,
}

/// Lookup table interpolated from SVG-style color stops.
///
/// ```
/// use paint_canvas::color::Rgba8;
/// use paint_canvas::gradient_lut::{ColorFunction, GradientLut};
///
/// let mut lut = GradientLut::new();
/// lut.add_color(0.0, Rgba8::black());
/// lut.add_color(1.0, Rgba8::new_opaque(255, 255, 255));
/// lut.build_lut();
/// assert_eq!(lut.get(255), Rgba8::new_opaque(255, 255, 255));
/// ```
#[derive(Debug, Clone)]
pub struct GradientLut {
    stops: Vec<ColorStop>,
    lut: Vec<Rgba8>,
}

pub const DEFAULT_LUT_SIZE: usize = 256;

impl GradientLut {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_LUT_SIZE)
    }

    pub fn with_size(size: usize) -> Self {
        Self {
            stops: Vec::new(),
            lut: vec![Rgba8::default(); size.max(2)],
        }
    }

    /// Two-stop table from `c1` at 0 to `c2` at 1, already built.
    pub fn two_colors(c1: Rgba8, c2: Rgba8) -> Self {
        let mut lut = Self::new();
        lut.add_color(0.0, c1);
        lut.add_color(1.0, c2);
        lut.build_lut();
        lut
    }

    pub fn remove_all(&mut self) {
        self.stops.clear();
    }

    /// Add a stop; `offset` is clamped to [0, 1].
    pub fn add_color(&mut self, offset: f64, color: Rgba8) {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
    }

    /// Fill the table. Stops are sorted by offset and duplicates dropped.
    /// With a single stop the table is that color; with none it is left
    /// untouched.
    pub fn build_lut(&mut self) {
        self.stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        self.stops.dedup_by(|a, b| (a.offset - b.offset).abs() < 1e-10);

        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return,
        };

        let last_index = (self.lut.len() - 1) as f64;
        for (i, slot) in self.lut.iter_mut().enumerate() {
            let t = i as f64 / last_index;
            *slot = if t <= first.offset {
                first.color
            } else if t >= last.offset {
                last.color
            } else {
                let k = self.stops.partition_point(|s| s.offset <= t);
                let (a, b) = (self.stops[k - 1], self.stops[k]);
                a.color.gradient(&b.color, (t - a.offset) / (b.offset - a.offset))
            };
        }
    }
}

impl Default for GradientLut {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorFunction for GradientLut {
    fn size(&self) -> usize {
        self.lut.len()
    }

    fn get(&self, index: usize) -> Rgba8 {
        self.lut[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_stop_endpoints_and_middle() {
        let lut = GradientLut::two_colors(Rgba8::new_opaque(0, 0, 0), Rgba8::new_opaque(255, 0, 0));
        assert_eq!(lut.get(0), Rgba8::new_opaque(0, 0, 0));
        assert_eq!(lut.get(255), Rgba8::new_opaque(255, 0, 0));
        let mid = lut.get(128);
        assert!((mid.r as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_stops_are_sorted() {
        let mut lut = GradientLut::new();
        lut.add_color(1.0, Rgba8::new_opaque(0, 0, 255));
        lut.add_color(0.0, Rgba8::new_opaque(255, 0, 0));
        lut.build_lut();
        assert_eq!(lut.get(0).r, 255);
        assert_eq!(lut.get(255).b, 255);
    }

    #[test]
    fn test_fill_outside_stops() {
        let mut lut = GradientLut::new();
        lut.add_color(0.25, Rgba8::new_opaque(10, 10, 10));
        lut.add_color(0.75, Rgba8::new_opaque(200, 200, 200));
        lut.build_lut();
        assert_eq!(lut.get(0), Rgba8::new_opaque(10, 10, 10));
        assert_eq!(lut.get(255), Rgba8::new_opaque(200, 200, 200));
    }

    #[test]
    fn test_three_stops() {
        let mut lut = GradientLut::new();
        lut.add_color(0.0, Rgba8::new_opaque(0, 0, 0));
        lut.add_color(0.5, Rgba8::new_opaque(255, 255, 255));
        lut.add_color(1.0, Rgba8::new_opaque(0, 0, 0));
        lut.build_lut();
        assert!(lut.color_at(0.5).r > 250);
        assert_eq!(lut.color_at(1.0).r, 0);
        assert_eq!(lut.color_at(7.0).r, 0);
    }

    #[test]
    fn test_alpha_interpolates() {
        let lut = GradientLut::two_colors(Rgba8::new(255, 255, 255, 255), Rgba8::new(255, 255, 255, 0));
        assert_eq!(lut.get(255).a, 0);
        assert!(lut.get(100).a > lut.get(200).a);
    }

    #[test]
    fn test_single_stop_is_solid() {
        let mut lut = GradientLut::new();
        lut.add_color(0.3, Rgba8::new_opaque(1, 2, 3));
        lut.build_lut();
        assert_eq!(lut.get(0), lut.get(255));
    }
}
