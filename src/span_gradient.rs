//! Gradient span generator.
//!
//! Maps each pixel centre of a span to a gradient position with a
//! `GradientShape`, then looks the color up in a `ColorFunction`.

use crate::color::Rgba8;
use crate::gradient_lut::{ColorFunction, GradientLut};
use crate::renderer_scanline::SpanGenerator;

// ============================================================================
// GradientShape
// ============================================================================

/// Geometry of a gradient in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientShape {
    /// Position 0 at `(x1, y1)`, 1 at `(x2, y2)`, constant across the
    /// perpendicular direction.
    Linear { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Concentric circles around `(cx, cy)`: position 0 at radius `r0`,
    /// 1 at radius `r1`.
    Radial { cx: f64, cy: f64, r0: f64, r1: f64 },
}

impl GradientShape {
    /// Gradient position of `(x, y)`, clamped to [0, 1].
    pub fn position(&self, x: f64, y: f64) -> f64 {
        let t = match *self {
            GradientShape::Linear { x1, y1, x2, y2 } => {
                let (dx, dy) = (x2 - x1, y2 - y1);
                let len2 = dx * dx + dy * dy;
                if len2 <= f64::EPSILON {
                    0.0
                } else {
                    ((x - x1) * dx + (y - y1) * dy) / len2
                }
            }
            GradientShape::Radial { cx, cy, r0, r1 } => {
                let d = (x - cx).hypot(y - cy);
                let span = r1 - r0;
                if span.abs() <= f64::EPSILON {
                    if d <= r0 {
                        0.0
                    } else {
                        1.0
                    }
                } else {
                    (d - r0) / span
                }
            }
        };
        t.clamp(0.0, 1.0)
    }
}

// ============================================================================
// SpanGradient
// ============================================================================

pub struct SpanGradient<F: ColorFunction = GradientLut> {
    shape: GradientShape,
    colors: F,
}

impl<F: ColorFunction> SpanGradient<F> {
    pub fn new(shape: GradientShape, colors: F) -> Self {
        Self { shape, colors }
    }

    pub fn shape(&self) -> &GradientShape {
        &self.shape
    }

    /// Color of the pixel whose top-left corner is `(x, y)`.
    pub fn color_at_pixel(&self, x: i32, y: i32) -> Rgba8 {
        let t = self.shape.position(x as f64 + 0.5, y as f64 + 0.5);
        self.colors.color_at(t)
    }
}

impl<F: ColorFunction> SpanGenerator for SpanGradient<F> {
    fn generate(&mut self, span: &mut [Rgba8], x: i32, y: i32) {
        for (i, c) in span.iter_mut().enumerate() {
            *c = self.color_at_pixel(x + i as i32, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_to_white() -> GradientLut {
        GradientLut::two_colors(Rgba8::new_opaque(0, 0, 0), Rgba8::new_opaque(255, 255, 255))
    }

    #[test]
    fn test_linear_vertical_position() {
        let g = GradientShape::Linear {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 100.0,
        };
        assert_eq!(g.position(50.0, 0.0), 0.0);
        assert!((g.position(7.0, 25.0) - 0.25).abs() < 1e-12);
        assert_eq!(g.position(0.0, 150.0), 1.0);
        assert_eq!(g.position(0.0, -10.0), 0.0);
    }

    #[test]
    fn test_linear_degenerate() {
        let g = GradientShape::Linear {
            x1: 5.0,
            y1: 5.0,
            x2: 5.0,
            y2: 5.0,
        };
        assert_eq!(g.position(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_radial_position() {
        let g = GradientShape::Radial {
            cx: 10.0,
            cy: 10.0,
            r0: 0.0,
            r1: 20.0,
        };
        assert_eq!(g.position(10.0, 10.0), 0.0);
        assert!((g.position(20.0, 10.0) - 0.5).abs() < 1e-12);
        assert_eq!(g.position(100.0, 10.0), 1.0);
    }

    #[test]
    fn test_radial_inner_radius() {
        let g = GradientShape::Radial {
            cx: 0.0,
            cy: 0.0,
            r0: 10.0,
            r1: 30.0,
        };
        assert_eq!(g.position(5.0, 0.0), 0.0);
        assert!((g.position(20.0, 0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_generate_horizontal_ramp() {
        let mut sg = SpanGradient::new(
            GradientShape::Linear {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 0.0,
            },
            black_to_white(),
        );
        let mut span = [Rgba8::default(); 10];
        sg.generate(&mut span, 0, 3);
        assert!(span.windows(2).all(|w| w[0].r <= w[1].r));
        assert!(span[0].r < 20);
        assert!(span[9].r > 235);
    }
}
