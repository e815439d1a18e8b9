//! Spirograph: a hypotrochoid traced as one open polyline.

use crate::basics::{PointD, PI};
use crate::color::Rgba8;
use crate::params::ArtParams;
use crate::path_storage::PathStorage;
use crate::surface::{DrawingSurface, StrokeStyle};

use super::Pattern;

/// Parameter increment between samples, in radians.
pub const SAMPLE_STEP: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct Spirograph {
    pub center: PointD,
    pub radius: f64,
    pub inner_radius: f64,
    pub offset: f64,
    pub rotations: f64,
    pub points: Vec<PointD>,
    params: ArtParams,
}

impl Spirograph {
    /// Point of the curve at parameter `t`.
    pub fn point_at(&self, t: f64) -> PointD {
        hypotrochoid(self.center, self.radius, self.inner_radius, self.offset, t)
    }
}

fn hypotrochoid(c: PointD, big_r: f64, r: f64, d: f64, t: f64) -> PointD {
    let k = (big_r - r) / r;
    PointD::new(
        c.x + (big_r - r) * t.cos() + d * (k * t).cos(),
        c.y + (big_r - r) * t.sin() - d * (k * t).sin(),
    )
}

pub fn build(width: f64, height: f64, params: &ArtParams) -> Spirograph {
    let center = PointD::new(width / 2.0, height / 2.0);
    let radius = width.min(height) * 0.4;
    let inner_radius = radius * (params.complexity as f64 / 10.0);
    let offset = radius * (params.symmetry as f64 / 12.0);
    let rotations = 100.0 * (params.density as f64 / 50.0);

    let t_max = 2.0 * PI * rotations;
    let samples = (t_max / SAMPLE_STEP).floor() as usize;
    let points = (0..=samples)
        .map(|i| hypotrochoid(center, radius, inner_radius, offset, i as f64 * SAMPLE_STEP))
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();

    Spirograph {
        center,
        radius,
        inner_radius,
        offset,
        rotations,
        points,
        params: *params,
    }
}

impl Pattern for Spirograph {
    fn primitive_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    fn paint(&self, surface: &mut DrawingSurface) {
        let pts: Vec<(f64, f64)> = self.points.iter().map(|p| (p.x, p.y)).collect();
        let mut path = PathStorage::new();
        path.add_polyline(&pts);
        let hue = self.params.colorfulness as f64 * 3.6;
        let style = StrokeStyle::new(1.0, Rgba8::from_hsl(hue, 100.0, 50.0));
        surface.stroke_path(&mut path, &style);
    }
}
