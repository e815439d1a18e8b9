//! Mandala: quadratic-curve petals radiating from the centre.

use crate::basics::{PointD, PI};
use crate::params::ArtParams;
use crate::path_storage::PathStorage;
use crate::surface::{DrawingSurface, StrokeStyle};

use super::{hsl, Pattern};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Petal {
    pub control: PointD,
    pub end: PointD,
    pub hue: f64,
}

#[derive(Debug, Clone)]
pub struct Mandala {
    pub center: PointD,
    pub radius: f64,
    pub control_radius: f64,
    pub line_width: f64,
    pub petals: Vec<Petal>,
    params: ArtParams,
}

pub fn build(width: f64, height: f64, params: &ArtParams) -> Mandala {
    let center = PointD::new(width / 2.0, height / 2.0);
    let radius = width.min(height) * 0.4;
    let control_radius = radius * (0.5 + params.complexity as f64 / 20.0);
    let count = params.symmetry * 2;
    let step = 2.0 * PI / count as f64;

    let on_circle = |r: f64, a: f64| PointD::new(center.x + a.cos() * r, center.y + a.sin() * r);
    let petals = (0..count)
        .map(|i| {
            let angle = i as f64 * step;
            Petal {
                control: on_circle(control_radius, angle + step / 2.0),
                end: on_circle(radius, angle),
                hue: i as f64 / count as f64 * 360.0,
            }
        })
        .collect();

    Mandala {
        center,
        radius,
        control_radius,
        line_width: (params.complexity as f64 * radius / 400.0).max(1.0),
        petals,
        params: *params,
    }
}

impl Pattern for Mandala {
    fn primitive_count(&self) -> usize {
        self.petals.len()
    }

    fn paint(&self, surface: &mut DrawingSurface) {
        let mut path = PathStorage::new();
        for petal in &self.petals {
            path.remove_all();
            path.move_to(self.center.x, self.center.y);
            path.curve3(petal.control.x, petal.control.y, petal.end.x, petal.end.y);
            let style = StrokeStyle::new(self.line_width, hsl(&self.params, petal.hue, 50.0));
            surface.stroke_path(&mut path, &style);
        }
    }
}
