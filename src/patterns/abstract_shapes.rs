//! Abstract field: randomly placed translucent circles and squares.

use rand::Rng;

use crate::basics::PointD;
use crate::comp_op::CompOp;
use crate::ellipse::Ellipse;
use crate::params::ArtParams;
use crate::path_storage::PathStorage;
use crate::surface::{DrawingSurface, Paint, StrokeStyle};

use super::{hsl, Pattern};

pub const FILL_OPACITY: f64 = 0.5;
pub const OUTLINE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
}

/// A shape centred on `center`; `size` is the circle's diameter or the
/// square's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub center: PointD,
    pub size: f64,
    pub hue: f64,
}

impl Shape {
    fn outline(&self) -> PathStorage {
        let mut path = PathStorage::new();
        let (c, half) = (self.center, self.size / 2.0);
        match self.kind {
            ShapeKind::Circle => path.concat_path(&mut Ellipse::circle(c.x, c.y, half)),
            ShapeKind::Square => path.add_rect(c.x - half, c.y - half, c.x + half, c.y + half),
        }
        path
    }
}

#[derive(Debug, Clone)]
pub struct AbstractField {
    pub max_size: f64,
    pub shapes: Vec<Shape>,
    params: ArtParams,
}

/// Upper bound (exclusive) of a shape's size.
pub fn max_shape_size(width: f64, height: f64, symmetry: u32) -> f64 {
    width.min(height) * 0.2 * (symmetry as f64 / 6.0)
}

pub fn build<R: Rng>(width: f64, height: f64, params: &ArtParams, rng: &mut R) -> AbstractField {
    let count = params.complexity as usize * 5;
    let max_size = max_shape_size(width, height, params.symmetry);
    let shapes = (0..count)
        .map(|i| {
            let kind = if rng.gen_bool(0.5) {
                ShapeKind::Circle
            } else {
                ShapeKind::Square
            };
            let center = PointD::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height);
            Shape {
                kind,
                center,
                size: rng.gen::<f64>() * max_size,
                hue: i as f64 / count as f64 * 360.0,
            }
        })
        .collect();
    AbstractField {
        max_size,
        shapes,
        params: *params,
    }
}

impl Pattern for AbstractField {
    fn primitive_count(&self) -> usize {
        self.shapes.len()
    }

    fn paint(&self, surface: &mut DrawingSurface) {
        for shape in &self.shapes {
            let mut path = shape.outline();
            let fill = hsl(&self.params, shape.hue, 50.0).with_opacity(FILL_OPACITY);
            surface.fill_path(&mut path, &Paint::Solid(fill), CompOp::SrcOver);
            let outline = StrokeStyle::new(OUTLINE_WIDTH, hsl(&self.params, shape.hue + 180.0, 50.0));
            surface.stroke_path(&mut path, &outline);
        }
    }
}
