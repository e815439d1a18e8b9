//! Triangle tessellation.
//!
//! The surface is cut into rows of `tile_size` height. Each row holds `cols`
//! up-pointing triangles alternating with `cols` down-pointing ones. The
//! lattice starts half a base left of the surface and its horizontal pitch
//! is stretched to `width / (cols - 1/2)`, so every row spans exactly
//! `[0, width]` with no notches at either edge.

use crate::basics::PointD;
use crate::comp_op::CompOp;
use crate::params::ArtParams;
use crate::path_storage::PathStorage;
use crate::surface::{DrawingSurface, Paint};

use super::{hsl, Pattern};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [PointD; 3],
    pub hue: f64,
}

#[derive(Debug, Clone)]
pub struct Tessellation {
    pub tile_size: f64,
    /// Base width of every triangle.
    pub pitch: f64,
    pub cols: u32,
    pub rows: u32,
    pub triangles: Vec<Triangle>,
    params: ArtParams,
}

/// Number of tiles needed to cover `extent` pixels.
fn tiles(extent: f64, tile_size: f64) -> u32 {
    let n = (extent / tile_size).ceil();
    if n.is_finite() && n > 0.0 {
        n as u32
    } else {
        0
    }
}

pub fn build(width: f64, height: f64, params: &ArtParams) -> Tessellation {
    let tile_size = width.min(height) / params.complexity as f64;
    let cols = tiles(width, tile_size);
    let rows = tiles(height, tile_size);
    let t = tile_size;
    let p = if cols > 0 {
        width / (cols as f64 - 0.5)
    } else {
        t
    };

    let mut triangles = Vec::with_capacity(2 * (cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            // Apex of the up triangle; its base is centred below it.
            let xa = col as f64 * p;
            let y0 = row as f64 * t;
            let hue = (col + row) as f64 / (cols + rows) as f64 * 360.0;
            triangles.push(Triangle {
                points: [
                    PointD::new(xa - p / 2.0, y0 + t),
                    PointD::new(xa + p / 2.0, y0 + t),
                    PointD::new(xa, y0),
                ],
                hue,
            });
            triangles.push(Triangle {
                points: [
                    PointD::new(xa, y0),
                    PointD::new(xa + p, y0),
                    PointD::new(xa + p / 2.0, y0 + t),
                ],
                hue: hue + 180.0,
            });
        }
    }

    Tessellation {
        tile_size,
        pitch: p,
        cols,
        rows,
        triangles,
        params: *params,
    }
}

impl Pattern for Tessellation {
    fn primitive_count(&self) -> usize {
        self.triangles.len()
    }

    fn paint(&self, surface: &mut DrawingSurface) {
        let mut path = PathStorage::new();
        for tri in &self.triangles {
            path.remove_all();
            let [a, b, c] = tri.points;
            path.add_polygon(&[(a.x, a.y), (b.x, b.y), (c.x, c.y)]);
            let paint = Paint::Solid(hsl(&self.params, tri.hue, 50.0));
            surface.fill_path(&mut path, &paint, CompOp::SrcOver);
        }
    }
}
