//! Stroke math: the closed contours that make up a stroked segment.
//!
//! A stroked polyline is rendered as the union of per-segment pieces rather
//! than one offset outline. With a round cap every segment becomes a capsule
//! (a rectangle with a half disc on each end); with a butt cap it is a bare
//! rectangle and every interior joint gets a full disc. Adjacent pieces
//! overlap at the joints, which yields round joins once the rasterizer
//! merges them under the non-zero rule.
//!
//! Every contour produced here winds the same way (angles decrease along
//! arcs), so overlapping pieces never cancel.

use crate::basics::{PointD, PI};

/// Points closer than this are treated as coincident.
pub const VERTEX_DIST_EPSILON: f64 = 1e-9;

/// Line cap style for open path endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Stroke geometry calculator.
///
/// Holds the half width and the arc approximation step and emits contours
/// as point lists.
#[derive(Debug, Clone)]
pub struct MathStroke {
    half_width: f64,
    line_cap: LineCap,
    approx_scale: f64,
}

impl MathStroke {
    pub fn new() -> Self {
        Self {
            half_width: 0.5,
            line_cap: LineCap::Butt,
            approx_scale: 1.0,
        }
    }

    /// Full stroke width. Negative values are treated as zero.
    pub fn set_width(&mut self, w: f64) {
        self.half_width = w.max(0.0) * 0.5;
    }

    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.line_cap = lc;
    }

    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.approx_scale = s;
    }

    pub fn approximation_scale(&self) -> f64 {
        self.approx_scale
    }

    /// Angle step for arcs: the chord deviates from the true circle by at
    /// most an eighth of a pixel (scaled by the approximation scale).
    pub fn arc_step(&self) -> f64 {
        let r = self.half_width * self.approx_scale;
        if r <= 0.0 {
            return PI / 2.0;
        }
        let da = (r / (r + 0.125)).acos() * 2.0;
        da.clamp(1e-3, PI / 4.0)
    }

    /// Append arc points around `c` from angle `a1` down to `a2` (`a2 < a1`),
    /// both ends included.
    fn arc(&self, out: &mut Vec<PointD>, c: PointD, a1: f64, a2: f64) {
        let r = self.half_width;
        let n = ((a1 - a2) / self.arc_step()).ceil().max(2.0) as usize;
        // An even count puts a vertex exactly on the arc's midpoint.
        let n = n + n % 2;
        let step = (a1 - a2) / n as f64;
        for i in 0..=n {
            let a = a1 - step * i as f64;
            out.push(PointD::new(c.x + a.cos() * r, c.y + a.sin() * r));
        }
    }

    /// Contour of the segment `p0 → p1`, without caps for `Butt` and with
    /// half discs for `Round`. Returns `false` (and appends nothing) for a
    /// zero-length segment or a zero width.
    pub fn calc_segment(&self, out: &mut Vec<PointD>, p0: PointD, p1: PointD) -> bool {
        let len = p0.distance(&p1);
        if len <= VERTEX_DIST_EPSILON || self.half_width <= 0.0 {
            return false;
        }
        let w = self.half_width;
        let (dx, dy) = ((p1.x - p0.x) / len, (p1.y - p0.y) / len);
        // Normal pointing to the side whose angle is `dir + π/2`.
        let (nx, ny) = (-dy * w, dx * w);

        match self.line_cap {
            LineCap::Butt => {
                out.push(PointD::new(p0.x + nx, p0.y + ny));
                out.push(PointD::new(p1.x + nx, p1.y + ny));
                out.push(PointD::new(p1.x - nx, p1.y - ny));
                out.push(PointD::new(p0.x - nx, p0.y - ny));
            }
            LineCap::Round => {
                let dir = dy.atan2(dx);
                self.arc(out, p1, dir + PI / 2.0, dir - PI / 2.0);
                self.arc(out, p0, dir - PI / 2.0, dir - PI * 1.5);
            }
        }
        true
    }

    /// Full disc of the stroke's half width centred on `c`, wound like the
    /// segment contours.
    pub fn calc_disc(&self, out: &mut Vec<PointD>, c: PointD) -> bool {
        if self.half_width <= 0.0 {
            return false;
        }
        self.arc(out, c, PI * 2.0, 0.0);
        // The last point repeats the first.
        out.pop();
        true
    }
}

impl Default for MathStroke {
    fn default() -> Self {
        Self::new()
    }
}

/// Signed shoelace area of a closed contour.
pub fn signed_area(points: &[PointD]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}
