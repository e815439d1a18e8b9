//! Quadratic Bezier flattening.
//!
//! Mandala petals are quadratic curves. `Curve3Inc` walks a curve with
//! forward differences, emitting a fixed number of line segments chosen from
//! the control polygon's length.

use crate::basics::{uround, VertexSource, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP};

/// Fewest segments a curve is split into, however short it is.
const MIN_STEPS: u32 = 4;

/// Incremental (forward-difference) quadratic Bezier flattener.
#[derive(Debug, Clone)]
pub struct Curve3Inc {
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    scale: f64,
    num_steps: u32,
    // Walk state, reset by `rewind`.
    step: i64,
    fx: f64,
    fy: f64,
    dfx: f64,
    dfy: f64,
}

impl Curve3Inc {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Self {
        let mut c = Self {
            p1: (x1, y1),
            p2: (x2, y2),
            p3: (x3, y3),
            scale: 1.0,
            num_steps: 0,
            step: -1,
            fx: 0.0,
            fy: 0.0,
            dfx: 0.0,
            dfy: 0.0,
        };
        c.calc_num_steps();
        c
    }

    /// Higher scale means more segments (use when rendering magnified).
    pub fn set_approximation_scale(&mut self, s: f64) {
        self.scale = s;
        self.calc_num_steps();
    }

    pub fn num_steps(&self) -> u32 {
        self.num_steps
    }

    fn calc_num_steps(&mut self) {
        let (x1, y1) = self.p1;
        let (x2, y2) = self.p2;
        let (x3, y3) = self.p3;
        let len = (x2 - x1).hypot(y2 - y1) + (x3 - x2).hypot(y3 - y2);
        self.num_steps = uround(len * 0.25 * self.scale).max(MIN_STEPS);
    }

    /// The curve's vertices as `(x, y)` pairs, start and end included.
    pub fn points(&mut self) -> Vec<(f64, f64)> {
        let mut out = Vec::with_capacity(self.num_steps as usize + 1);
        let (mut x, mut y) = (0.0, 0.0);
        self.rewind(0);
        loop {
            let cmd = self.vertex(&mut x, &mut y);
            if cmd == PATH_CMD_STOP {
                break;
            }
            out.push((x, y));
        }
        out
    }
}

impl VertexSource for Curve3Inc {
    fn rewind(&mut self, _path_id: u32) {
        let (x1, y1) = self.p1;
        let (x2, y2) = self.p2;
        let (x3, y3) = self.p3;

        let step = 1.0 / self.num_steps as f64;
        let step2 = step * step;
        let tmpx = (x1 - x2 * 2.0 + x3) * step2;
        let tmpy = (y1 - y2 * 2.0 + y3) * step2;

        self.fx = x1;
        self.fy = y1;
        self.dfx = tmpx + (x2 - x1) * (2.0 * step);
        self.dfy = tmpy + (y2 - y1) * (2.0 * step);
        self.step = self.num_steps as i64;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step < 0 {
            return PATH_CMD_STOP;
        }
        if self.step == self.num_steps as i64 {
            *x = self.p1.0;
            *y = self.p1.1;
            self.step -= 1;
            return PATH_CMD_MOVE_TO;
        }
        if self.step == 0 {
            // Land exactly on the end point instead of the accumulated one.
            *x = self.p3.0;
            *y = self.p3.1;
            self.step -= 1;
            return PATH_CMD_LINE_TO;
        }

        let (x1, y1) = self.p1;
        let (x2, y2) = self.p2;
        let (x3, y3) = self.p3;
        let step2 = 1.0 / (self.num_steps as f64 * self.num_steps as f64);

        self.fx += self.dfx;
        self.fy += self.dfy;
        self.dfx += (x1 - x2 * 2.0 + x3) * step2 * 2.0;
        self.dfy += (y1 - y2 * 2.0 + y3) * step2 * 2.0;
        *x = self.fx;
        *y = self.fy;
        self.step -= 1;
        PATH_CMD_LINE_TO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(t: f64, p1: (f64, f64), p2: (f64, f64), p3: (f64, f64)) -> (f64, f64) {
        let u = 1.0 - t;
        (
            u * u * p1.0 + 2.0 * u * t * p2.0 + t * t * p3.0,
            u * u * p1.1 + 2.0 * u * t * p2.1 + t * t * p3.1,
        )
    }

    #[test]
    fn test_endpoints_exact() {
        let mut c = Curve3Inc::new(0.0, 0.0, 50.0, 100.0, 100.0, 0.0);
        let pts = c.points();
        assert_eq!(pts.first(), Some(&(0.0, 0.0)));
        assert_eq!(pts.last(), Some(&(100.0, 0.0)));
        assert_eq!(pts.len(), c.num_steps() as usize + 1);
    }

    #[test]
    fn test_points_lie_on_curve() {
        let p1 = (10.0, 10.0);
        let p2 = (60.0, 120.0);
        let p3 = (200.0, 30.0);
        let mut c = Curve3Inc::new(p1.0, p1.1, p2.0, p2.1, p3.0, p3.1);
        let n = c.num_steps() as f64;
        for (i, (x, y)) in c.points().into_iter().enumerate() {
            let (ex, ey) = eval(i as f64 / n, p1, p2, p3);
            assert!((x - ex).abs() < 1e-6, "x at {}: {} vs {}", i, x, ex);
            assert!((y - ey).abs() < 1e-6, "y at {}: {} vs {}", i, y, ey);
        }
    }

    #[test]
    fn test_min_steps_for_tiny_curve() {
        let c = Curve3Inc::new(0.0, 0.0, 0.1, 0.1, 0.2, 0.0);
        assert_eq!(c.num_steps(), MIN_STEPS);
    }

    #[test]
    fn test_rewind_replays() {
        let mut c = Curve3Inc::new(0.0, 0.0, 40.0, 40.0, 80.0, 0.0);
        let a = c.points();
        let b = c.points();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scale_adds_steps() {
        let mut c = Curve3Inc::new(0.0, 0.0, 100.0, 100.0, 200.0, 0.0);
        let base = c.num_steps();
        c.set_approximation_scale(4.0);
        assert!(c.num_steps() > base);
    }
}
