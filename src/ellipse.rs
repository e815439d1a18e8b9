//! Ellipse vertex generator.
//!
//! Generates a closed polygon approximating an ellipse. Used for the
//! abstract field's circles and the landscape's sun.

use crate::basics::{
    uround, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CLOSE, PI,
};

/// Closed polygonal approximation of an ellipse.
///
/// With `num_steps == 0` the step count is derived from the radii so that
/// the chord error stays below about an eighth of a pixel.
#[derive(Debug, Clone)]
pub struct Ellipse {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    num: u32,
    step: u32,
    cw: bool,
}

impl Ellipse {
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, num_steps: u32, cw: bool) -> Self {
        let mut e = Self {
            x,
            y,
            rx,
            ry,
            num: num_steps,
            step: 0,
            cw,
        };
        if e.num == 0 {
            e.calc_num_steps();
        }
        e
    }

    /// A circle with an automatic step count.
    pub fn circle(x: f64, y: f64, r: f64) -> Self {
        Self::new(x, y, r, r, 0, false)
    }

    pub fn num_steps(&self) -> u32 {
        self.num
    }

    fn calc_num_steps(&mut self) {
        let ra = (self.rx.abs() + self.ry.abs()) / 2.0;
        let da = (ra / (ra + 0.125)).acos() * 2.0;
        self.num = if da > 0.0 { uround(2.0 * PI / da).max(8) } else { 8 };
    }
}

impl VertexSource for Ellipse {
    fn rewind(&mut self, _path_id: u32) {
        self.step = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step == self.num {
            self.step += 1;
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
        }
        if self.step > self.num {
            return PATH_CMD_STOP;
        }
        let mut angle = self.step as f64 / self.num as f64 * 2.0 * PI;
        if self.cw {
            angle = 2.0 * PI - angle;
        }
        *x = self.x + angle.cos() * self.rx;
        *y = self.y + angle.sin() * self.ry;
        self.step += 1;
        if self.step == 1 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::is_close;

    fn collect(e: &mut Ellipse) -> Vec<(f64, f64, u32)> {
        let mut out = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);
        e.rewind(0);
        loop {
            let cmd = e.vertex(&mut x, &mut y);
            if cmd == PATH_CMD_STOP {
                break;
            }
            out.push((x, y, cmd));
        }
        out
    }

    #[test]
    fn test_explicit_steps() {
        let mut e = Ellipse::new(0.0, 0.0, 10.0, 10.0, 16, false);
        let v = collect(&mut e);
        assert_eq!(v.len(), 17);
        assert_eq!(v[0].2, PATH_CMD_MOVE_TO);
        assert!(is_close(v[16].2));
    }

    #[test]
    fn test_vertices_on_radius() {
        let mut e = Ellipse::circle(50.0, 40.0, 20.0);
        for (x, y, cmd) in collect(&mut e) {
            if cmd == PATH_CMD_MOVE_TO || cmd == PATH_CMD_LINE_TO {
                let r = ((x - 50.0).powi(2) + (y - 40.0).powi(2)).sqrt();
                assert!((r - 20.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_auto_steps_grow_with_radius() {
        let small = Ellipse::circle(0.0, 0.0, 2.0);
        let large = Ellipse::circle(0.0, 0.0, 200.0);
        assert!(small.num_steps() >= 8);
        assert!(large.num_steps() > small.num_steps());
    }

    #[test]
    fn test_zero_radius_still_terminates() {
        let mut e = Ellipse::circle(5.0, 5.0, 0.0);
        let v = collect(&mut e);
        assert_eq!(v.len() as u32, e.num_steps() + 1);
    }
}
