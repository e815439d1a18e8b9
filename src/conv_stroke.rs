//! Stroke converter for vertex sources.
//!
//! Wraps a center-line vertex source and yields the closed contours of its
//! stroked outline. Each sub-path of the source is split into segments and
//! handed to `MathStroke`; closed sub-paths also stroke their closing edge.

use crate::basics::{
    is_close, is_move_to, is_stop, is_vertex, PointD, VertexSource, PATH_CMD_STOP,
};
use crate::math_stroke::{LineCap, MathStroke, VERTEX_DIST_EPSILON};
use crate::path_storage::PathStorage;

/// A center-line sub-path with consecutive duplicate points removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<PointD>,
    pub closed: bool,
}

impl Polyline {
    fn push(&mut self, p: PointD) {
        match self.points.last() {
            Some(last) if last.distance(&p) <= VERTEX_DIST_EPSILON => {}
            _ => self.points.push(p),
        }
    }
}

/// Split a vertex source into its sub-paths.
pub fn collect_polylines(vs: &mut dyn VertexSource, path_id: u32) -> Vec<Polyline> {
    let mut out: Vec<Polyline> = Vec::new();
    let mut cur = Polyline::default();
    let (mut x, mut y) = (0.0, 0.0);
    vs.rewind(path_id);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if is_move_to(cmd) {
            if !cur.points.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            cur.push(PointD::new(x, y));
        } else if is_vertex(cmd) {
            cur.push(PointD::new(x, y));
        } else if is_close(cmd) {
            cur.closed = true;
            out.push(std::mem::take(&mut cur));
        }
    }
    if !cur.points.is_empty() {
        out.push(cur);
    }
    for pl in out.iter_mut() {
        if pl.closed && pl.points.len() > 2 {
            let first = pl.points[0];
            if pl.points.last().map_or(false, |l| l.distance(&first) <= VERTEX_DIST_EPSILON) {
                pl.points.pop();
            }
        }
    }
    out
}

// ============================================================================
// ConvStroke
// ============================================================================

/// Stroke converter: generates a stroked outline from a center-line path.
pub struct ConvStroke<VS: VertexSource> {
    source: VS,
    math: MathStroke,
    outline: PathStorage,
}

impl<VS: VertexSource> ConvStroke<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            source,
            math: MathStroke::new(),
            outline: PathStorage::new(),
        }
    }

    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.math.set_line_cap(lc);
    }
    pub fn line_cap(&self) -> LineCap {
        self.math.line_cap()
    }

    pub fn set_width(&mut self, w: f64) {
        self.math.set_width(w);
    }
    pub fn width(&self) -> f64 {
        self.math.width()
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.math.set_approximation_scale(s);
    }
    pub fn approximation_scale(&self) -> f64 {
        self.math.approximation_scale()
    }

    fn build(&mut self, path_id: u32) {
        self.outline.remove_all();
        let mut contour = Vec::new();
        for pl in collect_polylines(&mut self.source, path_id) {
            let pts = &pl.points;
            let mut segments: Vec<(PointD, PointD)> =
                pts.windows(2).map(|w| (w[0], w[1])).collect();
            if pl.closed && pts.len() > 2 {
                segments.push((pts[pts.len() - 1], pts[0]));
            }
            for (p0, p1) in segments {
                contour.clear();
                if self.math.calc_segment(&mut contour, p0, p1) {
                    self.outline.add_polygon(&as_pairs(&contour));
                }
            }
            if self.math.line_cap() == LineCap::Butt {
                // Round joins between butt-capped segments.
                let joints = if pl.closed && pts.len() > 2 {
                    &pts[..]
                } else if pts.len() > 2 {
                    &pts[1..pts.len() - 1]
                } else {
                    &pts[..0]
                };
                for &j in joints {
                    contour.clear();
                    if self.math.calc_disc(&mut contour, j) {
                        self.outline.add_polygon(&as_pairs(&contour));
                    }
                }
            }
        }
    }
}

fn as_pairs(points: &[PointD]) -> Vec<(f64, f64)> {
    points.iter().map(|p| (p.x, p.y)).collect()
}

impl<VS: VertexSource> VertexSource for ConvStroke<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.build(path_id);
        self.outline.rewind(0);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.outline.is_empty() {
            return PATH_CMD_STOP;
        }
        self.outline.vertex(x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PATH_CMD_MOVE_TO;

    fn collect_vertices<VS: VertexSource>(vs: &mut VS) -> Vec<(f64, f64, u32)> {
        let mut result = Vec::new();
        vs.rewind(0);
        loop {
            let (mut x, mut y) = (0.0, 0.0);
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            result.push((x, y, cmd));
        }
        result
    }

    fn contours<VS: VertexSource>(vs: &mut VS) -> usize {
        collect_vertices(vs)
            .iter()
            .filter(|v| v.2 == PATH_CMD_MOVE_TO)
            .count()
    }

    #[test]
    fn test_collect_polylines() {
        let mut path = PathStorage::new();
        path.add_polyline(&[(0.0, 0.0), (0.0, 0.0), (5.0, 0.0)]);
        path.add_polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]);
        let pls = collect_polylines(&mut path, 0);
        assert_eq!(pls.len(), 2);
        assert_eq!(pls[0].points.len(), 2);
        assert!(!pls[0].closed);
        assert_eq!(pls[1].points.len(), 3);
        assert!(pls[1].closed);
    }

    #[test]
    fn test_stroke_horizontal_line() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(100.0, 0.0);

        let mut stroke = ConvStroke::new(path);
        stroke.set_width(10.0);
        let verts = collect_vertices(&mut stroke);
        assert_eq!(verts.len(), 5);
        assert_eq!(verts[0].2, PATH_CMD_MOVE_TO);
    }

    #[test]
    fn test_butt_polyline_gets_joint_discs() {
        let mut path = PathStorage::new();
        path.add_polyline(&[(10.0, 10.0), (90.0, 10.0), (50.0, 80.0)]);
        let mut stroke = ConvStroke::new(path);
        stroke.set_width(4.0);
        // Two segments plus one interior joint.
        assert_eq!(contours(&mut stroke), 3);
    }

    #[test]
    fn test_closed_polygon_strokes_closing_edge() {
        let mut path = PathStorage::new();
        path.add_rect(0.0, 0.0, 10.0, 10.0);
        let mut stroke = ConvStroke::new(path);
        stroke.set_width(2.0);
        // Four edges and four corner discs.
        assert_eq!(contours(&mut stroke), 8);
    }

    #[test]
    fn test_round_cap_one_contour_per_segment() {
        let mut path = PathStorage::new();
        path.add_polyline(&[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)]);
        let mut stroke = ConvStroke::new(path);
        stroke.set_width(20.0);
        stroke.set_line_cap(LineCap::Round);
        assert_eq!(contours(&mut stroke), 2);
        assert!(collect_vertices(&mut stroke).len() > 10);
    }

    #[test]
    fn test_stroke_y_extent() {
        let mut path = PathStorage::new();
        path.move_to(10.0, 50.0);
        path.line_to(90.0, 50.0);

        let mut stroke = ConvStroke::new(path);
        stroke.set_width(20.0);

        let verts = collect_vertices(&mut stroke);
        let ys = verts.iter().filter(|v| is_vertex(v.2)).map(|v| v.1);
        let max_y = ys.clone().fold(f64::MIN, f64::max);
        let min_y = ys.fold(f64::MAX, f64::min);
        assert!((max_y - 60.0).abs() < 1e-9);
        assert!((min_y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_and_empty_paths() {
        let mut path = PathStorage::new();
        path.move_to(5.0, 5.0);
        path.line_to(5.0, 5.0);
        let mut stroke = ConvStroke::new(path);
        stroke.set_width(8.0);
        stroke.set_line_cap(LineCap::Round);
        assert!(collect_vertices(&mut stroke).is_empty());

        let mut empty = ConvStroke::new(PathStorage::new());
        assert!(collect_vertices(&mut empty).is_empty());
    }

    #[test]
    fn test_rewind_replay() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(100.0, 0.0);
        let mut stroke = ConvStroke::new(&mut path);
        stroke.set_width(4.0);
        let v1 = collect_vertices(&mut stroke);
        let v2 = collect_vertices(&mut stroke);
        assert_eq!(v1, v2);
    }
}
