//! Path storage: the vertex container every drawing call builds.
//!
//! Stores an ordered sequence of vertices with path commands. Sub-paths
//! start with `move_to`; closed polygons end with an `END_POLY | CLOSE`
//! marker. Quadratic curves are flattened into line segments on insertion.

use crate::basics::{
    is_end_poly, is_move_to, is_vertex, VertexD, VertexSource, PATH_CMD_END_POLY,
    PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};
use crate::curves::Curve3Inc;

#[derive(Debug, Clone, Default)]
pub struct PathStorage {
    vertices: Vec<VertexD>,
    iterator: usize,
}

impl PathStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all vertices, keeping the allocation.
    pub fn remove_all(&mut self) {
        self.vertices.clear();
        self.iterator = 0;
    }

    // ---------------------------------------------------------------
    // Path construction
    // ---------------------------------------------------------------

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push(VertexD::new(x, y, PATH_CMD_MOVE_TO));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertices.push(VertexD::new(x, y, PATH_CMD_LINE_TO));
    }

    /// Quadratic Bezier from the current point through control `(cx, cy)`
    /// to `(x, y)`. Without a current point this degrades to a `move_to`
    /// of the control point followed by the curve, matching canvas behavior.
    pub fn curve3(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let current = self.current_point();
        let (x0, y0) = match current {
            Some(p) => p,
            None => {
                self.move_to(cx, cy);
                (cx, cy)
            }
        };
        let mut curve = Curve3Inc::new(x0, y0, cx, cy, x, y);
        // The first point duplicates the current point.
        for (px, py) in curve.points().into_iter().skip(1) {
            self.line_to(px, py);
        }
    }

    /// Close the current sub-path. Does nothing on an empty path or one
    /// that is already closed.
    pub fn close_polygon(&mut self) {
        if self.current_point().is_some() {
            self.vertices
                .push(VertexD::new(0.0, 0.0, PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
        }
    }

    /// Closed polygon through `points`.
    pub fn add_polygon(&mut self, points: &[(f64, f64)]) {
        let mut it = points.iter();
        if let Some(&(x, y)) = it.next() {
            self.move_to(x, y);
            for &(x, y) in it {
                self.line_to(x, y);
            }
            self.close_polygon();
        }
    }

    /// Open polyline through `points`.
    pub fn add_polyline(&mut self, points: &[(f64, f64)]) {
        let mut it = points.iter();
        if let Some(&(x, y)) = it.next() {
            self.move_to(x, y);
            for &(x, y) in it {
                self.line_to(x, y);
            }
        }
    }

    /// Axis-aligned rectangle as a closed polygon.
    pub fn add_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.add_polygon(&[(x1, y1), (x2, y1), (x2, y2), (x1, y2)]);
    }

    /// Append every vertex of another source.
    pub fn concat_path(&mut self, vs: &mut dyn VertexSource) {
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(0);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if cmd == PATH_CMD_STOP {
                break;
            }
            self.vertices.push(VertexD::new(x, y, cmd));
        }
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn vertices(&self) -> &[VertexD] {
        &self.vertices
    }

    pub fn total_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn last_vertex(&self) -> Option<&VertexD> {
        self.vertices.last()
    }

    /// Coordinates of the last vertex when it carries one (not after a close).
    pub fn current_point(&self) -> Option<(f64, f64)> {
        self.vertices
            .last()
            .filter(|v| is_vertex(v.cmd))
            .map(|v| (v.x, v.y))
    }

    /// Number of sub-paths (one per `move_to`).
    pub fn num_subpaths(&self) -> usize {
        self.vertices.iter().filter(|v| is_move_to(v.cmd)).count()
    }

    /// Number of explicit close markers.
    pub fn num_closed(&self) -> usize {
        self.vertices.iter().filter(|v| is_end_poly(v.cmd)).count()
    }
}

impl VertexSource for PathStorage {
    fn rewind(&mut self, path_id: u32) {
        self.iterator = path_id as usize;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        match self.vertices.get(self.iterator) {
            Some(v) => {
                *x = v.x;
                *y = v.y;
                self.iterator += 1;
                v.cmd
            }
            None => PATH_CMD_STOP,
        }
    }
}
