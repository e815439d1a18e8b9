//! Polygon scanline rasterizer with anti-aliasing.
//!
//! Accepts polygon contours (move_to/line_to/close), rasterizes them into
//! anti-aliased scanlines, and feeds the scanlines to a renderer.
//!
//! Coverage follows the non-zero winding rule and is clamped to 255, so
//! overlapping contours of the same orientation merge into one shape. The
//! stroker relies on that to build round joins out of overlapping pieces.

use crate::basics::{
    iround, is_close, is_move_to, is_stop, is_vertex, VertexSource, POLY_SUBPIXEL_SCALE,
    POLY_SUBPIXEL_SHIFT,
};
use crate::rasterizer_cells_aa::RasterizerCellsAa;

const AA_SHIFT: u32 = 8;
const AA_MASK: i32 = (1 << AA_SHIFT) - 1;

/// Coordinates are clamped to this many pixels from the origin so that the
/// 24.8 fixed-point values cannot overflow.
const COORD_LIMIT: f64 = (1 << 20) as f64;

/// Convert a pixel coordinate to 24.8 fixed point.
#[inline]
pub fn poly_coord(v: f64) -> i32 {
    iround(v.clamp(-COORD_LIMIT, COORD_LIMIT) * POLY_SUBPIXEL_SCALE as f64)
}

// ============================================================================
// Scanline trait
// ============================================================================

/// Receives the coverage runs of one row from `sweep_scanline`.
pub trait Scanline {
    /// Prepare for a new row, clearing all span data.
    fn reset_spans(&mut self);

    /// A single pixel at `x` with coverage `cover`.
    fn add_cell(&mut self, x: i32, cover: u32);

    /// `len` pixels starting at `x`, all with coverage `cover`.
    fn add_span(&mut self, x: i32, len: u32, cover: u32);

    /// Set the row this scanline describes.
    fn finalize(&mut self, y: i32);

    fn num_spans(&self) -> u32;

    fn y(&self) -> i32;
}

// ============================================================================
// RasterizerScanlineAa
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

/// Usage:
/// 1. Define contours with `move_to_d()` / `line_to_d()` or `add_path()`
/// 2. Call `rewind_scanlines()` then repeatedly `sweep_scanline()`
pub struct RasterizerScanlineAa {
    outline: RasterizerCellsAa,
    start_x: i32,
    start_y: i32,
    last_x: i32,
    last_y: i32,
    status: Status,
    rows: Vec<i32>,
    next_row: usize,
}

impl RasterizerScanlineAa {
    pub fn new() -> Self {
        Self {
            outline: RasterizerCellsAa::new(),
            start_x: 0,
            start_y: 0,
            last_x: 0,
            last_y: 0,
            status: Status::Initial,
            rows: Vec::new(),
            next_row: 0,
        }
    }

    /// Discard all polygon data.
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = Status::Initial;
        self.rows.clear();
        self.next_row = 0;
    }

    // ------------------------------------------------------------------------
    // Path building
    // ------------------------------------------------------------------------

    /// Close the current contour back to its start point.
    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.outline
                .line(self.last_x, self.last_y, self.start_x, self.start_y);
            self.last_x = self.start_x;
            self.last_y = self.start_y;
            self.status = Status::Closed;
        }
    }

    /// Start a new contour. Any open contour is closed first.
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.close_polygon();
        self.start_x = poly_coord(x);
        self.start_y = poly_coord(y);
        self.last_x = self.start_x;
        self.last_y = self.start_y;
        self.status = Status::MoveTo;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        let (nx, ny) = (poly_coord(x), poly_coord(y));
        self.outline.line(self.last_x, self.last_y, nx, ny);
        self.last_x = nx;
        self.last_y = ny;
        self.status = Status::LineTo;
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        if is_move_to(cmd) {
            self.move_to_d(x, y);
        } else if is_vertex(cmd) {
            self.line_to_d(x, y);
        } else if is_close(cmd) {
            self.close_polygon();
        }
    }

    /// Feed every vertex of `vs`. Contours are always filled closed.
    pub fn add_path(&mut self, vs: &mut dyn VertexSource, path_id: u32) {
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(path_id);
        if self.outline.sorted() {
            self.reset();
        }
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.add_vertex(x, y, cmd);
        }
    }

    pub fn min_x(&self) -> i32 {
        self.outline.min_x()
    }
    pub fn min_y(&self) -> i32 {
        self.outline.min_y()
    }
    pub fn max_x(&self) -> i32 {
        self.outline.max_x()
    }
    pub fn max_y(&self) -> i32 {
        self.outline.max_y()
    }

    // ------------------------------------------------------------------------
    // Scanline sweeping
    // ------------------------------------------------------------------------

    /// Close, sort, and prepare for sweeping. Returns `false` when there is
    /// nothing to render.
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 {
            return false;
        }
        self.rows = self.outline.occupied_rows();
        self.next_row = 0;
        true
    }

    /// Coverage (0..=255) from twice the accumulated area, non-zero rule.
    #[inline]
    pub fn calculate_alpha(&self, area: i32) -> u32 {
        let cover = (area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT)).abs();
        cover.min(AA_MASK) as u32
    }

    /// Emit the next non-empty row into `sl`. Returns `false` when all rows
    /// have been consumed.
    pub fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool {
        while self.next_row < self.rows.len() {
            let y = self.rows[self.next_row];
            self.next_row += 1;
            sl.reset_spans();

            let cells = self.outline.row_cells(y);
            let mut i = 0;
            let mut cover = 0;

            while i < cells.len() {
                let x = cells[i].x;
                let mut area = 0;
                // Cells sharing an x are merged; edges may revisit a pixel.
                while i < cells.len() && cells[i].x == x {
                    area += cells[i].area;
                    cover += cells[i].cover;
                    i += 1;
                }

                let mut span_start = x;
                if area != 0 {
                    let alpha =
                        self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha != 0 {
                        sl.add_cell(x, alpha);
                    }
                    span_start = x + 1;
                }

                if let Some(next) = cells.get(i) {
                    if next.x > span_start {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha != 0 {
                            sl.add_span(span_start, (next.x - span_start) as u32, alpha);
                        }
                    }
                }
            }

            if sl.num_spans() > 0 {
                sl.finalize(y);
                return true;
            }
        }
        false
    }
}

impl Default for RasterizerScanlineAa {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanline_u::ScanlineU8;

    /// Collect (y, x, cover) for every covered pixel.
    fn rasterize(ras: &mut RasterizerScanlineAa) -> Vec<(i32, i32, u8)> {
        let mut out = Vec::new();
        if !ras.rewind_scanlines() {
            return out;
        }
        let mut sl = ScanlineU8::new();
        while ras.sweep_scanline(&mut sl) {
            for span in sl.spans() {
                for (k, &c) in sl.span_covers(span).iter().enumerate() {
                    out.push((sl.y(), span.x + k as i32, c));
                }
            }
        }
        out
    }

    fn square(ras: &mut RasterizerScanlineAa, x1: f64, y1: f64, x2: f64, y2: f64) {
        ras.move_to_d(x1, y1);
        ras.line_to_d(x2, y1);
        ras.line_to_d(x2, y2);
        ras.line_to_d(x1, y2);
    }

    #[test]
    fn test_empty_has_no_scanlines() {
        let mut ras = RasterizerScanlineAa::new();
        assert!(!ras.rewind_scanlines());
    }

    #[test]
    fn test_pixel_aligned_square_is_full() {
        let mut ras = RasterizerScanlineAa::new();
        square(&mut ras, 2.0, 3.0, 6.0, 5.0);
        let px = rasterize(&mut ras);
        assert_eq!(px.len(), 8);
        assert!(px.iter().all(|&(_, _, c)| c == 255));
        assert!(px.iter().all(|&(y, x, _)| (3..5).contains(&y) && (2..6).contains(&x)));
    }

    #[test]
    fn test_half_pixel_edge_coverage() {
        let mut ras = RasterizerScanlineAa::new();
        square(&mut ras, 0.5, 0.0, 3.0, 1.0);
        let px = rasterize(&mut ras);
        assert_eq!(px[0], (0, 0, 128));
        assert_eq!(px[1], (0, 1, 255));
        assert_eq!(px.len(), 3);
    }

    #[test]
    fn test_reversed_orientation_same_coverage() {
        let mut a = RasterizerScanlineAa::new();
        square(&mut a, 1.0, 1.0, 4.0, 4.0);
        let mut b = RasterizerScanlineAa::new();
        b.move_to_d(1.0, 1.0);
        b.line_to_d(1.0, 4.0);
        b.line_to_d(4.0, 4.0);
        b.line_to_d(4.0, 1.0);
        assert_eq!(rasterize(&mut a), rasterize(&mut b));
    }

    #[test]
    fn test_overlap_same_winding_is_clamped() {
        let mut ras = RasterizerScanlineAa::new();
        square(&mut ras, 0.0, 0.0, 4.0, 4.0);
        square(&mut ras, 2.0, 0.0, 6.0, 4.0);
        let px = rasterize(&mut ras);
        assert_eq!(px.len(), 24);
        assert!(px.iter().all(|&(_, _, c)| c == 255));
    }

    #[test]
    fn test_opposite_winding_cancels() {
        let mut ras = RasterizerScanlineAa::new();
        square(&mut ras, 0.0, 0.0, 4.0, 4.0);
        ras.move_to_d(0.0, 0.0);
        ras.line_to_d(0.0, 4.0);
        ras.line_to_d(4.0, 4.0);
        ras.line_to_d(4.0, 0.0);
        assert!(rasterize(&mut ras).is_empty());
    }

    #[test]
    fn test_add_path_and_reuse() {
        let mut p = crate::path_storage::PathStorage::new();
        p.add_rect(0.0, 0.0, 2.0, 2.0);
        let mut ras = RasterizerScanlineAa::new();
        ras.add_path(&mut p, 0);
        assert_eq!(rasterize(&mut ras).len(), 4);
        // Adding after a sweep starts a fresh shape.
        let mut q = crate::path_storage::PathStorage::new();
        q.add_rect(10.0, 10.0, 11.0, 11.0);
        ras.add_path(&mut q, 0);
        assert_eq!(rasterize(&mut ras), vec![(10, 10, 255)]);
    }

    #[test]
    fn test_negative_coordinates() {
        let mut ras = RasterizerScanlineAa::new();
        square(&mut ras, -3.0, -2.0, -1.0, -1.0);
        let px = rasterize(&mut ras);
        assert_eq!(px.len(), 2);
        assert_eq!(px[0].0, -2);
        assert_eq!(ras.min_x(), -3);
    }

    #[test]
    fn test_calculate_alpha_clamps() {
        let ras = RasterizerScanlineAa::new();
        let full = (POLY_SUBPIXEL_SCALE * POLY_SUBPIXEL_SCALE * 2) as i32;
        assert_eq!(ras.calculate_alpha(full), 255);
        assert_eq!(ras.calculate_alpha(-full), 255);
        assert_eq!(ras.calculate_alpha(full * 3), 255);
        assert_eq!(ras.calculate_alpha(full / 2), 128);
        assert_eq!(ras.calculate_alpha(0), 0);
    }

    #[test]
    fn test_poly_coord_clamps() {
        assert_eq!(poly_coord(1.5), 384);
        assert_eq!(poly_coord(1e12), poly_coord(COORD_LIMIT));
    }
}
