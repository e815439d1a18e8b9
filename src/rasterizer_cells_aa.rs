//! Anti-aliased cell rasterizer engine.
//!
//! Converts edges in 24.8 fixed-point coordinates into per-pixel cells that
//! carry two accumulators:
//! - `cover`: net vertical extent of edges crossing the cell (winding)
//! - `area`: twice the signed area of the edge fragments inside the cell,
//!   which yields partial coverage at the cell's left boundary
//!
//! After `sort_cells()` the cells are ordered by row then column, and each
//! row's slice is found by binary search in `row_cells()`.

use crate::basics::{POLY_SUBPIXEL_MASK, POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT};

const SCALE: i32 = POLY_SUBPIXEL_SCALE as i32;
const MASK: i32 = POLY_SUBPIXEL_MASK as i32;

/// Edges wider than this are split in two so the i64 products stay small.
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

// ============================================================================
// CellAa
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAa {
    pub x: i32,
    pub y: i32,
    pub cover: i32,
    pub area: i32,
}

impl CellAa {
    const EMPTY: CellAa = CellAa {
        x: i32::MAX,
        y: i32::MAX,
        cover: 0,
        area: 0,
    };

    #[inline]
    fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

// ============================================================================
// RasterizerCellsAa
// ============================================================================

pub struct RasterizerCellsAa {
    cells: Vec<CellAa>,
    curr: CellAa,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    sorted: bool,
}

impl RasterizerCellsAa {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            curr: CellAa::EMPTY,
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
            sorted: false,
        }
    }

    /// Discard all cells, keeping allocations.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.curr = CellAa::EMPTY;
        self.min_x = i32::MAX;
        self.min_y = i32::MAX;
        self.max_x = i32::MIN;
        self.max_y = i32::MIN;
        self.sorted = false;
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }
    pub fn min_y(&self) -> i32 {
        self.min_y
    }
    pub fn max_x(&self) -> i32 {
        self.max_x
    }
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn sorted(&self) -> bool {
        self.sorted
    }

    /// Cells of row `y`, ordered by x. Valid only after `sort_cells()`;
    /// rows outside the bounding box are empty.
    pub fn row_cells(&self, y: i32) -> &[CellAa] {
        if !self.sorted || y < self.min_y || y > self.max_y {
            return &[];
        }
        let start = self.cells.partition_point(|c| c.y < y);
        let end = start + self.cells[start..].partition_point(|c| c.y == y);
        &self.cells[start..end]
    }

    // ------------------------------------------------------------------------
    // Cell bookkeeping
    // ------------------------------------------------------------------------

    #[inline]
    fn flush_curr(&mut self) {
        if self.curr.area | self.curr.cover != 0 {
            self.cells.push(self.curr);
        }
    }

    #[inline]
    fn set_curr(&mut self, x: i32, y: i32) {
        if !self.curr.is_at(x, y) {
            self.flush_curr();
            self.curr = CellAa {
                x,
                y,
                cover: 0,
                area: 0,
            };
        }
    }

    #[inline]
    fn accumulate(&mut self, delta: i32, area_factor: i32) {
        self.curr.cover += delta;
        self.curr.area += area_factor * delta;
    }

    fn extend_bounds(&mut self, ex: i32, ey: i32) {
        self.min_x = self.min_x.min(ex);
        self.max_x = self.max_x.max(ex);
        self.min_y = self.min_y.min(ey);
        self.max_y = self.max_y.max(ey);
    }

    // ------------------------------------------------------------------------
    // Edge walking
    // ------------------------------------------------------------------------

    /// Walk a segment inside one pixel row `ey`. `x1`, `x2` are 24.8 values;
    /// `y1`, `y2` are fractional offsets within the row.
    fn render_hline(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1 & MASK;
        let fx2 = x2 & MASK;

        if y1 == y2 {
            self.set_curr(ex2, ey);
            return;
        }

        if ex1 == ex2 {
            self.accumulate(y2 - y1, fx1 + fx2);
            return;
        }

        // The segment crosses several cells of this row.
        let dy = (y2 - y1) as i64;
        let (mut p, first, incr, dx) = if x2 >= x1 {
            ((SCALE - fx1) as i64 * dy, SCALE, 1, (x2 - x1) as i64)
        } else {
            (fx1 as i64 * dy, 0, -1, (x1 - x2) as i64)
        };

        let (mut delta, mut rem) = floor_divmod(p, dx);
        self.accumulate(delta, fx1 + first);

        let mut ex = ex1 + incr;
        self.set_curr(ex, ey);
        let mut y = y1 + delta;

        if ex != ex2 {
            p = SCALE as i64 * (y2 - y + delta) as i64;
            let (lift, lift_rem) = floor_divmod(p, dx);
            rem -= dx;

            while ex != ex2 {
                delta = lift;
                rem += lift_rem;
                if rem >= 0 {
                    rem -= dx;
                    delta += 1;
                }
                self.accumulate(delta, SCALE);
                y += delta;
                ex += incr;
                self.set_curr(ex, ey);
            }
        }
        self.accumulate(y2 - y, fx2 + SCALE - first);
    }

    /// Add an edge in 24.8 fixed-point coordinates.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 as i64 - x1 as i64;
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = ((x1 as i64 + x2 as i64) >> 1) as i32;
            let cy = ((y1 as i64 + y2 as i64) >> 1) as i32;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }

        let dy = y2 as i64 - y1 as i64;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let mut ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 & MASK;
        let fy2 = y2 & MASK;

        self.extend_bounds(ex1, ey1);
        self.extend_bounds(ex2, ey2);
        self.set_curr(ex1, ey1);

        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        let (first, incr) = if dy > 0 { (SCALE, 1) } else { (0, -1) };

        if dx == 0 {
            // Vertical edge: one cell per row, constant area factor.
            let ex = ex1;
            let two_fx = (x1 - (ex << POLY_SUBPIXEL_SHIFT)) << 1;

            self.accumulate(first - fy1, two_fx);
            ey1 += incr;
            self.set_curr(ex, ey1);

            let full = first + first - SCALE;
            while ey1 != ey2 {
                self.curr.cover = full;
                self.curr.area = two_fx * full;
                ey1 += incr;
                self.set_curr(ex, ey1);
            }
            self.accumulate(fy2 - SCALE + first, two_fx);
            return;
        }

        // General case: split the edge at every row boundary.
        let dy_abs = dy.abs();
        let p = if dy > 0 {
            (SCALE - fy1) as i64 * dx
        } else {
            fy1 as i64 * dx
        };
        let (delta, mut rem) = floor_divmod(p, dy_abs);

        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);
        ey1 += incr;
        self.set_curr(x_from >> POLY_SUBPIXEL_SHIFT, ey1);

        if ey1 != ey2 {
            let (lift, lift_rem) = floor_divmod(SCALE as i64 * dx, dy_abs);
            rem -= dy_abs;

            while ey1 != ey2 {
                let mut step = lift;
                rem += lift_rem;
                if rem >= 0 {
                    rem -= dy_abs;
                    step += 1;
                }
                let x_to = x_from + step;
                self.render_hline(ey1, x_from, SCALE - first, x_to, first);
                x_from = x_to;
                ey1 += incr;
                self.set_curr(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, SCALE - first, x2, fy2);
    }

    // ------------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------------

    /// Order cells by row then column. Idempotent.
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }
        self.flush_curr();
        self.curr = CellAa::EMPTY;
        if self.cells.is_empty() {
            return;
        }
        self.cells.sort_unstable_by_key(|c| (c.y, c.x));
        self.sorted = true;
    }

    /// Distinct rows that hold at least one cell, in ascending order.
    pub fn occupied_rows(&self) -> Vec<i32> {
        let mut rows: Vec<i32> = self.cells.iter().map(|c| c.y).collect();
        rows.dedup();
        rows
    }
}

impl Default for RasterizerCellsAa {
    fn default() -> Self {
        Self::new()
    }
}

/// Division with the remainder kept non-negative (floor semantics).
#[inline]
fn floor_divmod(p: i64, d: i64) -> (i32, i64) {
    let mut q = p / d;
    let mut r = p % d;
    if r < 0 {
        q -= 1;
        r += d;
    }
    (q as i32, r)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const S: i32 = SCALE;

    fn total_cover(ras: &RasterizerCellsAa) -> i32 {
        ras.cells.iter().map(|c| c.cover).sum()
    }

    #[test]
    fn test_new_is_empty() {
        let ras = RasterizerCellsAa::new();
        assert_eq!(ras.total_cells(), 0);
        assert!(!ras.sorted());
        assert_eq!(ras.min_x(), i32::MAX);
        assert_eq!(ras.max_y(), i32::MIN);
    }

    #[test]
    fn test_reset() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 0, 4 * S, 4 * S);
        ras.sort_cells();
        assert!(ras.total_cells() > 0);
        ras.reset();
        assert_eq!(ras.total_cells(), 0);
        assert!(!ras.sorted());
    }

    #[test]
    fn test_horizontal_edge_has_no_cover() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 10 * S, 20 * S, 10 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 0);
    }

    #[test]
    fn test_vertical_edge_cover_sum() {
        let mut ras = RasterizerCellsAa::new();
        let x = 10 * S + 128;
        ras.line(x, 5 * S, x, 8 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 3 * S);
        assert_eq!(ras.min_y(), 5);
        assert_eq!(ras.max_y(), 8);
    }

    #[test]
    fn test_upward_edge_negative_cover() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(3 * S, 8 * S, 3 * S, 2 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), -6 * S);
    }

    #[test]
    fn test_diagonal_cover_sum() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 0, 5 * S, 5 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 5 * S);
        assert_eq!(ras.min_x(), 0);
        assert_eq!(ras.max_x(), 5);
    }

    #[test]
    fn test_shallow_edge_cover_sum() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 0, 10 * S, S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), S);
        let row = ras.row_cells(0);
        assert!(row.len() > 5);
        assert!(row.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn test_row_cells_belong_to_row() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(S, S, 7 * S, 9 * S);
        ras.line(7 * S, 9 * S, S, 9 * S);
        ras.line(S, 9 * S, S, S);
        ras.sort_cells();
        for y in ras.min_y()..=ras.max_y() {
            for cell in ras.row_cells(y) {
                assert_eq!(cell.y, y);
            }
        }
        assert!(ras.row_cells(ras.max_y() + 5).is_empty());
    }

    #[test]
    fn test_closed_polygon_cover_cancels() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(10 * S, 10 * S, 20 * S, 10 * S);
        ras.line(20 * S, 10 * S, 15 * S, 20 * S);
        ras.line(15 * S, 20 * S, 10 * S, 10 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 0);
        assert_eq!(ras.min_y(), 10);
        assert_eq!(ras.max_y(), 20);
    }

    #[test]
    fn test_occupied_rows_skip_gaps() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(2 * S, 0, 2 * S, 2 * S);
        ras.line(2 * S, 40 * S, 2 * S, 41 * S);
        ras.sort_cells();
        assert_eq!(ras.occupied_rows(), vec![0, 1, 40]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(5 * S, 0, 5 * S, 3 * S);
        ras.sort_cells();
        let n = ras.total_cells();
        ras.sort_cells();
        assert_eq!(ras.total_cells(), n);
    }

    #[test]
    fn test_large_dx_is_split() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 0, 20000 * S, S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), S);
    }

    #[test]
    fn test_floor_divmod() {
        assert_eq!(floor_divmod(7, 2), (3, 1));
        assert_eq!(floor_divmod(-7, 2), (-4, 1));
        assert_eq!(floor_divmod(-8, 2), (-4, 0));
    }
}
