//! Foundation types, constants, and path command utilities.
//!
//! Everything else in the pipeline depends on these: the fixed-point
//! subpixel layout used by the rasterizer, coverage constants, the path
//! command encoding, and the `VertexSource` trait that ties vertex
//! producers to consumers.

// ============================================================================
// Rounding
// ============================================================================

/// Round to the nearest integer, halves away from zero.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Round to the nearest unsigned integer, halves up.
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

// ============================================================================
// Coverage and subpixel constants
// ============================================================================

/// Anti-aliasing coverage of a single pixel, 0 (none) to 255 (full).
pub type CoverType = u8;

/// Number of fractional bits in rasterizer coordinates (24.8 fixed point).
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;
pub const POLY_SUBPIXEL_MASK: u32 = POLY_SUBPIXEL_SCALE - 1;

pub const PI: f64 = std::f64::consts::PI;

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_END_POLY: u32 = 0x0F;
pub const PATH_CMD_MASK: u32 = 0x0F;

pub const PATH_FLAGS_NONE: u32 = 0;
pub const PATH_FLAGS_CLOSE: u32 = 0x40;

#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

#[inline]
pub fn is_move_to(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO
}

/// Move-to or line-to: a command that carries a coordinate.
#[inline]
pub fn is_vertex(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO || c == PATH_CMD_LINE_TO
}

#[inline]
pub fn is_end_poly(c: u32) -> bool {
    (c & PATH_CMD_MASK) == PATH_CMD_END_POLY
}

#[inline]
pub fn is_close(c: u32) -> bool {
    is_end_poly(c) && (c & PATH_FLAGS_CLOSE) != 0
}

// ============================================================================
// Points
// ============================================================================

/// A point in logical surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &PointD) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A vertex with coordinates and a path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexD {
    pub x: f64,
    pub y: f64,
    pub cmd: u32,
}

impl VertexD {
    pub fn new(x: f64, y: f64, cmd: u32) -> Self {
        Self { x, y, cmd }
    }
}

// ============================================================================
// VertexSource trait
// ============================================================================

/// A producer of path vertices.
///
/// Consumers call `rewind(path_id)` once, then pull vertices with `vertex()`
/// until it returns `PATH_CMD_STOP`. Paths, curves, ellipses and stroke
/// outlines all implement this, so the rasterizer can consume any of them.
pub trait VertexSource {
    fn rewind(&mut self, path_id: u32);
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

impl<T: VertexSource + ?Sized> VertexSource for &mut T {
    fn rewind(&mut self, path_id: u32) {
        (**self).rewind(path_id)
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        (**self).vertex(x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iround() {
        assert_eq!(iround(0.5), 1);
        assert_eq!(iround(-0.5), -1);
        assert_eq!(iround(2.49), 2);
        assert_eq!(iround(-2.51), -3);
    }

    #[test]
    fn test_uround() {
        assert_eq!(uround(0.4), 0);
        assert_eq!(uround(0.5), 1);
        assert_eq!(uround(254.6), 255);
    }

    #[test]
    fn test_command_predicates() {
        assert!(is_stop(PATH_CMD_STOP));
        assert!(is_move_to(PATH_CMD_MOVE_TO));
        assert!(is_vertex(PATH_CMD_LINE_TO));
        assert!(!is_vertex(PATH_CMD_END_POLY));
        assert!(is_end_poly(PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
        assert!(is_close(PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
        assert!(!is_close(PATH_CMD_END_POLY));
    }

    #[test]
    fn test_point_distance() {
        let a = PointD::new(0.0, 0.0);
        let b = PointD::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }
}
