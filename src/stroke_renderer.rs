//! Freehand brush strokes.
//!
//! Pointer samples arrive in display coordinates, are mapped to surface
//! pixels, and each move while the pointer is down draws one round-capped
//! segment from the previous sample. The per-gesture state lives in a
//! `StrokeState` owned by the caller.

use log::trace;

use crate::basics::PointD;
use crate::color::Rgba8;
use crate::comp_op::CompOp;
use crate::math_stroke::LineCap;
use crate::params::{BrushConfig, BrushMode};
use crate::path_storage::PathStorage;
use crate::surface::{DrawingSurface, StrokeStyle};

/// State of one pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrokeState {
    pub active: bool,
    pub last_point: PointD,
    /// Distance covered by the most recent move, in surface pixels.
    pub last_speed: f64,
}

// ============================================================================
// DisplayMapping
// ============================================================================

/// Maps client coordinates to surface pixels for a surface shown at
/// `display_width × display_height` with its top-left corner at
/// `(origin_x, origin_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    pub origin_x: f64,
    pub origin_y: f64,
    pub display_width: f64,
    pub display_height: f64,
    pub logical_width: f64,
    pub logical_height: f64,
}

impl DisplayMapping {
    /// Surface shown at its own size with no offset.
    pub fn identity(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64, width, height)
    }

    pub fn new(
        origin_x: f64,
        origin_y: f64,
        display_width: f64,
        display_height: f64,
        logical_width: u32,
        logical_height: u32,
    ) -> Self {
        Self {
            origin_x,
            origin_y,
            display_width,
            display_height,
            logical_width: logical_width as f64,
            logical_height: logical_height as f64,
        }
    }

    pub fn scale_x(&self) -> f64 {
        axis_scale(self.logical_width, self.display_width)
    }

    pub fn scale_y(&self) -> f64 {
        axis_scale(self.logical_height, self.display_height)
    }

    /// Surface coordinates of a client-space point.
    pub fn to_logical(&self, client_x: f64, client_y: f64) -> PointD {
        PointD::new(
            (client_x - self.origin_x) * self.scale_x(),
            (client_y - self.origin_y) * self.scale_y(),
        )
    }
}

/// A surface that is not laid out yet (zero display extent) maps 1:1.
fn axis_scale(logical: f64, displayed: f64) -> f64 {
    if displayed > 0.0 {
        logical / displayed
    } else {
        1.0
    }
}

// ============================================================================
// StrokeRenderer
// ============================================================================

/// Hue in degrees for a segment drawn at `speed` pixels per sample.
pub fn speed_hue(speed: f64) -> f64 {
    (speed * 2.0).rem_euclid(360.0)
}

/// Stroke style for the next segment under `brush`.
pub fn segment_style(brush: &BrushConfig, last_speed: f64) -> StrokeStyle {
    let style = match brush.mode {
        BrushMode::Eraser => StrokeStyle::new(brush.eraser_size as f64, Rgba8::black())
            .with_comp_op(CompOp::DstOut),
        BrushMode::Normal => StrokeStyle::new(brush.brush_size as f64, brush.color),
        BrushMode::Speed => StrokeStyle::new(
            brush.brush_size as f64,
            Rgba8::from_hsl(speed_hue(last_speed), 100.0, 50.0),
        ),
    };
    style.with_cap(LineCap::Round)
}

/// Pointer event handlers. Stateless; everything it needs is passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokeRenderer;

impl StrokeRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Begin a gesture at `p`. Nothing is drawn until the first move.
    pub fn pointer_down(&self, state: &mut StrokeState, p: PointD) {
        state.active = true;
        state.last_point = p;
    }

    /// Draw the segment from the previous sample to `p`. Ignored when no
    /// gesture is active.
    pub fn pointer_move(
        &self,
        state: &mut StrokeState,
        surface: &mut DrawingSurface,
        brush: &BrushConfig,
        p: PointD,
    ) {
        if !state.active {
            return;
        }
        let speed = state.last_point.distance(&p);
        state.last_speed = speed;

        let style = segment_style(brush, speed);
        trace!(
            "{} segment ({:.1}, {:.1}) -> ({:.1}, {:.1}) width {} speed {:.1}",
            brush.mode,
            state.last_point.x,
            state.last_point.y,
            p.x,
            p.y,
            style.width,
            speed
        );
        let mut path = PathStorage::new();
        path.move_to(state.last_point.x, state.last_point.y);
        path.line_to(p.x, p.y);
        surface.stroke_path(&mut path, &style);

        state.last_point = p;
    }

    pub fn pointer_up(&self, state: &mut StrokeState) {
        state.active = false;
    }

    pub fn pointer_leave(&self, state: &mut StrokeState) {
        state.active = false;
    }
}
