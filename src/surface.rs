//! The drawing surface: one owned RGBA raster plus the pipeline that paints
//! into it.
//!
//! Brush strokes and pattern generators both draw through the two entry
//! points here, `stroke_path` and `fill_path`. Pixels are stored
//! premultiplied; `pixel()` and `to_rgba8()` hand out straight alpha.

use std::io::Cursor;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;

use crate::basics::VertexSource;
use crate::color::Rgba8;
use crate::comp_op::CompOp;
use crate::conv_stroke::ConvStroke;
use crate::error::CanvasError;
use crate::gradient_lut::GradientLut;
use crate::math_stroke::LineCap;
use crate::path_storage::PathStorage;
use crate::pixfmt_rgba::{PixelFormat, PixfmtRgba32};
use crate::rasterizer_scanline_aa::RasterizerScanlineAa;
use crate::renderer_scanline::{render_scanlines_gen, render_scanlines_solid};
use crate::scanline_u::ScanlineU8;
use crate::span_gradient::{GradientShape, SpanGradient};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

// ============================================================================
// Paint and stroke style
// ============================================================================

/// What a filled or stroked shape is colored with.
#[derive(Debug, Clone)]
pub enum Paint {
    Solid(Rgba8),
    Gradient(GradientShape, GradientLut),
}

impl Paint {
    /// Linear gradient from `(x1, y1)` to `(x2, y2)` through `stops`
    /// (offset, color).
    pub fn linear(x1: f64, y1: f64, x2: f64, y2: f64, stops: &[(f64, Rgba8)]) -> Self {
        Paint::Gradient(GradientShape::Linear { x1, y1, x2, y2 }, build_lut(stops))
    }

    /// Concentric radial gradient around `(cx, cy)` from radius `r0` to `r1`.
    pub fn radial(cx: f64, cy: f64, r0: f64, r1: f64, stops: &[(f64, Rgba8)]) -> Self {
        Paint::Gradient(GradientShape::Radial { cx, cy, r0, r1 }, build_lut(stops))
    }
}

impl From<Rgba8> for Paint {
    fn from(c: Rgba8) -> Self {
        Paint::Solid(c)
    }
}

fn build_lut(stops: &[(f64, Rgba8)]) -> GradientLut {
    let mut lut = GradientLut::new();
    for &(offset, color) in stops {
        lut.add_color(offset, color);
    }
    lut.build_lut();
    lut
}

/// How a center-line path is stroked. Joins are always round.
#[derive(Debug, Clone)]
pub struct StrokeStyle {
    pub width: f64,
    pub paint: Paint,
    pub cap: LineCap,
    pub comp_op: CompOp,
}

impl StrokeStyle {
    /// Butt-capped, painted over existing content.
    pub fn new(width: f64, paint: impl Into<Paint>) -> Self {
        Self {
            width,
            paint: paint.into(),
            cap: LineCap::Butt,
            comp_op: CompOp::SrcOver,
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_comp_op(mut self, op: CompOp) -> Self {
        self.comp_op = op;
        self
    }
}

// ============================================================================
// DrawingSurface
// ============================================================================

pub struct DrawingSurface {
    pixfmt: PixfmtRgba32,
    ras: RasterizerScanlineAa,
    sl: ScanlineU8,
}

impl DrawingSurface {
    /// A fully transparent surface. Fails when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptySurface { width, height });
        }
        debug!("creating {}x{} drawing surface", width, height);
        Ok(Self {
            pixfmt: PixfmtRgba32::new(width, height),
            ras: RasterizerScanlineAa::new(),
            sl: ScanlineU8::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixfmt.width()
    }

    pub fn height(&self) -> u32 {
        self.pixfmt.height()
    }

    /// Every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.pixfmt.clear(&Rgba8::transparent());
    }

    /// Fill the closed contours of `path` under the non-zero rule. Open
    /// sub-paths are closed implicitly.
    pub fn fill_path(&mut self, path: &mut dyn VertexSource, paint: &Paint, op: CompOp) {
        self.ras.reset();
        self.ras.add_path(path, 0);
        self.render(paint, op);
    }

    /// Stroke the center line of `path`.
    pub fn stroke_path(&mut self, path: &mut dyn VertexSource, style: &StrokeStyle) {
        let mut stroke = ConvStroke::new(path);
        stroke.set_width(style.width);
        stroke.set_line_cap(style.cap);
        self.ras.reset();
        self.ras.add_path(&mut stroke, 0);
        self.render(&style.paint, style.comp_op);
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        let mut path = PathStorage::new();
        path.add_rect(x, y, x + w, y + h);
        self.fill_path(&mut path, paint, CompOp::SrcOver);
    }

    fn render(&mut self, paint: &Paint, op: CompOp) {
        match paint {
            Paint::Solid(c) => {
                render_scanlines_solid(&mut self.ras, &mut self.sl, &mut self.pixfmt, c, op)
            }
            Paint::Gradient(shape, lut) => {
                let mut span_gen = SpanGradient::new(*shape, lut.clone());
                render_scanlines_gen(&mut self.ras, &mut self.sl, &mut self.pixfmt, &mut span_gen, op)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Readback and export
    // ------------------------------------------------------------------------

    /// Straight-alpha color at `(x, y)`; transparent outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        self.pixfmt.pixel(x, y)
    }

    /// Straight-alpha copy of the whole surface, row-major RGBA.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixfmt.to_straight()
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.pixfmt
            .data()
            .chunks_exact(4)
            .filter(|p| p[3] != 0)
            .count()
    }

    /// PNG bytes of the surface.
    pub fn encode_png(&self) -> Result<Vec<u8>, CanvasError> {
        let mut out = Cursor::new(Vec::new());
        PngEncoder::new(&mut out).write_image(
            &self.to_rgba8(),
            self.width(),
            self.height(),
            ExtendedColorType::Rgba8,
        )?;
        let bytes = out.into_inner();
        debug!("encoded surface as {} PNG bytes", bytes.len());
        Ok(bytes)
    }

    /// Write the surface to `path` as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        let bytes = self.encode_png()?;
        std::fs::write(path.as_ref(), bytes)?;
        debug!("saved surface to {}", path.as_ref().display());
        Ok(())
    }
}
