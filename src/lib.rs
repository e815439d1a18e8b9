//! # paint-canvas
//!
//! A raster drawing canvas with freehand brush strokes and parametric
//! pattern generators, built on a small anti-aliased scanline renderer.
//!
//! Two producers write into one exclusively owned [`DrawingSurface`]:
//!
//! - [`StrokeRenderer`] turns pointer samples into round-capped segments
//!   (plain color, speed-reactive hue, or eraser).
//! - [`patterns::generate`] clears the surface and paints one of six
//!   generators (fractal tree, mandala, abstract shapes, tessellation,
//!   spirograph, landscape).
//!
//! ## Architecture
//!
//! Rendering follows the classic scanline pipeline:
//!
//! 1. **Vertex Source**: paths, ellipses and curve approximations
//! 2. **Stroke conversion**: center lines to fillable outlines
//! 3. **Scanline Rasterizer**: area/cover cells swept into coverage rows
//! 4. **Scanline Container**: coverage spans for one row
//! 5. **Renderer**: solid or gradient spans composited into premultiplied
//!    RGBA pixels
//!
//! ```
//! use paint_canvas::{DrawingSurface, PathStorage, Rgba8, StrokeStyle};
//!
//! let mut surface = DrawingSurface::new(64, 64).unwrap();
//! let mut path = PathStorage::new();
//! path.move_to(8.0, 32.0);
//! path.line_to(56.0, 32.0);
//! surface.stroke_path(&mut path, &StrokeStyle::new(4.0, Rgba8::black()));
//! assert_eq!(surface.pixel(32, 32), Rgba8::black());
//! ```

// Foundation types
pub mod basics;
pub mod color;
pub mod error;

// Geometry
pub mod curves;
pub mod ellipse;
pub mod math_stroke;
pub mod path_storage;

// Scanline rasterizer
pub mod rasterizer_cells_aa;
pub mod rasterizer_scanline_aa;
pub mod scanline_u;

// Pixel formats and renderers
pub mod comp_op;
pub mod pixfmt_rgba;
pub mod renderer_scanline;

// Spans and converters
pub mod conv_stroke;
pub mod gradient_lut;
pub mod span_gradient;

// Canvas
pub mod params;
pub mod patterns;
pub mod stroke_renderer;
pub mod surface;

pub use basics::PointD;
pub use color::Rgba8;
pub use comp_op::CompOp;
pub use error::CanvasError;
pub use math_stroke::LineCap;
pub use params::{ArtParams, BrushConfig, BrushMode, PatternKind};
pub use path_storage::PathStorage;
pub use stroke_renderer::{DisplayMapping, StrokeRenderer, StrokeState};
pub use surface::{DrawingSurface, Paint, StrokeStyle};
