//! Browser host for the drawing canvas.
//!
//! `PaintCanvas` owns the surface while the page's canvas element is
//! mounted. Pointer events arrive in client coordinates together with the
//! element's bounding rect; the TypeScript side copies `pixels()` into an
//! `ImageData` after each call that draws.

use log::warn;
use wasm_bindgen::prelude::*;

use paint_canvas::{
    patterns, ArtParams, BrushConfig, BrushMode, DisplayMapping, DrawingSurface, PatternKind,
    Rgba8, StrokeRenderer, StrokeState,
};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct PaintCanvas {
    surface: Option<DrawingSurface>,
    brush: BrushConfig,
    state: StrokeState,
    renderer: StrokeRenderer,
}

#[wasm_bindgen]
impl PaintCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<PaintCanvas, JsValue> {
        let surface = DrawingSurface::new(width, height).map_err(js_err)?;
        Ok(Self {
            surface: Some(surface),
            brush: BrushConfig::default(),
            state: StrokeState::default(),
            renderer: StrokeRenderer::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.surface.as_ref().map_or(0, |s| s.width())
    }

    pub fn height(&self) -> u32 {
        self.surface.as_ref().map_or(0, |s| s.height())
    }

    // ------------------------------------------------------------------
    // Brush controls
    // ------------------------------------------------------------------

    pub fn set_brush_size(&mut self, size: u32) {
        self.brush = BrushConfig {
            brush_size: size,
            ..self.brush
        }
        .clamped();
    }

    pub fn set_eraser_size(&mut self, size: u32) {
        self.brush = BrushConfig {
            eraser_size: size,
            ..self.brush
        }
        .clamped();
    }

    /// `#rrggbb` from the color picker.
    pub fn set_color(&mut self, hex: &str) -> Result<(), JsValue> {
        self.brush.color = Rgba8::from_hex(hex).map_err(js_err)?;
        Ok(())
    }

    pub fn set_mode(&mut self, name: &str) -> Result<(), JsValue> {
        self.brush.mode = name.parse::<BrushMode>().map_err(js_err)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    pub fn pointer_down(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
    ) {
        let Some(surface) = self.surface.as_ref() else {
            warn!("pointer_down on a destroyed canvas");
            return;
        };
        let mapping = DisplayMapping::new(
            rect_left,
            rect_top,
            rect_width,
            rect_height,
            surface.width(),
            surface.height(),
        );
        self.renderer
            .pointer_down(&mut self.state, mapping.to_logical(client_x, client_y));
    }

    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            warn!("pointer_move on a destroyed canvas");
            return;
        };
        let mapping = DisplayMapping::new(
            rect_left,
            rect_top,
            rect_width,
            rect_height,
            surface.width(),
            surface.height(),
        );
        let p = mapping.to_logical(client_x, client_y);
        self.renderer
            .pointer_move(&mut self.state, surface, &self.brush, p);
    }

    pub fn pointer_up(&mut self) {
        self.renderer.pointer_up(&mut self.state);
    }

    pub fn pointer_leave(&mut self) {
        self.renderer.pointer_leave(&mut self.state);
    }

    // ------------------------------------------------------------------
    // Whole-surface actions
    // ------------------------------------------------------------------

    /// Clear and paint one pattern. Slider values are clamped to their
    /// documented ranges.
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        &mut self,
        kind: &str,
        complexity: u32,
        symmetry: u32,
        colorfulness: u32,
        layers: u32,
        curvature: u32,
        density: u32,
        seed: u64,
    ) -> Result<(), JsValue> {
        let kind = kind.parse::<PatternKind>().map_err(js_err)?;
        let Some(surface) = self.surface.as_mut() else {
            warn!("generate({}) on a destroyed canvas", kind);
            return Ok(());
        };
        let params = ArtParams {
            complexity,
            symmetry,
            colorfulness,
            layers,
            curvature,
            density,
        }
        .clamped();
        patterns::generate(surface, kind, &params, seed);
        Ok(())
    }

    pub fn clear(&mut self) {
        match self.surface.as_mut() {
            Some(s) => s.clear(),
            None => warn!("clear on a destroyed canvas"),
        }
    }

    /// Straight-alpha RGBA rows, `width * height * 4` bytes. Empty once
    /// destroyed.
    pub fn pixels(&self) -> Vec<u8> {
        self.surface
            .as_ref()
            .map_or_else(Vec::new, |s| s.to_rgba8())
    }

    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        match self.surface.as_ref() {
            Some(s) => s.encode_png().map_err(js_err),
            None => Err(js_err("canvas destroyed")),
        }
    }

    /// Release the surface. Later drawing calls do nothing.
    pub fn destroy(&mut self) {
        self.surface = None;
        self.state = StrokeState::default();
    }
}

/// A fresh seed for the "generate" button.
#[wasm_bindgen]
pub fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

/// Names accepted by `PaintCanvas::generate`, comma separated.
#[wasm_bindgen]
pub fn pattern_names() -> String {
    PatternKind::ALL
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(",")
}

#[wasm_bindgen]
pub fn version() -> String {
    format!("paint-canvas {}", env!("CARGO_PKG_VERSION"))
}
