// Copyright 2025.
//
// Config loading and rendering for the art-render CLI.
//
// Two TOML file shapes are read: a render config (pattern parameters,
// surface size, seed) and a stroke script (brush settings plus recorded
// pointer gestures in display coordinates).

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::{debug, info};
use serde::Deserialize;

use paint_canvas::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use paint_canvas::{
    patterns, ArtParams, BrushConfig, DisplayMapping, DrawingSurface, PatternKind, StrokeRenderer,
    StrokeState,
};

// ============================================================================
// Config
// ============================================================================

/// Largest accepted surface side. A 16384x16384 RGBA buffer is 1 GiB.
pub const MAX_SIDE: u32 = 16384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Reject sizes the surface buffer could not reasonably be allocated for.
    pub fn check(&self) -> Result<()> {
        ensure!(
            self.width <= MAX_SIDE && self.height <= MAX_SIDE,
            "surface {}x{} exceeds the {}x{} limit",
            self.width,
            self.height,
            MAX_SIDE,
            MAX_SIDE
        );
        Ok(())
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// `render` command config. Every table and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub seed: Option<u64>,
    pub params: ArtParams,
    pub surface: SurfaceSize,
}

/// One recorded pointer gesture: press at the first point, drag through
/// the rest, release.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Gesture {
    /// On-screen size the points were recorded against.
    pub display: [f64; 2],
    #[serde(default)]
    pub origin: [f64; 2],
    pub points: Vec<[f64; 2]>,
}

/// `stroke` command script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StrokeScript {
    pub brush: BrushConfig,
    pub surface: SurfaceSize,
    #[serde(rename = "gesture")]
    pub gestures: Vec<Gesture>,
}

pub fn parse_render_config(text: &str) -> Result<RenderConfig> {
    let mut config: RenderConfig = toml::from_str(text).context("invalid render config")?;
    config.params = config.params.clamped();
    Ok(config)
}

pub fn parse_stroke_script(text: &str) -> Result<StrokeScript> {
    let mut script: StrokeScript = toml::from_str(text).context("invalid stroke script")?;
    script.brush = script.brush.clamped();
    Ok(script)
}

pub fn load_render_config(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading render config {}", path.display()))?;
    parse_render_config(&text).with_context(|| format!("in {}", path.display()))
}

pub fn load_stroke_script(path: &Path) -> Result<StrokeScript> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading stroke script {}", path.display()))?;
    parse_stroke_script(&text).with_context(|| format!("in {}", path.display()))
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render_pattern(kind: PatternKind, config: &RenderConfig, seed: u64) -> Result<DrawingSurface> {
    config.surface.check()?;
    let SurfaceSize { width, height } = config.surface;
    let mut surface = DrawingSurface::new(width, height)?;
    info!("rendering {} at {}x{} (seed {})", kind, width, height, seed);
    patterns::generate(&mut surface, kind, &config.params, seed);
    Ok(surface)
}

/// Replay every gesture of `script` onto a fresh surface.
pub fn replay_strokes(script: &StrokeScript) -> Result<DrawingSurface> {
    script.surface.check()?;
    let SurfaceSize { width, height } = script.surface;
    let mut surface = DrawingSurface::new(width, height)?;
    let renderer = StrokeRenderer::new();

    for (i, gesture) in script.gestures.iter().enumerate() {
        let mapping = DisplayMapping::new(
            gesture.origin[0],
            gesture.origin[1],
            gesture.display[0],
            gesture.display[1],
            width,
            height,
        );
        let mut points = gesture
            .points
            .iter()
            .map(|&[x, y]| mapping.to_logical(x, y));
        let Some(first) = points.next() else {
            debug!("gesture {} has no points", i);
            continue;
        };

        let mut state = StrokeState::default();
        renderer.pointer_down(&mut state, first);
        for p in points {
            renderer.pointer_move(&mut state, &mut surface, &script.brush, p);
        }
        renderer.pointer_up(&mut state);
        debug!("gesture {}: {} samples", i, gesture.points.len());
    }
    Ok(surface)
}

/// Default output file name for a render.
pub fn default_output(kind: PatternKind, seed: u64, width: u32, height: u32) -> String {
    format!("{}_{}_{}x{}.png", kind, seed, width, height)
}
