//! Parametric pattern generators.
//!
//! Every generator works in two steps: `build` computes the pattern's
//! geometry as a plain value from the surface size, the `ArtParams` and a
//! seeded random source, and `Pattern::paint` draws that geometry. Only the
//! second step touches pixels, so the geometry can be checked directly.
//!
//! `generate` is the one-shot entry point: it clears the surface and paints
//! exactly one pattern. A given `(kind, params, seed)` always produces the
//! same image.

pub mod abstract_shapes;
pub mod fractal;
pub mod landscape;
pub mod mandala;
pub mod spirograph;
pub mod tessellation;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::Rgba8;
use crate::params::{ArtParams, PatternKind};
use crate::surface::DrawingSurface;

/// Computed geometry of one pattern.
pub trait Pattern {
    /// Number of primitives (segments, curves, shapes) the pattern draws.
    fn primitive_count(&self) -> usize;

    /// Draw onto `surface` over whatever is already there.
    fn paint(&self, surface: &mut DrawingSurface);
}

/// Compute the geometry of `kind` for a `width × height` surface.
pub fn build(
    kind: PatternKind,
    width: u32,
    height: u32,
    params: &ArtParams,
    seed: u64,
) -> Box<dyn Pattern> {
    let (w, h) = (width as f64, height as f64);
    let mut rng = StdRng::seed_from_u64(seed);
    match kind {
        PatternKind::Fractal => Box::new(fractal::build(w, h, params)),
        PatternKind::Mandala => Box::new(mandala::build(w, h, params)),
        PatternKind::Abstract => Box::new(abstract_shapes::build(w, h, params, &mut rng)),
        PatternKind::Tessellation => Box::new(tessellation::build(w, h, params)),
        PatternKind::Spirograph => Box::new(spirograph::build(w, h, params)),
        PatternKind::Landscape => Box::new(landscape::build(w, h, params, &mut rng)),
    }
}

/// Clear `surface` and paint one pattern over the whole of it.
pub fn generate(surface: &mut DrawingSurface, kind: PatternKind, params: &ArtParams, seed: u64) {
    let pattern = build(kind, surface.width(), surface.height(), params, seed);
    debug!(
        "generating {} ({:?}, seed {}): {} primitives",
        kind,
        params,
        seed,
        pattern.primitive_count()
    );
    surface.clear();
    pattern.paint(surface);
}

/// Generator color: hue in degrees, saturation from `colorfulness`.
pub(crate) fn hsl(params: &ArtParams, hue: f64, lightness: f64) -> Rgba8 {
    Rgba8::from_hsl(hue, params.saturation(), lightness)
}
