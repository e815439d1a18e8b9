//! Scanline rendering functions.
//!
//! Drive the rasterizer → scanline → pixel format pipeline: sweep every row
//! out of a `RasterizerScanlineAa` and blend its spans, either in one solid
//! color or with colors produced per pixel by a `SpanGenerator`.

use crate::color::Rgba8;
use crate::comp_op::CompOp;
use crate::pixfmt_rgba::PixelFormat;
use crate::rasterizer_scanline_aa::{RasterizerScanlineAa, Scanline};
use crate::scanline_u::ScanlineU8;

/// Produces the colors of a horizontal run of pixels.
pub trait SpanGenerator {
    /// Fill `span` with the colors of pixels `x .. x + span.len()` on row `y`.
    fn generate(&mut self, span: &mut [Rgba8], x: i32, y: i32);
}

/// Render all scanlines from the rasterizer in a solid color.
pub fn render_scanlines_solid<PF: PixelFormat>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineU8,
    pf: &mut PF,
    color: &Rgba8,
    op: CompOp,
) {
    if !ras.rewind_scanlines() {
        return;
    }
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        if y < 0 || y >= pf.height() as i32 {
            continue;
        }
        for span in sl.spans() {
            pf.blend_solid_hspan(span.x, y, color, sl.span_covers(span), op);
        }
    }
}

/// Render all scanlines from the rasterizer with per-pixel colors from
/// `span_gen`.
pub fn render_scanlines_gen<PF, SG>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineU8,
    pf: &mut PF,
    span_gen: &mut SG,
    op: CompOp,
) where
    PF: PixelFormat,
    SG: SpanGenerator + ?Sized,
{
    if !ras.rewind_scanlines() {
        return;
    }
    let mut colors: Vec<Rgba8> = Vec::new();
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        if y < 0 || y >= pf.height() as i32 {
            continue;
        }
        for span in sl.spans() {
            let len = span.len as usize;
            if colors.len() < len {
                colors.resize(len, Rgba8::default());
            }
            let buf = &mut colors[..len];
            span_gen.generate(buf, span.x, y);
            pf.blend_color_hspan(span.x, y, buf, sl.span_covers(span), op);
        }
    }
}
