//! Premultiplied RGBA32 pixel storage with clipped, composited span blending.
//!
//! Provides the `PixelFormat` trait the scanline renderers write through and
//! `PixfmtRgba32`, which owns a `width * height * 4` byte buffer. Component
//! order is R, G, B, A. Blending entry points take spans in surface
//! coordinates and silently drop the parts that fall outside the buffer, so
//! shapes that overhang an edge are clipped there.

use crate::basics::CoverType;
use crate::color::Rgba8;
use crate::comp_op::CompOp;

const BPP: usize = 4;

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Destination of the scanline renderers.
pub trait PixelFormat {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Straight-alpha color at `(x, y)`; transparent outside the buffer.
    fn pixel(&self, x: i32, y: i32) -> Rgba8;

    /// Blend one color over a run of pixels with per-pixel coverage.
    fn blend_solid_hspan(&mut self, x: i32, y: i32, c: &Rgba8, covers: &[CoverType], op: CompOp);

    /// Blend a run of per-pixel colors with per-pixel coverage.
    fn blend_color_hspan(
        &mut self,
        x: i32,
        y: i32,
        colors: &[Rgba8],
        covers: &[CoverType],
        op: CompOp,
    );
}

// ============================================================================
// PixfmtRgba32
// ============================================================================

#[derive(Debug, Clone)]
pub struct PixfmtRgba32 {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixfmtRgba32 {
    /// A fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BPP],
        }
    }

    /// Fill every pixel with `c`.
    pub fn clear(&mut self, c: &Rgba8) {
        let p = c.premultiplied();
        for px in self.data.chunks_exact_mut(BPP) {
            px.copy_from_slice(&p);
        }
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Straight-alpha copy of the buffer, row-major RGBA.
    pub fn to_straight(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(BPP) {
            let c = Rgba8::from_premultiplied([px[0], px[1], px[2], px[3]]);
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        out
    }

    /// Clip a span starting at `x` of `len` pixels on row `y` to the buffer.
    /// Returns the byte range of the visible pixels and how many leading
    /// pixels of the span were skipped.
    fn clip_span(&self, x: i32, y: i32, len: usize) -> Option<(std::ops::Range<usize>, usize)> {
        if y < 0 || y >= self.height as i32 || len == 0 {
            return None;
        }
        let x0 = x as i64;
        let x1 = x0 + len as i64;
        let start = x0.max(0);
        let end = x1.min(self.width as i64);
        if start >= end {
            return None;
        }
        let row = y as usize * self.width as usize * BPP;
        let range = row + start as usize * BPP..row + end as usize * BPP;
        Some((range, (start - x0) as usize))
    }
}

impl PixelFormat for PixfmtRgba32 {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        match self.clip_span(x, y, 1) {
            Some((range, _)) => {
                let p = &self.data[range];
                Rgba8::from_premultiplied([p[0], p[1], p[2], p[3]])
            }
            None => Rgba8::transparent(),
        }
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, c: &Rgba8, covers: &[CoverType], op: CompOp) {
        let Some((range, skip)) = self.clip_span(x, y, covers.len()) else {
            return;
        };
        let src = c.premultiplied();
        let pixels = self.data[range].chunks_exact_mut(BPP);
        for (p, &cover) in pixels.zip(&covers[skip..]) {
            op.blend(p, src, cover);
        }
    }

    fn blend_color_hspan(
        &mut self,
        x: i32,
        y: i32,
        colors: &[Rgba8],
        covers: &[CoverType],
        op: CompOp,
    ) {
        let len = colors.len().min(covers.len());
        let Some((range, skip)) = self.clip_span(x, y, len) else {
            return;
        };
        let pixels = self.data[range].chunks_exact_mut(BPP);
        for ((p, c), &cover) in pixels.zip(&colors[skip..]).zip(&covers[skip..]) {
            op.blend(p, c.premultiplied(), cover);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let pf = PixfmtRgba32::new(3, 2);
        assert_eq!(pf.data().len(), 24);
        assert!(pf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_solid_span_clipped_left_and_right() {
        let mut pf = PixfmtRgba32::new(4, 1);
        let red = Rgba8::new_opaque(255, 0, 0);
        pf.blend_solid_hspan(-2, 0, &red, &[255; 8], CompOp::SrcOver);
        for x in 0..4 {
            assert_eq!(pf.pixel(x, 0), red);
        }
    }

    #[test]
    fn test_span_skip_keeps_cover_alignment() {
        let mut pf = PixfmtRgba32::new(4, 1);
        let c = Rgba8::new_opaque(0, 0, 255);
        pf.blend_solid_hspan(-1, 0, &c, &[255, 0, 255, 0], CompOp::SrcOver);
        assert_eq!(pf.pixel(0, 0), Rgba8::transparent());
        assert_eq!(pf.pixel(1, 0), c);
        assert_eq!(pf.pixel(2, 0), Rgba8::transparent());
    }

    #[test]
    fn test_rows_outside_are_ignored() {
        let mut pf = PixfmtRgba32::new(2, 2);
        let c = Rgba8::black();
        pf.blend_solid_hspan(0, -1, &c, &[255, 255], CompOp::SrcOver);
        pf.blend_solid_hspan(0, 2, &c, &[255, 255], CompOp::SrcOver);
        pf.blend_solid_hspan(5, 0, &c, &[255, 255], CompOp::SrcOver);
        assert!(pf.data().iter().all(|&b| b == 0));
        assert_eq!(pf.pixel(-1, 0), Rgba8::transparent());
    }

    #[test]
    fn test_color_span_and_straight_readback() {
        let mut pf = PixfmtRgba32::new(2, 1);
        let colors = [Rgba8::new(255, 0, 0, 128), Rgba8::new_opaque(0, 255, 0)];
        pf.blend_color_hspan(0, 0, &colors, &[255, 255], CompOp::SrcOver);
        let straight = pf.to_straight();
        assert_eq!(&straight[..4], &[255, 0, 0, 128]);
        assert_eq!(&straight[4..], &[0, 255, 0, 255]);
    }

    #[test]
    fn test_clear_and_erase() {
        let mut pf = PixfmtRgba32::new(2, 1);
        pf.clear(&Rgba8::new_opaque(9, 9, 9));
        pf.blend_solid_hspan(0, 0, &Rgba8::black(), &[255], CompOp::DstOut);
        assert_eq!(&pf.data()[..4], &[0, 0, 0, 0]);
        assert_eq!(&pf.data()[4..], &[9, 9, 9, 255]);
    }
}
