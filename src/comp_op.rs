//! Compositing operations on premultiplied RGBA8 pixels.
//!
//! Two SVG compositing modes cover everything the brushes and generators
//! need: `SrcOver` paints over existing content and `DstOut` removes it.
//! Both formulas operate on premultiplied channels with integer math, so an
//! opaque color at full coverage lands exactly and a full erase leaves
//! `(0, 0, 0, 0)`.

use crate::basics::CoverType;
use crate::color::Rgba8;

/// SVG compositing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompOp {
    /// `Dca' = Sca + Dca.(1 - Sa)`
    #[default]
    SrcOver,
    /// `Dca' = Dca.(1 - Sa)`
    DstOut,
}

impl CompOp {
    /// Blend a premultiplied source `src` into the premultiplied pixel `p`
    /// (4 bytes, RGBA) with anti-aliasing coverage `cover`.
    #[inline]
    pub fn blend(self, p: &mut [u8], src: [u8; 4], cover: CoverType) {
        if cover == 0 {
            return;
        }
        match self {
            CompOp::SrcOver => blend_src_over(p, src, cover),
            CompOp::DstOut => blend_dst_out(p, src[3], cover),
        }
    }
}

#[inline]
fn blend_src_over(p: &mut [u8], src: [u8; 4], cover: CoverType) {
    let s = if cover == 255 {
        src
    } else {
        src.map(|c| Rgba8::multiply(c, cover))
    };
    let s1a = 255 - s[3];
    if s1a == 0 {
        p[..4].copy_from_slice(&s);
        return;
    }
    for i in 0..4 {
        // Premultiplied: s[i] <= s[3], so the sum never exceeds 255.
        p[i] = s[i] + Rgba8::multiply(p[i], s1a);
    }
}

#[inline]
fn blend_dst_out(p: &mut [u8], sa: u8, cover: CoverType) {
    let s1a = 255 - Rgba8::multiply(sa, cover);
    for c in p[..4].iter_mut() {
        *c = Rgba8::multiply(*c, s1a);
    }
}
