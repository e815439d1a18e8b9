//! Unpacked scanline container.
//!
//! Stores one coverage byte per pixel; spans reference runs of that array.

use crate::rasterizer_scanline_aa::Scanline;

/// A horizontal run within a scanline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScanlineSpan {
    pub x: i32,
    pub len: i32,
    pub cover_offset: usize,
}

/// Unpacked scanline with per-pixel u8 coverage.
///
/// Spans are appended left to right; adjacent runs are merged.
#[derive(Debug, Clone, Default)]
pub struct ScanlineU8 {
    y_val: i32,
    covers: Vec<u8>,
    spans: Vec<ScanlineSpan>,
    next_x: Option<i32>,
}

impl ScanlineU8 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> &[ScanlineSpan] {
        &self.spans
    }

    /// Coverage bytes of one span.
    pub fn span_covers(&self, span: &ScanlineSpan) -> &[u8] {
        &self.covers[span.cover_offset..span.cover_offset + span.len as usize]
    }

    fn push_run(&mut self, x: i32, len: usize) {
        match self.spans.last_mut() {
            Some(last) if self.next_x == Some(x) => last.len += len as i32,
            _ => self.spans.push(ScanlineSpan {
                x,
                len: len as i32,
                cover_offset: self.covers.len() - len,
            }),
        }
        self.next_x = Some(x + len as i32);
    }
}

impl Scanline for ScanlineU8 {
    fn reset_spans(&mut self) {
        self.covers.clear();
        self.spans.clear();
        self.next_x = None;
    }

    fn add_cell(&mut self, x: i32, cover: u32) {
        self.covers.push(cover.min(255) as u8);
        self.push_run(x, 1);
    }

    fn add_span(&mut self, x: i32, len: u32, cover: u32) {
        let len = len as usize;
        self.covers
            .extend(std::iter::repeat(cover.min(255) as u8).take(len));
        self.push_run(x, len);
    }

    fn finalize(&mut self, y: i32) {
        self.y_val = y;
    }

    fn num_spans(&self) -> u32 {
        self.spans.len() as u32
    }

    fn y(&self) -> i32 {
        self.y_val
    }
}
