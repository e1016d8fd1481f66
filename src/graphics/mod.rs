pub mod blend;
pub mod draw;
pub mod gradient;
pub mod sprite;

use blend::{Argb, Blend};
use gradient::LinearGradient;

use crate::field::surface::BackgroundStyle;

pub const COLOR_BLACK: Argb = 0xFF_00_00_00;

/// Software framebuffer the bubbles are painted into.
///
/// The backdrop is rendered once and copied in at the start of
/// every frame.
pub struct Canvas {
    buffer: Vec<Argb>,
    backdrop: Vec<Argb>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![COLOR_BLACK; w * h],
            backdrop: vec![COLOR_BLACK; w * h],
            width: w,
            height: h,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn sizeu(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel(&self, i: usize) -> Argb {
        self.buffer[i]
    }

    pub fn pixel_xy(&self, x: usize, y: usize) -> Option<Argb> {
        if x >= self.width {
            return None;
        }

        self.buffer.get(y * self.width + x).copied()
    }

    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer
    }

    pub fn paint_backdrop(&mut self, style: &BackgroundStyle) {
        LinearGradient::from_style(self.width, self.height, style)
            .fill(&mut self.backdrop, self.width);
    }

    pub fn begin_frame(&mut self) {
        self.buffer.copy_from_slice(&self.backdrop);
    }

    /// Writes the canvas into `dest`, a `dest_width` wide `0RGB`
    /// surface, upscaled by `scale`. Whatever does not fit is cut
    /// off, uncovered parts of `dest` are cleared.
    pub fn scale_to(&self, scale: usize, dest: &mut [Argb], dest_width: usize) {
        if dest_width == 0 || scale == 0 {
            return;
        }

        for (y, dst_row) in dest.chunks_exact_mut(dest_width).enumerate() {
            let src_y = y / scale;

            let Some(src_row) = self
                .buffer
                .get(src_y * self.width..(src_y + 1) * self.width)
            else {
                dst_row.fill(0);
                continue;
            };

            for (x, dst) in dst_row.iter_mut().enumerate() {
                *dst = src_row.get(x / scale).map_or(0, |p| p.opaque_rgb());
            }
        }
    }
}
