use crate::{field::surface::BackgroundStyle, math::Vec2};

use super::blend::{lerp_argb, Argb};

/// Two stop linear gradient laid out the way CSS `linear-gradient`
/// does it: the gradient line runs through the center at `angle`
/// and is just long enough for the corners to hit the end stops.
#[derive(Debug, Clone, Copy)]
pub struct LinearGradient {
    dir: Vec2<f32>,
    half: Vec2<f32>,
    length: f32,
    color_a: Argb,
    color_b: Argb,
}

impl LinearGradient {
    pub fn new(width: usize, height: usize, angle_deg: f32, color_a: Argb, color_b: Argb) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();

        // 0deg points up, y grows downwards.
        let dir = Vec2::new(s, -c);

        let (w, h) = (width as f32, height as f32);

        Self {
            dir,
            half: Vec2::new(w, h).center(),
            length: (w * s).abs() + (h * c).abs(),
            color_a,
            color_b,
        }
    }

    pub fn from_style(width: usize, height: usize, style: &BackgroundStyle) -> Self {
        Self::new(width, height, style.angle_deg, style.from, style.to)
    }

    /// Color at pixel `(x, y)`, sampled at the pixel's center.
    pub fn sample(&self, x: usize, y: usize) -> Argb {
        let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - self.half;

        let t = if self.length > 0.0 {
            p.dot(self.dir) / self.length + 0.5
        } else {
            0.0
        };

        lerp_argb(self.color_a, self.color_b, t)
    }

    pub fn fill(&self, buffer: &mut [Argb], width: usize) {
        if width == 0 {
            return;
        }

        for (y, row) in buffer.chunks_exact_mut(width).enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = self.sample(x, y);
            }
        }
    }
}
