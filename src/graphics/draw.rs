use super::{
    blend::{Argb, Blend},
    Canvas,
};
use crate::math::{smoothstep, Vec2};

impl Canvas {
    /// Filled circle whose edge fades out over a band `2 * blur`
    /// wide, centred on the nominal radius.
    pub fn draw_soft_circle(
        &mut self,
        center: Vec2<f32>,
        radius: f32,
        blur: f32,
        color: Argb,
        opacity: f32,
    ) {
        if radius <= 0.0 || opacity <= 0.0 || self.width == 0 {
            return;
        }

        let blur = blur.max(0.5);
        let outer = radius + blur;
        let inner = radius - blur;

        let x0 = (center.x - outer).floor().max(0.0) as usize;
        let y0 = (center.y - outer).floor().max(0.0) as usize;
        let x1 = ((center.x + outer).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((center.y + outer).ceil().max(0.0) as usize).min(self.height);

        let peak = opacity.clamp(0.0, 1.0) * 255.0;

        for y in y0..y1 {
            let row = y * self.width;
            let dy = y as f32 + 0.5 - center.y;

            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center.x;
                let d = dx.hypot(dy);

                if d >= outer {
                    continue;
                }

                let coverage = smoothstep(outer, inner, d);
                let alpha = (coverage * peak) as u8;

                if alpha == 0 {
                    continue;
                }

                let p = &mut self.buffer[row + x];
                *p = p.mix(color.set_alpha(alpha));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::COLOR_BLACK;

    fn red_on_black(radius: f32, blur: f32) -> Canvas {
        let mut canvas = Canvas::new(40, 40);
        canvas.draw_soft_circle(Vec2::new(20.0, 20.0), radius, blur, 0xFF_FF_00_00, 0.9);
        canvas
    }

    #[test]
    fn core_is_painted_at_given_opacity() {
        let canvas = red_on_black(10.0, 1.0);
        let [a, r, g, b] = canvas.pixel_xy(20, 20).unwrap().decompose();

        assert_eq!(a, 0xFF);
        assert!((0xE0..=0xE6).contains(&r), "{r:x}");
        assert_eq!((g, b), (0, 0));
    }

    #[test]
    fn outside_stays_untouched() {
        let canvas = red_on_black(10.0, 1.0);

        assert_eq!(canvas.pixel_xy(0, 0), Some(COLOR_BLACK));
        assert_eq!(canvas.pixel_xy(20, 33), Some(COLOR_BLACK));
    }

    #[test]
    fn edge_is_soft() {
        let canvas = red_on_black(10.0, 3.0);

        let red = |x| canvas.pixel_xy(x, 20).unwrap().decompose()[1];

        // Walking outwards from the center the red fades monotonically.
        let ramp: Vec<u8> = (20..36).map(red).collect();
        assert!(ramp.windows(2).all(|w| w[0] >= w[1]), "{ramp:?}");
        assert!(ramp.iter().any(|&r| r > 0 && r < 0xE0));
    }

    #[test]
    fn clipped_circle_does_not_panic() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_soft_circle(Vec2::new(-5.0, 12.0), 8.0, 3.0, 0xFF_00_FF_00, 1.0);
        canvas.draw_soft_circle(Vec2::new(500.0, 500.0), 8.0, 3.0, 0xFF_00_FF_00, 1.0);

        assert_eq!(canvas.pixel_xy(9, 0), Some(COLOR_BLACK));
    }
}
