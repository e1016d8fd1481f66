//! Production display side of the simulation.

use std::time::Duration;

use super::{blend::Argb, Canvas};
use crate::{
    field::surface::{BackgroundStyle, BubbleLook, Container, Renderable},
    math::{ease::EASE, lerp, Vec2},
};

/// A value moving from `from` to `to` along the CSS `ease` curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl Transition {
    pub fn settled(value: f32, duration: Duration) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: duration,
            duration,
        }
    }

    pub fn value(&self) -> f32 {
        if self.elapsed >= self.duration {
            return self.to;
        }

        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        lerp(self.from, self.to, EASE.apply(t))
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_running(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Restarts towards `to` from wherever the value currently is.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

#[derive(Debug, Clone)]
pub struct Sprite {
    pos: Vec2<f32>,
    size: Transition,
    color: Argb,
    opacity: f32,
    blur: f32,
}

impl Sprite {
    pub fn new(look: &BubbleLook) -> Self {
        Self {
            pos: look.position,
            size: Transition::settled(look.size, look.transition),
            color: look.color,
            opacity: look.opacity,
            blur: look.blur,
        }
    }

    pub fn update(&mut self, dt: Duration) {
        self.size.tick(dt);
    }

    pub fn position(&self) -> Vec2<f32> {
        self.pos
    }

    pub fn displayed_size(&self) -> f32 {
        self.size.value()
    }

    /// The box grows from its top-left corner, so the circle's
    /// center moves with the displayed size.
    pub fn center(&self) -> Vec2<f32> {
        self.pos + Vec2::splat(self.displayed_size() / 2.0)
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.draw_soft_circle(
            self.center(),
            self.displayed_size() / 2.0,
            self.blur,
            self.color,
            self.opacity,
        );
    }
}

impl Renderable for Sprite {
    fn set_position(&mut self, pos: Vec2<f32>) {
        self.pos = pos;
    }

    fn set_size(&mut self, size: f32) {
        self.size.retarget(size);
    }
}

/// Full-window container the field is laid out in.
pub struct Stage {
    extent: Vec2<f32>,
    background: Option<BackgroundStyle>,
}

impl Stage {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            extent: Vec2::new(w as f32, h as f32),
            background: None,
        }
    }

    pub fn background(&self) -> Option<&BackgroundStyle> {
        self.background.as_ref()
    }
}

impl Container for Stage {
    type Sprite = Sprite;

    fn extent(&self) -> Vec2<f32> {
        self.extent
    }

    fn apply_background(&mut self, style: &BackgroundStyle) {
        self.background = Some(style.clone());
    }

    fn spawn(&mut self, look: &BubbleLook) -> Sprite {
        Sprite::new(look)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn look(size: f32) -> BubbleLook {
        BubbleLook::new(Vec2::new(10.0, 20.0), size, 0xFF_4E_CD_C4)
    }

    #[test]
    fn new_sprite_shows_its_initial_size() {
        let sprite = Sprite::new(&look(80.0));

        assert_eq!(sprite.displayed_size(), 80.0);
        assert_eq!(sprite.center(), Vec2::new(50.0, 60.0));
    }

    #[test]
    fn size_changes_take_the_transition_time() {
        let mut sprite = Sprite::new(&look(100.0));
        sprite.set_size(50.0);

        assert_eq!(sprite.displayed_size(), 100.0);

        sprite.update(ms(1000));
        let halfway = sprite.displayed_size();
        assert!(halfway < 100.0 && halfway > 50.0, "{halfway}");

        sprite.update(ms(1000));
        assert_eq!(sprite.displayed_size(), 50.0);
    }

    #[test]
    fn retarget_starts_from_displayed_value() {
        let mut t = Transition::settled(100.0, ms(2000));

        t.retarget(0.0);
        t.tick(ms(1000));
        let mid = t.value();

        t.retarget(200.0);
        assert_eq!(t.value(), mid);
        assert!(t.is_running());
        assert_eq!(t.target(), 200.0);
    }

    #[test]
    fn position_is_immediate() {
        let mut sprite = Sprite::new(&look(40.0));
        sprite.set_position(Vec2::new(3.0, 4.0));

        assert_eq!(sprite.position(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn stage_remembers_background() {
        let mut stage = Stage::new(320, 200);
        assert!(stage.background().is_none());

        stage.apply_background(&BackgroundStyle::default());

        assert_eq!(stage.background(), Some(&BackgroundStyle::default()));
        assert_eq!(stage.extent(), Vec2::new(320.0, 200.0));
    }

    #[test]
    fn drawing_paints_inside_the_box() {
        let mut canvas = Canvas::new(64, 64);
        let sprite = Sprite::new(&BubbleLook::new(Vec2::new(16.0, 16.0), 32.0, 0xFF_FF_FF_FF));

        sprite.draw(&mut canvas);

        assert_ne!(canvas.pixel_xy(32, 32), Some(crate::graphics::COLOR_BLACK));
        assert_eq!(canvas.pixel_xy(2, 2), Some(crate::graphics::COLOR_BLACK));
    }
}
