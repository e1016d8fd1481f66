pub mod config;
pub mod delta;
pub mod log;
pub mod reader;

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::{
    field::{BubbleField, FieldParams},
    graphics::{
        sprite::{Sprite, Stage},
        Canvas,
    },
    modes::Mode,
};

pub use config::Config;
use delta::Delta;

pub const DEFAULT_MILLI_HZ: u32 = 60 * 1000;
pub const CAP_MILLI_HZ: u32 = 240 * 1000;

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum RefreshRateMode {
    /// Follow the monitor.
    Sync,
    /// Locked with `--fps`.
    Specified,
}

/// Main program struct. Owns the canvas, the stage the field is laid
/// out on, the field itself and frame timing.
pub struct Program {
    pub pix: Canvas,

    stage: Stage,
    field: BubbleField<Sprite>,
    delta: Delta,

    mode: Mode,
    scale: u8,
    seed: u64,

    milli_hz: u32,
    refresh_rate_mode: RefreshRateMode,
    refresh_rate: Duration,
}

impl Program {
    pub fn new(config: &Config) -> Self {
        let (w, h) = (config.size.0 as usize, config.size.1 as usize);

        let seed = config.seed.unwrap_or_else(rand::random);

        let params = FieldParams {
            count: config.count,
            ..FieldParams::default()
        };

        let mut stage = Stage::new(w, h);
        let field = BubbleField::init(&mut stage, params, StdRng::seed_from_u64(seed));

        let mut pix = Canvas::new(w, h);
        if let Some(style) = stage.background() {
            pix.paint_backdrop(style);
        }
        pix.begin_frame();

        let (milli_hz, refresh_rate_mode) = match config.milli_hz {
            Some(milli_hz) => (milli_hz, RefreshRateMode::Specified),
            None => (DEFAULT_MILLI_HZ, RefreshRateMode::Sync),
        };

        let mut prog = Self {
            pix,
            stage,
            field,
            delta: Delta::new(),
            mode: config.mode,
            scale: config.scale.max(1),
            seed,
            milli_hz,
            refresh_rate_mode,
            refresh_rate: Duration::ZERO,
        };

        prog.change_fps_frac(milli_hz);
        prog
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn field(&self) -> &BubbleField<Sprite> {
        &self.field
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn get_milli_hz(&self) -> u32 {
        self.milli_hz
    }

    pub fn get_rr_mode(&self) -> RefreshRateMode {
        self.refresh_rate_mode
    }

    pub fn get_rr_interval(&self) -> Duration {
        self.refresh_rate
    }

    pub fn change_fps_frac(&mut self, milli_hz: u32) {
        let milli_hz = milli_hz.clamp(1, CAP_MILLI_HZ);
        let rate = 1_000_000_000 / milli_hz as u64;

        self.milli_hz = milli_hz;
        self.refresh_rate = Duration::from_micros(rate);
    }

    /// Advances the simulation by the time since the last update.
    pub fn update(&mut self) {
        let dt = self.delta.tick();
        self.step(dt);
    }

    pub fn step(&mut self, dt: Duration) {
        self.field.advance(dt);

        for sprite in self.field.sprites_mut() {
            sprite.update(dt);
        }
    }

    pub fn render(&mut self) {
        self.pix.begin_frame();

        for sprite in self.field.sprites() {
            sprite.draw(&mut self.pix);
        }
    }

    pub fn print_startup_info(&self) {
        info!(
            mode = self.mode.get_name(),
            width = self.pix.width(),
            height = self.pix.height(),
            scale = self.scale,
            bubbles = self.field.len(),
            seed = self.seed,
            "starting bubblefield"
        );

        match self.refresh_rate_mode {
            RefreshRateMode::Specified => {
                info!(hz = self.milli_hz as f32 / 1000.0, "refresh rate locked")
            }
            RefreshRateMode::Sync => info!("refresh rate follows the monitor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> Config {
        Config {
            size: (200, 120),
            count: 5,
            seed: Some(seed),
            ..Config::default()
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = Program::new(&config(7));
        let b = Program::new(&config(7));

        let pos = |p: &Program| -> Vec<_> { p.field().bubbles().iter().map(|b| b.position()).collect() };

        assert_eq!(pos(&a), pos(&b));
        assert_eq!(a.field().len(), 5);
    }

    #[test]
    fn backdrop_is_painted_at_startup() {
        let prog = Program::new(&config(1));

        assert!(prog.stage().background().is_some());
        assert_ne!(prog.pix.pixel(0), crate::graphics::COLOR_BLACK);
    }

    #[test]
    fn fps_is_capped() {
        let mut prog = Program::new(&config(1));

        prog.change_fps_frac(1000 * 1000);
        assert_eq!(prog.get_milli_hz(), CAP_MILLI_HZ);

        prog.change_fps_frac(50 * 1000);
        assert_eq!(prog.get_rr_interval(), Duration::from_millis(20));
    }

    #[test]
    fn locked_rate_comes_from_config() {
        let prog = Program::new(&Config {
            milli_hz: Some(30 * 1000),
            ..config(1)
        });

        assert_eq!(prog.get_rr_mode(), RefreshRateMode::Specified);
        assert_eq!(prog.get_milli_hz(), 30 * 1000);
    }

    #[test]
    fn steps_move_the_clock_and_render_draws() {
        let mut prog = Program::new(&config(3));

        let backdrop = prog.pix.as_slice().to_vec();

        prog.step(Duration::from_millis(16));
        prog.render();

        assert_eq!(prog.field().now(), Duration::from_millis(16));
        assert_ne!(prog.pix.as_slice(), &backdrop[..]);
    }
}
