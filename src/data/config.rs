use tracing::Level;

use crate::{field::DEFAULT_BUBBLE_COUNT, modes::Mode};

pub const DEFAULT_SIZE_WIN: (u16, u16) = (960, 600);
pub const DEFAULT_WIN_SCALE: u8 = 1;

/// Startup settings gathered from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: Mode,
    /// Canvas size in pixels, before window scaling.
    pub size: (u16, u16),
    pub scale: u8,
    /// Locked refresh rate. `None` follows the monitor.
    pub milli_hz: Option<u32>,
    pub count: usize,
    pub seed: Option<u64>,
    pub log_level: Level,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Win,
            size: DEFAULT_SIZE_WIN,
            scale: DEFAULT_WIN_SCALE,
            milli_hz: None,
            count: DEFAULT_BUBBLE_COUNT,
            seed: None,
            log_level: Level::INFO,
            help: false,
        }
    }
}
