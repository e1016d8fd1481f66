#[cfg(feature = "terminal")]
pub mod console_mode;

pub mod windowed_mode;

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Mode {
    Win,
    ConAscii,
    ConBlock,
}

impl Mode {
    pub fn get_name(&self) -> &'static str {
        match self {
            Mode::Win => "window",
            Mode::ConAscii => "ascii",
            Mode::ConBlock => "block",
        }
    }
}
