mod data;
mod error;
mod field;
mod graphics;
mod math;
mod modes;

use std::process::ExitCode;

use tracing::error;

use data::{reader::USAGE, Config, Program};
use error::AppError;
use modes::{windowed_mode::winit_main, Mode};

fn run(config: Config) -> Result<(), AppError> {
    let prog = Program::new(&config);

    match config.mode {
        Mode::Win => winit_main(prog),

        #[cfg(feature = "terminal")]
        Mode::ConAscii | Mode::ConBlock => Ok(modes::console_mode::con_main(prog)?),

        #[cfg(not(feature = "terminal"))]
        Mode::ConAscii | Mode::ConBlock => winit_main(prog),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config = match Config::eval_args(&mut args.iter()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Argument error: {e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if config.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    data::log::init(config.log_level);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
