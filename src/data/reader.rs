use std::str::FromStr;

use tracing::Level;

use crate::{data::Config, error::ArgError, modes::Mode};

pub const USAGE: &str = "\
Usage: bubblefield [options]

Options:
    --win              draw into a window (default)
    --block            draw into the terminal with half blocks
    --ascii            draw into the terminal with ASCII art
    --size WxH         canvas size in pixels (default 960x600)
    --scale N          integer window upscaling (default 1)
    --fps F            lock the refresh rate to F hz
    --count N          number of bubbles (default 30)
    --seed N           seed the random source
    --verbose          log collisions and resize timers
    --quiet            only log warnings and errors
    --help             print this message
";

fn value<'a>(
    args: &mut dyn Iterator<Item = &'a String>,
    option: &'static str,
) -> Result<&'a String, ArgError> {
    args.next().ok_or(ArgError::MissingValue(option))
}

fn parse<T: FromStr>(string: &str, option: &'static str) -> Result<T, ArgError> {
    string.parse::<T>().map_err(|_| ArgError::InvalidValue {
        option,
        value: string.to_string(),
    })
}

fn parse_size(string: &str) -> Result<(u16, u16), ArgError> {
    let invalid = || ArgError::InvalidValue {
        option: "--size",
        value: string.to_string(),
    };

    let (w, h) = string.split_once('x').ok_or_else(invalid)?;
    let (w, h) = (parse::<u16>(w, "--size")?, parse::<u16>(h, "--size")?);

    if w == 0 || h == 0 {
        return Err(invalid());
    }

    Ok((w, h))
}

impl Config {
    /// Reads the command line. The first item is the program name.
    pub fn eval_args<'a>(args: &mut dyn Iterator<Item = &'a String>) -> Result<Config, ArgError> {
        let mut config = Config::default();

        args.next();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--win" => config.mode = Mode::Win,

                #[cfg(feature = "terminal")]
                "--block" => config.mode = Mode::ConBlock,

                #[cfg(feature = "terminal")]
                "--ascii" => config.mode = Mode::ConAscii,

                #[cfg(not(feature = "terminal"))]
                "--block" | "--ascii" => {
                    return Err(ArgError::FeatureDisabled {
                        option: arg.clone(),
                        feature: "terminal",
                    })
                }

                "--size" => config.size = parse_size(value(args, "--size")?)?,

                "--scale" => {
                    let string = value(args, "--scale")?;
                    let scale = parse::<u8>(string, "--scale")?;

                    if scale == 0 {
                        return Err(ArgError::InvalidValue {
                            option: "--scale",
                            value: string.clone(),
                        });
                    }

                    config.scale = scale;
                }

                "--fps" => {
                    let string = value(args, "--fps")?;
                    let rate = parse::<f64>(string, "--fps")?;

                    if !rate.is_finite() || rate <= 0.0 {
                        return Err(ArgError::InvalidValue {
                            option: "--fps",
                            value: string.clone(),
                        });
                    }

                    config.milli_hz = Some(((rate * 1000.0).round() as u32).max(1));
                }

                "--count" => config.count = parse(value(args, "--count")?, "--count")?,

                "--seed" => config.seed = Some(parse(value(args, "--seed")?, "--seed")?),

                "--verbose" => config.log_level = Level::DEBUG,

                "--quiet" => config.log_level = Level::WARN,

                "--help" | "-h" => config.help = true,

                _ => return Err(ArgError::UnknownOption(arg.clone())),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(line: &str) -> Result<Config, ArgError> {
        let args: Vec<String> = std::iter::once("bubblefield")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect();

        Config::eval_args(&mut args.iter())
    }

    #[test]
    fn no_arguments_gives_defaults() {
        assert_eq!(eval(""), Ok(Config::default()));
    }

    #[test]
    fn reads_every_value() {
        let config = eval("--size 320x200 --scale 3 --fps 59.94 --count 12 --seed 42 --quiet")
            .unwrap();

        assert_eq!(config.size, (320, 200));
        assert_eq!(config.scale, 3);
        assert_eq!(config.milli_hz, Some(59940));
        assert_eq!(config.count, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, Level::WARN);
        assert!(!config.help);
    }

    #[test]
    fn missing_value() {
        assert_eq!(eval("--count"), Err(ArgError::MissingValue("--count")));
    }

    #[test]
    fn malformed_values() {
        assert!(matches!(
            eval("--size 320"),
            Err(ArgError::InvalidValue { option: "--size", .. })
        ));
        assert!(matches!(
            eval("--size 0x10"),
            Err(ArgError::InvalidValue { option: "--size", .. })
        ));
        assert!(matches!(
            eval("--scale 0"),
            Err(ArgError::InvalidValue { option: "--scale", .. })
        ));
        assert!(matches!(
            eval("--fps -3"),
            Err(ArgError::InvalidValue { option: "--fps", .. })
        ));
        assert!(matches!(
            eval("--seed banana"),
            Err(ArgError::InvalidValue { option: "--seed", .. })
        ));
    }

    #[test]
    fn unknown_option() {
        assert_eq!(
            eval("--vis spectrum"),
            Err(ArgError::UnknownOption("--vis".into()))
        );
    }

    #[cfg(feature = "terminal")]
    #[test]
    fn terminal_modes() {
        assert_eq!(eval("--block").unwrap().mode, Mode::ConBlock);
        assert_eq!(eval("--block --ascii").unwrap().mode, Mode::ConAscii);
    }

    #[cfg(not(feature = "terminal"))]
    #[test]
    fn terminal_modes_need_the_feature() {
        assert!(matches!(
            eval("--ascii"),
            Err(ArgError::FeatureDisabled { feature: "terminal", .. })
        ));
    }

    #[test]
    fn help_flag() {
        assert!(eval("--count 3 --help").unwrap().help);
        assert!(USAGE.contains("--count"));
    }
}
