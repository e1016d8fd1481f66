//! Error types for the command line reader and the host loops.
//!
//! The simulation itself cannot fail.

use std::fmt;

/// Problems with the command line.
#[derive(Debug, PartialEq)]
pub enum ArgError {
    /// An option that takes a value was the last argument.
    MissingValue(&'static str),
    /// An option's value could not be parsed or is out of range.
    InvalidValue { option: &'static str, value: String },
    UnknownOption(String),
    /// The option needs a cargo feature this build was compiled without.
    FeatureDisabled { option: String, feature: &'static str },
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::MissingValue(option) => write!(f, "Expected a value for {}", option),
            ArgError::InvalidValue { option, value } => {
                write!(f, "Invalid value for {}: {:?}", option, value)
            }
            ArgError::UnknownOption(option) => write!(f, "Unknown option {}", option),
            ArgError::FeatureDisabled { option, feature } => write!(
                f,
                "{} needs the `{}` feature, which is turned off in this build. \
                 Recompile with `--features {}` to use it.",
                option, feature, feature
            ),
        }
    }
}

impl std::error::Error for ArgError {}

/// Fatal failures of the program.
#[derive(Debug)]
pub enum AppError {
    Args(ArgError),
    EventLoop(winit::error::EventLoopError),
    Window(winit::error::OsError),
    Surface(softbuffer::SoftBufferError),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Args(e) => write!(f, "Argument error: {}", e),
            AppError::EventLoop(e) => write!(f, "Event loop failed: {}", e),
            AppError::Window(e) => write!(f, "Failed to create window: {}", e),
            AppError::Surface(e) => write!(f, "Drawing surface failed: {}", e),
            AppError::Io(e) => write!(f, "Terminal I/O failed: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Args(e) => Some(e),
            AppError::EventLoop(e) => Some(e),
            AppError::Window(e) => Some(e),
            AppError::Surface(e) => Some(e),
            AppError::Io(e) => Some(e),
        }
    }
}

impl From<ArgError> for AppError {
    fn from(e: ArgError) -> Self {
        AppError::Args(e)
    }
}

impl From<winit::error::EventLoopError> for AppError {
    fn from(e: winit::error::EventLoopError) -> Self {
        AppError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for AppError {
    fn from(e: winit::error::OsError) -> Self {
        AppError::Window(e)
    }
}

impl From<softbuffer::SoftBufferError> for AppError {
    fn from(e: softbuffer::SoftBufferError) -> Self {
        AppError::Surface(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_message_names_the_feature() {
        let e = ArgError::FeatureDisabled {
            option: "--block".into(),
            feature: "terminal",
        };

        let msg = e.to_string();
        assert!(msg.contains("--block"));
        assert!(msg.contains("--features terminal"));
    }

    #[test]
    fn arg_errors_convert() {
        let e: AppError = ArgError::UnknownOption("--nope".into()).into();

        assert!(matches!(e, AppError::Args(ArgError::UnknownOption(_))));
        assert!(std::error::Error::source(&e).is_some());
    }
}
