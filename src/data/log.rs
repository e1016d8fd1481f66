use tracing::Level;

/// Installs the global fmt subscriber. Log lines go to stderr so
/// they never interleave with terminal frames written to stdout.
pub fn init(level: Level) {
    let result = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    // Only fails when a subscriber is already installed.
    if result.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}
