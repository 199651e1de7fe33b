use auvra_core::storage::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. AUVRA_LOG wins over the configured level.
/// Logs go to stderr so stdout stays parseable.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env("AUVRA_LOG")
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
