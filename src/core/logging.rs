//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info` and millisecond
/// timestamps, so long generation runs can be timed from the log alone.
/// Override the filter with the RUST_LOG environment variable.
///
/// # Example
/// ```no_run
/// brushforge::core::logging::init();
/// log::info!("Generator started");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();
}
