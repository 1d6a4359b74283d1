use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// `RUST_LOG` can still refine individual modules; the level given here is
/// the default filter. Calling this twice keeps the first logger.
pub fn init_logger(level: LevelFilter) {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .try_init();
}
