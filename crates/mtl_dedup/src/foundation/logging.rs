//! Logging setup for front ends

/// Initialize logging with an explicit default level
///
/// Per-module directives in `RUST_LOG` are still honored.
pub fn init_with_level(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
