// src/config/logging.rs
// DOCUMENTATION: Logger initialization
// PURPOSE: Route the `log` facade to env_logger using the configured level

use super::Config;

/// Initialize env_logger
/// DOCUMENTATION: RUST_LOG wins when set; otherwise LOG_LEVEL from config is used.
/// Safe to call more than once (later calls are no-ops).
pub fn init_logging(config: &Config) {
    let default_filter = if config.log_level.is_empty() {
        "info,reqwest=warn"
    } else {
        config.log_level.as_str()
    };

    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
