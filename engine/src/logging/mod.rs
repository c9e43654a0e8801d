//! Scoped logging on top of `tracing`.
//!
//! Each subsystem logs under a scope name (`teleport`, `locomotion`,
//! `comfort`, `physics`, `input`, `profile`) and the active [`LogConfig`]
//! decides per scope whether an event is emitted at all.

pub mod config;
pub mod macros;

pub use config::{init_logging, LogConfig};
pub use tracing;
pub use tracing::{debug, error, info, trace, warn, Level};

use once_cell::sync::Lazy;
use std::sync::OnceLock;

static LOG_CONFIG: OnceLock<LogConfig> = OnceLock::new();
static DEFAULT_CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::default);

/// The installed config, or the default (`warn` everywhere) before
/// [`init_logging`] runs.
pub fn get_log_config() -> &'static LogConfig {
    LOG_CONFIG.get().unwrap_or(&DEFAULT_CONFIG)
}

/// Install `config` unless one is already installed. Returns whether it was.
pub(crate) fn set_log_config(config: LogConfig) -> bool {
    LOG_CONFIG.set(config).is_ok()
}
