use std::collections::HashMap;
use tracing::Level;

/// Per-scope log filtering, parsed from strings like `"warn,teleport=debug"`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    global_level: Level,
    scope_levels: HashMap<String, Level>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            global_level: Level::WARN,
            scope_levels: HashMap::new(),
        }
    }

    pub fn from_env(env_var_name: &str) -> Self {
        match std::env::var(env_var_name) {
            Ok(spec) => Self::parse(&spec),
            Err(_) => Self::new(),
        }
    }

    pub fn parse(spec: &str) -> Self {
        let mut config = Self::new();

        for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((scope, level)) => {
                    if let Some(level) = parse_level(level) {
                        config.scope_levels.insert(scope.trim().to_string(), level);
                    }
                }
                None => {
                    if let Some(level) = parse_level(directive) {
                        config.global_level = level;
                    }
                }
            }
        }

        config
    }

    pub fn should_log(&self, scope: &str, level: Level) -> bool {
        let target_level = self.scope_levels.get(scope).unwrap_or(&self.global_level);
        level <= *target_level
    }

    pub fn global_level(&self) -> Level {
        self.global_level
    }

    pub fn scope_level(&self, scope: &str) -> Option<Level> {
        self.scope_levels.get(scope).copied()
    }

    pub fn set_global_level(&mut self, level: Level) {
        self.global_level = level;
    }

    pub fn set_scope_level(&mut self, scope: impl Into<String>, level: Level) {
        self.scope_levels.insert(scope.into(), level);
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Initialize logging, reading scope levels from `env_var_name`
/// (e.g. `VRDEMO_LOG=warn,teleport=debug`). The `RUST_LOG` filter still
/// controls what the subscriber itself lets through.
pub fn init_logging(env_var_name: &str) -> LogConfig {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
        )
        .try_init();

    let config = LogConfig::from_env(env_var_name);
    if !super::set_log_config(config.clone()) {
        tracing::debug!("log config already installed, keeping the first one");
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_level() {
        let config = LogConfig::parse("debug");
        assert_eq!(config.global_level(), Level::DEBUG);
    }

    #[test]
    fn test_parse_scope_levels() {
        let config = LogConfig::parse("warn, teleport=debug,comfort=trace");

        assert_eq!(config.global_level(), Level::WARN);
        assert_eq!(config.scope_level("teleport"), Some(Level::DEBUG));
        assert_eq!(config.scope_level("comfort"), Some(Level::TRACE));
    }

    #[test]
    fn test_unknown_levels_are_ignored() {
        let config = LogConfig::parse("loud,teleport=verbose");
        assert_eq!(config.global_level(), Level::WARN);
        assert_eq!(config.scope_level("teleport"), None);
    }

    #[test]
    fn test_should_log() {
        let mut config = LogConfig::new();
        config.set_scope_level("teleport", Level::DEBUG);

        assert!(config.should_log("unknown", Level::ERROR));
        assert!(config.should_log("unknown", Level::WARN));
        assert!(!config.should_log("unknown", Level::INFO));

        assert!(config.should_log("teleport", Level::DEBUG));
        assert!(!config.should_log("teleport", Level::TRACE));
    }
}
