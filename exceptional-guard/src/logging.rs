//! Logging utilities and configuration for exceptional-guard.
//!
//! Rejections inside checked operations are emitted at `debug` with the
//! `kind`, `method`, `param` and `value` fields. Graft operations open an
//! `augment`/`unaugment` span and report a summary at `info`. [`LogConfig`]
//! controls how much of that a [`GraftManager`](crate::core::GraftManager)
//! emits.

use tracing::Level;

/// Default bound for logged offending values.
pub const DEFAULT_MAX_FIELD_LENGTH: usize = 256;

/// Logging configuration for the graft manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Base log level for exceptional-guard components
    pub base_level: Level,
    /// Whether grafted members log the failures they return
    pub log_rule_failures: bool,
    /// Whether each installed or removed member is logged
    pub log_graft_details: bool,
    /// Maximum length for logged field values
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_rule_failures: false,
            log_graft_details: true,
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_rule_failures: true,
            log_graft_details: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_rule_failures: false,
            log_graft_details: false,
            max_field_length: 128,
        }
    }

    /// Creates a balanced configuration suitable for most use cases.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Returns true when `level` is at or above the configured verbosity.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.base_level
    }
}

/// Debug logging that only formats its arguments when the configured base
/// level admits `DEBUG`.
#[macro_export]
macro_rules! perf_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}

/// Per-member graft logging.
#[macro_export]
macro_rules! log_graft {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_graft_details {
            tracing::debug!($($arg)*);
        }
    };
}

/// Truncates a string to at most `max_length` chars.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((end, _)) => format!("{}...(truncated)", &value[..end]),
    }
}

/// Utilities for setting up structured logging.
pub mod setup {
    use tracing::Level;

    /// Configuration for subscriber setup.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for exceptional-guard specifically
        pub guard_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                guard_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            match &self.env_filter {
                Some(filter) => filter.clone(),
                None => format!(
                    "{},exceptional_guard={}",
                    self.level.as_str().to_lowercase(),
                    self.guard_level.as_str().to_lowercase()
                ),
            }
        }
    }

    /// Installs a global subscriber. `RUST_LOG` overrides the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use exceptional_guard::logging::setup::{init_logging, LoggingConfig};
    ///
    /// let config = LoggingConfig::default().with_json_format(true);
    /// init_logging(config).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::setup::LoggingConfig;
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.base_level, Level::INFO);
        assert!(!config.log_rule_failures);
        assert!(config.log_graft_details);
        assert_eq!(config.max_field_length, 256);
        assert_eq!(LogConfig::balanced(), config);
    }

    #[test]
    fn test_log_config_presets() {
        let verbose = LogConfig::verbose();
        assert!(verbose.enabled(Level::DEBUG));
        assert!(verbose.log_rule_failures);

        let production = LogConfig::production();
        assert!(production.enabled(Level::WARN));
        assert!(!production.enabled(Level::INFO));
        assert!(!production.log_graft_details);
    }

    #[test]
    fn test_truncate_field() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(
            truncate_field("this is a very long text that should be truncated", 10),
            "this is a ...(truncated)"
        );
        assert_eq!(truncate_field("héllo", 2), "hé...(truncated)");
    }

    #[test]
    fn test_env_filter() {
        assert_eq!(
            LoggingConfig::default().env_filter(),
            "info,exceptional_guard=debug"
        );
        assert_eq!(
            LoggingConfig::default().with_env_filter("trace").env_filter(),
            "trace"
        );
    }

    #[test]
    fn test_init_logging_installs_once() {
        let config = LoggingConfig::default().with_json_format(true);
        let _ = setup::init_logging(config.clone());
        assert!(setup::init_logging(config).is_err());
    }
}
