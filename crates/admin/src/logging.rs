//! Logging for the admin binary.
//!
//! Logs go to stderr so stdout carries only command output (seed summaries,
//! table counts).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Directives used when `RUST_LOG` is unset. sqlx statement logging is kept at
/// warn; every maintenance command would otherwise echo its SQL.
fn default_directives(level: &str) -> String {
    format!("{level},sqlx=warn")
}

pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_writer(std::io::stderr);

    match LogFormat::parse(&config.format).unwrap_or(LogFormat::Pretty) {
        LogFormat::Json => subscriber
            .with(layer.json().with_current_span(true).with_target(true))
            .init(),
        LogFormat::Pretty => subscriber.with(layer.pretty().with_target(false)).init(),
        LogFormat::Compact => subscriber.with(layer.compact().with_target(false)).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(LogFormat::parse("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("Pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("compact"), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn test_default_directives_quiet_sqlx() {
        let directives = default_directives("debug");
        assert_eq!(directives, "debug,sqlx=warn");
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
