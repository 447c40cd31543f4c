//! Configuration loading and constants.
//!
//! The service is configured from the process environment only. `AppConfig`
//! is the root configuration struct; it is read once at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;

use const_format::formatcp;

// =============================================================================
// Response Bodies
// =============================================================================

/// Body returned by `GET /`
pub const GREETING: &str = "Hello from Containerized Flask App on EC2!";

/// Body returned by `GET /health`
pub const HEALTH_OK: &str = "OK";

/// Cache-Control for liveness answers - never served from a cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

// =============================================================================
// Environment and Defaults
// =============================================================================

/// Environment variable holding the listen port
pub const PORT_ENV: &str = "PORT";

/// Environment variable selecting the log format
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Environment variable holding the log filter
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Listen on all interfaces
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Listen port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 80;

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str =
    formatcp!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl HttpServerConfig {
    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_ENV) {
            Some(value) => parse_port(&value)?,
            None => DEFAULT_PORT,
        };

        let format = match lookup(LOG_FORMAT_ENV) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            http: HttpServerConfig {
                port,
                ..Default::default()
            },
            logging: LoggingConfig { format },
        })
    }
}

/// Parses a `PORT` value. Surrounding whitespace is tolerated, nothing else.
fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|source| ConfigError::InvalidPort {
            value: value.to_string(),
            source,
        })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Invalid LOG_FORMAT value {0:?}: expected \"text\" or \"json\"")]
    InvalidLogFormat(String),
}
