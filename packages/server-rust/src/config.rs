//! Process configuration from command-line flags and environment variables.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::network::{NetworkConfig, PlaygroundAccess};

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Local work; the sandbox page is served.
    Development,
    /// Deployed; the sandbox page needs `ALLOW_PLAYGROUND`.
    Production,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// `usergraph-server` configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "usergraph-server",
    version,
    about = "GraphQL user API with per-request auth context"
)]
pub struct ServerConfig {
    /// Bind address.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port.
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Allowed CORS origins, comma separated. `*` allows any origin.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// How long shutdown waits for in-flight operations, in seconds.
    #[arg(long, env = "DRAIN_TIMEOUT_SECS", default_value_t = 30)]
    pub drain_timeout_secs: u64,

    /// Deployment environment.
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Serve the sandbox page even in production.
    #[arg(long, env = "ALLOW_PLAYGROUND")]
    pub allow_playground: bool,

    /// HS256 secret; enables signed bearer tokens alongside the development tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Log line format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Transport settings derived from this configuration.
    #[must_use]
    pub fn network(&self) -> NetworkConfig {
        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            drain_timeout: Duration::from_secs(self.drain_timeout_secs),
            playground: PlaygroundAccess::resolve(
                self.environment == Environment::Production,
                self.allow_playground,
            ),
        }
    }
}
