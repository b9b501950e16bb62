//! Transport configuration for the HTTP server.

use std::time::Duration;

/// Top-level network configuration for the server.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address for the server.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Allowed CORS origins; `"*"` allows any.
    pub cors_origins: Vec<String>,
    /// Maximum time to wait for a request to complete.
    pub request_timeout: Duration,
    /// How long to wait for in-flight GraphQL requests after shutdown.
    pub drain_timeout: Duration,
    /// Whether the sandbox page is served.
    pub playground: PlaygroundAccess,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            drain_timeout: Duration::from_secs(30),
            playground: PlaygroundAccess::Enabled,
        }
    }
}

/// Whether the GraphQL sandbox page may be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaygroundAccess {
    /// The sandbox page is served.
    Enabled,
    /// Disabled because the server runs in production without an override.
    DisabledInProduction,
}

impl PlaygroundAccess {
    /// Production disables the playground unless explicitly allowed.
    #[must_use]
    pub fn resolve(production: bool, allow_override: bool) -> Self {
        if production && !allow_override {
            Self::DisabledInProduction
        } else {
            Self::Enabled
        }
    }
}
