//! Application configuration options

use std::time::Duration;

use crate::workers::sweeper;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Lifecycle configuration
    pub lifecycle: LifecycleOptions,

    /// Remote environment-management API base URL
    pub remote_base_url: String,

    /// Server configuration
    pub server: ServerOptions,

    /// Session configuration
    pub session: SessionOptions,

    /// Enable the session sweeper worker
    pub enable_sweeper: bool,

    /// Session sweeper options
    pub sweeper: sweeper::Options,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleOptions::default(),
            remote_base_url: "http://localhost:8082/v1".to_string(),
            server: ServerOptions::default(),
            session: SessionOptions::default(),
            enable_sweeper: true,
            sweeper: sweeper::Options::default(),
        }
    }
}

/// Lifecycle options for the console service
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// Maximum delay for graceful shutdown
    pub max_shutdown_delay: Duration,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            max_shutdown_delay: Duration::from_secs(30),
        }
    }
}

/// HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Session store options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Idle time after which a session expires
    pub ttl: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
        }
    }
}
