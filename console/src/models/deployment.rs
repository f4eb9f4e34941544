//! Deployment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deployment descriptor produced by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    /// Unique deployment ID
    pub id: String,

    /// Parent environment ID
    pub environment_id: String,

    /// Deployment start time
    pub started_at: DateTime<Utc>,

    /// Current state reported by the remote service
    pub state: String,
}

/// A log entry attached to a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentLog {
    /// Entry timestamp
    pub timestamp: DateTime<Utc>,

    /// Log level: 'info', 'warn', 'error', 'debug'
    pub level: String,

    /// Log message
    pub message: String,
}
