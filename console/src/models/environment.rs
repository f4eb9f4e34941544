//! Environment models

use serde::{Deserialize, Serialize};

/// An environment record managed by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Unique environment ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Owning tenant ID
    pub tenant_id: String,
}

/// Payload for creating a new environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentCreate {
    /// Desired environment name
    pub name: String,

    /// Join-existing-network fragment, present only when the user picked
    /// an existing network in the create form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_network: Option<JoinExistingNetwork>,
}

/// Instruction for the remote service to join an existing network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinExistingNetwork {
    /// Network ID to join
    pub network_id: String,
}

/// Payload for renaming an environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentUpdate {
    /// New environment name
    pub name: String,
}
