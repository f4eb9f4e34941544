//! Network API client

use serde::Deserialize;
use tracing::debug;

use crate::api::client::RemoteClient;
use crate::errors::ConsoleError;
use crate::models::network::Network;

/// Network listing response
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkListResponse {
    pub networks: Vec<Network>,
}

impl RemoteClient {
    /// List networks available to the tenant. Returns None when the network
    /// service is not deployed, which the create form renders as a single
    /// "Unavailable" choice.
    pub async fn list_networks(&self, tenant: &str) -> Result<Option<Vec<Network>>, ConsoleError> {
        match self.get::<NetworkListResponse>("/networks", tenant).await {
            Ok(response) => Ok(Some(response.networks)),
            Err(ConsoleError::NotFound(_)) => {
                debug!("Network service unavailable for tenant {}", tenant);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
