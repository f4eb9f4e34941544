//! Environment API client

use crate::api::client::RemoteClient;
use crate::errors::ConsoleError;
use crate::models::environment::{Environment, EnvironmentCreate, EnvironmentUpdate};

impl RemoteClient {
    /// Fetch an environment record by ID
    pub async fn environment_get(
        &self,
        tenant: &str,
        environment_id: &str,
    ) -> Result<Environment, ConsoleError> {
        let path = format!("/environments/{}", environment_id);
        self.get(&path, tenant).await
    }

    /// Create a new environment
    pub async fn environment_create(
        &self,
        tenant: &str,
        payload: &EnvironmentCreate,
    ) -> Result<Environment, ConsoleError> {
        self.post("/environments", tenant, payload).await
    }

    /// Rename an existing environment
    pub async fn environment_update(
        &self,
        tenant: &str,
        environment_id: &str,
        name: &str,
    ) -> Result<Environment, ConsoleError> {
        let path = format!("/environments/{}", environment_id);
        let payload = EnvironmentUpdate {
            name: name.to_string(),
        };
        self.put(&path, tenant, &payload).await
    }

    /// Fetch the raw environment object model as serialized by the remote
    /// service, without reshaping it
    pub async fn load_environment_data(
        &self,
        tenant: &str,
        environment_id: &str,
    ) -> Result<String, ConsoleError> {
        let path = format!("/environments/{}/model", environment_id);
        self.get_raw(&path, tenant).await
    }
}
