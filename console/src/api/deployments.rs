//! Deployment API client

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::client::RemoteClient;
use crate::errors::ConsoleError;
use crate::models::deployment::{Deployment, DeploymentLog};

/// List of deployment logs response
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentLogsResponse {
    pub logs: Vec<DeploymentLog>,
}

impl RemoteClient {
    /// Fetch a deployment descriptor
    pub async fn deployment_get(
        &self,
        tenant: &str,
        environment_id: &str,
        deployment_id: &str,
    ) -> Result<Deployment, ConsoleError> {
        let path = format!(
            "/environments/{}/deployments/{}",
            environment_id, deployment_id
        );
        self.get(&path, tenant).await
    }

    /// Fetch the log entries for a deployment
    pub async fn deployment_logs(
        &self,
        tenant: &str,
        environment_id: &str,
        deployment_id: &str,
    ) -> Result<Vec<DeploymentLog>, ConsoleError> {
        let path = format!(
            "/environments/{}/deployments/{}/logs",
            environment_id, deployment_id
        );
        let response: DeploymentLogsResponse = self.get(&path, tenant).await?;
        Ok(response.logs)
    }

    /// Fetch the start time of a deployment
    pub async fn deployment_start(
        &self,
        tenant: &str,
        environment_id: &str,
        deployment_id: &str,
    ) -> Result<DateTime<Utc>, ConsoleError> {
        let deployment = self
            .deployment_get(tenant, environment_id, deployment_id)
            .await?;
        Ok(deployment.started_at)
    }
}
