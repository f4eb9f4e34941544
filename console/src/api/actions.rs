//! Action API client

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::api::client::RemoteClient;
use crate::errors::ConsoleError;
use crate::models::action::ActionResult;

/// Permission check response
#[derive(Debug, Clone, Deserialize)]
pub struct ActionAccessResponse {
    pub allowed: bool,
}

/// Action invocation response
#[derive(Debug, Clone, Deserialize)]
pub struct RunActionResponse {
    pub task_id: String,
}

impl RemoteClient {
    /// Check whether the tenant may run actions against an environment.
    /// Any transport or remote failure counts as "not allowed".
    pub async fn action_allowed(&self, tenant: &str, environment_id: &str) -> bool {
        let path = format!("/environments/{}/actions/access", environment_id);
        match self.get::<ActionAccessResponse>(&path, tenant).await {
            Ok(response) => response.allowed,
            Err(e) => {
                debug!(
                    "Action permission check failed for environment {}: {}",
                    environment_id, e
                );
                false
            }
        }
    }

    /// Invoke a named action, returning the task ID to poll
    pub async fn run_action(
        &self,
        tenant: &str,
        environment_id: &str,
        action_id: &str,
    ) -> Result<String, ConsoleError> {
        let path = format!("/environments/{}/actions/{}", environment_id, action_id);
        let response: RunActionResponse = self.post(&path, tenant, &Value::Null).await?;
        Ok(response.task_id)
    }

    /// Poll for an action result. The remote service answers with JSON null
    /// while the action is still running.
    pub async fn action_result(
        &self,
        tenant: &str,
        environment_id: &str,
        task_id: &str,
    ) -> Result<Option<ActionResult>, ConsoleError> {
        let path = format!(
            "/environments/{}/actions/{}/result",
            environment_id, task_id
        );
        let value: Value = self.get(&path, tenant).await?;
        Ok(ActionResult::from_value(value))
    }
}
