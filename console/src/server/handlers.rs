//! HTTP request handlers for detail views and forms

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::errors::ConsoleError;
use crate::forms::environment::{
    build_network_choices, create_failure_message, edit_failure_message, CreateEnvironmentForm,
    CreateFormContext, EditEnvironmentForm,
};
use crate::models::deployment::{Deployment, DeploymentLog};
use crate::server::state::ServerState;
use crate::session::{FlashMessage, Session, SESSION_COOKIE};
use crate::utils::version_info;

/// Listing page the environment detail view falls back to
pub const ENVIRONMENTS_INDEX: &str = "/environments";

/// Listing page the deployment detail view falls back to
pub const DEPLOYMENTS_INDEX: &str = "/deployments";

/// Message shown when an environment can no longer be fetched
pub const ENVIRONMENT_GONE_MSG: &str = "Sorry, this environment doesn't exist anymore";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "nimbus-console".to_string(),
        version: version.version,
    })
}

/// Version response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

/// Session issuance request
#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub tenant_id: String,
}

/// Session issuance response
#[derive(Debug, Serialize)]
pub struct OpenSessionResponse {
    pub session_id: String,
}

/// Open a tenant-scoped session, setting the session cookie
pub async fn open_session_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<OpenSessionRequest>,
) -> Response {
    let session_id = state.sessions.create(&request.tenant_id).await;
    let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, session_id);

    (
        [(header::SET_COOKIE, cookie)],
        Json(OpenSessionResponse { session_id }),
    )
        .into_response()
}

/// Resolve the request's session or answer 401
pub async fn require_session(
    state: &ServerState,
    headers: &HeaderMap,
) -> Result<Session, Response> {
    state.sessions.resolve(headers).await.map_err(|e| {
        warn!("Rejecting request without a valid session: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "session required"})),
        )
            .into_response()
    })
}

/// Environment detail context
#[derive(Debug, Serialize)]
pub struct EnvironmentDetailContext {
    pub environment_id: String,
    pub environment_name: String,
    pub tenant_id: String,
    pub messages: Vec<FlashMessage>,
}

/// Environment detail view. Any remote failure redirects to the listing
/// with a user-facing message.
pub async fn environment_detail_handler(
    State(state): State<Arc<ServerState>>,
    Path(environment_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state
        .remote
        .environment_get(&session.tenant_id, &environment_id)
        .await
    {
        Ok(env) => {
            let messages = state.sessions.drain_messages(&session.id).await;
            Json(EnvironmentDetailContext {
                environment_id,
                environment_name: env.name,
                tenant_id: session.tenant_id,
                messages,
            })
            .into_response()
        }
        Err(e) => {
            warn!("Environment {} fetch failed: {}", environment_id, e);
            state
                .sessions
                .push_message(&session.id, FlashMessage::error(ENVIRONMENT_GONE_MSG))
                .await;
            Redirect::to(ENVIRONMENTS_INDEX).into_response()
        }
    }
}

/// Deployment detail context
#[derive(Debug, Serialize)]
pub struct DeploymentDetailContext {
    pub environment_id: String,
    pub environment_name: String,
    pub deployment: Deployment,
    pub deployment_start_time: chrono::DateTime<chrono::Utc>,
    pub logs: Vec<DeploymentLog>,
    pub messages: Vec<FlashMessage>,
}

/// Deployment detail view. Descriptor or log fetch failure redirects to the
/// deployments listing with a user-facing message.
pub async fn deployment_detail_handler(
    State(state): State<Arc<ServerState>>,
    Path((environment_id, deployment_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let context = assemble_deployment_context(&state, &session, &environment_id, &deployment_id)
        .await;
    match context {
        Ok(context) => Json(context).into_response(),
        Err(e) => {
            warn!(
                "Deployment {} of environment {} fetch failed: {}",
                deployment_id, environment_id, e
            );
            let msg = format!("Deployment with id {} doesn't exist anymore", deployment_id);
            state
                .sessions
                .push_message(&session.id, FlashMessage::error(msg))
                .await;
            Redirect::to(DEPLOYMENTS_INDEX).into_response()
        }
    }
}

async fn assemble_deployment_context(
    state: &ServerState,
    session: &Session,
    environment_id: &str,
    deployment_id: &str,
) -> Result<DeploymentDetailContext, ConsoleError> {
    let env = state
        .remote
        .environment_get(&session.tenant_id, environment_id)
        .await?;
    let deployment = state
        .remote
        .deployment_get(&session.tenant_id, environment_id, deployment_id)
        .await?;
    let logs = state
        .remote
        .deployment_logs(&session.tenant_id, environment_id, deployment_id)
        .await?;
    let messages = state.sessions.drain_messages(&session.id).await;

    Ok(DeploymentDetailContext {
        environment_id: environment_id.to_string(),
        environment_name: env.name,
        deployment_start_time: deployment.started_at,
        deployment,
        logs,
        messages,
    })
}

/// Raw environment JSON dump, passed through from the remote model endpoint
pub async fn environment_services_handler(
    State(state): State<Arc<ServerState>>,
    Path(environment_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state
        .remote
        .load_environment_data(&session.tenant_id, &environment_id)
        .await
    {
        Ok(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            data,
        )
            .into_response(),
        Err(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "environment not found"})),
        )
            .into_response(),
        Err(e) => {
            error!("Environment {} model fetch failed: {}", environment_id, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Create-form context: network choices from the remote network service
pub async fn create_form_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.remote.list_networks(&session.tenant_id).await {
        Ok(networks) => Json::<CreateFormContext>(build_network_choices(networks)).into_response(),
        Err(e) => {
            error!("Network listing failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Outcome of a form submission
#[derive(Debug, Serialize)]
pub struct FormOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    pub messages: Vec<FlashMessage>,
}

/// Create environment form submission
pub async fn create_environment_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Form(form): Form<CreateEnvironmentForm>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    // Validation failures never reach the remote API
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(FormOutcome {
                    success: false,
                    environment_id: None,
                    messages: vec![FlashMessage::error(e.to_string())],
                }),
            )
                .into_response();
        }
    };

    let name = payload.name.clone();
    match state
        .remote
        .environment_create(&session.tenant_id, &payload)
        .await
    {
        Ok(env) => {
            state.sessions.set_env_id(&session.id, &env.id).await;
            let message = FlashMessage::success(format!("Created environment \"{}\"", name));
            state
                .sessions
                .push_message(&session.id, message.clone())
                .await;
            Json(FormOutcome {
                success: true,
                environment_id: Some(env.id),
                messages: vec![message],
            })
            .into_response()
        }
        Err(e) => {
            error!("Failed to create environment \"{}\": {}", name, e);
            let message = FlashMessage::error(create_failure_message(&e));
            state
                .sessions
                .push_message(&session.id, message.clone())
                .await;
            Json(FormOutcome {
                success: false,
                environment_id: None,
                messages: vec![message],
            })
            .into_response()
        }
    }
}

/// Edit (rename) environment form submission
pub async fn edit_environment_handler(
    State(state): State<Arc<ServerState>>,
    Path(environment_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<EditEnvironmentForm>,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let name = match form.into_name() {
        Ok(name) => name,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(FormOutcome {
                    success: false,
                    environment_id: None,
                    messages: vec![FlashMessage::error(e.to_string())],
                }),
            )
                .into_response();
        }
    };

    match state
        .remote
        .environment_update(&session.tenant_id, &environment_id, &name)
        .await
    {
        Ok(env) => {
            let message = FlashMessage::success(format!("Edited environment '{}'", name));
            state
                .sessions
                .push_message(&session.id, message.clone())
                .await;
            Json(FormOutcome {
                success: true,
                environment_id: Some(env.id),
                messages: vec![message],
            })
            .into_response()
        }
        Err(e) => {
            error!("Failed to edit environment \"{}\": {}", name, e);
            let message = FlashMessage::error(edit_failure_message(&e, &name));
            state
                .sessions
                .push_message(&session.id, message.clone())
                .await;
            Json(FormOutcome {
                success: false,
                environment_id: None,
                messages: vec![message],
            })
            .into_response()
        }
    }
}
