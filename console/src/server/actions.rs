//! Action invocation and result endpoints
//!
//! Actions run asynchronously in the remote service. Invocation answers
//! with a poll URL; the result endpoint delivers the heavy payload exactly
//! once to polling clients and composes the terminal response as either a
//! file download or an indented JSON attachment.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::ConsoleError;
use crate::server::handlers::require_session;
use crate::server::state::ServerState;

/// Default filename for non-file terminal results
const RESULT_FILENAME: &str = "result.json";

/// Default filename for terminal results carrying an exception
const EXCEPTION_FILENAME: &str = "exception.json";

/// Fallback filename for file results without one
const DEFAULT_FILE_NAME: &str = "action_result_file";

/// Fallback content type for terminal responses
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Empty success-shaped JSON body
fn empty_json() -> Response {
    Json(serde_json::json!({})).into_response()
}

/// Action invocation response
#[derive(Debug, Serialize)]
pub struct StartActionResponse {
    pub url: String,
}

/// The poll URL for a running task
pub fn action_result_url(environment_id: &str, task_id: &str) -> String {
    format!(
        "/environments/{}/actions/{}/result",
        environment_id, task_id
    )
}

/// Invoke a named action against an environment. Permission denial answers
/// with an empty JSON body, indistinguishable from a missing result.
pub async fn start_action_handler(
    State(state): State<Arc<ServerState>>,
    Path((environment_id, action_id)): Path<(String, String)>,
    headers: axum::http::HeaderMap,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    if !state
        .remote
        .action_allowed(&session.tenant_id, &environment_id)
        .await
    {
        debug!(
            "Denied action {} on environment {} for tenant {}",
            action_id, environment_id, session.tenant_id
        );
        return empty_json();
    }

    match state
        .remote
        .run_action(&session.tenant_id, &environment_id, &action_id)
        .await
    {
        Ok(task_id) => Json(StartActionResponse {
            url: action_result_url(&environment_id, &task_id),
        })
        .into_response(),
        Err(e) => {
            error!(
                "Failed to run action {} on environment {}: {}",
                action_id, environment_id, e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Query parameters of the action result endpoint
#[derive(Debug, Deserialize)]
pub struct ResultParams {
    /// Literal "poll" for polling requests, absent for the terminal fetch
    pub optional: Option<String>,
}

/// Action result endpoint. While polling, the heavy `result` payload is
/// delivered once and stripped from subsequent responses; the terminal
/// fetch composes a file download or an indented JSON attachment.
pub async fn action_result_handler(
    State(state): State<Arc<ServerState>>,
    Path((environment_id, task_id)): Path<(String, String)>,
    Query(params): Query<ResultParams>,
    headers: axum::http::HeaderMap,
) -> Response {
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let result = match state
        .remote
        .action_result(&session.tenant_id, &environment_id, &task_id)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            error!(
                "Result poll for task {} on environment {} failed: {}",
                task_id, environment_id, e
            );
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response();
        }
    };

    let Some(mut result) = result else {
        // Polling hasn't returned content yet
        return empty_json();
    };

    if params.optional.as_deref() == Some("poll") {
        if result.has_delivered_result() {
            // Remove content from response on first successful poll
            result.strip_result();
        }
        return Json(result.into_value()).into_response();
    }

    let is_file = result.is_file_returned();
    let is_exc = result.is_exception();
    match compose_response(result.inner_result(), is_file, is_exc) {
        Ok(response) => response,
        Err(e) => {
            error!(
                "Failed to compose result for task {} on environment {}: {}",
                task_id, environment_id, e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Compose the terminal response for an action result. File results become
/// binary downloads; everything else an indented JSON attachment whose
/// default filename reflects the exception flag.
pub fn compose_response(
    result: Value,
    is_file: bool,
    is_exc: bool,
) -> Result<Response, ConsoleError> {
    let mut filename = if is_exc {
        EXCEPTION_FILENAME.to_string()
    } else {
        RESULT_FILENAME.to_string()
    };
    let mut content_type = DEFAULT_CONTENT_TYPE.to_string();

    let content = if is_file {
        if let Some(name) = result.get("filename").and_then(Value::as_str) {
            if !name.is_empty() {
                filename = name.to_string();
            } else {
                filename = DEFAULT_FILE_NAME.to_string();
            }
        } else {
            filename = DEFAULT_FILE_NAME.to_string();
        }
        if let Some(mime) = result.get("mimeType").and_then(Value::as_str) {
            if !mime.is_empty() {
                content_type = mime.to_string();
            }
        }

        let encoded = result
            .get("base64Content")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ConsoleError::Internal("file result is missing base64Content".to_string())
            })?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| ConsoleError::Internal(format!("undecodable file content: {}", e)))?
    } else {
        serde_json::to_vec_pretty(&result)?
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", filename),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| ConsoleError::Internal(e.to_string()))
}
