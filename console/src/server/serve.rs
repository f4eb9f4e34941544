//! HTTP server setup

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::options::ServerOptions;
use crate::errors::ConsoleError;
use crate::server::actions::{action_result_handler, start_action_handler};
use crate::server::handlers::{
    create_environment_handler, create_form_handler, deployment_detail_handler,
    edit_environment_handler, environment_detail_handler, environment_services_handler,
    health_handler, open_session_handler, version_handler,
};
use crate::server::state::ServerState;

/// Build the console router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Health and version
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Sessions
        .route("/session", post(open_session_handler))
        // Environments
        .route("/environments/new", get(create_form_handler))
        .route("/environments", post(create_environment_handler))
        .route(
            "/environments/{environment_id}",
            get(environment_detail_handler).post(edit_environment_handler),
        )
        .route(
            "/environments/{environment_id}/services",
            get(environment_services_handler),
        )
        // Deployments
        .route(
            "/environments/{environment_id}/deployments/{deployment_id}",
            get(deployment_detail_handler),
        )
        // Actions
        .route(
            "/environments/{environment_id}/actions/{action_id}",
            post(start_action_handler),
        )
        .route(
            "/environments/{environment_id}/actions/{task_id}/result",
            get(action_result_handler),
        )
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(
    options: &ServerOptions,
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), ConsoleError>>, ConsoleError> {
    let app = router(state);

    let addr = format!("{}:{}", options.host, options.port);
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ConsoleError::ServerError(e.to_string()))?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ConsoleError::ServerError(e.to_string()))
    });

    Ok(handle)
}
