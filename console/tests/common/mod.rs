//! Shared test fixtures: a stub remote environment-management API and a
//! console app wired against it.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use nimbus_console::api::client::RemoteClient;
use nimbus_console::server::serve::router;
use nimbus_console::server::state::ServerState;
use nimbus_console::session::{SessionStore, SESSION_COOKIE};

/// Tenant whose network service is unavailable
pub const TENANT_NO_NETWORKS: &str = "tenant-nonet";

/// Environment on which actions are denied
pub const DENIED_ENV: &str = "env-denied";

/// Base64 of "hello world"
pub const FILE_CONTENT_B64: &str = "aGVsbG8gd29ybGQ=";

/// Counters observing which remote endpoints were hit
#[derive(Default)]
pub struct StubCounters {
    pub creates: AtomicUsize,
    pub action_runs: AtomicUsize,
}

/// A console app bound to a stub remote API
pub struct TestApp {
    pub router: Router,
    pub sessions: Arc<SessionStore>,
    pub counters: Arc<StubCounters>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let counters = Arc::new(StubCounters::default());
        let remote_url = spawn_stub_remote(counters.clone()).await;

        let remote = Arc::new(RemoteClient::new(&remote_url).expect("client"));
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(600)));
        let state = Arc::new(ServerState::new(remote, sessions.clone()));

        Self {
            router: router(state),
            sessions,
            counters,
        }
    }

    /// Open a session for a tenant and return its cookie header value
    pub async fn session_cookie(&self, tenant: &str) -> String {
        let id = self.sessions.create(tenant).await;
        format!("{}={}", SESSION_COOKIE, id)
    }

    /// Open a session and return (cookie, session id)
    pub async fn session(&self, tenant: &str) -> (String, String) {
        let id = self.sessions.create(tenant).await;
        (format!("{}={}", SESSION_COOKIE, id), id)
    }
}

async fn spawn_stub_remote(counters: Arc<StubCounters>) -> String {
    let app = Router::new()
        .route("/environments", post(stub_create_environment))
        .route(
            "/environments/{id}",
            get(stub_get_environment).put(stub_update_environment),
        )
        .route("/environments/{id}/model", get(stub_environment_model))
        .route(
            "/environments/{id}/deployments/{dep}",
            get(stub_get_deployment),
        )
        .route(
            "/environments/{id}/deployments/{dep}/logs",
            get(stub_deployment_logs),
        )
        .route("/environments/{id}/actions/access", get(stub_action_access))
        .route("/environments/{id}/actions/{action}", post(stub_run_action))
        .route(
            "/environments/{id}/actions/{task}/result",
            get(stub_action_result),
        )
        .route("/networks", get(stub_networks))
        .with_state(counters);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub remote");
    });

    format!("http://{}", addr)
}

fn environment_json(id: &str, name: &str) -> Value {
    json!({"id": id, "name": name, "tenant_id": "tenant-1"})
}

async fn stub_get_environment(Path(id): Path<String>) -> Response {
    if id.starts_with("env-missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(environment_json(&id, "production")).into_response()
}

async fn stub_create_environment(
    State(counters): State<Arc<StubCounters>>,
    Json(payload): Json<Value>,
) -> Response {
    counters.creates.fetch_add(1, Ordering::SeqCst);
    let name = payload["name"].as_str().unwrap_or_default().to_string();
    if name == "dup" {
        return (StatusCode::CONFLICT, "name already in use").into_response();
    }
    Json(environment_json("env-new-1", &name)).into_response()
}

async fn stub_update_environment(
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    let name = payload["name"].as_str().unwrap_or_default().to_string();
    if name == "dup" {
        return (StatusCode::CONFLICT, "name already in use").into_response();
    }
    Json(environment_json(&id, &name)).into_response()
}

async fn stub_environment_model(Path(id): Path<String>) -> Response {
    if id.starts_with("env-missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    (
        StatusCode::OK,
        [("content-type", "application/json")],
        r#"{"services": [{"name": "db"}]}"#,
    )
        .into_response()
}

async fn stub_get_deployment(Path((id, dep)): Path<(String, String)>) -> Response {
    if dep.starts_with("dep-missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "id": dep,
        "environment_id": id,
        "started_at": "2025-08-01T12:00:00Z",
        "state": "success"
    }))
    .into_response()
}

async fn stub_deployment_logs(Path((_id, dep)): Path<(String, String)>) -> Response {
    if dep.starts_with("dep-missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "logs": [
            {"timestamp": "2025-08-01T12:00:01Z", "level": "info", "message": "deploying"},
            {"timestamp": "2025-08-01T12:00:02Z", "level": "info", "message": "done"}
        ]
    }))
    .into_response()
}

async fn stub_action_access(Path(id): Path<String>) -> Response {
    Json(json!({"allowed": id != DENIED_ENV})).into_response()
}

async fn stub_run_action(
    State(counters): State<Arc<StubCounters>>,
    Path((_id, action)): Path<(String, String)>,
) -> Response {
    counters.action_runs.fetch_add(1, Ordering::SeqCst);
    Json(json!({"task_id": format!("task-for-{}", action)})).into_response()
}

async fn stub_action_result(Path((_id, task)): Path<(String, String)>) -> Response {
    let body = match task.as_str() {
        "task-pending" => Value::Null,
        "task-null" => json!({"result": null, "isException": false}),
        "task-exc" => json!({"result": {"error": "boom"}, "isException": true}),
        "task-file" => json!({
            "result": {
                "?": {"type": "io.murano.File"},
                "filename": "report.txt",
                "mimeType": "text/plain",
                "base64Content": FILE_CONTENT_B64
            },
            "isException": false
        }),
        _ => json!({"result": {"out": 42}, "isException": false}),
    };
    Json(body).into_response()
}

async fn stub_networks(headers: HeaderMap) -> Response {
    let tenant = headers
        .get("X-Tenant-Id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if tenant == TENANT_NO_NETWORKS {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "networks": [
            {"id": "net-1", "name": "private"},
            {"id": "net-2", "name": "public"}
        ]
    }))
    .into_response()
}
