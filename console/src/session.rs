//! In-memory browser session store
//!
//! The console keeps only what the views need between requests: the tenant
//! the browser is scoped to, the ID of the most recently created
//! environment, and flash messages waiting for the next rendered page.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::errors::ConsoleError;
use crate::utils::generate_uuid;

/// Cookie carrying the session ID
pub const SESSION_COOKIE: &str = "nimbus_session";

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Error,
}

/// A user-facing message queued for the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            text: text.into(),
        }
    }
}

/// Per-browser session data
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID, also the cookie value
    pub id: String,

    /// Tenant the session is scoped to
    pub tenant_id: String,

    /// ID of the environment created most recently in this session
    pub env_id: Option<String>,

    messages: Vec<FlashMessage>,
    last_seen: Instant,
}

/// Session store shared across handlers
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a session for a tenant, returning its ID
    pub async fn create(&self, tenant_id: &str) -> String {
        let id = generate_uuid();
        let session = Session {
            id: id.clone(),
            tenant_id: tenant_id.to_string(),
            env_id: None,
            messages: Vec::new(),
            last_seen: Instant::now(),
        };
        self.sessions.write().await.insert(id.clone(), session);
        id
    }

    /// Look up a session and refresh its idle timer
    pub async fn get(&self, session_id: &str) -> Result<Session, ConsoleError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.last_seen = Instant::now();
                Ok(session.clone())
            }
            None => Err(ConsoleError::SessionError(format!(
                "unknown session {}",
                session_id
            ))),
        }
    }

    /// Resolve the session referenced by the request's cookie header
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Session, ConsoleError> {
        let session_id = session_cookie(headers)
            .ok_or_else(|| ConsoleError::SessionError("missing session cookie".to_string()))?;
        self.get(&session_id).await
    }

    /// Record the ID of a newly created environment
    pub async fn set_env_id(&self, session_id: &str, env_id: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            session.env_id = Some(env_id.to_string());
        }
    }

    /// Queue a flash message for the next rendered page
    pub async fn push_message(&self, session_id: &str, message: FlashMessage) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            session.messages.push(message);
        }
    }

    /// Take all queued messages, leaving the queue empty
    pub async fn drain_messages(&self, session_id: &str) -> Vec<FlashMessage> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(session) => std::mem::take(&mut session.messages),
            None => Vec::new(),
        }
    }

    /// Drop sessions idle longer than the store TTL, returning the count
    pub async fn sweep_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_seen.elapsed() <= self.ttl);
        before - sessions.len()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Extract the session cookie value from a request's headers
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name == SESSION_COOKIE {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_messages_drain_once() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create("tenant-1").await;

        store.push_message(&id, FlashMessage::error("boom")).await;
        store.push_message(&id, FlashMessage::success("ok")).await;

        let messages = store.drain_messages(&id).await;
        assert_eq!(messages.len(), 2);
        assert!(store.drain_messages(&id).await.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let store = SessionStore::new(Duration::from_secs(0));
        store.create("tenant-1").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(store.sweep_expired().await, 1);
        assert!(store.is_empty().await);

        let store = SessionStore::new(Duration::from_secs(600));
        store.create("tenant-1").await;
        assert_eq!(store.sweep_expired().await, 0);
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn test_session_cookie_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; nimbus_session=abc-123; other=1"),
        );
        assert_eq!(session_cookie(&headers), Some("abc-123".to_string()));

        let empty = HeaderMap::new();
        assert_eq!(session_cookie(&empty), None);
    }
}
