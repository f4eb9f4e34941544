//! Server state

use std::sync::Arc;

use crate::api::client::RemoteClient;
use crate::session::SessionStore;

/// Server state shared across handlers
pub struct ServerState {
    pub remote: Arc<RemoteClient>,
    pub sessions: Arc<SessionStore>,
}

impl ServerState {
    pub fn new(remote: Arc<RemoteClient>, sessions: Arc<SessionStore>) -> Self {
        Self { remote, sessions }
    }
}
