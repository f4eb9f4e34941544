//! Application state management

use std::sync::Arc;

use tracing::info;

use crate::api::client::RemoteClient;
use crate::app::options::AppOptions;
use crate::errors::ConsoleError;
use crate::session::SessionStore;

/// Main application state
pub struct AppState {
    /// Client for the remote environment-management API
    pub remote: Arc<RemoteClient>,

    /// Browser session store
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Initialize application state
    pub fn init(options: &AppOptions) -> Result<Self, ConsoleError> {
        info!("Initializing application state...");

        let remote = Arc::new(RemoteClient::new(&options.remote_base_url)?);
        let sessions = Arc::new(SessionStore::new(options.session.ttl));

        Ok(Self { remote, sessions })
    }
}
