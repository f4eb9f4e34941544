//! Session sweeper worker

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, info};

use crate::session::SessionStore;

/// Sweeper worker options
#[derive(Debug, Clone)]
pub struct Options {
    /// Sweep interval
    pub interval: Duration,

    /// Initial delay before the first sweep
    pub initial_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            initial_delay: Duration::from_secs(5),
        }
    }
}

/// Run the sweeper worker
pub async fn run<S, F>(
    options: &Options,
    sessions: &SessionStore,
    sleep_fn: S,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Session sweeper starting...");

    // Initial delay
    sleep_fn(options.initial_delay).await;

    loop {
        // Check for shutdown
        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Session sweeper shutting down...");
                return;
            }
            _ = sleep_fn(options.interval) => {
                // Continue with sweep
            }
        }

        let expired = sessions.sweep_expired().await;
        if expired > 0 {
            debug!("Expired {} idle session(s)", expired);
        }
    }
}
