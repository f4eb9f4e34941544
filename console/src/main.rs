//! Nimbus Console - Entry Point
//!
//! Backend service for the environments section of the Nimbus cloud admin
//! console. Serves detail contexts, environment forms, and asynchronous
//! action polling in front of the remote environment-management API.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use nimbus_console::app::options::{AppOptions, ServerOptions, SessionOptions};
use nimbus_console::app::run::run;
use nimbus_console::logs::{init_logging, LogOptions};
use nimbus_console::settings::Settings;
use nimbus_console::utils::version_info;
use nimbus_console::workers::sweeper;

use tracing::{error, info, warn};

/// Default settings file location
const DEFAULT_SETTINGS_PATH: &str = "/etc/nimbus/console.json";

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    // Print version and exit
    let version = version_info();
    if cli_args.contains_key("version") {
        match serde_json::to_string_pretty(&version) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize version info: {}", e),
        }
        return;
    }

    // Retrieve the settings file, falling back to defaults when absent
    let settings_path = cli_args
        .get("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_SETTINGS_PATH);
    let settings = match Settings::load(settings_path).await {
        Ok(settings) => settings,
        Err(e) => {
            warn!(
                "Unable to read settings file {}: {}; using defaults",
                settings_path, e
            );
            Settings::default()
        }
    };

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        println!("Failed to initialize logging: {e}");
    }

    // Run the server
    let options = AppOptions {
        remote_base_url: settings.remote.base_url.clone(),
        server: ServerOptions {
            host: settings.server.host.clone(),
            port: settings.server.port,
        },
        session: SessionOptions {
            ttl: Duration::from_secs(settings.session_ttl_secs),
        },
        enable_sweeper: settings.enable_sweeper,
        sweeper: sweeper::Options {
            interval: Duration::from_secs(settings.sweep_interval_secs),
            ..Default::default()
        },
        ..Default::default()
    };

    info!("Running Nimbus console with options: {:?}", options);
    let result = run(options, await_shutdown_signal()).await;
    if let Err(e) = result {
        error!("Failed to run the console: {e}");
    }
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to install SIGINT handler: {}", e);
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Ctrl+C received, shutting down...");
    }
}
