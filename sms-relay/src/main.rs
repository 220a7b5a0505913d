//! SMS Relay web server.
//!
//! This binary:
//! - Loads Twilio credentials, exiting with status 1 if any is missing
//! - Relays `POST /api/send` requests to Twilio
//! - Acknowledges inbound SMS webhooks on `POST /sms`
//! - Serves the front-end from the public directory

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smsrelay::shutdown::shutdown_signal;
use smsrelay::{router, AppState, Config, TwilioClient};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("sms_relay_starting");

    // Load configuration before anything touches the network
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "config_invalid");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "sms_relay_failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the web server until a shutdown signal arrives.
async fn run(config: Config) -> Result<()> {
    info!(
        port = config.port,
        public_dir = %config.public_dir,
        phone_number = %config.phone_number,
        twilio_api_base_url = %config.twilio_api_base_url,
        "config_loaded"
    );

    let provider = Arc::new(TwilioClient::from_config(&config));
    let state = AppState::new(provider, config.phone_number.as_str());
    let app = router(state, &config.public_dir);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
        })
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}
