//! Web server module.
//!
//! Routes:
//! - `POST /api/send` relays an outbound SMS
//! - `POST /sms` acknowledges inbound SMS webhooks with TwiML
//! - `GET /api/health` liveness probe
//! - anything else, including other methods on the POST routes, is served
//!   from the public directory

pub mod handlers;
pub mod twiml;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use handlers::{
    health, inbound_sms, send_sms, AppState, HealthResponse, InboundSms, SendRequest,
    SendResponse, MISSING_FIELDS_MESSAGE, SEND_SUCCESS_MESSAGE,
};

/// Build the application router.
pub fn router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let static_files = ServeDir::new(public_dir);

    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/send",
            post(send_sms).fallback_service(static_files.clone()),
        )
        .route(
            "/sms",
            post(inbound_sms).fallback_service(static_files.clone()),
        )
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
