//! HTTP endpoint handlers.
//!
//! - `POST /api/send` relays one outbound SMS through the provider
//! - `POST /sms` acknowledges Twilio's inbound message webhook
//! - `GET /api/health` liveness probe

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Form, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::provider::{user_facing_message, SmsProvider};
use crate::web::twiml::EMPTY_RESPONSE;

pub const SEND_SUCCESS_MESSAGE: &str = "SMS sent successfully!";
pub const MISSING_FIELDS_MESSAGE: &str = "Recipient phone number and message are required.";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SmsProvider>,
    pub sender_number: Arc<str>,
}

impl AppState {
    pub fn new(provider: Arc<dyn SmsProvider>, sender_number: impl Into<Arc<str>>) -> Self {
        Self {
            provider,
            sender_number: sender_number.into(),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Outbound SMS
// =============================================================================

/// Send request body.
///
/// Both fields are optional here so that absence is reported as a 400 with
/// the usual failure body rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SendRequest {
    /// Recipient and body, if both are present and non-empty.
    ///
    /// Values are forwarded untouched; the provider judges their format.
    fn required_fields(&self) -> Option<(&str, &str)> {
        let to = self.to.as_deref().filter(|s| !s.is_empty())?;
        let message = self.message.as_deref().filter(|s| !s.is_empty())?;
        Some((to, message))
    }
}

/// Send response body.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SendResponse {
    fn sent(sid: String) -> Self {
        Self {
            success: true,
            message: Some(SEND_SUCCESS_MESSAGE.to_string()),
            sid: Some(sid),
            error: None,
            details: None,
        }
    }

    fn failed(error: String, details: Option<String>) -> Self {
        Self {
            success: false,
            message: None,
            sid: None,
            error: Some(error),
            details,
        }
    }
}

/// Outbound SMS endpoint.
///
/// This endpoint:
/// 1. Rejects requests missing `to` or `message` with 400
/// 2. Sends once through the provider from the configured number
/// 3. Returns the provider SID, or 500 with a user-facing error
pub async fn send_sms(
    State(state): State<AppState>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "send_body_rejected");
            SendRequest::default()
        }
    };

    let Some((to, message)) = request.required_fields() else {
        warn!(
            has_to = request.to.is_some(),
            has_message = request.message.is_some(),
            "send_missing_fields"
        );
        return (
            StatusCode::BAD_REQUEST,
            Json(SendResponse::failed(MISSING_FIELDS_MESSAGE.to_string(), None)),
        );
    };

    match state
        .provider
        .send_message(to, &state.sender_number, message)
        .await
    {
        Ok(sid) => {
            info!(sid = %sid, to = %to, "sms_sent");
            (StatusCode::OK, Json(SendResponse::sent(sid)))
        }
        Err(e) => {
            error!(error = %e, error_code = ?e.code(), to = %to, "sms_send_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SendResponse::failed(
                    user_facing_message(&e),
                    Some(e.to_string()),
                )),
            )
        }
    }
}

// =============================================================================
// Inbound SMS Webhook
// =============================================================================

/// Twilio inbound message form payload.
///
/// Twilio sends form-encoded data with PascalCase field names. Fields not
/// listed here land in `extra`.
#[derive(Debug, Default, Deserialize)]
pub struct InboundSms {
    #[serde(default, rename = "From")]
    pub from: Option<String>,
    #[serde(default, rename = "To")]
    pub to: Option<String>,
    #[serde(default, rename = "Body")]
    pub body: Option<String>,
    #[serde(default, rename = "MessageSid")]
    pub message_sid: Option<String>,
    #[serde(default, rename = "AccountSid")]
    pub account_sid: Option<String>,
    #[serde(default, rename = "NumMedia")]
    pub num_media: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

/// Inbound SMS webhook endpoint.
///
/// Always answers 200 with an empty TwiML response. Twilio treats anything
/// else as a failed delivery.
pub async fn inbound_sms(payload: Result<Form<InboundSms>, FormRejection>) -> impl IntoResponse {
    match payload {
        Ok(Form(sms)) => {
            info!(
                from = sms.from.as_deref().unwrap_or_default(),
                to = sms.to.as_deref().unwrap_or_default(),
                body = sms.body.as_deref().unwrap_or_default(),
                message_sid = sms.message_sid.as_deref().unwrap_or_default(),
                account_sid = sms.account_sid.as_deref().unwrap_or_default(),
                num_media = sms.num_media.as_deref().unwrap_or_default(),
                extra_fields = sms.extra.len(),
                "inbound_sms_received"
            );
        }
        Err(rejection) => {
            warn!(error = %rejection, "inbound_sms_unparsable");
        }
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/xml")],
        EMPTY_RESPONSE,
    )
}
