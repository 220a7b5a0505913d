//! Outbound SMS provider.
//!
//! Handlers only ever talk to [`SmsProvider`]. The production implementation
//! is [`TwilioClient`]; tests substitute their own.
//!
//! ## Flow
//!
//! ```text
//! POST /api/send → SmsProvider::send_message() → Twilio Messages API
//! ```

pub mod codes;
pub mod twilio;

use async_trait::async_trait;

pub use codes::{user_facing_message, KnownErrorCode};
pub use twilio::TwilioClient;

/// Errors returned by a provider send.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the request.
    #[error("provider returned HTTP {status}{}: {message}", .code.map(|c| format!(" (code {c})")).unwrap_or_default())]
    Api {
        status: u16,
        code: Option<u32>,
        message: String,
        more_info: Option<String>,
    },

    /// The request never produced a provider response.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered successfully but the body was not usable.
    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

impl ProviderError {
    /// Machine-readable provider error code, if the provider sent one.
    pub fn code(&self) -> Option<u32> {
        match self {
            ProviderError::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// The provider's own human-readable message.
    pub fn provider_message(&self) -> String {
        match self {
            ProviderError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A service able to deliver an outbound SMS.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Send `body` to `to` from `from`, returning the provider message id.
    async fn send_message(&self, to: &str, from: &str, body: &str) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_code() {
        let err = ProviderError::Api {
            status: 400,
            code: Some(21211),
            message: "The 'To' number 123 is not a valid phone number.".to_string(),
            more_info: None,
        };

        assert_eq!(err.code(), Some(21211));
        assert_eq!(
            err.to_string(),
            "provider returned HTTP 400 (code 21211): The 'To' number 123 is not a valid phone number."
        );
        assert_eq!(
            err.provider_message(),
            "The 'To' number 123 is not a valid phone number."
        );
    }

    #[test]
    fn test_api_error_display_without_code() {
        let err = ProviderError::Api {
            status: 503,
            code: None,
            message: "Service Unavailable".to_string(),
            more_info: None,
        };

        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "provider returned HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_unexpected_response_message() {
        let err = ProviderError::UnexpectedResponse("missing sid".to_string());
        assert_eq!(err.code(), None);
        assert_eq!(err.provider_message(), "unexpected provider response: missing sid");
    }
}
