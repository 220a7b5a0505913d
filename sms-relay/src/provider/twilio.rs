//! Twilio Messages API client.
//!
//! Reference: https://www.twilio.com/docs/messaging/api/message-resource#create-a-message-resource

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use super::{ProviderError, SmsProvider};
use crate::Config;

/// Twilio REST client.
///
/// Holds one pooled `reqwest::Client`; clone freely.
#[derive(Clone, Debug)]
pub struct TwilioClient {
    account_sid: String,
    auth_token: String,
    base_url: String,
    http: Client,
}

/// Successful message creation. Only the SID is used.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: Option<String>,
}

/// Twilio error document.
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<u32>,
    message: Option<String>,
    more_info: Option<String>,
}

impl TwilioClient {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.account_sid.clone(),
            config.auth_token.clone(),
            config.twilio_api_base_url.clone(),
        )
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

#[async_trait]
impl SmsProvider for TwilioClient {
    async fn send_message(&self, to: &str, from: &str, body: &str) -> Result<String, ProviderError> {
        info!(to = %to, body_length = body.len(), "twilio_send_starting");

        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let err = match serde_json::from_str::<TwilioErrorBody>(&text) {
                Ok(parsed) => ProviderError::Api {
                    status: status.as_u16(),
                    code: parsed.code,
                    message: parsed.message.unwrap_or_else(|| fallback_message(status, &text)),
                    more_info: parsed.more_info,
                },
                Err(_) => ProviderError::Api {
                    status: status.as_u16(),
                    code: None,
                    message: fallback_message(status, &text),
                    more_info: None,
                },
            };

            warn!(
                status_code = status.as_u16(),
                error_code = ?err.code(),
                "twilio_send_rejected"
            );

            return Err(err);
        }

        let resource: MessageResource = serde_json::from_str(&text)
            .map_err(|e| ProviderError::UnexpectedResponse(format!("invalid JSON: {}", e)))?;

        let sid = resource
            .sid
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::UnexpectedResponse("response has no sid".to_string()))?;

        info!(sid = %sid, status_code = status.as_u16(), "twilio_send_accepted");

        Ok(sid)
    }
}

/// Message for a rejection whose body is not a Twilio error document.
fn fallback_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
