//! Configuration module for environment variable parsing.
//!
//! The three Twilio credentials are required. Startup must fail before any
//! listener is opened if one of them is missing, so loading returns a
//! [`ConfigError`] naming every absent variable instead of falling back.

use std::env;
use tracing::warn;

/// Twilio account identifier.
pub const ACCOUNT_SID_VAR: &str = "TWILIO_ACCOUNT_SID";
/// Twilio auth token.
pub const AUTH_TOKEN_VAR: &str = "TWILIO_AUTH_TOKEN";
/// Sender number used for every outbound message.
pub const PHONE_NUMBER_VAR: &str = "TWILIO_PHONE_NUMBER";

/// Required variables, in the order they are reported when missing.
pub const REQUIRED_VARS: [&str; 3] = [ACCOUNT_SID_VAR, AUTH_TOKEN_VAR, PHONE_NUMBER_VAR];

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_TWILIO_API_BASE_URL: &str = "https://api.twilio.com";

/// Configuration loading failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Twilio account SID
    pub account_sid: String,

    /// Twilio auth token
    pub auth_token: String,

    /// E.164 number messages are sent from
    pub phone_number: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Directory served for every unrouted path
    pub public_dir: String,

    /// Twilio REST API base URL
    pub twilio_api_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as missing. Values are kept exactly as given.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|&name| read(name).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let required = |name: &str| read(name).unwrap_or_default();

        Ok(Config {
            account_sid: required(ACCOUNT_SID_VAR),
            auth_token: required(AUTH_TOKEN_VAR),
            phone_number: required(PHONE_NUMBER_VAR),

            port: parse_port(read("PORT")),

            public_dir: read("PUBLIC_DIR").unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string()),

            twilio_api_base_url: read("TWILIO_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TWILIO_API_BASE_URL.to_string()),
        })
    }
}

/// Parse the listening port, falling back to the default on bad input.
fn parse_port(raw: Option<String>) -> u16 {
    let raw = match raw {
        Some(v) => v,
        None => return DEFAULT_PORT,
    };

    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!(env_var = "PORT", value = %raw, "Invalid port, using default");
            DEFAULT_PORT
        }
    }
}
