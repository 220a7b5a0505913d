//! SMS Relay - thin HTTP glue in front of Twilio.
//!
//! This library provides the pieces wired together by the `sms-relay` binary:
//! - `config`: environment configuration with fail-fast credential checks
//! - `provider`: the outbound SMS provider interface and its Twilio client
//! - `web`: the axum router and its handlers
//! - `shutdown`: signal handling for graceful shutdown
//!
//! ## Architecture
//!
//! ```text
//! Browser → POST /api/send → SmsProvider → Twilio
//! Twilio  → POST /sms      → log → empty TwiML
//! ```

pub mod config;
pub mod provider;
pub mod shutdown;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use provider::{ProviderError, SmsProvider, TwilioClient};
pub use web::{router, AppState};
