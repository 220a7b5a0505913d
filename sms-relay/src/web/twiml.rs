//! TwiML acknowledgement documents.
//!
//! Reference: https://www.twilio.com/docs/messaging/twiml

/// Empty `<Response>`: acknowledges a webhook without sending a reply.
pub const EMPTY_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response/>"#;
