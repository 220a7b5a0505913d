//! Provider error codes with a dedicated user-facing message.
//!
//! Reference: https://www.twilio.com/docs/api/errors

use super::ProviderError;

/// Twilio error codes that get a friendlier message than the provider's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownErrorCode {
    /// 21211: the `To` number is not a valid phone number.
    InvalidToNumber,
}

impl KnownErrorCode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            21211 => Some(KnownErrorCode::InvalidToNumber),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            KnownErrorCode::InvalidToNumber => 21211,
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            KnownErrorCode::InvalidToNumber => {
                "Invalid phone number. Please use E.164 format (e.g., +1234567890)."
            }
        }
    }
}

/// Message shown to the caller for a failed send.
///
/// Known codes map to their fixed message; anything else surfaces the
/// provider's message unchanged.
pub fn user_facing_message(err: &ProviderError) -> String {
    match err.code().and_then(KnownErrorCode::from_code) {
        Some(known) => known.user_message().to_string(),
        None => err.provider_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: Option<u32>, message: &str) -> ProviderError {
        ProviderError::Api {
            status: 400,
            code,
            message: message.to_string(),
            more_info: None,
        }
    }

    #[test]
    fn test_known_code_lookup() {
        assert_eq!(
            KnownErrorCode::from_code(21211),
            Some(KnownErrorCode::InvalidToNumber)
        );
        assert_eq!(KnownErrorCode::InvalidToNumber.code(), 21211);
        assert_eq!(KnownErrorCode::from_code(20003), None);
    }

    #[test]
    fn test_invalid_number_gets_e164_guidance() {
        let err = api_error(Some(21211), "The 'To' number abc is not a valid phone number.");
        let message = user_facing_message(&err);
        assert_eq!(message, KnownErrorCode::InvalidToNumber.user_message());
        assert!(message.contains("E.164"));
    }

    #[test]
    fn test_other_codes_pass_through() {
        let err = api_error(Some(21608), "The number is unverified.");
        assert_eq!(user_facing_message(&err), "The number is unverified.");

        let err = api_error(None, "Bad Gateway");
        assert_eq!(user_facing_message(&err), "Bad Gateway");
    }
}
