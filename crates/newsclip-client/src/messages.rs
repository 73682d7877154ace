//! Tagged message envelopes for the cross-context boundaries.
//!
//! Each request gets exactly one terminal response; there is no keep-alive
//! signaling and no partial delivery. Every consumption site matches
//! exhaustively.

use newsclip_domain::{PageContent, User};
use newsclip_extractor::PageSnapshot;
use serde::{Deserialize, Serialize};

/// Extraction request carried across the message boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExtractRequest {
    /// Extract readable content from the captured snapshot
    #[serde(rename = "EXTRACT_CONTENT")]
    ExtractContent {
        /// The captured page
        snapshot: PageSnapshot,
    },
}

/// Terminal outcome of one extraction request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExtractOutcome {
    /// Extraction succeeded
    #[serde(rename = "CONTENT_EXTRACTED")]
    ContentExtracted {
        /// The extracted content
        payload: PageContent,
    },

    /// The page is not eligible for extraction
    #[serde(rename = "UNSUPPORTED_PAGE")]
    UnsupportedPage,

    /// Extraction ran but found nothing usable
    #[serde(rename = "ERROR")]
    Error {
        /// User-facing notice
        error: String,
    },
}

/// Authentication request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthRequest {
    /// Acquire an identity token and establish a session
    #[serde(rename = "AUTH_LOGIN")]
    Login,

    /// Clear the persisted session
    #[serde(rename = "AUTH_LOGOUT")]
    Logout,

    /// Report whether a session exists
    #[serde(rename = "AUTH_CHECK")]
    Check,

    /// Return the session token, if any
    #[serde(rename = "AUTH_GET_TOKEN")]
    GetToken,
}

/// Terminal outcome of one auth request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthOutcome {
    /// Login succeeded
    #[serde(rename = "LOGGED_IN")]
    LoggedIn {
        /// The authenticated user
        user: User,
    },

    /// Session cleared
    #[serde(rename = "LOGGED_OUT")]
    LoggedOut,

    /// Session status
    #[serde(rename = "AUTH_STATUS")]
    Status {
        /// Whether a session exists
        authenticated: bool,
        /// The session's user, when authenticated
        user: Option<User>,
    },

    /// The session token
    #[serde(rename = "AUTH_TOKEN")]
    Token {
        /// Token, when a session exists
        token: Option<String>,
    },

    /// The request failed
    #[serde(rename = "ERROR")]
    Error {
        /// User-facing notice
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_request_wire_tag() {
        let request = ExtractRequest::ExtractContent {
            snapshot: PageSnapshot::complete("https://example.com", "<html></html>"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "EXTRACT_CONTENT");
    }

    #[test]
    fn test_outcome_wire_tags() {
        let json = serde_json::to_value(ExtractOutcome::UnsupportedPage).unwrap();
        assert_eq!(json["type"], "UNSUPPORTED_PAGE");

        let json = serde_json::to_value(ExtractOutcome::Error {
            error: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "ERROR");
        assert_eq!(json["error"], "nope");
    }

    #[test]
    fn test_auth_request_round_trip() {
        for request in [
            AuthRequest::Login,
            AuthRequest::Logout,
            AuthRequest::Check,
            AuthRequest::GetToken,
        ] {
            let json = serde_json::to_string(&request).unwrap();
            let back: AuthRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(
                std::mem::discriminant(&request),
                std::mem::discriminant(&back)
            );
        }
    }
}
