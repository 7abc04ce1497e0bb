//! Error types for the verification API client

use thiserror::Error;

/// Main error type for the verification API client
///
/// Every non-success outcome of a verification call maps to a distinct
/// variant so callers can branch on kind. Business-level invalidity
/// (`valid: false` inside a 2xx payload) is not an error and never
/// appears here.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was available; raised before any network I/O
    #[error("API key not found. Set RX_VERIFY_API_KEY or pass the key explicitly.")]
    MissingCredential,

    /// 401 from the service: missing or invalid API key
    #[error("401 - missing or invalid API key")]
    Unauthorized,

    /// 403 from the service: key disabled or unauthorized role
    #[error("403 - API key disabled or unauthorized role")]
    Forbidden,

    /// 400 from the service, with the raw response body for diagnostics
    #[error("400 - bad request: {0}")]
    BadRequest(String),

    /// 405 from the service
    #[error("405 - method not allowed")]
    MethodNotAllowed,

    /// Any other non-2xx status
    #[error("service error {status}: {body}")]
    Service { status: u16, body: String },

    /// Network or timeout failure before a response was received
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint URL could not be parsed
    #[error("invalid endpoint URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response body was not valid JSON
    #[error("failed to parse server response: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for the verification API client
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify a non-2xx HTTP status into an error variant.
    ///
    /// `body` is the raw response body; it is carried only where the
    /// service uses it for diagnostics (400 and the catch-all).
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 => Error::BadRequest(body),
            401 => Error::Unauthorized,
            403 => Error::Forbidden,
            405 => Error::MethodNotAllowed,
            _ => Error::Service { status, body },
        }
    }

    /// True when retrying the same request might succeed (network flake
    /// or timeout). Service-classified errors are never transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(401)]
    #[case(403)]
    #[case(405)]
    #[case(500)]
    fn from_status_maps_each_code_to_its_own_variant(#[case] status: u16) {
        let error = Error::from_status(status, String::new());
        match status {
            401 => assert_matches!(error, Error::Unauthorized),
            403 => assert_matches!(error, Error::Forbidden),
            405 => assert_matches!(error, Error::MethodNotAllowed),
            _ => assert_matches!(error, Error::Service { status: 500, .. }),
        }
    }

    #[test]
    fn from_status_carries_body_for_bad_request() {
        let error = Error::from_status(400, "tokens must be an array".to_string());
        assert_matches!(error, Error::BadRequest(body) if body == "tokens must be an array");
    }

    #[test]
    fn from_status_carries_status_and_body_for_unknown_codes() {
        let error = Error::from_status(502, "bad gateway".to_string());
        assert_matches!(
            error,
            Error::Service { status: 502, body } if body == "bad gateway"
        );
    }

    #[test]
    fn error_variants_are_distinct() {
        use std::mem::discriminant;

        let errors = vec![
            Error::MissingCredential,
            Error::Unauthorized,
            Error::Forbidden,
            Error::BadRequest(String::new()),
            Error::MethodNotAllowed,
            Error::Service {
                status: 500,
                body: String::new(),
            },
            Error::Config(String::new()),
        ];

        for (i, a) in errors.iter().enumerate() {
            for (j, b) in errors.iter().enumerate() {
                if i != j {
                    assert_ne!(discriminant(a), discriminant(b));
                }
            }
        }
    }

    #[test]
    fn display_messages_are_human_readable_and_distinguishable() {
        let messages = vec![
            Error::MissingCredential.to_string(),
            Error::Unauthorized.to_string(),
            Error::Forbidden.to_string(),
            Error::BadRequest("oops".to_string()).to_string(),
            Error::MethodNotAllowed.to_string(),
            Error::Service {
                status: 503,
                body: "maintenance".to_string(),
            }
            .to_string(),
        ];

        for (i, a) in messages.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, b) in messages.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }

        assert_eq!(messages[3], "400 - bad request: oops");
        assert_eq!(messages[5], "service error 503: maintenance");
    }

    #[test]
    fn only_transport_errors_are_transient() {
        assert!(!Error::MissingCredential.is_transient());
        assert!(!Error::Unauthorized.is_transient());
        assert!(!Error::Forbidden.is_transient());
        assert!(!Error::BadRequest(String::new()).is_transient());
        assert!(!Error::MethodNotAllowed.is_transient());
        assert!(
            !Error::Service {
                status: 500,
                body: String::new()
            }
            .is_transient()
        );
        assert!(!Error::Config(String::new()).is_transient());
    }

    #[test]
    fn error_from_serde_json_error() {
        let serde_err =
            serde_json::from_str::<serde_json::Value>(r#"{"invalid": json"#).unwrap_err();
        let error = Error::from(serde_err);

        assert_matches!(error, Error::Json(_));
        assert!(error.to_string().contains("failed to parse server response"));
    }

    #[test]
    fn error_from_url_parse_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let error = Error::from(parse_err);

        assert_matches!(error, Error::UrlParse(_));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_source_chain() {
        let serde_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let error = Error::from(serde_err);

        assert!(std::error::Error::source(&error).is_some());
    }
}
