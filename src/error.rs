//! Error taxonomy for the provider.
//!
//! Key loading failures are fatal at startup. Validation failures are
//! returned to the caller, which maps them onto the OAuth2 error vocabulary.

use crate::jwt::claims::TokenType;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the signing keypair.
#[derive(Error, Debug)]
pub enum KeyLoadError {
    #[error("Failed to read key file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed key: {0}")]
    Malformed(String),

    #[error("Unsupported key algorithm: {0}, expected RSA")]
    WrongAlgorithm(String),

    #[error("Public key does not belong to the private key")]
    Mismatch,
}

/// Reason a presented token was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature invalid")]
    SignatureInvalid,

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: i64 },

    #[error("Unexpected token type: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("Unexpected issuer: {actual}")]
    IssuerMismatch { actual: String },
}

impl ValidationError {
    /// Short label used for metrics and logs.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MalformedToken(_) => "malformed",
            Self::SignatureInvalid => "signature_invalid",
            Self::Expired { .. } => "expired",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::IssuerMismatch { .. } => "issuer_mismatch",
        }
    }
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error(transparent)]
    KeyLoad(#[from] KeyLoadError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("JWT encoding error: {0}")]
    JwtEncoding(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TokenError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// OAuth2 `error` code reported to the client for this failure.
    #[must_use]
    pub const fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => INVALID_GRANT,
            _ => INTERNAL_SERVER_ERROR,
        }
    }
}

// OAuth2 error codes
pub const INVALID_GRANT: &str = "invalid_grant";
pub const INVALID_REQUEST: &str = "invalid_request";
pub const UNSUPPORTED_GRANT_TYPE: &str = "unsupported_grant_type";
pub const UNSUPPORTED_RESPONSE_TYPE: &str = "unsupported_response_type";
pub const UNSUPPORTED_SCOPE: &str = "unsupported_scope";
pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_invalid_grant() {
        let errors = [
            ValidationError::MalformedToken("bad".to_string()),
            ValidationError::SignatureInvalid,
            ValidationError::Expired { expired_at: 0 },
            ValidationError::TypeMismatch {
                expected: TokenType::Code,
                actual: TokenType::AccessToken,
            },
            ValidationError::IssuerMismatch {
                actual: "other".to_string(),
            },
        ];

        for err in errors {
            let err = TokenError::from(err);
            assert_eq!(err.oauth_error_code(), INVALID_GRANT);
        }
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        assert_eq!(
            TokenError::JwtEncoding("boom".to_string()).oauth_error_code(),
            INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            TokenError::from(KeyLoadError::Mismatch).oauth_error_code(),
            INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ValidationError::TypeMismatch {
            expected: TokenType::AccessToken,
            actual: TokenType::Code,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected token type: expected ACCESS_TOKEN, got CODE"
        );
        assert_eq!(err.reason(), "type_mismatch");
    }
}
