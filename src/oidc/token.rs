//! Token endpoint logic for the `authorization_code` grant.

use crate::engine::TokenEngine;
use crate::error::{TokenError, INTERNAL_SERVER_ERROR, INVALID_GRANT, UNSUPPORTED_GRANT_TYPE};
use crate::jwt::TokenType;
use crate::metrics;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// Form body of `POST /token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: String,
    #[serde(default)]
    pub redirect_uri: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub id_token: String,
    pub token_type: String,
    pub scope: String,
    pub expires_in: i64,
}

/// OAuth2 error body, `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
        }
    }

    /// Whether the failure is on the provider side rather than the client's.
    pub fn is_server_error(&self) -> bool {
        self.error == INTERNAL_SERVER_ERROR
    }
}

/// Redeem an authorization code for an access token and an ID token.
pub fn exchange(
    engine: &TokenEngine,
    request: &TokenRequest,
    token_ttl_seconds: i64,
) -> Result<TokenResponse, ErrorResponse> {
    if request.grant_type != "authorization_code" {
        warn!(grant_type = %request.grant_type, "Unsupported grant type");
        return Err(ErrorResponse::new(UNSUPPORTED_GRANT_TYPE));
    }

    match engine.validate(&request.code, TokenType::Code) {
        Ok(_) => metrics::record_validation_success(),
        Err(e) => {
            metrics::record_validation_failure(e.reason());
            warn!(client_id = %request.client_id, reason = e.reason(), "Rejected authorization code");
            return Err(ErrorResponse::new(INVALID_GRANT));
        }
    }

    let issue = |result: Result<String, TokenError>, kind: &str| {
        result
            .inspect(|_| metrics::record_token_issued(kind))
            .map_err(|e| {
                error!(client_id = %request.client_id, error = %e, "Failed to issue {}", kind);
                ErrorResponse::new(e.oauth_error_code())
            })
    };

    let access_token = issue(
        engine.exchange_code_for_access_token(&request.code, token_ttl_seconds),
        "access_token",
    )?;
    let id_token = issue(
        engine.exchange_code_for_id_token(&request.code, &request.client_id, token_ttl_seconds),
        "id_token",
    )?;

    debug!(client_id = %request.client_id, "Exchanged authorization code");

    Ok(TokenResponse {
        access_token,
        id_token,
        token_type: "Bearer".to_string(),
        scope: "token id_token".to_string(),
        expires_in: token_ttl_seconds,
    })
}
