//! Authorization endpoint logic.
//!
//! The provider has no end-user login: a well-formed request is granted
//! immediately and the code's subject is the requesting client.

use crate::engine::TokenEngine;
use crate::error::{INTERNAL_SERVER_ERROR, UNSUPPORTED_RESPONSE_TYPE, UNSUPPORTED_SCOPE};
use crate::metrics;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

/// Query parameters of `GET /auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationRequest {
    pub response_type: String,
    pub client_id: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub nonce: String,
}

/// The request cannot be answered with a redirect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeError {
    #[error("redirect_uri must be an absolute URI: {0}")]
    InvalidRedirectUri(String),
}

/// Build the redirect for an authorization request.
///
/// Outcomes other than a malformed `redirect_uri` are reported to the client
/// through the `code` or `error` query parameter of the returned URI.
pub fn authorize(
    engine: &TokenEngine,
    request: &AuthorizationRequest,
    code_ttl_seconds: i64,
) -> Result<Url, AuthorizeError> {
    let mut redirect = Url::parse(&request.redirect_uri)
        .map_err(|e| AuthorizeError::InvalidRedirectUri(e.to_string()))?;

    let mut params: Vec<(String, String)> = redirect
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| !matches!(key.as_str(), "state" | "code" | "error"))
        .collect();

    if !request.state.is_empty() {
        params.push(("state".to_string(), request.state.clone()));
    }

    let outcome = if request.scope != "openid" {
        Err(UNSUPPORTED_SCOPE)
    } else if request.response_type == "code" {
        match engine.create_code(&request.client_id, code_ttl_seconds) {
            Ok(code) => {
                metrics::record_token_issued("code");
                debug!(client_id = %request.client_id, "Issued authorization code");
                Ok(code)
            }
            Err(e) => {
                error!(client_id = %request.client_id, error = %e, "Failed to issue authorization code");
                Err(INTERNAL_SERVER_ERROR)
            }
        }
    } else {
        Err(UNSUPPORTED_RESPONSE_TYPE)
    };

    match outcome {
        Ok(code) => params.push(("code".to_string(), code)),
        Err(error) => params.push(("error".to_string(), error.to_string())),
    }

    redirect.query_pairs_mut().clear().extend_pairs(params);
    Ok(redirect)
}
