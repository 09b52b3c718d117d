use serde::{Deserialize, Serialize};

/// OpenID Provider metadata served at `/.well-known/openid-configuration`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveryDocument {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub jwks_uri: String,
    pub scopes_supported: Vec<String>,
    pub response_types_supported: Vec<String>,
    pub subject_types_supported: Vec<String>,
    pub id_token_signing_alg_values_supported: Vec<String>,
}

impl DiscoveryDocument {
    pub fn new(issuer: &str, algorithm: &str) -> Self {
        DiscoveryDocument {
            issuer: issuer.to_string(),
            authorization_endpoint: format!("{issuer}/auth"),
            token_endpoint: format!("{issuer}/token"),
            jwks_uri: format!("{issuer}/certs"),
            scopes_supported: vec!["openid".to_string()],
            response_types_supported: vec!["code".to_string()],
            subject_types_supported: vec!["pairwise".to_string(), "public".to_string()],
            id_token_signing_alg_values_supported: vec![algorithm.to_string()],
        }
    }
}
