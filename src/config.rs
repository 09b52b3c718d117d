//! Centralized configuration for the OIDC provider.
//!
//! All configuration is loaded from environment variables and validated
//! at startup.

use crate::error::TokenError;
use std::env;
use std::path::PathBuf;

/// Provider configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Server settings
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    // OIDC settings
    /// Issuer identifier, also the base URL of every endpoint
    pub issuer: String,
    /// Authorization code TTL in seconds
    pub code_ttl_seconds: i64,
    /// Access and ID token TTL in seconds
    pub token_ttl_seconds: i64,

    // Key material
    /// PEM file holding the RSA public key
    pub public_key_path: PathBuf,
    /// PEM file holding the RSA private key
    pub private_key_path: PathBuf,

    // Logging
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            issuer: "http://localhost:4000".to_string(),
            code_ttl_seconds: 5 * 60,
            token_ttl_seconds: 7 * 24 * 60 * 60,
            public_key_path: PathBuf::from("rsa.pem"),
            private_key_path: PathBuf::from("rsa.key"),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if a
    /// TTL is not positive.
    pub fn from_env() -> Result<Self, TokenError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TokenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", defaults.port)?;

        let issuer = lookup("OIDC_ISSUER")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.issuer);
        let code_ttl_seconds = parse_ttl(&lookup, "CODE_TTL", defaults.code_ttl_seconds)?;
        let token_ttl_seconds = parse_ttl(&lookup, "TOKEN_TTL", defaults.token_ttl_seconds)?;

        let public_key_path = lookup("OIDC_PUBLIC_KEY_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.public_key_path);
        let private_key_path = lookup("OIDC_PRIVATE_KEY_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.private_key_path);

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_json = parse_var(&lookup, "LOG_JSON", defaults.log_json)?;

        Ok(Self {
            host,
            port,
            issuer,
            code_ttl_seconds,
            token_ttl_seconds,
            public_key_path,
            private_key_path,
            log_level,
            log_json,
        })
    }

    /// Socket address string to bind the HTTP listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a variable, falling back to `default` when unset.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, TokenError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .parse()
            .map_err(|e| TokenError::config(format!("Invalid {}: {}", name, e))),
        None => Ok(default),
    }
}

fn parse_ttl<F>(lookup: &F, name: &str, default: i64) -> Result<i64, TokenError>
where
    F: Fn(&str) -> Option<String>,
{
    let ttl = parse_var(lookup, name, default)?;
    if ttl <= 0 {
        return Err(TokenError::config(format!("{} must be positive, got {}", name, ttl)));
    }
    Ok(ttl)
}
