//! OpenID Connect provider library.
//!
//! Issues RS512-signed authorization codes, access tokens and ID tokens for
//! the authorization code flow, and validates presented tokens against
//! their intended purpose.

#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod jwks;
pub mod jwt;
pub mod keys;
pub mod metrics;
pub mod oidc;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use config::Config;
pub use engine::TokenEngine;
pub use error::{KeyLoadError, TokenError, ValidationError};
pub use jwt::{Claims, TokenType};
pub use keys::KeyMaterial;
