//! Token issuance and validation.
//!
//! [`TokenEngine`] is the only component that mints or accepts tokens. It
//! holds no mutable state: every call is a function of its arguments, the
//! clock and the shared [`KeyMaterial`], so one instance serves any number
//! of concurrent requests without locking.
//!
//! Codes are not tracked after issuance. A code can be exchanged any number
//! of times until it expires.

use crate::error::{TokenError, ValidationError};
use crate::jwt::{Claims, JwtSerializer, TokenType};
use crate::keys::{jose_name, KeyMaterial, SIGNING_ALGORITHM};
use std::sync::Arc;

pub struct TokenEngine {
    issuer: String,
    keys: Arc<KeyMaterial>,
    serializer: JwtSerializer,
}

impl TokenEngine {
    pub fn new(issuer: impl Into<String>, keys: Arc<KeyMaterial>) -> Self {
        TokenEngine {
            issuer: issuer.into(),
            keys,
            serializer: JwtSerializer::new(SIGNING_ALGORITHM),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// JOSE name of the signing algorithm, as advertised by discovery.
    pub const fn algorithm(&self) -> &'static str {
        jose_name(self.serializer.algorithm())
    }

    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    /// Mint an authorization code addressed back to this provider.
    pub fn create_code(&self, subject: &str, ttl_seconds: i64) -> Result<String, TokenError> {
        self.create(TokenType::Code, subject, &self.issuer, ttl_seconds)
    }

    pub fn create_access_token(&self, subject: &str, ttl_seconds: i64) -> Result<String, TokenError> {
        self.create(TokenType::AccessToken, subject, &self.issuer, ttl_seconds)
    }

    /// Mint an ID token for the client `audience`.
    ///
    /// ID tokens share the `ACCESS_TOKEN` type tag; only the audience tells
    /// them apart from access tokens.
    pub fn create_id_token(
        &self,
        audience: &str,
        subject: &str,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        self.create(TokenType::AccessToken, subject, audience, ttl_seconds)
    }

    pub fn exchange_code_for_access_token(
        &self,
        code: &str,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        let claims = self.validate(code, TokenType::Code)?;
        self.create_access_token(&claims.sub, ttl_seconds)
    }

    pub fn exchange_code_for_id_token(
        &self,
        code: &str,
        audience: &str,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        let claims = self.validate(code, TokenType::Code)?;
        self.create_id_token(audience, &claims.sub, ttl_seconds)
    }

    /// Verify `token` and check it was minted by this provider for
    /// `expected` use.
    ///
    /// Checks run in a fixed order: signature, expiry, type, issuer. The
    /// first failing check decides the error.
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<Claims, ValidationError> {
        let claims = self.serializer.deserialize(token, self.keys.decoding_key())?;

        if claims.is_expired_at(chrono::Utc::now().timestamp()) {
            return Err(ValidationError::Expired {
                expired_at: claims.exp,
            });
        }

        if claims.typ != expected {
            return Err(ValidationError::TypeMismatch {
                expected,
                actual: claims.typ,
            });
        }

        if claims.iss != self.issuer {
            return Err(ValidationError::IssuerMismatch {
                actual: claims.iss,
            });
        }

        Ok(claims)
    }

    fn create(
        &self,
        token_type: TokenType,
        subject: &str,
        audience: &str,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(
            token_type,
            self.issuer.clone(),
            subject.to_string(),
            audience.to_string(),
            ttl_seconds,
        );

        self.serializer
            .serialize(&claims, self.keys.encoding_key(), Some(self.keys.key_id()))
    }
}
