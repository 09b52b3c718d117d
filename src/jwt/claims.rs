use serde::{Deserialize, Serialize};
use std::fmt;

/// Purpose a token was minted for, carried in the `typ` claim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    /// Authorization code, exchanged at the token endpoint.
    Code,
    /// Access token. ID tokens carry this tag as well.
    AccessToken,
}

impl TokenType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::AccessToken => "ACCESS_TOKEN",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    pub typ: TokenType,
}

impl Claims {
    pub fn new(
        token_type: TokenType,
        issuer: String,
        subject: String,
        audience: String,
        ttl_seconds: i64,
    ) -> Self {
        let now = chrono::Utc::now().timestamp();
        Claims {
            iss: issuer,
            sub: subject,
            aud: audience,
            exp: now.saturating_add(ttl_seconds),
            iat: now,
            typ: token_type,
        }
    }

    /// Strict comparison: a token whose `exp` equals `timestamp` is still live.
    pub fn is_expired_at(&self, timestamp: i64) -> bool {
        self.exp < timestamp
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}
