use crate::error::{TokenError, ValidationError};
use crate::jwt::claims::Claims;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Compact JWT encoding pinned to a single algorithm.
///
/// Decoding checks the signature and claim shape only. Expiry, type and
/// issuer are left to the caller so each failure is reported distinctly.
pub struct JwtSerializer {
    algorithm: Algorithm,
}

impl JwtSerializer {
    pub const fn new(algorithm: Algorithm) -> Self {
        JwtSerializer { algorithm }
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn serialize(
        &self,
        claims: &Claims,
        key: &EncodingKey,
        key_id: Option<&str>,
    ) -> Result<String, TokenError> {
        let mut header = Header::new(self.algorithm);
        if let Some(kid) = key_id {
            header.kid = Some(kid.to_string());
        }

        encode(&header, claims, key).map_err(|e| TokenError::JwtEncoding(e.to_string()))
    }

    pub fn deserialize(&self, token: &str, key: &DecodingKey) -> Result<Claims, ValidationError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_aud = false;
        // `exp` is typed as i64 on `Claims`; jsonwebtoken would read it as u64.
        validation.set_required_spec_claims(&["iss", "sub", "aud"]);

        let token_data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                ValidationError::SignatureInvalid
            }
            _ => ValidationError::MalformedToken(e.to_string()),
        })?;

        Ok(token_data.claims)
    }
}
