//! RS512 signing keypair.
//!
//! Loaded once at startup and shared read-only afterwards. The private half
//! is only reachable from inside the crate.

use crate::error::{KeyLoadError, TokenError};
use crate::jwks::Jwk;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{crypto, Algorithm, DecodingKey, EncodingKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, ALGORITHM_OID};
use rsa::pkcs8::spki::SubjectPublicKeyInfoRef;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, PrivateKeyInfo};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// Signing algorithm of every token this provider issues.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS512;

/// JOSE `alg` name of `algorithm`, as it appears in headers and JWKs.
pub const fn jose_name(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::HS256 => "HS256",
        Algorithm::HS384 => "HS384",
        Algorithm::HS512 => "HS512",
        Algorithm::ES256 => "ES256",
        Algorithm::ES384 => "ES384",
        Algorithm::RS256 => "RS256",
        Algorithm::RS384 => "RS384",
        Algorithm::RS512 => "RS512",
        Algorithm::PS256 => "PS256",
        Algorithm::PS384 => "PS384",
        Algorithm::PS512 => "PS512",
        Algorithm::EdDSA => "EdDSA",
    }
}

pub struct KeyMaterial {
    encoding: EncodingKey,
    decoding: DecodingKey,
    n: String,
    e: String,
    key_id: String,
}

impl KeyMaterial {
    /// Load the keypair from PEM files.
    ///
    /// # Errors
    ///
    /// Returns [`KeyLoadError`] if either file is missing or unreadable, or
    /// if its content is rejected by [`KeyMaterial::from_pem`].
    pub fn from_pem_files(
        public_path: impl AsRef<Path>,
        private_path: impl AsRef<Path>,
    ) -> Result<Self, KeyLoadError> {
        let public_pem = read_key_file(public_path.as_ref())?;
        let private_pem = read_key_file(private_path.as_ref())?;
        Self::from_pem(&public_pem, &private_pem)
    }

    /// Build the keypair from PEM text.
    ///
    /// Accepts PKCS#1 and PKCS#8/SPKI encodings of an RSA key. The public key
    /// must be the public half of the private key.
    pub fn from_pem(public_pem: &[u8], private_pem: &[u8]) -> Result<Self, KeyLoadError> {
        let public = parse_public_key(public_pem)?;
        let private = parse_private_key(private_pem)?;

        if RsaPublicKey::from(&private) != public {
            return Err(KeyLoadError::Mismatch);
        }

        let private_der = private
            .to_pkcs1_der()
            .map_err(|e| KeyLoadError::Malformed(e.to_string()))?;
        let encoding = EncodingKey::from_rsa_der(private_der.as_bytes());

        let n = URL_SAFE_NO_PAD.encode(public.n().to_bytes_be());
        let e = URL_SAFE_NO_PAD.encode(public.e().to_bytes_be());
        let decoding = DecodingKey::from_rsa_components(&n, &e)
            .map_err(|err| KeyLoadError::Malformed(err.to_string()))?;
        let key_id = thumbprint(&n, &e);

        Ok(Self {
            encoding,
            decoding,
            n,
            e,
            key_id,
        })
    }

    /// Sign `message` with the private key (RSASSA-PKCS1-v1_5, SHA-512).
    ///
    /// Raw signing for callers outside the token flow. Tokens are minted
    /// through jsonwebtoken with the same key, so signatures from either
    /// path verify here.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, TokenError> {
        let signature = crypto::sign(message, &self.encoding, SIGNING_ALGORITHM)
            .map_err(|e| TokenError::JwtEncoding(e.to_string()))?;
        URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| TokenError::JwtEncoding(e.to_string()))
    }

    /// Check `signature` over `message` against the public key.
    ///
    /// For verifiers holding a detached signature, such as the signature
    /// segment of an issued token over its `header.payload` input.
    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let signature = URL_SAFE_NO_PAD.encode(signature);
        crypto::verify(&signature, message, &self.decoding, SIGNING_ALGORITHM).unwrap_or(false)
    }

    /// RFC 7638 thumbprint of the public key.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub const fn algorithm(&self) -> Algorithm {
        SIGNING_ALGORITHM
    }

    /// Public key in JWK form, safe to publish.
    pub fn public_jwk(&self) -> Jwk {
        Jwk {
            kty: "RSA".to_string(),
            kid: self.key_id.clone(),
            key_use: "sig".to_string(),
            alg: jose_name(SIGNING_ALGORITHM).to_string(),
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("algorithm", &SIGNING_ALGORITHM)
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyLoadError> {
    std::fs::read(path).map_err(|source| KeyLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_pem(raw: &[u8]) -> Result<pem::Pem, KeyLoadError> {
    pem::parse(raw).map_err(|e| KeyLoadError::Malformed(e.to_string()))
}

fn parse_public_key(raw: &[u8]) -> Result<RsaPublicKey, KeyLoadError> {
    let block = parse_pem(raw)?;
    let der = block.contents();
    match block.tag() {
        "RSA PUBLIC KEY" => {
            RsaPublicKey::from_pkcs1_der(der).map_err(|e| KeyLoadError::Malformed(e.to_string()))
        }
        "PUBLIC KEY" => {
            let info = SubjectPublicKeyInfoRef::try_from(der)
                .map_err(|e| KeyLoadError::Malformed(e.to_string()))?;
            if info.algorithm.oid != ALGORITHM_OID {
                return Err(KeyLoadError::WrongAlgorithm(info.algorithm.oid.to_string()));
            }
            RsaPublicKey::from_public_key_der(der)
                .map_err(|e| KeyLoadError::Malformed(e.to_string()))
        }
        other => Err(KeyLoadError::WrongAlgorithm(other.to_string())),
    }
}

fn parse_private_key(raw: &[u8]) -> Result<RsaPrivateKey, KeyLoadError> {
    let block = parse_pem(raw)?;
    let der = block.contents();
    match block.tag() {
        "RSA PRIVATE KEY" => {
            RsaPrivateKey::from_pkcs1_der(der).map_err(|e| KeyLoadError::Malformed(e.to_string()))
        }
        "PRIVATE KEY" => {
            let info = PrivateKeyInfo::try_from(der)
                .map_err(|e| KeyLoadError::Malformed(e.to_string()))?;
            if info.algorithm.oid != ALGORITHM_OID {
                return Err(KeyLoadError::WrongAlgorithm(info.algorithm.oid.to_string()));
            }
            RsaPrivateKey::from_pkcs8_der(der).map_err(|e| KeyLoadError::Malformed(e.to_string()))
        }
        other => Err(KeyLoadError::WrongAlgorithm(other.to_string())),
    }
}

/// Required members in lexicographic order, no whitespace.
fn thumbprint(n: &str, e: &str) -> String {
    let canonical = format!(r#"{{"e":"{e}","kty":"RSA","n":"{n}"}}"#);
    URL_SAFE_NO_PAD.encode(Sha256::digest(canonical.as_bytes()))
}
