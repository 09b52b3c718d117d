use crate::keys::KeyMaterial;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub alg: String,
    pub n: String,
    pub e: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// Key set holding the single signing key of this provider.
    pub fn from_key_material(keys: &KeyMaterial) -> Self {
        Jwks {
            keys: vec![keys.public_jwk()],
        }
    }
}
