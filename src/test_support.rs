//! Shared fixtures for unit tests.

use crate::keys::KeyMaterial;
use std::sync::Arc;

pub const PUBLIC_PEM: &str = include_str!("../tests/fixtures/rsa.pem");
pub const PRIVATE_PEM: &str = include_str!("../tests/fixtures/rsa.key");
pub const OTHER_PUBLIC_PEM: &str = include_str!("../tests/fixtures/other.pem");
pub const OTHER_PRIVATE_PEM: &str = include_str!("../tests/fixtures/other.key");
pub const EC_PUBLIC_PEM: &str = include_str!("../tests/fixtures/ec.pem");
pub const EC_PRIVATE_PEM: &str = include_str!("../tests/fixtures/ec.key");

pub const TEST_ISSUER: &str = "http://localhost:4000";

pub fn test_keys() -> Arc<KeyMaterial> {
    Arc::new(KeyMaterial::from_pem(PUBLIC_PEM.as_bytes(), PRIVATE_PEM.as_bytes()).unwrap())
}

pub fn other_keys() -> Arc<KeyMaterial> {
    Arc::new(
        KeyMaterial::from_pem(OTHER_PUBLIC_PEM.as_bytes(), OTHER_PRIVATE_PEM.as_bytes()).unwrap(),
    )
}
