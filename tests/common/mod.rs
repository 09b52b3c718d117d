#![allow(dead_code)]

use oidc_provider::{KeyMaterial, TokenEngine};
use std::path::PathBuf;
use std::sync::Arc;

pub const ISSUER: &str = "http://localhost:4000";

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_keys(public: &str, private: &str) -> Arc<KeyMaterial> {
    Arc::new(KeyMaterial::from_pem_files(fixture(public), fixture(private)).unwrap())
}

pub fn engine() -> TokenEngine {
    TokenEngine::new(ISSUER, load_keys("rsa.pem", "rsa.key"))
}

pub fn foreign_engine() -> TokenEngine {
    TokenEngine::new(ISSUER, load_keys("other.pem", "other.key"))
}
