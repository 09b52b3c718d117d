pub mod material;

pub use material::{jose_name, KeyMaterial, SIGNING_ALGORITHM};
