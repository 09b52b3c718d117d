pub mod claims;
pub mod serializer;

pub use claims::{Claims, TokenType};
pub use serializer::JwtSerializer;
