//! OpenID Connect protocol layer over [`TokenEngine`](crate::engine::TokenEngine).
//!
//! Transport-independent: the HTTP module only binds these functions to
//! routes.

pub mod authorize;
pub mod discovery;
pub mod token;

pub use authorize::{authorize, AuthorizationRequest, AuthorizeError};
pub use discovery::DiscoveryDocument;
pub use token::{exchange, ErrorResponse, TokenRequest, TokenResponse};
