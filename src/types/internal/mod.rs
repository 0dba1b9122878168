// Internal types that never cross the API boundary directly
pub mod auth;
pub mod identity;

pub use auth::{IdTokenClaims, VerifiedToken};
pub use identity::Identity;
