use serde::{Deserialize, Serialize};

/// Claims carried by an identity token.
///
/// The `admin` custom claim is optional on the wire; an absent claim
/// deserializes to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdTokenClaims {
    /// Subject id: opaque, stable per identity-provider account
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Output of a successful token verification. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    pub subject_id: String,
    pub email: String,
    pub admin_claim: bool,
}

impl From<IdTokenClaims> for VerifiedToken {
    fn from(claims: IdTokenClaims) -> Self {
        Self {
            subject_id: claims.sub,
            email: claims.email,
            admin_claim: claims.admin,
        }
    }
}
