use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use std::fmt;
use std::sync::Arc;

use crate::config::SecretManager;
use crate::errors::TokenError;
use crate::types::internal::auth::{IdTokenClaims, VerifiedToken};

/// Verifies inbound bearer tokens against the identity provider.
///
/// A trait seam rather than a concrete type so that handlers can be driven by
/// test doubles; the production implementation is [`JwtTokenVerifier`].
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validate `token` and extract its subject, email, and admin claim.
    ///
    /// Fails with `TokenError::Missing` for an empty token, `Expired` past
    /// expiry, and `Invalid` for a bad signature or malformed structure.
    /// Verification failures are terminal for the request; callers never
    /// retry within the same request.
    async fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError>;
}

/// HS256 JWT verifier backed by the configured identity-token secret.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
}

impl JwtTokenVerifier {
    pub fn new(secret_manager: &SecretManager) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret_manager.jwt_secret().as_bytes()),
        }
    }

    /// Build a verifier from a raw secret. Mainly useful in tests.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<IdTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                kind => TokenError::Invalid(format!("{:?}", kind)),
            })?;

        Ok(token_data.claims.into())
    }
}

impl fmt::Debug for JwtTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenVerifier")
            .field("decoding_key", &"<redacted>")
            .finish()
    }
}

/// Test double that returns a fixed verification result for any token.
pub struct StaticVerifier {
    result: VerifiedToken,
}

impl StaticVerifier {
    pub fn new(subject_id: &str, email: &str, admin_claim: bool) -> Arc<Self> {
        Arc::new(Self {
            result: VerifiedToken {
                subject_id: subject_id.to_string(),
                email: email.to_string(),
                admin_claim,
            },
        })
    }
}

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";

    fn mint(claims: &IdTokenClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(sub: &str, email: &str, admin: bool, exp_offset: i64) -> IdTokenClaims {
        let now = Utc::now().timestamp();
        IdTokenClaims {
            sub: sub.to_string(),
            email: email.to_string(),
            admin,
            exp: now + exp_offset,
            iat: now,
        }
    }

    #[tokio::test]
    async fn test_valid_token_yields_subject_email_and_claim() {
        let verifier = JwtTokenVerifier::from_secret(TEST_SECRET);
        let token = mint(&claims("uid-1", "a@x.com", true, 900), TEST_SECRET);

        let verified = verifier.verify(&token).await.unwrap();

        assert_eq!(verified.subject_id, "uid-1");
        assert_eq!(verified.email, "a@x.com");
        assert!(verified.admin_claim);
    }

    #[tokio::test]
    async fn test_absent_admin_claim_defaults_to_false() {
        // Serialize claims without the admin field at all
        let now = Utc::now().timestamp();
        let raw = serde_json::json!({
            "sub": "uid-2",
            "email": "b@x.com",
            "exp": now + 900,
            "iat": now,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &raw,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let verifier = JwtTokenVerifier::from_secret(TEST_SECRET);
        let verified = verifier.verify(&token).await.unwrap();

        assert!(!verified.admin_claim);
    }

    #[tokio::test]
    async fn test_empty_token_is_missing() {
        let verifier = JwtTokenVerifier::from_secret(TEST_SECRET);

        let result = verifier.verify("").await;

        assert_eq!(result, Err(TokenError::Missing));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let verifier = JwtTokenVerifier::from_secret(TEST_SECRET);
        let token = mint(&claims("uid-3", "c@x.com", false, -3600), TEST_SECRET);

        let result = verifier.verify(&token).await;

        assert_eq!(result, Err(TokenError::Expired));
    }

    #[tokio::test]
    async fn test_wrong_signature_is_invalid() {
        let verifier = JwtTokenVerifier::from_secret(TEST_SECRET);
        let token = mint(
            &claims("uid-4", "d@x.com", false, 900),
            "a-different-secret-also-32-chars-long!!",
        );

        let result = verifier.verify(&token).await;

        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let verifier = JwtTokenVerifier::from_secret(TEST_SECRET);

        let result = verifier.verify("not-a-jwt").await;

        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }
}
