use std::fmt;

/// Custom error type for secret-related failures
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
}

impl SecretManager {
    /// Initialize the SecretManager by loading and validating all secrets
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or fails validation
    pub fn init() -> Result<Self, SecretError> {
        let jwt_secret = Self::load_env("JWT_SECRET", 32)?;

        Ok(Self { jwt_secret })
    }

    /// Secret the identity token signatures are verified against
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    fn load_env(name: &str, min_length: usize) -> Result<String, SecretError> {
        let value = std::env::var(name).map_err(|_| SecretError::Missing {
            secret_name: name.to_string(),
        })?;

        if value.len() < min_length {
            return Err(SecretError::InvalidLength {
                secret_name: name.to_string(),
                expected: min_length,
                actual: value.len(),
            });
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
