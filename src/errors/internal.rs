use sea_orm::DbErr;
use thiserror::Error;

/// Bearer token verification failures.
///
/// Returned by the `TokenVerifier` seam; never retried within a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("no token provided")]
    Missing,

    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Internal error type for store and provider operations.
///
/// Not exposed via API - endpoints convert to `ApiError` at the boundary,
/// where infrastructure details are logged and replaced by generic messages.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error("database error during {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: DbErr,
    },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("duplicate {field} in user directory")]
    DuplicateUser { field: &'static str },

    #[error("user {0} not found")]
    UserNotFound(String),

    /// Creation lost the subject_id race and the follow-up lookup found no
    /// winner either. Surfaces as 409.
    #[error("reconciliation conflict for subject {0}")]
    ReconcileConflict(String),

    #[error("failed to encode {value_type}: {message}")]
    Encode {
        value_type: &'static str,
        message: String,
    },
}

impl InternalError {
    pub fn database(operation: &str, source: DbErr) -> Self {
        InternalError::Database {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn encode(value_type: &'static str, message: impl ToString) -> Self {
        InternalError::Encode {
            value_type,
            message: message.to_string(),
        }
    }
}
