use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::{InternalError, TokenError};
use crate::types::dto::common::ErrorResponse;

/// API-facing error taxonomy.
///
/// Every variant is terminal for the request. The only server-side retry in
/// the system (duplicate-subject fallback during reconciliation) happens
/// below this layer; `Conflict` is what remains when that fallback fails too.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed input on create/update
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// Request carried no bearer token
    #[oai(status = 401)]
    NoToken(Json<ErrorResponse>),

    /// Token signature invalid or token malformed
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// Token past its expiry
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Authenticated but not authorized
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced record absent
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Duplicate subject id race that the re-lookup could not resolve
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Storage or unexpected failure
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(body("validation_error", message, 400))
    }

    pub fn no_token() -> Self {
        ApiError::NoToken(body("no_token", "No token provided", 401))
    }

    pub fn invalid_token() -> Self {
        ApiError::InvalidToken(body("invalid_token", "Invalid token", 401))
    }

    pub fn expired_token() -> Self {
        ApiError::ExpiredToken(body("expired_token", "Token has expired", 401))
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(body("forbidden", "Admin access required", 403))
    }

    pub fn not_owner() -> Self {
        ApiError::Forbidden(body(
            "forbidden",
            "Only the author or an admin may modify this resource",
            403,
        ))
    }

    pub fn not_found(resource: &str) -> Self {
        ApiError::NotFound(body("not_found", format!("{} not found", resource), 404))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body("conflict", message, 409))
    }

    fn internal_server_error() -> Self {
        ApiError::Internal(body("internal_error", "An internal error occurred", 500))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(json) => json.0.message.clone(),
            ApiError::NoToken(json) => json.0.message.clone(),
            ApiError::InvalidToken(json) => json.0.message.clone(),
            ApiError::ExpiredToken(json) => json.0.message.clone(),
            ApiError::Forbidden(json) => json.0.message.clone(),
            ApiError::NotFound(json) => json.0.message.clone(),
            ApiError::Conflict(json) => json.0.message.clone(),
            ApiError::Internal(json) => json.0.message.clone(),
        }
    }
}

/// Conversion point from internal errors to API errors.
///
/// Infrastructure details are logged here and never exposed to clients.
impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match &err {
            InternalError::Token(token_err) => token_err.clone().into(),
            InternalError::Database { operation, .. } => {
                tracing::error!("Database error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Encode { value_type, .. } => {
                tracing::error!("Encode error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::UserNotFound(id) => {
                tracing::debug!("User {} not found", id);
                Self::not_found("User")
            }
            InternalError::ReconcileConflict(subject_id) => {
                tracing::warn!("Unresolved creation race for subject {}", subject_id);
                Self::conflict("Concurrent registration could not be resolved")
            }
            InternalError::DuplicateUser { field } => {
                tracing::warn!("Duplicate {} in user directory", field);
                Self::conflict(format!("A user with this {} already exists", field))
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => Self::no_token(),
            TokenError::Expired => Self::expired_token(),
            TokenError::Invalid(reason) => {
                tracing::debug!("Token rejected: {}", reason);
                Self::invalid_token()
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
