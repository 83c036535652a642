use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-level error taxonomy. Every variant renders as a stable
/// machine-readable code plus a human-readable message; internal causes
/// (database detail, hash parse errors) are logged, never echoed to the
/// client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("email already registered")]
    DuplicateUser,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing bearer token")]
    TokenMissing,
    #[error("invalid token")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("not found")]
    NotFound,
    #[error("storage unavailable")]
    Persistence(#[source] sqlx::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::DuplicateUser => "duplicate_user",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::TokenMissing => "token_missing",
            ApiError::TokenInvalid => "token_invalid",
            ApiError::TokenExpired => "token_expired",
            ApiError::NotFound => "not_found",
            ApiError::Persistence(_) => "persistence_error",
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::DuplicateUser => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials
            | ApiError::TokenMissing
            | ApiError::TokenInvalid
            | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Persistence(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            // 23505 = unique constraint violation; the only unique index an
            // insert can trip without ON CONFLICT is users(email).
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::DuplicateUser
            }
            other => ApiError::Persistence(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }
        // Display never includes the #[source], so the body stays free of
        // internal detail.
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_maps_to_401() {
        let err = ApiError::InvalidCredentials;
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.code(), "invalid_credentials");
    }

    #[test]
    fn duplicate_user_maps_to_400() {
        let err = ApiError::DuplicateUser;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "duplicate_user");
    }

    #[test]
    fn token_errors_are_distinguishable() {
        assert_eq!(ApiError::TokenMissing.code(), "token_missing");
        assert_eq!(ApiError::TokenInvalid.code(), "token_invalid");
        assert_eq!(ApiError::TokenExpired.code(), "token_expired");
        for err in [
            ApiError::TokenMissing,
            ApiError::TokenInvalid,
            ApiError::TokenExpired,
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn persistence_message_hides_store_detail() {
        let source = sqlx::Error::PoolTimedOut;
        let err = ApiError::from(source);
        assert_eq!(err.code(), "persistence_error");
        assert_eq!(err.to_string(), "storage unavailable");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
