use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{MeResponse, SigninRequest, SigninResponse, SignupRequest, SignupResponse},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/me", get(me))
}

pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let email = normalize_email(&payload.email);

    if !is_valid_email(&email) {
        warn!("signup with malformed email");
        return Err(ApiError::InvalidInput("invalid email".into()));
    }
    if payload.password.len() < state.config.password_min_len {
        warn!("signup with too-short password");
        return Err(ApiError::InvalidInput(format!(
            "password must be at least {} characters",
            state.config.password_min_len
        )));
    }

    let hash = hash_password(&payload.password)?;

    // The unique index on users(email) is the authoritative duplicate
    // guard; a losing concurrent insert comes back as DuplicateUser.
    let user = User::create(
        &state.db,
        &email,
        &hash,
        payload.first_name.trim(),
        payload.last_name.trim(),
    )
    .await?;

    info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: user.id,
            email: user.email,
        }),
    ))
}

#[instrument(skip(state, payload))]
async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::InvalidInput("email and password are required".into()));
    }
    let email = normalize_email(&payload.email);

    // Unknown email and wrong password produce the same response so the
    // caller cannot enumerate accounts.
    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!("signin for unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "signin with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, "user signed in");
    Ok(Json(SigninResponse {
        token,
        user_id: user.id,
        email: user.email,
    }))
}

#[instrument(skip_all)]
async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.id,
        email: user.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized_case_insensitively() {
        assert_eq!(normalize_email("  A@B.com "), "a@b.com");
        assert_eq!(normalize_email("A@B.com"), normalize_email("a@b.COM"));
    }

    #[test]
    fn email_validation_requires_at_sign() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@shop.example"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@signs@x"));
        assert!(!is_valid_email("space in@addr"));
    }
}
