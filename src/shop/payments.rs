use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

/// A recorded payment. Records only; no processing logic lives here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub amount: f64,
    pub method: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    pub order_id: Uuid,
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPayment {
    pub payment_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/payments", get(list_payments).post(create_payment))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
async fn list_payments(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let payments = sqlx::query_as::<_, Payment>(
        r#"
        SELECT id, user_id, order_id, amount, method, created_at
        FROM payments
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(payments))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
async fn create_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePayment>,
) -> Result<(StatusCode, Json<CreatedPayment>), ApiError> {
    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(ApiError::InvalidInput("amount must be positive".into()));
    }
    if payload.method.trim().is_empty() {
        return Err(ApiError::InvalidInput("payment method is required".into()));
    }

    let (payment_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO payments (user_id, order_id, amount, method)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(user.id)
    .bind(payload.order_id)
    .bind(payload.amount)
    .bind(payload.method.trim())
    .fetch_one(&state.db)
    .await?;

    info!(%payment_id, "payment recorded");
    Ok((StatusCode::CREATED, Json(CreatedPayment { payment_id })))
}
