use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: serde_json::Value,
    pub total: f64,
    pub shipping_address: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One line of an order, as sent by the client inside `items`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub shipping_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/orders", get(list_orders).post(create_order))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = sqlx::query_as::<_, Order>(
        r#"
        SELECT id, user_id, items, total, shipping_address, created_at
        FROM orders
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(orders))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrder>,
) -> Result<(StatusCode, Json<CreatedOrder>), ApiError> {
    if payload.items.is_empty() {
        return Err(ApiError::InvalidInput("order needs at least one item".into()));
    }
    if payload.items.iter().any(|line| line.quantity < 1) {
        return Err(ApiError::InvalidInput("item quantity must be at least 1".into()));
    }
    if !payload.total.is_finite() || payload.total < 0.0 {
        return Err(ApiError::InvalidInput("total must be non-negative".into()));
    }

    let items = serde_json::to_value(&payload.items)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let (order_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO orders (user_id, items, total, shipping_address)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(user.id)
    .bind(items)
    .bind(payload.total)
    .bind(payload.shipping_address.trim())
    .fetch_one(&state.db)
    .await?;

    info!(%order_id, "order created");
    Ok((StatusCode::CREATED, Json(CreatedOrder { order_id })))
}
