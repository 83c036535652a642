use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: Uuid,
    pub quantity: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/cart", get(list_cart).post(add_to_cart))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
async fn list_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    let items = sqlx::query_as::<_, CartItem>(
        r#"
        SELECT id, user_id, product_id, quantity, created_at
        FROM cart_items
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(items))
}

// The row is scoped to the token's user id, never a client-sent one.
#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCart>,
) -> Result<(StatusCode, Json<CartItem>), ApiError> {
    if payload.quantity < 1 {
        return Err(ApiError::InvalidInput("quantity must be at least 1".into()));
    }

    let item = sqlx::query_as::<_, CartItem>(
        r#"
        INSERT INTO cart_items (user_id, product_id, quantity)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, product_id, quantity, created_at
        "#,
    )
    .bind(user.id)
    .bind(payload.product_id)
    .bind(payload.quantity)
    .fetch_one(&state.db)
    .await?;

    info!(item_id = %item.id, "cart item added");
    Ok((StatusCode::CREATED, Json(item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_to_cart_parses_camel_case_body() {
        let id = Uuid::new_v4();
        let req: AddToCart = serde_json::from_str(&format!(
            r#"{{"productId":"{id}","quantity":2}}"#
        ))
        .unwrap();
        assert_eq!(req.product_id, id);
        assert_eq!(req.quantity, 2);
    }
}
