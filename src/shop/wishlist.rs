use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlist {
    pub product_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/wishlist", get(list_wishlist).post(add_to_wishlist))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
async fn list_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<WishlistItem>>, ApiError> {
    let items = sqlx::query_as::<_, WishlistItem>(
        r#"
        SELECT id, user_id, product_id, created_at
        FROM wishlist_items
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(items))
}

/// Adding a product already on the wishlist is a no-op: the unique
/// (user_id, product_id) pair is absorbed with ON CONFLICT DO NOTHING and
/// the existing row is returned with 200 instead of 201.
#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
async fn add_to_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToWishlist>,
) -> Result<(StatusCode, Json<WishlistItem>), ApiError> {
    let inserted = sqlx::query_as::<_, WishlistItem>(
        r#"
        INSERT INTO wishlist_items (user_id, product_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, product_id) DO NOTHING
        RETURNING id, user_id, product_id, created_at
        "#,
    )
    .bind(user.id)
    .bind(payload.product_id)
    .fetch_optional(&state.db)
    .await?;

    if let Some(item) = inserted {
        info!(item_id = %item.id, "wishlist item added");
        return Ok((StatusCode::CREATED, Json(item)));
    }

    debug!(product_id = %payload.product_id, "product already wishlisted");
    let existing = sqlx::query_as::<_, WishlistItem>(
        r#"
        SELECT id, user_id, product_id, created_at
        FROM wishlist_items
        WHERE user_id = $1 AND product_id = $2
        "#,
    )
    .bind(user.id)
    .bind(payload.product_id)
    .fetch_one(&state.db)
    .await?;
    Ok((StatusCode::OK, Json(existing)))
}
