use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/shipping", get(list_addresses).post(create_address))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
async fn list_addresses(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ShippingAddress>>, ApiError> {
    let addresses = sqlx::query_as::<_, ShippingAddress>(
        r#"
        SELECT id, user_id, address, city, postal_code, country, created_at
        FROM shipping_addresses
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(addresses))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
async fn create_address(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateShippingAddress>,
) -> Result<(StatusCode, Json<ShippingAddress>), ApiError> {
    if payload.address.trim().is_empty() || payload.country.trim().is_empty() {
        return Err(ApiError::InvalidInput("address and country are required".into()));
    }

    let address = sqlx::query_as::<_, ShippingAddress>(
        r#"
        INSERT INTO shipping_addresses (user_id, address, city, postal_code, country)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, address, city, postal_code, country, created_at
        "#,
    )
    .bind(user.id)
    .bind(payload.address.trim())
    .bind(payload.city.trim())
    .bind(payload.postal_code.trim())
    .bind(payload.country.trim())
    .fetch_one(&state.db)
    .await?;

    info!(address_id = %address.id, "shipping address created");
    Ok((StatusCode::CREATED, Json(address)))
}
