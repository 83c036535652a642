use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub img: Option<String>,
    pub category: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
    pub img: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub product_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/products", get(list_products).post(create_product))
}

#[instrument(skip(state))]
async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, price, img, category, created_at
        FROM products
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(products))
}

#[instrument(skip(state, payload))]
async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<(StatusCode, Json<CreatedProduct>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::InvalidInput("product name is required".into()));
    }
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(ApiError::InvalidInput("price must be non-negative".into()));
    }

    let (product_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO products (name, price, img, category)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(payload.name.trim())
    .bind(payload.price)
    .bind(&payload.img)
    .bind(&payload.category)
    .fetch_one(&state.db)
    .await?;

    info!(%product_id, "product created");
    Ok((StatusCode::CREATED, Json(CreatedProduct { product_id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_product_accepts_partial_body() {
        let req: CreateProduct =
            serde_json::from_str(r#"{"name":"Blazer","price":120}"#).unwrap();
        assert_eq!(req.name, "Blazer");
        assert_eq!(req.price, 120.0);
        assert!(req.img.is_none());
        assert!(req.category.is_none());
    }

    #[test]
    fn created_response_uses_camel_case() {
        let json = serde_json::to_string(&CreatedProduct {
            product_id: Uuid::new_v4(),
        })
        .unwrap();
        assert!(json.contains("productId"));
    }
}
