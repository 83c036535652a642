use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCategory {
    pub category_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories).post(create_category))
}

#[instrument(skip(state))]
async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, created_at
        FROM categories
        ORDER BY name ASC
        "#,
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(categories))
}

#[instrument(skip(state, payload))]
async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategory>,
) -> Result<(StatusCode, Json<CreatedCategory>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::InvalidInput("category name is required".into()));
    }

    let (category_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO categories (name)
        VALUES ($1)
        RETURNING id
        "#,
    )
    .bind(payload.name.trim())
    .fetch_one(&state.db)
    .await?;

    info!(%category_id, "category created");
    Ok((StatusCode::CREATED, Json(CreatedCategory { category_id })))
}
