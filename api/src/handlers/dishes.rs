//! Dish handlers
//!
//! Endpoints for menu management.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Dish, DishId, DishPatch, NewDish};
use crate::error::AppError;
use crate::AppState;

/// Largest page a listing returns
pub const MAX_PAGE_SIZE: u64 = 500;

/// Query parameters for paginated listings
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    100
}

impl PageQuery {
    /// `(limit, offset)` with the limit capped at [`MAX_PAGE_SIZE`]
    pub fn bounds(&self) -> Result<(u64, u64), AppError> {
        if self.limit == 0 {
            return Err(AppError::BadRequest("limit must be at least 1".to_string()));
        }
        Ok((self.limit.min(MAX_PAGE_SIZE), self.offset))
    }
}

/// Dish as returned by the API
#[derive(Debug, Serialize)]
pub struct DishResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub category: String,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Dish> for DishResponse {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id.to_string(),
            name: dish.name,
            description: dish.description,
            price: dish.price.to_string(),
            category: dish.category,
            is_available: dish.is_available,
            created_at: dish.created_at.to_rfc3339(),
            updated_at: dish.updated_at.to_rfc3339(),
        }
    }
}

/// POST /dishes
pub async fn create_dish(
    State(state): State<AppState>,
    Json(req): Json<NewDish>,
) -> Result<(StatusCode, Json<DishResponse>), AppError> {
    let dish = state.menu_service.add_dish(req).await?;
    Ok((StatusCode::CREATED, Json(dish.into())))
}

/// GET /dishes
///
/// Newest first.
pub async fn list_dishes(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<DishResponse>>, AppError> {
    let (limit, offset) = query.bounds()?;
    let dishes = state.menu_service.list_dishes(limit, offset).await?;
    Ok(Json(dishes.into_iter().map(DishResponse::from).collect()))
}

/// GET /dishes/:id
pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DishResponse>, AppError> {
    let dish = state.menu_service.get_dish(DishId(id)).await?;
    Ok(Json(dish.into()))
}

/// PUT|PATCH /dishes/:id
///
/// Only the fields present in the body are changed.
pub async fn update_dish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DishPatch>,
) -> Result<Json<DishResponse>, AppError> {
    let dish = state.menu_service.update_dish(DishId(id), patch).await?;
    Ok(Json(dish.into()))
}

/// DELETE /dishes/:id
pub async fn delete_dish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.menu_service.delete_dish(DishId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
