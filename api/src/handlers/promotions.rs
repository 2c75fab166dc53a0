//! Promotion handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::dishes::PageQuery;
use crate::domain::entities::{NewPromotion, Promotion, PromotionId};
use crate::error::AppError;
use crate::AppState;

/// Promotion as returned by the API
#[derive(Debug, Serialize)]
pub struct PromotionResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_percent: String,
    pub dish_ids: Vec<String>,
    pub is_active: bool,
    pub starts_at: String,
    pub ends_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Promotion> for PromotionResponse {
    fn from(p: Promotion) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
            description: p.description,
            discount_percent: p.discount_percent.to_string(),
            dish_ids: p.dish_ids.iter().map(ToString::to_string).collect(),
            is_active: p.is_active,
            starts_at: p.starts_at.to_rfc3339(),
            ends_at: p.ends_at.map(|t| t.to_rfc3339()),
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

/// POST /promotions
///
/// Promotions start inactive.
pub async fn create_promotion(
    State(state): State<AppState>,
    Json(req): Json<NewPromotion>,
) -> Result<(StatusCode, Json<PromotionResponse>), AppError> {
    let promotion = state.menu_service.create_promotion(req).await?;
    Ok((StatusCode::CREATED, Json(promotion.into())))
}

/// GET /promotions
pub async fn list_promotions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PromotionResponse>>, AppError> {
    let (limit, offset) = query.bounds()?;
    let promotions = state.menu_service.list_promotions(limit, offset).await?;
    Ok(Json(
        promotions.into_iter().map(PromotionResponse::from).collect(),
    ))
}

/// GET /promotions/:id
pub async fn get_promotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PromotionResponse>, AppError> {
    let promotion = state.menu_service.get_promotion(PromotionId(id)).await?;
    Ok(Json(promotion.into()))
}

/// POST /promotions/:id/activate
///
/// Activating an active promotion returns it unchanged.
pub async fn activate_promotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PromotionResponse>, AppError> {
    let promotion = state
        .menu_service
        .activate_promotion(PromotionId(id))
        .await?;
    Ok(Json(promotion.into()))
}
