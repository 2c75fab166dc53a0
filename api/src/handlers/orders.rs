//! Order handlers
//!
//! The kitchen side of an order: intake, status lookup and the two
//! preparation transitions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{OrderId, OrderStatus};
use crate::error::AppError;
use crate::AppState;

/// Request to register an order with the kitchen
#[derive(Debug, Deserialize)]
pub struct AcceptOrderRequest {
    /// Omitted ids are generated
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub status: OrderStatus,
}

/// POST /orders
pub async fn accept_order(
    State(state): State<AppState>,
    Json(req): Json<AcceptOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let id = req.id.map(OrderId).unwrap_or_default();
    let order = state.kitchen_service.accept_order(id).await?;
    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            id: order.id.to_string(),
            status: order.status,
        }),
    ))
}

/// GET /orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let status = state.kitchen_service.order_status(OrderId(id)).await?;
    Ok(Json(OrderResponse {
        id: id.to_string(),
        status,
    }))
}

/// POST /orders/:id/start-preparing
pub async fn start_preparing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.kitchen_service.start_preparing(OrderId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /orders/:id/complete-preparing
pub async fn complete_preparing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.kitchen_service.complete_preparing(OrderId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
