//! Unified error types for the kitchen & menu API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors (not found, invariant violations, infrastructure)
//! - `KitchenError`: Order state machine failures, one kind per operation
//! - `AppError`: Application layer errors (wraps the above for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::{DishId, OrderId, OrderStatus, PromotionId};

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Dish {0} not found")]
    DishNotFound(DishId),

    #[error("Promotion {0} not found")]
    PromotionNotFound(PromotionId),

    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Persistence, begin or commit failure
    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::DishNotFound(_)
                | DomainError::PromotionNotFound(_)
                | DomainError::OrderNotFound(_)
        )
    }
}

/// Order state machine errors
///
/// Every failure of a transition collapses into the single variant of the
/// operation that raised it. The underlying cause stays reachable through
/// `source()` for logging only.
#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("Cannot start preparing order {order_id}")]
    CannotStartPreparing {
        order_id: OrderId,
        #[source]
        source: DomainError,
    },

    #[error("Cannot complete preparing order {order_id}")]
    CannotCompletePreparing {
        order_id: OrderId,
        #[source]
        source: DomainError,
    },
}

impl KitchenError {
    /// The failure underneath the collapsed kind
    pub fn cause(&self) -> &DomainError {
        match self {
            KitchenError::CannotStartPreparing { source, .. }
            | KitchenError::CannotCompletePreparing { source, .. } => source,
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Kitchen(#[from] KitchenError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, "Not found", Some(e.to_string()))
            }
            AppError::Domain(e @ DomainError::InvalidTransition { .. }) => {
                (StatusCode::CONFLICT, "Rejected", Some(e.to_string()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Kitchen(e) => match e.cause() {
                cause @ DomainError::Database(_) => {
                    tracing::error!(cause = %cause, "{}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                        None,
                    )
                }
                cause if cause.is_not_found() => {
                    tracing::warn!(cause = %cause, "{}", e);
                    (StatusCode::NOT_FOUND, "Not found", Some(e.to_string()))
                }
                cause => {
                    tracing::warn!(cause = %cause, "{}", e);
                    (StatusCode::CONFLICT, "Rejected", Some(e.to_string()))
                }
            },
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
