//! Kitchen service
//!
//! The order state machine: `created -> preparing -> delivering`. Each
//! transition reads the current status and writes the next one inside a
//! single transaction, and reports every failure as the one error kind of
//! the operation that was attempted.

use std::sync::Arc;

use crate::domain::entities::{Order, OrderId, OrderStatus};
use crate::domain::ports::{KitchenScope, OrderRepository, Transactor};
use crate::error::{DomainError, KitchenError};

/// Service driving orders through the kitchen
pub struct KitchenService<OR, TX>
where
    OR: OrderRepository,
    TX: Transactor,
    TX::Scope: KitchenScope,
{
    orders: Arc<OR>,
    transactor: Arc<TX>,
}

impl<OR, TX> KitchenService<OR, TX>
where
    OR: OrderRepository,
    TX: Transactor,
    TX::Scope: KitchenScope,
{
    pub fn new(orders: Arc<OR>, transactor: Arc<TX>) -> Self {
        Self { orders, transactor }
    }

    /// Register an incoming order in `created`
    pub async fn accept_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        let order = self
            .transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move {
                    let orders = scope.orders();
                    if orders.get_status(&order_id).await?.is_some() {
                        return Err(DomainError::Validation(format!(
                            "Order {} is already registered",
                            order_id
                        )));
                    }
                    orders.create(&Order::accepted(order_id)).await
                })
            })
            .await?;

        tracing::info!("Order {} accepted", order.id);
        Ok(order)
    }

    /// Current status of an order
    pub async fn order_status(&self, order_id: OrderId) -> Result<OrderStatus, DomainError> {
        self.orders
            .get_status(&order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(order_id))
    }

    /// Move an order from `created` into `preparing`
    pub async fn start_preparing(&self, order_id: OrderId) -> Result<(), KitchenError> {
        self.advance(order_id, OrderStatus::Preparing)
            .await
            .map_err(|source| KitchenError::CannotStartPreparing { order_id, source })
    }

    /// Move an order from `preparing` into `delivering`
    pub async fn complete_preparing(&self, order_id: OrderId) -> Result<(), KitchenError> {
        self.advance(order_id, OrderStatus::Delivering)
            .await
            .map_err(|source| KitchenError::CannotCompletePreparing { order_id, source })
    }

    async fn advance(&self, order_id: OrderId, target: OrderStatus) -> Result<(), DomainError> {
        let result = self
            .transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move {
                    let orders = scope.orders();
                    let current = orders
                        .get_status(&order_id)
                        .await?
                        .ok_or(DomainError::OrderNotFound(order_id))?;

                    if !current.can_advance_to(target) {
                        return Err(DomainError::InvalidTransition {
                            from: current,
                            to: target,
                        });
                    }

                    orders.update_status(&order_id, target).await
                })
            })
            .await;

        match &result {
            Ok(()) => tracing::info!("Order {} is now {}", order_id, target),
            Err(e) => tracing::warn!("Order {} could not move to {}: {}", order_id, target, e),
        }
        result
    }
}
