//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//! The same trait serves plain reads and, through a transaction scope,
//! writes made inside a unit of work.

use async_trait::async_trait;

use crate::domain::entities::{Dish, DishId, Order, OrderId, OrderStatus, Promotion, PromotionId};
use crate::error::DomainError;

/// Repository for Dish entities
#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Persist a new dish, returning the stored row
    async fn create(&self, dish: &Dish) -> Result<Dish, DomainError>;

    /// Find a dish by ID
    async fn find_by_id(&self, id: &DishId) -> Result<Option<Dish>, DomainError>;

    /// Overwrite every column of an existing dish
    async fn update(&self, dish: &Dish) -> Result<Dish, DomainError>;

    /// Delete a dish
    async fn delete(&self, id: &DishId) -> Result<(), DomainError>;

    /// Page through dishes, newest first
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Dish>, DomainError>;
}

/// Repository for Promotion entities
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    async fn create(&self, promotion: &Promotion) -> Result<Promotion, DomainError>;

    async fn find_by_id(&self, id: &PromotionId) -> Result<Option<Promotion>, DomainError>;

    async fn update(&self, promotion: &Promotion) -> Result<Promotion, DomainError>;

    /// Page through promotions, newest first
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Promotion>, DomainError>;
}

/// Repository for the kitchen's orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Register an order
    async fn create(&self, order: &Order) -> Result<Order, DomainError>;

    /// Current status, `None` when the order is unknown
    async fn get_status(&self, id: &OrderId) -> Result<Option<OrderStatus>, DomainError>;

    /// Overwrite the status of an existing order
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), DomainError>;
}
