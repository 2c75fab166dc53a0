//! Transactional execution port
//!
//! A [`Transactor`] runs a unit of work against a transaction-scoped handle
//! and either commits everything it wrote or nothing at all.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use super::repositories::{DishRepository, OrderRepository, PromotionRepository};
use crate::error::DomainError;

/// The future a unit of work returns; it may borrow the scope for `'s`
pub type UnitOfWork<'s, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 's>>;

/// Runs units of work atomically
///
/// Contract:
/// - `Ok` from the unit of work commits; a failure to begin or to commit is
///   reported as `DomainError::Database` converted into `E`.
/// - `Err` from the unit of work rolls back and is returned unchanged.
/// - The scope is only lent for the duration of the call.
/// - Nothing is retried.
#[async_trait]
pub trait Transactor: Send + Sync {
    /// Transaction-scoped handle lent to each unit of work
    type Scope: Send + Sync;

    async fn within_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send,
        E: From<DomainError> + Send,
        F: for<'s> FnOnce(&'s Self::Scope) -> UnitOfWork<'s, T, E> + Send;
}

/// Repositories reachable from a scope on the menu side
pub trait MenuScope: Send + Sync {
    fn dishes(&self) -> &dyn DishRepository;

    fn promotions(&self) -> &dyn PromotionRepository;
}

/// Repositories reachable from a scope on the kitchen side
pub trait KitchenScope: Send + Sync {
    fn orders(&self) -> &dyn OrderRepository;
}
