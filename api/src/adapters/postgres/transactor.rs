//! PostgreSQL transactor
//!
//! Opens a database transaction per unit of work and lends the work a
//! [`PostgresScope`] whose repositories all run on that transaction.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{PostgresDishRepository, PostgresOrderRepository, PostgresPromotionRepository};
use crate::domain::ports::{
    DishRepository, KitchenScope, MenuScope, OrderRepository, PromotionRepository, Transactor,
    UnitOfWork,
};
use crate::error::DomainError;

/// PostgreSQL implementation of Transactor
pub struct PostgresTransactor {
    db: DatabaseConnection,
}

impl PostgresTransactor {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Repositories bound to one open transaction
pub struct PostgresScope {
    txn: Arc<DatabaseTransaction>,
    dishes: PostgresDishRepository<DatabaseTransaction>,
    promotions: PostgresPromotionRepository<DatabaseTransaction>,
    orders: PostgresOrderRepository<DatabaseTransaction>,
}

impl PostgresScope {
    fn new(txn: DatabaseTransaction) -> Self {
        let txn = Arc::new(txn);
        Self {
            dishes: PostgresDishRepository::in_transaction(txn.clone()),
            promotions: PostgresPromotionRepository::in_transaction(txn.clone()),
            orders: PostgresOrderRepository::in_transaction(txn.clone()),
            txn,
        }
    }

    /// Drop the repositories and take the transaction back for commit or rollback
    fn into_transaction(self) -> Result<DatabaseTransaction, DomainError> {
        let PostgresScope {
            txn,
            dishes,
            promotions,
            orders,
        } = self;
        drop((dishes, promotions, orders));

        Arc::try_unwrap(txn).map_err(|_| {
            DomainError::Database("transaction handle is still borrowed".to_string())
        })
    }
}

impl MenuScope for PostgresScope {
    fn dishes(&self) -> &dyn DishRepository {
        &self.dishes
    }

    fn promotions(&self) -> &dyn PromotionRepository {
        &self.promotions
    }
}

impl KitchenScope for PostgresScope {
    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }
}

#[async_trait]
impl Transactor for PostgresTransactor {
    type Scope = PostgresScope;

    async fn within_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send,
        E: From<DomainError> + Send,
        F: for<'s> FnOnce(&'s Self::Scope) -> UnitOfWork<'s, T, E> + Send,
    {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(format!("Failed to begin transaction: {}", e)))?;
        tracing::debug!("Transaction started");

        let scope = PostgresScope::new(txn);
        let outcome = work(&scope).await;

        // An unreclaimable transaction is rolled back when dropped
        let txn = match scope.into_transaction() {
            Ok(txn) => txn,
            Err(e) => return outcome.and(Err(e.into())),
        };

        match outcome {
            Ok(value) => {
                txn.commit().await.map_err(|e| {
                    DomainError::Database(format!("Failed to commit transaction: {}", e))
                })?;
                tracing::debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                match txn.rollback().await {
                    Ok(()) => tracing::debug!("Transaction rolled back"),
                    Err(e) => tracing::error!("Failed to roll back transaction: {}", e),
                }
                Err(err)
            }
        }
    }
}
