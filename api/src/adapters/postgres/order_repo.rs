//! PostgreSQL adapter for OrderRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QuerySelect, Set,
    SqlErr,
};

use crate::domain::entities::{Order, OrderId, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::entity::orders;
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository<C = DatabaseConnection> {
    conn: Arc<C>,
    lock_rows: bool,
}

impl PostgresOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            conn: Arc::new(db),
            lock_rows: false,
        }
    }
}

impl<C> PostgresOrderRepository<C> {
    pub(super) fn in_transaction(conn: Arc<C>) -> Self {
        Self {
            conn,
            lock_rows: true,
        }
    }
}

#[async_trait]
impl<C> OrderRepository for PostgresOrderRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn create(&self, order: &Order) -> Result<Order, DomainError> {
        let model = orders::ActiveModel {
            id: Set(order.id.0),
            status: Set(order.status.to_string()),
        };

        let result = model
            .insert(self.conn.as_ref())
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Validation(format!(
                    "Order {} is already registered",
                    order.id
                )),
                _ => DomainError::Database(e.to_string()),
            })?;

        result.try_into()
    }

    async fn get_status(&self, id: &OrderId) -> Result<Option<OrderStatus>, DomainError> {
        let mut query = orders::Entity::find_by_id(id.0);
        if self.lock_rows {
            query = query.lock_exclusive();
        }

        let result = query
            .one(self.conn.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result
            .map(|m| Order::try_from(m).map(|order| order.status))
            .transpose()
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), DomainError> {
        orders::ActiveModel {
            id: Set(id.0),
            status: Set(status.to_string()),
        }
        .update(self.conn.as_ref())
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::OrderNotFound(*id),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<orders::Model> for Order {
    type Error = DomainError;

    fn try_from(model: orders::Model) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse()
            .map_err(DomainError::Database)?;

        Ok(Order {
            id: OrderId(model.id),
            status,
        })
    }
}
