//! PostgreSQL adapter for DishRepository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::entities::{Dish, DishId};
use crate::domain::ports::DishRepository;
use crate::entity::dishes;
use crate::error::DomainError;

/// PostgreSQL implementation of DishRepository
///
/// Generic over the connection so the same queries run on the pool and on an
/// open transaction. Repositories bound to a transaction lock the rows they
/// load until commit or rollback.
pub struct PostgresDishRepository<C = DatabaseConnection> {
    conn: Arc<C>,
    lock_rows: bool,
}

impl PostgresDishRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            conn: Arc::new(db),
            lock_rows: false,
        }
    }
}

impl<C> PostgresDishRepository<C> {
    pub(super) fn in_transaction(conn: Arc<C>) -> Self {
        Self {
            conn,
            lock_rows: true,
        }
    }
}

#[async_trait]
impl<C> DishRepository for PostgresDishRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn create(&self, dish: &Dish) -> Result<Dish, DomainError> {
        let model = dishes::ActiveModel {
            id: Set(dish.id.0),
            name: Set(dish.name.clone()),
            description: Set(dish.description.clone()),
            price: Set(dish.price),
            category: Set(dish.category.clone()),
            is_available: Set(dish.is_available),
            created_at: Set(dish.created_at.fixed_offset()),
            updated_at: Set(dish.updated_at.fixed_offset()),
        };

        let result = model
            .insert(self.conn.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &DishId) -> Result<Option<Dish>, DomainError> {
        let mut query = dishes::Entity::find_by_id(id.0);
        if self.lock_rows {
            query = query.lock_exclusive();
        }

        let result = query
            .one(self.conn.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn update(&self, dish: &Dish) -> Result<Dish, DomainError> {
        let result = dishes::ActiveModel {
            id: Set(dish.id.0),
            name: Set(dish.name.clone()),
            description: Set(dish.description.clone()),
            price: Set(dish.price),
            category: Set(dish.category.clone()),
            is_available: Set(dish.is_available),
            updated_at: Set(dish.updated_at.fixed_offset()),
            ..Default::default()
        }
        .update(self.conn.as_ref())
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::DishNotFound(dish.id),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &DishId) -> Result<(), DomainError> {
        let result = dishes::Entity::delete_by_id(id.0)
            .exec(self.conn.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::DishNotFound(*id));
        }
        Ok(())
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Dish>, DomainError> {
        let results = dishes::Entity::find()
            .order_by_desc(dishes::Column::CreatedAt)
            .order_by_desc(dishes::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.conn.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<dishes::Model> for Dish {
    fn from(model: dishes::Model) -> Self {
        Dish {
            id: DishId(model.id),
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            is_available: model.is_available,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
