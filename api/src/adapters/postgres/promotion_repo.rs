//! PostgreSQL adapter for PromotionRepository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{DishId, Promotion, PromotionId};
use crate::domain::ports::PromotionRepository;
use crate::entity::promotions;
use crate::error::DomainError;

/// PostgreSQL implementation of PromotionRepository
pub struct PostgresPromotionRepository<C = DatabaseConnection> {
    conn: Arc<C>,
    lock_rows: bool,
}

impl PostgresPromotionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            conn: Arc::new(db),
            lock_rows: false,
        }
    }
}

impl<C> PostgresPromotionRepository<C> {
    pub(super) fn in_transaction(conn: Arc<C>) -> Self {
        Self {
            conn,
            lock_rows: true,
        }
    }
}

#[async_trait]
impl<C> PromotionRepository for PostgresPromotionRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn create(&self, promotion: &Promotion) -> Result<Promotion, DomainError> {
        let model = promotions::ActiveModel {
            id: Set(promotion.id.0),
            name: Set(promotion.name.clone()),
            description: Set(promotion.description.clone()),
            discount_percent: Set(promotion.discount_percent),
            dish_ids: Set(dish_ids_to_json(&promotion.dish_ids)),
            is_active: Set(promotion.is_active),
            starts_at: Set(promotion.starts_at.fixed_offset()),
            ends_at: Set(promotion.ends_at.map(|dt| dt.fixed_offset())),
            created_at: Set(promotion.created_at.fixed_offset()),
            updated_at: Set(promotion.updated_at.fixed_offset()),
        };

        let result = model
            .insert(self.conn.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.try_into()
    }

    async fn find_by_id(&self, id: &PromotionId) -> Result<Option<Promotion>, DomainError> {
        let mut query = promotions::Entity::find_by_id(id.0);
        if self.lock_rows {
            query = query.lock_exclusive();
        }

        let result = query
            .one(self.conn.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Promotion::try_from).transpose()
    }

    async fn update(&self, promotion: &Promotion) -> Result<Promotion, DomainError> {
        let result = promotions::ActiveModel {
            id: Set(promotion.id.0),
            name: Set(promotion.name.clone()),
            description: Set(promotion.description.clone()),
            discount_percent: Set(promotion.discount_percent),
            dish_ids: Set(dish_ids_to_json(&promotion.dish_ids)),
            is_active: Set(promotion.is_active),
            starts_at: Set(promotion.starts_at.fixed_offset()),
            ends_at: Set(promotion.ends_at.map(|dt| dt.fixed_offset())),
            updated_at: Set(promotion.updated_at.fixed_offset()),
            ..Default::default()
        }
        .update(self.conn.as_ref())
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::PromotionNotFound(promotion.id),
            e => DomainError::Database(e.to_string()),
        })?;

        result.try_into()
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Promotion>, DomainError> {
        let results = promotions::Entity::find()
            .order_by_desc(promotions::Column::CreatedAt)
            .order_by_desc(promotions::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.conn.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Promotion::try_from).collect()
    }
}

fn dish_ids_to_json(ids: &[DishId]) -> serde_json::Value {
    serde_json::Value::Array(
        ids.iter()
            .map(|id| serde_json::Value::String(id.to_string()))
            .collect(),
    )
}

fn dish_ids_from_json(value: serde_json::Value) -> Result<Vec<DishId>, DomainError> {
    let raw: Vec<String> = serde_json::from_value(value)
        .map_err(|e| DomainError::Database(format!("Malformed dish_ids column: {}", e)))?;

    raw.iter()
        .map(|s| {
            Uuid::parse_str(s)
                .map(DishId)
                .map_err(|e| DomainError::Database(format!("Malformed dish id '{}': {}", s, e)))
        })
        .collect()
}

/// Convert SeaORM model to domain entity
impl TryFrom<promotions::Model> for Promotion {
    type Error = DomainError;

    fn try_from(model: promotions::Model) -> Result<Self, Self::Error> {
        Ok(Promotion {
            id: PromotionId(model.id),
            name: model.name,
            description: model.description,
            discount_percent: model.discount_percent,
            dish_ids: dish_ids_from_json(model.dish_ids)?,
            is_active: model.is_active,
            starts_at: model.starts_at.with_timezone(&Utc),
            ends_at: model.ends_at.map(|dt| dt.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}
